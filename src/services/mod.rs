//! Services
//!
//! Business logic services for the application.
//! Services handle the core functionality and are called by commands.

pub mod analysis;
pub mod dashboard;

pub use analysis::{AnalysisError, AnalysisService};
pub use dashboard::{DashboardSnapshot, DashboardState, DashboardView};
