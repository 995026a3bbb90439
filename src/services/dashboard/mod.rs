//! Dashboard
//!
//! Session state container and its read-only view projection.

pub mod reconciler;
pub mod view;

pub use reconciler::DashboardState;
pub use view::{format_amount, DashboardSnapshot, DashboardView, TabInfo};
