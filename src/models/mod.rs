//! Data Models
//!
//! Filters, analysis results, settings and command envelopes.

pub mod analysis;
pub mod filters;
pub mod response;
pub mod settings;

pub use analysis::{
    AnalysisResult, AnalysisResultSet, CompetitorBrand, CostBreakdown, CostField, SalesPoint,
};
pub use filters::{AnalysisPeriod, FilterSelection, Industry, StoreType};
pub use response::{CommandResponse, HealthResponse};
pub use settings::{AppConfig, SettingsUpdate};
