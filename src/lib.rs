//! Franchise Navigator - Rust Backend Library
//!
//! Backend for the franchise market analysis dashboard:
//! - Command handlers called by the view layer
//! - Analysis service (request building, response validation)
//! - Dashboard state container
//! - Config storage, data models and utilities

pub mod commands;
pub mod models;
pub mod services;
pub mod state;
pub mod storage;
pub mod utils;

// Re-export commonly used items from commands
pub use commands::{
    // Init commands
    init_app, get_version,
    // Health commands
    get_health, check_provider,
    // Settings commands
    get_settings, update_settings,
    // Analysis commands
    run_analysis, get_dashboard, select_tab, edit_cost, set_region, set_industry,
    set_analysis_period, toggle_store_type, reset_dashboard,
};
// Re-export models (avoiding settings module conflict)
pub use models::response::*;
pub use models::settings::{AppConfig, SettingsUpdate};
pub use models::{
    AnalysisPeriod, AnalysisResult, AnalysisResultSet, CostBreakdown, CostField,
    FilterSelection, Industry, StoreType,
};
pub use services::analysis::{AnalysisError, AnalysisService, ANALYSIS_FAILED_MESSAGE};
pub use services::dashboard::{DashboardSnapshot, DashboardState, DashboardView};
pub use state::AppState;
pub use utils::error::{AppError, AppResult};
