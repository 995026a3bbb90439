//! Initialization Commands
//!
//! Commands for application initialization and setup.

use serde::{Deserialize, Serialize};

use crate::models::response::CommandResponse;
use crate::services::dashboard::DashboardSnapshot;
use crate::state::AppState;

/// Result of application initialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitResult {
    /// Success message
    pub message: String,
    /// Dashboard as it opens, with the configured default filters
    pub dashboard: DashboardSnapshot,
}

/// Initialize the application on startup
pub async fn init_app(state: &AppState) -> CommandResponse<InitResult> {
    match state.initialize().await {
        Ok(()) => {
            let message = if state.is_provider_configured() {
                "Application initialized successfully".to_string()
            } else {
                "Application initialized without an API key".to_string()
            };
            CommandResponse::ok(InitResult {
                message,
                dashboard: state.snapshot().await,
            })
        }
        Err(e) => CommandResponse::err(e.to_string()),
    }
}

/// Get the application version
pub fn get_version() -> CommandResponse<String> {
    CommandResponse::ok(env!("CARGO_PKG_VERSION").to_string())
}
