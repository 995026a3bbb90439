//! Health Check Commands
//!
//! Commands for checking the health status of backend services.

use crate::models::response::{CommandResponse, HealthResponse};
use crate::state::AppState;

/// Get the health status of all backend services
pub async fn get_health(state: &AppState) -> CommandResponse<HealthResponse> {
    CommandResponse::ok(state.health().await)
}

/// Verify the AI service accepts the configured key
pub async fn check_provider(state: &AppState) -> CommandResponse<bool> {
    match state.check_provider().await {
        Ok(()) => CommandResponse::ok(true),
        Err(e) => CommandResponse::err(e.to_string()),
    }
}
