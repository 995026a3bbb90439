//! Analysis Commands
//!
//! Entry points the dashboard view calls: run an analysis, switch tabs,
//! edit costs and filters. State transitions return the fresh snapshot.

use crate::models::response::CommandResponse;
use crate::models::{AnalysisPeriod, AnalysisResultSet, CostField, Industry, StoreType};
use crate::services::dashboard::DashboardSnapshot;
use crate::state::AppState;

/// Run one analysis with the current filters
pub async fn run_analysis(state: &AppState) -> CommandResponse<AnalysisResultSet> {
    state.run_analysis().await.into()
}

/// Current dashboard projection
pub async fn get_dashboard(state: &AppState) -> CommandResponse<DashboardSnapshot> {
    CommandResponse::ok(state.snapshot().await)
}

/// Activate the tab for `store_type`
pub async fn select_tab(state: &AppState, store_type: StoreType) -> CommandResponse<DashboardSnapshot> {
    state.with_dashboard_mut(|d| d.select_tab(store_type)).await;
    CommandResponse::ok(state.snapshot().await)
}

/// Edit one cost line of the active tab; `value` is raw user input
pub async fn edit_cost(
    state: &AppState,
    field: CostField,
    value: String,
) -> CommandResponse<DashboardSnapshot> {
    state.with_dashboard_mut(|d| d.edit_cost(field, &value)).await;
    CommandResponse::ok(state.snapshot().await)
}

pub async fn set_region(state: &AppState, region: String) -> CommandResponse<DashboardSnapshot> {
    state.with_dashboard_mut(|d| d.set_region(region)).await;
    CommandResponse::ok(state.snapshot().await)
}

pub async fn set_industry(state: &AppState, industry: Industry) -> CommandResponse<DashboardSnapshot> {
    state.with_dashboard_mut(|d| d.set_industry(industry)).await;
    CommandResponse::ok(state.snapshot().await)
}

pub async fn set_analysis_period(
    state: &AppState,
    period: AnalysisPeriod,
) -> CommandResponse<DashboardSnapshot> {
    state.with_dashboard_mut(|d| d.set_period(period)).await;
    CommandResponse::ok(state.snapshot().await)
}

pub async fn toggle_store_type(
    state: &AppState,
    store_type: StoreType,
) -> CommandResponse<DashboardSnapshot> {
    state.with_dashboard_mut(|d| d.toggle_store_type(store_type)).await;
    CommandResponse::ok(state.snapshot().await)
}

/// Clear results and error; filters are kept
pub async fn reset_dashboard(state: &AppState) -> CommandResponse<DashboardSnapshot> {
    if state.with_dashboard_mut(|d| d.reset()).await {
        CommandResponse::ok(state.snapshot().await)
    } else {
        CommandResponse::err("analysis in progress")
    }
}
