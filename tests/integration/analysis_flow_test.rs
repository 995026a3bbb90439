//! Run-Analysis Flow Integration Tests
//!
//! Filters -> request -> stub provider -> validation -> dashboard state.

use std::sync::Arc;

use franchise_navigator::services::analysis::SCHEMA_NAME;
use franchise_navigator::{
    edit_cost, get_dashboard, run_analysis, toggle_store_type, AppError, CostField,
    DashboardView, StoreType, ANALYSIS_FAILED_MESSAGE,
};
use franchise_navigator_llm::{LlmError, SchemaType};

use super::support::{body, result_json, state_with, ScriptedProvider};

// ============================================================================
// Success path
// ============================================================================

#[tokio::test]
async fn test_delivery_and_standard_scenario() {
    let provider = Arc::new(ScriptedProvider::replying(body(vec![
        result_json("배달전문", 250),
        result_json("일반점포", 400),
    ])));
    let state = state_with(provider.clone()).await;
    toggle_store_type(&state, StoreType::Delivery).await;

    let response = run_analysis(&state).await;
    assert!(response.success);

    let snapshot = get_dashboard(&state).await.data.unwrap();
    assert_eq!(snapshot.tabs.len(), 2);
    assert_eq!(snapshot.active_store_type, Some(StoreType::Delivery));
    assert!(!snapshot.is_loading);
    assert!(snapshot.error.is_none());

    // One outbound call, carrying the schema for both store types
    let requests = provider.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.schema_name, SCHEMA_NAME);
    let schema = request.schema.as_ref().unwrap();
    assert_eq!(schema.schema_type, SchemaType::Array);
    let store_type = schema.items.as_ref().unwrap().property("storeType").unwrap();
    assert_eq!(
        store_type.enum_values.as_deref().unwrap(),
        &["일반점포".to_string(), "배달전문".to_string()]
    );
    assert!(request.prompt.contains("서울시 강남구 역삼동"));
    assert!(request.prompt.contains("치킨"));
    assert!(request.prompt.contains("월간"));
}

#[tokio::test]
async fn test_success_rate_is_clamped() {
    let mut element = result_json("일반점포", 300);
    element["successRate"] = serde_json::json!(130);
    let provider = Arc::new(ScriptedProvider::replying(body(vec![element])));
    let state = state_with(provider).await;

    let results = run_analysis(&state).await.data.unwrap();
    assert_eq!(results.first().unwrap().success_rate, 100.0);
}

#[tokio::test]
async fn test_empty_store_types_request_standard() {
    let empty = Arc::new(ScriptedProvider::replying(body(vec![result_json("일반점포", 300)])));
    let state = state_with(empty.clone()).await;
    // Default selection is [STANDARD]; toggling it off leaves it empty
    toggle_store_type(&state, StoreType::Standard).await;
    assert!(run_analysis(&state).await.success);

    let standard = Arc::new(ScriptedProvider::replying(body(vec![result_json("일반점포", 300)])));
    let state = state_with(standard.clone()).await;
    assert!(run_analysis(&state).await.success);

    let a = &empty.requests()[0];
    let b = &standard.requests()[0];
    assert_eq!(a.prompt, b.prompt);
    assert_eq!(a.schema, b.schema);
}

// ============================================================================
// Failure paths
// ============================================================================

#[tokio::test]
async fn test_invalid_text_leaves_results_unset() {
    let provider = Arc::new(ScriptedProvider::replying("분석 결과: 매우 좋음"));
    let state = state_with(provider).await;

    let err = state.run_analysis().await.unwrap_err();
    match err {
        AppError::Analysis(e) => assert!(e.is_malformed()),
        other => panic!("expected analysis error, got {:?}", other),
    }

    let snapshot = get_dashboard(&state).await.data.unwrap();
    assert!(!snapshot.is_loading);
    assert_eq!(snapshot.error.as_deref(), Some(ANALYSIS_FAILED_MESSAGE));
    assert!(snapshot.tabs.is_empty());
    assert!(state.with_dashboard(|d| d.current().is_none()).await);
}

#[tokio::test]
async fn test_transport_error_text_never_reaches_view() {
    let provider = Arc::new(ScriptedProvider::failing(LlmError::AuthenticationFailed {
        message: "API key not valid. Please pass a valid API key.".to_string(),
    }));
    let state = state_with(provider).await;

    let response = run_analysis(&state).await;
    assert!(!response.success);
    assert_eq!(response.error.as_deref(), Some(ANALYSIS_FAILED_MESSAGE));

    let snapshot = get_dashboard(&state).await.data.unwrap();
    assert_eq!(
        snapshot.view,
        DashboardView::Error {
            message: ANALYSIS_FAILED_MESSAGE.to_string()
        }
    );
}

#[tokio::test]
async fn test_failure_keeps_previous_results_and_edits() {
    let provider = Arc::new(ScriptedProvider::replying(body(vec![result_json("일반점포", 300)])));
    let state = state_with(provider).await;
    assert!(run_analysis(&state).await.success);
    edit_cost(&state, CostField::Rent, "555".to_string()).await;

    state
        .set_analysis_service(franchise_navigator::AnalysisService::new(Arc::new(
            ScriptedProvider::replying("{\"not\": \"an array\"}"),
        )))
        .await;
    assert!(!run_analysis(&state).await.success);

    let rent = state
        .with_dashboard(|d| d.active_result().map(|r| r.costs.rent))
        .await;
    assert_eq!(rent, Some(555));
}
