//! Concurrent Submission Integration Tests

use std::sync::Arc;

use franchise_navigator::{AppError, StoreType};

use super::support::{body, result_json, state_with, Gate, ScriptedProvider};

#[tokio::test]
async fn test_second_run_rejected_while_in_flight() {
    let gate = Gate::default();
    let provider = Arc::new(
        ScriptedProvider::replying(body(vec![result_json("일반점포", 300)])).gated(gate.clone()),
    );
    let state = Arc::new(state_with(provider.clone()).await);

    let first = {
        let state = state.clone();
        tokio::spawn(async move { state.run_analysis().await })
    };
    gate.started.notified().await;

    assert!(state.with_dashboard(|d| d.is_loading()).await);
    let second = state.run_analysis().await;
    assert!(matches!(second, Err(AppError::Validation(_))));

    gate.release.notify_one();
    let results = first.await.unwrap().unwrap();
    assert!(results.contains(StoreType::Standard));

    assert!(!state.with_dashboard(|d| d.is_loading()).await);
    assert_eq!(provider.requests().len(), 1);
}
