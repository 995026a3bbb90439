//! Dashboard Reconciliation Integration Tests
//!
//! Tab selection across successive result sets and cost edits on the
//! working copy.

use std::sync::Arc;

use franchise_navigator::{
    edit_cost, run_analysis, select_tab, toggle_store_type, CostField, StoreType,
};

use super::support::{body, result_json, state_with, ScriptedProvider};

async fn replace_provider(state: &franchise_navigator::AppState, text: String) {
    state
        .set_analysis_service(franchise_navigator::AnalysisService::new(Arc::new(
            ScriptedProvider::replying(text),
        )))
        .await;
}

#[tokio::test]
async fn test_stale_tab_moves_to_first_entry() {
    let state = state_with(Arc::new(ScriptedProvider::replying(body(vec![result_json(
        "테이크아웃",
        200,
    )]))))
    .await;
    toggle_store_type(&state, StoreType::Takeout).await;
    toggle_store_type(&state, StoreType::Delivery).await;
    assert!(run_analysis(&state).await.success);
    assert_eq!(
        state.with_dashboard(|d| d.active_store_type()).await,
        Some(StoreType::Takeout)
    );

    replace_provider(
        &state,
        body(vec![result_json("배달전문", 250), result_json("일반점포", 300)]),
    )
    .await;
    assert!(run_analysis(&state).await.success);
    assert_eq!(
        state.with_dashboard(|d| d.active_store_type()).await,
        Some(StoreType::Delivery)
    );
}

#[tokio::test]
async fn test_selected_tab_survives_new_results() {
    let state = state_with(Arc::new(ScriptedProvider::replying(body(vec![
        result_json("배달전문", 250),
        result_json("일반점포", 300),
    ]))))
    .await;
    toggle_store_type(&state, StoreType::Delivery).await;
    assert!(run_analysis(&state).await.success);
    select_tab(&state, StoreType::Standard).await;

    replace_provider(
        &state,
        body(vec![result_json("일반점포", 310), result_json("배달전문", 260)]),
    )
    .await;
    assert!(run_analysis(&state).await.success);
    assert_eq!(
        state.with_dashboard(|d| d.active_store_type()).await,
        Some(StoreType::Standard)
    );
}

#[tokio::test]
async fn test_cost_edit_isolated_to_active_tab() {
    let state = state_with(Arc::new(ScriptedProvider::replying(body(vec![
        result_json("배달전문", 250),
        result_json("일반점포", 300),
    ]))))
    .await;
    toggle_store_type(&state, StoreType::Delivery).await;
    assert!(run_analysis(&state).await.success);

    let delivery_before = state
        .with_dashboard(|d| {
            serde_json::to_vec(&d.working_copy().unwrap().find(StoreType::Delivery).unwrap().costs)
                .unwrap()
        })
        .await;

    select_tab(&state, StoreType::Standard).await;
    edit_cost(&state, CostField::Rent, "980".to_string()).await;

    let delivery_after = state
        .with_dashboard(|d| {
            serde_json::to_vec(&d.working_copy().unwrap().find(StoreType::Delivery).unwrap().costs)
                .unwrap()
        })
        .await;
    assert_eq!(delivery_before, delivery_after);

    let standard_rent = state
        .with_dashboard(|d| d.active_result().map(|r| r.costs.rent))
        .await;
    assert_eq!(standard_rent, Some(980));
}

#[tokio::test]
async fn test_totals_follow_every_edit() {
    let state = state_with(Arc::new(ScriptedProvider::replying(body(vec![result_json(
        "일반점포",
        300,
    )]))))
    .await;
    assert!(run_analysis(&state).await.success);

    let edits = [
        (CostField::FranchiseFee, "1500"),
        (CostField::Rent, "abc"),
        (CostField::Interior, " 2750 "),
        (CostField::Labor, "812.9"),
        (CostField::Utilities, ""),
        (CostField::Other, "-40"),
        (CostField::Deposit, "5000"),
    ];
    for (field, raw) in edits {
        edit_cost(&state, field, raw.to_string()).await;
        let costs = state
            .with_dashboard(|d| d.active_result().unwrap().costs.clone())
            .await;
        assert_eq!(
            costs.total_startup,
            costs.franchise_fee + costs.deposit + costs.interior + costs.other
        );
        assert_eq!(costs.total_monthly, costs.rent + costs.labor + costs.utilities);
    }

    let costs = state
        .with_dashboard(|d| d.active_result().unwrap().costs.clone())
        .await;
    assert_eq!(costs.rent, 0);
    assert_eq!(costs.labor, 812);
    assert_eq!(costs.utilities, 0);
    assert_eq!(costs.total_startup, 1500 + 5000 + 2750 - 40);
    // The fetched set keeps the service's numbers
    let fetched_rent = state
        .with_dashboard(|d| d.current().unwrap().first().unwrap().costs.rent)
        .await;
    assert_eq!(fetched_rent, 300);
}
