//! Dashboard State
//!
//! Explicit state container for one dashboard session. All mutation goes
//! through the transition methods below; there is no other writer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::analysis::parse_cost_input;
use crate::models::{
    AnalysisPeriod, AnalysisResult, AnalysisResultSet, CostField, FilterSelection, Industry,
    StoreType,
};
use crate::services::analysis::AnalysisError;

/// Results visible before a request started, restored if it fails.
#[derive(Debug, Clone, Default)]
struct Rollback {
    current: Option<AnalysisResultSet>,
    working_copy: Option<AnalysisResultSet>,
}

/// Dashboard session state
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    /// Filters the next request will use
    filters: FilterSelection,
    /// Result set as returned by the last successful request
    current: Option<AnalysisResultSet>,
    /// User-editable duplicate of `current`
    working_copy: Option<AnalysisResultSet>,
    active_store_type: Option<StoreType>,
    is_loading: bool,
    /// User-facing message of the last failed request
    error: Option<String>,
    last_updated: Option<DateTime<Utc>>,
    #[serde(skip)]
    rollback: Option<Rollback>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(FilterSelection::default())
    }
}

impl DashboardState {
    pub fn new(filters: FilterSelection) -> Self {
        Self {
            filters,
            current: None,
            working_copy: None,
            active_store_type: None,
            is_loading: false,
            error: None,
            last_updated: None,
            rollback: None,
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    pub fn filters(&self) -> &FilterSelection {
        &self.filters
    }

    pub fn current(&self) -> Option<&AnalysisResultSet> {
        self.current.as_ref()
    }

    pub fn working_copy(&self) -> Option<&AnalysisResultSet> {
        self.working_copy.as_ref()
    }

    pub fn active_store_type(&self) -> Option<StoreType> {
        self.active_store_type
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn last_updated(&self) -> Option<DateTime<Utc>> {
        self.last_updated
    }

    /// Working-copy entry of the active tab.
    pub fn active_result(&self) -> Option<&AnalysisResult> {
        let active = self.active_store_type?;
        self.working_copy.as_ref()?.find(active)
    }

    // ========================================================================
    // Request lifecycle
    // ========================================================================

    /// Start a request: clear results and error, set the loading flag.
    /// Returns false, changing nothing, if a request is already in flight.
    /// The active tab is kept until results arrive.
    pub fn begin_request(&mut self) -> bool {
        if self.is_loading {
            return false;
        }
        self.rollback = Some(Rollback {
            current: self.current.take(),
            working_copy: self.working_copy.take(),
        });
        self.error = None;
        self.is_loading = true;
        true
    }

    /// Install a new result set, replacing any prior one and discarding edits.
    pub fn apply_results(&mut self, results: AnalysisResultSet) {
        self.working_copy = Some(results.clone());
        self.current = Some(results);
        self.reconcile_active_tab();
        self.is_loading = false;
        self.error = None;
        self.rollback = None;
        self.last_updated = Some(Utc::now());
    }

    /// Abort the in-flight request: restore the pre-request results and
    /// record the user-facing message.
    pub fn fail_request(&mut self, error: &AnalysisError) {
        if let Some(rollback) = self.rollback.take() {
            self.current = rollback.current;
            self.working_copy = rollback.working_copy;
        }
        self.error = Some(error.user_message().to_string());
        self.is_loading = false;
    }

    /// Keep the active tab if the working copy still has it, otherwise fall
    /// back to the first entry (or none when empty).
    fn reconcile_active_tab(&mut self) {
        let Some(working) = self.working_copy.as_ref() else {
            self.active_store_type = None;
            return;
        };
        let keep = self
            .active_store_type
            .is_some_and(|active| working.contains(active));
        if !keep {
            self.active_store_type = working.first().map(|r| r.store_type);
        }
    }

    // ========================================================================
    // User edits
    // ========================================================================

    /// Activate the tab for `store_type`. Ignored unless the working copy
    /// contains it.
    pub fn select_tab(&mut self, store_type: StoreType) -> bool {
        let present = self
            .working_copy
            .as_ref()
            .is_some_and(|w| w.contains(store_type));
        if present {
            self.active_store_type = Some(store_type);
        }
        present
    }

    /// Edit one cost line of the active tab from raw input. Non-numeric
    /// input counts as 0. Returns false when there is no active entry.
    pub fn edit_cost(&mut self, field: CostField, raw: &str) -> bool {
        self.edit_cost_value(field, parse_cost_input(raw))
    }

    /// Edit one cost line of the active tab and recompute both totals.
    pub fn edit_cost_value(&mut self, field: CostField, value: i64) -> bool {
        let Some(active) = self.active_store_type else {
            return false;
        };
        let Some(entry) = self.working_copy.as_mut().and_then(|w| w.find_mut(active)) else {
            return false;
        };
        entry.costs.set(field, value);
        debug!(
            store_type = %active,
            field = field.label(),
            value,
            total_startup = entry.costs.total_startup,
            total_monthly = entry.costs.total_monthly,
            "cost edited"
        );
        true
    }

    pub fn set_region(&mut self, region: impl Into<String>) {
        self.filters.region = region.into();
    }

    pub fn set_industry(&mut self, industry: Industry) {
        self.filters.industry = industry;
    }

    pub fn set_period(&mut self, period: AnalysisPeriod) {
        self.filters.analysis_period = period;
    }

    pub fn toggle_store_type(&mut self, store_type: StoreType) {
        self.filters.toggle_store_type(store_type);
    }

    pub fn set_filters(&mut self, filters: FilterSelection) {
        self.filters = filters;
    }

    /// Drop results, tab and error. Filters are kept. Ignored while loading.
    pub fn reset(&mut self) -> bool {
        if self.is_loading {
            return false;
        }
        *self = Self::new(self.filters.clone());
        true
    }
}
