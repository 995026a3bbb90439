//! Dashboard View
//!
//! Read-only projection of [`DashboardState`] handed to the view layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{AnalysisResult, FilterSelection, StoreType};

use super::reconciler::DashboardState;

/// Unit for competitor store counts
pub const COUNT_UNIT: &str = "개";
/// Unit for all money amounts (10,000 KRW)
pub const AMOUNT_UNIT: &str = "만원";

/// What the dashboard body shows, in precedence order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DashboardView {
    Loading,
    Error { message: String },
    /// No results yet, or no active tab
    Empty,
    Ready { result: Box<AnalysisResult> },
}

impl DashboardView {
    pub fn from_state(state: &DashboardState) -> Self {
        if state.is_loading() {
            return Self::Loading;
        }
        if let Some(message) = state.error() {
            return Self::Error {
                message: message.to_string(),
            };
        }
        match state.active_result() {
            Some(result) => Self::Ready {
                result: Box::new(result.clone()),
            },
            None => Self::Empty,
        }
    }
}

/// One result tab
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TabInfo {
    pub store_type: StoreType,
    pub label: String,
    pub active: bool,
}

/// Tabs of the working copy, in returned order.
pub fn tabs(state: &DashboardState) -> Vec<TabInfo> {
    let active = state.active_store_type();
    state
        .working_copy()
        .map(|w| {
            w.iter()
                .map(|r| TabInfo {
                    store_type: r.store_type,
                    label: r.store_type.label().to_string(),
                    active: Some(r.store_type) == active,
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Everything the view needs for one render
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSnapshot {
    pub filters: FilterSelection,
    pub view: DashboardView,
    pub tabs: Vec<TabInfo>,
    pub active_store_type: Option<StoreType>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub last_updated: Option<DateTime<Utc>>,
}

impl From<&DashboardState> for DashboardSnapshot {
    fn from(state: &DashboardState) -> Self {
        Self {
            filters: state.filters().clone(),
            view: DashboardView::from_state(state),
            tabs: tabs(state),
            active_store_type: state.active_store_type(),
            is_loading: state.is_loading(),
            error: state.error().map(str::to_string),
            last_updated: state.last_updated(),
        }
    }
}

/// Thousands-grouped amount, e.g. `1234567` -> `"1,234,567"`.
pub fn format_amount(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        out.push('-');
    }
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Amount with its unit, e.g. `"8,500만원"`.
pub fn format_amount_with_unit(value: i64) -> String {
    format!("{}{}", format_amount(value), AMOUNT_UNIT)
}
