//! Analysis Errors
//!
//! Every failure of an analysis run collapses to one static message for the
//! view. The variants only exist so logs can tell them apart.

use thiserror::Error;

/// Message shown to the user for any failed analysis
pub const ANALYSIS_FAILED_MESSAGE: &str =
    "AI 분석 데이터를 가져오는 데 실패했습니다. API 키 또는 요청을 확인해주세요.";

/// Errors from an analysis run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// The outbound call failed at the network or service level.
    /// The underlying error is logged, never carried.
    #[error("{}", ANALYSIS_FAILED_MESSAGE)]
    Fetch,

    /// The service answered, but not with a usable result array
    #[error("malformed analysis response: {reason}")]
    MalformedResponse { reason: String },

    /// The filters cannot produce a request
    #[error("invalid filters: {0}")]
    InvalidFilters(String),
}

impl AnalysisError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedResponse {
            reason: reason.into(),
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch)
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedResponse { .. })
    }

    /// Static, non-technical message for the view.
    pub fn user_message(&self) -> &'static str {
        ANALYSIS_FAILED_MESSAGE
    }
}
