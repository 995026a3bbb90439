//! Response Validation
//!
//! Turns the raw text returned by the AI service into an
//! [`AnalysisResultSet`]. The upstream generator is untrusted: the two
//! probability fields are clamped into [0, 100] on ingestion, and any
//! structural problem becomes [`AnalysisError::MalformedResponse`].

use serde_json::Value;
use tracing::{debug, warn};

use crate::models::analysis::coerce_f64;
use crate::models::{AnalysisResult, AnalysisResultSet};

use super::error::AnalysisError;

/// Fields clamped into [0, 100] on ingestion
pub const CLAMPED_FIELDS: [&str; 2] = ["successRate", "newBusinessSurvivalRate"];

/// Fields an element must carry
const REQUIRED_FIELDS: [&str; 2] = ["storeType", "costs"];

/// Max characters of raw text quoted in logs
const PREVIEW_CHARS: usize = 300;

/// Clamp a percentage into [0, 100]; NaN becomes 0.
pub fn clamp_percentage(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

/// Strip a markdown code fence that wraps the whole text.
///
/// Fences inside the payload, e.g. within a string value, are left alone.
fn strip_code_fence(text: &str) -> Option<&str> {
    let body = text.strip_prefix("```")?.strip_suffix("```")?;
    // Skip the optional language tag line
    let content_start = body.find('\n').map_or(0, |nl| nl + 1);
    Some(body[content_start..].trim())
}

fn parse_json(raw: &str) -> Result<Value, serde_json::Error> {
    let trimmed = raw.trim();
    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(e) => match strip_code_fence(trimmed) {
            Some(inner) => serde_json::from_str(inner),
            None => Err(e),
        },
    }
}

fn preview(raw: &str) -> String {
    raw.chars().take(PREVIEW_CHARS).collect()
}

/// Clamp the probability fields of one element in place.
fn clamp_element(index: usize, element: &mut serde_json::Map<String, Value>) {
    for field in CLAMPED_FIELDS {
        let value = element.get(field).map(coerce_f64).unwrap_or(0.0);
        let clamped = clamp_percentage(value);
        if clamped != value {
            warn!(index, field, value, clamped, "clamped out-of-range percentage");
        }
        element.insert(field.to_string(), Value::from(clamped));
    }
}

/// Parse and normalize the service's raw text.
pub fn parse_and_normalize(raw: &str) -> Result<AnalysisResultSet, AnalysisError> {
    let value = parse_json(raw).map_err(|e| {
        debug!(preview = %preview(raw), "analysis response is not valid JSON");
        AnalysisError::malformed(format!("invalid JSON: {}", e))
    })?;

    let Value::Array(elements) = value else {
        return Err(AnalysisError::malformed("top-level value is not an array"));
    };

    let mut results: Vec<AnalysisResult> = Vec::with_capacity(elements.len());
    for (index, element) in elements.into_iter().enumerate() {
        let Value::Object(mut object) = element else {
            return Err(AnalysisError::malformed(format!(
                "element {} is not an object",
                index
            )));
        };

        for field in REQUIRED_FIELDS {
            if object.get(field).map_or(true, Value::is_null) {
                return Err(AnalysisError::malformed(format!(
                    "element {} is missing '{}'",
                    index, field
                )));
            }
        }

        clamp_element(index, &mut object);

        let result: AnalysisResult = serde_json::from_value(Value::Object(object))
            .map_err(|e| AnalysisError::malformed(format!("element {}: {}", index, e)))?;

        if results.iter().any(|r| r.store_type == result.store_type) {
            return Err(AnalysisError::malformed(format!(
                "duplicate storeType '{}' at element {}",
                result.store_type, index
            )));
        }
        results.push(result);
    }

    Ok(AnalysisResultSet::new(results))
}
