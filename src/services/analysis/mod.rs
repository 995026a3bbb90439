//! Analysis
//!
//! Request building, the output schema, response validation and the
//! service that ties them to an AI provider.

pub mod error;
pub mod prompt;
pub mod schema;
pub mod service;
pub mod validator;

pub use error::{AnalysisError, ANALYSIS_FAILED_MESSAGE};
pub use prompt::build_prompt;
pub use schema::{analysis_result_schema, response_schema, SCHEMA_NAME};
pub use service::AnalysisService;
pub use validator::{clamp_percentage, parse_and_normalize};
