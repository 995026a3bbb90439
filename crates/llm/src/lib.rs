//! Franchise Navigator LLM
//!
//! A narrow port over generative-AI completion services that can return JSON
//! constrained by a response schema:
//! - Google Gemini (native `responseSchema`)
//! - OpenAI-compatible chat completions (`response_format: json_schema`)
//!
//! Also includes the HTTP client factory and the provider factory.

pub mod gemini;
pub mod http_client;
pub mod openai;
pub mod provider;
pub mod schema;
pub mod types;

// Re-export main types
pub use gemini::GeminiProvider;
pub use http_client::build_http_client;
pub use openai::OpenAIProvider;
pub use provider::{create_provider, LlmProvider};
pub use schema::{ResponseSchema, SchemaType};
pub use types::*;
