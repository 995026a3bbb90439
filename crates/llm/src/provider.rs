//! LLM Provider Trait
//!
//! The single port the analysis core talks to: send one prompt plus an
//! optional output schema, get raw text back.

use std::sync::Arc;

use async_trait::async_trait;

use super::gemini::GeminiProvider;
use super::openai::OpenAIProvider;
use super::types::{GenerationRequest, LlmError, LlmResponse, LlmResult, ProviderConfig, ProviderType};

/// Trait that all LLM providers must implement.
///
/// Implementations perform exactly one outbound call per `generate`; retry and
/// caching policies belong to callers, and the analysis core applies none.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Returns the provider name for identification.
    fn name(&self) -> &'static str;

    /// Returns the current model being used.
    fn model(&self) -> &str;

    /// Whether the vendor enforces the response schema server-side.
    fn supports_structured_output(&self) -> bool {
        true
    }

    /// Generate a completion for `request`.
    async fn generate(&self, request: GenerationRequest) -> LlmResult<LlmResponse>;

    /// Check that the service is reachable and the API key is accepted.
    async fn health_check(&self) -> LlmResult<()>;

    /// Get the configuration for this provider.
    fn config(&self) -> &ProviderConfig;
}

/// Build the provider named by `config.provider`.
pub fn create_provider(config: ProviderConfig) -> LlmResult<Arc<dyn LlmProvider>> {
    let provider: Arc<dyn LlmProvider> = match config.provider {
        ProviderType::Gemini => Arc::new(GeminiProvider::new(config)?),
        ProviderType::OpenAI => Arc::new(OpenAIProvider::new(config)?),
    };
    Ok(provider)
}

/// Helper function to create an error for missing API key
pub fn missing_api_key_error(provider: &str) -> LlmError {
    LlmError::AuthenticationFailed {
        message: format!("API key not configured for {}", provider),
    }
}

/// Pull `error.message` out of a vendor error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(|s| s.to_string()))
        .unwrap_or_else(|| body.to_string())
}

/// Map an HTTP error status to an `LlmError`
pub fn parse_http_error(status: u16, body: &str, provider: &str) -> LlmError {
    let message = error_message(body);
    match status {
        401 => LlmError::AuthenticationFailed {
            message: format!("{}: Invalid API key", provider),
        },
        403 => LlmError::AuthenticationFailed {
            message: format!("{}: Access denied", provider),
        },
        404 => LlmError::ModelNotFound { model: message },
        429 => LlmError::RateLimited {
            message,
            retry_after: None,
        },
        400 => LlmError::InvalidRequest { message },
        500..=599 => LlmError::ServerError {
            message,
            status: Some(status),
        },
        _ => LlmError::Other {
            message: format!("HTTP {}: {}", status, message),
        },
    }
}
