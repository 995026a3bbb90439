//! OpenAI Provider
//!
//! Implementation of the LlmProvider trait for OpenAI-compatible chat
//! completion endpoints using `response_format: json_schema`.
//!
//! Structured outputs must have an object at the root, so array schemas are
//! wrapped in `{ "result": [...] }` on the way out and unwrapped on the way
//! back. Callers always see the shape they asked for.

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::provider::{missing_api_key_error, parse_http_error, LlmProvider};
use super::schema::{ResponseSchema, SchemaType};
use super::types::{
    GenerationRequest, LlmError, LlmResponse, LlmResult, ProviderConfig, StopReason, UsageStats,
};
use crate::http_client::build_http_client;

/// Default OpenAI API endpoint
const OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";

/// Property used to wrap non-object root schemas
const WRAPPER_KEY: &str = "result";

/// OpenAI provider
pub struct OpenAIProvider {
    config: ProviderConfig,
    client: reqwest::Client,
}

impl OpenAIProvider {
    /// Create a new OpenAI provider with the given configuration
    pub fn new(config: ProviderConfig) -> LlmResult<Self> {
        let client = build_http_client(config.proxy.as_ref())?;
        Ok(Self { config, client })
    }

    /// Get the API base URL
    fn base_url(&self) -> &str {
        self.config.base_url.as_deref().unwrap_or(OPENAI_API_URL)
    }

    /// Models endpoint derived from the completions URL
    fn models_url(&self) -> String {
        let base = self.base_url();
        match base.strip_suffix("/chat/completions") {
            Some(root) => format!("{}/models", root),
            None => "https://api.openai.com/v1/models".to_string(),
        }
    }

    fn api_key(&self) -> LlmResult<&str> {
        self.config
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| missing_api_key_error("openai"))
    }

    /// Whether the root schema has to be wrapped in an object
    fn needs_wrapper(schema: &ResponseSchema) -> bool {
        schema.schema_type != SchemaType::Object
    }

    /// Build the request body for the API
    fn build_request_body(&self, request: &GenerationRequest) -> serde_json::Value {
        let mut messages = Vec::new();
        if let Some(sys) = &request.system {
            messages.push(serde_json::json!({
                "role": "system",
                "content": sys
            }));
        }
        messages.push(serde_json::json!({
            "role": "user",
            "content": request.prompt
        }));

        let mut body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature,
            "messages": messages,
        });

        if let Some(schema) = &request.schema {
            let root = if Self::needs_wrapper(schema) {
                ResponseSchema::object(None, vec![(WRAPPER_KEY, schema.clone())], &[WRAPPER_KEY])
            } else {
                schema.clone()
            };
            body["response_format"] = serde_json::json!({
                "type": "json_schema",
                "json_schema": {
                    "name": request.schema_name,
                    "schema": root.to_json_schema(),
                }
            });
        }

        body
    }

    /// Strip the wrapper object added by `build_request_body`.
    fn unwrap_content(content: String) -> String {
        match serde_json::from_str::<serde_json::Value>(&content) {
            Ok(serde_json::Value::Object(mut map)) if map.contains_key(WRAPPER_KEY) => map
                .remove(WRAPPER_KEY)
                .map(|inner| inner.to_string())
                .unwrap_or(content),
            _ => {
                warn!("openai: structured response was not wrapped, passing through");
                content
            }
        }
    }

    /// Parse a response from OpenAI API
    fn parse_response(&self, response: OpenAIResponse, wrapped: bool) -> LlmResponse {
        let choice = response.choices.into_iter().next();

        let stop_reason = choice
            .as_ref()
            .and_then(|c| c.finish_reason.as_deref())
            .map(StopReason::from)
            .unwrap_or(StopReason::EndTurn);

        let content = choice
            .and_then(|c| c.message)
            .and_then(|m| m.content)
            .map(|text| if wrapped { Self::unwrap_content(text) } else { text });

        let usage = response
            .usage
            .map(|u| UsageStats {
                input_tokens: u.prompt_tokens,
                output_tokens: u.completion_tokens,
            })
            .unwrap_or_default();

        LlmResponse {
            content,
            stop_reason,
            usage,
            model: response.model,
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAIProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    fn model(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, request: GenerationRequest) -> LlmResult<LlmResponse> {
        let api_key = self.api_key()?;
        let body = self.build_request_body(&request);
        let wrapped = request.schema.as_ref().is_some_and(Self::needs_wrapper);

        let response = self
            .client
            .post(self.base_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        let body_text = response.text().await.map_err(|e| LlmError::NetworkError {
            message: e.to_string(),
        })?;

        if status != 200 {
            return Err(parse_http_error(status, &body_text, "openai"));
        }

        let openai_response: OpenAIResponse =
            serde_json::from_str(&body_text).map_err(|e| LlmError::ParseError {
                message: format!("Failed to parse response: {}", e),
            })?;

        let parsed = self.parse_response(openai_response, wrapped);
        debug!(
            model = %parsed.model,
            total_tokens = parsed.usage.total_tokens(),
            "openai: chat completion finished"
        );
        Ok(parsed)
    }

    async fn health_check(&self) -> LlmResult<()> {
        let api_key = self.api_key()?;

        let response = self
            .client
            .get(self.models_url())
            .header("Authorization", format!("Bearer {}", api_key))
            .send()
            .await
            .map_err(|e| LlmError::NetworkError {
                message: e.to_string(),
            })?;

        let status = response.status().as_u16();
        if status == 200 {
            Ok(())
        } else {
            let body = response.text().await.unwrap_or_default();
            Err(parse_http_error(status, &body, "openai"))
        }
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// OpenAI API response format
#[derive(Debug, Deserialize)]
struct OpenAIResponse {
    model: String,
    #[serde(default)]
    choices: Vec<Choice>,
    usage: Option<ResponseUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ResponseUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}
