//! Analysis Service
//!
//! Composes the request builder and the response validator around one
//! [`LlmProvider`] call. Exactly one outbound call per run: no retries, no
//! caching, no deduplication of identical requests.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use franchise_navigator_llm::{GenerationRequest, LlmError, LlmProvider};

use crate::models::{AnalysisResultSet, FilterSelection};

use super::error::AnalysisError;
use super::prompt::{build_prompt, SYSTEM_PROMPT};
use super::schema::{response_schema, SCHEMA_NAME};
use super::validator::parse_and_normalize;

/// Runs analyses against one AI provider
pub struct AnalysisService {
    provider: Arc<dyn LlmProvider>,
}

impl AnalysisService {
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &Arc<dyn LlmProvider> {
        &self.provider
    }

    /// Prompt plus output schema for `filters`. Empty store types target
    /// the standard store.
    pub fn build_request(
        &self,
        filters: &FilterSelection,
    ) -> Result<GenerationRequest, AnalysisError> {
        filters.validate().map_err(AnalysisError::InvalidFilters)?;

        let store_types = filters.requested_store_types();
        let prompt = build_prompt(filters, &store_types);
        Ok(
            GenerationRequest::structured(prompt, SCHEMA_NAME, response_schema(&store_types))
                .with_system(SYSTEM_PROMPT),
        )
    }

    /// Build the request for `filters`, issue it, and return the raw text.
    pub async fn build_and_send(&self, filters: &FilterSelection) -> Result<String, AnalysisError> {
        let request = self.build_request(filters)?;
        debug!(
            provider = self.provider.name(),
            model = self.provider.model(),
            prompt_chars = request.prompt.chars().count(),
            "sending analysis request"
        );

        let response = self.provider.generate(request).await.map_err(|e| {
            error!(provider = self.provider.name(), error = %e, "analysis request failed");
            AnalysisError::Fetch
        })?;

        match response.text() {
            Ok(text) => Ok(text.to_string()),
            Err(LlmError::ParseError { message }) => Err(AnalysisError::malformed(message)),
            Err(e) => {
                error!(error = %e, "analysis response unreadable");
                Err(AnalysisError::Fetch)
            }
        }
    }

    /// Request, validate and normalize one analysis.
    pub async fn run_analysis(
        &self,
        filters: &FilterSelection,
    ) -> Result<AnalysisResultSet, AnalysisError> {
        let requested = filters.requested_store_types();
        let raw = self.build_and_send(filters).await?;

        let results = parse_and_normalize(&raw).inspect_err(|e| {
            warn!(error = %e, "analysis response rejected");
        })?;

        if let Some(unexpected) = results
            .iter()
            .map(|r| r.store_type)
            .find(|st| !requested.contains(st))
        {
            let err = AnalysisError::malformed(format!(
                "storeType '{}' was not requested",
                unexpected
            ));
            warn!(error = %err, "analysis response rejected");
            return Err(err);
        }

        info!(
            results = results.len(),
            requested = requested.len(),
            "analysis completed"
        );
        Ok(results)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use franchise_navigator_llm::{
        LlmResponse, LlmResult, ProviderConfig, StopReason, UsageStats,
    };

    use super::*;

    /// Provider that replays one canned outcome and records every request.
    pub struct StubProvider {
        outcome: LlmResult<Option<String>>,
        config: ProviderConfig,
        pub requests: Mutex<Vec<GenerationRequest>>,
    }

    impl StubProvider {
        pub fn replying(text: impl Into<String>) -> Self {
            Self::with_outcome(Ok(Some(text.into())))
        }

        pub fn failing(err: LlmError) -> Self {
            Self::with_outcome(Err(err))
        }

        pub fn with_outcome(outcome: LlmResult<Option<String>>) -> Self {
            Self {
                outcome,
                config: ProviderConfig::default(),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn call_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl LlmProvider for StubProvider {
        fn name(&self) -> &'static str {
            "stub"
        }

        fn model(&self) -> &str {
            "stub-model"
        }

        async fn generate(&self, request: GenerationRequest) -> LlmResult<LlmResponse> {
            self.requests.lock().unwrap().push(request);
            self.outcome.clone().map(|content| LlmResponse {
                content,
                stop_reason: StopReason::EndTurn,
                usage: UsageStats::default(),
                model: "stub-model".to_string(),
            })
        }

        async fn health_check(&self) -> LlmResult<()> {
            Ok(())
        }

        fn config(&self) -> &ProviderConfig {
            &self.config
        }
    }
}
