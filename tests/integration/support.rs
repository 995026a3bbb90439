//! Stub providers and response fixtures shared by the integration tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Notify;

use franchise_navigator::{AnalysisService, AppState};
use franchise_navigator_llm::{
    GenerationRequest, LlmError, LlmProvider, LlmResponse, LlmResult, ProviderConfig,
    StopReason, UsageStats,
};

/// Provider that replies with a fixed outcome, optionally after a gate opens.
pub struct ScriptedProvider {
    outcome: LlmResult<String>,
    config: ProviderConfig,
    requests: Mutex<Vec<GenerationRequest>>,
    gate: Option<Gate>,
}

/// `started` fires when a request arrives; the reply waits for `release`.
#[derive(Clone, Default)]
pub struct Gate {
    pub started: Arc<Notify>,
    pub release: Arc<Notify>,
}

impl ScriptedProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            outcome: Ok(text.into()),
            config: ProviderConfig::default(),
            requests: Mutex::new(Vec::new()),
            gate: None,
        }
    }

    pub fn failing(err: LlmError) -> Self {
        Self {
            outcome: Err(err),
            ..Self::replying("")
        }
    }

    pub fn gated(mut self, gate: Gate) -> Self {
        self.gate = Some(gate);
        self
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmProvider for ScriptedProvider {
    fn name(&self) -> &'static str {
        "scripted"
    }

    fn model(&self) -> &str {
        "scripted-model"
    }

    async fn generate(&self, request: GenerationRequest) -> LlmResult<LlmResponse> {
        self.requests.lock().unwrap().push(request);
        if let Some(gate) = &self.gate {
            gate.started.notify_one();
            gate.release.notified().await;
        }
        self.outcome.clone().map(|text| LlmResponse {
            content: Some(text),
            stop_reason: StopReason::EndTurn,
            usage: UsageStats::default(),
            model: "scripted-model".to_string(),
        })
    }

    async fn health_check(&self) -> LlmResult<()> {
        Ok(())
    }

    fn config(&self) -> &ProviderConfig {
        &self.config
    }
}

/// A state whose analysis service talks to `provider`.
pub async fn state_with(provider: Arc<ScriptedProvider>) -> AppState {
    let state = AppState::new();
    state.set_analysis_service(AnalysisService::new(provider)).await;
    state
}

/// One well-formed result element for `store_type` (Korean label).
pub fn result_json(store_type: &str, rent: i64) -> Value {
    json!({
        "storeType": store_type,
        "summary": "대학가 인근 배달 수요가 높은 상권",
        "populationDensity": "1인 가구 밀집",
        "floatingPopulation": "주중 야간 집중",
        "industryClosureRate": 12.5,
        "newBusinessSurvivalRate": 68,
        "competitorDistribution": [
            {"brandName": "브랜드A", "count": 4, "estimatedMonthlySales": 4200},
            {"brandName": "브랜드B", "count": 2, "estimatedMonthlySales": 3800}
        ],
        "successRate": 61,
        "successContext": "주변 평균 대비 5% 높습니다.",
        "costs": {
            "franchiseFee": 1100, "deposit": 3000, "interior": 4500, "other": 400,
            "totalStartup": 9000,
            "rent": rent, "labor": 700, "utilities": 120,
            "totalMonthly": rent + 820
        },
        "sales": [
            {"period": "1월", "sales": 3100},
            {"period": "2월", "sales": 3300}
        ],
        "recommendation": "배달 중심 운영을 권장합니다."
    })
}

/// JSON array text of `elements`.
pub fn body(elements: Vec<Value>) -> String {
    Value::Array(elements).to_string()
}
