//! Application State
//!
//! Global state owned by the host process, containing all services and the
//! dashboard session.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, info_span, warn, Instrument};
use uuid::Uuid;

use franchise_navigator_llm::create_provider;

use crate::models::settings::{AppConfig, SettingsUpdate};
use crate::models::{AnalysisResultSet, HealthResponse};
use crate::services::analysis::AnalysisService;
use crate::services::dashboard::{DashboardSnapshot, DashboardState};
use crate::storage::{resolve_api_key, resolve_proxy_password, ConfigService};
use crate::utils::error::{AppError, AppResult};

/// Application state
pub struct AppState {
    /// Configuration service for app settings
    config: Arc<RwLock<Option<ConfigService>>>,
    /// Analysis service bound to the configured provider
    analysis: Arc<RwLock<Option<Arc<AnalysisService>>>>,
    /// Dashboard session
    dashboard: Arc<RwLock<DashboardState>>,
    /// Whether the state has been initialized
    initialized: Arc<RwLock<bool>>,
}

impl AppState {
    /// Create a new uninitialized app state
    pub fn new() -> Self {
        Self {
            config: Arc::new(RwLock::new(None)),
            analysis: Arc::new(RwLock::new(None)),
            dashboard: Arc::new(RwLock::new(DashboardState::default())),
            initialized: Arc::new(RwLock::new(false)),
        }
    }

    /// Initialize all services from ~/.franchise-navigator/config.json
    pub async fn initialize(&self) -> AppResult<()> {
        if *self.initialized.read().await {
            return Ok(());
        }
        self.initialize_with(ConfigService::new()?).await
    }

    /// Initialize all services from an already opened config
    pub async fn initialize_with(&self, config: ConfigService) -> AppResult<()> {
        let mut initialized = self.initialized.write().await;
        if *initialized {
            return Ok(());
        }

        let app_config = config.get_config_clone();

        // Initialize config
        {
            let mut config_lock = self.config.write().await;
            *config_lock = Some(config);
        }

        // Initialize dashboard filters
        {
            let mut dashboard = self.dashboard.write().await;
            dashboard.set_filters(app_config.default_filters.clone());
        }

        // Initialize analysis service
        self.rebuild_analysis_service(&app_config).await?;

        *initialized = true;
        Ok(())
    }

    /// Bind the analysis service to the provider named in `config`.
    /// A missing API key is not an error here.
    async fn rebuild_analysis_service(&self, config: &AppConfig) -> AppResult<()> {
        let api_key = resolve_api_key(config.provider);
        if api_key.is_none() {
            warn!(
                provider = %config.provider,
                "no API key in environment, analyses will fail until one is set"
            );
        }

        let provider =
            create_provider(config.to_provider_config(api_key, resolve_proxy_password()))?;
        info!(provider = provider.name(), model = provider.model(), "analysis provider ready");

        self.set_analysis_service(AnalysisService::new(provider)).await;
        Ok(())
    }

    /// Replace the analysis service
    pub async fn set_analysis_service(&self, service: AnalysisService) {
        let mut guard = self.analysis.write().await;
        *guard = Some(Arc::new(service));
    }

    async fn analysis_service(&self) -> AppResult<Arc<AnalysisService>> {
        let guard = self.analysis.read().await;
        guard
            .clone()
            .ok_or_else(|| AppError::config("Analysis service not initialized"))
    }

    // ========================================================================
    // Health
    // ========================================================================

    /// Check if config is healthy
    pub fn is_config_healthy(&self) -> bool {
        if let Ok(guard) = self.config.try_read() {
            if let Some(ref config) = *guard {
                return config.is_healthy();
            }
        }
        false
    }

    /// Whether the provider has an API key
    pub fn is_provider_configured(&self) -> bool {
        if let Ok(guard) = self.analysis.try_read() {
            if let Some(ref service) = *guard {
                return service
                    .provider()
                    .config()
                    .api_key
                    .as_deref()
                    .is_some_and(|k| !k.trim().is_empty());
            }
        }
        false
    }

    pub async fn health(&self) -> HealthResponse {
        let config = self.is_config_healthy();
        let provider = self.is_provider_configured();
        let (provider_name, model) = match &*self.analysis.read().await {
            Some(service) => (
                Some(service.provider().name().to_string()),
                Some(service.provider().model().to_string()),
            ),
            None => (None, None),
        };

        HealthResponse {
            status: if config && provider { "healthy" } else { "degraded" }.to_string(),
            config,
            provider,
            provider_name,
            model,
            ..Default::default()
        }
    }

    /// Round-trip to the provider to verify reachability and the API key
    pub async fn check_provider(&self) -> AppResult<()> {
        let service = self.analysis_service().await?;
        service.provider().health_check().await?;
        Ok(())
    }

    // ========================================================================
    // Config
    // ========================================================================

    /// Get the current configuration
    pub async fn get_config(&self) -> AppResult<AppConfig> {
        let guard = self.config.read().await;
        match &*guard {
            Some(config) => Ok(config.get_config_clone()),
            None => Err(AppError::config("Config service not initialized")),
        }
    }

    /// Update the configuration and rebind the provider
    pub async fn update_config(&self, update: SettingsUpdate) -> AppResult<AppConfig> {
        let updated = {
            let mut guard = self.config.write().await;
            match &mut *guard {
                Some(config) => config.update_config(update)?,
                None => return Err(AppError::config("Config service not initialized")),
            }
        };
        self.rebuild_analysis_service(&updated).await?;
        Ok(updated)
    }

    // ========================================================================
    // Dashboard
    // ========================================================================

    /// Run one analysis with the current filters.
    ///
    /// Rejected while another analysis is in flight. On failure the previous
    /// results stay visible and the dashboard carries the error message.
    pub async fn run_analysis(&self) -> AppResult<AnalysisResultSet> {
        let service = self.analysis_service().await?;

        let filters = {
            let mut dashboard = self.dashboard.write().await;
            if !dashboard.begin_request() {
                return Err(AppError::validation("analysis already in progress"));
            }
            dashboard.filters().clone()
        };

        let request_id = Uuid::new_v4();
        let outcome = async {
            info!(
                region = %filters.region,
                industry = %filters.industry,
                period = %filters.analysis_period,
                store_types = filters.requested_store_types().len(),
                "analysis started"
            );
            service.run_analysis(&filters).await
        }
        .instrument(info_span!("analysis", %request_id))
        .await;

        let mut dashboard = self.dashboard.write().await;
        match outcome {
            Ok(results) => {
                dashboard.apply_results(results.clone());
                Ok(results)
            }
            Err(e) => {
                dashboard.fail_request(&e);
                Err(e.into())
            }
        }
    }

    /// Current dashboard projection
    pub async fn snapshot(&self) -> DashboardSnapshot {
        DashboardSnapshot::from(&*self.dashboard.read().await)
    }

    /// Read access to the dashboard state
    pub async fn with_dashboard<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&DashboardState) -> T,
    {
        let guard = self.dashboard.read().await;
        f(&guard)
    }

    /// Apply one transition to the dashboard state
    pub async fn with_dashboard_mut<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&mut DashboardState) -> T,
    {
        let mut guard = self.dashboard.write().await;
        f(&mut guard)
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("initialized", &self.initialized)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CostField, StoreType};
    use crate::services::analysis::service::test_support::StubProvider;
    use crate::services::analysis::ANALYSIS_FAILED_MESSAGE;
    use crate::services::dashboard::DashboardView;
    use franchise_navigator_llm::LlmError;
    use serde_json::json;

    fn body(types: &[&str]) -> String {
        let entries: Vec<_> = types
            .iter()
            .map(|t| {
                json!({
                    "storeType": t,
                    "successRate": 50,
                    "newBusinessSurvivalRate": 50,
                    "costs": {"franchiseFee": 1, "deposit": 1, "interior": 1, "other": 1,
                              "totalStartup": 4, "rent": 1, "labor": 1, "utilities": 1,
                              "totalMonthly": 3}
                })
            })
            .collect();
        serde_json::Value::Array(entries).to_string()
    }

    async fn state_with(stub: StubProvider) -> AppState {
        let state = AppState::new();
        state.set_analysis_service(AnalysisService::new(Arc::new(stub))).await;
        state
    }

    #[tokio::test]
    async fn test_run_analysis_updates_dashboard() {
        let state = state_with(StubProvider::replying(body(&["배달전문", "일반점포"]))).await;
        state
            .with_dashboard_mut(|d| d.toggle_store_type(StoreType::Delivery))
            .await;

        let results = state.run_analysis().await.unwrap();
        assert_eq!(results.len(), 2);

        let snapshot = state.snapshot().await;
        assert!(!snapshot.is_loading);
        assert!(snapshot.error.is_none());
        assert_eq!(snapshot.active_store_type, Some(StoreType::Delivery));
        assert_eq!(snapshot.tabs.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_analysis_sets_static_error() {
        let state = state_with(StubProvider::failing(LlmError::NetworkError {
            message: "dns failure".to_string(),
        }))
        .await;

        let err = state.run_analysis().await.unwrap_err();
        assert_eq!(err.user_message(), ANALYSIS_FAILED_MESSAGE);

        let snapshot = state.snapshot().await;
        assert_eq!(
            snapshot.view,
            DashboardView::Error {
                message: ANALYSIS_FAILED_MESSAGE.to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_run_rejected_while_loading() {
        let state = state_with(StubProvider::replying(body(&["일반점포"]))).await;
        state.with_dashboard_mut(|d| d.begin_request()).await;

        let err = state.run_analysis().await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        // The in-flight request is untouched
        assert!(state.with_dashboard(|d| d.is_loading()).await);
    }

    #[tokio::test]
    async fn test_run_without_service_fails_cleanly() {
        let state = AppState::new();
        assert!(matches!(
            state.run_analysis().await,
            Err(AppError::Config(_))
        ));
        assert!(!state.with_dashboard(|d| d.is_loading()).await);
    }

    #[tokio::test]
    async fn test_edit_after_analysis() {
        let state = state_with(StubProvider::replying(body(&["일반점포"]))).await;
        state.run_analysis().await.unwrap();

        let applied = state
            .with_dashboard_mut(|d| d.edit_cost(CostField::Interior, "41"))
            .await;
        assert!(applied);
        let total = state
            .with_dashboard(|d| d.active_result().map(|r| r.costs.total_startup))
            .await;
        assert_eq!(total, Some(44));
    }

    #[tokio::test]
    async fn test_initialize_with_temp_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let config = ConfigService::open(temp_dir.path().join("config.json")).unwrap();

        let state = AppState::new();
        state.initialize_with(config).await.unwrap();

        assert!(state.is_config_healthy());
        let health = state.health().await;
        assert!(health.config);
        assert_eq!(health.provider_name.as_deref(), Some("gemini"));
        assert_eq!(health.model.as_deref(), Some("gemini-2.5-flash"));

        let updated = state
            .update_config(SettingsUpdate {
                model: Some("gemini-2.5-pro".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.model, "gemini-2.5-pro");
        assert_eq!(state.health().await.model.as_deref(), Some("gemini-2.5-pro"));
    }
}
