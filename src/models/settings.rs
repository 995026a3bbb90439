//! Settings Models
//!
//! Application configuration persisted in config.json.

use serde::{Deserialize, Serialize};

use franchise_navigator_core::proxy::ProxyConfig;
use franchise_navigator_llm::{ProviderConfig, ProviderType};

use super::filters::FilterSelection;

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// AI completion service
    pub provider: ProviderType,
    /// Model for the provider
    pub model: String,
    /// Endpoint override (self-hosted gateways, test servers)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Sampling temperature, 0.0 - 2.0
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Output token cap for one analysis
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Outbound proxy for the AI service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy: Option<ProxyConfig>,
    /// Filters shown when the dashboard opens
    #[serde(default)]
    pub default_filters: FilterSelection,
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    8192
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            provider: ProviderType::Gemini,
            model: ProviderType::Gemini.default_model().to_string(),
            base_url: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            proxy: None,
            default_filters: FilterSelection::default(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub provider: Option<ProviderType>,
    pub model: Option<String>,
    /// Empty string clears the override
    pub base_url: Option<String>,
    pub temperature: Option<f32>,
    pub max_tokens: Option<u32>,
    /// `scheme://[user@]host:port`; empty string removes the proxy
    pub proxy_url: Option<String>,
    pub default_filters: Option<FilterSelection>,
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) -> Result<(), String> {
        if let Some(provider) = update.provider {
            // Switching vendors without naming a model picks that vendor's default.
            if provider != self.provider && update.model.is_none() {
                self.model = provider.default_model().to_string();
            }
            self.provider = provider;
        }
        if let Some(model) = update.model {
            self.model = model;
        }
        if let Some(base_url) = update.base_url {
            self.base_url = if base_url.trim().is_empty() {
                None
            } else {
                Some(base_url.trim().to_string())
            };
        }
        if let Some(temperature) = update.temperature {
            self.temperature = temperature;
        }
        if let Some(max_tokens) = update.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(proxy_url) = update.proxy_url {
            self.proxy = if proxy_url.trim().is_empty() {
                None
            } else {
                Some(ProxyConfig::parse(proxy_url.trim()).map_err(|e| e.to_string())?)
            };
        }
        if let Some(filters) = update.default_filters {
            self.default_filters = filters;
        }
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("model must not be empty".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "Invalid temperature: {}. Must be between 0.0 and 2.0",
                self.temperature
            ));
        }

        if self.max_tokens == 0 {
            return Err("max_tokens must be greater than 0".to_string());
        }

        if let Some(url) = &self.base_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(format!("Invalid base_url: {}. Must be an http(s) URL", url));
            }
        }

        if let Some(proxy) = &self.proxy {
            proxy.validate().map_err(|e| e.to_string())?;
        }

        self.default_filters.validate()
    }

    /// Provider configuration with the given API key and proxy password.
    pub fn to_provider_config(
        &self,
        api_key: Option<String>,
        proxy_password: Option<String>,
    ) -> ProviderConfig {
        let proxy = self.proxy.clone().map(|mut p| {
            p.password = proxy_password;
            p
        });
        ProviderConfig {
            provider: self.provider,
            api_key,
            base_url: self.base_url.clone(),
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            proxy,
        }
    }
}
