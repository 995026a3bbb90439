//! Environment Secrets
//!
//! The API key and proxy password come from the environment and are never
//! written to config.json.

use franchise_navigator_llm::ProviderType;

/// Generic key variable, checked before the vendor-specific one
pub const API_KEY_ENV: &str = "API_KEY";

/// Password for an authenticated proxy
pub const PROXY_PASSWORD_ENV: &str = "PROXY_PASSWORD";

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Pick the API key from a variable lookup. Blank values count as unset.
pub fn resolve_api_key_with<F>(provider: ProviderType, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    [API_KEY_ENV, provider.api_key_env()]
        .into_iter()
        .find_map(|name| lookup(name).and_then(non_empty))
}

/// API key for `provider` from the process environment.
pub fn resolve_api_key(provider: ProviderType) -> Option<String> {
    resolve_api_key_with(provider, |name| std::env::var(name).ok())
}

/// Proxy password from the process environment.
pub fn resolve_proxy_password() -> Option<String> {
    std::env::var(PROXY_PASSWORD_ENV).ok().and_then(non_empty)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_generic_key_wins() {
        let vars = lookup(&[("API_KEY", "generic"), ("GEMINI_API_KEY", "vendor")]);
        assert_eq!(
            resolve_api_key_with(ProviderType::Gemini, vars).as_deref(),
            Some("generic")
        );
    }

    #[test]
    fn test_vendor_key_fallback() {
        let vars = lookup(&[("API_KEY", "  "), ("OPENAI_API_KEY", "sk-1")]);
        assert_eq!(
            resolve_api_key_with(ProviderType::OpenAI, vars).as_deref(),
            Some("sk-1")
        );
    }

    #[test]
    fn test_other_vendor_key_ignored() {
        let vars = lookup(&[("OPENAI_API_KEY", "sk-1")]);
        assert!(resolve_api_key_with(ProviderType::Gemini, vars).is_none());
    }
}
