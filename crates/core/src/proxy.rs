//! Proxy Configuration Types
//!
//! Proxy settings for the outbound AI-service client. The reqwest client
//! factory that consumes them lives in `franchise-navigator-llm`.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

/// Proxy protocol type
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProxyProtocol {
    Http,
    Https,
    Socks5,
}

impl ProxyProtocol {
    /// URL scheme for this protocol.
    pub fn scheme(&self) -> &'static str {
        match self {
            ProxyProtocol::Http => "http",
            ProxyProtocol::Https => "https",
            ProxyProtocol::Socks5 => "socks5",
        }
    }

    fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme.to_ascii_lowercase().as_str() {
            "http" => Some(ProxyProtocol::Http),
            "https" => Some(ProxyProtocol::Https),
            "socks5" | "socks5h" => Some(ProxyProtocol::Socks5),
            _ => None,
        }
    }
}

/// Proxy used for calls to the AI completion service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProxyConfig {
    pub protocol: ProxyProtocol,
    pub host: String,
    pub port: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    /// Never written to the config file; supplied from the environment.
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
}

impl ProxyConfig {
    /// Proxy URL without credentials.
    pub fn url(&self) -> String {
        format!("{}://{}:{}", self.protocol.scheme(), self.host, self.port)
    }

    /// Parse `scheme://[user@]host:port`.
    pub fn parse(raw: &str) -> CoreResult<Self> {
        let (scheme, rest) = raw
            .split_once("://")
            .ok_or_else(|| CoreError::parse(format!("proxy URL has no scheme: {}", raw)))?;
        let protocol = ProxyProtocol::from_scheme(scheme)
            .ok_or_else(|| CoreError::parse(format!("unsupported proxy scheme: {}", scheme)))?;

        let rest = rest.trim_end_matches('/');
        let (username, authority) = match rest.rsplit_once('@') {
            Some((user, authority)) => (Some(user.to_string()), authority),
            None => (None, rest),
        };
        let (host, port) = authority
            .rsplit_once(':')
            .ok_or_else(|| CoreError::parse(format!("proxy URL has no port: {}", raw)))?;
        let port: u16 = port
            .parse()
            .map_err(|_| CoreError::parse(format!("invalid proxy port: {}", port)))?;

        let config = Self {
            protocol,
            host: host.to_string(),
            port,
            username,
            password: None,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations reqwest could never connect through.
    pub fn validate(&self) -> CoreResult<()> {
        if self.host.trim().is_empty() {
            return Err(CoreError::validation("proxy host must not be empty"));
        }
        if self.port == 0 {
            return Err(CoreError::validation("proxy port must be non-zero"));
        }
        Ok(())
    }
}
