//! Storage Layer
//!
//! JSON config on disk; secrets from the environment.

pub mod config;
pub mod env;

pub use config::ConfigService;
pub use env::{resolve_api_key, resolve_proxy_password};
