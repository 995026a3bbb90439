//! Franchise Navigator Core
//!
//! Foundational types shared by every crate in the Franchise Navigator
//! workspace. This crate has no dependency on HTTP clients, LLM vendors or
//! application state.
//!
//! ## Module Organization
//!
//! - `error` - Core error types (`CoreError`, `CoreResult`)
//! - `proxy` - Proxy configuration data shared by HTTP-using crates

pub mod error;
pub mod proxy;

// ── Error Types ────────────────────────────────────────────────────────
pub use error::{CoreError, CoreResult};

// ── Proxy Types ────────────────────────────────────────────────────────
pub use proxy::{ProxyConfig, ProxyProtocol};
