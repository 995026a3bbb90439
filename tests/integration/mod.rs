//! Integration Tests Module
//!
//! End-to-end tests for Franchise Navigator: filters flow through the
//! analysis service into the dashboard state, against stub AI providers.

// Shared stub providers and response fixtures
mod support;

// Run-analysis flow through AppState and commands
mod analysis_flow_test;

// Dashboard reconciliation: tabs, cost edits, rollback
mod dashboard_test;

// Concurrent submission guard
mod concurrency_test;
