//! Test helper utilities for api-regress integration tests
//!
//! Shared fixtures for suites run against a `wiremock` server.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

// Allow dead code in test utilities - functions are used across different test files
#![allow(dead_code)]

use api_regress::RunnerConfig;
use serde_json::{json, Value};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;

/// Config suitable for talking to a local mock server.
pub fn create_test_config() -> RunnerConfig {
    RunnerConfig::default().with_request_timeout(Duration::from_secs(5))
}

/// A suite entry for an active REST test against `host`.
pub fn rest_entry(name: &str, host: &str, method: &str, path: &str, status: u16) -> Value {
    json!({
        "name": name,
        "active": true,
        "host": host,
        "path": path,
        "test_type": "rest",
        "method": method,
        "expected_response_status": status
    })
}

/// Write `entries` as a suite file.
pub fn write_suite(entries: &[Value]) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("create suite file");
    let content = serde_json::to_vec_pretty(entries).expect("serialize suite");
    file.write_all(&content).expect("write suite file");
    file
}
