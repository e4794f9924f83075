//! Test helper utilities for api-regress unit tests
//!
//! Reusable fixtures shared across the unit test modules.
//!
//! IMPORTANT: These helpers are test-only and should NEVER be used in production code.

#![allow(dead_code)]

use crate::config::RunnerConfig;
use crate::error::RegressResult;
use crate::model::TestCase;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};
use async_trait::async_trait;
use mockall::mock;
use serde_json::Value;
use std::time::Duration;

mock! {
    pub Transport {}

    #[async_trait]
    impl HttpTransport for Transport {
        async fn perform_request(&self, request: HttpRequest) -> RegressResult<HttpResponse>;
    }
}

/// Config with a short timeout; wait times still honoured.
pub fn create_test_config() -> RunnerConfig {
    RunnerConfig::default().with_request_timeout(Duration::from_secs(2))
}

/// Active REST test against `localhost:8080`.
pub fn create_rest_test(name: &str, method: &str, path: &str) -> TestCase {
    TestCase {
        name: name.to_string(),
        active: true,
        host: "localhost:8080".to_string(),
        path: path.to_string(),
        test_type: "rest".to_string(),
        method: method.to_string(),
        expected_status: 200,
        ..TestCase::default()
    }
}

/// Active REST GET test expecting `status` and `body`.
pub fn create_expecting_test(name: &str, path: &str, status: u16, body: Value) -> TestCase {
    let mut test = create_rest_test(name, "GET", path);
    test.expected_status = status;
    test.expected_response_body = body;
    test
}

pub fn json_response(status: u16, body: Value) -> HttpResponse {
    HttpResponse {
        status,
        body: serde_json::to_vec(&body).unwrap(),
    }
}

pub fn raw_response(status: u16, body: &str) -> HttpResponse {
    HttpResponse {
        status,
        body: body.as_bytes().to_vec(),
    }
}
