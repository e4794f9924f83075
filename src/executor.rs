//! Per-test execution
//!
//! A test moves from `PENDING` to exactly one of `SKIPPED`, `SUCCEEDED` or
//! `FAILED`. The REST path resolves placeholders, issues the request, checks
//! the status and then hands the body to the structural comparator. Every
//! problem met along the way becomes a diagnostic on the test; nothing here
//! returns an error to the suite.

use crate::compare::compare;
use crate::config::RunnerConfig;
use crate::error::RegressError;
use crate::logging::{log_debug, log_info, log_warn};
use crate::model::TestCase;
use crate::placeholder::PlaceholderStore;
use crate::transport::{build_url, HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use serde_json::Value;
use std::collections::BTreeMap;
use std::time::Duration;

/// Executes single tests against a transport.
pub struct Executor<'a> {
    transport: &'a dyn HttpTransport,
    config: &'a RunnerConfig,
}

impl<'a> Executor<'a> {
    pub fn new(transport: &'a dyn HttpTransport, config: &'a RunnerConfig) -> Self {
        Self { transport, config }
    }

    /// Run a REST test to a terminal status, then honour its `wait_time`.
    pub async fn run_rest(&self, test: &mut TestCase, store: &mut PlaceholderStore) {
        if !test.active {
            log_debug!(test = %test.name, "Skipping inactive test");
            test.skip();
            return;
        }

        self.execute_rest(test, store).await;

        log_info!(
            test = %test.name,
            status = %test.status,
            message_count = test.messages.len(),
            "REST test finished"
        );

        self.pause_after(test).await;
    }

    /// gRPC execution is not implemented; active tests fail explicitly.
    pub async fn run_grpc(&self, test: &mut TestCase) {
        if !test.active {
            test.skip();
            return;
        }
        log_warn!(test = %test.name, "gRPC test requested but not implemented");
        test.fail("Error: grpc test execution is not implemented");
    }

    async fn execute_rest(&self, test: &mut TestCase, store: &mut PlaceholderStore) {
        test.path = store.resolve_str(&test.path).into_owned();

        let body = match Self::request_body(test, store) {
            Ok(body) => body,
            Err(e) => return test.fail(e.diagnostic()),
        };

        let method = match test.method.parse::<HttpMethod>() {
            Ok(method) => method,
            Err(e) => return test.fail(e.diagnostic()),
        };
        test.method = method.to_string();

        let host = self.config.host_override.as_deref().unwrap_or(&test.host);
        let url = build_url(host, &test.path, &self.config.default_scheme);
        let headers: BTreeMap<String, String> = test
            .request_headers
            .iter()
            .map(|(name, value)| (name.clone(), store.resolve_str(value).into_owned()))
            .collect();

        log_info!(
            test = %test.name,
            method = %method,
            url = %url,
            "Running REST test"
        );

        let request = HttpRequest {
            method,
            url,
            headers,
            body,
            credentials: test.credentials(),
        };

        match self.transport.perform_request(request).await {
            Ok(response) => Self::check_response(test, response, store),
            Err(e) => test.append_message(e.diagnostic()),
        }

        test.finish();
    }

    /// Serialize and resolve the request body; `null` means no body.
    fn request_body(
        test: &TestCase,
        store: &PlaceholderStore,
    ) -> Result<Option<Vec<u8>>, RegressError> {
        if test.request_body.is_null() {
            return Ok(None);
        }
        let bytes = serde_json::to_vec(&test.request_body)
            .map_err(|e| RegressError::body_serialization_failed(e.to_string()))?;
        Ok(Some(store.resolve_bytes(&bytes).into_owned()))
    }

    fn check_response(test: &mut TestCase, response: HttpResponse, store: &mut PlaceholderStore) {
        test.actual_status = Some(response.status);
        test.actual_response_body = Self::parse_actual_body(&response.body);

        if response.status != test.expected_status {
            log_debug!(
                test = %test.name,
                expected = test.expected_status,
                actual = response.status,
                "Status mismatch, skipping body comparison"
            );
            test.append_message(format!(
                "Status => want: {}; got: {}",
                test.expected_status, response.status
            ));
            return;
        }

        if test.expected_response_body.is_null() {
            return;
        }

        let actual: Value = match serde_json::from_slice(&response.body) {
            Ok(actual) => actual,
            Err(_) => {
                test.append_message("Error: unable to convert response body to JSON");
                return;
            }
        };

        let diagnostics = compare(&test.expected_response_body, &actual, store);
        test.messages.extend(diagnostics);
    }

    fn parse_actual_body(body: &[u8]) -> Value {
        if body.is_empty() {
            return Value::Null;
        }
        serde_json::from_slice(body)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(body).into_owned()))
    }

    async fn pause_after(&self, test: &TestCase) {
        if test.wait_time == 0 || !self.config.honor_wait_time {
            return;
        }
        log_debug!(
            test = %test.name,
            wait_secs = test.wait_time,
            "Waiting before next test"
        );
        tokio::time::sleep(Duration::from_secs(test.wait_time)).await;
    }
}
