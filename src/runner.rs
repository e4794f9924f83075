//! Suite runner
//!
//! Decodes a suite, then executes its tests strictly one after another in
//! declared order. Sequential execution is what makes placeholder capture work:
//! a value captured by test N is visible to test N+1 through the shared
//! [`PlaceholderStore`].

use crate::config::RunnerConfig;
use crate::error::{RegressError, RegressResult};
use crate::executor::Executor;
use crate::logging::{log_debug, log_info};
use crate::model::{Protocol, TestCase};
use crate::placeholder::PlaceholderStore;
use crate::report::RunSummary;
use crate::transport::{HttpTransport, ReqwestTransport};
use std::path::Path;

/// Owns the transport, settings and placeholder context for one run.
pub struct SuiteRunner {
    transport: Box<dyn HttpTransport>,
    config: RunnerConfig,
    store: PlaceholderStore,
}

impl SuiteRunner {
    /// Create a runner backed by [`ReqwestTransport`].
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::ConfigurationError`] if the configuration fails
    /// validation or the HTTP client cannot be built.
    pub fn new(config: RunnerConfig) -> RegressResult<Self> {
        config.validate()?;
        let transport = ReqwestTransport::new(&config)?;
        Ok(Self::with_transport(config, Box::new(transport)))
    }

    /// Create a runner over any transport.
    pub fn with_transport(config: RunnerConfig, transport: Box<dyn HttpTransport>) -> Self {
        Self {
            transport,
            config,
            store: PlaceholderStore::new(),
        }
    }

    /// Seed the run with pre-bound placeholder values.
    pub fn with_store(mut self, store: PlaceholderStore) -> Self {
        self.store = store;
        self
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    pub fn store(&self) -> &PlaceholderStore {
        &self.store
    }

    /// Read and decode a suite file.
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::SuiteLoadFailed`] if the file cannot be read and
    /// [`RegressError::SuiteDecodeFailed`] if it is not a list of tests.
    pub fn load_tests(path: &Path) -> RegressResult<Vec<TestCase>> {
        let content = std::fs::read(path).map_err(|e| {
            RegressError::suite_load_failed(path.display().to_string(), e.to_string())
        })?;
        let tests = TestCase::decode_list(&content)?;
        log_debug!(
            path = %path.display(),
            test_count = tests.len(),
            "Test suite loaded"
        );
        Ok(tests)
    }

    /// Decode `content` and run every test in it.
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::SuiteDecodeFailed`] before any test runs if the
    /// document cannot be decoded.
    pub async fn process(&mut self, content: &[u8]) -> RegressResult<(Vec<TestCase>, RunSummary)> {
        let mut tests = TestCase::decode_list(content)?;
        let summary = self.run_tests(&mut tests).await;
        Ok((tests, summary))
    }

    /// Run `tests` in order and summarise the outcome.
    pub async fn run_tests(&mut self, tests: &mut [TestCase]) -> RunSummary {
        log_info!(test_count = tests.len(), "Starting regression run");
        for test in tests.iter_mut() {
            self.run_test(test).await;
        }
        let summary = RunSummary::from_tests(tests);
        log_info!(
            total = summary.total,
            succeeded = summary.succeeded,
            failed = summary.failed,
            skipped = summary.skipped,
            "Regression run complete"
        );
        summary
    }

    /// Dispatch one test to the executor for its protocol.
    pub async fn run_test(&mut self, test: &mut TestCase) {
        if !test.active {
            test.skip();
            return;
        }

        let executor = Executor::new(self.transport.as_ref(), &self.config);
        match test.protocol() {
            Ok(Protocol::Rest) => executor.run_rest(test, &mut self.store).await,
            Ok(Protocol::Grpc) => executor.run_grpc(test).await,
            Err(e) => test.fail(e.diagnostic()),
        }
    }
}
