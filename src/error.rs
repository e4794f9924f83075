//! Error types for regression runs.
//!
//! This module provides structured error handling for api-regress,
//! including categorization, severity levels, and fatality guidance.
//!
//! # Error Types
//!
//! The main error type is [`RegressError`], which covers every failure mode:
//! - Configuration errors (unreadable suite file, undecodable document, bad settings)
//! - Per-test construction errors (invalid method, unsupported test type, body serialization)
//! - Transport failures (network errors and timeouts)
//! - Report output failures
//!
//! Only configuration and reporting errors escape the runner. Everything else is
//! turned into a diagnostic on the test that caused it, so one broken test never
//! aborts the suite.
//!
//! ```rust
//! use api_regress::{RegressError, error::ErrorCategory};
//!
//! let err = RegressError::invalid_method("FETCH");
//! assert_eq!(err.category(), ErrorCategory::Construction);
//! assert!(!err.is_fatal());
//! ```

use crate::logging::{log_error, log_warn};
use thiserror::Error;

// ============================================================================
// Error categorization types
// ============================================================================

/// High-level categorization of errors for routing and handling decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Bad input file, undecodable document or invalid runner settings.
    ///
    /// Fatal: the run aborts before any test executes.
    Configuration,

    /// A single test could not be turned into a request.
    ///
    /// Recorded on the test, the suite continues.
    Construction,

    /// The request was built but the target could not be reached in time.
    ///
    /// Recorded on the test, the suite continues.
    Transport,

    /// Results could not be written out after the run.
    Reporting,
}

/// Severity level for logging decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// The run cannot proceed.
    Critical,

    /// One test failed to execute.
    Error,

    /// Unexpected but recoverable (slow target, timeouts).
    Warning,
}

// ============================================================================
// Regression error types
// ============================================================================

/// Convenient result type for regression operations.
pub type RegressResult<T> = std::result::Result<T, RegressError>;

/// Errors that can occur while loading or executing a regression suite.
///
/// Use the constructor methods, which log the error at creation:
///
/// ```rust
/// use api_regress::RegressError;
///
/// let err = RegressError::suite_decode_failed("expected value at line 1 column 1");
/// let err = RegressError::timeout(30);
/// ```
///
/// | Variant | Category | Fatal |
/// |---------|----------|-------|
/// | `ConfigurationError` | Configuration | Yes |
/// | `SuiteLoadFailed` | Configuration | Yes |
/// | `SuiteDecodeFailed` | Configuration | Yes |
/// | `InvalidMethod` | Construction | No |
/// | `UnsupportedTestType` | Construction | No |
/// | `BodySerializationFailed` | Construction | No |
/// | `RequestFailed` | Transport | No |
/// | `Timeout` | Transport | No |
/// | `ReportWriteFailed` | Reporting | Yes |
#[derive(Error, Debug)]
pub enum RegressError {
    /// Runner configuration is invalid or incomplete.
    #[error("Runner configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The suite file could not be read.
    #[error("Unable to open test file {path}: {message}")]
    SuiteLoadFailed {
        /// Path that was requested.
        path: String,
        /// Underlying I/O failure.
        message: String,
    },

    /// The suite document is not a JSON array of test cases.
    #[error("Unable to decode test list: {message}")]
    SuiteDecodeFailed {
        /// Decoder failure.
        message: String,
    },

    /// The test's method is not on the HTTP verb allow-list.
    #[error("invalid method: {method}")]
    InvalidMethod {
        /// Method as written in the suite.
        method: String,
    },

    /// The test's `test_type` names no known executor.
    #[error("unsupported test type: {test_type}")]
    UnsupportedTestType {
        /// Test type as written in the suite.
        test_type: String,
    },

    /// The request body could not be serialized.
    #[error("unable to make request body into bytes: {message}")]
    BodySerializationFailed {
        /// Serializer failure.
        message: String,
    },

    /// The HTTP call failed before a response was received.
    #[error("{message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The HTTP call did not complete within the configured timeout.
    #[error("request timed out after {timeout_seconds}s")]
    Timeout {
        /// The timeout that was exceeded.
        timeout_seconds: u64,
    },

    /// The run report could not be written.
    #[error("Unable to write report {path}: {message}")]
    ReportWriteFailed {
        /// Report destination.
        path: String,
        /// Underlying failure.
        message: String,
    },
}

impl RegressError {
    /// Get the error category for routing and handling decisions.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError { .. } => ErrorCategory::Configuration,
            Self::SuiteLoadFailed { .. } => ErrorCategory::Configuration,
            Self::SuiteDecodeFailed { .. } => ErrorCategory::Configuration,
            Self::InvalidMethod { .. } => ErrorCategory::Construction,
            Self::UnsupportedTestType { .. } => ErrorCategory::Construction,
            Self::BodySerializationFailed { .. } => ErrorCategory::Construction,
            Self::RequestFailed { .. } => ErrorCategory::Transport,
            Self::Timeout { .. } => ErrorCategory::Transport,
            Self::ReportWriteFailed { .. } => ErrorCategory::Reporting,
        }
    }

    /// Get the error severity for logging.
    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            ErrorCategory::Configuration | ErrorCategory::Reporting => ErrorSeverity::Critical,
            ErrorCategory::Construction => ErrorSeverity::Error,
            ErrorCategory::Transport => match self {
                Self::Timeout { .. } => ErrorSeverity::Warning,
                _ => ErrorSeverity::Error,
            },
        }
    }

    /// Whether this error stops the whole run rather than a single test.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Configuration | ErrorCategory::Reporting
        )
    }

    /// Render as a test diagnostic line.
    ///
    /// Transport failures keep the `http call failed` prefix used by every
    /// other runner message so reports stay greppable.
    pub fn diagnostic(&self) -> String {
        match self.category() {
            ErrorCategory::Transport => format!("Error: http call failed - {self}"),
            _ => format!("Error: {self}"),
        }
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Runner configuration validation failed"
        );
        Self::ConfigurationError { message }
    }

    pub fn suite_load_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        let path = path.into();
        let message = message.into();
        log_error!(
            error_type = "suite_load_failed",
            path = %path,
            message = %message,
            "Unable to read test suite"
        );
        Self::SuiteLoadFailed { path, message }
    }

    pub fn suite_decode_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "suite_decode_failed",
            message = %message,
            "Test suite is not a valid list of tests"
        );
        Self::SuiteDecodeFailed { message }
    }

    pub fn invalid_method(method: impl Into<String>) -> Self {
        let method = method.into();
        log_warn!(
            error_type = "invalid_method",
            method = %method,
            "Rejected HTTP method before dispatch"
        );
        Self::InvalidMethod { method }
    }

    pub fn unsupported_test_type(test_type: impl Into<String>) -> Self {
        let test_type = test_type.into();
        log_warn!(
            error_type = "unsupported_test_type",
            test_type = %test_type,
            "Invalid test type"
        );
        Self::UnsupportedTestType { test_type }
    }

    pub fn body_serialization_failed(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "body_serialization_failed",
            message = %message,
            "Unable to serialize request body"
        );
        Self::BodySerializationFailed { message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "HTTP request execution failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn timeout(timeout_seconds: u64) -> Self {
        log_warn!(
            error_type = "timeout",
            timeout_seconds = timeout_seconds,
            "HTTP request timed out"
        );
        Self::Timeout { timeout_seconds }
    }

    pub fn report_write_failed(path: impl Into<String>, message: impl Into<String>) -> Self {
        let path = path.into();
        let message = message.into();
        log_error!(
            error_type = "report_write_failed",
            path = %path,
            message = %message,
            "Unable to write run report"
        );
        Self::ReportWriteFailed { path, message }
    }
}
