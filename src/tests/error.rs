// Unit Tests for Error Handling
//
// UNIT UNDER TEST: RegressError
//
// BUSINESS RESPONSIBILITY:
//   - Separates fatal run errors from per-test failures
//   - Renders per-test failures as stable diagnostic lines
//
// TEST COVERAGE:
//   - Category, severity and fatality per variant
//   - Display text and diagnostic prefixes
//   - Source chaining for transport failures

use crate::error::{ErrorCategory, ErrorSeverity, RegressError};
use std::error::Error as _;

#[cfg(test)]
mod classification_tests {
    use super::*;

    #[test]
    fn test_configuration_errors_are_fatal() {
        let errors = [
            RegressError::configuration_error("bad"),
            RegressError::suite_load_failed("suite.json", "No such file"),
            RegressError::suite_decode_failed("expected `[`"),
        ];

        for err in errors {
            assert_eq!(err.category(), ErrorCategory::Configuration);
            assert_eq!(err.severity(), ErrorSeverity::Critical);
            assert!(err.is_fatal(), "{err} should be fatal");
        }
    }

    #[test]
    fn test_construction_errors_are_per_test() {
        let errors = [
            RegressError::invalid_method("FETCH"),
            RegressError::unsupported_test_type("soap"),
            RegressError::body_serialization_failed("key must be a string"),
        ];

        for err in errors {
            assert_eq!(err.category(), ErrorCategory::Construction);
            assert_eq!(err.severity(), ErrorSeverity::Error);
            assert!(!err.is_fatal());
        }
    }

    #[test]
    fn test_transport_errors_are_per_test() {
        let failed = RegressError::request_failed("connection refused", None);
        let timeout = RegressError::timeout(30);

        assert_eq!(failed.category(), ErrorCategory::Transport);
        assert_eq!(failed.severity(), ErrorSeverity::Error);
        assert_eq!(timeout.severity(), ErrorSeverity::Warning);
        assert!(!failed.is_fatal());
        assert!(!timeout.is_fatal());
    }

    #[test]
    fn test_report_write_failure_is_fatal() {
        let err = RegressError::report_write_failed("/ro/report.json", "read-only");

        assert_eq!(err.category(), ErrorCategory::Reporting);
        assert!(err.is_fatal());
    }
}

#[cfg(test)]
mod diagnostic_tests {
    use super::*;

    #[test]
    fn test_construction_diagnostic_text() {
        assert_eq!(
            RegressError::invalid_method("FETCH").diagnostic(),
            "Error: invalid method: FETCH"
        );
        assert_eq!(
            RegressError::unsupported_test_type("soap").diagnostic(),
            "Error: unsupported test type: soap"
        );
    }

    #[test]
    fn test_transport_diagnostic_has_http_prefix() {
        let err = RegressError::timeout(5);

        assert_eq!(
            err.diagnostic(),
            "Error: http call failed - request timed out after 5s"
        );
    }

    #[test]
    fn test_request_failed_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");

        let err = RegressError::request_failed("connect error", Some(Box::new(io)));

        assert_eq!(err.to_string(), "connect error");
        assert!(err.source().is_some());
    }

    #[test]
    fn test_suite_load_display_names_path() {
        let err = RegressError::suite_load_failed("missing.json", "not found");

        assert_eq!(err.to_string(), "Unable to open test file missing.json: not found");
    }
}
