// Unit Tests for Runner Configuration
//
// UNIT UNDER TEST: RunnerConfig
//
// BUSINESS RESPONSIBILITY:
//   - Provides sane defaults for timeout, scheme and wait handling
//   - Loads overrides from REGRESS_* environment variables
//   - Rejects configurations that would make every request fail
//
// TEST COVERAGE:
//   - Default values and builder overrides
//   - Validation of timeout, scheme and host override
//   - Environment loading, including malformed values

use crate::config::{RunnerConfig, DEFAULT_REQUEST_TIMEOUT};
use crate::error::RegressError;
use std::time::Duration;

#[cfg(test)]
mod runner_config_tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        // Arrange & Act
        let config = RunnerConfig::default();

        // Assert
        assert_eq!(config.request_timeout, DEFAULT_REQUEST_TIMEOUT);
        assert_eq!(config.default_scheme, "http");
        assert!(config.honor_wait_time);
        assert!(config.host_override.is_none());
        assert!(config.user_agent.starts_with("api-regress/"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders_override_fields() {
        // Arrange & Act
        let config = RunnerConfig::default()
            .with_request_timeout(Duration::from_secs(5))
            .with_host_override("staging:9000")
            .with_wait_time(false);

        // Assert
        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.host_override.as_deref(), Some("staging:9000"));
        assert!(!config.honor_wait_time);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = RunnerConfig::default().with_request_timeout(Duration::ZERO);

        let result = config.validate();

        assert!(matches!(result, Err(RegressError::ConfigurationError { .. })));
    }

    #[test]
    fn test_unknown_scheme_is_rejected() {
        let config = RunnerConfig {
            default_scheme: "ftp".to_string(),
            ..RunnerConfig::default()
        };

        let err = config.validate().unwrap_err();

        assert!(err.to_string().contains("ftp"));
    }

    #[test]
    fn test_blank_host_override_is_rejected() {
        let config = RunnerConfig::default().with_host_override("   ");

        assert!(config.validate().is_err());
    }
}

#[cfg(test)]
mod env_config_tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 4] = [
        "REGRESS_REQUEST_TIMEOUT_SECS",
        "REGRESS_DEFAULT_SCHEME",
        "REGRESS_SKIP_WAIT",
        "REGRESS_HOST",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_without_variables_uses_defaults() {
        // Arrange
        clear_env();

        // Act
        let config = RunnerConfig::from_env().unwrap();

        // Assert
        assert_eq!(config, RunnerConfig::default());
    }

    #[test]
    #[serial]
    fn test_from_env_reads_all_overrides() {
        // Arrange
        clear_env();
        std::env::set_var("REGRESS_REQUEST_TIMEOUT_SECS", "12");
        std::env::set_var("REGRESS_DEFAULT_SCHEME", "HTTPS");
        std::env::set_var("REGRESS_SKIP_WAIT", "true");
        std::env::set_var("REGRESS_HOST", "api.internal:8443");

        // Act
        let config = RunnerConfig::from_env().unwrap();

        // Assert
        assert_eq!(config.request_timeout, Duration::from_secs(12));
        assert_eq!(config.default_scheme, "https");
        assert!(!config.honor_wait_time);
        assert_eq!(config.host_override.as_deref(), Some("api.internal:8443"));

        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_skip_wait_false_keeps_waiting() {
        clear_env();
        std::env::set_var("REGRESS_SKIP_WAIT", "0");

        let config = RunnerConfig::from_env().unwrap();

        assert!(config.honor_wait_time);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_non_numeric_timeout() {
        clear_env();
        std::env::set_var("REGRESS_REQUEST_TIMEOUT_SECS", "soon");

        let result = RunnerConfig::from_env();

        assert!(matches!(result, Err(RegressError::ConfigurationError { .. })));
        clear_env();
    }

    #[test]
    #[serial]
    fn test_from_env_validates_result() {
        clear_env();
        std::env::set_var("REGRESS_REQUEST_TIMEOUT_SECS", "0");

        let result = RunnerConfig::from_env();

        assert!(result.is_err());
        clear_env();
    }
}
