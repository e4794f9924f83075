use crate::error::{RegressError, RegressResult};
use crate::logging::log_debug;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default outbound request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Runner-wide settings shared by every test in a run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunnerConfig {
    /// Timeout applied to each outbound HTTP call
    pub request_timeout: Duration,
    /// Scheme prefixed to hosts that do not carry one (`http` or `https`)
    pub default_scheme: String,
    /// Whether per-test `wait_time` pauses are honoured
    pub honor_wait_time: bool,
    /// Replaces the `host` of every test when set
    pub host_override: Option<String>,
    /// User-Agent sent with every request
    pub user_agent: String,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            default_scheme: "http".to_string(),
            honor_wait_time: true,
            host_override: None,
            user_agent: format!("api-regress/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl RunnerConfig {
    /// Validate runner configuration
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::ConfigurationError`] if:
    /// - The request timeout is zero
    /// - The default scheme is neither `http` nor `https`
    /// - The host override is present but blank
    pub fn validate(&self) -> RegressResult<()> {
        if self.request_timeout.is_zero() {
            return Err(RegressError::configuration_error(
                "Request timeout must be greater than zero",
            ));
        }
        if !matches!(self.default_scheme.as_str(), "http" | "https") {
            return Err(RegressError::configuration_error(format!(
                "Unsupported default scheme: {}. Supported schemes: http, https",
                self.default_scheme
            )));
        }
        if let Some(host) = &self.host_override {
            if host.trim().is_empty() {
                return Err(RegressError::configuration_error(
                    "Host override must not be empty",
                ));
            }
        }
        Ok(())
    }

    /// Load configuration from environment variables, falling back to defaults
    /// This is the ONLY method that should access environment variables
    ///
    /// Recognised variables:
    /// - `REGRESS_REQUEST_TIMEOUT_SECS` - outbound timeout in whole seconds
    /// - `REGRESS_DEFAULT_SCHEME` - scheme for hosts written without one
    /// - `REGRESS_SKIP_WAIT` - `1`/`true` disables `wait_time` pauses
    /// - `REGRESS_HOST` - host override for every test
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::ConfigurationError`] if a variable is present but
    /// malformed, or the resulting configuration fails validation.
    pub fn from_env() -> RegressResult<Self> {
        let mut config = Self::default();

        if let Ok(raw) = std::env::var("REGRESS_REQUEST_TIMEOUT_SECS") {
            let secs = raw.trim().parse::<u64>().map_err(|e| {
                RegressError::configuration_error(format!(
                    "Invalid REGRESS_REQUEST_TIMEOUT_SECS '{raw}': {e}"
                ))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Ok(scheme) = std::env::var("REGRESS_DEFAULT_SCHEME") {
            config.default_scheme = scheme.trim().to_lowercase();
        }
        if let Ok(skip) = std::env::var("REGRESS_SKIP_WAIT") {
            config.honor_wait_time = !Self::parse_flag(&skip);
        }
        if let Ok(host) = std::env::var("REGRESS_HOST") {
            config.host_override = Some(host);
        }

        config.validate()?;

        log_debug!(
            request_timeout_secs = config.request_timeout.as_secs(),
            default_scheme = %config.default_scheme,
            honor_wait_time = config.honor_wait_time,
            has_host_override = config.host_override.is_some(),
            "Runner configuration loaded and validated"
        );

        Ok(config)
    }

    /// Builder-style override of the request timeout
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    /// Builder-style override of the host for every test
    pub fn with_host_override(mut self, host: impl Into<String>) -> Self {
        self.host_override = Some(host.into());
        self
    }

    /// Builder-style toggle of `wait_time` handling
    pub fn with_wait_time(mut self, honor: bool) -> Self {
        self.honor_wait_time = honor;
        self
    }

    fn parse_flag(raw: &str) -> bool {
        matches!(
            raw.trim().to_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        )
    }
}
