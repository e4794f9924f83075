//! HTTP transport for REST tests
//!
//! The executor only talks to the [`HttpTransport`] trait, which performs one
//! request and hands back `(status, body)`. Non-2xx statuses are ordinary
//! responses here; only failures to obtain a response are errors.
//! [`ReqwestTransport`] is the production implementation.

use crate::config::RunnerConfig;
use crate::error::{RegressError, RegressResult};
use crate::logging::{log_debug, log_error};
use crate::model::Credentials;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, CONTENT_TYPE, USER_AGENT};
use std::collections::BTreeMap;
use std::fmt::{self, Display};
use std::str::FromStr;
use std::time::{Duration, Instant};

/// HTTP verbs a test may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Head,
    Post,
    Put,
    Patch,
    Delete,
    Connect,
    Options,
    Trace,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 9] = [
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Connect,
        HttpMethod::Options,
        HttpMethod::Trace,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Connect => "CONNECT",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = RegressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.trim().to_uppercase();
        HttpMethod::ALL
            .into_iter()
            .find(|method| method.as_str() == upper)
            .ok_or_else(|| RegressError::invalid_method(s))
    }
}

impl Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Connect => reqwest::Method::CONNECT,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Trace => reqwest::Method::TRACE,
        }
    }
}

/// A fully resolved outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Vec<u8>>,
    pub credentials: Option<Credentials>,
}

/// What came back from the target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

/// Performs a single HTTP exchange.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send `request` and return the response status and raw body.
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::RequestFailed`] or [`RegressError::Timeout`] when
    /// no response could be obtained.
    async fn perform_request(&self, request: HttpRequest) -> RegressResult<HttpResponse>;
}

/// Join `host` and `path` into a request URL.
///
/// Hosts without an explicit `scheme://` get `default_scheme`.
pub fn build_url(host: &str, path: &str, default_scheme: &str) -> String {
    let host = host.trim().trim_end_matches('/');
    let base = if host.contains("://") {
        host.to_string()
    } else {
        format!("{default_scheme}://{host}")
    };
    let path = path.trim();
    if path.is_empty() {
        return base;
    }
    format!("{base}/{}", path.trim_start_matches('/'))
}

/// reqwest-backed transport
#[derive(Debug)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl ReqwestTransport {
    /// Build a transport honouring the runner's timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::ConfigurationError`] if the user agent is not a
    /// valid header value or the HTTP client cannot be initialised.
    pub fn new(config: &RunnerConfig) -> RegressResult<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent).map_err(|e| {
                RegressError::configuration_error(format!("Invalid user agent: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .default_headers(default_headers)
            .build()
            .map_err(|e| {
                RegressError::configuration_error(format!("Failed to build HTTP client: {e}"))
            })?;

        log_debug!(
            timeout_secs = config.request_timeout.as_secs(),
            user_agent = %config.user_agent,
            "HTTP transport initialized"
        );

        Ok(Self {
            client,
            timeout: config.request_timeout,
        })
    }

    fn build_headers(request: &HttpRequest) -> RegressResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        for (name, value) in &request.headers {
            let name = HeaderName::from_bytes(name.as_bytes()).map_err(|e| {
                RegressError::request_failed(format!("invalid header name '{name}': {e}"), None)
            })?;
            let value = HeaderValue::from_str(value).map_err(|e| {
                RegressError::request_failed(format!("invalid header value for '{name}': {e}"), None)
            })?;
            headers.insert(name, value);
        }
        if request.body.is_some() && !headers.contains_key(CONTENT_TYPE) {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        Ok(headers)
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn perform_request(&self, request: HttpRequest) -> RegressResult<HttpResponse> {
        let headers = Self::build_headers(&request)?;

        let mut builder = self
            .client
            .request(request.method.into(), &request.url)
            .headers(headers);
        if let Some(credentials) = &request.credentials {
            builder = builder.basic_auth(&credentials.user, credentials.password.as_ref());
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let start_time = Instant::now();
        let response = builder.send().await.map_err(|e| {
            log_error!(
                url = %request.url,
                error = %e,
                "HTTP request failed"
            );
            if e.is_timeout() {
                RegressError::timeout(self.timeout.as_secs())
            } else {
                RegressError::request_failed(e.to_string(), Some(Box::new(e)))
            }
        })?;

        let status = response.status().as_u16();
        let body = response.bytes().await.map_err(|e| {
            RegressError::request_failed(
                format!("failed to read response body: {e}"),
                Some(Box::new(e)),
            )
        })?;

        log_debug!(
            url = %request.url,
            status = status,
            body_len = body.len(),
            duration_ms = start_time.elapsed().as_millis() as u64,
            "HTTP response received"
        );

        Ok(HttpResponse {
            status,
            body: body.to_vec(),
        })
    }
}
