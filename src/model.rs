//! Test case records as decoded from a suite document
//!
//! Field names on the wire follow the suite format (`test_type`,
//! `request_header`, `expected_response_status`, ...). Fields populated during
//! execution are never read from input.

use crate::error::{RegressError, RegressResult};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Terminal outcome of a test, `Pending` until the executor finishes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TestStatus {
    #[default]
    Pending,
    Skipped,
    Succeeded,
    Failed,
}

impl TestStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, TestStatus::Pending)
    }
}

impl fmt::Display for TestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TestStatus::Pending => "PENDING",
            TestStatus::Skipped => "SKIPPED",
            TestStatus::Succeeded => "SUCCEEDED",
            TestStatus::Failed => "FAILED",
        };
        write!(f, "{label}")
    }
}

/// Protocol a test is executed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    Rest,
    Grpc,
}

impl FromStr for Protocol {
    type Err = RegressError;

    /// Case-insensitive match on `test_type`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rest" => Ok(Protocol::Rest),
            "grpc" => Ok(Protocol::Grpc),
            _ => Err(RegressError::unsupported_test_type(s)),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Protocol::Rest => write!(f, "rest"),
            Protocol::Grpc => write!(f, "grpc"),
        }
    }
}

/// Opaque user/password pair forwarded as HTTP Basic credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub user: String,
    pub password: Option<String>,
}

/// One regression scenario.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TestCase {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub path: String,
    /// `rest` or `grpc`, matched case-insensitively
    #[serde(default)]
    pub test_type: String,
    /// For rest: GET, POST, PUT, ...
    #[serde(default)]
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_user: Option<String>,
    #[serde(default, skip_serializing)]
    pub auth_pwd: Option<String>,
    #[serde(default)]
    pub request_body: Value,
    #[serde(
        default,
        rename = "request_header",
        deserialize_with = "null_as_default"
    )]
    pub request_headers: BTreeMap<String, String>,
    #[serde(default)]
    pub expected_response_body: Value,
    #[serde(default, rename = "expected_response_status")]
    pub expected_status: u16,
    #[serde(skip_deserializing)]
    pub actual_response_body: Value,
    #[serde(skip_deserializing)]
    pub actual_status: Option<u16>,
    #[serde(skip_deserializing)]
    pub messages: Vec<String>,
    #[serde(skip_deserializing)]
    pub status: TestStatus,
    /// Seconds to pause after execution
    #[serde(default)]
    pub wait_time: u64,
}

impl TestCase {
    /// Decode a suite document into its ordered list of tests.
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::SuiteDecodeFailed`] if the document is not a
    /// JSON array of test objects.
    pub fn decode_list(content: &[u8]) -> RegressResult<Vec<TestCase>> {
        serde_json::from_slice(content)
            .map_err(|e| RegressError::suite_decode_failed(e.to_string()))
    }

    pub fn protocol(&self) -> RegressResult<Protocol> {
        self.test_type.parse()
    }

    /// Credentials, when a non-empty `auth_user` is configured.
    pub fn credentials(&self) -> Option<Credentials> {
        let user = self.auth_user.as_deref().filter(|u| !u.is_empty())?;
        Some(Credentials {
            user: user.to_string(),
            password: self.auth_pwd.clone(),
        })
    }

    pub fn append_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    pub fn skip(&mut self) {
        self.status = TestStatus::Skipped;
    }

    /// Record a failure diagnostic and close the test as FAILED.
    pub fn fail(&mut self, message: impl Into<String>) {
        self.append_message(message);
        self.finish();
    }

    /// Derive the terminal status from the diagnostic count.
    pub fn finish(&mut self) {
        self.status = if self.messages.is_empty() {
            TestStatus::Succeeded
        } else {
            TestStatus::Failed
        };
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
