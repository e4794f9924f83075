//! # api-regress
//!
//! Declarative API regression-test runner. A suite is a JSON array of test
//! cases; each one issues an HTTP request against a target service and checks
//! the response status and body against an expected shape.
//!
//! ## Key Features
//!
//! - **Structural comparison**: expected bodies are matched leaf by leaf;
//!   extra fields in the actual response are ignored
//! - **Dynamic placeholders**: `dyn:<key>` in a request is substituted from
//!   values captured by earlier tests; in an expected body it captures one
//! - **Sequential, deterministic runs**: tests execute in declared order
//! - **Precise diagnostics**: every failure is recorded on its test
//!
//! ## Example
//!
//! ```rust,no_run
//! use api_regress::{RunnerConfig, SuiteRunner};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let suite = br#"[{
//!     "name": "health",
//!     "active": true,
//!     "host": "localhost:8080",
//!     "path": "/health",
//!     "test_type": "rest",
//!     "method": "GET",
//!     "expected_response_status": 200,
//!     "expected_response_body": {"status": "ok"}
//! }]"#;
//!
//! let mut runner = SuiteRunner::new(RunnerConfig::default())?;
//! let (tests, summary) = runner.process(suite).await?;
//! println!("{}", api_regress::report::render_text(&tests, &summary));
//! # Ok(())
//! # }
//! ```

// Allow missing errors documentation - errors are self-documenting via type signatures
#![allow(clippy::missing_errors_doc)]

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

pub mod compare;
pub mod config;
pub mod error;
pub mod executor;
pub mod model;
pub mod placeholder;
pub mod report;
pub mod runner;
pub mod transport;

#[cfg(test)]
pub mod tests;

// Re-export main types
pub use compare::{compare, compare_detailed, Diagnostic, JsonNode, JsonPath, PathSegment};
pub use config::RunnerConfig;
pub use error::{RegressError, RegressResult};
pub use executor::Executor;
pub use model::{Credentials, Protocol, TestCase, TestStatus};
pub use placeholder::{PlaceholderStore, DYNAMIC_MARKER};
pub use report::{RunReport, RunSummary};
pub use runner::SuiteRunner;
pub use transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
