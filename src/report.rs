//! Run reporting
//!
//! The text report goes to stdout. The JSON report is optional and carries the
//! full test records plus every placeholder captured during the run.

use crate::error::{RegressError, RegressResult};
use crate::logging::log_info;
use crate::model::{TestCase, TestStatus};
use crate::placeholder::PlaceholderStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;
use uuid::Uuid;

/// Counts of tests per terminal status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub pending: usize,
}

impl RunSummary {
    pub fn from_tests(tests: &[TestCase]) -> Self {
        tests.iter().fold(
            Self {
                total: tests.len(),
                ..Self::default()
            },
            |mut summary, test| {
                match test.status {
                    TestStatus::Succeeded => summary.succeeded += 1,
                    TestStatus::Failed => summary.failed += 1,
                    TestStatus::Skipped => summary.skipped += 1,
                    TestStatus::Pending => summary.pending += 1,
                }
                summary
            },
        )
    }

    /// No failures and every test reached a terminal status.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.pending == 0
    }
}

/// Human-readable report: one line per test, diagnostics indented, then totals.
pub fn render_text(tests: &[TestCase], summary: &RunSummary) -> String {
    let mut out = String::new();
    for test in tests {
        out.push_str(&format!("[{}] {}\n", test.status, test.name));
        for message in &test.messages {
            out.push_str(&format!("    {message}\n"));
        }
    }
    out.push_str(&format!(
        "done: {} tests, {} succeeded, {} failed, {} skipped\n",
        summary.total, summary.succeeded, summary.failed, summary.skipped
    ));
    out
}

/// Machine-readable record of one run.
#[derive(Debug, Serialize)]
pub struct RunReport<'a> {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub summary: RunSummary,
    pub placeholders: &'a PlaceholderStore,
    pub tests: &'a [TestCase],
}

impl<'a> RunReport<'a> {
    pub fn new(
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        tests: &'a [TestCase],
        placeholders: &'a PlaceholderStore,
    ) -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at,
            finished_at,
            summary: RunSummary::from_tests(tests),
            placeholders,
            tests,
        }
    }

    /// Write the report as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`RegressError::ReportWriteFailed`] if serialization or the
    /// file write fails.
    pub fn write_json(&self, path: &Path) -> RegressResult<()> {
        let shown = path.display().to_string();
        let json = serde_json::to_vec_pretty(self)
            .map_err(|e| RegressError::report_write_failed(&shown, e.to_string()))?;
        std::fs::write(path, json)
            .map_err(|e| RegressError::report_write_failed(&shown, e.to_string()))?;

        log_info!(
            path = %shown,
            run_id = %self.run_id,
            total = self.summary.total,
            "Run report written"
        );
        Ok(())
    }
}
