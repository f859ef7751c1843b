//! Assertion results and validation reports.
//!
//! A validator emits an ordered sequence of named pass/fail assertions and
//! wraps them in a [`ValidationReport`] for the host's result aggregator.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single named pass/fail check with an optional explanatory message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssertionResult {
    /// Assertion name as shown by the host runner.
    pub name: String,
    /// Whether the assertion passed.
    pub passed: bool,
    /// Explanation, populated on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl AssertionResult {
    /// Creates a passed result.
    #[must_use]
    pub fn pass(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: true,
            message: None,
        }
    }

    /// Creates a failed result with an explanatory message.
    #[must_use]
    pub fn fail(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed: false,
            message: Some(message.into()),
        }
    }
}

/// Results from one validation run, in emission order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Run identifier for correlation by the host aggregator.
    pub run_id: Uuid,
    /// When the validation ran.
    pub executed_at: DateTime<Utc>,
    /// Individual assertion results, in the order they were emitted.
    pub results: Vec<AssertionResult>,
    /// Total number of assertions.
    pub total: usize,
    /// Number of passed assertions.
    pub passed: usize,
    /// Number of failed assertions.
    pub failed: usize,
    /// Non-fatal diagnostics (e.g. a skipped variable save).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Execution time in milliseconds.
    pub duration_ms: u64,
}

impl ValidationReport {
    /// Creates a report from emitted results.
    #[must_use]
    pub fn new(results: Vec<AssertionResult>, warnings: Vec<String>, duration_ms: u64) -> Self {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed).count();
        let failed = total - passed;

        Self {
            run_id: Uuid::now_v7(),
            executed_at: Utc::now(),
            results,
            total,
            passed,
            failed,
            warnings,
            duration_ms,
        }
    }

    /// Check if all assertions passed.
    #[must_use]
    pub const fn all_passed(&self) -> bool {
        self.failed == 0
    }

    /// Get pass rate as percentage.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total == 0 {
            100.0
        } else {
            (self.passed as f64 / self.total as f64) * 100.0
        }
    }
}
