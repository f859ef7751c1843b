//! Assertion reporter adapters.

use attest_application::ports::AssertionReporter;
use attest_domain::AssertionResult;

/// Reporter that logs each assertion outcome through `tracing`.
///
/// Passed assertions log at info level, failures at error level, matching
/// how the surrounding test runner surfaces its own listener output.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl AssertionReporter for TracingReporter {
    fn report(&mut self, result: &AssertionResult) {
        if result.passed {
            tracing::info!("PASS {}", result.name);
        } else {
            tracing::error!(
                "FAIL {}: {}",
                result.name,
                result.message.as_deref().unwrap_or("no message")
            );
        }
    }
}

/// Reporter that buffers results for a host-side aggregator.
#[derive(Debug, Clone, Default)]
pub struct CollectingReporter {
    results: Vec<AssertionResult>,
}

impl CollectingReporter {
    /// Creates an empty reporter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the results received so far, in order.
    #[must_use]
    pub fn results(&self) -> &[AssertionResult] {
        &self.results
    }

    /// Consumes the reporter and returns the buffered results.
    #[must_use]
    pub fn into_results(self) -> Vec<AssertionResult> {
        self.results
    }
}

impl AssertionReporter for CollectingReporter {
    fn report(&mut self, result: &AssertionResult) {
        self.results.push(result.clone());
    }
}
