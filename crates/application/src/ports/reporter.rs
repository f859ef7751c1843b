//! Assertion reporting port

use attest_domain::AssertionResult;

/// Port for the host's test-result aggregator.
///
/// Validators forward every assertion as it is emitted, in order. The same
/// results are also returned in the final report, so hosts that only
/// consume the report can inject [`NullReporter`].
pub trait AssertionReporter {
    /// Receives one assertion result.
    fn report(&mut self, result: &AssertionResult);
}

/// Reporter that discards everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullReporter;

impl AssertionReporter for NullReporter {
    fn report(&mut self, _result: &AssertionResult) {}
}
