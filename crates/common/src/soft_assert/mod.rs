//! Soft assertions
//!
//! A soft assertion records a failed check instead of aborting the test. All
//! failures of a reporting window (usually one suite) are collected by a
//! [`SoftAsserter`] and surfaced as one [`SoftAssertionError`] when the
//! runner calls [`SoftAsserter::finalize`] from its teardown.
//!
//! ```text
//! check(actual, expected, msg)
//!     └── evaluate ──(mismatch)──> context.current() ──> state.record
//! finalize()
//!     └── state.drain ──> SoftAssertionReport ──> Err(Aggregated)
//! ```

mod context;
mod evaluator;
mod report;
mod state;

use std::fmt::Debug;
use std::sync::Arc;

use parking_lot::Mutex;
use thiserror::Error;
use tracing::{debug, warn};

pub use context::{
    ActiveTestContext, StaticContext, TestContextProvider, TestIdentity, UNKNOWN_SUITE,
    UNKNOWN_TEST,
};
pub use evaluator::{evaluate, ComparisonError};
pub use report::{SoftAssertionReport, FAILURE_MARKER};
pub use state::{AggregatorState, FailureRecord, StateSnapshot, SuiteTally, TestFailures};

/// The one failure a soft-assertion window surfaces to the runner
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SoftAssertionError {
    #[error("{0}")]
    Aggregated(SoftAssertionReport),
}

impl SoftAssertionError {
    pub fn report(&self) -> &SoftAssertionReport {
        match self {
            SoftAssertionError::Aggregated(report) => report,
        }
    }
}

/// Collects soft-check failures and reports them in one go
///
/// Each instance owns its state, so independent runs in one process never
/// see each other's failures. Safe to share between threads.
pub struct SoftAsserter {
    context: Arc<dyn TestContextProvider>,
    state: Mutex<AggregatorState>,
}

impl SoftAsserter {
    pub fn new(context: Arc<dyn TestContextProvider>) -> Self {
        Self {
            context,
            state: Mutex::new(AggregatorState::new()),
        }
    }

    /// Asserter whose failures are all attributed to one fixed test
    pub fn with_static_context(test_title: impl Into<String>, suite_title: impl Into<String>) -> Self {
        Self::new(Arc::new(StaticContext::new(test_title, suite_title)))
    }

    /// Compare `actual` with `expected`; on mismatch record it and carry on
    ///
    /// Returns whether the check passed. Never panics on a mismatch.
    pub fn check<A, E>(&self, actual: &A, expected: &E, message: impl Into<String>) -> bool
    where
        A: PartialEq<E> + Debug + ?Sized,
        E: Debug + ?Sized,
    {
        let message = message.into();
        match evaluate(actual, expected, &message) {
            Ok(()) => true,
            Err(error) => {
                let identity = self.context.current();
                self.record(&identity.test_title, &identity.suite_title, message, error);
                false
            }
        }
    }

    /// Record a failure for an explicit test and suite
    pub fn record(
        &self,
        test_title: &str,
        suite_title: &str,
        message: impl Into<String>,
        error: ComparisonError,
    ) {
        debug!(test = test_title, suite = suite_title, "Soft assertion failed: {}", error);
        self.state.lock().record(test_title, suite_title, message, error);
    }

    /// Number of failures recorded since the last drain
    pub fn pending_failures(&self) -> usize {
        self.state.lock().failure_count()
    }

    /// Take the current window's failures without raising
    pub fn drain(&self) -> Option<SoftAssertionReport> {
        let snapshot = self.state.lock().drain();
        let report = SoftAssertionReport::from_snapshot(snapshot)?;
        warn!(
            "Soft assertions: {} failure(s) across {} test(s)",
            report.failure_count(),
            report.failed_test_count()
        );
        Some(report)
    }

    /// Drain the state and fail with the consolidated report if anything
    /// was recorded. Silent when every check passed.
    pub fn finalize(&self) -> Result<(), SoftAssertionError> {
        match self.drain() {
            Some(report) => Err(SoftAssertionError::Aggregated(report)),
            None => Ok(()),
        }
    }
}

impl Default for SoftAsserter {
    fn default() -> Self {
        Self::new(Arc::new(ActiveTestContext::new()))
    }
}

impl Debug for SoftAsserter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SoftAsserter")
            .field("pending_failures", &self.pending_failures())
            .finish()
    }
}
