//! Accumulated soft-assertion failures for one reporting window

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::evaluator::ComparisonError;

/// A single failed check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureRecord {
    pub message: String,
    pub error: ComparisonError,
}

impl fmt::Display for FailureRecord {
    /// The record's own message leads, followed by the comparison detail
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.error.write_with(f, &self.message)
    }
}

/// Failures of one test, in check execution order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestFailures {
    pub test_title: String,
    pub failures: Vec<FailureRecord>,
}

/// Failure count of one suite
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuiteTally {
    pub suite_title: String,
    pub failure_count: usize,
}

/// Contents of the state at the moment it was drained
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StateSnapshot {
    /// Tests in first-failure order
    pub tests: Vec<TestFailures>,
    /// Suites in first-failure order
    pub suites: Vec<SuiteTally>,
}

impl StateSnapshot {
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }
}

/// Failure log and suite counters
///
/// Titles are kept in the order they first failed; the index maps only point
/// into the ordered vectors. A test or suite appears here only after at least
/// one failure was recorded for it.
#[derive(Debug, Default)]
pub struct AggregatorState {
    tests: Vec<TestFailures>,
    test_index: HashMap<String, usize>,
    suites: Vec<SuiteTally>,
    suite_index: HashMap<String, usize>,
}

impl AggregatorState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a failure for `test_title` and bump the `suite_title` counter
    pub fn record(
        &mut self,
        test_title: &str,
        suite_title: &str,
        message: impl Into<String>,
        error: ComparisonError,
    ) {
        let record = FailureRecord {
            message: message.into(),
            error,
        };

        match self.test_index.get(test_title) {
            Some(&idx) => self.tests[idx].failures.push(record),
            None => {
                self.test_index.insert(test_title.to_string(), self.tests.len());
                self.tests.push(TestFailures {
                    test_title: test_title.to_string(),
                    failures: vec![record],
                });
            }
        }

        match self.suite_index.get(suite_title) {
            Some(&idx) => self.suites[idx].failure_count += 1,
            None => {
                self.suite_index.insert(suite_title.to_string(), self.suites.len());
                self.suites.push(SuiteTally {
                    suite_title: suite_title.to_string(),
                    failure_count: 1,
                });
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Number of distinct tests with at least one failure
    pub fn failed_test_count(&self) -> usize {
        self.tests.len()
    }

    /// Total number of recorded failures
    pub fn failure_count(&self) -> usize {
        self.suites.iter().map(|s| s.failure_count).sum()
    }

    /// Failures recorded so far for one test
    pub fn failures_for(&self, test_title: &str) -> &[FailureRecord] {
        self.test_index
            .get(test_title)
            .map(|&idx| self.tests[idx].failures.as_slice())
            .unwrap_or(&[])
    }

    /// Take everything recorded so far, leaving the state empty
    pub fn drain(&mut self) -> StateSnapshot {
        let taken = std::mem::take(self);
        StateSnapshot {
            tests: taken.tests,
            suites: taken.suites,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mismatch(message: &str) -> ComparisonError {
        ComparisonError::new("actual", "expected", message)
    }

    #[test]
    fn test_record_groups_by_test_in_first_failure_order() {
        let mut state = AggregatorState::new();
        state.record("testA", "S", "a1", mismatch("a1"));
        state.record("testB", "S", "b1", mismatch("b1"));
        state.record("testA", "S", "a2", mismatch("a2"));

        assert_eq!(state.failed_test_count(), 2);
        assert_eq!(state.failure_count(), 3);

        let messages: Vec<_> = state
            .failures_for("testA")
            .iter()
            .map(|r| r.message.as_str())
            .collect();
        assert_eq!(messages, vec!["a1", "a2"]);

        let snapshot = state.drain();
        let titles: Vec<_> = snapshot.tests.iter().map(|t| t.test_title.as_str()).collect();
        assert_eq!(titles, vec!["testA", "testB"]);
    }

    #[test]
    fn test_suite_tally_matches_records() {
        let mut state = AggregatorState::new();
        for i in 0..3 {
            state.record(&format!("a{}", i), "A", "m", mismatch("m"));
        }
        state.record("b0", "B", "m", mismatch("m"));
        state.record("b0", "B", "m", mismatch("m"));

        let snapshot = state.drain();
        assert_eq!(
            snapshot.suites,
            vec![
                SuiteTally { suite_title: "A".into(), failure_count: 3 },
                SuiteTally { suite_title: "B".into(), failure_count: 2 },
            ]
        );
    }

    #[test]
    fn test_drain_clears_both_maps() {
        let mut state = AggregatorState::new();
        state.record("t", "s", "m", mismatch("m"));

        let first = state.drain();
        assert!(!first.is_empty());
        assert!(state.is_empty());
        assert_eq!(state.failure_count(), 0);
        assert!(state.failures_for("t").is_empty());

        let second = state.drain();
        assert!(second.is_empty());
        assert!(second.suites.is_empty());

        state.record("t", "s", "m", mismatch("m"));
        assert_eq!(state.drain().suites[0].failure_count, 1);
    }
}
