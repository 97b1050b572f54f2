//! Consolidated soft-assertion report

use std::fmt;

use serde::{Deserialize, Serialize};

use super::state::{StateSnapshot, SuiteTally, TestFailures};

/// Marker placed in front of every failure line
pub const FAILURE_MARKER: &str = "=> ";

/// Every failure of one reporting window, grouped by test
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SoftAssertionReport {
    tests: Vec<TestFailures>,
    suites: Vec<SuiteTally>,
    text: String,
}

impl SoftAssertionReport {
    /// Build a report from drained state. `None` when nothing failed.
    pub fn from_snapshot(snapshot: StateSnapshot) -> Option<Self> {
        if snapshot.is_empty() {
            return None;
        }
        let text = render(&snapshot.tests, &snapshot.suites);
        Some(Self {
            tests: snapshot.tests,
            suites: snapshot.suites,
            text,
        })
    }

    /// Failing tests in first-failure order
    pub fn failed_tests(&self) -> &[TestFailures] {
        &self.tests
    }

    /// Per-suite totals in first-failure order
    pub fn suite_totals(&self) -> &[SuiteTally] {
        &self.suites
    }

    /// Number of distinct failing tests
    pub fn failed_test_count(&self) -> usize {
        self.tests.len()
    }

    /// Number of failed checks
    pub fn failure_count(&self) -> usize {
        self.tests.iter().map(|t| t.failures.len()).sum()
    }

    /// Full report text
    pub fn text(&self) -> &str {
        &self.text
    }
}

impl fmt::Display for SoftAssertionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn render(tests: &[TestFailures], suites: &[SuiteTally]) -> String {
    let sections: Vec<String> = tests
        .iter()
        .enumerate()
        .map(|(i, test)| {
            let lines: Vec<String> = test
                .failures
                .iter()
                .map(|record| format!("{}{}", FAILURE_MARKER, record))
                .collect();
            format!("{}. Test Title: {}\n{}", i + 1, test.test_title, lines.join("\n\n"))
        })
        .collect();

    let totals: Vec<String> = suites
        .iter()
        .map(|s| format!("Total assertion failures in \"{}\": {}", s.suite_title, s.failure_count))
        .collect();

    format!(
        "Soft assertion failed: Total it block failed ({})\n{}\n\n{}",
        tests.len(),
        sections.join("\n"),
        totals.join("\n")
    )
}
