//! Test identity lookup
//!
//! The aggregator never tracks which test is running. It asks a
//! [`TestContextProvider`] at the moment a check fails, so the same check
//! helper can be reused across tests and suites.

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Title used when no suite has been entered
pub const UNKNOWN_SUITE: &str = "<unknown suite>";

/// Title used when no test has been entered
pub const UNKNOWN_TEST: &str = "<unknown test>";

/// Identity of the test a check belongs to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TestIdentity {
    pub test_title: String,
    pub suite_title: String,
}

impl TestIdentity {
    pub fn new(test_title: impl Into<String>, suite_title: impl Into<String>) -> Self {
        Self {
            test_title: test_title.into(),
            suite_title: suite_title.into(),
        }
    }
}

/// "Who am I" lookup into the surrounding runner
pub trait TestContextProvider: Send + Sync {
    /// Identity of the test currently executing
    fn current(&self) -> TestIdentity;
}

impl<F> TestContextProvider for F
where
    F: Fn() -> TestIdentity + Send + Sync,
{
    fn current(&self) -> TestIdentity {
        self()
    }
}

/// A provider that always reports the same test
#[derive(Debug, Clone)]
pub struct StaticContext {
    identity: TestIdentity,
}

impl StaticContext {
    pub fn new(test_title: impl Into<String>, suite_title: impl Into<String>) -> Self {
        Self {
            identity: TestIdentity::new(test_title, suite_title),
        }
    }
}

impl TestContextProvider for StaticContext {
    fn current(&self) -> TestIdentity {
        self.identity.clone()
    }
}

#[derive(Debug, Default)]
struct ActiveSlot {
    suite: Option<String>,
    test: Option<String>,
}

/// Mutable "current test" slot maintained by a runner
///
/// The runner calls [`enter_suite`](Self::enter_suite) and
/// [`enter_test`](Self::enter_test) as it walks its specs; checks executed in
/// between are attributed to that suite and test.
#[derive(Debug, Default)]
pub struct ActiveTestContext {
    slot: RwLock<ActiveSlot>,
}

impl ActiveTestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter a suite. Any previously entered test is left.
    pub fn enter_suite(&self, suite_title: impl Into<String>) {
        let mut slot = self.slot.write();
        slot.suite = Some(suite_title.into());
        slot.test = None;
    }

    /// Enter a test within the current suite
    pub fn enter_test(&self, test_title: impl Into<String>) {
        self.slot.write().test = Some(test_title.into());
    }

    /// Leave the current test, staying inside the suite
    pub fn leave_test(&self) {
        self.slot.write().test = None;
    }

    /// Leave both suite and test
    pub fn clear(&self) {
        let mut slot = self.slot.write();
        slot.suite = None;
        slot.test = None;
    }
}

impl TestContextProvider for ActiveTestContext {
    fn current(&self) -> TestIdentity {
        let slot = self.slot.read();
        TestIdentity {
            test_title: slot.test.clone().unwrap_or_else(|| UNKNOWN_TEST.to_string()),
            suite_title: slot.suite.clone().unwrap_or_else(|| UNKNOWN_SUITE.to_string()),
        }
    }
}
