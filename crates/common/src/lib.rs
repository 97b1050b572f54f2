//! SweetCheck Common Library
//!
//! Shared infrastructure for the SweetCheck UI and API suites:
//! - the soft-assertion aggregator that collects check failures across a
//!   suite and reports them once at teardown
//! - per-environment suite configuration
//! - the common error type

pub mod config;
pub mod error;
pub mod soft_assert;

// Re-export commonly used types
pub use config::{Environment, SuiteConfig, Viewport};
pub use error::{Error, Result};
pub use soft_assert::{
    ActiveTestContext, AggregatorState, ComparisonError, FailureRecord, SoftAssertionError,
    SoftAssertionReport, SoftAsserter, StaticContext, TestContextProvider, TestIdentity,
};

/// SweetCheck version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
