//! SweetCheck UI test runner
//!
//! This crate drives the storefront UI suite from Rust:
//! - Parses declarative YAML test specs
//! - Runs each spec as one Playwright script and reads back its step markers
//! - Feeds soft checks into a per-suite soft-assertion aggregator
//! - Installs request mocks built from JSON fixtures
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    UI Test Runner (Rust)                    │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestRunner                                                 │
//! │    ├── group_by_suite(specs)                                │
//! │    ├── per suite: ActiveTestContext + SoftAsserter          │
//! │    ├── per test:  mocks + steps -> SpecExecutor::execute    │
//! │    │               soft outcomes -> SoftAsserter::check     │
//! │    └── suite teardown: SoftAsserter::finalize               │
//! ├─────────────────────────────────────────────────────────────┤
//! │  TestSpec (YAML)                                            │
//! │    ├── name, suite, tags, mocks                             │
//! │    └── steps: [Step]                                        │
//! │          ├── navigate { url }                               │
//! │          ├── click { selector, force?, nth? }               │
//! │          ├── fill / type / select { selector, value }       │
//! │          ├── assert { selector, visible?, text?, attr? }    │
//! │          ├── soft_assert { selector, has_text?, check }     │
//! │          └── route { method, url, status, body }            │
//! └─────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod fixtures;
pub mod mocks;
pub mod pages;
pub mod playwright;
pub mod runner;
pub mod spec;

pub use error::{E2eError, E2eResult};
pub use fixtures::Fixtures;
pub use mocks::{MockConfig, MockManager};
pub use playwright::{Browser, PlaywrightConfig, PlaywrightHandle, ScriptOutcome, SpecExecutor};
pub use runner::{RunnerConfig, SuiteOutcome, TestResult, TestRunner, TestSuiteResult};
pub use spec::{SoftCheck, TestSpec, TestStep};
