//! Test runner that groups specs into suites and drives them through
//! Playwright
//!
//! Soft checks reported by the browser are compared here, through one
//! [`SoftAsserter`] per suite. The asserter is finalized once every test of
//! the suite has run, so a suite with soft failures fails with a single
//! consolidated report.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sweetcheck_common::{ActiveTestContext, SoftAsserter, SoftAssertionReport, SuiteConfig};
use tracing::{debug, error, info, warn};

use crate::error::{E2eError, E2eResult};
use crate::mocks::MockManager;
use crate::playwright::{PlaywrightConfig, PlaywrightHandle, ScriptOutcome, SpecExecutor, StepResult};
use crate::spec::{SoftCheck, TestSpec, TestStep};

/// Result of running a single test
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestResult {
    pub name: String,
    pub suite: String,
    /// No hard failure in the final attempt
    pub success: bool,
    pub duration_ms: u64,
    pub attempts: u32,
    pub steps: Vec<StepResult>,
    /// Soft checks of the final attempt that did not match
    pub soft_failures: usize,
    pub error: Option<String>,
}

/// Result of one suite, including its soft-assertion teardown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuiteOutcome {
    pub name: String,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    /// Set when any soft check of the suite failed
    pub soft_assertion_report: Option<SoftAssertionReport>,
    pub duration_ms: u64,
}

impl SuiteOutcome {
    pub fn success(&self) -> bool {
        self.failed == 0 && self.soft_assertion_report.is_none()
    }
}

/// Result of running all tests
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestSuiteResult {
    pub started_at: DateTime<Utc>,
    pub total: usize,
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    pub duration_ms: u64,
    pub results: Vec<TestResult>,
    pub suites: Vec<SuiteOutcome>,
}

impl TestSuiteResult {
    /// Every test passed and no suite reported soft failures
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.suites.iter().all(SuiteOutcome::success)
    }

    /// Soft-assertion reports of the failing suites
    pub fn soft_assertion_reports(&self) -> impl Iterator<Item = &SoftAssertionReport> {
        self.suites.iter().filter_map(|s| s.soft_assertion_report.as_ref())
    }
}

/// Configuration for the test runner
#[derive(Debug, Clone)]
pub struct RunnerConfig {
    pub playwright: PlaywrightConfig,
    pub specs_dir: PathBuf,
    pub output_dir: PathBuf,
    pub mocks: MockManager,
    pub suite: SuiteConfig,
}

impl RunnerConfig {
    /// Runner settings derived from a suite configuration
    pub fn from_suite(suite: SuiteConfig) -> Self {
        let playwright =
            PlaywrightConfig::from_ui_settings(&suite.ui, suite.screenshots_dir(), suite.videos_dir());

        Self {
            playwright,
            specs_dir: suite.specs_dir.clone(),
            output_dir: suite.results_dir(),
            mocks: MockManager::new(),
            suite,
        }
    }

    pub fn with_mocks(mut self, mocks: MockManager) -> Self {
        self.mocks = mocks;
        self
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self::from_suite(SuiteConfig::default())
    }
}

/// Main UI test runner
pub struct TestRunner<E = PlaywrightHandle> {
    config: RunnerConfig,
    executor: E,
}

impl TestRunner<PlaywrightHandle> {
    /// Runner backed by a local Playwright installation
    pub fn new(config: RunnerConfig) -> E2eResult<Self> {
        let executor = PlaywrightHandle::new(config.playwright.clone())?;
        Ok(Self::with_executor(config, executor))
    }
}

impl<E: SpecExecutor> TestRunner<E> {
    pub fn with_executor(config: RunnerConfig, executor: E) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &RunnerConfig {
        &self.config
    }

    /// Run all tests in the specs directory
    pub async fn run_all(&self) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.config.specs_dir)?;
        self.run_specs(&specs).await
    }

    /// Run tests matching a tag
    pub async fn run_tagged(&self, tag: &str) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.config.specs_dir)?;
        let filtered: Vec<TestSpec> = TestSpec::filter_by_tag(&specs, tag)
            .into_iter()
            .cloned()
            .collect();
        self.run_specs(&filtered).await
    }

    /// Run a specific test by name, as a suite of its own
    pub async fn run_test(&self, name: &str) -> E2eResult<TestSuiteResult> {
        let specs = TestSpec::load_all(&self.config.specs_dir)?;
        let spec = specs
            .into_iter()
            .find(|s| s.name == name)
            .ok_or_else(|| E2eError::SpecParse(format!("Test not found: {}", name)))?;

        self.run_specs(std::slice::from_ref(&spec)).await
    }

    /// Run a list of test specs, suite by suite
    pub async fn run_specs(&self, specs: &[TestSpec]) -> E2eResult<TestSuiteResult> {
        let started_at = Utc::now();
        let start = Instant::now();

        info!("Running {} test(s)...", specs.len());

        let mut results = Vec::new();
        let mut suites = Vec::new();
        for (suite_name, members) in TestSpec::group_by_suite(specs) {
            let (suite_results, outcome) = self.run_suite(&suite_name, &members).await;
            results.extend(suite_results);
            suites.push(outcome);
        }

        let passed = results.iter().filter(|r| r.success).count();
        let failed = results.len() - passed;
        let skipped = 0;
        let duration_ms = start.elapsed().as_millis() as u64;

        info!("");
        info!(
            "Test Results: {} passed, {} failed, {} skipped ({} ms)",
            passed, failed, skipped, duration_ms
        );

        Ok(TestSuiteResult {
            started_at,
            total: specs.len(),
            passed,
            failed,
            skipped,
            duration_ms,
            results,
            suites,
        })
    }

    async fn run_suite(&self, name: &str, specs: &[&TestSpec]) -> (Vec<TestResult>, SuiteOutcome) {
        let start = Instant::now();
        let context = Arc::new(ActiveTestContext::new());
        let asserter = SoftAsserter::new(context.clone());

        info!("Suite: {}", name);
        context.enter_suite(name);

        let mut results = Vec::with_capacity(specs.len());
        for spec in specs {
            context.enter_test(spec.name.as_str());
            let result = self.run_spec(spec, &asserter).await;
            context.leave_test();

            if result.success {
                info!("✓ {} ({} ms)", result.name, result.duration_ms);
            } else {
                error!(
                    "✗ {} - {}",
                    result.name,
                    result.error.as_deref().unwrap_or("unknown error")
                );
            }
            results.push(result);
        }

        // Suite teardown
        let soft_assertion_report = match asserter.finalize() {
            Ok(()) => None,
            Err(e) => {
                error!("{}", e);
                Some(e.report().clone())
            }
        };
        context.clear();

        let passed = results.iter().filter(|r| r.success).count();
        let outcome = SuiteOutcome {
            name: name.to_string(),
            total: results.len(),
            passed,
            failed: results.len() - passed,
            soft_assertion_report,
            duration_ms: start.elapsed().as_millis() as u64,
        };
        (results, outcome)
    }

    /// Run one spec, retrying hard failures
    ///
    /// Only the final attempt's soft checks reach the asserter.
    async fn run_spec(&self, spec: &TestSpec, asserter: &SoftAsserter) -> TestResult {
        let start = Instant::now();
        debug!("Running test: {}", spec.name);

        let failed = |attempts: u32, error: String| TestResult {
            name: spec.name.clone(),
            suite: spec.suite.clone(),
            success: false,
            duration_ms: start.elapsed().as_millis() as u64,
            attempts,
            steps: vec![],
            soft_failures: 0,
            error: Some(error),
        };

        let steps = match self.prepare_steps(spec) {
            Ok(steps) => steps,
            Err(e) => return failed(0, e.to_string()),
        };
        let viewport = spec.viewport.unwrap_or(self.config.suite.ui.viewport);
        let max_attempts = self.config.suite.retries + 1;

        let mut attempts = 0;
        let outcome = loop {
            attempts += 1;
            let outcome = match self.executor.execute(&steps, viewport).await {
                Ok(outcome) => outcome,
                Err(e) => ScriptOutcome {
                    error: Some(e.to_string()),
                    ..ScriptOutcome::default()
                },
            };

            if outcome.passed() || attempts >= max_attempts {
                break outcome;
            }
            warn!(
                "{} failed (attempt {}/{}): {}",
                spec.name,
                attempts,
                max_attempts,
                outcome.error.as_deref().unwrap_or("script did not complete")
            );
        };

        let soft_failures = outcome
            .soft_checks
            .iter()
            .filter(|soft| match steps.get(soft.step_index) {
                Some(TestStep::SoftAssert { check, message, .. }) => {
                    !apply_soft_check(asserter, check, &soft.actual, message)
                }
                _ => {
                    debug!("Soft check outcome for non soft_assert step {}", soft.step_index);
                    false
                }
            })
            .count();

        let error = match (&outcome.error, outcome.completed) {
            (Some(e), _) => Some(e.clone()),
            (None, false) => Some("script did not complete".to_string()),
            (None, true) => None,
        };

        TestResult {
            name: spec.name.clone(),
            suite: spec.suite.clone(),
            success: outcome.passed(),
            duration_ms: start.elapsed().as_millis() as u64,
            attempts,
            steps: outcome.steps,
            soft_failures,
            error,
        }
    }

    /// Spec steps with the spec's mocks installed first
    ///
    /// With mocking disabled, named mocks and inline routes are dropped.
    fn prepare_steps(&self, spec: &TestSpec) -> E2eResult<Vec<TestStep>> {
        if !self.config.suite.enable_mocking {
            let routes = spec.steps.iter().filter(|s| matches!(s, TestStep::Route(_))).count();
            if !spec.mocks.is_empty() || routes > 0 {
                info!(
                    "Mocking disabled for {}; skipping {} mock(s) in {}",
                    self.config.suite.environment,
                    spec.mocks.len() + routes,
                    spec.name
                );
            }
            return Ok(spec
                .steps
                .iter()
                .filter(|s| !matches!(s, TestStep::Route(_)))
                .cloned()
                .collect());
        }

        let mut steps = self.config.mocks.apply_many(spec.mocks.as_slice())?;
        steps.extend(spec.steps.iter().cloned());
        Ok(steps)
    }

    /// Write test results to JSON file
    pub fn write_results(&self, results: &TestSuiteResult) -> E2eResult<PathBuf> {
        std::fs::create_dir_all(&self.config.output_dir)?;

        let path = self.config.output_dir.join("test-results.json");
        let json = serde_json::to_string_pretty(results)?;
        std::fs::write(&path, json)?;

        info!("Results written to: {}", path.display());
        Ok(path)
    }
}

/// Compare an observed value with a soft check's expectation
///
/// A missing element reads as empty text, invisible and zero matches.
fn apply_soft_check(asserter: &SoftAsserter, check: &SoftCheck, actual: &Value, message: &str) -> bool {
    match check {
        SoftCheck::Text { expected } => {
            asserter.check(actual.as_str().unwrap_or_default(), expected.as_str(), message)
        }
        SoftCheck::Visible { expected } => {
            asserter.check(&actual.as_bool().unwrap_or(false), expected, message)
        }
        SoftCheck::Count { expected } => {
            asserter.check(&actual.as_u64().unwrap_or(0), &(*expected as u64), message)
        }
    }
}
