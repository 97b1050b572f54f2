//! Declarative YAML test specification

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use sweetcheck_common::Viewport;

use crate::error::{E2eError, E2eResult};

/// Suite a spec belongs to when it names none
pub const DEFAULT_SUITE: &str = "default";

/// A complete test specification parsed from YAML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestSpec {
    /// Unique name for this test
    pub name: String,

    /// Suite the test reports under; soft assertion failures are
    /// aggregated per suite
    #[serde(default = "default_suite")]
    pub suite: String,

    /// Human-readable description
    #[serde(default)]
    pub description: String,

    /// Tags for filtering tests
    #[serde(default)]
    pub tags: Vec<String>,

    /// Viewport size; the configured UI viewport when unset
    #[serde(default)]
    pub viewport: Option<Viewport>,

    /// Steps to execute in order
    pub steps: Vec<TestStep>,

    /// Registered mocks to install before the first step
    #[serde(default)]
    pub mocks: Vec<String>,
}

fn default_suite() -> String {
    DEFAULT_SUITE.to_string()
}

/// A single step in a test
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TestStep {
    /// Navigate to a URL (relative to base)
    Navigate {
        url: String,
        #[serde(default)]
        wait_for_selector: Option<String>,
    },

    /// Click an element
    Click {
        selector: String,
        #[serde(default)]
        timeout_ms: Option<u64>,
        /// Skip actionability checks
        #[serde(default)]
        force: bool,
        /// Pick the n-th match (0-based)
        #[serde(default)]
        nth: Option<usize>,
    },

    /// Fill an input field
    Fill {
        selector: String,
        value: String,
        #[serde(default)]
        clear_first: bool,
    },

    /// Type text with keyboard simulation
    Type {
        selector: String,
        text: String,
        #[serde(default)]
        delay_ms: Option<u64>,
    },

    /// Press a key
    Press {
        #[serde(default)]
        selector: Option<String>,
        key: String,
    },

    /// Wait for an element to reach a state
    Wait {
        selector: String,
        #[serde(default = "default_wait_timeout")]
        timeout_ms: u64,
        #[serde(default)]
        state: WaitState,
    },

    /// Wait for a fixed amount of time (use sparingly)
    Sleep {
        ms: u64,
    },

    /// Assert something about an element; a failure stops the test
    Assert {
        selector: String,
        #[serde(default)]
        visible: Option<bool>,
        #[serde(default)]
        text: Option<String>,
        #[serde(default)]
        text_contains: Option<String>,
        #[serde(default)]
        attribute: Option<AttributeAssertion>,
        #[serde(default)]
        count: Option<usize>,
    },

    /// Observe an element and compare it; a mismatch is recorded and the
    /// test carries on
    SoftAssert {
        selector: String,
        /// Narrow the selector to elements containing this text
        #[serde(default)]
        has_text: Option<String>,
        check: SoftCheck,
        message: String,
    },

    /// Take a screenshot
    Screenshot {
        name: String,
        #[serde(default)]
        selector: Option<String>,
        #[serde(default)]
        full_page: bool,
    },

    /// Hover over an element
    Hover {
        selector: String,
    },

    /// Focus an element
    Focus {
        selector: String,
    },

    /// Select an option from a dropdown by value or label
    Select {
        selector: String,
        value: String,
    },

    /// Check a checkbox
    Check {
        selector: String,
    },

    /// Uncheck a checkbox
    Uncheck {
        selector: String,
    },

    /// Execute custom JavaScript in the page
    Evaluate {
        script: String,
        #[serde(default)]
        expected: Option<serde_json::Value>,
    },

    /// Log a message (for debugging)
    Log {
        message: String,
    },

    /// Intercept matching requests for the rest of the test
    Route(RouteSpec),
}

fn default_wait_timeout() -> u64 {
    5000
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaitState {
    #[default]
    Visible,
    Hidden,
    Attached,
    Detached,
}

impl WaitState {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaitState::Visible => "visible",
            WaitState::Hidden => "hidden",
            WaitState::Attached => "attached",
            WaitState::Detached => "detached",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeAssertion {
    pub name: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub contains: Option<String>,
}

/// What a soft assertion observes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SoftCheck {
    /// Trimmed text content of the first match
    Text { expected: String },
    /// Visibility of the first match
    Visible { expected: bool },
    /// Number of matches
    Count { expected: usize },
}

impl SoftCheck {
    pub fn kind(&self) -> &'static str {
        match self {
            SoftCheck::Text { .. } => "text",
            SoftCheck::Visible { .. } => "visible",
            SoftCheck::Count { .. } => "count",
        }
    }
}

/// Request interception rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteSpec {
    /// HTTP method to match, `*` for any
    #[serde(default = "default_route_method")]
    pub method: String,

    /// URL glob, e.g. `**/api/users`
    pub url: String,

    #[serde(default = "default_status")]
    pub status: u16,

    /// JSON body of the fulfilled response
    #[serde(default)]
    pub body: serde_json::Value,

    #[serde(default)]
    pub headers: BTreeMap<String, String>,

    #[serde(default)]
    pub delay_ms: Option<u64>,

    /// Fail the request at the network level instead of answering it
    #[serde(default)]
    pub abort: bool,

    /// Name used in logs
    #[serde(default)]
    pub alias: Option<String>,
}

fn default_route_method() -> String {
    "*".to_string()
}

fn default_status() -> u16 {
    200
}

impl TestSpec {
    /// Parse a test spec from YAML string
    pub fn from_yaml(yaml: &str) -> E2eResult<Self> {
        let spec: Self = serde_yaml::from_str(yaml)?;
        spec.validate()?;
        Ok(spec)
    }

    /// Parse a test spec from a YAML file
    pub fn from_file(path: &Path) -> E2eResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
            .map_err(|e| E2eError::SpecParse(format!("{}: {}", path.display(), e)))
    }

    /// Load all test specs from a directory, ordered by path
    pub fn load_all(dir: &Path) -> E2eResult<Vec<Self>> {
        let mut paths: Vec<_> = walkdir::WalkDir::new(dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .map(|e| e.into_path())
            .filter(|p| {
                p.extension()
                    .map(|ext| ext == "yaml" || ext == "yml")
                    .unwrap_or(false)
            })
            .collect();
        paths.sort();

        paths.iter().map(|p| Self::from_file(p)).collect()
    }

    /// Filter specs by tag
    pub fn filter_by_tag<'a>(specs: &'a [Self], tag: &str) -> Vec<&'a Self> {
        specs.iter().filter(|s| s.has_tag(tag)).collect()
    }

    /// Group specs by suite, suites in order of first appearance
    pub fn group_by_suite(specs: &[Self]) -> Vec<(String, Vec<&Self>)> {
        let mut groups: Vec<(String, Vec<&Self>)> = Vec::new();
        for spec in specs {
            match groups.iter_mut().find(|(suite, _)| *suite == spec.suite) {
                Some((_, members)) => members.push(spec),
                None => groups.push((spec.suite.clone(), vec![spec])),
            }
        }
        groups
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Reject specs that cannot run
    pub fn validate(&self) -> E2eResult<()> {
        if self.name.trim().is_empty() {
            return Err(E2eError::SpecParse("spec name must not be empty".to_string()));
        }
        if self.steps.is_empty() {
            return Err(E2eError::SpecParse(format!("spec '{}' has no steps", self.name)));
        }
        Ok(())
    }
}
