//! Suite configuration per target environment

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::{Error, Result};

/// Public mock REST API
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Demo storefront
pub const DEFAULT_UI_BASE_URL: &str = "https://sweetshop.netlify.app";

/// Target environment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Dev,
    Staging,
    Prod,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Dev => "dev",
            Environment::Staging => "staging",
            Environment::Prod => "prod",
        }
    }

    /// Prefix of the environment variables that override this environment's
    /// URLs (`STAGING_API_BASE_URL`, ...). Dev reads the plain names only.
    fn override_prefix(&self) -> Option<&'static str> {
        match self {
            Environment::Dev => None,
            Environment::Staging => Some("STAGING_"),
            Environment::Prod => Some("PROD_"),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Environment {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dev" | "development" => Ok(Environment::Dev),
            "staging" => Ok(Environment::Staging),
            "prod" | "production" => Ok(Environment::Prod),
            other => Err(Error::UnknownEnvironment(other.to_string())),
        }
    }
}

/// Browser viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        Self { width: 1920, height: 1080 }
    }
}

/// REST API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSettings {
    /// Base URL every request path is appended to
    pub base_url: String,

    /// Default per-request timeout
    pub timeout_ms: u64,
}

impl Default for ApiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_ms: 10_000,
        }
    }
}

/// Browser settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// Storefront base URL
    pub base_url: String,

    /// Timeout for individual browser actions
    pub default_command_timeout_ms: u64,

    /// Timeout for page navigation
    pub page_load_timeout_ms: u64,

    /// Record a video of each spec
    pub video: bool,

    pub viewport: Viewport,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UI_BASE_URL.to_string(),
            viewport: Viewport::default(),
            default_command_timeout_ms: 5_000,
            page_load_timeout_ms: 30_000,
            video: true,
        }
    }
}

/// Configuration shared by the UI and API suites
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SuiteConfig {
    pub environment: Environment,

    /// Apply request mocks in UI specs
    pub enable_mocking: bool,

    /// Timeout for HTTP requests issued by specs
    pub request_timeout_ms: u64,

    /// Extra attempts for a test that failed hard
    pub retries: u32,

    /// Root for screenshots, videos and results
    pub reports_dir: PathBuf,

    /// Directory of declarative UI specs
    pub specs_dir: PathBuf,

    pub api: ApiSettings,

    pub ui: UiSettings,
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self::for_environment(Environment::Dev)
    }
}

impl SuiteConfig {
    /// Preset for an environment
    pub fn for_environment(environment: Environment) -> Self {
        let (api_timeout_ms, request_timeout_ms, retries) = match environment {
            Environment::Dev | Environment::Staging => (10_000, 10_000, 0),
            Environment::Prod => (15_000, 15_000, 2),
        };

        Self {
            environment,
            // Mocks never run against shared environments
            enable_mocking: environment == Environment::Dev,
            request_timeout_ms,
            retries,
            reports_dir: PathBuf::from("reports").join(environment.as_str()),
            specs_dir: PathBuf::from("specs"),
            api: ApiSettings {
                timeout_ms: api_timeout_ms,
                ..ApiSettings::default()
            },
            ui: UiSettings::default(),
        }
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply overrides from the process environment
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup
    ///
    /// `TEST_ENV` switches to that environment's preset first; the URL,
    /// timeout and mocking variables are then layered on top.
    pub fn apply_overrides_from<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(env) = lookup("TEST_ENV") {
            let environment: Environment = env.parse()?;
            if environment != self.environment {
                debug!("Switching suite config to {} preset", environment);
                *self = Self::for_environment(environment);
            }
        }

        let prefix = self.environment.override_prefix().unwrap_or("");
        let scoped = |name: &str| {
            lookup(&format!("{}{}", prefix, name)).or_else(|| lookup(name))
        };

        if let Some(url) = scoped("API_BASE_URL") {
            self.api.base_url = url;
        }
        if let Some(url) = scoped("UI_BASE_URL") {
            self.ui.base_url = url;
        }
        if let Some(timeout) = lookup("API_TIMEOUT") {
            self.api.timeout_ms = timeout.trim().parse().map_err(|_| {
                Error::InvalidConfig(format!("API_TIMEOUT is not a number: {}", timeout))
            })?;
        }
        if let Some(flag) = lookup("ENABLE_MOCKING") {
            self.enable_mocking = parse_flag(&flag).ok_or_else(|| {
                Error::InvalidConfig(format!("ENABLE_MOCKING is not a boolean: {}", flag))
            })?;
        }

        self.validate()
    }

    /// Reject configurations that cannot drive a run
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [("api.base_url", &self.api.base_url), ("ui.base_url", &self.ui.base_url)] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::InvalidConfig(format!(
                    "{} must be an http(s) URL, got {:?}",
                    name, url
                )));
            }
        }

        for (name, value) in [
            ("api.timeout_ms", self.api.timeout_ms),
            ("request_timeout_ms", self.request_timeout_ms),
            ("ui.default_command_timeout_ms", self.ui.default_command_timeout_ms),
            ("ui.page_load_timeout_ms", self.ui.page_load_timeout_ms),
        ] {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{} must be greater than zero", name)));
            }
        }

        if self.environment == Environment::Prod && self.enable_mocking {
            return Err(Error::InvalidConfig(
                "request mocking cannot be enabled against prod".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the screenshots directory
    pub fn screenshots_dir(&self) -> PathBuf {
        self.reports_dir.join("screenshots")
    }

    /// Get the videos directory
    pub fn videos_dir(&self) -> PathBuf {
        self.reports_dir.join("videos")
    }

    /// Get the results directory
    pub fn results_dir(&self) -> PathBuf {
        self.reports_dir.join("results")
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
