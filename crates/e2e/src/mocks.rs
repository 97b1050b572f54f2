//! Request mocking
//!
//! Mocks are named [`MockConfig`]s held by a [`MockManager`]. Applying one
//! yields a `route` step that the browser installs before the spec runs.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{E2eError, E2eResult};
use crate::fixtures::Fixtures;
use crate::spec::{RouteSpec, TestStep};

/// A canned response for requests matching `method` and `url`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MockConfig {
    pub method: String,

    /// URL glob, e.g. `**/api/users`
    pub url: String,

    #[serde(default)]
    pub response: Value,

    #[serde(default = "default_status_code")]
    pub status_code: u16,

    #[serde(default)]
    pub delay_ms: Option<u64>,

    #[serde(default = "default_headers")]
    pub headers: BTreeMap<String, String>,

    #[serde(default)]
    pub alias: Option<String>,

    /// Fail the request at the network level
    #[serde(default)]
    pub force_network_error: bool,
}

fn default_status_code() -> u16 {
    200
}

fn default_headers() -> BTreeMap<String, String> {
    BTreeMap::from([("Content-Type".to_string(), "application/json".to_string())])
}

impl MockConfig {
    pub fn new(method: impl Into<String>, url: impl Into<String>, response: Value) -> Self {
        Self {
            method: method.into(),
            url: url.into(),
            response,
            status_code: default_status_code(),
            delay_ms: None,
            headers: default_headers(),
            alias: None,
            force_network_error: false,
        }
    }

    pub fn with_status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay_ms = Some(delay_ms);
        self
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Route step for this mock; `fallback_alias` names it when no alias
    /// is set
    pub fn to_step(&self, fallback_alias: &str) -> TestStep {
        TestStep::Route(RouteSpec {
            method: self.method.clone(),
            url: self.url.clone(),
            status: self.status_code,
            body: self.response.clone(),
            headers: self.headers.clone(),
            delay_ms: self.delay_ms,
            abort: self.force_network_error,
            alias: Some(self.alias.clone().unwrap_or_else(|| fallback_alias.to_string())),
        })
    }
}

/// Named registry of mocks
#[derive(Debug, Clone, Default)]
pub struct MockManager {
    mocks: HashMap<String, MockConfig>,
}

impl MockManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a mock, replacing any mock of the same name
    pub fn register(&mut self, name: impl Into<String>, config: MockConfig) {
        self.mocks.insert(name.into(), config);
    }

    /// Route step for a registered mock
    pub fn apply(&self, name: &str) -> E2eResult<TestStep> {
        let config = self
            .mocks
            .get(name)
            .ok_or_else(|| E2eError::UnknownMock(name.to_string()))?;
        debug!("Applying mock {} ({} {})", name, config.method, config.url);
        Ok(config.to_step(name))
    }

    /// Route steps for several mocks, failing on the first unknown name
    pub fn apply_many<S: AsRef<str>>(&self, names: &[S]) -> E2eResult<Vec<TestStep>> {
        names.iter().map(|name| self.apply(name.as_ref())).collect()
    }

    pub fn clear(&mut self) {
        self.mocks.clear();
    }

    pub fn get(&self, name: &str) -> Option<&MockConfig> {
        self.mocks.get(name)
    }

    pub fn has(&self, name: &str) -> bool {
        self.mocks.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.mocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mocks.is_empty()
    }

    /// Manager preloaded with the stock mocks built from the mock fixtures
    ///
    /// | name | route |
    /// |------|-------|
    /// | `getUsers` | `GET **/api/users` → users fixture |
    /// | `getPosts` | `GET **/api/posts` → posts fixture |
    /// | `getUserError` | `GET **/api/users/999` → 404 |
    /// | `serverError` | `GET **/api/users` → 500 |
    /// | `emptyUsers` | `GET **/api/users` → `[]` |
    /// | `networkError` | `GET **/api/users` aborted |
    pub fn with_fixture_mocks(fixtures: &Fixtures) -> E2eResult<Self> {
        let users = fixtures.load_value("mocks/success/users")?;
        let posts = fixtures.load_value("mocks/success/posts")?;
        let not_found = fixtures.load_value("mocks/error/notFound")?;
        let server_error = fixtures.load_value("mocks/error/serverError")?;
        let empty = fixtures.load_value("mocks/empty/emptyArray")?;

        let message = |value: &Value| {
            value
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let mut manager = Self::new();
        manager.register("getUsers", MockConfig::new("GET", "**/api/users", users));
        manager.register("getPosts", MockConfig::new("GET", "**/api/posts", posts));
        manager.register(
            "getUserError",
            MockConfig::new("GET", "**/api/users/999", json!({ "error": message(&not_found) }))
                .with_status(404),
        );
        manager.register(
            "serverError",
            MockConfig::new("GET", "**/api/users", json!({ "error": message(&server_error) }))
                .with_status(500),
        );
        manager.register("emptyUsers", MockConfig::new("GET", "**/api/users", empty));
        manager.register(
            "networkError",
            MockConfig {
                force_network_error: true,
                ..MockConfig::new("GET", "**/api/users", Value::Null)
            },
        );
        Ok(manager)
    }
}

/// Route step for an ad-hoc mock
pub fn mock_api(config: &MockConfig) -> TestStep {
    config.to_step("apiMock")
}

/// 200 response with `response` as body
pub fn mock_success(method: &str, url: &str, response: Value, alias: Option<&str>) -> TestStep {
    let mut config = MockConfig::new(method, url, response);
    config.alias = alias.map(str::to_string);
    mock_api(&config)
}

/// Error response with body `{"error": <message>}`
pub fn mock_error(
    method: &str,
    url: &str,
    status_code: u16,
    error_message: &str,
    alias: Option<&str>,
) -> TestStep {
    let mut config =
        MockConfig::new(method, url, json!({ "error": error_message })).with_status(status_code);
    config.alias = alias.map(str::to_string);
    mock_api(&config)
}

/// 200 response with an empty JSON array
pub fn mock_empty(method: &str, url: &str, alias: Option<&str>) -> TestStep {
    mock_success(method, url, json!([]), alias)
}

/// Abort matching requests with a network error
pub fn mock_network_failure(method: &str, url: &str, alias: Option<&str>) -> TestStep {
    let config = MockConfig {
        force_network_error: true,
        alias: alias.map(str::to_string),
        ..MockConfig::new(method, url, Value::Null)
    };
    config.to_step("networkError")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn route(step: TestStep) -> RouteSpec {
        match step {
            TestStep::Route(route) => route,
            other => panic!("expected route step, got {:?}", other),
        }
    }

    #[test]
    fn test_register_and_apply() {
        let mut manager = MockManager::new();
        manager.register(
            "getUsers",
            MockConfig::new("GET", "**/api/users", json!([{ "id": 1 }])).with_delay(2000),
        );

        assert!(manager.has("getUsers"));
        assert_eq!(manager.get("getUsers").map(|m| m.status_code), Some(200));

        let route = route(manager.apply("getUsers").unwrap());
        assert_eq!(route.url, "**/api/users");
        assert_eq!(route.status, 200);
        assert_eq!(route.delay_ms, Some(2000));
        assert_eq!(route.alias.as_deref(), Some("getUsers"));
        assert_eq!(
            route.headers.get("Content-Type").map(String::as_str),
            Some("application/json")
        );
    }

    #[test]
    fn test_unknown_mock_fails_fast() {
        let mut manager = MockManager::new();
        manager.register("a", MockConfig::new("GET", "**/a", Value::Null));

        let err = manager.apply_many(&["a", "missing"]).unwrap_err();
        assert!(matches!(err, E2eError::UnknownMock(ref name) if name == "missing"));
        assert_eq!(err.to_string(), "Mock \"missing\" not found");
    }

    #[test]
    fn test_clear() {
        let mut manager = MockManager::new();
        manager.register("a", MockConfig::new("GET", "**/a", Value::Null));
        manager.clear();
        assert!(manager.is_empty());
        assert!(!manager.has("a"));
    }

    #[test]
    fn test_helpers() {
        let error = route(mock_error("GET", "**/api/users/999", 404, "Resource not found", None));
        assert_eq!(error.status, 404);
        assert_eq!(error.body, json!({ "error": "Resource not found" }));
        assert_eq!(error.alias.as_deref(), Some("apiMock"));

        let empty = route(mock_empty("GET", "**/api/users", Some("emptyUsers")));
        assert_eq!(empty.body, json!([]));
        assert_eq!(empty.alias.as_deref(), Some("emptyUsers"));

        let failure = route(mock_network_failure("GET", "**/api/users", None));
        assert!(failure.abort);
        assert_eq!(failure.alias.as_deref(), Some("networkError"));
    }

    #[test]
    fn test_fixture_mocks() {
        let manager = MockManager::with_fixture_mocks(&Fixtures::bundled()).unwrap();
        assert_eq!(manager.len(), 6);
        assert_eq!(manager.get("serverError").map(|m| m.status_code), Some(500));
        assert_eq!(manager.get("emptyUsers").map(|m| m.response.clone()), Some(json!([])));
        assert!(manager.get("networkError").is_some_and(|m| m.force_network_error));
    }

    #[test]
    fn test_mock_config_from_yaml() {
        let config: MockConfig =
            serde_yaml::from_str("method: POST\nurl: '**/api/users'\nstatus_code: 201\n").unwrap();
        assert_eq!(config.status_code, 201);
        assert_eq!(config.response, Value::Null);
        assert!(config.headers.contains_key("Content-Type"));
    }
}
