//! Playwright browser automation
//!
//! Every spec runs as one generated Node script, so browser state carries
//! over from step to step. The script reports progress on stdout as marker
//! lines (`__SWEETCHECK__ {json}`) which are parsed back into a
//! [`ScriptOutcome`].

use std::future::Future;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::str::FromStr;
use std::sync::OnceLock;
use std::time::Duration;

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sweetcheck_common::config::UiSettings;
use sweetcheck_common::Viewport;
use tokio::process::Command as TokioCommand;
use tracing::{debug, info, warn};

use crate::error::{E2eError, E2eResult};
use crate::spec::{AttributeAssertion, RouteSpec, TestStep};

/// Prefix of every progress line the generated script prints
pub const MARKER: &str = "__SWEETCHECK__";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Browser {
    #[default]
    Chromium,
    Firefox,
    Webkit,
}

impl Browser {
    pub fn as_str(&self) -> &'static str {
        match self {
            Browser::Chromium => "chromium",
            Browser::Firefox => "firefox",
            Browser::Webkit => "webkit",
        }
    }
}

impl FromStr for Browser {
    type Err = E2eError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "chromium" | "chrome" => Ok(Browser::Chromium),
            "firefox" => Ok(Browser::Firefox),
            "webkit" | "safari" => Ok(Browser::Webkit),
            other => Err(E2eError::Playwright(format!("unknown browser: {}", other))),
        }
    }
}

/// Result of executing a test step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepResult {
    pub success: bool,
    pub step_name: String,
    pub duration_ms: u64,
    pub error: Option<String>,
    pub screenshot_path: Option<PathBuf>,
}

/// Observation made by a `soft_assert` step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SoftCheckOutcome {
    /// Index of the step in the executed step list
    pub step_index: usize,

    /// Observed value: text (or null when nothing matched), visibility or
    /// match count, depending on the check kind
    pub actual: Value,
}

/// Everything one script run reported
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScriptOutcome {
    pub steps: Vec<StepResult>,
    pub soft_checks: Vec<SoftCheckOutcome>,
    /// First hard failure; no further steps ran after it
    pub error: Option<String>,
    /// The script reached its end
    pub completed: bool,
}

impl ScriptOutcome {
    pub fn passed(&self) -> bool {
        self.completed && self.error.is_none()
    }
}

/// Runs a list of steps in a fresh browser context
pub trait SpecExecutor {
    fn execute(
        &self,
        steps: &[TestStep],
        viewport: Viewport,
    ) -> impl Future<Output = E2eResult<ScriptOutcome>> + Send;
}

/// Configuration for Playwright
#[derive(Debug, Clone)]
pub struct PlaywrightConfig {
    pub base_url: String,
    pub screenshot_dir: PathBuf,
    /// Record a video per spec into this directory
    pub video_dir: Option<PathBuf>,
    pub browser: Browser,
    pub headless: bool,
    /// Default timeout for actions
    pub action_timeout_ms: u64,
    pub navigation_timeout_ms: u64,
    /// Kill the script after this long
    pub script_timeout: Duration,
    /// Directory the script runs in; `node_modules` here must provide
    /// `playwright`
    pub working_dir: PathBuf,
}

impl PlaywrightConfig {
    /// Browser settings from the suite configuration
    pub fn from_ui_settings(ui: &UiSettings, screenshot_dir: PathBuf, video_dir: PathBuf) -> Self {
        Self {
            base_url: ui.base_url.clone(),
            screenshot_dir,
            video_dir: ui.video.then_some(video_dir),
            action_timeout_ms: ui.default_command_timeout_ms,
            navigation_timeout_ms: ui.page_load_timeout_ms,
            ..Self::default()
        }
    }
}

impl Default for PlaywrightConfig {
    fn default() -> Self {
        Self {
            base_url: sweetcheck_common::config::DEFAULT_UI_BASE_URL.to_string(),
            screenshot_dir: PathBuf::from("test-results/screenshots"),
            video_dir: None,
            browser: Browser::Chromium,
            headless: true,
            action_timeout_ms: 5_000,
            navigation_timeout_ms: 30_000,
            script_timeout: Duration::from_secs(300),
            working_dir: PathBuf::from("."),
        }
    }
}

/// Playwright browser handle
#[derive(Debug, Clone)]
pub struct PlaywrightHandle {
    config: PlaywrightConfig,
}

impl PlaywrightHandle {
    /// Create a new Playwright handle
    pub fn new(config: PlaywrightConfig) -> E2eResult<Self> {
        Self::check_playwright_installed()?;
        std::fs::create_dir_all(&config.screenshot_dir)?;
        if let Some(dir) = &config.video_dir {
            std::fs::create_dir_all(dir)?;
        }
        Ok(Self { config })
    }

    /// Check if Playwright is installed
    pub fn check_playwright_installed() -> E2eResult<()> {
        let output = Command::new("npx")
            .args(["playwright", "--version"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();

        match output {
            Ok(status) if status.success() => Ok(()),
            _ => Err(E2eError::PlaywrightNotFound),
        }
    }

    pub fn config(&self) -> &PlaywrightConfig {
        &self.config
    }

    /// Run a script and parse its marker output
    pub async fn run_spec_script(&self, steps: &[TestStep], viewport: Viewport) -> E2eResult<ScriptOutcome> {
        let script = build_script(&self.config, steps, viewport);

        let temp_dir = tempfile::tempdir()?;
        let script_path = temp_dir.path().join("spec.js");
        std::fs::write(&script_path, &script)?;

        debug!("Running Playwright script: {}", script_path.display());

        let mut command = TokioCommand::new("node");
        command
            .arg(&script_path)
            .current_dir(&self.config.working_dir)
            .env("NODE_PATH", self.config.working_dir.join("node_modules"))
            .kill_on_drop(true);

        let output = tokio::time::timeout(self.config.script_timeout, command.output())
            .await
            .map_err(|_| {
                E2eError::Playwright(format!(
                    "script timed out after {} s",
                    self.config.script_timeout.as_secs()
                ))
            })??;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let mut outcome = parse_script_output(&stdout, steps, &self.config);

        if !output.status.success() && outcome.error.is_none() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            warn!("Playwright script exited with {}", output.status);
            outcome.error = Some(format!("Script failed: {}", stderr.trim()));
        }

        Ok(outcome)
    }
}

impl SpecExecutor for PlaywrightHandle {
    async fn execute(&self, steps: &[TestStep], viewport: Viewport) -> E2eResult<ScriptOutcome> {
        self.run_spec_script(steps, viewport).await
    }
}

/// Short label for a step
pub fn step_name(step: &TestStep) -> String {
    match step {
        TestStep::Navigate { url, .. } => format!("navigate:{}", url),
        TestStep::Click { selector, .. } => format!("click:{}", selector),
        TestStep::Fill { selector, .. } => format!("fill:{}", selector),
        TestStep::Type { selector, .. } => format!("type:{}", selector),
        TestStep::Press { key, .. } => format!("press:{}", key),
        TestStep::Wait { selector, .. } => format!("wait:{}", selector),
        TestStep::Sleep { ms } => format!("sleep:{}ms", ms),
        TestStep::Assert { selector, .. } => format!("assert:{}", selector),
        TestStep::SoftAssert { selector, check, .. } => {
            format!("soft_assert:{}:{}", check.kind(), selector)
        }
        TestStep::Screenshot { name, .. } => format!("screenshot:{}", name),
        TestStep::Hover { selector } => format!("hover:{}", selector),
        TestStep::Focus { selector } => format!("focus:{}", selector),
        TestStep::Select { selector, .. } => format!("select:{}", selector),
        TestStep::Check { selector } => format!("check:{}", selector),
        TestStep::Uncheck { selector } => format!("uncheck:{}", selector),
        TestStep::Evaluate { .. } => "evaluate".to_string(),
        TestStep::Log { message } => format!("log:{}", message.chars().take(30).collect::<String>()),
        TestStep::Route(route) => format!("route:{} {}", route.method, route.url),
    }
}

/// JavaScript string literal
fn js(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}

fn screenshot_path(config: &PlaywrightConfig, name: &str) -> PathBuf {
    config.screenshot_dir.join(format!("{}.png", name))
}

const SCRIPT_PRELUDE: &str = r#"
function emit(event) {
  console.log(MARKER + ' ' + JSON.stringify(event));
}

function fail(message) {
  throw new Error(message);
}

async function textOf(locator) {
  const text = await locator.first().textContent();
  return (text ?? '').trim();
}

async function observe(locator, kind) {
  try {
    if (kind === 'count') {
      return await locator.count();
    }
    await locator.first().waitFor({ state: 'attached' });
    if (kind === 'visible') {
      return await locator.first().isVisible();
    }
    return await textOf(locator);
  } catch (error) {
    return kind === 'count' ? 0 : kind === 'visible' ? false : null;
  }
}
"#;

/// Build the Playwright script for a set of steps
pub fn build_script(config: &PlaywrightConfig, steps: &[TestStep], viewport: Viewport) -> String {
    let mut context_options = json!({
        "viewport": { "width": viewport.width, "height": viewport.height }
    });
    if let Some(dir) = &config.video_dir {
        context_options["recordVideo"] = json!({
            "dir": dir.to_string_lossy(),
            "size": { "width": viewport.width, "height": viewport.height }
        });
    }

    let mut script = String::new();

    script.push_str(&format!(
        r#"const {{ chromium, firefox, webkit }} = require('playwright');
const MARKER = {marker};
{prelude}
(async () => {{
  const browser = await {browser}.launch({{ headless: {headless} }});
  const context = await browser.newContext({context_options});
  const page = await context.newPage();
  page.setDefaultTimeout({action_timeout});
  page.setDefaultNavigationTimeout({navigation_timeout});
  const baseUrl = {base_url};
  let current = -1;
  let started = 0;

  try {{
"#,
        marker = js(MARKER),
        prelude = SCRIPT_PRELUDE,
        browser = config.browser.as_str(),
        headless = config.headless,
        context_options = context_options,
        action_timeout = config.action_timeout_ms,
        navigation_timeout = config.navigation_timeout_ms,
        base_url = js(&config.base_url),
    ));

    for (i, step) in steps.iter().enumerate() {
        script.push_str(&format!("\n    // Step {}: {}\n", i + 1, step_name(step)));
        script.push_str(&format!(
            "    current = {i}; started = Date.now();\n    emit({{ event: 'step', index: {i} }});\n",
            i = i
        ));
        script.push_str(&step_to_js(config, step, i));
        script.push_str(&format!(
            "\n    emit({{ event: 'step_done', index: {}, duration_ms: Date.now() - started }});\n",
            i
        ));
    }

    script.push_str(
        r#"
    emit({ event: 'done' });
  } catch (error) {
    emit({ event: 'error', index: current, message: error.message });
    process.exitCode = 1;
  } finally {
    await context.close();
    await browser.close();
  }
})();
"#,
    );

    script
}

fn locator(selector: &str) -> String {
    format!("page.locator({})", js(selector))
}

/// Convert a step to JavaScript code
fn step_to_js(config: &PlaywrightConfig, step: &TestStep, step_index: usize) -> String {
    match step {
        TestStep::Navigate { url, wait_for_selector } => {
            let wait = wait_for_selector
                .as_ref()
                .map(|s| format!("\n    await page.waitForSelector({});", js(s)))
                .unwrap_or_default();
            format!("    await page.goto(new URL({}, baseUrl).toString());{}", js(url), wait)
        }
        TestStep::Click { selector, timeout_ms, force, nth } => {
            let mut options = json!({ "force": force });
            if let Some(timeout) = timeout_ms {
                options["timeout"] = json!(timeout);
            }
            let target = match nth {
                Some(n) => format!("{}.nth({})", locator(selector), n),
                None => locator(selector),
            };
            format!("    await {}.click({});", target, options)
        }
        TestStep::Fill { selector, value, clear_first } => {
            let clear = if *clear_first {
                format!("    await {}.fill('');\n", locator(selector))
            } else {
                String::new()
            };
            format!("{}    await {}.fill({});", clear, locator(selector), js(value))
        }
        TestStep::Type { selector, text, delay_ms } => {
            format!(
                "    await {}.pressSequentially({}, {{ delay: {} }});",
                locator(selector),
                js(text),
                delay_ms.unwrap_or(50)
            )
        }
        TestStep::Press { selector, key } => match selector {
            Some(sel) => format!("    await {}.press({});", locator(sel), js(key)),
            None => format!("    await page.keyboard.press({});", js(key)),
        },
        TestStep::Wait { selector, timeout_ms, state } => {
            format!(
                "    await {}.first().waitFor({{ state: '{}', timeout: {} }});",
                locator(selector),
                state.as_str(),
                timeout_ms
            )
        }
        TestStep::Sleep { ms } => format!("    await page.waitForTimeout({});", ms),
        TestStep::Assert { selector, visible, text, text_contains, attribute, count } => {
            assert_to_js(selector, *visible, text.as_deref(), text_contains.as_deref(), attribute.as_ref(), *count)
        }
        TestStep::SoftAssert { selector, has_text, check, .. } => {
            let target = match has_text {
                Some(text) => format!("{}.filter({{ hasText: {} }})", locator(selector), js(text)),
                None => locator(selector),
            };
            format!(
                "    emit({{ event: 'soft', index: {}, actual: await observe({}, '{}') }});",
                step_index,
                target,
                check.kind()
            )
        }
        TestStep::Screenshot { name, selector, full_page } => {
            let path = screenshot_path(config, name);
            let path = js(&path.to_string_lossy());
            match selector {
                Some(sel) => format!("    await {}.screenshot({{ path: {} }});", locator(sel), path),
                None => format!("    await page.screenshot({{ path: {}, fullPage: {} }});", path, full_page),
            }
        }
        TestStep::Hover { selector } => format!("    await {}.hover();", locator(selector)),
        TestStep::Focus { selector } => format!("    await {}.focus();", locator(selector)),
        TestStep::Select { selector, value } => {
            format!("    await {}.selectOption({});", locator(selector), js(value))
        }
        TestStep::Check { selector } => format!("    await {}.check();", locator(selector)),
        TestStep::Uncheck { selector } => format!("    await {}.uncheck();", locator(selector)),
        TestStep::Evaluate { script, expected } => {
            let body = js(&format!("(async () => {{ {} }})()", script));
            let mut code = format!("    const result_{} = await page.evaluate({});", step_index, body);
            if let Some(expected) = expected {
                code.push_str(&format!(
                    "\n    if (JSON.stringify(result_{i}) !== JSON.stringify({expected})) fail('evaluate returned ' + JSON.stringify(result_{i}) + ', expected ' + {expected_text});",
                    i = step_index,
                    expected = expected,
                    expected_text = js(&expected.to_string()),
                ));
            }
            code
        }
        TestStep::Log { message } => {
            format!("    emit({{ event: 'log', message: {} }});", js(message))
        }
        TestStep::Route(route) => route_to_js(route),
    }
}

fn assert_to_js(
    selector: &str,
    visible: Option<bool>,
    text: Option<&str>,
    text_contains: Option<&str>,
    attribute: Option<&AttributeAssertion>,
    count: Option<usize>,
) -> String {
    let target = locator(selector);
    let mut assertions = Vec::new();

    if let Some(vis) = visible {
        let state = if vis { "visible" } else { "hidden" };
        assertions.push(format!("    await {}.first().waitFor({{ state: '{}' }});", target, state));
    }

    if let Some(t) = text {
        assertions.push(format!(
            "    {{ const t = await textOf({target}); if (t !== {exp}) fail('expected text ' + JSON.stringify({exp}) + ' but found ' + JSON.stringify(t)); }}",
            target = target,
            exp = js(t)
        ));
    }

    if let Some(tc) = text_contains {
        assertions.push(format!(
            "    {{ const t = await textOf({target}); if (!t.includes({exp})) fail('expected text containing ' + JSON.stringify({exp}) + ' but found ' + JSON.stringify(t)); }}",
            target = target,
            exp = js(tc)
        ));
    }

    if let Some(attr) = attribute {
        let read = format!("await {}.first().getAttribute({})", target, js(&attr.name));
        if let Some(val) = &attr.value {
            assertions.push(format!(
                "    {{ const a = {read}; if (a !== {exp}) fail('expected attribute ' + {name} + '=' + JSON.stringify({exp}) + ' but found ' + JSON.stringify(a)); }}",
                read = read,
                exp = js(val),
                name = js(&attr.name)
            ));
        }
        if let Some(part) = &attr.contains {
            assertions.push(format!(
                "    {{ const a = {read}; if (!(a ?? '').includes({exp})) fail('expected attribute ' + {name} + ' containing ' + JSON.stringify({exp})); }}",
                read = read,
                exp = js(part),
                name = js(&attr.name)
            ));
        }
    }

    if let Some(c) = count {
        assertions.push(format!(
            "    {{ const c = await {target}.count(); if (c !== {c}) fail('expected {c} element(s) but found ' + c); }}",
            target = target,
            c = c
        ));
    }

    assertions.join("\n")
}

fn route_to_js(route: &RouteSpec) -> String {
    let mut headers = route.headers.clone();
    headers
        .entry("Content-Type".to_string())
        .or_insert_with(|| "application/json".to_string());

    let delay = route
        .delay_ms
        .map(|ms| format!("await new Promise((r) => setTimeout(r, {})); ", ms))
        .unwrap_or_default();
    let answer = if route.abort {
        "return route.abort('failed');".to_string()
    } else {
        format!(
            "return route.fulfill({{ status: {}, headers: {}, body: {} }});",
            route.status,
            json!(headers),
            js(&route.body.to_string())
        )
    };

    format!(
        "    await context.route({url}, async (route) => {{ if ({method} !== '*' && route.request().method() !== {method}) return route.fallback(); {delay}{answer} }});",
        url = js(&route.url),
        method = js(&route.method.to_ascii_uppercase()),
        delay = delay,
        answer = answer
    )
}

#[derive(Debug, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum MarkerEvent {
    Step { index: usize },
    StepDone { index: usize, duration_ms: u64 },
    Soft { index: usize, actual: Value },
    Log { message: String },
    Error { index: i64, message: String },
    Done,
}

fn marker_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"^{}\s+(\{{.*\}})\s*$", regex::escape(MARKER))).ok())
        .as_ref()
}

/// Parse the marker lines of a script run
///
/// Lines without the marker, and markers that do not decode, are ignored.
pub fn parse_script_output(stdout: &str, steps: &[TestStep], config: &PlaywrightConfig) -> ScriptOutcome {
    let mut outcome = ScriptOutcome::default();
    let Some(marker) = marker_regex() else {
        return outcome;
    };

    for line in stdout.lines() {
        let Some(captures) = marker.captures(line.trim_end()) else {
            continue;
        };
        let event: MarkerEvent = match serde_json::from_str(&captures[1]) {
            Ok(event) => event,
            Err(e) => {
                debug!("Ignoring malformed marker line: {}", e);
                continue;
            }
        };

        match event {
            MarkerEvent::Step { index } => {
                let Some(step) = steps.get(index) else { continue };
                let screenshot_path = match step {
                    TestStep::Screenshot { name, .. } => Some(screenshot_path(config, name)),
                    _ => None,
                };
                outcome.steps.push(StepResult {
                    success: true,
                    step_name: step_name(step),
                    duration_ms: 0,
                    error: None,
                    screenshot_path,
                });
            }
            MarkerEvent::StepDone { index, duration_ms } => {
                if let Some(result) = outcome.steps.last_mut() {
                    if steps.get(index).map(step_name).as_deref() == Some(result.step_name.as_str()) {
                        result.duration_ms = duration_ms;
                    }
                }
            }
            MarkerEvent::Soft { index, actual } => {
                outcome.soft_checks.push(SoftCheckOutcome { step_index: index, actual });
            }
            MarkerEvent::Log { message } => info!("[TEST LOG] {}", message),
            MarkerEvent::Error { index, message } => {
                let step = usize::try_from(index).ok().and_then(|i| steps.get(i));
                if let Some(result) = outcome.steps.last_mut() {
                    result.success = false;
                    result.error = Some(message.clone());
                    result.screenshot_path = None;
                }
                outcome.error = Some(match step {
                    Some(step) => E2eError::StepFailed {
                        step: step_name(step),
                        reason: message,
                    }
                    .to_string(),
                    None => message,
                });
            }
            MarkerEvent::Done => outcome.completed = true,
        }
    }

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::SoftCheck;
    use pretty_assertions::assert_eq;

    fn steps() -> Vec<TestStep> {
        vec![
            TestStep::Navigate { url: "/".into(), wait_for_selector: None },
            TestStep::SoftAssert {
                selector: "h6".into(),
                has_text: Some("Chocolate Cups".into()),
                check: SoftCheck::Visible { expected: true },
                message: "Product visibility should be true".into(),
            },
            TestStep::Screenshot { name: "basket".into(), selector: None, full_page: true },
        ]
    }

    #[test]
    fn test_literals_are_escaped() {
        let config = PlaywrightConfig::default();
        let step = TestStep::Fill {
            selector: "input[name='q']".into(),
            value: "it's \"quoted\"\n".into(),
            clear_first: false,
        };
        let script = build_script(&config, &[step], Viewport::default());
        assert!(script.contains(r#"page.locator("input[name='q']").fill("it's \"quoted\"\n");"#));
        assert!(script.contains("viewport\":{\"height\":1080,\"width\":1920}"));
    }

    #[test]
    fn test_script_emits_markers_per_step() {
        let config = PlaywrightConfig::default();
        let script = build_script(&config, &steps(), Viewport::default());
        assert!(script.contains("emit({ event: 'step', index: 0 });"));
        assert!(script.contains("emit({ event: 'step_done', index: 2,"));
        assert!(script.contains(
            r#"emit({ event: 'soft', index: 1, actual: await observe(page.locator("h6").filter({ hasText: "Chocolate Cups" }), 'visible') });"#
        ));
        assert!(script.contains("emit({ event: 'done' });"));
    }

    #[test]
    fn test_click_options() {
        let config = PlaywrightConfig::default();
        let step = TestStep::Click {
            selector: "button[type=\"submit\"]".into(),
            timeout_ms: None,
            force: true,
            nth: Some(0),
        };
        let js = step_to_js(&config, &step, 0);
        assert_eq!(
            js,
            r#"    await page.locator("button[type=\"submit\"]").nth(0).click({"force":true});"#
        );
    }

    #[test]
    fn test_route_abort_and_fulfill() {
        let mut route = RouteSpec {
            method: "get".into(),
            url: "**/api/users".into(),
            status: 404,
            body: json!({ "error": "Not found" }),
            headers: Default::default(),
            delay_ms: Some(10),
            abort: false,
            alias: None,
        };
        let fulfilled = route_to_js(&route);
        assert!(fulfilled.contains(r#"context.route("**/api/users""#));
        assert!(fulfilled.contains(r#"route.request().method() !== "GET""#));
        assert!(fulfilled.contains("status: 404"));
        assert!(fulfilled.contains("setTimeout(r, 10)"));

        route.abort = true;
        assert!(route_to_js(&route).contains("route.abort('failed')"));
    }

    #[test]
    fn test_parse_successful_run() {
        let config = PlaywrightConfig::default();
        let stdout = "\
noise from playwright
__SWEETCHECK__ {\"event\":\"step\",\"index\":0}
__SWEETCHECK__ {\"event\":\"step_done\",\"index\":0,\"duration_ms\":120}
__SWEETCHECK__ {\"event\":\"step\",\"index\":1}
__SWEETCHECK__ {\"event\":\"soft\",\"index\":1,\"actual\":false}
__SWEETCHECK__ {\"event\":\"step_done\",\"index\":1,\"duration_ms\":5}
__SWEETCHECK__ {\"event\":\"step\",\"index\":2}
__SWEETCHECK__ {\"event\":\"step_done\",\"index\":2,\"duration_ms\":40}
__SWEETCHECK__ {\"event\":\"done\"}
";
        let outcome = parse_script_output(stdout, &steps(), &config);
        assert!(outcome.passed());
        assert_eq!(outcome.steps.len(), 3);
        assert_eq!(outcome.steps[0].duration_ms, 120);
        assert_eq!(
            outcome.steps[2].screenshot_path,
            Some(config.screenshot_dir.join("basket.png"))
        );
        assert_eq!(
            outcome.soft_checks,
            vec![SoftCheckOutcome { step_index: 1, actual: json!(false) }]
        );
    }

    #[test]
    fn test_parse_failed_run() {
        let config = PlaywrightConfig::default();
        let stdout = "\
__SWEETCHECK__ {\"event\":\"step\",\"index\":0}
__SWEETCHECK__ {\"event\":\"error\",\"index\":0,\"message\":\"net::ERR_NAME_NOT_RESOLVED\"}
__SWEETCHECK__ {not json}
";
        let outcome = parse_script_output(stdout, &steps(), &config);
        assert!(!outcome.passed());
        assert!(!outcome.completed);
        assert_eq!(outcome.steps.len(), 1);
        assert!(!outcome.steps[0].success);
        assert_eq!(
            outcome.error.as_deref(),
            Some("Step failed: navigate:/ - net::ERR_NAME_NOT_RESOLVED")
        );
    }

    #[test]
    fn test_browser_names() {
        assert_eq!("firefox".parse::<Browser>().unwrap(), Browser::Firefox);
        assert_eq!("Chrome".parse::<Browser>().unwrap(), Browser::Chromium);
        assert!("netscape".parse::<Browser>().is_err());
    }

    #[test]
    fn test_config_from_ui_settings() {
        let ui = UiSettings::default();
        let config = PlaywrightConfig::from_ui_settings(&ui, "shots".into(), "videos".into());
        assert_eq!(config.base_url, ui.base_url);
        assert_eq!(config.video_dir, Some(PathBuf::from("videos")));
        assert_eq!(config.action_timeout_ms, ui.default_command_timeout_ms);
    }
}
