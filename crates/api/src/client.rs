//! HTTP clients for the mock REST API

use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use sweetcheck_common::config::DEFAULT_API_BASE_URL;
use sweetcheck_common::SuiteConfig;
use tracing::{debug, warn};

use crate::error::{ApiError, ApiResult};
use crate::types::*;

/// Default request timeout when no configuration is supplied
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

const AUTHORIZATION: &str = "authorization";

/// Generic JSON-over-HTTP client
///
/// Holds the base URL, the default headers every request starts from and a
/// default timeout. Requests are described by [`RequestConfig`].
#[derive(Debug, Clone)]
pub struct BaseApiClient {
    http: reqwest::Client,
    base_url: String,
    default_headers: BTreeMap<String, String>,
    default_timeout: Duration,
}

impl BaseApiClient {
    /// Create a client for `base_url` with JSON default headers
    pub fn new(base_url: impl Into<String>) -> ApiResult<Self> {
        let http = reqwest::Client::builder().build()?;
        let default_headers = BTreeMap::from([
            ("content-type".to_string(), "application/json".to_string()),
            ("accept".to_string(), "application/json".to_string()),
        ]);

        Ok(Self {
            http,
            base_url: base_url.into(),
            default_headers,
            default_timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Create a client from the suite configuration
    pub fn from_config(config: &SuiteConfig) -> ApiResult<Self> {
        Ok(Self::new(config.api.base_url.clone())?
            .with_timeout(Duration::from_millis(config.api.timeout_ms)))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Execute a request and decode the JSON body into `T`
    ///
    /// Empty bodies decode as JSON `null`.
    pub async fn request<T: DeserializeOwned>(&self, config: RequestConfig) -> ApiResult<ApiResponse<T>> {
        let url = format!("{}{}", self.base_url, config.path);
        let parsed = reqwest::Url::parse(&url).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", url, e)))?;

        let headers = self.request_headers(&config);

        let mut builder = self
            .http
            .request(config.method.into(), parsed)
            .timeout(config.timeout.unwrap_or(self.default_timeout));
        if let Some(Auth::Basic { username, password }) = &config.auth {
            builder = builder.basic_auth(username, Some(password));
        }

        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if !config.query.is_empty() {
            builder = builder.query(&config.query);
        }
        if let Some(body) = &config.body {
            builder = builder.json(body);
        }

        let start = Instant::now();
        let response = builder.send().await?;
        let status = response.status().as_u16();
        let response_headers: BTreeMap<String, String> = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_ascii_lowercase(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let bytes = response.bytes().await?;
        let duration = start.elapsed();

        debug!(
            "{} {} -> {} ({} ms)",
            config.method,
            url,
            status,
            duration.as_millis()
        );

        if config.fail_on_status_code && !(200..400).contains(&status) {
            warn!("{} {} failed with status {}", config.method, url, status);
            return Err(ApiError::UnexpectedStatus {
                method: config.method.to_string(),
                url,
                status,
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let body = if bytes.iter().all(u8::is_ascii_whitespace) {
            serde_json::from_value(Value::Null)?
        } else {
            serde_json::from_slice(&bytes)?
        };

        Ok(ApiResponse {
            status,
            body,
            headers: response_headers,
            duration,
        })
    }

    /// GET request
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<T>> {
        self.request(RequestConfig::new(HttpMethod::Get, path)).await
    }

    /// POST request
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiResponse<T>> {
        let body = serde_json::to_value(body)?;
        self.request(RequestConfig::new(HttpMethod::Post, path).body(body)).await
    }

    /// PUT request
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiResponse<T>> {
        let body = serde_json::to_value(body)?;
        self.request(RequestConfig::new(HttpMethod::Put, path).body(body)).await
    }

    /// PATCH request
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<ApiResponse<T>> {
        let body = serde_json::to_value(body)?;
        self.request(RequestConfig::new(HttpMethod::Patch, path).body(body)).await
    }

    /// DELETE request
    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> ApiResult<ApiResponse<T>> {
        self.request(RequestConfig::new(HttpMethod::Delete, path)).await
    }

    /// Default headers overlaid with the request's own, keyed by lowercase
    /// name. Per-request auth replaces any default `authorization`.
    fn request_headers(&self, config: &RequestConfig) -> BTreeMap<String, String> {
        let mut headers = self.default_headers.clone();
        headers.extend(
            config
                .headers
                .iter()
                .map(|(name, value)| (name.to_ascii_lowercase(), value.clone())),
        );

        match &config.auth {
            Some(Auth::Bearer(token)) => {
                headers.insert(AUTHORIZATION.to_string(), format!("Bearer {}", token));
            }
            // basic_auth adds its own header on the builder
            Some(Auth::Basic { .. }) => {
                headers.remove(AUTHORIZATION);
            }
            None => {}
        }
        headers
    }

    /// Set or update default headers. Names are case-insensitive.
    pub fn set_headers<I, K, V>(&mut self, headers: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.default_headers.extend(
            headers
                .into_iter()
                .map(|(k, v)| (k.into().to_ascii_lowercase(), v.into())),
        );
    }

    /// Send a bearer token with every request
    pub fn set_auth_token(&mut self, token: &str) {
        self.set_headers([("Authorization", format!("Bearer {}", token))]);
    }

    /// Stop sending the authorization header
    pub fn remove_auth(&mut self) {
        self.default_headers.remove(AUTHORIZATION);
    }

    /// Default headers, keyed by lowercase name
    pub fn default_headers(&self) -> &BTreeMap<String, String> {
        &self.default_headers
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Typed client for the JSONPlaceholder endpoints
#[derive(Debug, Clone)]
pub struct ApiClient {
    base: BaseApiClient,
}

impl ApiClient {
    /// Client against the public JSONPlaceholder API
    pub fn new() -> ApiResult<Self> {
        Self::with_base_url(DEFAULT_API_BASE_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> ApiResult<Self> {
        Ok(Self {
            base: BaseApiClient::new(base_url)?,
        })
    }

    pub fn from_config(config: &SuiteConfig) -> ApiResult<Self> {
        Ok(Self {
            base: BaseApiClient::from_config(config)?,
        })
    }

    pub fn base(&self) -> &BaseApiClient {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut BaseApiClient {
        &mut self.base
    }

    /// Arbitrary request with an untyped body, for negative tests
    pub async fn request_value(&self, config: RequestConfig) -> ApiResult<ApiResponse<Value>> {
        self.base.request(config).await
    }

    // ==================== User Endpoints ====================

    pub async fn get_users(&self) -> ApiResult<ApiResponse<Vec<User>>> {
        self.base.get("/users").await
    }

    pub async fn get_user(&self, user_id: u64) -> ApiResult<ApiResponse<User>> {
        self.base.get(&format!("/users/{}", user_id)).await
    }

    pub async fn create_user(&self, user: &UserDraft) -> ApiResult<ApiResponse<User>> {
        self.base.post("/users", user).await
    }

    /// Full update (PUT)
    pub async fn update_user(&self, user_id: u64, user: &UserDraft) -> ApiResult<ApiResponse<User>> {
        self.base.put(&format!("/users/{}", user_id), user).await
    }

    /// Partial update (PATCH). The response echoes the merged user.
    pub async fn patch_user(&self, user_id: u64, user: &UserDraft) -> ApiResult<ApiResponse<Value>> {
        self.base.patch(&format!("/users/{}", user_id), user).await
    }

    pub async fn delete_user(&self, user_id: u64) -> ApiResult<ApiResponse<Value>> {
        self.base.delete(&format!("/users/{}", user_id)).await
    }

    // ==================== Post Endpoints ====================

    pub async fn get_posts(&self) -> ApiResult<ApiResponse<Vec<Post>>> {
        self.base.get("/posts").await
    }

    pub async fn get_post(&self, post_id: u64) -> ApiResult<ApiResponse<Post>> {
        self.base.get(&format!("/posts/{}", post_id)).await
    }

    pub async fn get_posts_by_user(&self, user_id: u64) -> ApiResult<ApiResponse<Vec<Post>>> {
        self.base
            .request(RequestConfig::new(HttpMethod::Get, "/posts").query("userId", user_id))
            .await
    }

    pub async fn create_post(&self, post: &PostDraft) -> ApiResult<ApiResponse<Post>> {
        self.base.post("/posts", post).await
    }

    pub async fn update_post(&self, post_id: u64, post: &PostDraft) -> ApiResult<ApiResponse<Post>> {
        self.base.put(&format!("/posts/{}", post_id), post).await
    }

    pub async fn delete_post(&self, post_id: u64) -> ApiResult<ApiResponse<Value>> {
        self.base.delete(&format!("/posts/{}", post_id)).await
    }

    // ==================== Comment Endpoints ====================

    pub async fn get_comments(&self) -> ApiResult<ApiResponse<Vec<Comment>>> {
        self.base.get("/comments").await
    }

    pub async fn get_comments_by_post(&self, post_id: u64) -> ApiResult<ApiResponse<Vec<Comment>>> {
        self.base.get(&format!("/posts/{}/comments", post_id)).await
    }

    pub async fn create_comment(&self, comment: &CommentDraft) -> ApiResult<ApiResponse<Comment>> {
        self.base.post("/comments", comment).await
    }

    // ==================== Todo Endpoints ====================

    pub async fn get_todos(&self) -> ApiResult<ApiResponse<Vec<Todo>>> {
        self.base.get("/todos").await
    }

    pub async fn get_todo(&self, todo_id: u64) -> ApiResult<ApiResponse<Todo>> {
        self.base.get(&format!("/todos/{}", todo_id)).await
    }

    pub async fn get_todos_by_user(&self, user_id: u64) -> ApiResult<ApiResponse<Vec<Todo>>> {
        self.base
            .request(RequestConfig::new(HttpMethod::Get, "/todos").query("userId", user_id))
            .await
    }

    pub async fn create_todo(&self, todo: &TodoDraft) -> ApiResult<ApiResponse<Todo>> {
        self.base.post("/todos", todo).await
    }

    pub async fn update_todo(&self, todo_id: u64, todo: &TodoDraft) -> ApiResult<ApiResponse<Todo>> {
        self.base.put(&format!("/todos/{}", todo_id), todo).await
    }

    pub async fn delete_todo(&self, todo_id: u64) -> ApiResult<ApiResponse<Value>> {
        self.base.delete(&format!("/todos/{}", todo_id)).await
    }

    // ==================== Album Endpoints ====================

    pub async fn get_albums(&self) -> ApiResult<ApiResponse<Vec<Album>>> {
        self.base.get("/albums").await
    }

    pub async fn get_album(&self, album_id: u64) -> ApiResult<ApiResponse<Album>> {
        self.base.get(&format!("/albums/{}", album_id)).await
    }

    pub async fn get_photos_by_album(&self, album_id: u64) -> ApiResult<ApiResponse<Vec<Photo>>> {
        self.base.get(&format!("/albums/{}/photos", album_id)).await
    }
}
