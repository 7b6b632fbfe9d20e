use crate::error::{Error, Result};
use crate::request::ResourceRequest;
use base64::Engine;
use reqwest::{Client, Method, Response, header};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_API_VERSION: u32 = 3;

/// Applies to each round trip, not to a whole paginated operation.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct Auth {
    pub username: String,
    pub api_token: String,
}

impl Auth {
    pub fn basic(username: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_token: api_token.into(),
        }
    }

    fn header_value(&self) -> Result<header::HeaderValue> {
        let raw = format!("{}:{}", self.username, self.api_token);
        let encoded = base64::engine::general_purpose::STANDARD.encode(raw.as_bytes());
        let mut value = header::HeaderValue::from_str(&format!("Basic {encoded}"))
            .map_err(|_| Error::InvalidConfiguration("Invalid auth header".to_string()))?;
        value.set_sensitive(true);
        Ok(value)
    }
}

impl fmt::Debug for Auth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Auth")
            .field("username", &self.username)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// Transport-level retry for idempotent requests. HTTP error statuses are
/// never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub backoff_factor: Duration,
}

impl RetryPolicy {
    pub const fn none() -> Self {
        Self {
            max_retries: 0,
            backoff_factor: Duration::ZERO,
        }
    }

    /// Whether a request that failed with `err` after `attempt` retries is
    /// sent again. Only GET and PUT, and only on connect or timeout errors.
    pub(crate) fn should_retry(
        &self,
        method: &Method,
        err: &reqwest::Error,
        attempt: u32,
    ) -> bool {
        let idempotent = *method == Method::GET || *method == Method::PUT;
        idempotent && attempt < self.max_retries && (err.is_connect() || err.is_timeout())
    }

    /// Delay before the `attempt`-th retry (1-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(16);
        self.backoff_factor.saturating_mul(1u32 << exponent)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 3,
            backoff_factor: Duration::from_secs(1),
        }
    }
}

#[derive(Debug, Clone)]
pub struct JiraConfig {
    pub base_url: Url,
    pub auth: Auth,
    pub retry: RetryPolicy,
}

impl JiraConfig {
    /// Accepts any base URL, e.g. `https://your-domain.atlassian.net/rest/api/3/`.
    pub fn new(base_url: impl Into<String>, auth: Auth) -> Result<Self> {
        let base_url = base_url.into();

        let mut parsed = Url::parse(&base_url)
            .map_err(|_| Error::InvalidConfiguration("Invalid base URL".to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") || parsed.cannot_be_a_base() {
            return Err(Error::InvalidConfiguration("Invalid base URL".to_string()));
        }
        // Without the trailing slash `join` would replace the last segment.
        if !parsed.path().ends_with('/') {
            let path = format!("{}/", parsed.path());
            parsed.set_path(&path);
        }

        Ok(Self {
            base_url: parsed,
            auth,
            retry: RetryPolicy::default(),
        })
    }

    /// `your-domain` in `https://your-domain.atlassian.net/`.
    pub fn cloud(domain: &str, auth: Auth) -> Result<Self> {
        Self::cloud_with_version(domain, auth, DEFAULT_API_VERSION)
    }

    pub fn cloud_with_version(domain: &str, auth: Auth, api_version: u32) -> Result<Self> {
        let valid = !domain.is_empty()
            && !domain.starts_with('-')
            && domain
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-');
        if !valid {
            return Err(Error::InvalidConfiguration(format!(
                "Invalid Atlassian cloud domain: {domain:?}"
            )));
        }

        Self::new(
            format!("https://{domain}.atlassian.net/rest/api/{api_version}/"),
            auth,
        )
    }

    pub fn from_env() -> Result<Self> {
        use std::env;

        let domain = env::var("JIRA_DOMAIN").map_err(|_| {
            Error::ConfigurationMissing("JIRA_DOMAIN not found in environment".to_string())
        })?;

        let username = env::var("JIRA_USER").map_err(|_| {
            Error::ConfigurationMissing("JIRA_USER not found in environment".to_string())
        })?;

        let api_token = env::var("JIRA_API_TOKEN").map_err(|_| {
            Error::ConfigurationMissing("JIRA_API_TOKEN not found in environment".to_string())
        })?;

        let api_version = match env::var("JIRA_API_VERSION") {
            Ok(raw) => raw.trim().parse::<u32>().map_err(|_| {
                Error::InvalidConfiguration(format!("JIRA_API_VERSION is not a number: {raw:?}"))
            })?,
            Err(_) => DEFAULT_API_VERSION,
        };

        Self::cloud_with_version(&domain, Auth::basic(username, api_token), api_version)
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }
}

#[derive(Debug, Clone)]
pub struct JiraClient {
    pub(crate) client: Client,
    pub(crate) config: Arc<JiraConfig>,
}

impl JiraClient {
    /// Builds the session and probes `serverInfo`, so bad credentials or an
    /// unknown domain fail here rather than on first use.
    pub async fn new(config: JiraConfig) -> Result<Self> {
        let client = Self::build(config)?;

        client.server_info().await.map_err(|err| match err {
            Error::ApiError { status, message } if status == 401 || status == 403 => {
                warn!("Authentication failed against {}", client.config.base_url);
                Error::AuthenticationFailed(message)
            }
            other => other,
        })?;

        info!("Connected to Jira at {}", client.config.base_url);
        Ok(client)
    }

    pub(crate) fn build(config: JiraConfig) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        headers.insert(header::AUTHORIZATION, config.auth.header_value()?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::InvalidConfiguration(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            config: Arc::new(config),
        })
    }

    pub fn config(&self) -> &JiraConfig {
        &self.config
    }

    pub async fn server_info(&self) -> Result<Value> {
        self.get_json(ResourceRequest::path("serverInfo")).await
    }

    /// GET that fails with [`Error::ApiError`] on a non-2xx status.
    pub async fn get(&self, request: ResourceRequest) -> Result<Response> {
        ensure_success(self.dispatch(Method::GET, &request).await?).await
    }

    /// GET returning the raw response whatever its status.
    pub async fn get_unchecked(&self, request: ResourceRequest) -> Result<Response> {
        self.dispatch(Method::GET, &request).await
    }

    pub async fn post(&self, request: ResourceRequest) -> Result<Response> {
        ensure_success(self.dispatch(Method::POST, &request).await?).await
    }

    pub async fn post_unchecked(&self, request: ResourceRequest) -> Result<Response> {
        self.dispatch(Method::POST, &request).await
    }

    pub async fn put(&self, request: ResourceRequest) -> Result<Response> {
        ensure_success(self.dispatch(Method::PUT, &request).await?).await
    }

    pub async fn put_unchecked(&self, request: ResourceRequest) -> Result<Response> {
        self.dispatch(Method::PUT, &request).await
    }

    pub async fn get_json<T>(&self, request: ResourceRequest) -> Result<T>
    where
        T: DeserializeOwned,
    {
        read_json(self.get(request).await?).await
    }

    async fn dispatch(&self, method: Method, request: &ResourceRequest) -> Result<Response> {
        let url = request.resolve(&self.config.base_url)?;
        let has_body = method == Method::POST || method == Method::PUT;
        let mut attempt = 0u32;

        loop {
            debug!("{} {}", method, url);

            let mut builder = self.client.request(method.clone(), url.clone());
            if !request.query_pairs().is_empty() {
                builder = builder.query(request.query_pairs());
            }
            if has_body {
                // Also sets `Content-Type: application/json`.
                builder = builder.json(&request.json_body());
            }

            match builder.send().await {
                Ok(response) => {
                    debug!("{} {} -> {}", method, url, response.status());
                    return Ok(response);
                }
                Err(err) if self.config.retry.should_retry(&method, &err, attempt) => {
                    attempt += 1;
                    let delay = self.config.retry.delay_for(attempt);
                    warn!(
                        "{} {} failed ({}), retry {}/{} in {:?}",
                        method, url, err, attempt, self.config.retry.max_retries, delay
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(err) => return Err(err.into()),
            }
        }
    }
}

pub(crate) async fn ensure_success(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().clone();
    let message = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    warn!("Jira API error: HTTP {} from {} - {}", status, url, message);
    Err(Error::ApiError { status, message })
}

pub(crate) async fn read_json<T>(response: Response) -> Result<T>
where
    T: DeserializeOwned,
{
    let bytes = response.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}
