//! Core HTTP transport for the GitHub API

use std::collections::HashMap;

use compact_str::{CompactString, format_compact};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use super::config::{Config, Pagination};
use super::error::{ClientError, Result};

/// Public GitHub API host, used unless a base URL is supplied
pub const DEFAULT_BASE_URL: &str = "https://api.github.com";

/// Standard JSON media type for the v3 API
pub const DEFAULT_ACCEPT: &str = "application/vnd.github.v3+json";

const USER_AGENT_VALUE: &str = concat!("ghops/", env!("CARGO_PKG_VERSION"));

/// GitHub API error response format
#[derive(Debug, Deserialize)]
struct GithubApiMessage {
    message: CompactString,
}

/// A decoded success payload plus the status code and response headers.
///
/// The headers are kept so callers can follow the `Link` header for
/// pagination without the client growing cursor logic.
#[derive(Debug, Clone)]
pub struct ApiResponse<T> {
    pub result: T,
    pub status: u16,
    pub headers: HashMap<CompactString, CompactString>,
}

impl<T> ApiResponse<T> {
    /// Map the payload, keeping status and headers
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ApiResponse<U> {
        ApiResponse {
            result: f(self.result),
            status: self.status,
            headers: self.headers,
        }
    }
}

/// Pure HTTP transport for the GitHub API.
///
/// Holds a connection pool and a base URL; credentials arrive per call via
/// [`Config`], so one transport serves any number of identities.
#[derive(Debug)]
pub struct Transport {
    client: Client,
    base_url: CompactString,
}

impl Transport {
    /// Create a transport against the public GitHub API
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Create a transport against a custom base URL (e.g. GitHub Enterprise)
    pub fn with_base_url(base_url: impl Into<CompactString>) -> Result<Self> {
        let base_url: CompactString = base_url.into();

        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ClientError::config(
                "base URL must start with http:// or https://",
            ));
        }

        if Url::parse(&base_url).is_err() {
            return Err(ClientError::config(format_compact!(
                "base URL is not a valid URL: {base_url}"
            )));
        }

        let client = Client::builder().build().map_err(ClientError::Network)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Execute one API call and decode the response.
    ///
    /// Builds the full URL from the base URL plus `path`, merges `query` and
    /// pagination into the query string (later keys override earlier ones),
    /// applies default headers then `config.headers`, and serializes `body`
    /// as JSON for POST/PATCH/PUT.
    #[instrument(skip(self, config, query, body), fields(%method, path))]
    pub async fn execute<T>(
        &self,
        method: Method,
        path: &str,
        config: &Config,
        query: &[(&str, CompactString)],
        pagination: Option<Pagination>,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let url = self.build_url(path, query, pagination)?;
        let headers = build_headers(config)?;

        let mut request = self.client.request(method.clone(), url).headers(headers);

        if let Some(body) = body
            && matches!(method, Method::POST | Method::PATCH | Method::PUT)
        {
            request = request
                .header(CONTENT_TYPE, "application/json")
                .body(body.to_string());
        }

        let response = request.send().await?;
        self.handle_response(path, response).await
    }

    /// Build the full URL with merged query parameters
    fn build_url(
        &self,
        path: &str,
        query: &[(&str, CompactString)],
        pagination: Option<Pagination>,
    ) -> Result<Url> {
        let mut url = Url::parse(&format_compact!(
            "{}/{}",
            self.base_url,
            path.trim_start_matches('/')
        ))
        .map_err(|e| ClientError::config(format_compact!("invalid request URL: {e}")))?;

        // Later keys override earlier ones, pagination last
        let mut pairs: Vec<(&str, CompactString)> = Vec::new();
        let pagination_pairs = pagination.map(|p| p.query_pairs()).unwrap_or_default();
        for (name, value) in query.iter().cloned().chain(pagination_pairs) {
            pairs.retain(|(existing, _)| *existing != name);
            pairs.push((name, value));
        }

        if !pairs.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(pairs.iter().map(|(n, v)| (*n, v.as_str())));
        }

        Ok(url)
    }

    /// Handle HTTP response and deserialize JSON
    async fn handle_response<T>(&self, path: &str, response: Response) -> Result<ApiResponse<T>>
    where
        T: DeserializeOwned,
    {
        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (CompactString::from(name.as_str()), CompactString::from(v)))
            })
            .collect();
        let body = response.text().await?;

        if status.is_success() {
            // 204 and other empty bodies decode as JSON null
            let text = if body.trim().is_empty() { "null" } else { &body };
            let result = serde_json::from_str(text).map_err(|e| {
                warn!(path, error = %e, "failed to decode response body");
                ClientError::decode(path, e)
            })?;
            debug!(path, status = status.as_u16(), "request succeeded");
            Ok(ApiResponse {
                result,
                status: status.as_u16(),
                headers,
            })
        } else {
            let message = match serde_json::from_str::<GithubApiMessage>(&body) {
                Ok(api_error) => api_error.message,
                Err(_) => body.into(),
            };
            debug!(path, status = status.as_u16(), %message, "request failed");
            Err(ClientError::api(status.as_u16(), message))
        }
    }
}

/// Default headers plus caller overrides.
///
/// Caller headers are merged afterward, so they may override the default
/// `Accept` and `Authorization` values.
fn build_headers(config: &Config) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(ACCEPT, HeaderValue::from_static(DEFAULT_ACCEPT));
    headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_VALUE));

    if let Some(token) = &config.access_token {
        let value = HeaderValue::from_str(&format_compact!("token {token}"))
            .map_err(|_| ClientError::config("access token contains invalid header characters"))?;
        headers.insert(AUTHORIZATION, value);
    }

    for (name, value) in &config.headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ClientError::config(format_compact!("invalid header name: {name}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| ClientError::config(format_compact!("invalid header value for {name}")))?;
        headers.insert(name, value);
    }

    Ok(headers)
}
