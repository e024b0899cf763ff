//! HTTP client for Telerivet API communication.
//!
//! This module provides [`HttpClient`], the reqwest-backed [`Transport`].

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use serde_json::{Map, Value};

use crate::clients::errors::ApiError;
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::transport::{BoxFuture, Transport};
use crate::config::{ApiKey, ApiUrl, ClientConfig};
use crate::error::ConfigError;

/// Client version from Cargo.toml.
pub const CLIENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// HTTP client for making requests to the Telerivet API.
///
/// The client handles:
/// - Basic authentication with the API key as user name and an empty password
/// - Default headers including `User-Agent`
/// - Query string encoding for GET/DELETE and JSON bodies for POST/PUT
/// - Mapping error-shaped responses to [`ApiError`]
/// - Counting the requests it has issued
///
/// Requests are never retried; a request runs to completion or failure.
///
/// # Example
///
/// ```rust,ignore
/// use telerivet::{ApiKey, ClientConfig};
/// use telerivet::clients::{HttpClient, HttpMethod, HttpRequest};
///
/// let config = ClientConfig::builder()
///     .api_key(ApiKey::new("my-api-key").unwrap())
///     .build()
///     .unwrap();
/// let client = HttpClient::new(&config)?;
///
/// let request = HttpRequest::builder(HttpMethod::Get, "/projects").build()?;
/// let body = client.send(request).await?;
/// ```
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    api_url: ApiUrl,
    api_key: ApiKey,
    default_headers: HashMap<String, String>,
    debug: bool,
    num_requests: AtomicU64,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the underlying reqwest
    /// client cannot be created (e.g. TLS initialization failure).
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} | "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}Telerivet Rust Client v{CLIENT_VERSION} | Rust {rust_version}");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let mut builder = reqwest::Client::builder().use_rustls_tls();
        if let Some(timeout) = config.timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClientBuild {
                message: e.to_string(),
            })?;

        Ok(Self {
            client,
            api_url: config.api_url().clone(),
            api_key: config.api_key().clone(),
            default_headers,
            debug: config.debug(),
            num_requests: AtomicU64::new(0),
        })
    }

    /// Returns the API base URL for this client.
    #[must_use]
    pub fn api_url(&self) -> &str {
        self.api_url.as_ref()
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends a request to the Telerivet API.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - The server cannot be reached (`Network`)
    /// - The body encodes an API error (`InvalidParameter`, `NotFound`, `Api`)
    /// - A non-2xx response carries no error body (`UnexpectedResponse`)
    /// - A 2xx body is not valid JSON (`InvalidResponse`)
    pub async fn send(&self, request: HttpRequest) -> Result<Value, ApiError> {
        request.verify()?;

        let url = format!("{}{}", self.api_url, request.path);
        self.num_requests.fetch_add(1, Ordering::Relaxed);

        tracing::debug!(method = %request.http_method, path = %request.path, "Telerivet API request");
        if self.debug {
            tracing::debug!(params = ?request.params, "Telerivet API request params");
        }

        let mut req_builder = match request.http_method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
            HttpMethod::Put => self.client.put(&url),
            HttpMethod::Delete => self.client.delete(&url),
        };

        for (key, value) in &self.default_headers {
            req_builder = req_builder.header(key, value);
        }
        req_builder = req_builder.basic_auth(self.api_key.as_ref(), Some(""));

        if request.http_method.uses_query_string() {
            let query = request.query();
            if !query.is_empty() {
                req_builder = req_builder.query(&query);
            }
        } else {
            req_builder = req_builder
                .header("Content-Type", "application/json")
                .body(request.body().to_string());
        }

        let res = req_builder.send().await?;
        let status = res.status().as_u16();
        let body_text = res.text().await?;

        if self.debug {
            tracing::debug!(status, body = %body_text, "Telerivet API response");
        }

        Self::parse_response(status, body_text)
    }

    /// Returns the number of requests sent so far.
    #[must_use]
    pub fn num_requests(&self) -> u64 {
        self.num_requests.load(Ordering::Relaxed)
    }

    /// Maps a raw response to a JSON value or a typed error.
    fn parse_response(status: u16, body_text: String) -> Result<Value, ApiError> {
        let is_ok = (200..=299).contains(&status);

        if body_text.trim().is_empty() {
            return if is_ok {
                Ok(Value::Null)
            } else {
                Err(ApiError::UnexpectedResponse {
                    status,
                    body: body_text,
                })
            };
        }

        let Ok(body) = serde_json::from_str::<Value>(&body_text) else {
            return Err(if is_ok {
                ApiError::invalid_response(format!("response body is not JSON (HTTP status {status})"))
            } else {
                ApiError::UnexpectedResponse {
                    status,
                    body: body_text,
                }
            });
        };

        if let Some(error) = ApiError::from_error_body(&body) {
            tracing::warn!(status, code = ?error.code(), "Telerivet API error: {}", error);
            return Err(error);
        }

        if !is_ok {
            return Err(ApiError::UnexpectedResponse {
                status,
                body: body_text,
            });
        }

        Ok(body)
    }
}

impl Transport for HttpClient {
    fn request<'a>(
        &'a self,
        method: HttpMethod,
        path: &'a str,
        params: Option<Map<String, Value>>,
    ) -> BoxFuture<'a, Result<Value, ApiError>> {
        Box::pin(async move {
            let mut builder = HttpRequest::builder(method, path);
            if let Some(params) = params {
                builder = builder.params(params);
            }
            self.send(builder.build()?).await
        })
    }

    fn request_count(&self) -> u64 {
        self.num_requests()
    }
}
