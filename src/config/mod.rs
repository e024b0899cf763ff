//! Configuration types for the Telerivet API client.
//!
//! - [`ClientConfig`]: credentials and transport settings
//! - [`ClientConfigBuilder`]: builder for [`ClientConfig`]
//! - [`ApiKey`]: a validated API key with masked debug output
//! - [`ApiUrl`]: a validated API base URL
//!
//! # Example
//!
//! ```rust
//! use telerivet::{ApiKey, ClientConfig};
//!
//! let config = ClientConfig::builder()
//!     .api_key(ApiKey::new("my-api-key").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.api_url().as_ref(), "https://api.telerivet.com/v1");
//! ```

mod newtypes;

pub use newtypes::{ApiKey, ApiUrl};

use std::time::Duration;

use crate::error::ConfigError;

/// Configuration for a [`TelerivetClient`](crate::TelerivetClient).
///
/// `ClientConfig` is `Clone`, `Send`, and `Sync`.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    api_key: ApiKey,
    api_url: ApiUrl,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    debug: bool,
}

impl ClientConfig {
    /// Creates a new builder for constructing a `ClientConfig`.
    #[must_use]
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Returns the API key.
    #[must_use]
    pub const fn api_key(&self) -> &ApiKey {
        &self.api_key
    }

    /// Returns the API base URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }

    /// Returns the per-request timeout applied by the HTTP transport.
    #[must_use]
    pub const fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Returns whether request and response bodies are logged.
    #[must_use]
    pub const fn debug(&self) -> bool {
        self.debug
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ClientConfig>();
};

/// Builder for [`ClientConfig`].
///
/// `api_key` is required. Defaults:
///
/// - `api_url`: `https://api.telerivet.com/v1`
/// - `user_agent_prefix`: `None`
/// - `timeout`: `None` (no timeout)
/// - `debug`: `false`
#[derive(Debug, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<ApiKey>,
    api_url: Option<ApiUrl>,
    user_agent_prefix: Option<String>,
    timeout: Option<Duration>,
    debug: Option<bool>,
}

impl ClientConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API key (required).
    #[must_use]
    pub fn api_key(mut self, key: ApiKey) -> Self {
        self.api_key = Some(key);
        self
    }

    /// Overrides the API base URL.
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets a prefix for the `User-Agent` header.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Enables logging of request params and raw response bodies.
    #[must_use]
    pub const fn debug(mut self, debug: bool) -> Self {
        self.debug = Some(debug);
        self
    }

    /// Builds the [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `api_key` is not set.
    pub fn build(self) -> Result<ClientConfig, ConfigError> {
        let api_key = self
            .api_key
            .ok_or(ConfigError::MissingRequiredField { field: "api_key" })?;

        Ok(ClientConfig {
            api_key,
            api_url: self.api_url.unwrap_or_default(),
            user_agent_prefix: self.user_agent_prefix,
            timeout: self.timeout,
            debug: self.debug.unwrap_or(false),
        })
    }
}
