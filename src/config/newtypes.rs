//! Validated newtype wrappers for configuration values.
//!
//! These wrappers validate their contents on construction so that an
//! invalid credential or endpoint is rejected with a clear error message.

use crate::error::ConfigError;
use std::fmt;

/// A validated Telerivet API key.
///
/// The key is sent as the basic-auth user name on every request. Its
/// `Debug` output is masked so it never ends up in logs.
///
/// # Example
///
/// ```rust
/// use telerivet::ApiKey;
///
/// let key = ApiKey::new("my-api-key").unwrap();
/// assert_eq!(key.as_ref(), "my-api-key");
/// assert_eq!(format!("{key:?}"), "ApiKey(*****)");
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Creates a new validated API key.
    ///
    /// Surrounding whitespace is trimmed.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyApiKey`] if the key is empty.
    pub fn new(key: impl Into<String>) -> Result<Self, ConfigError> {
        let key = key.into().trim().to_string();
        if key.is_empty() {
            return Err(ConfigError::EmptyApiKey);
        }
        Ok(Self(key))
    }
}

impl AsRef<str> for ApiKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(*****)")
    }
}

/// A validated base URL for the REST API.
///
/// Trailing slashes are stripped so that API paths (which always start
/// with `/`) can be appended directly.
///
/// # Example
///
/// ```rust
/// use telerivet::ApiUrl;
///
/// let url = ApiUrl::new("https://api.telerivet.com/v1/").unwrap();
/// assert_eq!(url.as_ref(), "https://api.telerivet.com/v1");
/// assert_eq!(url.scheme(), "https");
/// assert_eq!(url.host_name(), Some("api.telerivet.com"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApiUrl {
    url: String,
    scheme_end: usize,
    host_start: usize,
    host_end: usize,
}

impl ApiUrl {
    /// The production Telerivet API endpoint.
    pub const DEFAULT: &'static str = "https://api.telerivet.com/v1";

    /// Creates a new validated API URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidApiUrl`] if the URL has no `http` or
    /// `https` scheme or no host.
    pub fn new(url: impl Into<String>) -> Result<Self, ConfigError> {
        let url = url.into();
        let url = url.trim().trim_end_matches('/').to_string();

        let scheme_end = url
            .find("://")
            .ok_or_else(|| ConfigError::InvalidApiUrl { url: url.clone() })?;

        let scheme = &url[..scheme_end];
        if !scheme.eq_ignore_ascii_case("http") && !scheme.eq_ignore_ascii_case("https") {
            return Err(ConfigError::InvalidApiUrl { url });
        }

        let host_start = scheme_end + 3;
        let remainder = &url[host_start..];
        let host_end = remainder
            .find([':', '/', '?', '#'])
            .map_or(url.len(), |i| host_start + i);

        if host_end == host_start {
            return Err(ConfigError::InvalidApiUrl { url });
        }

        Ok(Self {
            url,
            scheme_end,
            host_start,
            host_end,
        })
    }

    /// Returns the URL scheme (`http` or `https`).
    #[must_use]
    pub fn scheme(&self) -> &str {
        &self.url[..self.scheme_end]
    }

    /// Returns the host name portion of the URL.
    #[must_use]
    pub fn host_name(&self) -> Option<&str> {
        let host = &self.url[self.host_start..self.host_end];
        if host.is_empty() {
            None
        } else {
            Some(host)
        }
    }
}

impl Default for ApiUrl {
    fn default() -> Self {
        Self {
            url: Self::DEFAULT.to_string(),
            scheme_end: 5,
            host_start: 8,
            host_end: 25,
        }
    }
}

impl AsRef<str> for ApiUrl {
    fn as_ref(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for ApiUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_rejects_empty_string() {
        assert!(matches!(ApiKey::new(""), Err(ConfigError::EmptyApiKey)));
        assert!(matches!(ApiKey::new("   "), Err(ConfigError::EmptyApiKey)));
    }

    #[test]
    fn test_api_key_masks_value_in_debug() {
        let key = ApiKey::new("super-secret-key").unwrap();
        let debug_output = format!("{key:?}");
        assert_eq!(debug_output, "ApiKey(*****)");
        assert!(!debug_output.contains("super-secret-key"));
    }

    #[test]
    fn test_api_url_strips_trailing_slash() {
        let url = ApiUrl::new("http://localhost:8080/v1/").unwrap();
        assert_eq!(url.as_ref(), "http://localhost:8080/v1");
        assert_eq!(url.scheme(), "http");
        assert_eq!(url.host_name(), Some("localhost"));
    }

    #[test]
    fn test_api_url_rejects_invalid() {
        assert!(ApiUrl::new("api.telerivet.com").is_err());
        assert!(ApiUrl::new("https://").is_err());
        assert!(ApiUrl::new("ftp://api.telerivet.com").is_err());
        assert!(ApiUrl::new("://api.telerivet.com").is_err());
    }

    #[test]
    fn test_default_matches_parsed_default() {
        let parsed = ApiUrl::new(ApiUrl::DEFAULT).unwrap();
        assert_eq!(ApiUrl::default(), parsed);
        assert_eq!(ApiUrl::default().host_name(), Some("api.telerivet.com"));
    }
}
