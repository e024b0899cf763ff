//! Error types for Telerivet API requests.
//!
//! Every operation that reaches the network returns [`ApiError`]:
//!
//! - [`ApiError::Network`]: the server could not be reached
//! - [`ApiError::InvalidParameter`]: the API rejected a request parameter
//! - [`ApiError::NotFound`]: the addressed resource does not exist
//! - [`ApiError::Api`]: any other error reported by the API
//! - [`ApiError::UnexpectedResponse`]: a non-2xx response without an error body
//! - [`ApiError::InvalidResponse`]: a 2xx response without the expected shape
//! - [`ApiError::InvalidRequest`]: the request failed validation before sending
//!
//! # Example
//!
//! ```rust,ignore
//! match contact.save().await {
//!     Ok(()) => {}
//!     Err(ApiError::InvalidParameter { param, message, .. }) => {
//!         println!("bad value for {param}: {message}");
//!     }
//!     Err(ApiError::NotFound { .. }) => println!("contact was deleted"),
//!     Err(e) => println!("request failed: {e}"),
//! }
//! ```

use serde_json::Value;
use thiserror::Error;

/// Error code the API uses for parameter validation failures.
pub const INVALID_PARAM_CODE: &str = "invalid_param";

/// Error code the API uses for missing resources.
pub const NOT_FOUND_CODE: &str = "not_found";

/// Error returned when a request fails validation before it is sent.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidHttpRequestError {
    /// The request path does not start with `/`.
    #[error("Invalid request path '{path}'. API paths must start with '/'.")]
    InvalidPath {
        /// The path that was provided.
        path: String,
    },

    /// Params were supplied that are not a JSON object.
    #[error("Request params must be a JSON object.")]
    ParamsNotObject,
}

/// Error type for every request made through a [`Transport`](crate::clients::Transport).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// The server could not be reached (DNS, connect, TLS, timeout).
    #[error("Network error: {message}")]
    Network {
        /// Description of the network failure.
        message: String,
    },

    /// The API rejected the value of a request parameter.
    #[error("{message}")]
    InvalidParameter {
        /// Machine-readable error code.
        code: String,
        /// Human-readable error message.
        message: String,
        /// Name of the offending parameter.
        param: String,
    },

    /// The addressed resource does not exist.
    #[error("{message}")]
    NotFound {
        /// Machine-readable error code.
        code: String,
        /// Human-readable error message.
        message: String,
    },

    /// Any other error reported by the API.
    #[error("{message}")]
    Api {
        /// Machine-readable error code.
        code: String,
        /// Human-readable error message.
        message: String,
    },

    /// The server returned a non-2xx response without an error body.
    #[error("Unexpected response from Telerivet API (HTTP status {status})")]
    UnexpectedResponse {
        /// HTTP status code.
        status: u16,
        /// Raw response body.
        body: String,
    },

    /// A successful response did not have the shape the client expected.
    #[error("Invalid response from Telerivet API: {message}")]
    InvalidResponse {
        /// Description of the mismatch.
        message: String,
    },

    /// The request failed validation before being sent.
    #[error(transparent)]
    InvalidRequest(#[from] InvalidHttpRequestError),
}

impl ApiError {
    /// Maps an error-shaped response body to a typed error.
    ///
    /// The body shape is `{"error": {"code": ..., "message": ..., "param": ...}}`.
    /// Returns `None` if the body carries no `error` object.
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde_json::json;
    /// use telerivet::ApiError;
    ///
    /// let body = json!({"error": {"code": "invalid_param", "message": "m", "param": "p"}});
    /// let error = ApiError::from_error_body(&body).unwrap();
    /// assert_eq!(error.param(), Some("p"));
    /// ```
    #[must_use]
    pub fn from_error_body(body: &Value) -> Option<Self> {
        let error = body.get("error")?.as_object()?;

        let code = error
            .get("code")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();
        let message = error
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string();

        Some(match code.as_str() {
            INVALID_PARAM_CODE => Self::InvalidParameter {
                param: error
                    .get("param")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                code,
                message,
            },
            NOT_FOUND_CODE => Self::NotFound { code, message },
            _ => Self::Api { code, message },
        })
    }

    /// Returns the API error code for errors reported by the server.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { code, .. } | Self::NotFound { code, .. } | Self::Api { code, .. } => {
                Some(code)
            }
            _ => None,
        }
    }

    /// Returns the offending parameter name for [`ApiError::InvalidParameter`].
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { param, .. } => Some(param),
            _ => None,
        }
    }

    /// Returns `true` for [`ApiError::NotFound`].
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub(crate) fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse {
            message: message.into(),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Network {
            message: error.to_string(),
        }
    }
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ApiError>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_invalid_param_code_maps_to_invalid_parameter() {
        let body = json!({"error": {"code": "invalid_param", "message": "m", "param": "p"}});
        let error = ApiError::from_error_body(&body).unwrap();

        assert!(matches!(
            &error,
            ApiError::InvalidParameter { code, message, param }
                if code == "invalid_param" && message == "m" && param == "p"
        ));
        assert_eq!(error.param(), Some("p"));
        assert_eq!(error.to_string(), "m");
    }

    #[test]
    fn test_not_found_code_maps_to_not_found() {
        let body = json!({"error": {"code": "not_found", "message": "m"}});
        let error = ApiError::from_error_body(&body).unwrap();

        assert!(error.is_not_found());
        assert_eq!(error.code(), Some("not_found"));
        assert_eq!(error.param(), None);
    }

    #[test]
    fn test_other_codes_map_to_generic_api_error() {
        let body = json!({"error": {"code": "rate_limited", "message": "slow down", "param": "x"}});
        let error = ApiError::from_error_body(&body).unwrap();

        assert!(matches!(&error, ApiError::Api { code, .. } if code == "rate_limited"));
        assert_eq!(error.param(), None);
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_body_without_error_object_is_not_an_error() {
        assert!(ApiError::from_error_body(&json!({"id": "CT1"})).is_none());
        assert!(ApiError::from_error_body(&json!({"error": "text"})).is_none());
        assert!(ApiError::from_error_body(&Value::Null).is_none());
    }

    #[test]
    fn test_unexpected_response_mentions_status() {
        let error = ApiError::UnexpectedResponse {
            status: 502,
            body: "<html>".to_string(),
        };
        assert!(error.to_string().contains("502"));
        assert_eq!(error.code(), None);
    }

    #[test]
    fn test_invalid_request_error_messages() {
        let error = InvalidHttpRequestError::InvalidPath {
            path: "projects".to_string(),
        };
        assert!(error.to_string().contains("projects"));

        let wrapped: ApiError = InvalidHttpRequestError::ParamsNotObject.into();
        assert_eq!(wrapped.to_string(), "Request params must be a JSON object.");
    }
}
