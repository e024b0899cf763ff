//! Configuration error types for the Telerivet API client.
//!
//! All configuration constructors return `Result<T, ConfigError>` so that
//! invalid credentials or endpoints are rejected before any request is made.
//!
//! # Example
//!
//! ```rust
//! use telerivet::{ApiKey, ConfigError};
//!
//! let result = ApiKey::new("");
//! assert!(matches!(result, Err(ConfigError::EmptyApiKey)));
//! ```

use thiserror::Error;

/// Errors that can occur while building a client configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// API key cannot be empty.
    #[error("API key cannot be empty. Please provide a valid Telerivet API key.")]
    EmptyApiKey,

    /// API URL is invalid.
    #[error("Invalid API URL '{url}'. Expected an absolute http(s) URL such as 'https://api.telerivet.com/v1'.")]
    InvalidApiUrl {
        /// The invalid URL that was provided.
        url: String,
    },

    /// A required field is missing.
    #[error("Missing required field: '{field}'. This field must be set before building the configuration.")]
    MissingRequiredField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {message}")]
    HttpClientBuild {
        /// Description of the failure reported by the HTTP library.
        message: String,
    },
}
