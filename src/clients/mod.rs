//! Transport layer for Telerivet API communication.
//!
//! The main types in this module are:
//!
//! - [`Transport`]: the request/response contract entities and cursors use
//! - [`HttpClient`]: the reqwest-backed [`Transport`]
//! - [`HttpRequest`]: a request to be sent to the API
//! - [`HttpMethod`]: supported HTTP methods (GET, POST, PUT, DELETE)
//! - [`ApiError`]: the error taxonomy for every request
//!
//! # Example
//!
//! ```rust,ignore
//! use telerivet::clients::{HttpClient, HttpMethod, Transport};
//!
//! let client = HttpClient::new(&config)?;
//! let body = client.request(HttpMethod::Get, "/projects/PJ1", None).await?;
//! ```

mod errors;
mod http_client;
mod http_request;
mod transport;

#[cfg(test)]
pub(crate) mod testing;

pub use errors::{ApiError, InvalidHttpRequestError, INVALID_PARAM_CODE, NOT_FOUND_CODE};
pub use http_client::{HttpClient, CLIENT_VERSION};
pub use http_request::{encode_query, HttpMethod, HttpRequest, HttpRequestBuilder};
pub use transport::{BoxFuture, Transport};
