//! The transport contract consumed by entities and cursors.

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use serde_json::{Map, Value};

use crate::clients::{ApiError, HttpMethod};

/// A boxed, sendable future, used to keep [`Transport`] object safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Issues one request against the API and returns the parsed JSON body.
///
/// GET and DELETE params travel in the query string; POST and PUT params
/// travel as a JSON body. Implementations map error-shaped responses to
/// [`ApiError`] via [`ApiError::from_error_body`].
///
/// Entities and cursors hold an `Arc<dyn Transport>`, so any implementation
/// (the reqwest-backed [`HttpClient`](crate::clients::HttpClient), or a
/// scripted fake in tests) can back them.
pub trait Transport: Send + Sync + fmt::Debug {
    /// Sends a request and returns the parsed response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Network`] when the server cannot be reached and
    /// the mapped API error when the response body encodes one.
    fn request<'a>(
        &'a self,
        method: HttpMethod,
        path: &'a str,
        params: Option<Map<String, Value>>,
    ) -> BoxFuture<'a, Result<Value, ApiError>>;

    /// Returns the number of requests issued through this transport.
    fn request_count(&self) -> u64;
}
