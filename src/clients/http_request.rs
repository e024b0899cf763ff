//! HTTP request types for the Telerivet API client.
//!
//! This module provides the [`HttpRequest`] type and its builder, plus
//! [`encode_query`], which flattens request params into a query string.

use std::fmt;

use serde_json::{Map, Value};

use crate::clients::errors::InvalidHttpRequestError;

/// HTTP methods supported by the Telerivet API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// HTTP GET method for retrieving resources.
    Get,
    /// HTTP POST method for creating and updating resources.
    Post,
    /// HTTP PUT method for adding relationships.
    Put,
    /// HTTP DELETE method for removing resources.
    Delete,
}

impl HttpMethod {
    /// Returns `true` if params travel in the query string rather than the body.
    #[must_use]
    pub const fn uses_query_string(self) -> bool {
        matches!(self, Self::Get | Self::Delete)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Get => write!(f, "GET"),
            Self::Post => write!(f, "POST"),
            Self::Put => write!(f, "PUT"),
            Self::Delete => write!(f, "DELETE"),
        }
    }
}

/// A request to be sent to the Telerivet API.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use telerivet::clients::{HttpMethod, HttpRequest};
///
/// let request = HttpRequest::builder(HttpMethod::Post, "/projects/PJ1/contacts")
///     .param("name", json!("Ann"))
///     .build()
///     .unwrap();
///
/// assert_eq!(request.body(), json!({"name": "Ann"}));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HttpRequest {
    /// The HTTP method for this request.
    pub http_method: HttpMethod,
    /// The API path, starting with `/`.
    pub path: String,
    /// Request params: query string for GET/DELETE, JSON body for POST/PUT.
    pub params: Option<Map<String, Value>>,
}

impl HttpRequest {
    /// Creates a new builder for constructing an `HttpRequest`.
    #[must_use]
    pub fn builder(method: HttpMethod, path: impl Into<String>) -> HttpRequestBuilder {
        HttpRequestBuilder::new(method, path)
    }

    /// Validates the request.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError::InvalidPath`] if the path does not
    /// start with `/`.
    pub fn verify(&self) -> Result<(), InvalidHttpRequestError> {
        if !self.path.starts_with('/') {
            return Err(InvalidHttpRequestError::InvalidPath {
                path: self.path.clone(),
            });
        }
        Ok(())
    }

    /// Returns the query pairs for GET/DELETE requests.
    #[must_use]
    pub fn query(&self) -> Vec<(String, String)> {
        match (&self.params, self.http_method.uses_query_string()) {
            (Some(params), true) => encode_query(params),
            _ => Vec::new(),
        }
    }

    /// Returns the JSON body for POST/PUT requests.
    ///
    /// Absent params become an empty object.
    #[must_use]
    pub fn body(&self) -> Value {
        Value::Object(self.params.clone().unwrap_or_default())
    }
}

/// Builder for [`HttpRequest`].
#[derive(Debug)]
pub struct HttpRequestBuilder {
    http_method: HttpMethod,
    path: String,
    params: Option<Map<String, Value>>,
}

impl HttpRequestBuilder {
    fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            http_method: method,
            path: path.into(),
            params: None,
        }
    }

    /// Sets all params at once.
    #[must_use]
    pub fn params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    /// Adds a single param.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: Value) -> Self {
        self.params
            .get_or_insert_with(Map::new)
            .insert(key.into(), value);
        self
    }

    /// Builds the [`HttpRequest`], validating it in the process.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidHttpRequestError`] if the request fails validation.
    pub fn build(self) -> Result<HttpRequest, InvalidHttpRequestError> {
        let request = HttpRequest {
            http_method: self.http_method,
            path: self.path,
            params: self.params,
        };
        request.verify()?;
        Ok(request)
    }
}

/// Flattens request params into query string pairs.
///
/// Nested objects use bracket notation (`vars[name]=x`), arrays use
/// indexed brackets (`ids[0]=a`), booleans become `1`/`0`, and nulls
/// become empty values.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
/// use telerivet::clients::encode_query;
///
/// let params = json!({"count": true, "vars": {"country": "KE"}});
/// let pairs = encode_query(params.as_object().unwrap());
///
/// assert_eq!(pairs, vec![
///     ("count".to_string(), "1".to_string()),
///     ("vars[country]".to_string(), "KE".to_string()),
/// ]);
/// ```
#[must_use]
pub fn encode_query(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::new();
    for (key, value) in params {
        push_query_value(&mut pairs, key.clone(), value);
    }
    pairs
}

fn push_query_value(pairs: &mut Vec<(String, String)>, key: String, value: &Value) {
    match value {
        Value::Null => pairs.push((key, String::new())),
        Value::Bool(b) => pairs.push((key, if *b { "1" } else { "0" }.to_string())),
        Value::Number(n) => pairs.push((key, n.to_string())),
        Value::String(s) => pairs.push((key, s.clone())),
        Value::Array(items) => {
            for (index, item) in items.iter().enumerate() {
                push_query_value(pairs, format!("{key}[{index}]"), item);
            }
        }
        Value::Object(map) => {
            for (sub_key, item) in map {
                push_query_value(pairs, format!("{key}[{sub_key}]"), item);
            }
        }
    }
}
