//! Marker-paginated cursors over collection endpoints.
//!
//! Collection endpoints answer with
//! `{"data": [...], "truncated": bool, "next_marker": string|null}`.
//! [`ApiCursor`] walks those pages one request at a time, decoding each
//! item into a loaded resource handle as it is consumed.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut cursor = project.query_contacts(QueryParams::new().filter("name[prefix]", "A")).limit(500);
//!
//! println!("{} matching contacts", cursor.count().await?);
//! while let Some(contact) = cursor.next().await? {
//!     println!("{contact}");
//! }
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::{ApiError, HttpMethod, Transport};
use crate::rest::{Entity, Resource};

/// Largest page size the API accepts.
pub const MAX_PAGE_SIZE: u64 = 200;

/// A single-pass, lazily paginated sequence of `T`.
///
/// Pages are fetched only when the buffered page is exhausted and the
/// server reported more (`truncated`). Items come out in server order. Once
/// exhausted the cursor stays exhausted and issues no further requests.
pub struct ApiCursor<T> {
    transport: Arc<dyn Transport>,
    path: String,
    params: Map<String, Value>,
    decode: fn(Entity) -> T,
    count: Option<u64>,
    page: Option<Vec<Value>>,
    pos: usize,
    truncated: bool,
    next_marker: Option<String>,
    limit: Option<u64>,
    yielded: u64,
}

impl<T> ApiCursor<T> {
    /// Creates a cursor over `path` with fixed query params.
    ///
    /// `decode` turns each item, already wrapped in a loaded [`Entity`],
    /// into the caller's type.
    #[must_use]
    pub fn new(
        transport: Arc<dyn Transport>,
        path: impl Into<String>,
        params: Map<String, Value>,
        decode: fn(Entity) -> T,
    ) -> Self {
        Self {
            transport,
            path: path.into(),
            params,
            decode,
            count: None,
            page: None,
            pos: 0,
            truncated: false,
            next_marker: None,
            limit: None,
            yielded: 0,
        }
    }

    /// Caps the total number of items this cursor yields.
    ///
    /// Unless the query sets `page_size`, pages are also sized to the cap
    /// (at most [`MAX_PAGE_SIZE`]).
    #[must_use]
    pub const fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Returns the collection path.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the fixed query params.
    #[must_use]
    pub const fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Returns the total number of matching items.
    ///
    /// The first call issues a `count=1` request; later calls return the
    /// cached value. Iteration state is unaffected.
    ///
    /// # Errors
    ///
    /// Propagates the request error, or returns
    /// [`ApiError::InvalidResponse`] if the body lacks an integer `count`.
    pub async fn count(&mut self) -> Result<u64, ApiError> {
        if let Some(count) = self.count {
            return Ok(count);
        }

        let mut params = self.params.clone();
        params.insert("count".to_string(), Value::from(1));

        let body = self
            .transport
            .request(HttpMethod::Get, &self.path, Some(params))
            .await?;
        let count = body
            .get("count")
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                ApiError::invalid_response(format!("missing 'count' in response from {}", self.path))
            })?;

        self.count = Some(count);
        Ok(count)
    }

    /// Returns `true` if another item is available, fetching the next page
    /// when the buffered one is used up and the server reported more.
    ///
    /// # Errors
    ///
    /// Propagates any page load error.
    pub async fn has_next(&mut self) -> Result<bool, ApiError> {
        if self.limit_reached() {
            return Ok(false);
        }
        self.fill().await?;
        Ok(self.buffered() > 0)
    }

    /// Consumes and returns the next item, or `None` once exhausted.
    ///
    /// # Errors
    ///
    /// Propagates any page load error, or returns
    /// [`ApiError::InvalidResponse`] if an item is not a JSON object.
    pub async fn next(&mut self) -> Result<Option<T>, ApiError> {
        if self.limit_reached() {
            return Ok(None);
        }
        self.fill().await?;

        let Some(item) = self.page.as_mut().and_then(|page| page.get_mut(self.pos)) else {
            return Ok(None);
        };
        let item = std::mem::take(item);
        self.pos += 1;
        self.yielded += 1;

        let entity = Entity::from_value(Arc::clone(&self.transport), item, true)?;
        Ok(Some((self.decode)(entity)))
    }

    /// Drains the cursor into a vector.
    ///
    /// This issues one request per page; for large collections prefer
    /// [`next`](Self::next).
    ///
    /// # Errors
    ///
    /// Propagates the first error; items decoded before it are dropped.
    pub async fn all(&mut self) -> Result<Vec<T>, ApiError> {
        let mut items = Vec::new();
        while let Some(item) = self.next().await? {
            items.push(item);
        }
        Ok(items)
    }

    fn limit_reached(&self) -> bool {
        self.limit.is_some_and(|limit| self.yielded >= limit)
    }

    fn buffered(&self) -> usize {
        self.page
            .as_ref()
            .map_or(0, |page| page.len().saturating_sub(self.pos))
    }

    /// Loads at most one page: the first, or the next once the buffered
    /// one is used up and the server reported more.
    async fn fill(&mut self) -> Result<(), ApiError> {
        if self.page.is_none() || (self.buffered() == 0 && self.truncated) {
            self.load_next_page().await?;
        }
        Ok(())
    }

    async fn load_next_page(&mut self) -> Result<(), ApiError> {
        let mut params = self.params.clone();
        if let Some(marker) = &self.next_marker {
            params.insert("marker".to_string(), Value::from(marker.as_str()));
        }
        if let Some(limit) = self.limit {
            if !params.contains_key("page_size") {
                let remaining = limit.saturating_sub(self.yielded);
                params.insert("page_size".to_string(), Value::from(remaining.min(MAX_PAGE_SIZE)));
            }
        }

        tracing::trace!(path = %self.path, marker = ?self.next_marker, "loading cursor page");
        let body = self
            .transport
            .request(HttpMethod::Get, &self.path, Some(params))
            .await?;

        let Value::Object(mut body) = body else {
            return Err(ApiError::invalid_response(format!(
                "expected an object page from {}",
                self.path
            )));
        };
        let Some(Value::Array(items)) = body.remove("data") else {
            return Err(ApiError::invalid_response(format!(
                "missing 'data' array in page from {}",
                self.path
            )));
        };

        self.next_marker = body
            .get("next_marker")
            .and_then(Value::as_str)
            .map(ToString::to_string);
        // Without a marker the next request would repeat this page.
        self.truncated = self.next_marker.is_some()
            && body
                .get("truncated")
                .and_then(Value::as_bool)
                .unwrap_or(false);
        self.page = Some(items);
        self.pos = 0;
        Ok(())
    }
}

impl<T: Resource> ApiCursor<T> {
    /// Creates a cursor that decodes items into resource `T`.
    #[must_use]
    pub fn for_resource(
        transport: Arc<dyn Transport>,
        path: impl Into<String>,
        params: Map<String, Value>,
    ) -> Self {
        Self::new(transport, path, params, T::from_entity)
    }
}

impl<T> fmt::Debug for ApiCursor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiCursor")
            .field("path", &self.path)
            .field("params", &self.params)
            .field("count", &self.count)
            .field("buffered", &self.buffered())
            .field("truncated", &self.truncated)
            .field("next_marker", &self.next_marker)
            .field("limit", &self.limit)
            .finish_non_exhaustive()
    }
}
