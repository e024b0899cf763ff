//! Query parameters for collection endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Sort direction of a collection query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,

    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Filters and ordering for a `query_*` call.
///
/// Filter names follow the API's bracket notation, e.g. `name[prefix]`,
/// `time_created[min]` or `vars[country]`.
///
/// # Example
///
/// ```rust
/// use telerivet::rest::{QueryParams, SortDirection};
///
/// let params = QueryParams::new()
///     .filter("name[prefix]", "A")
///     .sort("name")
///     .sort_dir(SortDirection::Desc)
///     .page_size(50);
///
/// let map = params.into_params();
/// assert_eq!(map["sort_dir"], "desc");
/// assert_eq!(map["name[prefix]"], "A");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    sort: Option<String>,
    sort_dir: Option<SortDirection>,
    page_size: Option<u64>,
    filters: Map<String, Value>,
}

impl QueryParams {
    /// Creates an empty query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the field to sort by.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    /// Sets the sort direction.
    #[must_use]
    pub const fn sort_dir(mut self, direction: SortDirection) -> Self {
        self.sort_dir = Some(direction);
        self
    }

    /// Sets the number of items fetched per page.
    #[must_use]
    pub const fn page_size(mut self, page_size: u64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Adds a filter.
    #[must_use]
    pub fn filter(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.insert(name.into(), value.into());
        self
    }

    /// Converts the query into request params.
    #[must_use]
    pub fn into_params(self) -> Map<String, Value> {
        let mut params = self.filters;
        if let Some(sort) = self.sort {
            params.insert("sort".to_string(), Value::from(sort));
        }
        if let Some(direction) = self.sort_dir {
            params.insert("sort_dir".to_string(), Value::from(direction.as_str()));
        }
        if let Some(page_size) = self.page_size {
            params.insert("page_size".to_string(), Value::from(page_size));
        }
        params
    }
}

impl From<Map<String, Value>> for QueryParams {
    fn from(filters: Map<String, Value>) -> Self {
        Self {
            filters,
            ..Self::default()
        }
    }
}

impl From<QueryParams> for Map<String, Value> {
    fn from(params: QueryParams) -> Self {
        params.into_params()
    }
}
