//! Lazily loaded, dirty-tracked remote objects.
//!
//! An [`Entity`] is the state behind every resource handle:
//!
//! - `data`: the last known server state, or just a seed of identifying
//!   fields when the entity has not been loaded yet
//! - `dirty`: fields set locally and not yet saved
//! - `vars`: the custom variables, tracked in a [`VariableBag`]
//!
//! Reading a field that is absent from an unloaded entity triggers exactly
//! one GET of the entity's path. After that load, absence is final for the
//! lifetime of the handle. Writes are purely local until `save`, which
//! POSTs only the dirty fields and dirty variables.
//!
//! Entities do not know their own path; the owning resource computes it
//! from its identifying fields and passes it in (see
//! [`Resource`](crate::rest::Resource)).

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::clients::{ApiError, HttpMethod, Transport};
use crate::rest::VariableBag;

/// Field name of the custom variables object.
pub const VARS_FIELD: &str = "vars";

/// State of one local handle to a remote object.
///
/// Handles are independent: two entities for the same remote object keep
/// separate dirty state, and the later save wins on the server.
#[derive(Clone)]
pub struct Entity {
    transport: Arc<dyn Transport>,
    data: Map<String, Value>,
    dirty: Map<String, Value>,
    vars: VariableBag,
    loaded: bool,
}

impl Entity {
    /// Creates an entity from seed data.
    ///
    /// When `is_loaded` is true the seed is treated as complete and its
    /// `vars` object populates the variable bag. Otherwise the seed holds
    /// only identifying fields and the bag stays empty until the first load.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, mut data: Map<String, Value>, is_loaded: bool) -> Self {
        let seed_vars = data.shift_remove(VARS_FIELD);
        let vars = if is_loaded {
            VariableBag::from_value(seed_vars.as_ref())
        } else {
            VariableBag::new()
        };

        Self {
            transport,
            data,
            dirty: Map::new(),
            vars,
            loaded: is_loaded,
        }
    }

    /// Creates an entity from a JSON response body.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidResponse`] if the body is not an object.
    pub fn from_value(
        transport: Arc<dyn Transport>,
        value: Value,
        is_loaded: bool,
    ) -> Result<Self, ApiError> {
        match value {
            Value::Object(data) => Ok(Self::new(transport, data, is_loaded)),
            other => Err(ApiError::invalid_response(format!(
                "expected a JSON object, got {other}"
            ))),
        }
    }

    /// Creates an unloaded entity seeded with identifying fields.
    #[must_use]
    pub fn seed(transport: Arc<dyn Transport>, ids: &[(&str, &str)]) -> Self {
        let data = ids
            .iter()
            .map(|(key, value)| ((*key).to_string(), Value::from(*value)))
            .collect();
        Self::new(transport, data, false)
    }

    /// Returns the transport this entity loads and saves through.
    #[must_use]
    pub const fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Returns `true` once the full server state has been fetched.
    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.loaded
    }

    /// Returns the current data, with local edits merged in.
    ///
    /// The `vars` object is not part of it; variables live in
    /// [`vars`](Self::vars).
    #[must_use]
    pub const fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Returns the data for bookkeeping that mirrors a confirmed server
    /// change. Edits made here are not sent on save.
    pub(crate) fn data_mut(&mut self) -> &mut Map<String, Value> {
        &mut self.data
    }

    /// Returns the fields set locally since the last save.
    #[must_use]
    pub const fn dirty_fields(&self) -> &Map<String, Value> {
        &self.dirty
    }

    /// Returns `true` if any field or variable awaits saving.
    #[must_use]
    pub fn has_changes(&self) -> bool {
        !self.dirty.is_empty() || self.vars.is_dirty()
    }

    /// Looks up a field locally, never touching the network.
    #[must_use]
    pub fn peek(&self, name: &str) -> Option<&Value> {
        self.data.get(name).filter(|value| !value.is_null())
    }

    /// Looks up a string field locally, never touching the network.
    #[must_use]
    pub fn peek_str(&self, name: &str) -> Option<&str> {
        self.peek(name).and_then(Value::as_str)
    }

    /// Returns the `id` field, or an empty string if the seed lacks one.
    #[must_use]
    pub fn id(&self) -> &str {
        self.peek_str("id").unwrap_or_default()
    }

    /// Returns the variable bag without loading.
    ///
    /// On an unloaded entity the bag only holds variables set locally.
    #[must_use]
    pub const fn vars(&self) -> &VariableBag {
        &self.vars
    }

    /// Returns the variable bag mutably without loading.
    pub fn vars_mut(&mut self) -> &mut VariableBag {
        &mut self.vars
    }

    /// Reads a field, loading the entity first if the field is unknown.
    ///
    /// - A field present in `data` (including a local edit) is returned
    ///   without a request; an explicit `null` counts as present and
    ///   yields `None`.
    /// - On a loaded entity an absent field yields `None`.
    /// - Otherwise the entity is loaded once and the lookup retried.
    ///
    /// Reading [`VARS_FIELD`] always loads and returns the variables object.
    ///
    /// # Errors
    ///
    /// Propagates any error from the load request.
    pub async fn get(&mut self, path: &str, name: &str) -> Result<Option<Value>, ApiError> {
        if name == VARS_FIELD {
            self.load(path).await?;
            return Ok(Some(Value::Object(self.vars.all())));
        }

        if let Some(value) = self.data.get(name) {
            return Ok((!value.is_null()).then(|| value.clone()));
        }

        if self.loaded {
            return Ok(None);
        }

        tracing::trace!(path, field = name, "field not in seed, loading entity");
        self.load(path).await?;

        Ok(self.peek(name).cloned())
    }

    /// Reads a field and deserializes it into `T`.
    ///
    /// # Errors
    ///
    /// Propagates load errors, and returns [`ApiError::InvalidResponse`]
    /// if the value does not deserialize into `T`.
    pub async fn get_as<T: DeserializeOwned>(
        &mut self,
        path: &str,
        name: &str,
    ) -> Result<Option<T>, ApiError> {
        self.get(path, name)
            .await?
            .map(|value| {
                serde_json::from_value(value).map_err(|e| {
                    ApiError::invalid_response(format!("field '{name}' has unexpected type: {e}"))
                })
            })
            .transpose()
    }

    /// Reads a Unix timestamp field (seconds) as a UTC date-time.
    ///
    /// # Errors
    ///
    /// Propagates load errors, and returns [`ApiError::InvalidResponse`]
    /// if the value is not a valid timestamp.
    pub async fn get_timestamp(
        &mut self,
        path: &str,
        name: &str,
    ) -> Result<Option<DateTime<Utc>>, ApiError> {
        let Some(seconds) = self.get_as::<f64>(path, name).await? else {
            return Ok(None);
        };

        #[allow(clippy::cast_possible_truncation)]
        DateTime::from_timestamp(seconds.trunc() as i64, 0)
            .map(Some)
            .ok_or_else(|| ApiError::invalid_response(format!("field '{name}' is not a valid timestamp")))
    }

    /// Sets a field locally. Never touches the network.
    ///
    /// Setting [`VARS_FIELD`] to an object sets each of its entries as a
    /// variable instead.
    pub fn set(&mut self, name: &str, value: Value) {
        if name == VARS_FIELD {
            if let Value::Object(vars) = value {
                for (var_name, var_value) in vars {
                    self.vars.set(var_name, var_value);
                }
            }
            return;
        }

        self.data.insert(name.to_string(), value.clone());
        self.dirty.insert(name.to_string(), value);
    }

    /// Sets a custom variable locally. Never touches the network.
    pub fn set_var(&mut self, name: &str, value: Value) {
        self.vars.set(name, value);
    }

    /// Fetches the full server state. No-op once loaded.
    ///
    /// Local edits survive the load: dirty fields and dirty variables are
    /// applied on top of the fetched state. On failure the entity is left
    /// exactly as it was.
    ///
    /// # Errors
    ///
    /// Propagates the transport error, or returns
    /// [`ApiError::InvalidResponse`] if the body is not an object.
    pub async fn load(&mut self, path: &str) -> Result<(), ApiError> {
        if self.loaded {
            return Ok(());
        }

        tracing::trace!(path, "loading entity");
        let response = self.transport.request(HttpMethod::Get, path, None).await?;
        let Value::Object(mut data) = response else {
            return Err(ApiError::invalid_response(format!(
                "expected an object from GET {path}"
            )));
        };

        let mut vars = VariableBag::from_value(data.shift_remove(VARS_FIELD).as_ref());
        for (name, value) in self.vars.dirty_variables() {
            vars.set(name.clone(), value.clone());
        }
        for (name, value) in &self.dirty {
            data.insert(name.clone(), value.clone());
        }

        self.data = data;
        self.vars = vars;
        self.loaded = true;
        Ok(())
    }

    /// Sends the dirty fields and dirty variables to the server.
    ///
    /// The patch holds exactly the dirty fields, plus a nested `vars`
    /// object with exactly the dirty variables when there are any. Dirty
    /// state is cleared only after the request succeeds; `data` is not
    /// refreshed from the response.
    ///
    /// # Errors
    ///
    /// Propagates the transport error, leaving dirty state intact.
    pub async fn save(&mut self, path: &str) -> Result<(), ApiError> {
        let mut patch = self.dirty.clone();
        if self.vars.is_dirty() {
            patch.insert(
                VARS_FIELD.to_string(),
                Value::Object(self.vars.dirty_variables().clone()),
            );
        }

        tracing::trace!(path, fields = patch.len(), "saving entity");
        self.transport
            .request(HttpMethod::Post, path, Some(patch))
            .await?;

        self.dirty.clear();
        self.vars.clear_dirty_variables();
        Ok(())
    }

    /// Writes the diagnostic representation used by resource `Display` impls.
    ///
    /// Variables are shown under [`VARS_FIELD`] when any are set.
    pub(crate) fn describe(&self, f: &mut fmt::Formatter<'_>, name: &str) -> fmt::Result {
        let marker = if self.loaded { "" } else { " (not loaded)" };
        let mut data = self.data.clone();
        if !self.vars.is_empty() {
            data.insert(VARS_FIELD.to_string(), Value::Object(self.vars.all()));
        }
        write!(f, "{name}{marker} JSON: {}", Value::Object(data))
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("data", &self.data)
            .field("dirty", &self.dirty)
            .field("vars", &self.vars)
            .field("loaded", &self.loaded)
            .finish_non_exhaustive()
    }
}
