//! Resource traits shared by every typed wrapper.
//!
//! A resource is a thin typed handle around an [`Entity`]. Implementors
//! supply a name, a path template and the fields that fill it; the
//! [`Resource`] trait then provides lazy loading, field access and local
//! mutation, and [`SavableResource`] adds `save()` for resources the API
//! lets you update.
//!
//! # Implementing a Resource
//!
//! Wrappers are declared with the crate-internal `declare_resource!`
//! macro, which generates the struct, the trait impl, and `Display`:
//!
//! ```rust,ignore
//! declare_resource! {
//!     /// A label applied to messages.
//!     Label => "/projects/{project_id}/labels/{id}", ["project_id", "id"]
//! }
//! impl SavableResource for Label {}
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use telerivet::rest::{Resource, SavableResource};
//!
//! let mut contact = project.init_contact_by_id("CT123");
//! contact.set_name("Ann");         // local only
//! contact.set_var("tier", "gold"); // local only
//! contact.save().await?;           // POST with just those two changes
//!
//! let phone = contact.phone_number().await?; // loads on first unknown field
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::clients::{ApiError, HttpMethod, InvalidHttpRequestError, Transport};
use crate::rest::{build_path, encode_segment, ApiCursor, Entity, VariableBag};

/// A typed handle to one remote object.
///
/// # Associated Constants
///
/// - `NAME`: the resource name, used in `Display` output
/// - `PATH`: the path template of a single object
/// - `ID_FIELDS`: the fields whose values fill the template
#[allow(async_fn_in_trait)]
pub trait Resource: Sized + Send + Sync {
    /// The resource name (e.g. "Contact").
    const NAME: &'static str;

    /// Path template of a single object, e.g. `/projects/{project_id}/contacts/{id}`.
    const PATH: &'static str;

    /// Fields whose values fill the placeholders of [`Self::PATH`].
    const ID_FIELDS: &'static [&'static str];

    /// Wraps an entity.
    fn from_entity(entity: Entity) -> Self;

    /// Returns the wrapped entity.
    fn entity(&self) -> &Entity;

    /// Returns the wrapped entity mutably.
    fn entity_mut(&mut self) -> &mut Entity;

    /// Creates an unloaded handle from identifying fields. No request is made.
    #[must_use]
    fn init(transport: Arc<dyn Transport>, ids: &[(&str, &str)]) -> Self {
        Self::from_entity(Entity::seed(transport, ids))
    }

    /// Creates a loaded handle from a full JSON object.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidResponse`] if `value` is not an object.
    fn from_value(transport: Arc<dyn Transport>, value: Value) -> Result<Self, ApiError> {
        Entity::from_value(transport, value, true).map(Self::from_entity)
    }

    /// Returns the canonical API path of this object.
    ///
    /// Identifying fields missing from the data leave their placeholder
    /// in place.
    #[must_use]
    fn base_api_path(&self) -> String {
        let entity = self.entity();
        let ids: Vec<(&str, &str)> = Self::ID_FIELDS
            .iter()
            .filter_map(|field| entity.peek_str(field).map(|value| (*field, value)))
            .collect();
        build_path(Self::PATH, &ids)
    }

    /// Returns the transport backing this handle.
    #[must_use]
    fn transport(&self) -> &Arc<dyn Transport> {
        self.entity().transport()
    }

    /// Returns the `id` field.
    #[must_use]
    fn id(&self) -> &str {
        self.entity().id()
    }

    /// Returns `true` once the full server state has been fetched.
    #[must_use]
    fn is_loaded(&self) -> bool {
        self.entity().is_loaded()
    }

    /// Fetches the full server state unless already loaded.
    ///
    /// # Errors
    ///
    /// Propagates the load error; the handle is left unchanged.
    async fn load(&mut self) -> Result<(), ApiError> {
        let path = self.base_api_path();
        self.entity_mut().load(&path).await
    }

    /// Reads a field, loading on first access to an unknown field.
    ///
    /// # Errors
    ///
    /// Propagates the load error.
    async fn get(&mut self, name: &str) -> Result<Option<Value>, ApiError> {
        let path = self.base_api_path();
        self.entity_mut().get(&path, name).await
    }

    /// Reads a field and deserializes it into `T`.
    ///
    /// # Errors
    ///
    /// Propagates the load error, or returns [`ApiError::InvalidResponse`]
    /// if the value has the wrong shape.
    async fn get_as<T: DeserializeOwned>(&mut self, name: &str) -> Result<Option<T>, ApiError> {
        let path = self.base_api_path();
        self.entity_mut().get_as(&path, name).await
    }

    /// Reads a Unix timestamp field as a UTC date-time.
    ///
    /// # Errors
    ///
    /// Propagates the load error, or returns [`ApiError::InvalidResponse`]
    /// if the value is not a timestamp.
    async fn get_timestamp(&mut self, name: &str) -> Result<Option<DateTime<Utc>>, ApiError> {
        let path = self.base_api_path();
        self.entity_mut().get_timestamp(&path, name).await
    }

    /// Sets a field locally.
    fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.entity_mut().set(name, value.into());
    }

    /// Sets a custom variable locally. A `null` value deletes it on save.
    fn set_var(&mut self, name: &str, value: impl Into<Value>) {
        self.entity_mut().set_var(name, value.into());
    }

    /// Loads the object and returns its custom variables.
    ///
    /// # Errors
    ///
    /// Propagates the load error.
    async fn vars(&mut self) -> Result<&VariableBag, ApiError> {
        self.load().await?;
        Ok(self.entity().vars())
    }

    /// Returns the custom variables for local editing, without loading.
    fn vars_mut(&mut self) -> &mut VariableBag {
        self.entity_mut().vars_mut()
    }
}

/// A resource whose fields can be updated through the API.
#[allow(async_fn_in_trait)]
pub trait SavableResource: Resource {
    /// Sends the locally changed fields and variables to the server.
    ///
    /// # Errors
    ///
    /// Propagates the request error; local changes are kept for a retry.
    async fn save(&mut self) -> Result<(), ApiError> {
        let path = self.base_api_path();
        self.entity_mut().save(&path).await
    }
}

/// Serializes an options struct into request params.
///
/// `None` fields are expected to be skipped by the struct's serde attributes.
///
/// # Errors
///
/// Returns [`InvalidHttpRequestError::ParamsNotObject`] if the value does
/// not serialize to a JSON object.
pub fn to_params<T: Serialize>(options: &T) -> Result<Map<String, Value>, ApiError> {
    match serde_json::to_value(options) {
        Ok(Value::Object(params)) => Ok(params),
        _ => Err(InvalidHttpRequestError::ParamsNotObject.into()),
    }
}

/// Issues a request and decodes the response body as one loaded resource.
pub(crate) async fn request_resource<T: Resource>(
    transport: &Arc<dyn Transport>,
    method: HttpMethod,
    path: &str,
    params: Option<Map<String, Value>>,
) -> Result<T, ApiError> {
    let body = transport.request(method, path, params).await?;
    T::from_value(Arc::clone(transport), body)
}

/// Issues a request whose response body is a JSON array.
pub(crate) async fn request_list(
    transport: &Arc<dyn Transport>,
    method: HttpMethod,
    path: &str,
    params: Option<Map<String, Value>>,
) -> Result<Vec<Value>, ApiError> {
    match transport.request(method, path, params).await? {
        Value::Array(items) => Ok(items),
        _ => Err(ApiError::invalid_response(format!(
            "expected an array from {method} {path}"
        ))),
    }
}

/// Deletes the remote object behind `resource`.
pub(crate) async fn delete<T: Resource>(resource: &T) -> Result<(), ApiError> {
    let path = resource.base_api_path();
    resource
        .transport()
        .request(HttpMethod::Delete, &path, None)
        .await
        .map(drop)
}

/// Appends percent-encoded segments to the path of `resource`.
pub(crate) fn child_path<T: Resource>(resource: &T, segments: &[&str]) -> String {
    let mut path = resource.base_api_path();
    for segment in segments {
        path.push('/');
        path.push_str(&encode_segment(segment));
    }
    path
}

/// Builds a cursor over a collection of `T`.
pub(crate) fn cursor<T: Resource>(
    transport: &Arc<dyn Transport>,
    path: String,
    params: Option<Map<String, Value>>,
) -> ApiCursor<T> {
    ApiCursor::for_resource(Arc::clone(transport), path, params.unwrap_or_default())
}

/// Declares a resource wrapper: the struct, its [`Resource`] impl, and
/// `Debug`/`Display` impls.
macro_rules! declare_resource {
    (
        $(#[$meta:meta])*
        $name:ident => $path:literal, [$($id:literal),+ $(,)?]
    ) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name {
            entity: $crate::rest::Entity,
        }

        impl $crate::rest::Resource for $name {
            const NAME: &'static str = stringify!($name);
            const PATH: &'static str = $path;
            const ID_FIELDS: &'static [&'static str] = &[$($id),+];

            fn from_entity(entity: $crate::rest::Entity) -> Self {
                Self { entity }
            }

            fn entity(&self) -> &$crate::rest::Entity {
                &self.entity
            }

            fn entity_mut(&mut self) -> &mut $crate::rest::Entity {
                &mut self.entity
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                self.entity.describe(f, stringify!($name))
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("entity", &self.entity)
                    .finish()
            }
        }
    };
}

/// Generates lazy typed getters named after their fields.
macro_rules! field_getters {
    ($name:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        impl $name {
            $(
                #[doc = concat!("Returns the `", stringify!($field), "` field, loading if needed.")]
                ///
                /// # Errors
                ///
                /// Propagates the load error.
                pub async fn $field(&mut self) -> Result<Option<$ty>, $crate::ApiError> {
                    $crate::rest::Resource::get_as(self, stringify!($field)).await
                }
            )*
        }
    };
}

/// Generates lazy getters for Unix timestamp fields.
macro_rules! timestamp_getters {
    ($name:ident { $($field:ident),* $(,)? }) => {
        impl $name {
            $(
                #[doc = concat!("Returns the `", stringify!($field), "` timestamp, loading if needed.")]
                ///
                /// # Errors
                ///
                /// Propagates the load error.
                pub async fn $field(
                    &mut self,
                ) -> Result<Option<::chrono::DateTime<::chrono::Utc>>, $crate::ApiError> {
                    $crate::rest::Resource::get_timestamp(self, stringify!($field)).await
                }
            )*
        }
    };
}

/// Generates local setters for writable fields.
macro_rules! field_setters {
    ($name:ident { $($setter:ident => $field:ident : $ty:ty),* $(,)? }) => {
        impl $name {
            $(
                #[doc = concat!("Sets `", stringify!($field), "` locally; sent on the next save.")]
                pub fn $setter(&mut self, value: impl Into<$ty>) {
                    let value: $ty = value.into();
                    $crate::rest::Resource::set(self, stringify!($field), value);
                }
            )*
        }
    };
}

pub(crate) use declare_resource;
pub(crate) use field_getters;
pub(crate) use field_setters;
pub(crate) use timestamp_getters;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::FakeTransport;
    use serde_json::json;

    declare_resource! {
        /// A nested resource used to exercise the provided methods.
        Widget => "/projects/{project_id}/widgets/{id}", ["project_id", "id"]
    }

    impl SavableResource for Widget {}

    field_getters!(Widget {
        name: String,
        size: u64,
        tags: Vec<String>,
    });

    timestamp_getters!(Widget { time_created });

    field_setters!(Widget {
        set_name => name: String,
    });

    fn widget(transport: &FakeTransport) -> Widget {
        Widget::init(Arc::new(transport.clone()), &[("project_id", "PJ1"), ("id", "W/1")])
    }

    #[test]
    fn test_base_api_path_encodes_identifying_fields() {
        let widget = widget(&FakeTransport::new());
        assert_eq!(widget.base_api_path(), "/projects/PJ1/widgets/W%2F1");
        assert_eq!(widget.id(), "W/1");
    }

    #[tokio::test]
    async fn test_generated_getters_load_lazily() {
        let transport = FakeTransport::new();
        transport.push_response(json!({
            "id": "W/1",
            "project_id": "PJ1",
            "name": "Gear",
            "size": 3,
            "tags": ["blue", "small"],
            "time_created": 1_600_000_000
        }));
        let mut widget = widget(&transport);

        assert_eq!(widget.name().await.unwrap().as_deref(), Some("Gear"));
        assert_eq!(widget.size().await.unwrap(), Some(3));
        assert_eq!(
            widget.tags().await.unwrap(),
            Some(vec!["blue".to_string(), "small".to_string()])
        );
        assert_eq!(
            widget.time_created().await.unwrap().map(|t| t.timestamp()),
            Some(1_600_000_000)
        );
        assert_eq!(transport.calls().len(), 1);
        assert_eq!(transport.last_call().path, "/projects/PJ1/widgets/W%2F1");
    }

    #[tokio::test]
    async fn test_setters_and_save() {
        let transport = FakeTransport::new();
        transport.push_response(json!({}));
        let mut widget = widget(&transport);

        widget.set_name("Cog");
        widget.set_var("color", "red");
        assert_eq!(widget.name().await.unwrap().as_deref(), Some("Cog"));
        assert!(transport.calls().is_empty());

        widget.save().await.unwrap();

        let call = transport.last_call();
        assert_eq!(call.method, HttpMethod::Post);
        assert_eq!(
            call.params.map(Value::Object),
            Some(json!({"name": "Cog", "vars": {"color": "red"}}))
        );
    }

    #[tokio::test]
    async fn test_vars_loads_first() {
        let transport = FakeTransport::new();
        transport.push_response(json!({"id": "W/1", "vars": {"a": 1}}));
        let mut widget = widget(&transport);

        let vars = widget.vars().await.unwrap();
        assert_eq!(vars.get("a"), Some(&json!(1)));
        assert!(widget.is_loaded());
    }

    #[test]
    fn test_display_includes_name_and_load_state() {
        let widget = widget(&FakeTransport::new());
        let text = widget.to_string();

        assert!(text.starts_with("Widget (not loaded) JSON: "));
        assert!(text.contains("\"project_id\":\"PJ1\""));
        assert!(!text.contains("vars"));
    }

    #[test]
    fn test_display_shows_variables() {
        let transport = Arc::new(FakeTransport::new());
        let widget = Widget::from_value(
            transport,
            json!({"id": "W1", "project_id": "PJ1", "vars": {"color": "red"}}),
        )
        .unwrap();

        let text = widget.to_string();

        assert!(text.starts_with("Widget JSON: "));
        assert!(text.contains("\"vars\":{\"color\":\"red\"}"));
        assert!(widget.entity().data().get("vars").is_none());
    }

    #[test]
    fn test_child_path_encodes_segments() {
        let widget = widget(&FakeTransport::new());
        assert_eq!(
            child_path(&widget, &["fields", "due date"]),
            "/projects/PJ1/widgets/W%2F1/fields/due%20date"
        );
    }

    #[tokio::test]
    async fn test_delete_and_list_helpers() {
        let transport = FakeTransport::new();
        transport.push_response(Value::Null);
        transport.push_response(json!({"not": "a list"}));
        let widget = widget(&transport);

        delete(&widget).await.unwrap();
        assert_eq!(transport.last_call().method, HttpMethod::Delete);

        let error = request_list(widget.transport(), HttpMethod::Get, "/projects/PJ1/widgets", None)
            .await
            .unwrap_err();
        assert!(matches!(error, ApiError::InvalidResponse { .. }));
    }

    #[test]
    fn test_to_params_rejects_non_objects() {
        #[derive(Serialize)]
        struct Options {
            content: String,
        }

        let params = to_params(&Options {
            content: "hi".to_string(),
        })
        .unwrap();
        assert_eq!(params.get("content"), Some(&json!("hi")));

        let error = to_params(&"just a string").unwrap_err();
        assert_eq!(
            error,
            ApiError::InvalidRequest(InvalidHttpRequestError::ParamsNotObject)
        );
    }
}
