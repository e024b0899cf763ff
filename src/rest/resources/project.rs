//! Project resource implementation.
//!
//! The project is the root of almost every other resource: contacts,
//! messages, groups, labels, tables, services, phones and routes all live
//! under `/projects/{project_id}/...`.
//!
//! # Example
//!
//! ```rust,ignore
//! use telerivet::rest::resources::{ContactOptions, SendMessageOptions};
//! use telerivet::rest::{QueryParams, Resource};
//!
//! let project = client.init_project_by_id("PJ123");
//!
//! let message = project
//!     .send_message(SendMessageOptions::text("+16505550123", "Hello!"))
//!     .await?;
//!
//! let contact = project
//!     .get_or_create_contact(ContactOptions {
//!         phone_number: Some("+16505550123".to_string()),
//!         name: Some("Ann".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let mut unread = project.query_messages(QueryParams::new().filter("starred", true));
//! while let Some(message) = unread.next().await? {
//!     println!("{message}");
//! }
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::{ApiError, HttpMethod};
use crate::rest::resource::{
    child_path, cursor, declare_resource, field_getters, field_setters, request_list,
    request_resource, to_params,
};
use crate::rest::{ApiCursor, QueryParams, Resource, SavableResource};

use super::common::{ContactOptions, ScheduleMessageOptions, SendMessageOptions};
use super::{
    AirtimeTransaction, Broadcast, Contact, DataTable, Group, Label, Message, Phone,
    RelativeScheduledMessage, Route, ScheduledMessage, Service,
};

declare_resource! {
    /// A project: the container for contacts, messages and everything
    /// else a messaging deployment uses.
    Project => "/projects/{id}", ["id"]
}

impl SavableResource for Project {}

field_getters!(Project {
    name: String,
    timezone_id: String,
    url_slug: String,
    default_route_id: String,
    auto_create_contacts: bool,
    message_retention_days: u64,
    organization_id: String,
});

field_setters!(Project {
    set_name => name: String,
    set_timezone_id => timezone_id: String,
    set_url_slug => url_slug: String,
    set_default_route_id => default_route_id: String,
    set_auto_create_contacts => auto_create_contacts: bool,
    set_message_retention_days => message_retention_days: u64,
});

/// Messages created by [`Project::send_multi`].
#[derive(Debug)]
pub struct MultipleMessages {
    /// The created messages, in the order of the request.
    pub messages: Vec<Message>,

    /// The broadcast grouping the messages, if one was created.
    pub broadcast_id: Option<String>,
}

/// Generates `query_*`, `get_*_by_id` and `init_*_by_id` for collections
/// nested directly under a project.
macro_rules! project_collections {
    ($($resource:ident at $segment:literal => $query:ident, $get:ident, $init:ident;)*) => {
        impl Project {
            $(
                #[doc = concat!("Queries `", stringify!($resource), "` objects in this project.")]
                #[must_use]
                pub fn $query(&self, params: QueryParams) -> ApiCursor<$resource> {
                    cursor(self.transport(), child_path(self, &[$segment]), Some(params.into_params()))
                }

                #[doc = concat!("Fetches a `", stringify!($resource), "` by id.")]
                ///
                /// # Errors
                ///
                /// Returns [`ApiError::NotFound`] if it does not exist.
                pub async fn $get(&self, id: &str) -> Result<$resource, ApiError> {
                    let path = child_path(self, &[$segment, id]);
                    request_resource(self.transport(), HttpMethod::Get, &path, None).await
                }

                #[doc = concat!("Creates a handle to a `", stringify!($resource), "` without fetching it.")]
                #[must_use]
                pub fn $init(&self, id: &str) -> $resource {
                    $resource::init(
                        Arc::clone(self.transport()),
                        &[("project_id", self.id()), ("id", id)],
                    )
                }
            )*
        }
    };
}

project_collections! {
    Contact at "contacts" => query_contacts, get_contact_by_id, init_contact_by_id;
    Phone at "phones" => query_phones, get_phone_by_id, init_phone_by_id;
    Message at "messages" => query_messages, get_message_by_id, init_message_by_id;
    Broadcast at "broadcasts" => query_broadcasts, get_broadcast_by_id, init_broadcast_by_id;
    Group at "groups" => query_groups, get_group_by_id, init_group_by_id;
    Label at "labels" => query_labels, get_label_by_id, init_label_by_id;
    DataTable at "tables" => query_data_tables, get_data_table_by_id, init_data_table_by_id;
    ScheduledMessage at "scheduled" =>
        query_scheduled_messages, get_scheduled_message_by_id, init_scheduled_message_by_id;
    RelativeScheduledMessage at "relative_scheduled" =>
        query_relative_scheduled_messages,
        get_relative_scheduled_message_by_id,
        init_relative_scheduled_message_by_id;
    Service at "services" => query_services, get_service_by_id, init_service_by_id;
    Route at "routes" => query_routes, get_route_by_id, init_route_by_id;
    AirtimeTransaction at "airtime_transactions" =>
        query_airtime_transactions, get_airtime_transaction_by_id, init_airtime_transaction_by_id;
}

impl Project {
    /// Sends one message.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidParameter`] for a bad recipient or
    /// option, or the request error.
    pub async fn send_message(&self, options: SendMessageOptions) -> Result<Message, ApiError> {
        let path = child_path(self, &["messages", "send"]);
        let params = to_params(&options)?;
        request_resource(self.transport(), HttpMethod::Post, &path, Some(params)).await
    }

    /// Sends a message to a group or a list of numbers as one broadcast.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn send_broadcast(&self, options: Map<String, Value>) -> Result<Broadcast, ApiError> {
        let path = child_path(self, &["send_broadcast"]);
        request_resource(self.transport(), HttpMethod::Post, &path, Some(options)).await
    }

    /// Sends different messages to different recipients in one request.
    ///
    /// `options` holds a `messages` array plus defaults shared by every
    /// message.
    ///
    /// # Errors
    ///
    /// Propagates the request error, or returns
    /// [`ApiError::InvalidResponse`] if the body lacks a `messages` array.
    pub async fn send_multi(&self, options: Map<String, Value>) -> Result<MultipleMessages, ApiError> {
        let path = child_path(self, &["send_multi"]);
        let body = self
            .transport()
            .request(HttpMethod::Post, &path, Some(options))
            .await?;

        let Some(Value::Array(items)) = body.get("messages") else {
            return Err(ApiError::invalid_response(format!(
                "missing 'messages' array in response from {path}"
            )));
        };
        let messages = items
            .iter()
            .map(|item| Message::from_value(Arc::clone(self.transport()), item.clone()))
            .collect::<Result<Vec<_>, _>>()?;
        let broadcast_id = body
            .get("broadcast_id")
            .and_then(Value::as_str)
            .map(ToString::to_string);

        Ok(MultipleMessages {
            messages,
            broadcast_id,
        })
    }

    /// Schedules a message for later, optionally repeating.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn schedule_message(
        &self,
        options: ScheduleMessageOptions,
    ) -> Result<ScheduledMessage, ApiError> {
        let path = child_path(self, &["scheduled"]);
        let params = to_params(&options)?;
        request_resource(self.transport(), HttpMethod::Post, &path, Some(params)).await
    }

    /// Schedules a message relative to a date variable of each recipient.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn create_relative_scheduled_message(
        &self,
        options: Map<String, Value>,
    ) -> Result<RelativeScheduledMessage, ApiError> {
        let path = child_path(self, &["relative_scheduled"]);
        request_resource(self.transport(), HttpMethod::Post, &path, Some(options)).await
    }

    /// Records an incoming message as if a phone had received it.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn receive_message(&self, options: Map<String, Value>) -> Result<Message, ApiError> {
        let path = child_path(self, &["messages", "receive"]);
        request_resource(self.transport(), HttpMethod::Post, &path, Some(options)).await
    }

    /// Finds a contact matching `options` and updates it, or creates one.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn get_or_create_contact(&self, options: ContactOptions) -> Result<Contact, ApiError> {
        let path = child_path(self, &["contacts"]);
        let params = to_params(&options)?;
        request_resource(self.transport(), HttpMethod::Post, &path, Some(params)).await
    }

    /// Creates or updates many contacts at once.
    ///
    /// `options` holds a `contacts` array of contact objects. The result has
    /// one entry per input row, `None` where the row was not imported.
    ///
    /// # Errors
    ///
    /// Propagates the request error, or returns
    /// [`ApiError::InvalidResponse`] if the body lacks a `contacts` array.
    pub async fn import_contacts(
        &self,
        options: Map<String, Value>,
    ) -> Result<Vec<Option<Contact>>, ApiError> {
        let path = child_path(self, &["import_contacts"]);
        let body = self
            .transport()
            .request(HttpMethod::Post, &path, Some(options))
            .await?;

        let Some(Value::Array(items)) = body.get("contacts") else {
            return Err(ApiError::invalid_response(format!(
                "missing 'contacts' array in response from {path}"
            )));
        };
        items
            .iter()
            .map(|item| match item {
                Value::Object(_) => {
                    Contact::from_value(Arc::clone(self.transport()), item.clone()).map(Some)
                }
                _ => Ok(None),
            })
            .collect()
    }

    /// Returns the group with this name, creating it if needed.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn get_or_create_group(&self, name: &str) -> Result<Group, ApiError> {
        self.get_or_create_named("groups", name).await
    }

    /// Returns the label with this name, creating it if needed.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn get_or_create_label(&self, name: &str) -> Result<Label, ApiError> {
        self.get_or_create_named("labels", name).await
    }

    /// Returns the data table with this name, creating it if needed.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn get_or_create_data_table(&self, name: &str) -> Result<DataTable, ApiError> {
        self.get_or_create_named("tables", name).await
    }

    /// Fetches the definitions of the project's custom contact fields.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn get_contact_fields(&self) -> Result<Vec<Value>, ApiError> {
        let path = child_path(self, &["contact_fields"]);
        request_list(self.transport(), HttpMethod::Get, &path, None).await
    }

    /// Updates display metadata of one custom contact field.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn set_contact_field_metadata(
        &self,
        variable: &str,
        options: Map<String, Value>,
    ) -> Result<Value, ApiError> {
        let path = child_path(self, &["contact_fields", variable]);
        self.transport()
            .request(HttpMethod::Post, &path, Some(options))
            .await
    }

    /// Fetches message statistics. `options` holds `start_date`,
    /// `end_date`, `rollup` and `properties`.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn get_message_stats(&self, options: Map<String, Value>) -> Result<Value, ApiError> {
        let path = child_path(self, &["message_stats"]);
        self.transport()
            .request(HttpMethod::Get, &path, Some(options))
            .await
    }

    async fn get_or_create_named<T: Resource>(
        &self,
        segment: &str,
        name: &str,
    ) -> Result<T, ApiError> {
        let path = child_path(self, &[segment]);
        let mut params = Map::new();
        params.insert("name".to_string(), Value::from(name));
        request_resource(self.transport(), HttpMethod::Post, &path, Some(params)).await
    }
}
