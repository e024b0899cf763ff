//! Service and contact service state resources.
//!
//! Services are automated actions (polls, auto-replies, webhooks, custom
//! scripts) that run on messages or contacts. A service can keep a
//! per-contact state, exposed as [`ContactServiceState`].

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::clients::{ApiError, HttpMethod};
use crate::rest::resource::{
    child_path, cursor, declare_resource, delete, field_getters, field_setters, request_resource,
    timestamp_getters,
};
use crate::rest::{ApiCursor, QueryParams, Resource, SavableResource};

use super::Contact;

declare_resource! {
    /// An automated service in a project.
    Service => "/projects/{project_id}/services/{id}", ["project_id", "id"]
}

impl SavableResource for Service {}

field_getters!(Service {
    name: String,
    active: bool,
    priority: i64,
    contexts: Map<String, Value>,
    service_type: String,
    response_table_id: String,
    phone_ids: Vec<String>,
    apply_mode: String,
    contact_number_filter: String,
    show_action: bool,
    direction: String,
    message_types: Vec<String>,
    project_id: String,
});

field_setters!(Service {
    set_name => name: String,
    set_active => active: bool,
    set_priority => priority: i64,
    set_apply_mode => apply_mode: String,
    set_show_action => show_action: bool,
});

impl Service {
    /// Runs the service manually, e.g. on a contact or a message.
    ///
    /// `options` holds `context` (`message`, `contact`, `project`, ...)
    /// plus the id the context needs.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn invoke(&self, options: Map<String, Value>) -> Result<Value, ApiError> {
        let path = child_path(self, &["invoke"]);
        self.transport()
            .request(HttpMethod::Post, &path, Some(options))
            .await
    }

    /// Queries the states this service keeps for contacts.
    #[must_use]
    pub fn query_contact_states(&self, params: QueryParams) -> ApiCursor<ContactServiceState> {
        cursor(self.transport(), child_path(self, &["states"]), Some(params.into_params()))
    }

    /// Fetches the state this service keeps for `contact`.
    ///
    /// Returns `Ok(None)` when the contact has no state.
    ///
    /// # Errors
    ///
    /// Propagates every request error other than not-found.
    pub async fn get_contact_state(
        &self,
        contact: &Contact,
    ) -> Result<Option<ContactServiceState>, ApiError> {
        let path = child_path(self, &["states", contact.id()]);
        match request_resource(self.transport(), HttpMethod::Get, &path, None).await {
            Ok(state) => Ok(Some(state)),
            Err(error) if error.is_not_found() => Ok(None),
            Err(error) => Err(error),
        }
    }

    /// Sets the state for `contact`. `options` holds `id` and/or `vars`.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn set_contact_state(
        &self,
        contact: &Contact,
        options: Map<String, Value>,
    ) -> Result<ContactServiceState, ApiError> {
        let path = child_path(self, &["states", contact.id()]);
        request_resource(self.transport(), HttpMethod::Post, &path, Some(options)).await
    }

    /// Clears the state for `contact`.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn reset_contact_state(
        &self,
        contact: &Contact,
    ) -> Result<ContactServiceState, ApiError> {
        let path = child_path(self, &["states", contact.id()]);
        request_resource(self.transport(), HttpMethod::Delete, &path, None).await
    }

    /// Fetches the service's type-specific configuration.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn get_config(&self) -> Result<Value, ApiError> {
        let path = child_path(self, &["config"]);
        self.transport().request(HttpMethod::Get, &path, None).await
    }

    /// Updates the service's type-specific configuration.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn set_config(&self, options: Map<String, Value>) -> Result<Value, ApiError> {
        let path = child_path(self, &["config"]);
        self.transport()
            .request(HttpMethod::Post, &path, Some(options))
            .await
    }

    /// Creates a handle to the state for `contact` without fetching it.
    #[must_use]
    pub fn init_contact_state(&self, contact: &Contact) -> ContactServiceState {
        let project_id = self.entity().peek_str("project_id").unwrap_or_default();
        ContactServiceState::init(
            Arc::clone(self.transport()),
            &[
                ("project_id", project_id),
                ("service_id", self.id()),
                ("contact_id", contact.id()),
            ],
        )
    }

    /// Deletes the service.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn delete(&self) -> Result<(), ApiError> {
        delete(self).await
    }
}

declare_resource! {
    /// The state a service keeps for one contact, e.g. the current step
    /// of a poll.
    ContactServiceState =>
        "/projects/{project_id}/services/{service_id}/states/{contact_id}",
        ["project_id", "service_id", "contact_id"]
}

impl SavableResource for ContactServiceState {}

field_getters!(ContactServiceState {
    contact_id: String,
    service_id: String,
    project_id: String,
});

timestamp_getters!(ContactServiceState {
    time_created,
    time_updated,
});

impl ContactServiceState {
    /// Sets the state id locally.
    pub fn set_state_id(&mut self, id: impl Into<String>) {
        self.set("id", id.into());
    }
}
