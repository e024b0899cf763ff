//! Contact resource implementation.
//!
//! A contact is a person the project exchanges messages with, identified by
//! phone number or another lookup key.
//!
//! # Example
//!
//! ```rust,ignore
//! use telerivet::rest::{QueryParams, Resource, SavableResource};
//!
//! let mut contact = project.get_contact_by_id("CT123").await?;
//! contact.set_name("Ann Smith");
//! contact.set_var("birthday", "1990-01-01");
//! contact.save().await?;
//!
//! let staff = project.init_group_by_id("CG1");
//! contact.add_to_group(&staff).await?;
//! assert!(contact.is_in_group(&staff).await?);
//! ```

use crate::clients::{ApiError, HttpMethod};
use crate::rest::resource::{
    child_path, cursor, declare_resource, delete, field_getters, field_setters, timestamp_getters,
};
use crate::rest::{ApiCursor, QueryParams, Resource, SavableResource};

use super::common::ConversationStatus;
use super::{id_set_contains, update_id_set, ContactServiceState, DataRow, Group, Message, ScheduledMessage};

const GROUP_IDS: &str = "group_ids";

declare_resource! {
    /// A person the project exchanges messages with.
    ///
    /// # Fields
    ///
    /// ## Writable Fields
    /// - `name`, `phone_number`, `send_blocked`, `conversation_status`,
    ///   `default_route_id`, `vars`
    ///
    /// ## Read-Only Fields
    /// - `id`, `project_id`, `group_ids`, message counters and timestamps
    Contact => "/projects/{project_id}/contacts/{id}", ["project_id", "id"]
}

impl SavableResource for Contact {}

field_getters!(Contact {
    name: String,
    phone_number: String,
    send_blocked: bool,
    conversation_status: ConversationStatus,
    message_count: u64,
    incoming_message_count: u64,
    outgoing_message_count: u64,
    last_message_id: String,
    default_route_id: String,
    group_ids: Vec<String>,
    url: String,
    project_id: String,
});

timestamp_getters!(Contact {
    time_created,
    time_updated,
    last_message_time,
    last_incoming_message_time,
    last_outgoing_message_time,
});

field_setters!(Contact {
    set_name => name: String,
    set_phone_number => phone_number: String,
    set_send_blocked => send_blocked: bool,
    set_default_route_id => default_route_id: String,
});

impl Contact {
    /// Sets the conversation state locally.
    pub fn set_conversation_status(&mut self, status: ConversationStatus) {
        self.set("conversation_status", status.as_str());
    }

    /// Returns `true` if the contact belongs to `group`. Loads the contact.
    ///
    /// # Errors
    ///
    /// Propagates the load error.
    pub async fn is_in_group(&mut self, group: &Group) -> Result<bool, ApiError> {
        self.load().await?;
        Ok(id_set_contains(self.entity(), GROUP_IDS, group.id()))
    }

    /// Adds the contact to `group`.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn add_to_group(&mut self, group: &Group) -> Result<(), ApiError> {
        let path = child_path(group, &["contacts", self.id()]);
        self.transport()
            .request(HttpMethod::Put, &path, None)
            .await?;
        let group_id = group.id().to_string();
        update_id_set(self.entity_mut(), GROUP_IDS, &group_id, true);
        Ok(())
    }

    /// Removes the contact from `group`.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn remove_from_group(&mut self, group: &Group) -> Result<(), ApiError> {
        let path = child_path(group, &["contacts", self.id()]);
        self.transport()
            .request(HttpMethod::Delete, &path, None)
            .await?;
        let group_id = group.id().to_string();
        update_id_set(self.entity_mut(), GROUP_IDS, &group_id, false);
        Ok(())
    }

    /// Queries messages sent to or from this contact.
    #[must_use]
    pub fn query_messages(&self, params: QueryParams) -> ApiCursor<Message> {
        cursor(self.transport(), child_path(self, &["messages"]), Some(params.into_params()))
    }

    /// Queries the groups this contact belongs to.
    #[must_use]
    pub fn query_groups(&self, params: QueryParams) -> ApiCursor<Group> {
        cursor(self.transport(), child_path(self, &["groups"]), Some(params.into_params()))
    }

    /// Queries messages scheduled to this contact.
    #[must_use]
    pub fn query_scheduled_messages(&self, params: QueryParams) -> ApiCursor<ScheduledMessage> {
        cursor(self.transport(), child_path(self, &["scheduled"]), Some(params.into_params()))
    }

    /// Queries data rows linked to this contact.
    #[must_use]
    pub fn query_data_rows(&self, params: QueryParams) -> ApiCursor<DataRow> {
        cursor(self.transport(), child_path(self, &["rows"]), Some(params.into_params()))
    }

    /// Queries this contact's states across services.
    #[must_use]
    pub fn query_service_states(&self, params: QueryParams) -> ApiCursor<ContactServiceState> {
        cursor(self.transport(), child_path(self, &["states"]), Some(params.into_params()))
    }

    /// Deletes the contact.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn delete(&self) -> Result<(), ApiError> {
        delete(self).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::FakeTransport;
    use serde_json::{json, Value};
    use std::sync::Arc;

    fn contact(transport: &FakeTransport) -> Contact {
        Contact::init(Arc::new(transport.clone()), &[("project_id", "PJ1"), ("id", "CT1")])
    }

    fn group(transport: &FakeTransport, id: &str) -> Group {
        Group::init(Arc::new(transport.clone()), &[("project_id", "PJ1"), ("id", id)])
    }

    #[tokio::test]
    async fn test_group_membership_round_trip() {
        let transport = FakeTransport::new();
        transport.push_response(json!({"id": "CT1", "project_id": "PJ1", "group_ids": ["CG1"]}));
        transport.push_response(Value::Null);
        transport.push_response(Value::Null);
        let mut contact = contact(&transport);
        let staff = group(&transport, "CG1");
        let vips = group(&transport, "CG2");

        assert!(contact.is_in_group(&staff).await.unwrap());
        assert!(!contact.is_in_group(&vips).await.unwrap());

        contact.add_to_group(&vips).await.unwrap();
        assert!(contact.is_in_group(&vips).await.unwrap());

        contact.remove_from_group(&staff).await.unwrap();
        assert!(!contact.is_in_group(&staff).await.unwrap());

        let calls = transport.calls();
        assert_eq!(calls.len(), 3);
        assert_eq!(calls[1].method, HttpMethod::Put);
        assert_eq!(calls[1].path, "/projects/PJ1/groups/CG2/contacts/CT1");
        assert_eq!(calls[2].method, HttpMethod::Delete);
        assert_eq!(calls[2].path, "/projects/PJ1/groups/CG1/contacts/CT1");
        assert!(!contact.entity().has_changes());
    }

    #[tokio::test]
    async fn test_add_to_group_on_unloaded_contact_does_not_fake_membership_list() {
        let transport = FakeTransport::new();
        transport.push_response(Value::Null);
        let mut contact = contact(&transport);

        contact.add_to_group(&group(&transport, "CG9")).await.unwrap();

        assert!(contact.entity().peek(GROUP_IDS).is_none());
    }

    #[tokio::test]
    async fn test_query_paths() {
        let transport = FakeTransport::new();
        let contact = contact(&transport);

        assert_eq!(contact.query_messages(QueryParams::new()).path(), "/projects/PJ1/contacts/CT1/messages");
        assert_eq!(contact.query_groups(QueryParams::new()).path(), "/projects/PJ1/contacts/CT1/groups");
        assert_eq!(
            contact.query_scheduled_messages(QueryParams::new()).path(),
            "/projects/PJ1/contacts/CT1/scheduled"
        );
        assert_eq!(contact.query_data_rows(QueryParams::new()).path(), "/projects/PJ1/contacts/CT1/rows");
        assert_eq!(
            contact.query_service_states(QueryParams::new()).path(),
            "/projects/PJ1/contacts/CT1/states"
        );
    }

    #[tokio::test]
    async fn test_save_sends_typed_setters() {
        let transport = FakeTransport::new();
        transport.push_response(json!({}));
        let mut contact = contact(&transport);

        contact.set_name("Ann");
        contact.set_send_blocked(true);
        contact.set_conversation_status(ConversationStatus::Closed);
        contact.save().await.unwrap();

        assert_eq!(
            transport.last_call().params.map(Value::Object),
            Some(json!({"name": "Ann", "send_blocked": true, "conversation_status": "closed"}))
        );
    }

    #[tokio::test]
    async fn test_delete_issues_delete() {
        let transport = FakeTransport::new();
        transport.push_response(Value::Null);

        contact(&transport).delete().await.unwrap();

        let call = transport.last_call();
        assert_eq!(call.method, HttpMethod::Delete);
        assert_eq!(call.path, "/projects/PJ1/contacts/CT1");
    }
}
