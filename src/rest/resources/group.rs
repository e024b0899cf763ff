//! Group resource implementation.

use crate::clients::ApiError;
use crate::rest::resource::{
    child_path, cursor, declare_resource, delete, field_getters, field_setters, timestamp_getters,
};
use crate::rest::{ApiCursor, QueryParams, Resource, SavableResource};

use super::{Contact, ScheduledMessage};

declare_resource! {
    /// A named set of contacts. Dynamic groups are defined by a filter
    /// and cannot be edited by hand.
    Group => "/projects/{project_id}/groups/{id}", ["project_id", "id"]
}

impl SavableResource for Group {}

field_getters!(Group {
    name: String,
    dynamic: bool,
    num_members: u64,
    allow_sending: bool,
    add_time_variable: String,
    project_id: String,
});

timestamp_getters!(Group { time_created });

field_setters!(Group {
    set_name => name: String,
    set_allow_sending => allow_sending: bool,
    set_add_time_variable => add_time_variable: String,
});

impl Group {
    /// Queries the contacts in this group.
    #[must_use]
    pub fn query_contacts(&self, params: QueryParams) -> ApiCursor<Contact> {
        cursor(self.transport(), child_path(self, &["contacts"]), Some(params.into_params()))
    }

    /// Queries messages scheduled to this group.
    #[must_use]
    pub fn query_scheduled_messages(&self, params: QueryParams) -> ApiCursor<ScheduledMessage> {
        cursor(self.transport(), child_path(self, &["scheduled"]), Some(params.into_params()))
    }

    /// Deletes the group. Its contacts are kept.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn delete(&self) -> Result<(), ApiError> {
        delete(self).await
    }
}
