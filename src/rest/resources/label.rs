//! Label resource implementation.

use crate::clients::ApiError;
use crate::rest::resource::{
    child_path, cursor, declare_resource, delete, field_getters, field_setters, timestamp_getters,
};
use crate::rest::{ApiCursor, QueryParams, Resource, SavableResource};

use super::Message;

declare_resource! {
    /// A tag for organizing messages.
    Label => "/projects/{project_id}/labels/{id}", ["project_id", "id"]
}

impl SavableResource for Label {}

field_getters!(Label {
    name: String,
    project_id: String,
});

timestamp_getters!(Label { time_created });

field_setters!(Label {
    set_name => name: String,
});

impl Label {
    /// Queries messages with this label.
    #[must_use]
    pub fn query_messages(&self, params: QueryParams) -> ApiCursor<Message> {
        cursor(self.transport(), child_path(self, &["messages"]), Some(params.into_params()))
    }

    /// Deletes the label. Labelled messages are kept.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn delete(&self) -> Result<(), ApiError> {
        delete(self).await
    }
}
