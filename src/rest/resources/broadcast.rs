//! Broadcast resource implementation.

use serde_json::{Map, Value};

use crate::clients::{ApiError, HttpMethod};
use crate::rest::resource::{
    child_path, declare_resource, field_getters, request_resource, timestamp_getters,
};
use crate::rest::Resource;

use super::common::{MessageStatus, MessageType};

declare_resource! {
    /// A message sent to many recipients at once.
    ///
    /// Broadcasts are read-only; they are created with
    /// [`Project::send_broadcast`](super::Project::send_broadcast).
    Broadcast => "/projects/{project_id}/broadcasts/{id}", ["project_id", "id"]
}

field_getters!(Broadcast {
    recipients: Vec<Value>,
    title: String,
    status_counts: Map<String, Value>,
    message_type: MessageType,
    content: String,
    audio_url: String,
    replace_variables: bool,
    status: MessageStatus,
    source: String,
    simulated: bool,
    track_clicks: bool,
    label_ids: Vec<String>,
    media: Vec<Value>,
    route_params: Map<String, Value>,
    price: f64,
    price_currency: String,
    reply_count: u64,
    route_id: String,
    service_id: String,
    user_id: String,
    project_id: String,
});

timestamp_getters!(Broadcast {
    time_created,
    last_message_time,
    last_send_time,
    last_reply_time,
});

impl Broadcast {
    /// Cancels messages of this broadcast that have not been sent yet.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn cancel(&self) -> Result<Self, ApiError> {
        let path = child_path(self, &["cancel"]);
        request_resource(self.transport(), HttpMethod::Post, &path, None).await
    }
}
