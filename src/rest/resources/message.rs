//! Message resource implementation.
//!
//! Messages cover every channel the platform handles: SMS, MMS, USSD,
//! voice calls and chat apps, in both directions.
//!
//! # Example
//!
//! ```rust,ignore
//! let mut message = project.get_message_by_id("SM123").await?;
//! if message.status().await? == Some(MessageStatus::Failed) {
//!     let retry = message.resend(Map::new()).await?;
//! }
//!
//! let important = project.get_or_create_label("Important").await?;
//! message.add_label(&important).await?;
//! ```

use serde_json::{Map, Value};

use crate::clients::{ApiError, HttpMethod};
use crate::rest::resource::{
    child_path, declare_resource, delete, field_getters, field_setters, request_list,
    request_resource, timestamp_getters,
};
use crate::rest::{Resource, SavableResource};

use super::common::{MessageDirection, MessageStatus, MessageType};
use super::{id_set_contains, update_id_set, Label};

const LABEL_IDS: &str = "label_ids";

declare_resource! {
    /// A message sent or received by a project.
    ///
    /// # Fields
    ///
    /// ## Writable Fields
    /// - `starred`, `vars`
    ///
    /// ## Read-Only Fields
    /// - everything else, including `direction`, `status`, `content` and
    ///   the ids of the related contact, phone and broadcast
    Message => "/projects/{project_id}/messages/{id}", ["project_id", "id"]
}

impl SavableResource for Message {}

field_getters!(Message {
    direction: MessageDirection,
    status: MessageStatus,
    message_type: MessageType,
    source: String,
    from_number: String,
    to_number: String,
    content: String,
    starred: bool,
    simulated: bool,
    label_ids: Vec<String>,
    route_params: Map<String, Value>,
    error_message: String,
    external_id: String,
    num_parts: f64,
    price: f64,
    price_currency: String,
    duration: u64,
    ring_time: u64,
    audio_url: String,
    media: Vec<Value>,
    priority: u8,
    service_id: String,
    contact_id: String,
    phone_id: String,
    broadcast_id: String,
    scheduled_id: String,
    user_id: String,
    project_id: String,
    url: String,
});

timestamp_getters!(Message {
    time_created,
    time_sent,
    time_updated,
});

field_setters!(Message {
    set_starred => starred: bool,
});

impl Message {
    /// Returns `true` if `label` is applied to this message. Loads the message.
    ///
    /// # Errors
    ///
    /// Propagates the load error.
    pub async fn has_label(&mut self, label: &Label) -> Result<bool, ApiError> {
        self.load().await?;
        Ok(id_set_contains(self.entity(), LABEL_IDS, label.id()))
    }

    /// Applies `label` to this message.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn add_label(&mut self, label: &Label) -> Result<(), ApiError> {
        let path = child_path(label, &["messages", self.id()]);
        self.transport()
            .request(HttpMethod::Put, &path, None)
            .await?;
        let label_id = label.id().to_string();
        update_id_set(self.entity_mut(), LABEL_IDS, &label_id, true);
        Ok(())
    }

    /// Removes `label` from this message.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn remove_label(&mut self, label: &Label) -> Result<(), ApiError> {
        let path = child_path(label, &["messages", self.id()]);
        self.transport()
            .request(HttpMethod::Delete, &path, None)
            .await?;
        let label_id = label.id().to_string();
        update_id_set(self.entity_mut(), LABEL_IDS, &label_id, false);
        Ok(())
    }

    /// Fetches the parts of an MMS message.
    ///
    /// # Errors
    ///
    /// Propagates the request error, or returns
    /// [`ApiError::InvalidResponse`] if the body is not an array.
    pub async fn get_mms_parts(&self) -> Result<Vec<Value>, ApiError> {
        let path = child_path(self, &["mms_parts"]);
        request_list(self.transport(), HttpMethod::Get, &path, None).await
    }

    /// Sends a copy of this outgoing message. `options` may override the
    /// `route_id`.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn resend(&self, options: Map<String, Value>) -> Result<Self, ApiError> {
        let path = child_path(self, &["resend"]);
        request_resource(self.transport(), HttpMethod::Post, &path, Some(options)).await
    }

    /// Cancels sending this message if it has not been sent yet.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn cancel(&self) -> Result<Self, ApiError> {
        let path = child_path(self, &["cancel"]);
        request_resource(self.transport(), HttpMethod::Post, &path, None).await
    }

    /// Deletes the message.
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
    use serde_json::json;
    use std::sync::Arc;

    fn message(transport: &FakeTransport) -> Message {
        Message::from_value(
            Arc::new(transport.clone()),
            json!({"id": "SM1", "project_id": "PJ1", "label_ids": ["LB1"], "status": "failed"}),
        )
        .unwrap()
    }

    fn label(transport: &FakeTransport, id: &str) -> Label {
        Label::init(Arc::new(transport.clone()), &[("project_id", "PJ1"), ("id", id)])
    }

    #[tokio::test]
    async fn test_label_bookkeeping() {
        let transport = FakeTransport::new();
        transport.push_response(Value::Null);
        transport.push_response(Value::Null);
        let mut message = message(&transport);
        let old = label(&transport, "LB1");
        let new = label(&transport, "LB2");

        assert!(message.has_label(&old).await.unwrap());
        message.add_label(&new).await.unwrap();
        message.remove_label(&old).await.unwrap();

        assert!(message.has_label(&new).await.unwrap());
        assert!(!message.has_label(&old).await.unwrap());
        assert_eq!(message.label_ids().await.unwrap(), Some(vec!["LB2".to_string()]));

        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].path, "/projects/PJ1/labels/LB2/messages/SM1");
        assert_eq!(calls[0].method, HttpMethod::Put);
        assert_eq!(calls[1].method, HttpMethod::Delete);
    }

    #[tokio::test]
    async fn test_typed_status_and_resend() {
        let transport = FakeTransport::new();
        transport.push_response(json!({"id": "SM2", "project_id": "PJ1", "status": "queued"}));
        let mut message = message(&transport);

        assert_eq!(message.status().await.unwrap(), Some(MessageStatus::Failed));

        let mut options = Map::new();
        options.insert("route_id".to_string(), json!("PN2"));
        let mut copy = message.resend(options).await.unwrap();

        assert_eq!(copy.id(), "SM2");
        assert!(copy.is_loaded());
        assert_eq!(copy.status().await.unwrap(), Some(MessageStatus::Queued));
        let call = transport.last_call();
        assert_eq!(call.path, "/projects/PJ1/messages/SM1/resend");
        assert_eq!(call.param("route_id"), Some(&json!("PN2")));
    }

    #[tokio::test]
    async fn test_cancel_and_mms_parts() {
        let transport = FakeTransport::new();
        transport.push_response(json!({"id": "SM1", "project_id": "PJ1", "status": "cancelled"}));
        transport.push_response(json!([{"cid": "p1", "type": "image/png"}]));
        let message = message(&transport);

        let mut cancelled = message.cancel().await.unwrap();
        assert_eq!(cancelled.status().await.unwrap(), Some(MessageStatus::Cancelled));

        let parts = message.get_mms_parts().await.unwrap();
        assert_eq!(parts.len(), 1);
        assert_eq!(transport.last_call().path, "/projects/PJ1/messages/SM1/mms_parts");
    }

    #[tokio::test]
    async fn test_starred_is_savable() {
        let transport = FakeTransport::new();
        transport.push_response(json!({}));
        let mut message = message(&transport);

        message.set_starred(true);
        message.save().await.unwrap();

        assert_eq!(
            transport.last_call().params.map(Value::Object),
            Some(json!({"starred": true}))
        );
    }
}
