//! Scheduled and relative scheduled message resources.
//!
//! A [`ScheduledMessage`] fires at fixed times. A
//! [`RelativeScheduledMessage`] fires relative to a date stored in a
//! contact variable, e.g. three days before `vars.due_date`.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

use crate::clients::ApiError;
use crate::rest::resource::{declare_resource, delete, field_getters, field_setters, timestamp_getters};
use crate::rest::{Resource, SavableResource};

use super::common::MessageType;

declare_resource! {
    /// A message scheduled for a fixed time, optionally repeating.
    ScheduledMessage => "/projects/{project_id}/scheduled/{id}", ["project_id", "id"]
}

impl SavableResource for ScheduledMessage {}

field_getters!(ScheduledMessage {
    content: String,
    rrule: String,
    timezone_id: String,
    recipients: Vec<Value>,
    recipients_str: String,
    group_id: String,
    contact_id: String,
    to_number: String,
    route_id: String,
    service_id: String,
    audio_url: String,
    message_type: MessageType,
    occurrences: u64,
    replace_variables: bool,
    track_clicks: bool,
    media: Vec<Value>,
    route_params: Map<String, Value>,
    label_ids: Vec<String>,
    relative_scheduled_id: String,
    project_id: String,
});

timestamp_getters!(ScheduledMessage {
    time_created,
    start_time,
    end_time,
    prev_time,
    next_time,
});

field_setters!(ScheduledMessage {
    set_content => content: String,
    set_rrule => rrule: String,
    set_timezone_id => timezone_id: String,
    set_route_id => route_id: String,
    set_replace_variables => replace_variables: bool,
    set_label_ids => label_ids: Vec<String>,
});

impl ScheduledMessage {
    /// Sets the first send time locally.
    pub fn set_start_time(&mut self, start_time: DateTime<Utc>) {
        self.set("start_time", start_time.timestamp());
    }

    /// Sets the time after which the message stops repeating.
    pub fn set_end_time(&mut self, end_time: DateTime<Utc>) {
        self.set("end_time", end_time.timestamp());
    }

    /// Cancels the scheduled message.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn delete(&self) -> Result<(), ApiError> {
        delete(self).await
    }
}

declare_resource! {
    /// A message scheduled relative to a date in each recipient's contact
    /// variables.
    RelativeScheduledMessage => "/projects/{project_id}/relative_scheduled/{id}", ["project_id", "id"]
}

impl SavableResource for RelativeScheduledMessage {}

field_getters!(RelativeScheduledMessage {
    content: String,
    time_of_day: String,
    date_variable: String,
    offset_scale: String,
    offset_count: i64,
    rrule: String,
    timezone_id: String,
    recipients_str: String,
    group_id: String,
    contact_id: String,
    to_number: String,
    route_id: String,
    service_id: String,
    message_type: MessageType,
    replace_variables: bool,
    track_clicks: bool,
    media: Vec<Value>,
    route_params: Map<String, Value>,
    label_ids: Vec<String>,
    project_id: String,
});

timestamp_getters!(RelativeScheduledMessage {
    time_created,
    end_time,
});

field_setters!(RelativeScheduledMessage {
    set_content => content: String,
    set_time_of_day => time_of_day: String,
    set_date_variable => date_variable: String,
    set_offset_scale => offset_scale: String,
    set_offset_count => offset_count: i64,
    set_rrule => rrule: String,
    set_timezone_id => timezone_id: String,
    set_route_id => route_id: String,
});

impl RelativeScheduledMessage {
    /// Deletes the relative scheduled message and its pending occurrences.
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

    #[tokio::test]
    async fn test_time_setters_send_unix_seconds() {
        let transport = FakeTransport::new();
        transport.push_response(json!({}));
        let mut scheduled =
            ScheduledMessage::init(Arc::new(transport.clone()), &[("project_id", "PJ1"), ("id", "SC1")]);

        let start = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        scheduled.set_start_time(start);
        scheduled.set_content("Reminder");
        assert_eq!(scheduled.start_time().await.unwrap(), Some(start));
        scheduled.save().await.unwrap();

        let call = transport.last_call();
        assert_eq!(call.path, "/projects/PJ1/scheduled/SC1");
        assert_eq!(
            call.params.map(Value::Object),
            Some(json!({"start_time": 1_700_000_000, "content": "Reminder"}))
        );
    }

    #[tokio::test]
    async fn test_relative_delete_path() {
        let transport = FakeTransport::new();
        transport.push_response(Value::Null);
        let relative = RelativeScheduledMessage::init(
            Arc::new(transport.clone()),
            &[("project_id", "PJ1"), ("id", "RS1")],
        );

        relative.delete().await.unwrap();

        assert_eq!(transport.last_call().path, "/projects/PJ1/relative_scheduled/RS1");
    }
}
