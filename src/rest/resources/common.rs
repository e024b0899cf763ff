//! Enums and write payloads shared by several resources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The kind of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    /// A text message.
    #[default]
    Sms,

    /// A multimedia message.
    Mms,

    /// A USSD session message.
    Ussd,

    /// A voice call.
    Call,

    /// A chat app message (WhatsApp, Telegram, etc).
    Chat,

    /// A message handled entirely by a service.
    Service,
}

/// Delivery state of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageStatus {
    /// Not yet picked up for sending.
    Ignored,
    /// Waiting to be sent.
    Processing,
    /// Received from a contact.
    Received,
    /// Sent to the carrier.
    Sent,
    /// Sending was confirmed to fail.
    Failed,
    /// Sending failed and will be retried.
    FailedQueued,
    /// Cancelled before sending.
    Cancelled,
    /// Queued on the phone.
    Queued,
    /// Delivered to the recipient.
    Delivered,
    /// Not delivered.
    NotDelivered,
}

impl MessageStatus {
    /// Returns `true` if the message may still be sent.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::Processing | Self::Queued | Self::FailedQueued)
    }
}

/// Direction of a message relative to the project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    /// Sent by a contact to the project.
    Incoming,
    /// Sent by the project.
    Outgoing,
}

/// Conversation state of a contact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationStatus {
    /// No open conversation.
    Closed,
    /// The contact is waiting for a reply.
    Active,
    /// A conversation is open but nobody is waiting.
    Handled,
}

impl ConversationStatus {
    /// Returns the wire value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Closed => "closed",
            Self::Active => "active",
            Self::Handled => "handled",
        }
    }
}

/// Payload for [`Project::send_message`](crate::rest::resources::Project::send_message).
///
/// Exactly one of `to_number` or `contact_id` addresses the message.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct SendMessageOptions {
    /// Kind of message to send.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,

    /// Message text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Recipient phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_number: Option<String>,

    /// Recipient contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_id: Option<String>,

    /// Route used to send the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,

    /// URL notified when the status changes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_url: Option<String>,

    /// Secret included with status notifications.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_secret: Option<String>,

    /// Replace `[[contact.name]]`-style variables in `content`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_variables: Option<bool>,

    /// Labels applied to the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,

    /// Media URLs attached to an MMS or chat message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_urls: Option<Vec<String>>,

    /// Shorten links and track clicks.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub track_clicks: Option<bool>,

    /// Service that handles a `service` message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    /// Send priority: 1 (normal) or 2 (high).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u8>,

    /// Custom variables stored on the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vars: Option<Map<String, Value>>,

    /// Route-specific parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_params: Option<Map<String, Value>>,
}

impl SendMessageOptions {
    /// Creates options for a text message to a phone number.
    #[must_use]
    pub fn text(to_number: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            to_number: Some(to_number.into()),
            content: Some(content.into()),
            ..Self::default()
        }
    }
}

/// Payload for [`Project::get_or_create_contact`](crate::rest::resources::Project::get_or_create_contact).
///
/// The contact is matched by `id`, then `phone_number`, then `lookup_key`;
/// the remaining fields update the matched or created contact.
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct ContactOptions {
    /// Id of an existing contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Contact name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,

    /// Field used to find an existing contact (e.g. `phone_number`, `vars.email`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_key: Option<String>,

    /// Block outgoing messages to the contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub send_blocked: Option<bool>,

    /// Conversation state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_status: Option<ConversationStatus>,

    /// Replace the contact's groups with this set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_ids: Option<Vec<String>>,

    /// Groups to add the contact to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_group_ids: Option<Vec<String>>,

    /// Groups to remove the contact from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remove_group_ids: Option<Vec<String>>,

    /// Default route for messages to the contact.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_route_id: Option<String>,

    /// Custom variables.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vars: Option<Map<String, Value>>,
}

/// Payload for [`Project::schedule_message`](crate::rest::resources::Project::schedule_message).
#[derive(Debug, Clone, Serialize, Default, PartialEq)]
pub struct ScheduleMessageOptions {
    /// Kind of message to send.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_type: Option<MessageType>,

    /// Message text.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Recipient group.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<String>,

    /// Recipient phone number.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_number: Option<String>,

    /// First send time.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub start_time: Option<DateTime<Utc>>,

    /// First send time as a string interpreted in `timezone_id`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time_str: Option<String>,

    /// Repeat rule (RFC 5545 `RRULE`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rrule: Option<String>,

    /// Stop repeating after this time.
    #[serde(
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_seconds_option"
    )]
    pub end_time: Option<DateTime<Utc>>,

    /// Time zone used for `start_time_str` and the repeat rule.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone_id: Option<String>,

    /// Route used to send the message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route_id: Option<String>,

    /// Service that handles a `service` message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_id: Option<String>,

    /// Replace variables in `content` when sending.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub replace_variables: Option<bool>,

    /// Labels applied to each sent message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label_ids: Option<Vec<String>>,

    /// Media URLs attached to each sent message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub media_urls: Option<Vec<String>>,

    /// Custom variables stored on the scheduled message.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vars: Option<Map<String, Value>>,
}
