//! Typed resource wrappers.
//!
//! Each resource is a thin handle around a shared [`Entity`](crate::rest::Entity):
//! it contributes its path template, typed field accessors, and the helper
//! operations of its endpoint family. Loading, dirty tracking and saving
//! come from the [`Resource`](crate::rest::Resource) and
//! [`SavableResource`](crate::rest::SavableResource) traits.
//!
//! # Available Resources
//!
//! | Resource | Path | Savable |
//! |----------|------|---------|
//! | [`Organization`] | `/organizations/{id}` | yes |
//! | [`Project`] | `/projects/{id}` | yes |
//! | [`Contact`] | `/projects/{project_id}/contacts/{id}` | yes |
//! | [`Message`] | `/projects/{project_id}/messages/{id}` | yes |
//! | [`Broadcast`] | `/projects/{project_id}/broadcasts/{id}` | no |
//! | [`Group`] | `/projects/{project_id}/groups/{id}` | yes |
//! | [`Label`] | `/projects/{project_id}/labels/{id}` | yes |
//! | [`ScheduledMessage`] | `/projects/{project_id}/scheduled/{id}` | yes |
//! | [`RelativeScheduledMessage`] | `/projects/{project_id}/relative_scheduled/{id}` | yes |
//! | [`DataTable`] | `/projects/{project_id}/tables/{id}` | yes |
//! | [`DataRow`] | `/projects/{project_id}/tables/{table_id}/rows/{id}` | yes |
//! | [`Service`] | `/projects/{project_id}/services/{id}` | yes |
//! | [`ContactServiceState`] | `/projects/{project_id}/services/{service_id}/states/{contact_id}` | yes |
//! | [`Phone`] | `/projects/{project_id}/phones/{id}` | yes |
//! | [`Route`] | `/projects/{project_id}/routes/{id}` | yes |
//! | [`AirtimeTransaction`] | `/projects/{project_id}/airtime_transactions/{id}` | no |

use serde_json::Value;

use crate::rest::Entity;

mod broadcast;
mod common;
mod contact;
mod data_table;
mod group;
mod label;
mod message;
mod organization;
mod phone;
mod project;
mod scheduled_message;
mod service;

pub use broadcast::Broadcast;
pub use common::{
    ContactOptions, ConversationStatus, MessageDirection, MessageStatus, MessageType,
    ScheduleMessageOptions, SendMessageOptions,
};
pub use contact::Contact;
pub use data_table::{DataRow, DataTable};
pub use group::Group;
pub use label::Label;
pub use message::Message;
pub use organization::Organization;
pub use phone::{AirtimeTransaction, Phone, Route};
pub use project::{MultipleMessages, Project};
pub use scheduled_message::{RelativeScheduledMessage, ScheduledMessage};
pub use service::{ContactServiceState, Service};

/// Returns `true` if the id array in `field` contains `id`.
pub(crate) fn id_set_contains(entity: &Entity, field: &str, id: &str) -> bool {
    entity
        .peek(field)
        .and_then(Value::as_array)
        .is_some_and(|ids| ids.iter().any(|value| value.as_str() == Some(id)))
}

/// Adds or removes `id` in the id array in `field`.
///
/// Mirrors a membership change already confirmed by the server, so the
/// field is not marked dirty. A field the entity has not seen yet is left
/// alone; the next load fetches the full set.
pub(crate) fn update_id_set(entity: &mut Entity, field: &str, id: &str, present: bool) {
    let Some(Value::Array(ids)) = entity.data_mut().get_mut(field) else {
        return;
    };
    let position = ids.iter().position(|value| value.as_str() == Some(id));
    match (present, position) {
        (true, None) => ids.push(Value::from(id)),
        (false, Some(index)) => {
            ids.remove(index);
        }
        _ => {}
    }
}
