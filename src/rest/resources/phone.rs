//! Phone, route and airtime transaction resources.

use serde_json::Value;

use crate::rest::resource::{
    child_path, cursor, declare_resource, field_getters, field_setters, timestamp_getters,
};
use crate::rest::{ApiCursor, QueryParams, Resource, SavableResource};

use super::Message;

declare_resource! {
    /// A phone or other channel (Android phone, gateway, chat account)
    /// that sends and receives messages for a project.
    Phone => "/projects/{project_id}/phones/{id}", ["project_id", "id"]
}

impl SavableResource for Phone {}

field_getters!(Phone {
    name: String,
    phone_number: String,
    phone_type: String,
    country: String,
    send_paused: bool,
    send_limit: u64,
    battery: u8,
    charging: bool,
    internet_type: String,
    app_version: String,
    android_sdk: u32,
    mccmnc: String,
    manufacturer: String,
    model: String,
    project_id: String,
});

timestamp_getters!(Phone {
    time_created,
    last_active_time,
});

field_setters!(Phone {
    set_name => name: String,
    set_phone_number => phone_number: String,
    set_send_paused => send_paused: bool,
});

impl Phone {
    /// Queries messages sent or received by this phone.
    #[must_use]
    pub fn query_messages(&self, params: QueryParams) -> ApiCursor<Message> {
        cursor(self.transport(), child_path(self, &["messages"]), Some(params.into_params()))
    }
}

declare_resource! {
    /// A custom route that decides which phone sends each message.
    Route => "/projects/{project_id}/routes/{id}", ["project_id", "id"]
}

impl SavableResource for Route {}

field_getters!(Route {
    name: String,
    project_id: String,
});

field_setters!(Route {
    set_name => name: String,
});

declare_resource! {
    /// A mobile airtime top-up sent to a phone number. Read-only.
    AirtimeTransaction => "/projects/{project_id}/airtime_transactions/{id}", ["project_id", "id"]
}

field_getters!(AirtimeTransaction {
    to_number: String,
    operator_name: String,
    country: String,
    status: String,
    status_text: String,
    value: f64,
    value_currency: String,
    price: f64,
    price_currency: String,
    contact_id: String,
    service_id: String,
    external_id: String,
    project_id: String,
    error_message: String,
    transaction_info: Value,
});

timestamp_getters!(AirtimeTransaction {
    time_created,
    transaction_time,
});
