//! Organization resource implementation.

use serde_json::{Map, Value};

use crate::clients::{ApiError, HttpMethod};
use crate::rest::resource::{
    child_path, cursor, declare_resource, field_getters, field_setters, request_resource,
};
use crate::rest::{ApiCursor, QueryParams, Resource, SavableResource};

use super::Project;

declare_resource! {
    /// An organization: the billing account that owns projects.
    Organization => "/organizations/{id}", ["id"]
}

impl SavableResource for Organization {}

field_getters!(Organization {
    name: String,
    timezone_id: String,
});

field_setters!(Organization {
    set_name => name: String,
    set_timezone_id => timezone_id: String,
});

impl Organization {
    /// Creates a project in this organization.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn create_project(&self, options: Map<String, Value>) -> Result<Project, ApiError> {
        let path = child_path(self, &["projects"]);
        request_resource(self.transport(), HttpMethod::Post, &path, Some(options)).await
    }

    /// Queries the projects of this organization.
    #[must_use]
    pub fn query_projects(&self, params: QueryParams) -> ApiCursor<Project> {
        cursor(self.transport(), child_path(self, &["projects"]), Some(params.into_params()))
    }

    /// Fetches the billing details (plan, balance, renewal date).
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn get_billing_details(&self) -> Result<Value, ApiError> {
        let path = child_path(self, &["billing"]);
        self.transport().request(HttpMethod::Get, &path, None).await
    }

    /// Fetches the current usage of a metered resource, e.g. `phones` or
    /// `contacts`.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn get_usage(&self, usage_type: &str) -> Result<Value, ApiError> {
        let path = child_path(self, &["usage", usage_type]);
        self.transport().request(HttpMethod::Get, &path, None).await
    }

    /// Fetches message statistics across the organization's projects.
    ///
    /// # Errors
    ///
    /// Propagates the request error.
    pub async fn get_message_stats(&self, options: Map<String, Value>) -> Result<Value, ApiError> {
        let path = child_path(self, &["message_stats"]);
        self.transport()
            .request(HttpMethod::Get, &path, Some(options))
            .await
    }
}
