//! The client root.
//!
//! [`TelerivetClient`] owns the transport and hands out handles to
//! projects and organizations, the two top-level resources.

use std::sync::Arc;

use crate::clients::{ApiError, HttpClient, HttpMethod, Transport};
use crate::config::ClientConfig;
use crate::error::ConfigError;
use crate::rest::resource::{cursor, request_resource};
use crate::rest::resources::{Organization, Project};
use crate::rest::{encode_segment, ApiCursor, QueryParams, Resource};

/// Entry point to the Telerivet REST API.
///
/// The client is cheap to clone; clones share the transport and its
/// request counter.
///
/// # Example
///
/// ```rust,ignore
/// use telerivet::{ApiKey, ClientConfig, TelerivetClient};
/// use telerivet::rest::resources::SendMessageOptions;
///
/// let config = ClientConfig::builder()
///     .api_key(ApiKey::new("YOUR_API_KEY")?)
///     .build()?;
/// let client = TelerivetClient::new(&config)?;
///
/// let project = client.init_project_by_id("PJ123");
/// project.send_message(SendMessageOptions::text("+16505550123", "Hello")).await?;
///
/// println!("{} requests so far", client.request_count());
/// ```
#[derive(Debug, Clone)]
pub struct TelerivetClient {
    transport: Arc<dyn Transport>,
}

const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<TelerivetClient>();
};

impl TelerivetClient {
    /// Creates a client backed by an [`HttpClient`] built from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::HttpClientBuild`] if the HTTP client cannot
    /// be created.
    pub fn new(config: &ClientConfig) -> Result<Self, ConfigError> {
        let http_client = HttpClient::new(config)?;
        tracing::debug!(api_url = %http_client.api_url(), "Telerivet client created");
        Ok(Self::with_transport(Arc::new(http_client)))
    }

    /// Creates a client over any transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Returns the transport shared by every handle this client creates.
    #[must_use]
    pub const fn transport(&self) -> &Arc<dyn Transport> {
        &self.transport
    }

    /// Returns the number of requests issued so far.
    #[must_use]
    pub fn request_count(&self) -> u64 {
        self.transport.request_count()
    }

    /// Fetches a project by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the project does not exist or is
    /// not accessible with this API key.
    pub async fn get_project_by_id(&self, id: &str) -> Result<Project, ApiError> {
        let path = format!("/projects/{}", encode_segment(id));
        request_resource(&self.transport, HttpMethod::Get, &path, None).await
    }

    /// Creates a handle to a project without fetching it.
    #[must_use]
    pub fn init_project_by_id(&self, id: &str) -> Project {
        Project::init(Arc::clone(&self.transport), &[("id", id)])
    }

    /// Queries the projects accessible with this API key.
    #[must_use]
    pub fn query_projects(&self, params: QueryParams) -> ApiCursor<Project> {
        cursor(&self.transport, "/projects".to_string(), Some(params.into_params()))
    }

    /// Fetches an organization by id.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] if the organization does not exist or
    /// is not accessible with this API key.
    pub async fn get_organization_by_id(&self, id: &str) -> Result<Organization, ApiError> {
        let path = format!("/organizations/{}", encode_segment(id));
        request_resource(&self.transport, HttpMethod::Get, &path, None).await
    }

    /// Creates a handle to an organization without fetching it.
    #[must_use]
    pub fn init_organization_by_id(&self, id: &str) -> Organization {
        Organization::init(Arc::clone(&self.transport), &[("id", id)])
    }

    /// Queries the organizations accessible with this API key.
    #[must_use]
    pub fn query_organizations(&self, params: QueryParams) -> ApiCursor<Organization> {
        cursor(&self.transport, "/organizations".to_string(), Some(params.into_params()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::testing::FakeTransport;
    use crate::config::ApiKey;
    use serde_json::json;

    fn client(transport: &FakeTransport) -> TelerivetClient {
        TelerivetClient::with_transport(Arc::new(transport.clone()))
    }

    #[test]
    fn test_new_builds_http_transport() {
        let config = ClientConfig::builder()
            .api_key(ApiKey::new("test-key").unwrap())
            .build()
            .unwrap();

        let client = TelerivetClient::new(&config).unwrap();

        assert_eq!(client.request_count(), 0);
    }

    #[tokio::test]
    async fn test_get_project_counts_requests() {
        let transport = FakeTransport::new();
        transport.push_response(json!({"id": "PJ1", "name": "Clinic"}));
        let client = client(&transport);

        let mut project = client.get_project_by_id("PJ1").await.unwrap();

        assert!(project.is_loaded());
        assert_eq!(project.name().await.unwrap().as_deref(), Some("Clinic"));
        assert_eq!(transport.last_call().path, "/projects/PJ1");
        assert_eq!(client.request_count(), 1);
    }

    #[tokio::test]
    async fn test_init_handles_share_transport() {
        let transport = FakeTransport::new();
        transport.push_response(json!({"id": "OR1", "name": "Acme"}));
        let client = client(&transport);

        let mut organization = client.init_organization_by_id("OR1");
        assert_eq!(client.request_count(), 0);

        assert_eq!(organization.name().await.unwrap().as_deref(), Some("Acme"));
        assert_eq!(client.request_count(), 1);
        assert_eq!(transport.last_call().path, "/organizations/OR1");
    }

    #[tokio::test]
    async fn test_query_projects_pages_through_root_collection() {
        let transport = FakeTransport::new();
        transport.push_response(json!({
            "data": [{"id": "PJ1"}, {"id": "PJ2"}],
            "truncated": false,
            "next_marker": null
        }));
        let client = client(&transport);

        let projects = client
            .query_projects(QueryParams::new().sort("name"))
            .all()
            .await
            .unwrap();

        let ids: Vec<&str> = projects.iter().map(Project::id).collect();
        assert_eq!(ids, ["PJ1", "PJ2"]);
        assert_eq!(transport.last_call().path, "/projects");
        assert_eq!(transport.last_call().param("sort"), Some(&json!("name")));
    }

    #[test]
    fn test_query_organizations_path() {
        let client = client(&FakeTransport::new());
        assert_eq!(client.query_organizations(QueryParams::new()).path(), "/organizations");
    }
}
