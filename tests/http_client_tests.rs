//! Integration tests for the HTTP transport.
//!
//! These tests run [`HttpClient`] against a local mock server and verify
//! authentication, parameter encoding, response parsing and error mapping.

use serde_json::{json, Map, Value};
use telerivet::clients::{HttpClient, HttpMethod, HttpRequest, Transport};
use telerivet::{ApiError, ApiKey, ApiUrl, ClientConfig};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a client pointed at the mock server.
fn create_client(server: &MockServer) -> HttpClient {
    let config = ClientConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .api_url(ApiUrl::new(format!("{}/v1", server.uri())).unwrap())
        .build()
        .unwrap();
    HttpClient::new(&config).unwrap()
}

fn params(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap()
}

// ============================================================================
// Request Encoding
// ============================================================================

#[tokio::test]
async fn test_requests_use_basic_auth_with_empty_password() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/projects/PJ1"))
        .and(header("Authorization", "Basic dGVzdC1rZXk6"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "PJ1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let body = client.request(HttpMethod::Get, "/projects/PJ1", None).await.unwrap();

    assert_eq!(body, json!({"id": "PJ1"}));
}

#[tokio::test]
async fn test_get_params_are_bracket_encoded_in_query_string() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/projects/PJ1/contacts"))
        .and(query_param("vars[country]", "KE"))
        .and(query_param("send_blocked", "1"))
        .and(query_param("page_size", "50"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [],
            "truncated": false,
            "next_marker": null
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let result = client
        .request(
            HttpMethod::Get,
            "/projects/PJ1/contacts",
            Some(params(json!({
                "vars": {"country": "KE"},
                "send_blocked": true,
                "page_size": 50
            }))),
        )
        .await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn test_post_params_are_sent_as_json_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/projects/PJ1/messages/send"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({"to_number": "+16505550123", "content": "Hello"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "SM1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let body = client
        .request(
            HttpMethod::Post,
            "/projects/PJ1/messages/send",
            Some(params(json!({"to_number": "+16505550123", "content": "Hello"}))),
        )
        .await
        .unwrap();

    assert_eq!(body["id"], "SM1");
}

#[tokio::test]
async fn test_post_without_params_sends_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/projects/PJ1/broadcasts/BC1/cancel"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "BC1", "status": "cancelled"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let request = HttpRequest::builder(HttpMethod::Post, "/projects/PJ1/broadcasts/BC1/cancel")
        .build()
        .unwrap();

    let body = client.send(request).await.unwrap();
    assert_eq!(body["status"], "cancelled");
}

#[tokio::test]
async fn test_empty_success_body_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v1/projects/PJ1/contacts/CT1"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let body = client
        .request(HttpMethod::Delete, "/projects/PJ1/contacts/CT1", None)
        .await
        .unwrap();

    assert_eq!(body, Value::Null);
}

// ============================================================================
// Error Mapping
// ============================================================================

#[tokio::test]
async fn test_invalid_param_error_carries_param_name() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "code": "invalid_param",
                "message": "Invalid phone number",
                "param": "to_number"
            }
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client
        .request(HttpMethod::Post, "/projects/PJ1/messages/send", None)
        .await
        .unwrap_err();

    match error {
        ApiError::InvalidParameter { param, message, code } => {
            assert_eq!(param, "to_number");
            assert_eq!(message, "Invalid phone number");
            assert_eq!(code, "invalid_param");
        }
        other => panic!("expected InvalidParameter, got {other:?}"),
    }
}

#[tokio::test]
async fn test_not_found_error_is_distinguished() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "not_found", "message": "Contact not found"}
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client
        .request(HttpMethod::Get, "/projects/PJ1/contacts/CT404", None)
        .await
        .unwrap_err();

    assert!(error.is_not_found());
    assert_eq!(error.code(), Some("not_found"));
    assert_eq!(error.to_string(), "Contact not found");
}

#[tokio::test]
async fn test_other_error_codes_map_to_generic_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).set_body_json(json!({
            "error": {"code": "rate_limited", "message": "Too many requests"}
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client
        .request(HttpMethod::Get, "/projects", None)
        .await
        .unwrap_err();

    assert!(matches!(error, ApiError::Api { ref code, .. } if code == "rate_limited"));
    assert_eq!(error.param(), None);
}

#[tokio::test]
async fn test_non_json_server_error_is_unexpected_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    let client = create_client(&server);
    let error = client
        .request(HttpMethod::Get, "/projects", None)
        .await
        .unwrap_err();

    assert!(matches!(
        error,
        ApiError::UnexpectedResponse { status: 503, ref body } if body == "Service Unavailable"
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let config = ClientConfig::builder()
        .api_key(ApiKey::new("test-key").unwrap())
        .api_url(ApiUrl::new("http://127.0.0.1:9/v1").unwrap())
        .build()
        .unwrap();
    let client = HttpClient::new(&config).unwrap();

    let error = client.request(HttpMethod::Get, "/projects", None).await.unwrap_err();

    assert!(matches!(error, ApiError::Network { .. }));
}

// ============================================================================
// Request Counting
// ============================================================================

#[tokio::test]
async fn test_request_count_includes_failed_requests() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/projects/PJ1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "PJ1"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/projects/PJ2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "not_found", "message": "Project not found"}
        })))
        .mount(&server)
        .await;

    let client = create_client(&server);
    assert_eq!(client.request_count(), 0);

    client.request(HttpMethod::Get, "/projects/PJ1", None).await.unwrap();
    let _ = client.request(HttpMethod::Get, "/projects/PJ2", None).await;

    assert_eq!(client.request_count(), 2);
    assert_eq!(client.num_requests(), 2);
}

#[tokio::test]
async fn test_invalid_path_is_rejected_before_sending() {
    let server = MockServer::start().await;
    let client = create_client(&server);

    let error = client.request(HttpMethod::Get, "projects", None).await.unwrap_err();

    assert!(matches!(error, ApiError::InvalidRequest(_)));
    assert_eq!(client.request_count(), 0);
    assert!(server.received_requests().await.unwrap().is_empty());
}
