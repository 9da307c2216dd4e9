#![allow(clippy::unwrap_used)]
// Integration tests for `Client` against a wiremock Site Manager.

use std::time::Duration;

use pretty_assertions::assert_eq;
use reqwest::Method;
use reqwest::header::{HeaderName, HeaderValue};
use serde_json::json;
use url::Url;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use unicloud_api::{
    Client, ClientConfig, DeviceFilter, Error, RequestOptions, Resource, ServiceName,
};

// ── Helpers ─────────────────────────────────────────────────────────

fn config(base: &str) -> ClientConfig {
    ClientConfig::new("secret-key".to_string()).with_base_url(Url::parse(base).unwrap())
}

async fn setup() -> (MockServer, Client) {
    let server = MockServer::start().await;
    let client = Client::from_reqwest(config(&server.uri()), reqwest::Client::new()).unwrap();
    (server, client)
}

async fn mount(server: &MockServer, route: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(response)
        .mount(server)
        .await;
}

// ── Successful calls ────────────────────────────────────────────────

#[tokio::test]
async fn test_ok_returns_decoded_body() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/hosts",
        ResponseTemplate::new(200).set_body_json(json!({"ok": true})),
    )
    .await;

    let body = client.hosts().list().await.unwrap();
    assert_eq!(body, json!({"ok": true}));
}

#[tokio::test]
async fn test_auth_headers_are_sent() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/ea/sites"))
        .and(header("x-api-key", "secret-key"))
        .and(header("accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    client.sites().list().await.unwrap();
}

#[tokio::test]
async fn test_caller_headers_cannot_override_auth() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/ea/hosts"))
        .and(header("x-api-key", "secret-key"))
        .and(header("accept", "application/json"))
        .and(header("x-trace", "abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let options = RequestOptions::new()
        .with_header(
            HeaderName::from_static("x-api-key"),
            HeaderValue::from_static("other"),
        )
        .with_header(
            HeaderName::from_static("accept"),
            HeaderValue::from_static("text/plain"),
        )
        .with_header(
            HeaderName::from_static("x-trace"),
            HeaderValue::from_static("abc"),
        );
    client
        .gateway()
        .call(Method::GET, "/ea/hosts", options)
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].headers.get_all("x-api-key").iter().count(), 1);
}

#[tokio::test]
async fn test_host_get_builds_path() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/hosts/abc123",
        ResponseTemplate::new(200).set_body_json(json!({"data": {"id": "abc123"}})),
    )
    .await;

    let body = client.hosts().get("abc123").await.unwrap();
    assert_eq!(body["data"]["id"], "abc123");
}

#[tokio::test]
async fn test_host_id_stays_inside_hosts_path() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/sites",
        ResponseTemplate::new(200).set_body_json(json!({"sites": true})),
    )
    .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "no host"})))
        .mount(&server)
        .await;

    let err = client.hosts().get("../sites").await.unwrap_err();
    assert!(err.is_not_found(), "expected 404, got {err:?}");
    client.hosts().get("x?y=1").await.unwrap_err();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);
    assert_eq!(received[0].url.path(), "/ea/hosts/..%2Fsites");
    assert_eq!(received[1].url.path(), "/ea/hosts/x%3Fy=1");
    assert_eq!(received[1].url.query(), None);
}

#[tokio::test]
async fn test_dot_dot_host_id_is_rejected_locally() {
    let (server, client) = setup().await;

    let err = client.hosts().get("..").await.unwrap_err();
    assert!(matches!(err, Error::InvalidId { .. }), "got {err:?}");
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_devices_without_filters_sends_no_query() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/devices",
        ResponseTemplate::new(200).set_body_json(json!({"data": []})),
    )
    .await;

    client.devices().list().await.unwrap();
    client
        .devices()
        .list_filtered(&DeviceFilter::new().time(""))
        .await
        .unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 2);
    assert!(received.iter().all(|r| r.url.query().is_none()));
}

#[tokio::test]
async fn test_devices_with_host_ids_sends_array_query() {
    let (server, client) = setup().await;
    Mock::given(method("GET"))
        .and(path("/ea/devices"))
        .and(query_param("hostIds[]", "a"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .mount(&server)
        .await;

    let filter = DeviceFilter::new().host_ids(["a", "b"]);
    client.devices().list_filtered(&filter).await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received[0].url.query(), Some("hostIds[]=a&hostIds[]=b"));
}

#[tokio::test]
async fn test_typed_listings_deserialize() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/hosts",
        ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "id": "h1",
                "type": "console",
                "ipAddress": "203.0.113.7",
                "owner": true,
                "reportedState": { "name": "Home UDM" }
            }],
            "httpStatusCode": 200,
            "traceId": "t-1"
        })),
    )
    .await;
    mount(
        &server,
        "/ea/devices",
        ResponseTemplate::new(200).set_body_json(json!({
            "data": [{
                "hostId": "h1",
                "hostName": "Home UDM",
                "devices": [
                    { "id": "d1", "mac": "aa:bb:cc:dd:ee:ff", "model": "U6-LR", "status": "online" }
                ]
            }]
        })),
    )
    .await;

    let hosts = client.hosts().list_typed().await.unwrap();
    assert_eq!(hosts.trace_id.as_deref(), Some("t-1"));
    assert_eq!(hosts.data[0].host_type.as_deref(), Some("console"));
    assert_eq!(hosts.data[0].display_name(), Some("Home UDM"));

    let devices = client
        .devices()
        .list_typed(&DeviceFilter::new())
        .await
        .unwrap();
    assert_eq!(devices.data[0].devices[0].model.as_deref(), Some("U6-LR"));
}

#[tokio::test]
async fn test_typed_mismatch_is_deserialization_error() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/sites",
        ResponseTemplate::new(200).set_body_json(json!({"data": "nope"})),
    )
    .await;

    let err = client.sites().list_typed().await.unwrap_err();
    assert!(matches!(err, Error::Deserialization { .. }));
}

// ── Status translation ──────────────────────────────────────────────

#[tokio::test]
async fn test_not_found_uses_server_message() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/hosts/missing",
        ResponseTemplate::new(404).set_body_json(json!({"message": "missing"})),
    )
    .await;

    let err = client.hosts().get("missing").await.unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "404 Not Found: missing");
}

#[tokio::test]
async fn test_error_status_without_body_uses_transport_message() {
    let (server, client) = setup().await;
    mount(&server, "/ea/hosts", ResponseTemplate::new(401)).await;

    let err = client.hosts().list().await.unwrap_err();
    assert!(err.is_auth_error());
    let message = err.api_message().unwrap();
    assert!(message.contains("401"), "unexpected message: {message}");
    assert!(
        err.to_string().starts_with("401 Unauthorized: "),
        "unexpected display: {err}"
    );
}

#[tokio::test]
async fn test_rate_limit_is_categorized() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/sites",
        ResponseTemplate::new(429).set_body_json(json!({"message": "slow down"})),
    )
    .await;

    let err = client.sites().list().await.unwrap_err();
    assert!(err.is_rate_limited());
    assert_eq!(err.to_string(), "429 Rate Limit Exceeded: slow down");
}

#[tokio::test]
async fn test_server_error_with_non_json_body() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/devices",
        ResponseTemplate::new(500).set_body_string("<html>oops</html>"),
    )
    .await;

    let err = client.devices().list().await.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert!(
        err.to_string().starts_with("500 Internal Server Error: "),
        "unexpected display: {err}"
    );
}

#[tokio::test]
async fn test_non_200_success_is_unknown_status() {
    let (server, client) = setup().await;
    mount(&server, "/ea/hosts", ResponseTemplate::new(204)).await;

    let err = client.hosts().list().await.unwrap_err();
    assert!(matches!(err, Error::UnknownStatus { status: 204, .. }));
    assert_eq!(err.to_string(), "204 Unknown status code: Unknown error");
}

#[tokio::test]
async fn test_redirect_without_location_is_unknown_status() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/sites",
        ResponseTemplate::new(302).set_body_json(json!({"message": "moved"})),
    )
    .await;

    let err = client.sites().list().await.unwrap_err();
    assert_eq!(err.to_string(), "302 Unknown status code: moved");
}

#[tokio::test]
async fn test_ok_with_invalid_json_is_deserialization_error() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/hosts",
        ResponseTemplate::new(200).set_body_string("not json"),
    )
    .await;

    let err = client.hosts().list().await.unwrap_err();
    let Error::Deserialization { body, .. } = err else {
        panic!("expected deserialization error, got {err:?}");
    };
    assert_eq!(body, "not json");
}

// ── Transport failures ──────────────────────────────────────────────

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    let client = Client::from_reqwest(
        config(&format!("http://127.0.0.1:{port}")),
        reqwest::Client::new(),
    )
    .unwrap();

    let err = client.hosts().list().await.unwrap_err();
    let Error::Transport(ref inner) = err else {
        panic!("expected transport error, got {err:?}");
    };
    assert!(inner.is_connect());
    assert_eq!(err.to_string(), inner.to_string());
    assert_eq!(err.status(), None);
}

#[tokio::test]
async fn test_timeout_change_applies_to_later_calls() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/hosts",
        ResponseTemplate::new(200)
            .set_body_json(json!({"data": []}))
            .set_delay(Duration::from_millis(1500)),
    )
    .await;

    client.set_timeout(Duration::from_secs(1)).unwrap();
    let err = client.hosts().list().await.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");

    client.set_timeout(Duration::from_secs(5)).unwrap();
    client.hosts().list().await.unwrap();
}

#[tokio::test]
async fn test_settings_change_does_not_affect_call_in_flight() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/hosts",
        ResponseTemplate::new(200)
            .set_body_json(json!({"data": []}))
            .set_delay(Duration::from_millis(1500)),
    )
    .await;

    client.set_timeout(Duration::from_secs(1)).unwrap();
    let (result, ()) = tokio::join!(client.hosts().list(), async {
        tokio::time::sleep(Duration::from_millis(200)).await;
        client.set_timeout(Duration::from_secs(5)).unwrap();
        client.set_debug(true);
    });

    let err = result.unwrap_err();
    assert!(err.is_timeout(), "expected timeout, got {err:?}");
    assert_eq!(client.timeout(), Duration::from_secs(5));
    assert!(client.debug());
}

#[tokio::test]
async fn test_debug_mode_still_issues_calls() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/sites",
        ResponseTemplate::new(200).set_body_json(json!({"data": []})),
    )
    .await;

    client.set_debug(true);
    client.sites().list().await.unwrap();
    client.set_debug(false);
    client.sites().list().await.unwrap();
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

// ── Registry ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_unsupported_get_makes_no_request() {
    let (server, client) = setup().await;

    let err = client.sites().get("site-1").await.unwrap_err();
    assert_eq!(err.to_string(), "Get site by ID not implemented");

    let err = Resource::get(client.devices(), "dev-1").await.unwrap_err();
    assert_eq!(err.to_string(), "Get device by ID not implemented");

    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_service_by_name_dispatches() {
    let (server, client) = setup().await;
    mount(
        &server,
        "/ea/devices",
        ResponseTemplate::new(200).set_body_json(json!({"data": []})),
    )
    .await;

    let service = client.service("devices").unwrap();
    assert_eq!(service.name(), ServiceName::Devices);
    assert!(!service.supports_get());
    assert_eq!(service.list().await.unwrap(), json!({"data": []}));

    let err = client.service("firewalls").unwrap_err();
    assert_eq!(err.to_string(), "Service firewalls not found");
}
