//! Server Startup Tests
//!
//! Tests for server lifecycle, configuration handling, and startup behavior.
//! These tests verify that the server can start correctly under various conditions.

use std::net::{SocketAddr, TcpListener};
use std::time::Duration;

use axum::{body::Body, http::Request, http::StatusCode};
use tokio::time::timeout;
use tower::util::ServiceExt;

use agent_call_gateway::middleware::{RATE_LIMIT_DISABLED_THRESHOLD, rate_limit_layer};
use agent_call_gateway::{ServerConfig, config::TlsConfig, routes, state::AppState};

/// Helper function to create a minimal test configuration (no API keys)
fn create_minimal_config(port: u16) -> ServerConfig {
    let mut config = ServerConfig::default();
    config.host = "127.0.0.1".to_string();
    config.port = port;
    config
}

/// Find an available port for testing
fn find_available_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

/// Test that the server can start with minimal configuration (no API keys)
#[tokio::test]
async fn test_minimal_config_boot() {
    let port = find_available_port();
    let config = create_minimal_config(port);

    // Create app state - this should succeed even without API keys
    let app_state = AppState::new(config).expect("state should build without keys");
    let app = routes::create_app(app_state);

    let request = Request::builder().uri("/").body(Body::empty()).unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

/// Test that a missing OpenAI key surfaces as a 500 on use
#[tokio::test]
async fn test_missing_api_keys_returns_error_on_use() {
    let port = find_available_port();
    let config = create_minimal_config(port);
    let app_state = AppState::new(config).unwrap();

    let app = routes::api::create_api_router().with_state(app_state);

    let request = Request::builder()
        .method("POST")
        .uri("/chat")
        .header("content-type", "application/json")
        .body(Body::from(r#"{"message":"Hello"}"#))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

/// Test that unknown routes are not served
#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let app_state = AppState::new(create_minimal_config(find_available_port())).unwrap();
    let app = routes::create_app(app_state);

    let request = Request::builder()
        .uri("/voices")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Test that the relay routes only accept POST
#[tokio::test]
async fn test_relay_routes_reject_get() {
    let app_state = AppState::new(create_minimal_config(find_available_port())).unwrap();
    let app = routes::create_app(app_state);

    for uri in ["/chat", "/call"] {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{uri}");
    }
}

/// Test that the configured address parses as a socket address
#[tokio::test]
async fn test_address_parsing() {
    let port = find_available_port();
    let config = create_minimal_config(port);

    let address = config.address();
    assert_eq!(address, format!("127.0.0.1:{port}"));
    let parsed: SocketAddr = address.parse().expect("address should parse");
    assert_eq!(parsed.port(), port);
}

/// Test that the config correctly identifies TLS status
#[tokio::test]
async fn test_tls_configuration() {
    let port = find_available_port();

    let config = create_minimal_config(port);
    assert!(!config.is_tls_enabled());

    // Just the setting - actual TLS requires certs
    let mut config_with_tls = create_minimal_config(port + 1);
    config_with_tls.tls = Some(TlsConfig {
        cert_path: std::path::PathBuf::from("/path/to/cert.pem"),
        key_path: std::path::PathBuf::from("/path/to/key.pem"),
    });
    assert!(config_with_tls.is_tls_enabled());
}

/// Test that the state keeps the configuration it was built with
#[tokio::test]
async fn test_state_keeps_config() {
    let mut config = create_minimal_config(find_available_port());
    config.rate_limit_requests_per_second = 100;
    config.rate_limit_burst_size = 50;
    config.agent_id = Some("agent_1".to_string());

    let app_state = AppState::new(config).unwrap();
    assert_eq!(app_state.config.rate_limit_requests_per_second, 100);
    assert_eq!(app_state.config.rate_limit_burst_size, 50);
    assert_eq!(app_state.config.agent_id.as_deref(), Some("agent_1"));
    assert_eq!(app_state.chat.provider_name(), "openai");
    assert_eq!(app_state.calls.provider_name(), "elevenlabs");
}

/// Test that the app serves over a real TCP listener
#[tokio::test]
async fn test_serves_health_over_tcp() {
    let app_state = AppState::new(create_minimal_config(0)).unwrap();
    let app = routes::create_app(app_state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(
            listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await
        .unwrap();
    });

    let response = timeout(
        Duration::from_secs(5),
        reqwest::get(format!("http://{addr}/")),
    )
    .await
    .expect("request should not time out")
    .expect("request should succeed");

    assert_eq!(response.status(), reqwest::StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["status"], "OK");

    server.abort();
}

/// Test concurrent request handling capability
#[tokio::test]
async fn test_concurrent_request_handling() {
    let app_state = AppState::new(create_minimal_config(find_available_port())).unwrap();
    let app = routes::create_app(app_state);

    let tasks: Vec<_> = (0..10)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move {
                let request = Request::builder().uri("/").body(Body::empty()).unwrap();
                let response = app.oneshot(request).await.unwrap();
                response.status()
            })
        })
        .collect();

    for task in tasks {
        let status = task.await.expect("Task should complete");
        assert_eq!(status, StatusCode::OK);
    }
}

/// Build the full app with the rate limiter the binary installs
fn rate_limited_app(config: ServerConfig) -> axum::Router {
    let layer = rate_limit_layer(&config).expect("rate limit config should be valid");
    let app_state = AppState::new(config).unwrap();
    routes::create_app(app_state).layer(tower::util::option_layer(layer))
}

/// Send `count` health checks from `client_ip` and count the accepted ones
async fn accepted_requests(app: &axum::Router, client_ip: &str, count: usize) -> usize {
    let mut accepted = 0;
    for _ in 0..count {
        let request = Request::builder()
            .uri("/")
            .header("x-forwarded-for", client_ip)
            .body(Body::empty())
            .unwrap();
        let status = app.clone().oneshot(request).await.unwrap().status();
        match status {
            StatusCode::OK => accepted += 1,
            StatusCode::TOO_MANY_REQUESTS => {}
            other => panic!("unexpected status {other}"),
        }
    }
    accepted
}

/// Test that the default limit allows a burst and then refills per second
#[tokio::test]
async fn test_rate_limit_burst_then_refill_per_second() {
    let config = create_minimal_config(find_available_port());
    assert_eq!(config.rate_limit_requests_per_second, 60);
    assert_eq!(config.rate_limit_burst_size, 10);
    let app = rate_limited_app(config);

    assert_eq!(accepted_requests(&app, "203.0.113.7", 12).await, 10);

    // 60 requests/s refills the whole burst well within a second
    tokio::time::sleep(Duration::from_millis(1100)).await;
    assert_eq!(accepted_requests(&app, "203.0.113.7", 5).await, 5);
}

/// Test that a sustained rate much lower than the burst still refills in
/// fractions of a second
#[tokio::test]
async fn test_rate_limit_refill_interval() {
    let mut config = create_minimal_config(find_available_port());
    config.rate_limit_requests_per_second = 10;
    config.rate_limit_burst_size = 2;
    let app = rate_limited_app(config);

    assert_eq!(accepted_requests(&app, "198.51.100.1", 3).await, 2);

    // one request is replenished every 100ms
    tokio::time::sleep(Duration::from_millis(250)).await;
    assert_eq!(accepted_requests(&app, "198.51.100.1", 1).await, 1);
}

/// Test that each client IP has its own quota
#[tokio::test]
async fn test_rate_limit_is_per_ip() {
    let mut config = create_minimal_config(find_available_port());
    config.rate_limit_requests_per_second = 1;
    config.rate_limit_burst_size = 3;
    let app = rate_limited_app(config);

    assert_eq!(accepted_requests(&app, "192.0.2.1", 5).await, 3);
    assert_eq!(accepted_requests(&app, "192.0.2.2", 5).await, 3);
}

/// Test that the limiter is not installed at the disabled threshold
#[tokio::test]
async fn test_rate_limit_disabled_at_threshold() {
    let mut config = create_minimal_config(find_available_port());
    config.rate_limit_requests_per_second = RATE_LIMIT_DISABLED_THRESHOLD;
    config.rate_limit_burst_size = 1;
    assert!(rate_limit_layer(&config).unwrap().is_none());

    let app = rate_limited_app(config);
    assert_eq!(accepted_requests(&app, "203.0.113.9", 50).await, 50);
}
