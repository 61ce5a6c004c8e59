//! Integration tests for the wallet-generation proxy.
//!
//! A mock upstream service is started on a random local port and the proxy
//! router is driven in-process, so these tests exercise the real outbound
//! HTTP call, header handling and error mapping end-to-end.

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, Request, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::Mutex;
use tower::ServiceExt;
use wally::config::{UpstreamConfig, WebConfig};
use wally::upstream::UpstreamClient;
use wally::web::{create_router, AppState};
use wally_types::{ErrorBody, WalletRecord};

/// How the mock upstream answers
#[derive(Clone, Copy)]
enum Behavior {
    Wallet,
    ServerError,
    NotJson,
    Slow,
}

/// Mock upstream wallet service recording every cache-busting token it sees
struct MockUpstream {
    tokens: Arc<Mutex<Vec<String>>>,
    url: String,
    _task: tokio::task::JoinHandle<()>,
}

#[derive(Clone)]
struct MockState {
    behavior: Behavior,
    tokens: Arc<Mutex<Vec<String>>>,
}

async fn mock_wallet_gen(
    State(state): State<MockState>,
    Query(query): Query<HashMap<String, String>>,
) -> axum::response::Response {
    if let Some(token) = query.get("_") {
        state.tokens.lock().await.push(token.clone());
    }
    match state.behavior {
        Behavior::Wallet => Json(json!({
            "btcAddress": "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa",
            "privateKey": "5Kb8kLf9zgWQnogidDA76MzPL6TsZZY36hWXMssSzNydYXYB9KF",
            "seedPhrase": "abandon ability able about above absent absorb abstract absurd abuse access accident"
        }))
        .into_response(),
        Behavior::ServerError => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
        Behavior::NotJson => ([(header::CONTENT_TYPE, "application/json")], "{not json").into_response(),
        Behavior::Slow => {
            tokio::time::sleep(Duration::from_secs(3)).await;
            Json(json!({})).into_response()
        }
    }
}

impl MockUpstream {
    async fn start(behavior: Behavior) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let tokens = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new()
            .route("/api/walletGen", get(mock_wallet_gen))
            .with_state(MockState {
                behavior,
                tokens: Arc::clone(&tokens),
            });

        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            tokens,
            url: format!("http://{}", addr),
            _task: task,
        }
    }

    async fn tokens(&self) -> Vec<String> {
        self.tokens.lock().await.clone()
    }
}

fn proxy_router(upstream_url: &str, timeout_secs: u64) -> Router {
    let upstream = UpstreamClient::new(&UpstreamConfig {
        url: upstream_url.to_string(),
        timeout_secs,
    })
    .unwrap();

    create_router(AppState {
        upstream: Arc::new(upstream),
        web: Arc::new(WebConfig::default()),
    })
}

async fn get_path(app: Router, path: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
    let request = Request::builder()
        .uri(path)
        .body(Body::empty())
        .expect("Failed to build request");
    let response = app.oneshot(request).await.expect("Failed to send request");
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();
    (status, headers, body)
}

#[tokio::test]
async fn test_relays_wallet_with_no_store_headers() {
    let upstream = MockUpstream::start(Behavior::Wallet).await;
    let app = proxy_router(&upstream.url, 5);

    let (status, headers, body) = get_path(app, "/api/walletGen?_=1").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "application/json");
    assert_eq!(headers[header::CACHE_CONTROL], "no-store, max-age=0");

    let record: WalletRecord = serde_json::from_slice(&body).unwrap();
    assert_eq!(record.btc_address, "1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa");
    assert_eq!(
        record.private_key,
        "5Kb8kLf9zgWQnogidDA76MzPL6TsZZY36hWXMssSzNydYXYB9KF"
    );
    assert!(record.seed_phrase.starts_with("abandon ability able"));

    // The caller's token is not forwarded; the proxy mints its own.
    let tokens = upstream.tokens().await;
    assert_eq!(tokens.len(), 1);
    assert_ne!(tokens[0], "1");
}

#[tokio::test]
async fn test_body_relayed_unmodified() {
    let upstream = MockUpstream::start(Behavior::Wallet).await;
    let app = proxy_router(&upstream.url, 5);

    let (_, _, body) = get_path(app, "/api/walletGen").await;
    let value: Value = serde_json::from_slice(&body).unwrap();
    let object = value.as_object().unwrap();
    assert_eq!(object.len(), 3);
    assert!(object.contains_key("btcAddress"));
    assert!(object.contains_key("privateKey"));
    assert!(object.contains_key("seedPhrase"));
}

#[tokio::test]
async fn test_consecutive_calls_use_distinct_tokens() {
    let upstream = MockUpstream::start(Behavior::Wallet).await;
    let app = proxy_router(&upstream.url, 5);

    let (first, _, _) = get_path(app.clone(), "/api/walletGen").await;
    let (second, _, _) = get_path(app, "/api/walletGen").await;
    assert_eq!(first, StatusCode::OK);
    assert_eq!(second, StatusCode::OK);

    let tokens = upstream.tokens().await;
    assert_eq!(tokens.len(), 2);
    assert_ne!(tokens[0], tokens[1]);
    for token in &tokens {
        assert!(token.parse::<u64>().is_ok(), "token {} is not numeric", token);
    }
}

#[tokio::test]
async fn test_upstream_500_becomes_bad_gateway() {
    let upstream = MockUpstream::start(Behavior::ServerError).await;
    let app = proxy_router(&upstream.url, 5);

    let (status, headers, body) = get_path(app, "/api/walletGen").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(headers[header::CACHE_CONTROL], "no-store, max-age=0");
    let error: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code, 502);
    assert!(error.error.contains("500"));
}

#[tokio::test]
async fn test_malformed_json_becomes_bad_gateway() {
    let upstream = MockUpstream::start(Behavior::NotJson).await;
    let app = proxy_router(&upstream.url, 5);

    let (status, _, body) = get_path(app, "/api/walletGen").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert!(error.error.contains("malformed JSON"));
}

#[tokio::test]
async fn test_unreachable_upstream_becomes_bad_gateway() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = proxy_router(&format!("http://{}", addr), 5);
    let (status, _, _) = get_path(app, "/api/walletGen").await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
}

#[tokio::test]
async fn test_any_client_query_is_accepted() {
    let upstream = MockUpstream::start(Behavior::Wallet).await;
    let app = proxy_router(&upstream.url, 5);

    for path in [
        "/api/walletGen?_=1&_=2",
        "/api/walletGen?_=&extra=x",
        "/api/walletGen?_=not-a-number",
    ] {
        let (status, _, _) = get_path(app.clone(), path).await;
        assert_eq!(status, StatusCode::OK, "{} was rejected", path);
    }
    assert_eq!(upstream.tokens().await.len(), 3);
}

#[tokio::test]
async fn test_repeated_client_token_still_gets_error_body() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let app = proxy_router(&format!("http://{}", addr), 5);
    let (status, _, body) = get_path(app, "/api/walletGen?_=1&_=2").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    let error: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code, 502);
}

#[tokio::test]
async fn test_slow_upstream_times_out() {
    let upstream = MockUpstream::start(Behavior::Slow).await;
    let app = proxy_router(&upstream.url, 1);

    let (status, _, body) = get_path(app, "/api/walletGen").await;

    assert_eq!(status, StatusCode::GATEWAY_TIMEOUT);
    let error: ErrorBody = serde_json::from_slice(&body).unwrap();
    assert_eq!(error.code, 504);
}

#[tokio::test]
async fn test_qr_endpoint_serves_svg() {
    let app = proxy_router("http://127.0.0.1:9", 1);

    let (status, headers, body) = get_path(app.clone(), "/api/qr?data=1A1zP1eP5QGefi2DMPTfTL5SLmv7DivfNa").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/svg+xml");
    assert_eq!(headers[header::CACHE_CONTROL], "no-store, max-age=0");
    assert!(String::from_utf8(body).unwrap().contains("<svg"));

    let (status, _, _) = get_path(app, "/api/qr").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_index_and_health() {
    let app = proxy_router("http://127.0.0.1:9", 1);

    let (status, headers, body) = get_path(app.clone(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    let html = String::from_utf8(body).unwrap();
    assert!(html.contains("Generate Wallet"));
    assert!(html.contains("Learn More"));

    let (status, _, body) = get_path(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    let health: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(health["status"], "ok");
}
