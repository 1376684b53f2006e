//! End-to-end tests of the HTTP transport and client pipeline against a mock upstream

mod common;

use common::*;
use news_digest::executor::API_KEY_HEADER;
use news_digest::{
    Error, ErrorKind, HttpTransport, NetworkError, NewsClient, Query, RequestExecutor,
    RequestOutcome, RetryConfig,
};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .expect("request recording enabled")
        .len()
}

#[tokio::test]
async fn fetch_returns_articles_in_upstream_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header(API_KEY_HEADER, TEST_API_KEY))
        .and(body_partial_json(serde_json::json!({
            "tools": [{"google_search": {}}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(articles_envelope(&sample_articles())))
        .mount(&server)
        .await;

    let client = NewsClient::new(config_for(&server, 3)).unwrap();
    let outcome = client.fetch_topic("renewable energy").await.unwrap();

    assert_eq!(outcome, RequestOutcome::success(sample_articles()));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn prompt_carries_the_topic() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope_with_text("[]")))
        .mount(&server)
        .await;

    let client = NewsClient::new(config_for(&server, 1)).unwrap();
    let outcome = client.fetch_topic("  deep sea mining ").await.unwrap();
    assert_eq!(outcome, RequestOutcome::success(Vec::new()));

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let text = body["contents"][0]["parts"][0]["text"].as_str().unwrap();
    assert!(text.contains("\"deep sea mining\""), "prompt: {text}");
    assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
}

#[tokio::test]
async fn server_errors_are_retried_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .up_to_n_times(2)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(articles_envelope(&sample_articles())))
        .mount(&server)
        .await;

    let client = NewsClient::new(config_for(&server, 5)).unwrap();
    let outcome = client.fetch(&Query::new("energy").unwrap()).await;

    assert!(outcome.is_success());
    assert_eq!(request_count(&server).await, 3);
}

#[tokio::test]
async fn persistent_failure_exhausts_attempts() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let client = NewsClient::new(config_for(&server, 4)).unwrap();
    let outcome = client.fetch(&Query::new("energy").unwrap()).await;

    assert_eq!(outcome.error_kind(), Some(ErrorKind::Network));
    assert_eq!(request_count(&server).await, 4);
}

#[tokio::test]
async fn client_errors_are_retried_too() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .mount(&server)
        .await;

    let transport = Arc::new(HttpTransport::new(&config_for(&server, 2).api).unwrap());
    let executor = RequestExecutor::new(
        transport,
        RetryConfig::new(2, Duration::from_millis(10)),
        Duration::from_secs(5),
    );

    let err = executor.execute(&serde_json::json!({})).await.unwrap_err();
    match err {
        Error::Network {
            attempts,
            source: NetworkError::Status { status, body },
        } => {
            assert_eq!(attempts, 2);
            assert_eq!(status, 400);
            assert_eq!(body, "bad request");
        }
        other => panic!("expected Network status error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_envelope_is_classified_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"candidates": []})),
        )
        .mount(&server)
        .await;

    let client = NewsClient::new(config_for(&server, 5)).unwrap();
    let outcome = client.fetch(&Query::new("energy").unwrap()).await;

    assert_eq!(outcome, RequestOutcome::failure(ErrorKind::EmptyResponse));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn malformed_text_is_classified_without_retry() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope_with_text("not json")))
        .mount(&server)
        .await;

    let client = NewsClient::new(config_for(&server, 5)).unwrap();
    let outcome = client.fetch(&Query::new("energy").unwrap()).await;

    assert_eq!(outcome, RequestOutcome::failure(ErrorKind::MalformedPayload));
    assert_eq!(request_count(&server).await, 1);
}

#[tokio::test]
async fn slow_upstream_hits_per_attempt_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(envelope_with_text("[]"))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let mut config = config_for(&server, 2);
    config.api.request_timeout = Duration::from_millis(100);
    let transport = Arc::new(HttpTransport::new(&config.api).unwrap());
    let executor = RequestExecutor::new(transport, config.retry.clone(), config.api.request_timeout);

    let err = executor.execute(&serde_json::json!({})).await.unwrap_err();

    assert!(
        matches!(
            err,
            Error::Network {
                attempts: 2,
                source: NetworkError::Timeout(_)
            }
        ),
        "got {err:?}"
    );
}

#[tokio::test]
async fn unreachable_upstream_is_transport_error() {
    // Grab a free port, then release it so nothing is listening there
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut config = news_digest::Config::default();
    config.api.endpoint = format!("http://127.0.0.1:{port}{GENERATE_PATH}");
    config.retry = RetryConfig::new(2, Duration::from_millis(10));

    let transport = Arc::new(HttpTransport::new(&config.api).unwrap());
    let executor = RequestExecutor::new(transport, config.retry.clone(), config.api.request_timeout);
    let err = executor.execute(&serde_json::json!({})).await.unwrap_err();

    assert!(
        matches!(
            err,
            Error::Network {
                attempts: 2,
                source: NetworkError::Transport(_)
            }
        ),
        "got {err:?}"
    );

    let client = NewsClient::new(config).unwrap();
    let outcome = client.fetch(&Query::new("energy").unwrap()).await;
    assert_eq!(outcome.error_kind(), Some(ErrorKind::Network));
}

#[tokio::test]
async fn missing_api_key_sends_no_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope_with_text("[]")))
        .mount(&server)
        .await;

    let mut config = config_for(&server, 1);
    config.api.api_key = None;
    let client = NewsClient::new(config).unwrap();
    client.fetch(&Query::new("energy").unwrap()).await;

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(!requests[0].headers.contains_key(API_KEY_HEADER));
}
