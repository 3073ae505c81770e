use std::time::Duration;

use fretrieval::{HttpRetrievalBackend, RetrievalBackend, RetrievalErrorKind};
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpRetrievalBackend {
    HttpRetrievalBackend::new(reqwest::Client::new()).with_base_url(format!("{}/", server.uri()))
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[tokio::test]
async fn query_posts_request_and_ranks_passages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_json(json!({"query": "refund policy", "n_results": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": ["shipping notes", "refunds within 14 days", "holiday hours"],
            "metadatas": [{"filename": "shipping.md"}, {"filename": "policy.md"}, {}],
            "distances": [0.4, 0.1, 0.9],
            "ids": ["a", "b", "c"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let passages = backend_for(&server)
        .query("refund policy", 3)
        .await
        .expect("query should succeed");

    assert_eq!(passages.len(), 3);
    assert_eq!(passages[0].text, "refunds within 14 days");
    assert_eq!(passages[0].source_label, "policy.md");
    assert_close(passages[0].relevance, 0.9);
    assert_eq!(passages[1].source_label, "shipping.md");
    assert_close(passages[1].relevance, 0.6);
    assert_eq!(passages[2].source_label, "unknown");
    assert_close(passages[2].relevance, 0.1);
}

#[tokio::test]
async fn empty_result_set_is_not_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": [],
            "metadatas": [],
            "distances": []
        })))
        .mount(&server)
        .await;

    let passages = backend_for(&server)
        .query("anything", 3)
        .await
        .expect("query should succeed");
    assert!(passages.is_empty());
}

#[tokio::test]
async fn non_success_status_is_classified() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let error = backend_for(&server)
        .query("refund policy", 3)
        .await
        .expect_err("query should fail");
    assert_eq!(error.kind, RetrievalErrorKind::Status);
    assert_eq!(error.status, Some(503));
}

#[tokio::test]
async fn undecodable_body_is_malformed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let error = backend_for(&server)
        .query("refund policy", 3)
        .await
        .expect_err("query should fail");
    assert_eq!(error.kind, RetrievalErrorKind::Malformed);
}

#[tokio::test]
async fn null_metadata_and_distances_keep_documents() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": ["refunds within 14 days"],
            "metadatas": null,
            "distances": null,
            "ids": ["a"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let passages = backend_for(&server)
        .query("refund policy", 3)
        .await
        .expect("null optional lists should decode");

    assert_eq!(passages.len(), 1);
    assert_eq!(passages[0].text, "refunds within 14 days");
    assert_eq!(passages[0].source_label, "unknown");
    assert_close(passages[0].relevance, 1.0);
}

#[tokio::test]
async fn slow_service_times_out() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"documents": []}))
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&server)
        .await;

    let error = backend_for(&server)
        .with_timeout(Duration::from_millis(50))
        .query("refund policy", 3)
        .await
        .expect_err("query should time out");
    assert_eq!(error.kind, RetrievalErrorKind::Timeout);
}

#[tokio::test]
async fn unreachable_service_is_transport_failure() {
    let backend = HttpRetrievalBackend::new(reqwest::Client::new())
        .with_base_url("http://127.0.0.1:9");

    let error = backend
        .query("refund policy", 3)
        .await
        .expect_err("query should fail");
    assert_eq!(error.kind, RetrievalErrorKind::Transport);
}
