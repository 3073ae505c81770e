#![cfg(feature = "provider-ollama")]

use std::collections::HashMap;

use foundry::config::FoundryConfig;
use foundry::{ChatErrorKind, UsageSource, build_chat_service, foundry_request};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> FoundryConfig {
    FoundryConfig::from_env_map(HashMap::from([
        ("FOUNDRY_PROVIDER__KIND".to_string(), "ollama".to_string()),
        ("FOUNDRY_PROVIDER__BASE_URL".to_string(), server.uri()),
        ("FOUNDRY_RETRIEVAL__BASE_URL".to_string(), server.uri()),
        ("FOUNDRY_SEARCH__BASE_URL".to_string(), server.uri()),
    ]))
    .expect("config should load")
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "model": "llama3.2",
        "choices": [{
            "message": {"content": content},
            "finish_reason": "stop"
        }],
        "usage": {"prompt_tokens": 40, "completion_tokens": 6, "total_tokens": 46}
    })
}

#[tokio::test]
async fn doc_mode_grounds_the_backend_call_in_retrieved_passages() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/query"))
        .and(body_partial_json(json!({"query": "How long do refunds take?", "n_results": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "documents": ["Refunds are issued within 14 days.", "Shipping is free over $50."],
            "metadatas": [{"filename": "policy.md"}, {"filename": "faq.md"}],
            "distances": [0.1, 0.7],
            "ids": ["a", "b"]
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({"model": "llama3.2", "max_tokens": 2048})))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("Within 14 days.")))
        .expect(1)
        .mount(&server)
        .await;

    let service = build_chat_service(&config_for(&server)).expect("service should build");
    let result = service
        .chat_with_doc(foundry_request![user => "How long do refunds take?"])
        .await
        .expect("doc chat should succeed");

    assert_eq!(result.content, "[RAG-Enhanced] Within 14 days.");
    assert_eq!(result.passages.len(), 2);
    assert_eq!(result.passages[0].source_label, "policy.md");
    assert!(!result.is_degraded());
    assert_eq!(result.token_usage.source, UsageSource::Backend);
    assert_eq!(result.token_usage.usage.total_tokens, 46);
}

#[tokio::test]
async fn tool_mode_runs_the_calculator_against_a_live_backend() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "tools": [
                {"type": "function", "function": {"name": "calculate"}},
                {"type": "function", "function": {"name": "search_web"}}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "llama3.2",
            "choices": [{
                "message": {
                    "content": "Let me calculate that.",
                    "tool_calls": [{
                        "id": "call_1",
                        "type": "function",
                        "function": {"name": "calculate", "arguments": "{\"expression\":\"5 + 3\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let service = build_chat_service(&config_for(&server)).expect("service should build");
    let result = service
        .chat_with_tool(foundry_request![user => "Calculate 5 + 3"])
        .await
        .expect("tool chat should succeed");

    assert_eq!(
        result.content,
        "[Tool Mode] Let me calculate that.\n\nTool Results:\n5 + 3 = 8"
    );
    assert_eq!(result.tool_invocations.len(), 1);
    assert_eq!(result.token_usage.source, UsageSource::Estimated);
}

#[tokio::test]
async fn backend_outage_surfaces_as_backend_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({
            "error": {"message": "model is loading"}
        })))
        .mount(&server)
        .await;

    let service = build_chat_service(&config_for(&server)).expect("service should build");
    let error = service
        .chat(foundry_request![user => "hello"])
        .await
        .expect_err("outage should fail the request");

    assert_eq!(error.kind, ChatErrorKind::BackendUnavailable);
    assert!(!error.is_user_error());
}
