//! Focused unit tests for chat-completions adapter internals.

#![cfg(test)]

use fcommon::GenerationOptions;

use crate::{
    Message, ModelRequest, ProviderErrorKind, ProviderId, Role, StopReason, ToolDefinition,
};

use super::provider::build_openai_request;
use super::serde_api::{OpenAiApiResponse, build_api_request, parse_finish_reason};
use super::types::{OpenAiFinishReason, OpenAiRequest, OpenAiResponse, OpenAiRole};

#[test]
fn build_openai_request_uses_fallback_model_and_forwards_options() {
    let request = ModelRequest::new("  ", vec![Message::new(Role::User, "hi")])
        .with_options(
            GenerationOptions::default()
                .with_temperature(0.7)
                .with_max_tokens(2048),
        )
        .with_tools(vec![ToolDefinition {
            name: "calculate".to_string(),
            description: "math".to_string(),
            input_schema: "{\"type\":\"object\"}".to_string(),
        }]);

    let built = build_openai_request(request, "gpt-4o-mini");
    assert_eq!(built.model, "gpt-4o-mini");
    assert_eq!(built.messages[0].role, OpenAiRole::User);
    assert_eq!(built.tools.len(), 1);
    assert_eq!(built.temperature, Some(0.7));
    assert_eq!(built.max_tokens, Some(2048));
}

#[test]
fn parse_finish_reason_maps_expected_values() {
    assert_eq!(parse_finish_reason(Some("stop")), OpenAiFinishReason::Stop);
    assert_eq!(
        parse_finish_reason(Some("length")),
        OpenAiFinishReason::Length
    );
    assert_eq!(
        parse_finish_reason(Some("tool_calls")),
        OpenAiFinishReason::ToolCalls
    );
    assert_eq!(
        parse_finish_reason(Some("unknown")),
        OpenAiFinishReason::Other
    );
    assert_eq!(parse_finish_reason(None), OpenAiFinishReason::Other);
}

#[test]
fn build_api_request_rejects_invalid_tool_schema() {
    let request = OpenAiRequest {
        model: "gpt-4o-mini".to_string(),
        messages: vec![super::types::OpenAiMessage {
            role: OpenAiRole::User,
            content: "hi".to_string(),
        }],
        tools: vec![super::types::OpenAiTool {
            name: "broken".to_string(),
            description: "bad schema".to_string(),
            input_schema: "{not json".to_string(),
        }],
        temperature: None,
        max_tokens: None,
    };

    let error = build_api_request(request).expect_err("schema must be JSON");
    assert_eq!(error.kind, ProviderErrorKind::InvalidRequest);
}

#[test]
fn response_without_choices_is_unavailable() {
    let parsed: OpenAiApiResponse =
        serde_json::from_str(r#"{"model":"gpt-4o-mini","choices":[]}"#).expect("json");
    let error = OpenAiResponse::try_from(parsed).expect_err("no choices");
    assert_eq!(error.kind, ProviderErrorKind::Unavailable);
}

#[test]
fn response_without_usage_maps_to_unknown_usage() {
    let parsed: OpenAiApiResponse = serde_json::from_str(
        r#"{"model":"llama3.2","choices":[{"message":{"content":"hello","tool_calls":[{"id":"call_1","type":"function","function":{"name":"calculate","arguments":"{\"expression\":\"5+3\"}"}}]},"finish_reason":"tool_calls"}]}"#,
    )
    .expect("json");

    let response = OpenAiResponse::try_from(parsed)
        .expect("response should map")
        .into_model_response(ProviderId::Ollama);

    assert_eq!(response.usage, None);
    assert_eq!(response.text(), "hello");
    assert_eq!(response.stop_reason, StopReason::ToolUse);
    assert_eq!(response.tool_calls()[0].arguments, "{\"expression\":\"5+3\"}");
}
