//! Axum handlers for the four chat endpoints and the health probe.

use std::time::Instant;

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use foundry::{ChatErrorKind, ChatMode};
use serde_json::json;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::AppState;
use crate::wire::{WireChatRequest, WireChatResponse, WireError};

pub const SERVICE_NAME: &str = "foundry";

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/chat", post(chat))
        .route("/api/chat-with-tool", post(chat_with_tool))
        .route("/api/chat-with-agent", post(chat_with_agent))
        .route("/api/chat-with-doc", post(chat_with_doc))
        .route("/api/health", get(health))
        .layer(cors)
        .with_state(state)
}

async fn chat(
    State(state): State<AppState>,
    body: Result<Json<WireChatRequest>, JsonRejection>,
) -> Response {
    handle(&state, ChatMode::Plain, body).await
}

async fn chat_with_tool(
    State(state): State<AppState>,
    body: Result<Json<WireChatRequest>, JsonRejection>,
) -> Response {
    handle(&state, ChatMode::Tool, body).await
}

async fn chat_with_agent(
    State(state): State<AppState>,
    body: Result<Json<WireChatRequest>, JsonRejection>,
) -> Response {
    handle(&state, ChatMode::Agent, body).await
}

async fn chat_with_doc(
    State(state): State<AppState>,
    body: Result<Json<WireChatRequest>, JsonRejection>,
) -> Response {
    handle(&state, ChatMode::Doc, body).await
}

async fn health() -> Json<serde_json::Value> {
    Json(json!({"status": "healthy", "service": SERVICE_NAME}))
}

async fn handle(
    state: &AppState,
    mode: ChatMode,
    body: Result<Json<WireChatRequest>, JsonRejection>,
) -> Response {
    let Json(wire) = match body {
        Ok(body) => body,
        Err(rejection) => {
            warn!(
                mode = mode.as_str(),
                error = %rejection.body_text(),
                "rejected undecodable body"
            );
            return (
                StatusCode::BAD_REQUEST,
                Json(WireError::undecodable(rejection.body_text())),
            )
                .into_response();
        }
    };

    let started = Instant::now();
    let messages = wire.messages.len();
    match state.chat.run(mode, wire.into_chat_request()).await {
        Ok(result) => {
            info!(
                mode = mode.as_str(),
                messages,
                elapsed_ms = started.elapsed().as_millis() as u64,
                degraded = result.is_degraded(),
                usage_source = result.token_usage.source.as_str(),
                "chat request completed"
            );
            (StatusCode::OK, Json(WireChatResponse::from(&result))).into_response()
        }
        Err(error) => {
            let status = match error.kind {
                ChatErrorKind::InvalidInput => StatusCode::BAD_REQUEST,
                ChatErrorKind::BackendUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            };
            warn!(
                mode = mode.as_str(),
                messages,
                elapsed_ms = started.elapsed().as_millis() as u64,
                kind = error.kind.as_str(),
                phase = error.phase.map(|phase| phase.as_str()),
                error = %error.message,
                "chat request failed"
            );
            (status, Json(WireError::from(&error))).into_response()
        }
    }
}
