//! HTTP binding for the foundry chat service.
//!
//! `POST /api/chat`, `/api/chat-with-tool`, `/api/chat-with-agent`, and `/api/chat-with-doc`
//! accept `{messages: [{role, content}], temperature?, max_tokens?}` and answer with
//! `{content, mode, token_usage, degraded}`. `GET /api/health` is a liveness probe.

pub mod routes;
pub mod wire;

use foundry::ChatService;
use tracing_subscriber::EnvFilter;

pub use routes::{SERVICE_NAME, router};
pub use wire::{WireChatRequest, WireChatResponse, WireError, WireMessage, WireTokenUsage};

#[derive(Clone)]
pub struct AppState {
    pub chat: ChatService,
}

impl AppState {
    pub fn new(chat: ChatService) -> Self {
        Self { chat }
    }
}

/// Installs the global subscriber. `RUST_LOG` overrides the `info` default.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
