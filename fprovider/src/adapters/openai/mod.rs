//! OpenAI-compatible chat-completions adapter.
//!
//! The same transport backs the Ollama adapter, which serves the identical wire shape.

mod provider;
mod serde_api;
mod tests;
mod transport;
mod types;

pub(crate) use provider::build_openai_request;
pub use provider::OpenAiProvider;
pub use transport::{OPENAI_BASE_URL, OpenAiHttpTransport, OpenAiTransport};
pub use types::{
    OpenAiAssistantMessage, OpenAiAuth, OpenAiFinishReason, OpenAiMessage, OpenAiRequest,
    OpenAiResponse, OpenAiRole, OpenAiTool, OpenAiToolCall, OpenAiUsage,
};
