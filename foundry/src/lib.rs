//! Unified facade over the foundry workspace crates.
//!
//! Load a [`FoundryConfig`](config::FoundryConfig) once at startup, then turn it into a
//! shared [`ChatService`] with [`build_chat_service`].
//!
//! ```rust
//! use foundry::{ChatMode, parse_mode, foundry_request};
//!
//! let request = foundry_request![
//!     system => "Answer briefly.",
//!     user => "What is 12 / 4?",
//! ];
//! assert_eq!(request.messages.len(), 2);
//! assert_eq!(parse_mode("chat-with-tool"), Some(ChatMode::Tool));
//! ```

mod macros;

pub mod config;
pub mod prelude;
pub mod runtime;
pub mod util;

pub use fchat;
pub use fcommon;
pub use fobserve;
pub use fprovider;
pub use fretrieval;
pub use ftooling;

pub use config::{ConfigError, ConfigErrorKind};
pub use fchat::{
    ChatError, ChatErrorKind, ChatErrorPhase, ChatMessage, ChatMode, ChatPolicy, ChatRequest,
    ChatResult, ChatRole, ChatService, ChatServiceBuilder, ModeMarker, ToolInvocation,
    ToolInvocationOutcome, UsageReport, UsageSource,
};
pub use fcommon::{GenerationOptions, RequestId};
pub use fprovider::{ModelProvider, ProviderError, ProviderErrorKind, TokenUsage};
pub use fretrieval::{RetrievalError, RetrievalErrorKind, RetrievedPassage};
pub use ftooling::{ToolError, ToolErrorKind};

pub use runtime::{build_chat_service, build_chat_service_with, build_provider, chat_policy};
pub use util::{
    ask, assistant_message, parse_mode, parse_role, system_message, user_message,
};
