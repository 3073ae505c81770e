//! Chat orchestration across plain, tool, agent, and document modes.
//!
//! Every mode validates the request, optionally augments it, calls the model backend exactly
//! once, and stamps the answer with its mode marker. Only [`ChatErrorKind::InvalidInput`] and
//! [`ChatErrorKind::BackendUnavailable`] fail a request; tool and retrieval problems are
//! folded into the [`ChatResult`].
//!
//! ```rust
//! use fchat::{ChatMode, ModeMarker};
//!
//! assert_eq!(ModeMarker::Tool.apply("5 + 3 = 8"), "[Tool Mode] 5 + 3 = 8");
//! assert!(ChatMode::Tool.requires_user_turn());
//! assert!(!ChatMode::Doc.requires_user_turn());
//! ```

mod dispatch;
mod error;
mod service;
mod types;
mod usage;
mod validation;

pub mod prelude {
    pub use crate::{
        ChatError, ChatErrorKind, ChatErrorPhase, ChatMessage, ChatMode, ChatPolicy, ChatRequest,
        ChatResult, ChatRole, ChatService, ChatServiceBuilder, ModeMarker, ToolInvocation,
        ToolInvocationOutcome, UsageReport, UsageSource,
    };
}

pub use dispatch::{DispatchOutcome, ToolDispatcher, ToolInvocation, ToolInvocationOutcome};
pub use error::{ChatError, ChatErrorKind, ChatErrorPhase};
pub use service::{
    ChatPolicy, ChatService, ChatServiceBuilder, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE,
};
pub use types::{
    ChatMessage, ChatMode, ChatRequest, ChatResult, ChatRole, ModeMarker, UsageReport,
    UsageSource,
};
pub use usage::estimate_usage;
pub use validation::{validate_messages, validate_request};
