//! Model backend contract for the foundry chat orchestration layer.
//!
//! The orchestrator only depends on [`ModelProvider`]; concrete HTTP adapters live under
//! [`adapters`] behind cargo features.
//!
//! ```rust
//! use fprovider::{Message, ModelRequest, Role};
//!
//! let request = ModelRequest::new("gpt-4o-mini", vec![Message::new(Role::User, "hi")]);
//! assert!(request.validate().is_ok());
//! ```

mod error;
mod hooks;
mod model;
mod provider;
mod secret;

pub mod adapters;
pub mod prelude;

pub use error::{ProviderError, ProviderErrorKind};
pub use hooks::{NoopOperationHooks, ProviderOperationHooks, complete_observed};
pub use model::{
    Message, ModelRequest, ModelResponse, OutputItem, ProviderId, Role, StopReason, TokenUsage,
    ToolCall, ToolDefinition,
};
pub use provider::{ModelProvider, ProviderFuture};
pub use secret::SecretString;
