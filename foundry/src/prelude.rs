//! Common imports for most foundry applications.

pub use crate::config::{FoundryConfig, ProviderKind};
pub use crate::{
    ChatError, ChatErrorKind, ChatMessage, ChatMode, ChatPolicy, ChatRequest, ChatResult,
    ChatRole, ChatService, ConfigError, ModelProvider, UsageSource, ask, assistant_message,
    build_chat_service, build_chat_service_with, parse_mode, parse_role, system_message,
    user_message,
};
pub use crate::{foundry_messages, foundry_msg, foundry_request};
