//! Common `fprovider` imports for downstream crates.

pub use crate::{
    Message, ModelProvider, ModelRequest, ModelResponse, NoopOperationHooks, OutputItem,
    ProviderError, ProviderErrorKind, ProviderFuture, ProviderId, ProviderOperationHooks, Role,
    StopReason, TokenUsage, ToolCall, ToolDefinition, complete_observed,
};
pub use fcommon::{BoxFuture, GenerationOptions, MetadataMap};
