//! Request, result, and mode types for one orchestrated chat exchange.

use std::fmt::{Display, Formatter};
use std::time::Duration;

use fcommon::GenerationOptions;
use fprovider::{Message, Role, TokenUsage};
use fretrieval::{RetrievalError, RetrievedPassage};

use crate::ToolInvocation;

/// Message author. `Unspecified` stands for any role the caller sent that is not recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    System,
    User,
    Assistant,
    Unspecified,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
            Self::Unspecified => "unspecified",
        }
    }

    pub(crate) fn to_provider_role(self) -> Option<Role> {
        match self {
            Self::System => Some(Role::System),
            Self::User => Some(Role::User),
            Self::Assistant => Some(Role::Assistant),
            Self::Unspecified => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(ChatRole::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub temperature: Option<f32>,
    pub max_output_tokens: Option<u32>,
    /// Caller deadline for the whole exchange. Overrides the service policy when set.
    pub timeout: Option<Duration>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            temperature: None,
            max_output_tokens: None,
            timeout: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = Some(max_output_tokens);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub(crate) fn options(&self) -> GenerationOptions {
        GenerationOptions {
            temperature: self.temperature,
            max_tokens: self.max_output_tokens,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChatMode {
    Plain,
    Tool,
    Agent,
    Doc,
}

impl ChatMode {
    pub const ALL: [ChatMode; 4] = [Self::Plain, Self::Tool, Self::Agent, Self::Doc];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "chat",
            Self::Tool => "tool",
            Self::Agent => "agent",
            Self::Doc => "doc",
        }
    }

    /// Whether the final message must be user-authored.
    pub fn requires_user_turn(self) -> bool {
        matches!(self, Self::Tool)
    }
}

impl Display for ChatMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Prefix stamped on the content of every non-plain mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeMarker {
    Tool,
    Agent,
    RetrievalAugmented,
    RetrievalUnavailable,
}

impl ModeMarker {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Tool => "[Tool Mode]",
            Self::Agent => "[Agent Mode]",
            Self::RetrievalAugmented => "[RAG-Enhanced]",
            Self::RetrievalUnavailable => "[Doc Mode - retrieval unavailable]",
        }
    }

    pub fn apply(self, content: &str) -> String {
        format!("{} {content}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageSource {
    /// Exact counts reported by the model backend.
    Backend,
    /// Character-length approximation.
    Estimated,
}

impl UsageSource {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Backend => "backend",
            Self::Estimated => "estimated",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsageReport {
    pub usage: TokenUsage,
    pub source: UsageSource,
}

impl UsageReport {
    pub fn backend(usage: TokenUsage) -> Self {
        Self {
            usage,
            source: UsageSource::Backend,
        }
    }

    pub fn estimated(usage: TokenUsage) -> Self {
        Self {
            usage,
            source: UsageSource::Estimated,
        }
    }

    pub fn is_estimated(&self) -> bool {
        self.source == UsageSource::Estimated
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChatResult {
    pub content: String,
    pub mode: ChatMode,
    pub token_usage: UsageReport,
    /// One entry per backend-requested capability, in request order.
    pub tool_invocations: Vec<ToolInvocation>,
    /// Passages the answer was grounded in, ranked by relevance.
    pub passages: Vec<RetrievedPassage>,
    /// Set when document mode answered without retrieval.
    pub retrieval_fallback: Option<RetrievalError>,
}

impl ChatResult {
    pub(crate) fn new(mode: ChatMode, content: String, token_usage: UsageReport) -> Self {
        Self {
            content,
            mode,
            token_usage,
            tool_invocations: Vec::new(),
            passages: Vec::new(),
            retrieval_fallback: None,
        }
    }

    /// True when a capability failed or retrieval fell back.
    pub fn is_degraded(&self) -> bool {
        self.retrieval_fallback.is_some()
            || self
                .tool_invocations
                .iter()
                .any(ToolInvocation::is_failure)
    }
}

pub(crate) fn to_provider_messages(messages: &[ChatMessage]) -> Vec<Message> {
    messages
        .iter()
        .filter_map(|message| {
            message
                .role
                .to_provider_role()
                .map(|role| Message::new(role, message.content.clone()))
        })
        .collect()
}
