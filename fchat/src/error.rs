//! Chat-layer errors and classification.
//!
//! Only two kinds terminate a request. Tool and retrieval failures degrade the result
//! instead and never become a [`ChatError`].

use std::error::Error;
use std::fmt::{Display, Formatter};

use fprovider::ProviderError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorKind {
    /// The caller's request was rejected before any backend call.
    InvalidInput,
    /// The system could not produce an answer.
    BackendUnavailable,
}

impl ChatErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::BackendUnavailable => "backend_unavailable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatErrorPhase {
    Validation,
    Backend,
    Deadline,
}

impl ChatErrorPhase {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::Backend => "backend",
            Self::Deadline => "deadline",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatError {
    pub kind: ChatErrorKind,
    pub message: String,
    pub phase: Option<ChatErrorPhase>,
    /// Offending message position for per-message validation failures.
    pub index: Option<usize>,
}

impl ChatError {
    pub fn new(kind: ChatErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            phase: None,
            index: None,
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::InvalidInput, message).with_phase(ChatErrorPhase::Validation)
    }

    pub fn invalid_message(index: usize, message: impl Into<String>) -> Self {
        Self::invalid_input(message).with_index(index)
    }

    pub fn backend_unavailable(message: impl Into<String>) -> Self {
        Self::new(ChatErrorKind::BackendUnavailable, message).with_phase(ChatErrorPhase::Backend)
    }

    pub fn with_phase(mut self, phase: ChatErrorPhase) -> Self {
        self.phase = Some(phase);
        self
    }

    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    pub fn is_user_error(&self) -> bool {
        self.kind == ChatErrorKind::InvalidInput
    }
}

impl Display for ChatError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.phase {
            Some(phase) => write!(f, "{:?} [{}]: {}", self.kind, phase.as_str(), self.message),
            None => write!(f, "{:?}: {}", self.kind, self.message),
        }
    }
}

impl Error for ChatError {}

impl From<ProviderError> for ChatError {
    fn from(value: ProviderError) -> Self {
        ChatError::backend_unavailable(format!(
            "model backend call failed ({}): {}",
            value.kind.as_str(),
            value.message
        ))
    }
}
