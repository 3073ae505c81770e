//! Retrieval failures. None of them fail a chat request; they trigger the unaugmented path.

use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalErrorKind {
    Transport,
    Timeout,
    Status,
    Malformed,
    Unconfigured,
    /// The conversation has no user-authored message to search with.
    EmptyQuery,
}

impl RetrievalErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Timeout => "timeout",
            Self::Status => "status",
            Self::Malformed => "malformed",
            Self::Unconfigured => "unconfigured",
            Self::EmptyQuery => "empty_query",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetrievalError {
    pub kind: RetrievalErrorKind,
    pub message: String,
    pub status: Option<u16>,
}

impl RetrievalError {
    pub fn new(kind: RetrievalErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        Self::new(RetrievalErrorKind::Transport, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(RetrievalErrorKind::Timeout, message)
    }

    pub fn status(status: u16) -> Self {
        Self {
            kind: RetrievalErrorKind::Status,
            message: format!("retrieval query failed with status {status}"),
            status: Some(status),
        }
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(RetrievalErrorKind::Malformed, message)
    }

    pub fn unconfigured(message: impl Into<String>) -> Self {
        Self::new(RetrievalErrorKind::Unconfigured, message)
    }

    pub fn empty_query(message: impl Into<String>) -> Self {
        Self::new(RetrievalErrorKind::EmptyQuery, message)
    }
}

impl Display for RetrievalError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}

impl Error for RetrievalError {}
