//! Document retrieval for grounding chat requests.
//!
//! A [`RetrievalBackend`] answers similarity queries; [`RetrievalAugmenter`] turns the answer
//! into a system message prepended to the conversation. Failures never propagate as errors;
//! they surface as [`Augmentation::Unavailable`] so callers can degrade gracefully.
//!
//! ```rust
//! use fretrieval::{RetrievedPassage, build_context_message, rank_passages};
//!
//! let mut passages = vec![
//!     RetrievedPassage::from_distance("far", None, 0.8),
//!     RetrievedPassage::from_distance("near", Some("notes.md".to_string()), 0.1),
//! ];
//! rank_passages(&mut passages);
//! assert_eq!(passages[0].text, "near");
//! assert_eq!(passages[1].source_label, "unknown");
//!
//! let message = build_context_message(&passages);
//! assert!(message.content.contains("(from: notes.md, relevance: 0.900)"));
//! ```

mod augmenter;
mod backend;
mod error;
mod hooks;
mod http;
mod passage;

pub use augmenter::{Augmentation, DEFAULT_TOP_K, RetrievalAugmenter, build_context_message};
pub use backend::{RetrievalBackend, UnavailableRetrievalBackend};
pub use error::{RetrievalError, RetrievalErrorKind};
pub use hooks::{NoopRetrievalHooks, RetrievalHooks};
pub use http::{DEFAULT_RETRIEVAL_BASE_URL, DEFAULT_RETRIEVAL_TIMEOUT, HttpRetrievalBackend};
pub use passage::{RetrievedPassage, UNKNOWN_SOURCE, rank_passages};
