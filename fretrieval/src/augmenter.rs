//! Grounds a conversation in retrieved passages before it reaches the model backend.

use std::sync::Arc;
use std::time::{Duration, Instant};

use fcommon::with_timeout;
use fprovider::{Message, Role};

use crate::{
    DEFAULT_RETRIEVAL_TIMEOUT, NoopRetrievalHooks, RetrievalBackend, RetrievalError,
    RetrievalHooks, RetrievedPassage,
};

pub const DEFAULT_TOP_K: usize = 3;

/// Outcome of one augmentation attempt. Neither variant is an error for the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum Augmentation {
    /// `messages` starts with the document context message followed by the original list.
    Augmented {
        messages: Vec<Message>,
        passages: Vec<RetrievedPassage>,
    },
    /// Retrieval failed; the caller proceeds with its original messages.
    Unavailable { error: RetrievalError },
}

#[derive(Clone)]
pub struct RetrievalAugmenter {
    backend: Arc<dyn RetrievalBackend>,
    hooks: Arc<dyn RetrievalHooks>,
    top_k: usize,
    timeout: Duration,
}

impl RetrievalAugmenter {
    pub fn new(backend: Arc<dyn RetrievalBackend>) -> Self {
        Self {
            backend,
            hooks: Arc::new(NoopRetrievalHooks),
            top_k: DEFAULT_TOP_K,
            timeout: DEFAULT_RETRIEVAL_TIMEOUT,
        }
    }

    pub fn with_hooks(mut self, hooks: Arc<dyn RetrievalHooks>) -> Self {
        self.hooks = hooks;
        self
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn top_k(&self) -> usize {
        self.top_k
    }

    pub async fn augment(&self, messages: &[Message]) -> Augmentation {
        match self.retrieve(messages).await {
            Ok(passages) => {
                let mut augmented = Vec::with_capacity(messages.len() + 1);
                augmented.push(build_context_message(&passages));
                augmented.extend_from_slice(messages);
                Augmentation::Augmented {
                    messages: augmented,
                    passages,
                }
            }
            Err(error) => Augmentation::Unavailable { error },
        }
    }

    async fn retrieve(
        &self,
        messages: &[Message],
    ) -> Result<Vec<RetrievedPassage>, RetrievalError> {
        let query = latest_user_query(messages)?;

        self.hooks.on_query_start(self.top_k);
        let started = Instant::now();
        let result = with_timeout(self.timeout, self.backend.query(query, self.top_k))
            .await
            .map_err(|elapsed| RetrievalError::timeout(elapsed.to_string()))
            .and_then(|result| result);

        let elapsed = started.elapsed();
        match &result {
            Ok(passages) => self.hooks.on_query_success(passages.len(), elapsed),
            Err(error) => self.hooks.on_query_failure(error, elapsed),
        }

        result
    }
}

fn latest_user_query(messages: &[Message]) -> Result<&str, RetrievalError> {
    messages
        .iter()
        .rev()
        .find(|message| message.role == Role::User && !message.content.trim().is_empty())
        .map(|message| message.content.as_str())
        .ok_or_else(|| RetrievalError::empty_query("no user message to search with"))
}

/// Builds the system message that embeds `passages` in a delimited documents block.
pub fn build_context_message(passages: &[RetrievedPassage]) -> Message {
    let documents = passages
        .iter()
        .enumerate()
        .map(|(index, passage)| {
            format!(
                "\n\n--- Document {} (from: {}, relevance: {:.3}) ---\n{}",
                index + 1,
                passage.source_label,
                passage.relevance,
                passage.text
            )
        })
        .collect::<String>();

    Message::new(
        Role::System,
        format!(
            "You are a helpful AI assistant with access to relevant documents. Use the following \
             document excerpts to help answer the user's question:\n\n=== RELEVANT DOCUMENTS ===\
             {documents}\n\n=== END DOCUMENTS ===\n\nWhen answering, reference specific \
             information from the documents when relevant. If the documents don't contain \
             information to answer the question, say so clearly."
        ),
    )
}
