use std::time::Duration;

use crate::RetrievalError;

pub trait RetrievalHooks: Send + Sync {
    fn on_query_start(&self, _top_k: usize) {}

    fn on_query_success(&self, _passages: usize, _elapsed: Duration) {}

    fn on_query_failure(&self, _error: &RetrievalError, _elapsed: Duration) {}
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRetrievalHooks;

impl RetrievalHooks for NoopRetrievalHooks {}
