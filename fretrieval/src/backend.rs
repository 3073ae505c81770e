use fcommon::BoxFuture;

use crate::{RetrievalError, RetrievedPassage};

/// Similarity search over an external document store.
pub trait RetrievalBackend: Send + Sync {
    fn query<'a>(
        &'a self,
        query: &'a str,
        top_k: usize,
    ) -> BoxFuture<'a, Result<Vec<RetrievedPassage>, RetrievalError>>;
}

/// Stand-in when no retrieval service is configured. Every query falls back.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnavailableRetrievalBackend;

impl RetrievalBackend for UnavailableRetrievalBackend {
    fn query<'a>(
        &'a self,
        _query: &'a str,
        _top_k: usize,
    ) -> BoxFuture<'a, Result<Vec<RetrievedPassage>, RetrievalError>> {
        Box::pin(async { Err(RetrievalError::unconfigured("no retrieval backend configured")) })
    }
}
