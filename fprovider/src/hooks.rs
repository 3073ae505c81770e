//! Lifecycle hooks around single model backend calls.
//!
//! ```rust
//! use std::sync::atomic::{AtomicUsize, Ordering};
//! use std::time::Duration;
//!
//! use fprovider::{ProviderId, ProviderOperationHooks};
//!
//! #[derive(Default)]
//! struct CountingHooks {
//!     starts: AtomicUsize,
//! }
//!
//! impl ProviderOperationHooks for CountingHooks {
//!     fn on_call_start(&self, _provider: ProviderId, _operation: &str) {
//!         self.starts.fetch_add(1, Ordering::SeqCst);
//!     }
//! }
//!
//! let hooks = CountingHooks::default();
//! hooks.on_call_start(ProviderId::OpenAi, "complete");
//! hooks.on_call_success(ProviderId::OpenAi, "complete", Duration::from_millis(3));
//! assert_eq!(hooks.starts.load(Ordering::SeqCst), 1);
//! ```

use std::time::{Duration, Instant};

use crate::{ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderId};

pub trait ProviderOperationHooks: Send + Sync {
    fn on_call_start(&self, _provider: ProviderId, _operation: &str) {}

    fn on_call_success(&self, _provider: ProviderId, _operation: &str, _elapsed: Duration) {}

    fn on_call_failure(
        &self,
        _provider: ProviderId,
        _operation: &str,
        _elapsed: Duration,
        _error: &ProviderError,
    ) {
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopOperationHooks;

impl ProviderOperationHooks for NoopOperationHooks {}

/// Runs one `complete` call, reporting its start and outcome to `hooks`.
pub async fn complete_observed(
    provider: &dyn ModelProvider,
    hooks: &dyn ProviderOperationHooks,
    request: ModelRequest,
) -> Result<ModelResponse, ProviderError> {
    let provider_id = provider.id();
    hooks.on_call_start(provider_id, "complete");
    let started = Instant::now();

    let result = provider.complete(request).await;
    let elapsed = started.elapsed();
    match &result {
        Ok(_) => hooks.on_call_success(provider_id, "complete", elapsed),
        Err(error) => hooks.on_call_failure(provider_id, "complete", elapsed, error),
    }

    result
}
