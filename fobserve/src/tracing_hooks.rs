//! Structured `tracing` events for provider, tool, and retrieval phases.
//!
//! ```rust
//! use fobserve::TracingObservabilityHooks;
//! use fretrieval::RetrievalHooks;
//!
//! fn accepts_retrieval_hooks(_hooks: &dyn RetrievalHooks) {}
//!
//! let hooks = TracingObservabilityHooks;
//! accepts_retrieval_hooks(&hooks);
//! ```

use std::time::Duration;

use fprovider::{ProviderError, ProviderId, ProviderOperationHooks, ToolCall};
use fretrieval::{RetrievalError, RetrievalHooks};
use ftooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObservabilityHooks;

impl ProviderOperationHooks for TracingObservabilityHooks {
    fn on_call_start(&self, provider: ProviderId, operation: &str) {
        tracing::info!(
            phase = "provider",
            event = "call_start",
            provider = %provider,
            operation
        );
    }

    fn on_call_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        tracing::info!(
            phase = "provider",
            event = "call_success",
            provider = %provider,
            operation,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_call_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        tracing::error!(
            phase = "provider",
            event = "call_failure",
            provider = %provider,
            operation,
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = error.kind.as_str(),
            status = error.status,
            error = %error
        );
    }
}

impl ToolRuntimeHooks for TracingObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        tracing::info!(
            phase = "tool",
            event = "execution_start",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            request_id = %context.request_id,
            trace_id = context.trace_id.as_ref().map(|id| id.as_str())
        );
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        tracing::info!(
            phase = "tool",
            event = "execution_success",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            request_id = %context.request_id,
            trace_id = context.trace_id.as_ref().map(|id| id.as_str()),
            output_bytes = result.output.len(),
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        tracing::warn!(
            phase = "tool",
            event = "execution_failure",
            tool_name = tool_call.name,
            tool_call_id = tool_call.id,
            request_id = %context.request_id,
            trace_id = context.trace_id.as_ref().map(|id| id.as_str()),
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = error.kind.as_str(),
            user_error = error.is_user_error(),
            error = %error
        );
    }
}

impl RetrievalHooks for TracingObservabilityHooks {
    fn on_query_start(&self, top_k: usize) {
        tracing::info!(phase = "retrieval", event = "query_start", top_k);
    }

    fn on_query_success(&self, passages: usize, elapsed: Duration) {
        tracing::info!(
            phase = "retrieval",
            event = "query_success",
            passages,
            elapsed_ms = elapsed.as_millis() as u64
        );
    }

    fn on_query_failure(&self, error: &RetrievalError, elapsed: Duration) {
        tracing::warn!(
            phase = "retrieval",
            event = "query_failure",
            elapsed_ms = elapsed.as_millis() as u64,
            error_kind = error.kind.as_str(),
            status = error.status,
            error = %error
        );
    }
}
