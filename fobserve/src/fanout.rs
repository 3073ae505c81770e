use std::time::Duration;

use fprovider::{ProviderError, ProviderId, ProviderOperationHooks, ToolCall};
use fretrieval::{RetrievalError, RetrievalHooks};
use ftooling::{ToolError, ToolExecutionContext, ToolExecutionResult, ToolRuntimeHooks};

use crate::{MetricsObservabilityHooks, TracingObservabilityHooks};

/// Emits every lifecycle event to both tracing and metrics.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObservabilityHooks {
    tracing: TracingObservabilityHooks,
    metrics: MetricsObservabilityHooks,
}

impl ProviderOperationHooks for ObservabilityHooks {
    fn on_call_start(&self, provider: ProviderId, operation: &str) {
        self.tracing.on_call_start(provider, operation);
        self.metrics.on_call_start(provider, operation);
    }

    fn on_call_success(&self, provider: ProviderId, operation: &str, elapsed: Duration) {
        self.tracing.on_call_success(provider, operation, elapsed);
        self.metrics.on_call_success(provider, operation, elapsed);
    }

    fn on_call_failure(
        &self,
        provider: ProviderId,
        operation: &str,
        elapsed: Duration,
        error: &ProviderError,
    ) {
        self.tracing
            .on_call_failure(provider, operation, elapsed, error);
        self.metrics
            .on_call_failure(provider, operation, elapsed, error);
    }
}

impl ToolRuntimeHooks for ObservabilityHooks {
    fn on_execution_start(&self, tool_call: &ToolCall, context: &ToolExecutionContext) {
        self.tracing.on_execution_start(tool_call, context);
        self.metrics.on_execution_start(tool_call, context);
    }

    fn on_execution_success(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        result: &ToolExecutionResult,
        elapsed: Duration,
    ) {
        self.tracing
            .on_execution_success(tool_call, context, result, elapsed);
        self.metrics
            .on_execution_success(tool_call, context, result, elapsed);
    }

    fn on_execution_failure(
        &self,
        tool_call: &ToolCall,
        context: &ToolExecutionContext,
        error: &ToolError,
        elapsed: Duration,
    ) {
        self.tracing
            .on_execution_failure(tool_call, context, error, elapsed);
        self.metrics
            .on_execution_failure(tool_call, context, error, elapsed);
    }
}

impl RetrievalHooks for ObservabilityHooks {
    fn on_query_start(&self, top_k: usize) {
        self.tracing.on_query_start(top_k);
        self.metrics.on_query_start(top_k);
    }

    fn on_query_success(&self, passages: usize, elapsed: Duration) {
        self.tracing.on_query_success(passages, elapsed);
        self.metrics.on_query_success(passages, elapsed);
    }

    fn on_query_failure(&self, error: &RetrievalError, elapsed: Duration) {
        self.tracing.on_query_failure(error, elapsed);
        self.metrics.on_query_failure(error, elapsed);
    }
}
