//! Mode orchestration: validate, augment, call the backend once, post-process, annotate.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use fcommon::{GenerationOptions, RequestId, with_optional_timeout};
use fprovider::{
    Message, ModelProvider, ModelRequest, ModelResponse, NoopOperationHooks,
    ProviderOperationHooks, ToolDefinition, complete_observed,
};
use fretrieval::{Augmentation, RetrievalAugmenter, UnavailableRetrievalBackend};
use ftooling::{DefaultToolRuntime, ToolExecutionContext, ToolRuntime};

use crate::types::to_provider_messages;
use crate::{
    ChatError, ChatErrorPhase, ChatMode, ChatRequest, ChatResult, ModeMarker, ToolDispatcher,
    UsageReport, estimate_usage, validate_request,
};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 2048;

/// Immutable per-service settings fixed at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatPolicy {
    pub model: String,
    /// Applied to any option a request leaves unset.
    pub default_options: GenerationOptions,
    pub request_timeout: Option<Duration>,
}

impl ChatPolicy {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            default_options: GenerationOptions::default()
                .with_temperature(DEFAULT_TEMPERATURE)
                .with_max_tokens(DEFAULT_MAX_OUTPUT_TOKENS),
            request_timeout: None,
        }
    }

    pub fn with_default_options(mut self, options: GenerationOptions) -> Self {
        self.default_options = options;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

pub struct ChatServiceBuilder {
    provider: Arc<dyn ModelProvider>,
    provider_hooks: Arc<dyn ProviderOperationHooks>,
    tool_runtime: Arc<dyn ToolRuntime>,
    retrieval: RetrievalAugmenter,
    policy: ChatPolicy,
}

impl ChatServiceBuilder {
    pub fn new(provider: Arc<dyn ModelProvider>, policy: ChatPolicy) -> Self {
        Self {
            provider,
            provider_hooks: Arc::new(NoopOperationHooks),
            tool_runtime: Arc::new(DefaultToolRuntime::default()),
            retrieval: RetrievalAugmenter::new(Arc::new(UnavailableRetrievalBackend)),
            policy,
        }
    }

    pub fn provider_hooks(mut self, hooks: Arc<dyn ProviderOperationHooks>) -> Self {
        self.provider_hooks = hooks;
        self
    }

    pub fn tool_runtime(mut self, runtime: Arc<dyn ToolRuntime>) -> Self {
        self.tool_runtime = runtime;
        self
    }

    pub fn retrieval(mut self, augmenter: RetrievalAugmenter) -> Self {
        self.retrieval = augmenter;
        self
    }

    pub fn build(self) -> ChatService {
        ChatService {
            provider: self.provider,
            provider_hooks: self.provider_hooks,
            dispatcher: ToolDispatcher::new(self.tool_runtime),
            retrieval: self.retrieval,
            policy: self.policy,
            next_request: Arc::new(AtomicU64::new(1)),
        }
    }
}

/// Shared, concurrency-safe orchestrator. Clones share backends and the request counter.
#[derive(Clone)]
pub struct ChatService {
    provider: Arc<dyn ModelProvider>,
    provider_hooks: Arc<dyn ProviderOperationHooks>,
    dispatcher: ToolDispatcher,
    retrieval: RetrievalAugmenter,
    policy: ChatPolicy,
    next_request: Arc<AtomicU64>,
}

impl ChatService {
    pub fn builder(provider: Arc<dyn ModelProvider>, policy: ChatPolicy) -> ChatServiceBuilder {
        ChatServiceBuilder::new(provider, policy)
    }

    pub fn policy(&self) -> &ChatPolicy {
        &self.policy
    }

    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResult, ChatError> {
        self.run(ChatMode::Plain, request).await
    }

    pub async fn chat_with_tool(&self, request: ChatRequest) -> Result<ChatResult, ChatError> {
        self.run(ChatMode::Tool, request).await
    }

    pub async fn chat_with_agent(&self, request: ChatRequest) -> Result<ChatResult, ChatError> {
        self.run(ChatMode::Agent, request).await
    }

    pub async fn chat_with_doc(&self, request: ChatRequest) -> Result<ChatResult, ChatError> {
        self.run(ChatMode::Doc, request).await
    }

    /// Runs one exchange in `mode`. Dropping the future cancels any in-flight backend call.
    pub async fn run(&self, mode: ChatMode, request: ChatRequest) -> Result<ChatResult, ChatError> {
        let request_id = self.next_request_id();
        let deadline = request.timeout.or(self.policy.request_timeout);

        with_optional_timeout(deadline, self.run_mode(mode, request, request_id))
            .await
            .map_err(|elapsed| {
                ChatError::backend_unavailable(elapsed.to_string())
                    .with_phase(ChatErrorPhase::Deadline)
            })?
    }

    async fn run_mode(
        &self,
        mode: ChatMode,
        request: ChatRequest,
        request_id: RequestId,
    ) -> Result<ChatResult, ChatError> {
        validate_request(mode, &request)?;
        let options = request.options().or(self.policy.default_options);
        let messages = to_provider_messages(&request.messages);

        match mode {
            ChatMode::Plain => {
                self.complete_plain(mode, messages, options, &request_id, None).await
            }
            ChatMode::Agent => {
                let marker = Some(ModeMarker::Agent);
                self.complete_plain(mode, messages, options, &request_id, marker).await
            }
            ChatMode::Tool => self.complete_with_tools(messages, options, request_id).await,
            ChatMode::Doc => self.complete_with_documents(messages, options, &request_id).await,
        }
    }

    async fn complete_plain(
        &self,
        mode: ChatMode,
        messages: Vec<Message>,
        options: GenerationOptions,
        request_id: &RequestId,
        marker: Option<ModeMarker>,
    ) -> Result<ChatResult, ChatError> {
        let response = self
            .complete(messages.clone(), options, Vec::new(), request_id)
            .await?;
        let text = require_text(&response)?;
        let usage = usage_report(&response, &messages, &text);

        let content = match marker {
            Some(marker) => marker.apply(&text),
            None => text,
        };
        Ok(ChatResult::new(mode, content, usage))
    }

    async fn complete_with_tools(
        &self,
        messages: Vec<Message>,
        options: GenerationOptions,
        request_id: RequestId,
    ) -> Result<ChatResult, ChatError> {
        let definitions = self.dispatcher.definitions();
        let response = self
            .complete(messages.clone(), options, definitions, &request_id)
            .await?;

        let tool_calls = response.tool_calls();
        let text = response.text();
        if tool_calls.is_empty() && text.is_empty() {
            return Err(empty_response());
        }

        let usage = usage_report(&response, &messages, &text);
        let context = ToolExecutionContext::new(request_id);
        let outcome = self.dispatcher.dispatch(text, tool_calls, &context).await;

        let content = ModeMarker::Tool.apply(&outcome.content);
        let mut result = ChatResult::new(ChatMode::Tool, content, usage);
        result.tool_invocations = outcome.invocations;
        Ok(result)
    }

    async fn complete_with_documents(
        &self,
        messages: Vec<Message>,
        options: GenerationOptions,
        request_id: &RequestId,
    ) -> Result<ChatResult, ChatError> {
        let (sent, marker, passages, fallback) = match self.retrieval.augment(&messages).await {
            Augmentation::Augmented {
                messages: augmented,
                passages,
            } => (augmented, ModeMarker::RetrievalAugmented, passages, None),
            Augmentation::Unavailable { error } => {
                (messages, ModeMarker::RetrievalUnavailable, Vec::new(), Some(error))
            }
        };

        let response = self
            .complete(sent.clone(), options, Vec::new(), request_id)
            .await?;
        let text = require_text(&response)?;
        let usage = usage_report(&response, &sent, &text);

        let mut result = ChatResult::new(ChatMode::Doc, marker.apply(&text), usage);
        result.passages = passages;
        result.retrieval_fallback = fallback;
        Ok(result)
    }

    async fn complete(
        &self,
        messages: Vec<Message>,
        options: GenerationOptions,
        tools: Vec<ToolDefinition>,
        request_id: &RequestId,
    ) -> Result<ModelResponse, ChatError> {
        let request = ModelRequest::new(self.policy.model.clone(), messages)
            .with_options(options)
            .with_tools(tools)
            .with_metadata("request_id", request_id.as_str());

        complete_observed(self.provider.as_ref(), self.provider_hooks.as_ref(), request)
            .await
            .map_err(ChatError::from)
    }

    fn next_request_id(&self) -> RequestId {
        let sequence = self.next_request.fetch_add(1, Ordering::Relaxed);
        RequestId::new(format!("req-{sequence}"))
    }
}

fn require_text(response: &ModelResponse) -> Result<String, ChatError> {
    let text = response.text();
    if text.is_empty() {
        return Err(empty_response());
    }
    Ok(text)
}

fn empty_response() -> ChatError {
    ChatError::backend_unavailable("model backend returned no content")
}

fn usage_report(response: &ModelResponse, messages: &[Message], text: &str) -> UsageReport {
    match response.usage {
        Some(usage) => UsageReport::backend(usage),
        None => UsageReport::estimated(estimate_usage(messages, text)),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use fprovider::{
        OutputItem, ProviderError, ProviderFuture, ProviderId, Role, StopReason, TokenUsage,
    };

    use super::*;
    use crate::{ChatErrorKind, ChatMessage, UsageSource};

    #[derive(Default)]
    struct FakeProvider {
        requests: Mutex<Vec<ModelRequest>>,
        reply: String,
        usage: Option<TokenUsage>,
        stall: bool,
    }

    impl FakeProvider {
        fn replying(reply: &str) -> Self {
            Self {
                reply: reply.to_string(),
                ..Self::default()
            }
        }
    }

    impl ModelProvider for FakeProvider {
        fn id(&self) -> ProviderId {
            ProviderId::OpenAi
        }

        fn complete<'a>(
            &'a self,
            request: ModelRequest,
        ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
            Box::pin(async move {
                self.requests
                    .lock()
                    .expect("requests lock")
                    .push(request.clone());
                if self.stall {
                    tokio::time::sleep(Duration::from_secs(5)).await;
                }

                let output = if self.reply.is_empty() {
                    Vec::new()
                } else {
                    vec![OutputItem::Message(Message::new(
                        Role::Assistant,
                        self.reply.clone(),
                    ))]
                };

                Ok(ModelResponse {
                    provider: ProviderId::OpenAi,
                    model: request.model,
                    output,
                    stop_reason: StopReason::EndTurn,
                    usage: self.usage,
                })
            })
        }
    }

    fn service(provider: Arc<FakeProvider>) -> ChatService {
        ChatService::builder(provider, ChatPolicy::new("gpt-4o-mini")).build()
    }

    #[tokio::test]
    async fn plain_mode_passes_content_through_and_applies_defaults() {
        let provider = Arc::new(FakeProvider::replying("hello"));
        let service = service(provider.clone());

        let result = service
            .chat(ChatRequest::new(vec![ChatMessage::user("hi")]).with_temperature(0.2))
            .await
            .expect("chat should succeed");

        assert_eq!(result.content, "hello");
        assert_eq!(result.mode, ChatMode::Plain);
        assert_eq!(result.token_usage.source, UsageSource::Estimated);
        assert_eq!(result.token_usage.usage, TokenUsage::new(0, 1));
        assert!(!result.is_degraded());

        let requests = provider.requests.lock().expect("requests lock");
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].options.temperature, Some(0.2));
        assert_eq!(requests[0].options.max_tokens, Some(DEFAULT_MAX_OUTPUT_TOKENS));
        assert!(requests[0].tools.is_empty());
        assert_eq!(
            requests[0].metadata.get("request_id").map(String::as_str),
            Some("req-1")
        );
    }

    #[tokio::test]
    async fn backend_usage_is_passed_through_unvalidated() {
        let reported = TokenUsage {
            input_tokens: 7,
            output_tokens: 3,
            total_tokens: 99,
        };
        let provider = Arc::new(FakeProvider {
            usage: Some(reported),
            ..FakeProvider::replying("hello")
        });

        let result = service(provider)
            .chat_with_agent(ChatRequest::new(vec![ChatMessage::user("hi")]))
            .await
            .expect("agent chat should succeed");

        assert_eq!(result.content, "[Agent Mode] hello");
        assert_eq!(result.token_usage, UsageReport::backend(reported));
    }

    #[tokio::test]
    async fn empty_backend_content_is_backend_unavailable() {
        let provider = Arc::new(FakeProvider::replying(""));

        let error = service(provider)
            .chat(ChatRequest::new(vec![ChatMessage::user("hi")]))
            .await
            .expect_err("empty reply should fail");

        assert_eq!(error.kind, ChatErrorKind::BackendUnavailable);
        assert_eq!(error.phase, Some(ChatErrorPhase::Backend));
    }

    #[tokio::test]
    async fn invalid_input_never_reaches_backend() {
        let provider = Arc::new(FakeProvider::replying("hello"));
        let service = service(provider.clone());

        let error = service
            .chat(ChatRequest::new(vec![
                ChatMessage::user("hi"),
                ChatMessage::user(""),
            ]))
            .await
            .expect_err("empty content should fail");

        assert!(error.is_user_error());
        assert_eq!(error.index, Some(1));
        assert!(provider.requests.lock().expect("requests lock").is_empty());
    }

    #[tokio::test]
    async fn caller_deadline_cancels_slow_backend() {
        let provider = Arc::new(FakeProvider {
            stall: true,
            ..FakeProvider::replying("late")
        });

        let error = service(provider)
            .chat(
                ChatRequest::new(vec![ChatMessage::user("hi")])
                    .with_timeout(Duration::from_millis(20)),
            )
            .await
            .expect_err("deadline should expire");

        assert_eq!(error.kind, ChatErrorKind::BackendUnavailable);
        assert_eq!(error.phase, Some(ChatErrorPhase::Deadline));
    }

    #[tokio::test]
    async fn request_ids_increase_across_clones() {
        let provider = Arc::new(FakeProvider::replying("ok"));
        let first = service(provider.clone());
        let second = first.clone();

        for service in [&first, &second] {
            service
                .chat(ChatRequest::new(vec![ChatMessage::user("hi")]))
                .await
                .expect("chat should succeed");
        }

        let ids = provider
            .requests
            .lock()
            .expect("requests lock")
            .iter()
            .filter_map(|request| request.metadata.get("request_id").cloned())
            .collect::<Vec<_>>();
        assert_eq!(ids, vec!["req-1".to_string(), "req-2".to_string()]);
    }
}
