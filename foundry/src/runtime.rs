//! Wiring from a loaded [`FoundryConfig`] to a ready [`ChatService`].

use std::sync::Arc;

use fchat::{ChatPolicy, ChatService};
use fobserve::{ObservabilityHooks, SafeProviderHooks, SafeRetrievalHooks, SafeToolHooks};
use fprovider::ModelProvider;
use fretrieval::{HttpRetrievalBackend, RetrievalAugmenter};
use ftooling::DefaultToolRuntime;
use ftooling::builtin::{DuckDuckGoSearchClient, standard_registry};
use reqwest::Client;

use crate::config::{ConfigError, FoundryConfig, ProviderKind, ProviderSettings};

fn http_client(timeout: std::time::Duration) -> Result<Client, ConfigError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|err| ConfigError::source(format!("failed to build HTTP client: {err}")))
}

/// Builds the model backend selected by `settings.kind`.
pub fn build_provider(settings: &ProviderSettings) -> Result<Arc<dyn ModelProvider>, ConfigError> {
    let client = http_client(settings.timeout())?;

    match settings.kind {
        #[cfg(feature = "provider-openai")]
        ProviderKind::OpenAi => {
            use fprovider::adapters::openai::{OPENAI_BASE_URL, OpenAiHttpTransport, OpenAiProvider};

            let api_key = settings
                .api_key
                .clone()
                .filter(|key| !key.trim().is_empty())
                .ok_or_else(|| ConfigError::missing("provider.api_key"))?;
            let transport = OpenAiHttpTransport::new(client)
                .with_base_url(settings.base_url.as_deref().unwrap_or(OPENAI_BASE_URL));

            Ok(Arc::new(
                OpenAiProvider::new(api_key, Arc::new(transport))
                    .with_fallback_model(settings.model()),
            ))
        }
        #[cfg(feature = "provider-ollama")]
        ProviderKind::Ollama => {
            use fprovider::adapters::ollama::OllamaProvider;

            let mut transport = OllamaProvider::default_http_transport(client);
            if let Some(base_url) = settings.base_url.as_deref() {
                transport = transport.with_base_url(base_url);
            }

            Ok(Arc::new(
                OllamaProvider::new(Arc::new(transport)).with_fallback_model(settings.model()),
            ))
        }
        #[allow(unreachable_patterns)]
        kind => Err(ConfigError::invalid(
            "provider.kind",
            format!("{kind:?} support is not compiled in"),
        )),
    }
}

pub fn chat_policy(config: &FoundryConfig) -> ChatPolicy {
    let policy = ChatPolicy::new(config.provider.model())
        .with_default_options(config.provider.default_options());

    match config.request_timeout() {
        Some(timeout) => policy.with_request_timeout(timeout),
        None => policy,
    }
}

/// Builds the configured backend and wires it into a service.
pub fn build_chat_service(config: &FoundryConfig) -> Result<ChatService, ConfigError> {
    let provider = build_provider(&config.provider)?;
    build_chat_service_with(config, provider)
}

/// Wires `provider` together with the configured search, retrieval, and observability.
pub fn build_chat_service_with(
    config: &FoundryConfig,
    provider: Arc<dyn ModelProvider>,
) -> Result<ChatService, ConfigError> {
    let hooks = ObservabilityHooks::default();

    let search = DuckDuckGoSearchClient::new(http_client(config.provider.timeout())?)
        .with_base_url(config.search.base_url.clone())
        .with_max_results(config.search.max_results)
        .with_user_agent(config.search.user_agent.clone());
    let tool_runtime = DefaultToolRuntime::new(Arc::new(standard_registry(Arc::new(search))))
        .with_hooks(Arc::new(SafeToolHooks::new(hooks)));

    let backend = HttpRetrievalBackend::new(http_client(config.retrieval.timeout())?)
        .with_base_url(config.retrieval.base_url.clone())
        .with_timeout(config.retrieval.timeout());
    let retrieval = RetrievalAugmenter::new(Arc::new(backend))
        .with_hooks(Arc::new(SafeRetrievalHooks::new(hooks)))
        .with_top_k(config.retrieval.top_k)
        .with_timeout(config.retrieval.timeout());

    Ok(ChatService::builder(provider, chat_policy(config))
        .provider_hooks(Arc::new(SafeProviderHooks::new(hooks)))
        .tool_runtime(Arc::new(tool_runtime))
        .retrieval(retrieval)
        .build())
}
