//! OpenAI provider implementation over transport and shared models.

use std::sync::Arc;

use crate::{
    ModelProvider, ModelRequest, ModelResponse, ProviderError, ProviderFuture, ProviderId,
    SecretString,
};

use super::transport::OpenAiTransport;
use super::types::{OpenAiAuth, OpenAiMessage, OpenAiRequest, OpenAiTool};

#[derive(Clone)]
pub struct OpenAiProvider {
    api_key: SecretString,
    transport: Arc<dyn OpenAiTransport>,
    fallback_model: String,
}

impl OpenAiProvider {
    pub fn new(api_key: impl Into<SecretString>, transport: Arc<dyn OpenAiTransport>) -> Self {
        Self {
            api_key: api_key.into(),
            transport,
            fallback_model: "gpt-4o-mini".to_string(),
        }
    }

    pub fn with_fallback_model(mut self, model: impl Into<String>) -> Self {
        self.fallback_model = model.into();
        self
    }

    fn resolve_auth(&self) -> Result<OpenAiAuth, ProviderError> {
        if self.api_key.is_empty() {
            return Err(ProviderError::authentication("no OpenAI API key configured"));
        }

        Ok(OpenAiAuth::ApiKey(self.api_key.clone()))
    }
}

/// Maps a provider-agnostic request onto the chat-completions shape.
pub(crate) fn build_openai_request(request: ModelRequest, fallback_model: &str) -> OpenAiRequest {
    let model = if request.model.trim().is_empty() {
        fallback_model.to_string()
    } else {
        request.model
    };

    OpenAiRequest {
        model,
        messages: request
            .messages
            .into_iter()
            .map(OpenAiMessage::from)
            .collect(),
        tools: request.tools.into_iter().map(OpenAiTool::from).collect(),
        temperature: request.options.temperature,
        max_tokens: request.options.max_tokens,
    }
}

impl ModelProvider for OpenAiProvider {
    fn id(&self) -> ProviderId {
        ProviderId::OpenAi
    }

    fn complete<'a>(
        &'a self,
        request: ModelRequest,
    ) -> ProviderFuture<'a, Result<ModelResponse, ProviderError>> {
        Box::pin(async move {
            request.validate()?;
            let auth = self.resolve_auth()?;
            let openai_request = build_openai_request(request, &self.fallback_model);
            let response = self.transport.complete(openai_request, auth).await?;
            Ok(response.into_model_response(ProviderId::OpenAi))
        })
    }
}
