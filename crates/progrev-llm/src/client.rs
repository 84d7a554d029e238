use async_trait::async_trait;
use progrev_core::{ChatMessage, ModelSettings};
use secrecy::SecretString;

use crate::error::LlmError;
use crate::retry::RetryPolicy;
use crate::transport::{ChatTransport, HttpTransport};
use crate::types::ChatCompletionRequest;

/// Anything that can turn a conversation into the next assistant turn.
///
/// The bot only depends on this trait; [`GroqClient`] is the production
/// implementation.
#[async_trait]
pub trait Completer: Send + Sync {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
}

/// Groq chat-completions client, parameterized over the transport for testability.
pub struct GroqClient<T: ChatTransport = HttpTransport> {
    transport: T,
    settings: ModelSettings,
    retry: RetryPolicy,
}

impl GroqClient<HttpTransport> {
    pub fn new(api_key: SecretString, settings: ModelSettings) -> Result<Self, LlmError> {
        let transport = HttpTransport::new(
            api_key,
            settings.base_url.as_deref(),
            settings.request_timeout(),
        )?;
        Ok(Self::with_transport(transport, settings))
    }
}

impl<T: ChatTransport> GroqClient<T> {
    pub fn with_transport(transport: T, settings: ModelSettings) -> Self {
        Self {
            transport,
            settings,
            retry: RetryPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn model(&self) -> &str {
        &self.settings.name
    }

    pub fn build_request(&self, messages: &[ChatMessage]) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.settings.name.clone(),
            messages: messages.to_vec(),
            temperature: Some(self.settings.temperature),
            max_tokens: Some(self.settings.max_tokens),
        }
    }

    /// Request the next assistant turn for `messages`.
    pub async fn chat(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let request = self.build_request(messages);

        let response = self.retry.run(|| self.transport.send(&request)).await?;

        if let Some(usage) = response.usage {
            tracing::debug!(
                model = %self.settings.name,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion finished",
            );
        }

        response
            .first_content()
            .filter(|content| !content.trim().is_empty())
            .map(str::to_owned)
            .ok_or(LlmError::EmptyResponse)
    }
}

#[async_trait]
impl<T: ChatTransport> Completer for GroqClient<T> {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        self.chat(messages).await
    }
}
