use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};

use crate::error::LlmError;
use crate::types::{ChatCompletionRequest, ChatCompletionResponse};

/// Default Groq API base URL.
pub const GROQ_API_BASE: &str = "https://api.groq.com/openai/v1";

/// Abstraction over the chat-completions HTTP call for testability.
///
/// Production code uses [`HttpTransport`], tests use mockall-generated mocks.
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Send one completion request and decode the response.
    async fn send(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError>;
}

/// Real HTTP transport backed by reqwest.
///
/// Every request is bounded by the timeout given to [`HttpTransport::new`];
/// an expired request surfaces as [`LlmError::Request`] and is retried.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: String,
    api_key: SecretString,
}

impl HttpTransport {
    pub fn new(
        api_key: SecretString,
        base_url: Option<&str>,
        timeout: Duration,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("progrev/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::HttpClient { source: e })?;

        let base = base_url.unwrap_or(GROQ_API_BASE);
        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", base.trim_end_matches('/')),
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl ChatTransport for HttpTransport {
    async fn send(
        &self,
        request: &ChatCompletionRequest,
    ) -> Result<ChatCompletionResponse, LlmError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.api_key.expose_secret())
            .json(request)
            .send()
            .await
            .map_err(|e| LlmError::Request { source: e })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Request { source: e })?;

        if !status.is_success() {
            return Err(LlmError::Api {
                status: status.as_u16(),
                body,
            });
        }

        serde_json::from_str(&body).map_err(|e| LlmError::Decode { source: e })
    }
}
