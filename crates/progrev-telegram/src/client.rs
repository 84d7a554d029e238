use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use progrev_core::ParseMode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde_json::{Value, json};

use crate::api::{TelegramApi, WebhookConfig};
use crate::error::TelegramError;
use crate::types::{ApiResponse, ChatAction, Message, Update, User, WebhookInfo};

/// Default Bot API server.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Timeout for regular method calls; `getUpdates` adds its long-poll timeout on top.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Real Bot API client.
///
/// The token is part of every request URL, so the client never logs URLs
/// and its `Debug` output is redacted.
#[derive(Clone)]
pub struct HttpTelegramClient {
    client: reqwest::Client,
    api_base: String,
    token: SecretString,
}

impl fmt::Debug for HttpTelegramClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpTelegramClient")
            .field("api_base", &self.api_base)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

impl HttpTelegramClient {
    pub fn new(token: SecretString, api_base: Option<&str>) -> Result<Self, TelegramError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("progrev/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TelegramError::HttpClient { source: e })?;

        Ok(Self {
            client,
            api_base: api_base
                .unwrap_or(TELEGRAM_API_BASE)
                .trim_end_matches('/')
                .to_owned(),
            token,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.api_base,
            self.token.expose_secret(),
            method
        )
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: &'static str,
        payload: &Value,
        timeout: Duration,
    ) -> Result<T, TelegramError> {
        let response = self
            .client
            .post(self.method_url(method))
            .timeout(timeout)
            .json(payload)
            .send()
            .await
            // reqwest errors embed the URL, which contains the token
            .map_err(|e| TelegramError::Request {
                method,
                source: e.without_url(),
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(|e| TelegramError::Request {
            method,
            source: e.without_url(),
        })?;

        let envelope: ApiResponse<T> = serde_json::from_slice(&body)
            .map_err(|e| TelegramError::Decode { method, source: e })?;

        if !envelope.ok {
            return Err(TelegramError::Api {
                method,
                code: envelope
                    .error_code
                    .unwrap_or_else(|| i32::from(status.as_u16())),
                description: envelope.description.unwrap_or_default(),
            });
        }

        envelope
            .result
            .ok_or(TelegramError::MissingResult { method })
    }
}

#[async_trait]
impl TelegramApi for HttpTelegramClient {
    async fn get_me(&self) -> Result<User, TelegramError> {
        self.call("getMe", &json!({}), REQUEST_TIMEOUT).await
    }

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: ParseMode,
    ) -> Result<Message, TelegramError> {
        let mut payload = json!({ "chat_id": chat_id, "text": text });
        if let Some(mode) = parse_mode.api_value() {
            payload["parse_mode"] = json!(mode);
        }
        self.call("sendMessage", &payload, REQUEST_TIMEOUT).await
    }

    async fn send_chat_action(
        &self,
        chat_id: i64,
        action: ChatAction,
    ) -> Result<(), TelegramError> {
        let payload = json!({ "chat_id": chat_id, "action": action });
        self.call::<bool>("sendChatAction", &payload, REQUEST_TIMEOUT)
            .await
            .map(drop)
    }

    async fn set_webhook(&self, config: &WebhookConfig) -> Result<(), TelegramError> {
        let mut payload = json!({
            "url": config.url,
            "allowed_updates": config.allowed_updates,
            "drop_pending_updates": config.drop_pending_updates,
        });
        if let Some(secret) = &config.secret_token {
            payload["secret_token"] = json!(secret.expose_secret());
        }
        self.call::<bool>("setWebhook", &payload, REQUEST_TIMEOUT)
            .await
            .map(drop)
    }

    async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<(), TelegramError> {
        let payload = json!({ "drop_pending_updates": drop_pending_updates });
        self.call::<bool>("deleteWebhook", &payload, REQUEST_TIMEOUT)
            .await
            .map(drop)
    }

    async fn get_webhook_info(&self) -> Result<WebhookInfo, TelegramError> {
        self.call("getWebhookInfo", &json!({}), REQUEST_TIMEOUT)
            .await
    }

    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u32,
        allowed_updates: &[String],
    ) -> Result<Vec<Update>, TelegramError> {
        let mut payload = json!({
            "timeout": timeout_secs,
            "allowed_updates": allowed_updates,
        });
        if let Some(offset) = offset {
            payload["offset"] = json!(offset);
        }
        let timeout = REQUEST_TIMEOUT + Duration::from_secs(u64::from(timeout_secs));
        self.call("getUpdates", &payload, timeout).await
    }
}
