use async_trait::async_trait;
use progrev_core::ParseMode;
use secrecy::SecretString;

use crate::error::TelegramError;
use crate::types::{ChatAction, Message, Update, User, WebhookInfo};

/// Parameters for `setWebhook`.
#[derive(Debug, Clone)]
pub struct WebhookConfig {
    pub url: String,
    pub allowed_updates: Vec<String>,
    pub drop_pending_updates: bool,
    /// Echoed back by Telegram in `X-Telegram-Bot-Api-Secret-Token`.
    pub secret_token: Option<SecretString>,
}

/// Abstraction over the Bot API for testability.
///
/// Production code uses [`HttpTelegramClient`](crate::HttpTelegramClient),
/// tests use mockall-generated mocks.
#[async_trait]
pub trait TelegramApi: Send + Sync {
    async fn get_me(&self) -> Result<User, TelegramError>;

    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: ParseMode,
    ) -> Result<Message, TelegramError>;

    async fn send_chat_action(&self, chat_id: i64, action: ChatAction)
    -> Result<(), TelegramError>;

    async fn set_webhook(&self, config: &WebhookConfig) -> Result<(), TelegramError>;

    async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<(), TelegramError>;

    async fn get_webhook_info(&self) -> Result<WebhookInfo, TelegramError>;

    /// Long-poll for updates. `offset` acknowledges everything below it.
    async fn get_updates(
        &self,
        offset: Option<i64>,
        timeout_secs: u32,
        allowed_updates: &[String],
    ) -> Result<Vec<Update>, TelegramError>;
}
