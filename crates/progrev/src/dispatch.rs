use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use progrev_core::prompt::{RESET_MESSAGE, WELCOME_MESSAGE};
use progrev_core::{ParseMode, TELEGRAM_MESSAGE_LIMIT, TelegramSettings, split_message};
use progrev_telegram::{ChatAction, TelegramApi, Update, UpdateHandler};

use crate::conversation::Conversation;
use crate::error::DispatchError;

/// Update types the bot subscribes to.
pub const ALLOWED_UPDATES: &[&str] = &["message"];

/// Routes incoming updates to commands or to the conversation.
///
/// Shared by the webhook endpoint and the poller.
pub struct Bot {
    telegram: Arc<dyn TelegramApi>,
    conversation: Conversation,
    parse_mode: ParseMode,
    chunk_delay: Duration,
    username: Option<String>,
}

impl Bot {
    pub fn new(
        telegram: Arc<dyn TelegramApi>,
        conversation: Conversation,
        settings: &TelegramSettings,
    ) -> Self {
        Self {
            telegram,
            conversation,
            parse_mode: settings.parse_mode,
            chunk_delay: settings.chunk_delay(),
            username: None,
        }
    }

    /// The bot's own `@username`. Commands mentioning another bot are then
    /// handled as ordinary text. Without it every mention is accepted.
    #[must_use]
    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn telegram(&self) -> &Arc<dyn TelegramApi> {
        &self.telegram
    }

    pub async fn handle_update(&self, update: Update) -> Result<(), DispatchError> {
        let Some(message) = update.message else {
            tracing::debug!(update_id = update.update_id, "ignoring non-message update");
            return Ok(());
        };
        let Some(text) = message.text() else {
            return Ok(());
        };
        let chat_id = message.chat.id;

        let command = message.command().filter(|c| {
            self.username
                .as_deref()
                .is_none_or(|username| c.is_for(username))
        });

        match command.map(|c| c.name) {
            Some("start") => {
                tracing::info!(chat_id, "/start");
                self.conversation.reset(chat_id);
                self.send(chat_id, WELCOME_MESSAGE, ParseMode::MarkdownV2)
                    .await
            }
            Some("reset") => {
                tracing::info!(chat_id, "/reset");
                self.conversation.reset(chat_id);
                self.send(chat_id, RESET_MESSAGE, self.parse_mode).await
            }
            _ => self.reply(chat_id, text).await,
        }
    }

    async fn reply(&self, chat_id: i64, text: &str) -> Result<(), DispatchError> {
        if let Err(e) = self
            .telegram
            .send_chat_action(chat_id, ChatAction::Typing)
            .await
        {
            tracing::warn!(chat_id, error = %e, "failed to send typing action");
        }

        let answer = self.conversation.ask(chat_id, text).await;

        for (i, part) in split_message(&answer, TELEGRAM_MESSAGE_LIMIT)
            .into_iter()
            .enumerate()
        {
            if i > 0 && !self.chunk_delay.is_zero() {
                tokio::time::sleep(self.chunk_delay).await;
            }
            self.send(chat_id, part, self.parse_mode).await?;
        }
        Ok(())
    }

    /// Send one message, retrying as plain text if Telegram rejects its markup.
    async fn send(
        &self,
        chat_id: i64,
        text: &str,
        parse_mode: ParseMode,
    ) -> Result<(), DispatchError> {
        match self.telegram.send_message(chat_id, text, parse_mode).await {
            Ok(_) => Ok(()),
            Err(e) if e.is_entity_parse_error() && parse_mode != ParseMode::Plain => {
                tracing::warn!(chat_id, error = %e, "markup rejected, resending as plain text");
                self.telegram
                    .send_message(chat_id, text, ParseMode::Plain)
                    .await
                    .map(drop)
                    .map_err(|source| DispatchError::Send { chat_id, source })
            }
            Err(source) => Err(DispatchError::Send { chat_id, source }),
        }
    }
}

#[async_trait]
impl UpdateHandler for Bot {
    type Error = DispatchError;

    async fn handle(&self, update: Update) -> Result<(), DispatchError> {
        self.handle_update(update).await
    }
}

pub fn allowed_updates() -> Vec<String> {
    ALLOWED_UPDATES.iter().map(|s| (*s).to_owned()).collect()
}
