#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use mockall::mock;
use progrev::{Bot, ChatHistories, ChatMessage, Conversation, ParseMode, Settings};
use progrev_llm::{Completer, LlmError};
use progrev_telegram::{
    Chat, ChatAction, Message, TelegramApi, TelegramError, Update, User, WebhookConfig,
    WebhookInfo,
};

mock! {
    pub Api {}

    #[async_trait]
    impl TelegramApi for Api {
        async fn get_me(&self) -> Result<User, TelegramError>;
        async fn send_message(
            &self,
            chat_id: i64,
            text: &str,
            parse_mode: ParseMode,
        ) -> Result<Message, TelegramError>;
        async fn send_chat_action(
            &self,
            chat_id: i64,
            action: ChatAction,
        ) -> Result<(), TelegramError>;
        async fn set_webhook(&self, config: &WebhookConfig) -> Result<(), TelegramError>;
        async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<(), TelegramError>;
        async fn get_webhook_info(&self) -> Result<WebhookInfo, TelegramError>;
        async fn get_updates(
            &self,
            offset: Option<i64>,
            timeout_secs: u32,
            allowed_updates: &[String],
        ) -> Result<Vec<Update>, TelegramError>;
    }
}

mock! {
    pub Llm {}

    #[async_trait]
    impl Completer for Llm {
        async fn complete(&self, messages: &[ChatMessage]) -> Result<String, LlmError>;
    }
}

pub const CHAT_ID: i64 = 42;

pub fn message(chat_id: i64, text: Option<&str>) -> Message {
    Message {
        message_id: 1,
        from: None,
        chat: Chat {
            id: chat_id,
            kind: "private".to_owned(),
            username: None,
        },
        date: 1_700_000_000,
        text: text.map(str::to_owned),
    }
}

pub fn text_update(update_id: i64, text: &str) -> Update {
    Update {
        update_id,
        message: Some(message(CHAT_ID, Some(text))),
    }
}

/// Default settings without the pause between reply parts.
pub fn settings() -> Settings {
    let mut settings = Settings::default();
    settings.telegram.chunk_delay_ms = 0;
    settings
}

pub fn bot(api: MockApi, llm: MockLlm, settings: &Settings) -> Arc<Bot> {
    let histories = Arc::new(ChatHistories::new(settings.history.max_messages));
    let conversation = Conversation::new(histories, Arc::new(llm));
    Arc::new(Bot::new(Arc::new(api), conversation, &settings.telegram))
}

/// Like [`bot`], but knowing its own username.
pub fn named_bot(api: MockApi, llm: MockLlm, settings: &Settings) -> Arc<Bot> {
    let histories = Arc::new(ChatHistories::new(settings.history.max_messages));
    let conversation = Conversation::new(histories, Arc::new(llm));
    Arc::new(
        Bot::new(Arc::new(api), conversation, &settings.telegram).with_username(BOT_USERNAME),
    )
}

/// `send_message` result echoing the delivered text.
pub fn delivered(chat_id: i64, text: &str) -> Result<Message, TelegramError> {
    Ok(message(chat_id, Some(text)))
}

pub const BOT_USERNAME: &str = "progrev_bot";

/// `getMe` result for this bot.
pub fn identity() -> Result<User, TelegramError> {
    Ok(User {
        id: 7_000_000,
        is_bot: true,
        first_name: "Архитектор Прогрева".to_owned(),
        username: Some(BOT_USERNAME.to_owned()),
    })
}

pub fn entity_error() -> TelegramError {
    TelegramError::Api {
        method: "sendMessage",
        code: 400,
        description: "Bad Request: can't parse entities: Can't find end of the entity".to_owned(),
    }
}
