use std::net::SocketAddr;

use progrev_llm::LlmError;
use progrev_telegram::TelegramError;

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to deliver message to chat {chat_id}")]
    Send {
        chat_id: i64,
        source: TelegramError,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum ServeError {
    #[error(transparent)]
    Config(#[from] progrev_core::Error),

    #[error("failed to create Telegram client")]
    TelegramClient { source: TelegramError },

    #[error("failed to create Groq client")]
    LlmClient { source: LlmError },

    #[error("failed to bind {addr}")]
    Bind {
        addr: SocketAddr,
        source: std::io::Error,
    },

    #[error("failed to register webhook {url}")]
    SetWebhook { url: String, source: TelegramError },

    #[error("HTTP server failed")]
    Serve { source: std::io::Error },
}
