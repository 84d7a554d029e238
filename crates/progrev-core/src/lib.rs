//! Core types and configuration for progrev.
//!
//! This crate defines the `progrev.toml` schema ([`Settings`]), the
//! environment-backed deployment config ([`BotEnv`]), the per-chat
//! conversation store ([`ChatHistories`]), the bot's static texts, and
//! shared error types.

pub mod config;
pub mod env;
pub mod error;
pub mod history;
pub mod prompt;
pub mod text;

pub use config::{
    HistorySettings, ModelSettings, ParseMode, ServerSettings, Settings, TelegramSettings,
};
pub use env::BotEnv;
pub use error::{Error, Result};
pub use history::{ChatHistories, ChatMessage, Role};
pub use text::{TELEGRAM_MESSAGE_LIMIT, split_message};
