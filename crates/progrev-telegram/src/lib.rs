//! Telegram Bot API plumbing for progrev.
//!
//! Only the handful of methods the bot needs are covered: sending
//! messages and chat actions, webhook management, and `getUpdates` for
//! polling mode.
//!
//! # Delivery modes
//!
//! ```text
//! webhook:  Telegram ── POST /webhook ──▶ progrev server ──▶ UpdateHandler
//! polling:  Poller ── getUpdates(offset, timeout) ──▶ UpdateHandler (one task per update)
//! ```

pub mod api;
pub mod client;
pub mod error;
pub mod polling;
pub mod types;

pub use api::{TelegramApi, WebhookConfig};
pub use client::{HttpTelegramClient, TELEGRAM_API_BASE};
pub use error::TelegramError;
pub use polling::{Poller, UpdateHandler};
pub use progrev_core::ParseMode;
pub use types::{ApiResponse, Chat, ChatAction, Command, Message, Update, User, WebhookInfo};
