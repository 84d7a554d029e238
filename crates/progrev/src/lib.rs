//! «Архитектор Прогрева»: a Telegram bot that designs sales warm-up
//! content plans with an LLM.
//!
//! This is the service crate. It ties the Groq client ([`progrev_llm`]) and
//! the Bot API client ([`progrev_telegram`]) together behind an Axum HTTP
//! surface, and re-exports the core types from [`progrev_core`].
//!
//! # HTTP surface
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `GET /` | service status |
//! | `GET, HEAD /health` | `OK`, or `503` once shutdown has begun |
//! | `GET /metrics` | Prometheus text exposition |
//! | `POST /webhook` | Telegram updates |
//!
//! # Quick start
//!
//! ```rust,no_run
//! use progrev::{BotEnv, Settings};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let env = BotEnv::load()?;
//! let settings = Settings::load(std::path::Path::new("."))?;
//! progrev::server::serve(env, settings).await?;
//! # Ok(())
//! # }
//! ```

pub mod conversation;
pub mod dispatch;
pub mod error;
pub mod metrics;
pub mod routes;
pub mod server;
pub mod state;
pub mod webhook_auth;

// Core types flattened into root namespace for convenience.
pub use progrev_core::*;

pub use conversation::Conversation;
pub use dispatch::Bot;
pub use error::{DispatchError, ServeError};
pub use state::{AppState, ShutdownFlag};
pub use webhook_auth::WebhookAuth;
