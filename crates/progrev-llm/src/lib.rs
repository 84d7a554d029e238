//! Groq chat-completions client for progrev.
//!
//! Groq speaks the OpenAI chat-completions protocol, so the wire types in
//! [`types`] work against any compatible endpoint via `model.base_url`.
//!
//! ```text
//! Completer::complete(history)
//!   └─ GroqClient::chat
//!        ├─ build_request   ── model, temperature, max_tokens from ModelSettings
//!        ├─ RetryPolicy     ── 408/429/5xx and network failures, exponential backoff
//!        └─ ChatTransport   ── POST {base_url}/chat/completions
//! ```

pub mod client;
pub mod error;
pub mod retry;
pub mod transport;
pub mod types;

pub use client::{Completer, GroqClient};
pub use error::LlmError;
pub use retry::RetryPolicy;
pub use transport::{ChatTransport, GROQ_API_BASE, HttpTransport};
pub use types::{ChatCompletionRequest, ChatCompletionResponse, Choice, ResponseMessage, Usage};
