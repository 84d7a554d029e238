use std::sync::Arc;

use progrev_core::prompt::{MODEL_FAILURE_MESSAGE, SYSTEM_PROMPT};
use progrev_core::{ChatHistories, ChatMessage};
use progrev_llm::Completer;

/// Turns a user's text into the next model answer, keeping per-chat memory.
#[derive(Clone)]
pub struct Conversation {
    histories: Arc<ChatHistories>,
    completer: Arc<dyn Completer>,
}

impl Conversation {
    pub fn new(histories: Arc<ChatHistories>, completer: Arc<dyn Completer>) -> Self {
        Self {
            histories,
            completer,
        }
    }

    pub fn histories(&self) -> &ChatHistories {
        &self.histories
    }

    /// Record the user's turn, ask the model, record and return its answer.
    ///
    /// Never fails: a model error is logged and answered with an apology,
    /// and no assistant turn is recorded for it.
    pub async fn ask(&self, chat_id: i64, text: &str) -> String {
        self.histories.append(chat_id, ChatMessage::user(text));

        let history = self.histories.get(chat_id);
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(ChatMessage::system(SYSTEM_PROMPT));
        messages.extend(history);

        match self.completer.complete(&messages).await {
            Ok(reply) => {
                self.histories
                    .append(chat_id, ChatMessage::assistant(reply.as_str()));
                reply
            }
            Err(e) => {
                tracing::error!(chat_id, error = %e, "Groq API error");
                MODEL_FAILURE_MESSAGE.to_owned()
            }
        }
    }

    /// Start the chat over.
    pub fn reset(&self, chat_id: i64) {
        self.histories.clear(chat_id);
        tracing::debug!(chat_id, "history cleared");
    }
}
