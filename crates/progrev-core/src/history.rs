use std::collections::HashMap;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Author of a conversation turn, in chat-completions terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// Per-chat conversation memory, bounded to the most recent `max_messages` turns.
///
/// Shared between the webhook handlers and the poller, so every operation
/// takes the lock for the shortest possible time and hands out snapshots.
#[derive(Debug)]
pub struct ChatHistories {
    max_messages: usize,
    chats: Mutex<HashMap<i64, Vec<ChatMessage>>>,
}

impl ChatHistories {
    pub fn new(max_messages: usize) -> Self {
        Self {
            max_messages,
            chats: Mutex::new(HashMap::new()),
        }
    }

    pub fn max_messages(&self) -> usize {
        self.max_messages
    }

    /// Snapshot of a chat's history. Registers the chat if it was unknown.
    pub fn get(&self, chat_id: i64) -> Vec<ChatMessage> {
        self.chats.lock().entry(chat_id).or_default().clone()
    }

    /// Append a turn, dropping the oldest ones beyond the limit.
    pub fn append(&self, chat_id: i64, message: ChatMessage) {
        let mut chats = self.chats.lock();
        let history = chats.entry(chat_id).or_default();
        history.push(message);
        if history.len() > self.max_messages {
            let excess = history.len() - self.max_messages;
            history.drain(..excess);
        }
    }

    /// Forget a chat's turns. The chat itself stays registered.
    pub fn clear(&self, chat_id: i64) {
        self.chats.lock().insert(chat_id, Vec::new());
    }

    /// Number of registered chats.
    pub fn len(&self) -> usize {
        self.chats.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.chats.lock().is_empty()
    }
}
