#[derive(Debug, thiserror::Error)]
pub enum TelegramError {
    #[error("failed to build HTTP client")]
    HttpClient { source: reqwest::Error },

    #[error("Telegram {method} request failed")]
    Request {
        method: &'static str,
        source: reqwest::Error,
    },

    #[error("failed to decode Telegram {method} response")]
    Decode {
        method: &'static str,
        source: serde_json::Error,
    },

    #[error("Telegram {method} returned no result")]
    MissingResult { method: &'static str },

    #[error("Telegram {method} failed ({code}): {description}")]
    Api {
        method: &'static str,
        code: i32,
        description: String,
    },
}

impl TelegramError {
    /// Telegram refused the text because of malformed HTML/Markdown entities.
    pub fn is_entity_parse_error(&self) -> bool {
        matches!(
            self,
            Self::Api { code: 400, description, .. }
                if description.contains("can't parse entities")
        )
    }
}
