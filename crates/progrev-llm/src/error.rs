#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("failed to build HTTP client")]
    HttpClient { source: reqwest::Error },

    #[error("chat completion request failed")]
    Request { source: reqwest::Error },

    #[error("chat completion API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("failed to decode chat completion response")]
    Decode { source: serde_json::Error },

    #[error("chat completion response contained no message")]
    EmptyResponse,
}

impl LlmError {
    /// Whether repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Request { .. } => true,
            Self::Api { status, .. } => is_retryable_status(*status),
            Self::HttpClient { .. } | Self::Decode { .. } | Self::EmptyResponse => false,
        }
    }
}

pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}
