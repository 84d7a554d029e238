use std::time::Duration;

use serde::{Deserialize, Serialize};

/// File name of the optional tunables file, looked up in the working directory.
pub const SETTINGS_FILE: &str = "progrev.toml";

/// progrev.toml configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub model: ModelSettings,
    #[serde(default)]
    pub history: HistorySettings,
    #[serde(default)]
    pub telegram: TelegramSettings,
    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSettings {
    /// Chat-completions model name
    #[serde(default = "default_model")]
    pub name: String,
    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Upper bound on generated tokens per reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// OpenAI-compatible API base (defaults to Groq)
    #[serde(default)]
    pub base_url: Option<String>,
    /// Per-attempt limit on a completion request, connect to last body byte
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistorySettings {
    /// Messages kept per chat; older ones are dropped first
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramSettings {
    /// Bot API base URL
    #[serde(default = "default_api_base")]
    pub api_base: String,
    /// Parse mode applied to model replies
    #[serde(default)]
    pub parse_mode: ParseMode,
    /// Pause between the parts of a split reply
    #[serde(default = "default_chunk_delay_ms")]
    pub chunk_delay_ms: u64,
    /// Long-poll timeout passed to getUpdates
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    /// How long /health reports 503 before the listener stops
    #[serde(default = "default_shutdown_grace_secs")]
    pub shutdown_grace_secs: u64,
}

/// Telegram message formatting mode.
///
/// `Plain` sends no `parse_mode` at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMode {
    #[default]
    #[serde(rename = "HTML")]
    Html,
    MarkdownV2,
    Markdown,
    Plain,
}

impl ParseMode {
    /// Value of the Bot API `parse_mode` field, if any.
    pub fn api_value(self) -> Option<&'static str> {
        match self {
            Self::Html => Some("HTML"),
            Self::MarkdownV2 => Some("MarkdownV2"),
            Self::Markdown => Some("Markdown"),
            Self::Plain => None,
        }
    }
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            name: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            base_url: None,
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for HistorySettings {
    fn default() -> Self {
        Self {
            max_messages: default_max_messages(),
        }
    }
}

impl Default for TelegramSettings {
    fn default() -> Self {
        Self {
            api_base: default_api_base(),
            parse_mode: ParseMode::default(),
            chunk_delay_ms: default_chunk_delay_ms(),
            poll_timeout_secs: default_poll_timeout_secs(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            shutdown_grace_secs: default_shutdown_grace_secs(),
        }
    }
}

impl ModelSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl TelegramSettings {
    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.chunk_delay_ms)
    }
}

impl ServerSettings {
    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }
}

impl Settings {
    /// Load from progrev.toml in the given directory, or return defaults if not found.
    pub fn load(dir: &std::path::Path) -> crate::Result<Self> {
        let config_path = dir.join(SETTINGS_FILE);
        if config_path.exists() {
            let content =
                std::fs::read_to_string(&config_path).map_err(|e| crate::Error::ConfigLoad {
                    path: config_path.clone(),
                    source: e,
                })?;
            let settings = toml::from_str(&content).map_err(|e| crate::Error::ConfigParse {
                path: config_path.clone(),
                source: e,
            })?;
            tracing::debug!(path = %config_path.display(), "settings loaded");
            Ok(settings)
        } else {
            Ok(Self::default())
        }
    }
}

fn default_model() -> String {
    "llama-3.3-70b-versatile".to_owned()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    4096
}

fn default_request_timeout_secs() -> u64 {
    60
}

fn default_max_messages() -> usize {
    20
}

fn default_api_base() -> String {
    "https://api.telegram.org".to_owned()
}

fn default_chunk_delay_ms() -> u64 {
    500
}

fn default_poll_timeout_secs() -> u32 {
    30
}

fn default_shutdown_grace_secs() -> u64 {
    5
}
