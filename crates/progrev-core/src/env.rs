use std::fmt;
use std::net::SocketAddr;

use secrecy::SecretString;

use crate::error::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;

/// Deployment configuration read from environment variables.
///
/// Locally reads from `.env` via dotenvy, in a container reads the
/// variables injected by the platform.
///
/// `telegram_token`, `groq_api_key` and `webhook_secret` are wrapped in
/// [`SecretString`] so they never show up in logs or debug output.
#[derive(Clone)]
pub struct BotEnv {
    pub telegram_token: SecretString,
    pub groq_api_key: SecretString,
    /// Public base URL of this service. When absent the bot falls back to polling.
    pub webhook_url: Option<String>,
    /// Value Telegram echoes in `X-Telegram-Bot-Api-Secret-Token`.
    pub webhook_secret: Option<SecretString>,
    pub host: String,
    pub port: u16,
}

impl fmt::Debug for BotEnv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotEnv")
            .field("telegram_token", &"[REDACTED]")
            .field("groq_api_key", &"[REDACTED]")
            .field("webhook_url", &self.webhook_url)
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("host", &self.host)
            .field("port", &self.port)
            .finish()
    }
}

impl BotEnv {
    /// Load from the process environment.
    ///
    /// ```rust,no_run
    /// use progrev_core::BotEnv;
    /// let env = BotEnv::load().expect("TELEGRAM_TOKEN and GROQ_API_KEY must be set");
    /// ```
    pub fn load() -> crate::Result<Self> {
        // Attempt to load .env file (silently ignore if not found)
        let dotenv_loaded = dotenvy::dotenv().is_ok();
        tracing::debug!(dotenv = dotenv_loaded, "loading BotEnv");

        // arch-lint: allow(no-silent-result-drop) reason="an unset or non-unicode variable is treated as absent"
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> crate::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &str| optional(key).ok_or_else(|| Error::MissingEnvVar(key.to_owned()));

        let port = match optional("PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| Error::InvalidEnvVar {
                key: "PORT".to_owned(),
                value: raw.clone(),
            })?,
            None => DEFAULT_PORT,
        };

        let env = Self {
            telegram_token: SecretString::from(required("TELEGRAM_TOKEN")?),
            groq_api_key: SecretString::from(required("GROQ_API_KEY")?),
            webhook_url: optional("WEBHOOK_URL").map(|u| u.trim().to_owned()),
            webhook_secret: optional("WEBHOOK_SECRET").map(SecretString::from),
            host: optional("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            port,
        };

        tracing::debug!(
            webhook_url = ?env.webhook_url,
            webhook_secret_configured = env.webhook_secret.is_some(),
            host = %env.host,
            port = env.port,
            "BotEnv loaded",
        );
        Ok(env)
    }

    /// Full webhook endpoint registered with Telegram, e.g. `https://bot.example.com/webhook`.
    pub fn webhook_endpoint(&self) -> Option<String> {
        self.webhook_url
            .as_deref()
            .map(|base| format!("{}/webhook", base.trim_end_matches('/')))
    }

    /// Socket address to listen on.
    pub fn bind_addr(&self) -> crate::Result<SocketAddr> {
        let raw = format!("{}:{}", self.host, self.port);
        raw.parse().map_err(|_| Error::InvalidEnvVar {
            key: "HOST".to_owned(),
            value: self.host.clone(),
        })
    }
}
