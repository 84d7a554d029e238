mod doctor;
mod serve;
mod webhook;

use std::path::Path;

use progrev::{BotEnv, Settings};
use progrev_telegram::HttpTelegramClient;

pub use doctor::doctor;
pub use serve::serve;
pub use webhook::{webhook_delete, webhook_info, webhook_set};

/// Environment plus `./progrev.toml`, the configuration every command starts from.
pub(crate) fn load_config() -> anyhow::Result<(BotEnv, Settings)> {
    let env = BotEnv::load()?;
    let settings = Settings::load(Path::new("."))?;
    Ok((env, settings))
}

pub(crate) fn telegram_client(
    env: &BotEnv,
    settings: &Settings,
) -> anyhow::Result<HttpTelegramClient> {
    let client = HttpTelegramClient::new(
        env.telegram_token.clone(),
        Some(settings.telegram.api_base.as_str()),
    )?;
    Ok(client)
}
