use progrev::dispatch::allowed_updates;
use progrev_telegram::{TelegramApi, WebhookConfig};

pub async fn webhook_set(url: Option<String>) -> anyhow::Result<()> {
    let (mut env, settings) = super::load_config()?;
    if url.is_some() {
        env.webhook_url = url;
    }
    let endpoint = env
        .webhook_endpoint()
        .ok_or_else(|| anyhow::anyhow!("WEBHOOK_URL not set; pass --url or set it in .env"))?;

    let client = super::telegram_client(&env, &settings)?;
    let config = WebhookConfig {
        url: endpoint.clone(),
        allowed_updates: allowed_updates(),
        drop_pending_updates: true,
        secret_token: env.webhook_secret.clone(),
    };
    client.set_webhook(&config).await?;

    println!("Webhook set: {endpoint}");
    Ok(())
}

pub async fn webhook_delete(drop_pending: bool) -> anyhow::Result<()> {
    let (env, settings) = super::load_config()?;
    let client = super::telegram_client(&env, &settings)?;
    client.delete_webhook(drop_pending).await?;

    if drop_pending {
        println!("Webhook deleted, pending updates dropped");
    } else {
        println!("Webhook deleted");
    }
    Ok(())
}

pub async fn webhook_info() -> anyhow::Result<()> {
    let (env, settings) = super::load_config()?;
    let client = super::telegram_client(&env, &settings)?;
    let info = client.get_webhook_info().await?;

    if info.url.is_empty() {
        println!("Webhook:         not set (long polling)");
    } else {
        println!("Webhook:         {}", info.url);
    }
    println!("Pending updates: {}", info.pending_update_count);
    if let Some(allowed) = &info.allowed_updates {
        println!("Allowed updates: {}", allowed.join(", "));
    }
    if let Some(message) = &info.last_error_message {
        println!("Last error:      {message}");
    }
    Ok(())
}
