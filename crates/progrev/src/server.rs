//! Service lifecycle: client setup, webhook or polling, graceful shutdown.

use std::future::Future;
use std::sync::Arc;

use progrev_core::{BotEnv, ChatHistories, Settings};
use progrev_llm::{Completer, GroqClient};
use progrev_telegram::{HttpTelegramClient, Poller, TelegramApi, WebhookConfig};
use tokio::net::TcpListener;
use tokio::signal;
use tokio::sync::watch;

use crate::conversation::Conversation;
use crate::dispatch::{Bot, allowed_updates};
use crate::error::ServeError;
use crate::routes;
use crate::state::AppState;

/// Build the real clients, bind `HOST:PORT`, and run until SIGINT/SIGTERM.
pub async fn serve(env: BotEnv, settings: Settings) -> Result<(), ServeError> {
    let telegram = HttpTelegramClient::new(
        env.telegram_token.clone(),
        Some(settings.telegram.api_base.as_str()),
    )
    .map_err(|source| ServeError::TelegramClient { source })?;
    let completer = GroqClient::new(env.groq_api_key.clone(), settings.model.clone())
        .map_err(|source| ServeError::LlmClient { source })?;

    let addr = env.bind_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServeError::Bind { addr, source })?;

    run(
        listener,
        &env,
        &settings,
        Arc::new(telegram),
        Arc::new(completer),
        shutdown_signal(),
    )
    .await
}

/// Run the bot on an already bound listener until `signal` resolves.
///
/// With `WEBHOOK_URL` set the webhook is registered before serving and a
/// registration failure aborts startup. Otherwise updates are fetched by a
/// background [`Poller`].
///
/// When `signal` fires, `/health` and `/webhook` start answering 503, the
/// server keeps running for `shutdown_grace_secs`, then stops accepting
/// connections and drains in-flight requests. The poller is stopped and the
/// webhook deleted afterwards.
pub async fn run<F>(
    listener: TcpListener,
    env: &BotEnv,
    settings: &Settings,
    telegram: Arc<dyn TelegramApi>,
    completer: Arc<dyn Completer>,
    signal: F,
) -> Result<(), ServeError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let histories = Arc::new(ChatHistories::new(settings.history.max_messages));
    let conversation = Conversation::new(histories, completer);
    let mut bot = Bot::new(Arc::clone(&telegram), conversation, &settings.telegram);
    match telegram.get_me().await {
        Ok(me) => {
            tracing::info!(username = ?me.username, "bot identity resolved");
            if let Some(username) = me.username {
                bot = bot.with_username(username);
            }
        }
        Err(e) => {
            tracing::warn!(error = %e, "getMe failed, accepting commands addressed to any bot");
        }
    }
    let bot = Arc::new(bot);
    let state = AppState::new(Arc::clone(&bot), env.webhook_secret.clone());

    let (stop_tx, stop_rx) = watch::channel(false);
    let poller = match env.webhook_endpoint() {
        Some(url) => {
            let config = WebhookConfig {
                url: url.clone(),
                allowed_updates: allowed_updates(),
                drop_pending_updates: true,
                secret_token: env.webhook_secret.clone(),
            };
            telegram
                .set_webhook(&config)
                .await
                .map_err(|source| ServeError::SetWebhook {
                    url: url.clone(),
                    source,
                })?;
            tracing::info!(%url, "webhook set");
            None
        }
        None => {
            tracing::warn!("WEBHOOK_URL not set, falling back to long polling");
            let poller = Poller::new(
                Arc::clone(&telegram),
                settings.telegram.poll_timeout_secs,
                allowed_updates(),
            );
            let handler = Arc::clone(&bot);
            Some(tokio::spawn(async move { poller.run(handler, stop_rx).await }))
        }
    };

    let addr = listener
        .local_addr()
        .map_err(|source| ServeError::Serve { source })?;
    tracing::info!(address = %addr, model = %settings.model.name, "starting server");

    let shutdown = state.shutdown.clone();
    let grace = settings.server.shutdown_grace();
    let served = axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(async move {
            signal.await;
            if shutdown.begin() {
                tracing::info!(
                    grace_secs = grace.as_secs(),
                    "shutdown signal received, draining"
                );
            }
            tokio::time::sleep(grace).await;
        })
        .await;

    stop_tx.send_replace(true);
    if let Some(handle) = poller {
        if let Err(e) = handle.await {
            tracing::error!(error = %e, "poller task failed");
        }
    }

    match telegram.delete_webhook(true).await {
        Ok(()) => tracing::info!("webhook deleted"),
        Err(e) => tracing::warn!(error = %e, "failed to delete webhook on shutdown"),
    }
    tracing::info!("shutdown complete");

    served.map_err(|source| ServeError::Serve { source })
}

/// Resolves on Ctrl+C or SIGTERM.
///
/// Once the handlers are installed, further signals no longer terminate the
/// process, so a second signal during the grace period is ignored.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
}
