use std::fmt::Display;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio::task::JoinSet;

use crate::api::TelegramApi;
use crate::types::Update;

const INITIAL_BACKOFF: Duration = Duration::from_secs(1);
const MAX_BACKOFF: Duration = Duration::from_secs(30);

/// Receives every update fetched by the [`Poller`].
#[async_trait]
pub trait UpdateHandler: Send + Sync + 'static {
    type Error: Display + Send;

    async fn handle(&self, update: Update) -> Result<(), Self::Error>;
}

/// Long-polling loop over `getUpdates`.
///
/// Each update is handled in its own task so one slow conversation does
/// not hold up the others. In-flight handlers are awaited on shutdown.
pub struct Poller {
    api: Arc<dyn TelegramApi>,
    timeout_secs: u32,
    allowed_updates: Vec<String>,
}

impl Poller {
    pub fn new(api: Arc<dyn TelegramApi>, timeout_secs: u32, allowed_updates: Vec<String>) -> Self {
        Self {
            api,
            timeout_secs,
            allowed_updates,
        }
    }

    /// Poll until `shutdown` becomes `true` or its sender is dropped.
    pub async fn run<H: UpdateHandler>(&self, handler: Arc<H>, mut shutdown: watch::Receiver<bool>) {
        tracing::info!(timeout_secs = self.timeout_secs, "starting polling");

        // getUpdates is rejected while a webhook is registered
        if let Err(e) = self.api.delete_webhook(false).await {
            tracing::warn!(error = %e, "failed to delete webhook before polling");
        }

        let mut tasks = JoinSet::new();
        let mut offset: Option<i64> = None;
        let mut backoff = INITIAL_BACKOFF;

        loop {
            if *shutdown.borrow() {
                break;
            }
            while let Some(joined) = tasks.try_join_next() {
                log_join_failure(joined);
            }

            let fetched = tokio::select! {
                result = self.api.get_updates(offset, self.timeout_secs, &self.allowed_updates) => result,
                _ = shutdown.changed() => break,
            };

            match fetched {
                Ok(updates) => {
                    backoff = INITIAL_BACKOFF;
                    for update in updates {
                        offset = Some(update.update_id + 1);
                        let handler = Arc::clone(&handler);
                        tasks.spawn(async move {
                            let update_id = update.update_id;
                            if let Err(e) = handler.handle(update).await {
                                tracing::error!(update_id, error = %e, "failed to handle update");
                            }
                        });
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, retry_in_secs = backoff.as_secs(), "polling error");
                    tokio::select! {
                        _ = tokio::time::sleep(backoff) => {}
                        _ = shutdown.changed() => break,
                    }
                    backoff = (backoff * 2).min(MAX_BACKOFF);
                }
            }
        }

        tracing::info!(in_flight = tasks.len(), "polling stopped");
        while let Some(joined) = tasks.join_next().await {
            log_join_failure(joined);
        }
    }
}

fn log_join_failure(joined: Result<(), tokio::task::JoinError>) {
    if let Err(e) = joined {
        tracing::error!(error = %e, "update handler task failed");
    }
}
