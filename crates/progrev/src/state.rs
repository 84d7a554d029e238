use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use secrecy::SecretString;

use crate::dispatch::Bot;
use crate::metrics::{MetricsSnapshot, ProcessSampler, RequestStats};

/// Set once the process has been asked to stop. Never cleared.
#[derive(Debug, Clone, Default)]
pub struct ShutdownFlag(Arc<AtomicBool>);

impl ShutdownFlag {
    /// Mark shutdown as started. Returns `false` if it already was.
    pub fn begin(&self) -> bool {
        !self.0.swap(true, Ordering::SeqCst)
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// State shared by every HTTP handler.
///
/// `webhook_secret` is wrapped in [`SecretString`] and redacted from
/// `Debug` output.
#[derive(Clone)]
pub struct AppState {
    pub bot: Arc<Bot>,
    pub stats: Arc<RequestStats>,
    pub shutdown: ShutdownFlag,
    pub process: Arc<ProcessSampler>,
    /// Expected `X-Telegram-Bot-Api-Secret-Token`. `None` disables the check.
    pub webhook_secret: Option<SecretString>,
    pub started_at: Instant,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("stats", &self.stats)
            .field("shutdown", &self.shutdown)
            .field(
                "webhook_secret",
                &self.webhook_secret.as_ref().map(|_| "[REDACTED]"),
            )
            .field("started_at", &self.started_at)
            .finish_non_exhaustive()
    }
}

impl AppState {
    pub fn new(bot: Arc<Bot>, webhook_secret: Option<SecretString>) -> Self {
        Self {
            bot,
            stats: Arc::new(RequestStats::default()),
            shutdown: ShutdownFlag::default(),
            process: Arc::new(ProcessSampler::new()),
            webhook_secret,
            started_at: Instant::now(),
        }
    }

    pub fn metrics_snapshot(&self) -> MetricsSnapshot {
        let usage = self.process.sample();
        MetricsSnapshot {
            uptime_secs: self.started_at.elapsed().as_secs(),
            ram_mb: usage.rss_bytes as f64 / 1024.0 / 1024.0,
            cpu_percent: usage.cpu_percent,
            requests_total: self.stats.requests(),
            errors_total: self.stats.errors(),
            history_entries: self.bot.conversation().histories().len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shutdown_flag_begins_once() {
        let flag = ShutdownFlag::default();
        assert!(!flag.is_set());
        assert!(flag.begin());
        assert!(!flag.begin());
        assert!(flag.is_set());
        assert!(flag.clone().is_set());
    }
}
