//! Prometheus-style text metrics: uptime, process memory/CPU, request counters.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::Mutex;
use sysinfo::{Pid, ProcessesToUpdate, System};

/// HTTP request counters maintained by the tracking middleware.
#[derive(Debug, Default)]
pub struct RequestStats {
    requests: AtomicU64,
    errors: AtomicU64,
}

impl RequestStats {
    pub fn record_request(&self) {
        self.requests.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_error(&self) {
        self.errors.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests(&self) -> u64 {
        self.requests.load(Ordering::Relaxed)
    }

    pub fn errors(&self) -> u64 {
        self.errors.load(Ordering::Relaxed)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ProcessUsage {
    pub rss_bytes: u64,
    /// Percent of one core since the previous sample; 0 on the first one.
    pub cpu_percent: f32,
}

/// Samples this process's resident memory and CPU usage.
pub struct ProcessSampler {
    pid: Option<Pid>,
    system: Mutex<System>,
}

impl std::fmt::Debug for ProcessSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessSampler")
            .field("pid", &self.pid)
            .finish_non_exhaustive()
    }
}

impl Default for ProcessSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSampler {
    pub fn new() -> Self {
        let pid = match sysinfo::get_current_pid() {
            Ok(pid) => Some(pid),
            Err(e) => {
                tracing::warn!(error = e, "process metrics unavailable");
                None
            }
        };
        Self {
            pid,
            system: Mutex::new(System::new()),
        }
    }

    pub fn sample(&self) -> ProcessUsage {
        let Some(pid) = self.pid else {
            return ProcessUsage::default();
        };
        let mut system = self.system.lock();
        system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
        system
            .process(pid)
            .map(|p| ProcessUsage {
                rss_bytes: p.memory(),
                cpu_percent: p.cpu_usage(),
            })
            .unwrap_or_default()
    }
}

/// Values exported by `GET /metrics`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricsSnapshot {
    pub uptime_secs: u64,
    pub ram_mb: f64,
    pub cpu_percent: f32,
    pub requests_total: u64,
    pub errors_total: u64,
    pub history_entries: usize,
}

impl MetricsSnapshot {
    /// Prometheus text exposition format.
    pub fn render(&self) -> String {
        let mut out = String::new();
        metric(&mut out, "bot_uptime", "Uptime in seconds", "gauge", self.uptime_secs);
        metric(
            &mut out,
            "bot_ram_mb",
            "RAM usage MB",
            "gauge",
            format_args!("{:.2}", self.ram_mb),
        );
        metric(
            &mut out,
            "bot_cpu",
            "CPU usage percent",
            "gauge",
            format_args!("{:.1}", self.cpu_percent),
        );
        metric(
            &mut out,
            "bot_requests_total",
            "Total HTTP requests",
            "counter",
            self.requests_total,
        );
        metric(
            &mut out,
            "bot_errors_total",
            "Total errors",
            "counter",
            self.errors_total,
        );
        metric(
            &mut out,
            "bot_history_entries",
            "Number of chat history entries",
            "gauge",
            self.history_entries,
        );
        out
    }
}

fn metric(out: &mut String, name: &str, help: &str, kind: &str, value: impl std::fmt::Display) {
    out.push_str(&format!(
        "# HELP {name} {help}\n# TYPE {name} {kind}\n{name} {value}\n"
    ));
}
