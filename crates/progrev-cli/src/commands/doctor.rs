use std::fmt;
use std::path::Path;

use progrev::{BotEnv, Settings};
use progrev_telegram::TelegramApi;

#[derive(Debug, Default, Clone)]
struct CheckResult {
    passed: bool,
    detail: String,
}

impl CheckResult {
    fn ok(detail: impl Into<String>) -> Self {
        Self {
            passed: true,
            detail: detail.into(),
        }
    }

    fn fail(detail: impl Into<String>) -> Self {
        Self {
            passed: false,
            detail: detail.into(),
        }
    }

    fn icon(&self) -> &'static str {
        if self.passed { "OK" } else { "NG" }
    }
}

#[derive(Debug, Default)]
struct DoctorReport {
    environment: CheckResult,
    settings: CheckResult,
    telegram: CheckResult,
    webhook: CheckResult,
}

impl DoctorReport {
    fn all_passed(&self) -> bool {
        self.environment.passed && self.settings.passed && self.telegram.passed && self.webhook.passed
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "progrev doctor")?;
        writeln!(f, "--------------")?;
        for (name, check) in [
            ("Environment", &self.environment),
            ("Settings", &self.settings),
            ("Telegram", &self.telegram),
            ("Webhook", &self.webhook),
        ] {
            writeln!(f, "[{}] {name:<12} {}", check.icon(), check.detail)?;
        }
        Ok(())
    }
}

pub async fn doctor() -> anyhow::Result<()> {
    let mut report = DoctorReport::default();

    let env = match BotEnv::load() {
        Ok(env) => {
            report.environment = CheckResult::ok(match env.webhook_endpoint() {
                Some(url) => format!("webhook mode ({url})"),
                None => "polling mode (WEBHOOK_URL not set)".to_owned(),
            });
            Some(env)
        }
        Err(e) => {
            report.environment = CheckResult::fail(e.to_string());
            None
        }
    };

    let settings = match Settings::load(Path::new(".")) {
        Ok(settings) => {
            let source = if Path::new(progrev::config::SETTINGS_FILE).exists() {
                progrev::config::SETTINGS_FILE
            } else {
                "defaults"
            };
            report.settings = CheckResult::ok(format!("{source}, model {}", settings.model.name));
            settings
        }
        Err(e) => {
            report.settings = CheckResult::fail(format!("{e}; using defaults"));
            Settings::default()
        }
    };

    match env {
        Some(env) => check_telegram(&env, &settings, &mut report).await,
        None => {
            report.telegram = CheckResult::fail("skipped: environment incomplete");
            report.webhook = CheckResult::fail("skipped: environment incomplete");
        }
    }

    println!();
    println!("{report}");

    if !report.all_passed() {
        anyhow::bail!("some checks failed, see above for details");
    }

    Ok(())
}

async fn check_telegram(env: &BotEnv, settings: &Settings, report: &mut DoctorReport) {
    let client = match super::telegram_client(env, settings) {
        Ok(client) => client,
        Err(e) => {
            report.telegram = CheckResult::fail(e.to_string());
            report.webhook = CheckResult::fail("skipped");
            return;
        }
    };

    report.telegram = match client.get_me().await {
        Ok(me) => CheckResult::ok(format!(
            "authorized as @{}",
            me.username.as_deref().unwrap_or(&me.first_name)
        )),
        Err(e) => CheckResult::fail(e.to_string()),
    };
    if !report.telegram.passed {
        report.webhook = CheckResult::fail("skipped: Telegram unreachable");
        return;
    }

    report.webhook = match client.get_webhook_info().await {
        Ok(info) => match (info.url.is_empty(), info.last_error_message) {
            (true, _) => CheckResult::ok("not set (long polling)"),
            (false, Some(error)) => CheckResult::fail(format!("{}: {error}", info.url)),
            (false, None) => CheckResult::ok(format!(
                "{} ({} pending)",
                info.url, info.pending_update_count
            )),
        },
        Err(e) => CheckResult::fail(e.to_string()),
    };
}
