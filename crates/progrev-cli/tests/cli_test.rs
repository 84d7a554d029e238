use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::TempDir;

const ENV_VARS: [&str; 6] = [
    "TELEGRAM_TOKEN",
    "GROQ_API_KEY",
    "WEBHOOK_URL",
    "WEBHOOK_SECRET",
    "HOST",
    "PORT",
];

/// `progrev` running in an empty directory with none of the bot's variables set.
fn progrev(dir: &TempDir) -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("progrev");
    cmd.current_dir(dir.path()).env("RUST_LOG", "error");
    for key in ENV_VARS {
        cmd.env_remove(key);
    }
    cmd
}

fn with_credentials(cmd: &mut assert_cmd::Command) -> &mut assert_cmd::Command {
    cmd.env("TELEGRAM_TOKEN", "123456:TEST")
        .env("GROQ_API_KEY", "gsk-test")
}

// ── Help / Version ──

#[test]
fn shows_help() {
    let tmp = TempDir::new().unwrap();
    progrev(&tmp)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Архитектор Прогрева"))
        .stdout(predicate::str::contains("serve"))
        .stdout(predicate::str::contains("webhook"))
        .stdout(predicate::str::contains("doctor"));
}

#[test]
fn shows_version() {
    let tmp = TempDir::new().unwrap();
    progrev(&tmp)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("progrev"));
}

#[test]
fn webhook_help_lists_actions() {
    let tmp = TempDir::new().unwrap();
    progrev(&tmp)
        .args(["webhook", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("set"))
        .stdout(predicate::str::contains("delete"))
        .stdout(predicate::str::contains("info"));
}

// ── Configuration errors ──

#[test]
fn serve_requires_telegram_token() {
    let tmp = TempDir::new().unwrap();
    progrev(&tmp)
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("TELEGRAM_TOKEN"));
}

#[test]
fn serve_rejects_invalid_port() {
    let tmp = TempDir::new().unwrap();
    with_credentials(&mut progrev(&tmp))
        .env("PORT", "eighty")
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("PORT"));
}

#[test]
fn serve_rejects_invalid_settings_file() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("progrev.toml"), "[history\nmax_messages = ").unwrap();

    with_credentials(&mut progrev(&tmp))
        .arg("serve")
        .assert()
        .failure()
        .stderr(predicate::str::contains("progrev.toml"));
}

#[test]
fn webhook_set_needs_a_url() {
    let tmp = TempDir::new().unwrap();
    with_credentials(&mut progrev(&tmp))
        .args(["webhook", "set"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("WEBHOOK_URL not set"));
}

// ── Doctor ──

#[test]
fn doctor_reports_missing_environment() {
    let tmp = TempDir::new().unwrap();
    progrev(&tmp)
        .arg("doctor")
        .assert()
        .failure()
        .stdout(predicate::str::contains("[NG] Environment"))
        .stdout(predicate::str::contains("[OK] Settings"))
        .stdout(predicate::str::contains("defaults"))
        .stderr(predicate::str::contains("some checks failed"));
}

#[test]
fn doctor_reports_unreachable_telegram() {
    let tmp = TempDir::new().unwrap();
    std::fs::write(
        tmp.path().join("progrev.toml"),
        "[telegram]\napi_base = \"http://127.0.0.1:9\"\n",
    )
    .unwrap();

    with_credentials(&mut progrev(&tmp))
        .arg("doctor")
        .assert()
        .failure()
        .stdout(predicate::str::contains("[OK] Environment"))
        .stdout(predicate::str::contains("polling mode"))
        .stdout(predicate::str::contains("[OK] Settings"))
        .stdout(predicate::str::contains("progrev.toml"))
        .stdout(predicate::str::contains("[NG] Telegram"));
}
