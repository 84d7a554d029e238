mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "progrev",
    about = "Архитектор Прогрева: Telegram bot that plans sales warm-up content"
)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the bot and its HTTP server
    Serve {
        /// Address to bind (overrides HOST)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides PORT)
        #[arg(long, short = 'p')]
        port: Option<u16>,
    },
    /// Manage the Telegram webhook registration
    Webhook {
        #[command(subcommand)]
        action: WebhookAction,
    },
    /// Check configuration and Telegram connectivity
    Doctor,
}

#[derive(Subcommand)]
enum WebhookAction {
    /// Register <URL>/webhook with Telegram
    Set {
        /// Public base URL (overrides WEBHOOK_URL)
        #[arg(long)]
        url: Option<String>,
    },
    /// Remove the webhook registration
    Delete {
        /// Also discard updates Telegram has queued
        #[arg(long)]
        drop_pending: bool,
    },
    /// Show the current webhook registration
    Info,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => commands::serve(host, port).await?,
        Commands::Webhook { action } => match action {
            WebhookAction::Set { url } => commands::webhook_set(url).await?,
            WebhookAction::Delete { drop_pending } => commands::webhook_delete(drop_pending).await?,
            WebhookAction::Info => commands::webhook_info().await?,
        },
        Commands::Doctor => commands::doctor().await?,
    }

    Ok(())
}
