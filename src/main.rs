//! 청년이음 policy chat server and terminal client.

#![allow(clippy::unused_async)]

use std::sync::Arc;

use clap::Parser;
use dotenvy::dotenv;
use mimalloc::MiMalloc;
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use policy_chat::config::{AppConfig, Cli, Command};
use policy_chat::{server, terminal};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() {
    // Load .env (if present) before the environment is read
    let _ = dotenv();

    let cli = Cli::parse();
    let chat_mode = matches!(cli.command, Some(Command::Chat { .. }));

    // The terminal client keeps the screen for the conversation
    let default_level = if chat_mode { "warn" } else { "info" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = match AppConfig::from_cli(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        None | Some(Command::Serve) => server::start_server(Arc::new(config)).await,
        Some(Command::Chat { message }) => terminal::run(&config, message).await,
    };

    if let Err(e) = result {
        error!(name: "app.failed", error = %e, "Exiting with error");
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}
