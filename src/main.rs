use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use lunchbot::{ConsoleChat, IncomingMessage, LunchConfig, LunchHandler, ReqwestClient, telemetry};
use tokio::io::AsyncWriteExt;

/// Weather-aware lunch suggestions for your chat room
#[derive(Debug, Parser)]
#[command(name = "lunchbot", version, about)]
struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, env = "LUNCHBOT_CONFIG")]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,

    /// Answer a single message and exit instead of listening on stdin
    #[arg(short, long)]
    message: Option<String>,

    /// Name replies are addressed to
    #[arg(long, default_value = "console")]
    user: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = LunchConfig::load_from_path(cli.config.clone()).context("Failed to load configuration")?;
    telemetry::init(&config.logging, cli.verbose);

    let http = ReqwestClient::new(&config.http)?;
    let handler = LunchHandler::new(http, config);
    let mut stdout = tokio::io::stdout();

    match cli.message {
        Some(text) => {
            let message = IncomingMessage::new(cli.user, text);
            if let Some(reply) = handler.handle(&message).await {
                stdout.write_all(reply.content.as_bytes()).await?;
                stdout.write_all(b"\n").await?;
                stdout.flush().await?;
            } else {
                tracing::info!("Message is not a lunch question, nothing to say");
            }
        }
        None => {
            tracing::info!(version = lunchbot::VERSION, "Listening for lunch questions on stdin");
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            ConsoleChat::new(cli.user).run(&handler, stdin, &mut stdout).await?;
        }
    }

    Ok(())
}
