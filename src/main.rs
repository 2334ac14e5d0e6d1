use anyhow::Result;
use dotenvy::dotenv;
use std::sync::Arc;
use teloxide::prelude::*;

use vidra::cli::{Cli, Commands};
use vidra::core::{config, init_logger};
use vidra::download::{MediaSource, WorkerPool, YtDlpSource};
use vidra::session::SessionStore;
use vidra::telegram::{create_bot, schema, setup_bot_commands, HandlerDeps};

/// Main entry point for the Telegram bot
///
/// Parses CLI arguments and dispatches to the appropriate subcommand.
///
/// # Errors
/// Returns an error if initialization fails (logging, missing bot token).
#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env if present, before any config
    // statics are first read.
    let _ = dotenv();

    let cli = Cli::parse_args();

    init_logger(&config::LOG_FILE_PATH)?;

    match cli.command {
        Some(Commands::Probe { url, json }) => run_probe(url, json).await,
        Some(Commands::Run) | None => run_bot().await,
    }
}

/// Probe a URL from the command line (operator debugging aid).
async fn run_probe(url: String, json: bool) -> Result<()> {
    let url = url::Url::parse(&url)?;
    let source = YtDlpSource::new();
    let info = source.probe(&url).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
    } else {
        println!("Title:   {}", info.title.as_deref().unwrap_or("<unknown>"));
        let heights: Vec<String> = info.heights.iter().map(|h| format!("{}p", h)).collect();
        println!(
            "Heights: {}",
            if heights.is_empty() {
                "<none>".to_string()
            } else {
                heights.join(", ")
            }
        );
    }

    Ok(())
}

/// Run the Telegram bot until shutdown.
async fn run_bot() -> Result<()> {
    log::info!("Starting bot...");

    // Fatal without a token; everything else is recoverable at runtime.
    let bot = create_bot()?;

    if let Err(e) = setup_bot_commands(&bot).await {
        log::warn!("Failed to set bot commands: {}. Continuing anyway.", e);
    }

    let deps = HandlerDeps::new(
        Arc::new(SessionStore::new()),
        Arc::new(YtDlpSource::new()) as Arc<dyn MediaSource>,
        Arc::new(WorkerPool::new(config::worker::pool_size())),
    );

    let handler = schema(deps);

    log::info!(
        "Ready to receive updates (worker pool: {}, max file size: {} bytes)",
        config::worker::pool_size(),
        *config::limits::MAX_FILE_SIZE_BYTES
    );

    Dispatcher::builder(bot, handler)
        .dependencies(DependencyMap::new())
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    log::info!("Dispatcher shut down");
    Ok(())
}
