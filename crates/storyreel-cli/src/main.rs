use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use storyreel_core::AppConfig;

mod commands;
mod host;

#[derive(Parser)]
#[command(name = "storyreel")]
#[command(author, version, about = "Shoppable story reels in the terminal")]
struct Cli {
    /// Config file to use instead of ~/.config/storyreel/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a deck in the full-screen viewer
    Play {
        /// Deck file (TOML or JSON)
        deck: PathBuf,
        /// Store collection to start at (0-based)
        #[arg(short = 'c', long, default_value_t = 0)]
        collection: usize,
        /// Item within the collection to start at (0-based)
        #[arg(short = 'i', long, default_value_t = 0)]
        item: usize,
        /// Start at the store with this id instead of an index
        #[arg(short = 's', long, conflicts_with = "collection")]
        store: Option<String>,
    },
    /// List the stores and stories in a deck
    List {
        /// Deck file (TOML or JSON)
        deck: PathBuf,
    },
    /// Validate a deck and its media files
    Check {
        /// Deck file (TOML or JSON)
        deck: PathBuf,
    },
}

/// Initialize logging
///
/// The viewer owns the terminal while playing, so `play` logs to a file in
/// the data directory; every other command logs to stderr.
fn init_logging(config: &AppConfig, to_file: bool) -> Result<()> {
    let filter = EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| config.general.log_level.clone()),
    );
    let registry = tracing_subscriber::registry().with(filter);

    if to_file {
        let log_path = config.log_path();
        if let Some(parent) = log_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else {
        registry
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?,
        None => AppConfig::load()?,
    };
    let config = Arc::new(config);

    init_logging(&config, matches!(cli.command, Commands::Play { .. }))?;

    match cli.command {
        Commands::Play {
            deck,
            collection,
            item,
            store,
        } => {
            let start = commands::play::StartAt {
                collection,
                item,
                store: store.as_deref(),
            };
            commands::play::run(config, &deck, start).await
        }
        Commands::List { deck } => commands::list::run(&deck, &config.playback),
        Commands::Check { deck } => commands::check::run(&deck),
    }
}
