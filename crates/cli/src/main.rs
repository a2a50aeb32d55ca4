use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::{Parser, Subcommand};
use cloud_hunter_core::{env_list, env_parse_with_default};
use cloud_hunter_llm::{DEFAULT_BASE_URL, GeminiClient};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "cloud-hunter")]
#[command(about = "Cloud collector's handbook: classify sky photos and grow a cloud collection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the web UI and HTTP API
    Serve {
        #[arg(short, long, default_value = "8501")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Classify one photo and record it
    Classify { image: PathBuf },
    /// Score, rank and achievements
    Stats,
    /// Collected species grouped by tier
    Gallery,
    /// Every sighting of one species
    History { name: String },
    /// Bring stored scores in line with the catalogue
    Repair,
    /// Delete one sighting
    Delete {
        id: i64,
        /// Confirm the deletion
        #[arg(long)]
        yes: bool,
    },
    /// Render the share card of a sighting
    Card {
        id: i64,
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Stamp date, YYYY-MM-DD; today when absent
        #[arg(short, long)]
        date: Option<String>,
    },
    /// Write a copy of the database
    Backup {
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

fn get_db_path() -> PathBuf {
    if let Ok(custom) = std::env::var("CLOUD_HUNTER_DB") {
        let custom = custom.trim();
        if !custom.is_empty() {
            return PathBuf::from(custom);
        }
    }
    dirs::data_local_dir().unwrap_or_else(|| PathBuf::from(".")).join("cloud-hunter").join("clouds.db")
}

fn ensure_db_dir(db_path: &std::path::Path) -> Result<()> {
    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(())
}

fn get_api_key() -> Result<String> {
    std::env::var("GEMINI_API_KEY")
        .map_err(|_| anyhow::anyhow!("GEMINI_API_KEY environment variable must be set"))
}

fn get_base_url() -> String {
    std::env::var("CLOUD_HUNTER_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_owned())
}

/// Gemini client configured from the environment.
fn build_classifier() -> Result<GeminiClient> {
    let mut client = GeminiClient::new(get_api_key()?, get_base_url())?;
    if let Some(models) = env_list("CLOUD_HUNTER_MODELS") {
        client = client.with_models(models);
    }
    let pause_ms = env_parse_with_default("CLOUD_HUNTER_RETRY_PAUSE_MS", 2000_u64);
    Ok(client.with_retry_pause(Duration::from_millis(pause_ms)))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { port, host } => commands::serve::run(port, host).await,
        Commands::Classify { image } => commands::ledger::classify(&image).await,
        Commands::Stats => commands::ledger::stats(),
        Commands::Gallery => commands::ledger::gallery(),
        Commands::History { name } => commands::ledger::history(&name),
        Commands::Repair => commands::ledger::repair(),
        Commands::Delete { id, yes } => commands::ledger::delete(id, yes),
        Commands::Card { id, out, date } => commands::ledger::card(id, out, date.as_deref()),
        Commands::Backup { out } => commands::ledger::backup(out),
    }
}
