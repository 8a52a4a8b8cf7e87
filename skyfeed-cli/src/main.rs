//! Skyfeed CLI
//!
//! Command-line interface for the skyfeed flight proxy: run the server, or
//! drive the dataset and fetch pipeline directly.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use skyfeed_api::{ApiConfig, ApiServer};
use skyfeed_cache::TypeCache;
use skyfeed_core::traits::SnapshotSource;
use skyfeed_reference::{ensure_available, DatasetConfig, ReferenceDataset};
use skyfeed_upstream::{FlightFeed, OpenSkyClient, UpstreamConfig};

/// Skyfeed - live flight state proxy with aircraft type enrichment
#[derive(Parser)]
#[command(name = "skyfeed")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT")]
        port: Option<u16>,
    },

    /// Fetch one flight snapshot and print it
    Fetch {
        /// Maximum records to fetch
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Print raw JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Resolve an aircraft identifier to its type code
    Resolve {
        /// ICAO 24-bit address (6 hex characters)
        icao24: String,
        /// Local dataset path
        #[arg(long, env = "SKYFEED_DATASET_PATH")]
        dataset: Option<PathBuf>,
    },

    /// Ensure the reference dataset is present locally
    Download {
        /// Re-download even if a local copy exists
        #[arg(short, long)]
        force: bool,
        /// Local dataset path
        #[arg(long, env = "SKYFEED_DATASET_PATH")]
        dataset: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "skyfeed=debug,info"
    } else {
        "skyfeed=info,warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match cli.command {
        Commands::Serve { port } => cmd_serve(port).await,
        Commands::Fetch { limit, json } => cmd_fetch(limit, json).await,
        Commands::Resolve { icao24, dataset } => cmd_resolve(&icao24, dataset).await,
        Commands::Download { force, dataset } => cmd_download(force, dataset).await,
    }
}

fn dataset_config(path: Option<PathBuf>) -> DatasetConfig {
    let env_config = ApiConfig::from_env();
    let config = DatasetConfig::with_url(env_config.dataset_url);
    match path {
        Some(path) => config.at_path(path),
        None => config.at_path(env_config.dataset_path),
    }
}

/// Run the API server
async fn cmd_serve(port: Option<u16>) -> Result<()> {
    let mut config = ApiConfig::from_env();
    if let Some(port) = port {
        config.port = port;
    }
    let port = config.port;

    println!("{} {}", "Serving flights on port".cyan().bold(), port);

    let server = ApiServer::new(config);
    server
        .run(([0, 0, 0, 0], port))
        .await
        .context("Server failed")?;

    Ok(())
}

/// Fetch one snapshot through the full pipeline and print it
async fn cmd_fetch(limit: usize, json: bool) -> Result<()> {
    let env_config = ApiConfig::from_env();

    let reference = Arc::new(ReferenceDataset::new(dataset_config(None)));
    if let Err(e) = reference.load().await {
        eprintln!(
            "{} {}",
            "Reference dataset unavailable, types will be Unknown:".yellow(),
            e
        );
    }

    let types = Arc::new(TypeCache::new(reference));
    let client = OpenSkyClient::with_config(
        UpstreamConfig::with_url(env_config.upstream_url).limit(limit),
    );
    let feed = FlightFeed::new(client, types);

    let snapshot = feed
        .fetch_snapshot()
        .await
        .context("Failed to fetch flight snapshot")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&snapshot.flights)?);
        return Ok(());
    }

    println!(
        "{} {} {}",
        "Fetched".green().bold(),
        snapshot.len(),
        format!("flights at {}", snapshot.fetched_at).dimmed()
    );
    for flight in &snapshot.flights {
        println!(
            "   {:>8}  {:<10} {:<8} {:>9.4} {:>9.4}  {}",
            flight.icao24,
            flight.callsign,
            flight.aircraft_type,
            flight.latitude,
            flight.longitude,
            flight.origin_country.clone().dimmed()
        );
    }

    Ok(())
}

/// Resolve a single identifier against the reference dataset
async fn cmd_resolve(icao24: &str, dataset: Option<PathBuf>) -> Result<()> {
    println!("{} {}", "Resolving:".cyan().bold(), icao24);

    let reference = Arc::new(ReferenceDataset::new(dataset_config(dataset)));
    reference
        .load()
        .await
        .context("Failed to load reference dataset")?;

    let types = TypeCache::new(reference);
    let type_code = types.resolve(icao24);

    println!("{} {}", "Type:".green().bold(), type_code);
    Ok(())
}

/// Ensure the reference dataset exists locally
async fn cmd_download(force: bool, dataset: Option<PathBuf>) -> Result<()> {
    let config = dataset_config(dataset);

    if force && config.path.exists() {
        std::fs::remove_file(&config.path)
            .with_context(|| format!("Failed to remove '{}'", config.path.display()))?;
    }

    let path = ensure_available(&config)
        .await
        .context("Failed to download reference dataset")?;

    println!(
        "{} {}",
        "Reference dataset ready:".green().bold(),
        path.display()
    );
    Ok(())
}
