use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gamepricer_core::{
    load_catalog, load_config, validate_config, BatchRunner, Config, HttpFetcher, ItemStatus,
    PageFetcher,
};

/// Estimate resale value for a game catalog.
#[derive(Debug, Parser)]
#[command(name = "gamepricer", version)]
struct Args {
    /// Catalog CSV with columns: name, system, box, manual
    catalog: PathBuf,

    /// Configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Where to write the CSV report
    #[arg(short, long, default_value = "report.csv")]
    output: PathBuf,

    /// Also write a JSON report to this path
    #[arg(long)]
    json: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    // Load configuration; a missing file just means defaults.
    let config = if args.config.exists() {
        info!("Loading configuration from {:?}", args.config);
        load_config(&args.config)
            .with_context(|| format!("Failed to load config from {:?}", args.config))?
    } else {
        info!("No config file at {:?}, using defaults", args.config);
        Config::default()
    };

    validate_config(&config).context("Configuration validation failed")?;
    info!("Pricing source: {}", config.source.base_url);

    // Load the catalog
    let entries = load_catalog(&args.catalog)
        .with_context(|| format!("Failed to load catalog from {:?}", args.catalog))?;
    info!("Loaded {} catalog entries", entries.len());

    // Run the batch
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new(&config.source));
    let runner = BatchRunner::new(config, fetcher);
    let items = runner.run(&entries).await;

    let ok = items.iter().filter(|i| i.status == ItemStatus::Ok).count();
    let total: f64 = items.iter().map(|i| i.estimated_value).sum();
    info!("Valued {}/{} entries, total {:.2}", ok, items.len(), total);

    // Write reports
    gamepricer_core::write_csv_report_to_path(&args.output, &items)
        .with_context(|| format!("Failed to write report to {:?}", args.output))?;
    info!("Report written to {:?}", args.output);

    if let Some(json_path) = &args.json {
        gamepricer_core::write_json_report_to_path(json_path, &items)
            .with_context(|| format!("Failed to write JSON report to {:?}", json_path))?;
        info!("JSON report written to {:?}", json_path);
    }

    Ok(())
}
