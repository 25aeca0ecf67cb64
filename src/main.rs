use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use podtag::{default_registry, parse_feed_str, Config, ParseContext};

/// SEC-001: Maximum feed document size accepted from disk (10MB).
const MAX_FEED_SIZE: u64 = 10 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(
    name = "podtag",
    about = "Print the podcast namespace metadata of an RSS feed as JSON"
)]
struct Args {
    /// Feed XML file to parse
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Config file (defaults to ./podtag.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("podtag.toml"));
    let config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config: {}", config_path.display()))?
        .with_env_overrides();

    // RUST_LOG wins over the configured level
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(config.effective_log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let metadata = std::fs::metadata(&args.file)
        .with_context(|| format!("Failed to read feed file: {}", args.file.display()))?;
    if metadata.len() > MAX_FEED_SIZE {
        anyhow::bail!(
            "Feed file is {} bytes (max {} bytes)",
            metadata.len(),
            MAX_FEED_SIZE
        );
    }
    let xml = std::fs::read_to_string(&args.file)
        .with_context(|| format!("Failed to read feed file: {}", args.file.display()))?;

    let ctx = ParseContext::new(default_registry(), config.parse_options());
    let feed = parse_feed_str(&xml, &ctx)
        .with_context(|| format!("Failed to parse feed: {}", args.file.display()))?;

    tracing::info!(
        path = %args.file.display(),
        items = feed.items.len(),
        live_items = feed.podcast_live_items.as_ref().map_or(0, Vec::len),
        "Parsed feed"
    );

    let json = if args.pretty {
        serde_json::to_string_pretty(&feed)
    } else {
        serde_json::to_string(&feed)
    }
    .context("Failed to serialize feed")?;
    println!("{json}");

    Ok(())
}
