//! Command-line recommendation runner.
//!
//! Resolves a region (or a drawn polygon) into places using the Kakao Local
//! API and prints the recommendation as JSON on stdout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use tripscout::config::Config;
use tripscout::kakao::KakaoClient;
use tripscout::models::{Category, Filter, Polygon};
use tripscout::search::{SearchOrchestrator, SearchRequest};

#[derive(Parser, Debug)]
#[command(name = "recommend")]
#[command(about = "Recommend travel places for a region or area")]
struct Args {
    /// Free-text region, e.g. "부산" or "부산 해운대"
    #[arg(short, long, default_value = "")]
    region: String,

    /// Comma-separated categories (FOOD, CAFE, CULTURE, ...)
    #[arg(short, long, value_delimiter = ',')]
    categories: Vec<Category>,

    /// JSON file with polygon vertices ([{"lat": .., "lng": ..}, ...])
    #[arg(long)]
    polygon: Option<PathBuf>,

    /// TOML config file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Kakao REST API key (overrides the config and environment)
    #[arg(long)]
    api_key: Option<String>,

    /// Cap on the number of places returned
    #[arg(long)]
    limit: Option<usize>,
}

fn load_polygon(path: &Path) -> Result<Polygon> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read polygon file {}", path.display()))?;
    let polygon: Polygon =
        serde_json::from_str(&content).context("Failed to parse polygon file")?;
    Ok(polygon)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };
    if let Some(limit) = args.limit {
        config.search.total_cap = Some(limit);
    }

    let api_key = match args.api_key {
        Some(key) => key,
        None => config.provider.api_key()?,
    };

    info!("Using place provider at {}", config.provider.base_url);
    let client = KakaoClient::new(&config.provider.base_url, &api_key, config.provider.timeout())
        .context("Failed to build provider client")?;

    let orchestrator = SearchOrchestrator::new(Arc::new(client), config.search);

    let filter = Filter::new(args.region, args.categories);
    let request = match &args.polygon {
        Some(path) => SearchRequest::polygon(filter, load_polygon(path)?),
        None => SearchRequest::region(filter),
    };

    let result = orchestrator.recommend(&request).await;
    info!(
        "{} places, {} top picks",
        result.places.len(),
        result.top_picks.len()
    );

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}
