//! Command-line entry point for the brand-insights pipeline.
//!
//! `shopsight fetch <url>` scrapes one storefront; `shopsight competitors
//! <url>` additionally discovers competitor stores via web search. Results
//! print as JSON on stdout. Ctrl-C cancels in-flight work cleanly.

use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use shopsight_scraper::{Aggregator, DuckDuckGoSearch, MemorySink};

#[derive(Debug, Parser)]
#[command(name = "shopsight")]
#[command(about = "Extract structured brand context from e-commerce storefronts")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch brand insights for a single storefront URL.
    Fetch {
        /// Storefront URL (scheme optional, e.g. "examplestore.com").
        url: String,
    },
    /// Discover competitor storefronts and fetch insights for each.
    Competitors {
        /// Seed storefront URL.
        url: String,
        /// Maximum number of competitors to collect.
        #[arg(long)]
        max: Option<usize>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = shopsight_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone())),
        )
        .init();

    let cli = Cli::parse();
    let cancel = CancellationToken::new();
    let ctrl_c_cancel = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("ctrl-c received, cancelling");
            ctrl_c_cancel.cancel();
        }
    });

    let default_max = config.competitor_max_count;
    let aggregator = Aggregator::new(config)?;
    let sink = MemorySink::new();

    match cli.command {
        Commands::Fetch { url } => {
            let ctx =
                shopsight_scraper::fetch_insights(&aggregator, &sink, &url, &cancel).await?;
            println!("{}", serde_json::to_string_pretty(&ctx)?);
        }
        Commands::Competitors { url, max } => {
            let fetcher = shopsight_scraper::Fetcher::new(aggregator.config())?;
            let search = DuckDuckGoSearch::new(&fetcher);
            let set = shopsight_scraper::discover_competitors(
                &aggregator,
                &search,
                &sink,
                &url,
                max.unwrap_or(default_max),
                &cancel,
            )
            .await?;
            println!("{}", serde_json::to_string_pretty(&set)?);
        }
    }

    Ok(())
}
