// Gapscout CLI entry point.
// Fetches the own site and its competitors, runs the gap analysis, and
// prints the report as JSON.

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gapscout_core::{BusinessContext, GapAnalyzer, HttpFetcher};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: gapscout-core <own-url> <competitor-url> [<competitor-url> ...]");
    }
    let own_url = &args[0];
    let competitor_urls = &args[1..];

    // Optional business context as JSON, e.g.
    // BUSINESS_CONTEXT='{"niche":"laser hair removal","services":["laser hair removal"]}'
    let context: Option<BusinessContext> = match std::env::var("BUSINESS_CONTEXT") {
        Ok(raw) => Some(
            serde_json::from_str(&raw).context("BUSINESS_CONTEXT is not valid JSON")?,
        ),
        Err(_) => None,
    };

    info!(own = %own_url, competitors = competitor_urls.len(), "starting keyword gap analysis");

    let fetcher = HttpFetcher::new()?;
    let analyzer = GapAnalyzer::new();
    let report = analyzer
        .run(&fetcher, own_url, competitor_urls, context.as_ref())
        .await;

    info!(
        gaps = report.total_gaps_found,
        quick_wins = report.quick_wins.len(),
        seconds = report.processing_time_seconds,
        "analysis complete"
    );

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
