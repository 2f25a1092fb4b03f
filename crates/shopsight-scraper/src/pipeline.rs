//! Top-level inbound operations: fetch insights for one storefront, or
//! discover competitors for it. Both wire the aggregator to the result
//! sink; these are the functions the surrounding API layer calls.

use shopsight_core::{BrandContext, CompetitorSet};
use tokio_util::sync::CancellationToken;

use crate::aggregate::Aggregator;
use crate::discover::{CompetitorDiscovery, SearchProvider};
use crate::error::FetchError;
use crate::sink::InsightsSink;

/// Fetches a storefront's brand context and upserts it into the sink.
///
/// A sink failure is logged but does not void the scrape — the context is
/// still returned to the caller. No sink write happens for a failed or
/// cancelled fetch.
///
/// # Errors
///
/// Propagates [`FetchError`] only for the base storefront itself
/// (unreachable, bad status, invalid URL, cancelled).
pub async fn fetch_insights<S: InsightsSink>(
    aggregator: &Aggregator,
    sink: &S,
    storefront_url: &str,
    cancel: &CancellationToken,
) -> Result<BrandContext, FetchError> {
    let ctx = aggregator.aggregate(storefront_url, cancel).await?;
    if let Err(e) = sink.upsert(&ctx).await {
        tracing::error!(store = %ctx.store_url, error = %e, "sink upsert failed");
    }
    Ok(ctx)
}

/// Fetches the seed storefront, then discovers and aggregates up to
/// `max_count` competitors, upserting the seed and every competitor.
///
/// # Errors
///
/// Propagates [`FetchError`] for the seed fetch and for cancellation;
/// individual competitor failures are skipped inside discovery.
pub async fn discover_competitors<S: InsightsSink, P: SearchProvider>(
    aggregator: &Aggregator,
    search: &P,
    sink: &S,
    storefront_url: &str,
    max_count: usize,
    cancel: &CancellationToken,
) -> Result<CompetitorSet, FetchError> {
    let seed = fetch_insights(aggregator, sink, storefront_url, cancel).await?;

    let discovery = CompetitorDiscovery::new(aggregator, search);
    let set = discovery.discover(&seed, max_count, cancel).await?;

    for ctx in &set.competitors {
        if let Err(e) = sink.upsert(ctx).await {
            tracing::error!(store = %ctx.store_url, error = %e, "sink upsert failed for competitor");
        }
    }
    Ok(set)
}
