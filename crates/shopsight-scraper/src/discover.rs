//! Competitor discovery: search for related storefronts and run the same
//! extraction pipeline over each candidate.
//!
//! The search engine is an external collaborator consumed only through the
//! [`SearchProvider`] interface; result order is treated as a relevance hint
//! and nothing more. Candidates are canonicalized, deduplicated against the
//! seed and each other, capped, and aggregated sequentially until enough
//! competitors have been collected or the list runs out.

use std::collections::HashSet;

use async_trait::async_trait;
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use regex::Regex;
use shopsight_core::{BrandContext, CompetitorSet};
use tokio_util::sync::CancellationToken;

use crate::aggregate::Aggregator;
use crate::canonical::canonical_store_url;
use crate::client::Fetcher;
use crate::error::FetchError;

/// `search(query, limit)` returning candidate URLs, earlier = more relevant.
#[async_trait]
pub trait SearchProvider: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, FetchError>;
}

/// Derives the discovery query from the seed's brand signals: the store
/// host, sharpened with a vendor name from the catalog when one exists.
#[must_use]
pub fn competitor_query(seed: &BrandContext) -> String {
    let host = reqwest::Url::parse(&seed.store_url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_owned))
        .unwrap_or_else(|| seed.store_url.clone());

    match seed
        .product_catalog
        .iter()
        .find_map(|p| p.vendor.as_deref())
    {
        Some(vendor) => format!("sites like {host} {vendor} competitors"),
        None => format!("sites like {host} competitors"),
    }
}

pub struct CompetitorDiscovery<'a, S> {
    aggregator: &'a Aggregator,
    search: &'a S,
}

impl<'a, S: SearchProvider> CompetitorDiscovery<'a, S> {
    #[must_use]
    pub fn new(aggregator: &'a Aggregator, search: &'a S) -> Self {
        Self { aggregator, search }
    }

    /// Discovers up to `max_count` competitor storefronts for `seed`.
    ///
    /// A candidate whose base fetch fails is skipped without counting
    /// against `max_count`; returning fewer than `max_count` competitors is
    /// a normal outcome, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Cancelled`] only — every other failure is
    /// candidate-local and skipped.
    pub async fn discover(
        &self,
        seed: &BrandContext,
        max_count: usize,
        cancel: &CancellationToken,
    ) -> Result<CompetitorSet, FetchError> {
        let query = competitor_query(seed);
        let limit = self.aggregator.config().search_max_candidates;

        let candidates = match self.search.search(&query, limit).await {
            Ok(urls) => urls,
            Err(e) => {
                tracing::warn!(query, error = %e, "search collaborator failed; no candidates");
                Vec::new()
            }
        };
        tracing::info!(query, candidates = candidates.len(), max_count, "competitor discovery started");

        let mut seen: HashSet<String> = HashSet::new();
        seen.insert(seed.store_url.clone());

        let mut competitors: Vec<BrandContext> = Vec::new();
        for candidate in candidates.into_iter().take(limit) {
            if competitors.len() >= max_count {
                break;
            }
            if cancel.is_cancelled() {
                return Err(FetchError::Cancelled);
            }

            let Ok(canonical) = canonical_store_url(&candidate) else {
                tracing::debug!(candidate, "candidate URL does not canonicalize, skipping");
                continue;
            };
            if !seen.insert(canonical.clone()) {
                continue; // seed or duplicate
            }

            match self.aggregator.aggregate(&canonical, cancel).await {
                Ok(ctx) => competitors.push(ctx),
                Err(FetchError::Cancelled) => return Err(FetchError::Cancelled),
                Err(e) => {
                    tracing::debug!(candidate = canonical, error = %e, "candidate unreachable, skipping");
                }
            }
        }

        tracing::info!(
            seed = %seed.store_url,
            collected = competitors.len(),
            "competitor discovery finished"
        );
        Ok(CompetitorSet {
            seed_url: seed.store_url.clone(),
            competitors,
        })
    }
}

/// DuckDuckGo's HTML endpoint as a [`SearchProvider`]. Public pages only, no
/// API key.
pub struct DuckDuckGoSearch<'a> {
    fetcher: &'a Fetcher,
}

impl<'a> DuckDuckGoSearch<'a> {
    #[must_use]
    pub fn new(fetcher: &'a Fetcher) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoSearch<'_> {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>, FetchError> {
        let encoded = utf8_percent_encode(query, NON_ALPHANUMERIC).to_string();
        let url = format!("https://duckduckgo.com/html/?q={encoded}");
        let page = self.fetcher.get(&url).await?;
        Ok(extract_result_urls(&page.body, limit))
    }
}

/// Pulls external result URLs out of a search result page, preserving order.
fn extract_result_urls(html: &str, limit: usize) -> Vec<String> {
    let re = Regex::new(r#"(?i)href\s*=\s*["'](https?://[^"']+)["']"#).expect("valid href regex");

    let mut urls = Vec::new();
    for cap in re.captures_iter(html) {
        if urls.len() >= limit {
            break;
        }
        let Some(url) = cap.get(1).map(|m| m.as_str().to_owned()) else {
            continue;
        };
        // Skip engine-internal links; only external candidates matter.
        let is_internal = reqwest::Url::parse(&url)
            .ok()
            .and_then(|u| u.host_str().map(|h| h.contains("duckduckgo.com")))
            .unwrap_or(true);
        if is_internal {
            continue;
        }
        if !urls.contains(&url) {
            urls.push(url);
        }
    }
    urls
}
