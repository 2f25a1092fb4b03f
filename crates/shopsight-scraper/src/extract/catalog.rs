//! Product-catalog extraction.
//!
//! Prefers the machine-readable listing endpoint (`/products.json` with
//! cursor pagination); when the endpoint is missing or malformed, falls back
//! to scraping product cards from collection pages. Either way the catalog
//! is capped at the configured maximum and ids are unique.

use std::collections::HashSet;
use std::time::Duration;

use scraper::Html;
use shopsight_core::{AppConfig, Product};

use crate::client::Fetcher;
use crate::error::{ExtractError, FetchError};
use crate::extract::{cards, Extraction};
use crate::normalize::normalize_product;
use crate::pagination::next_page_cursor;
use crate::probe::probe_first;
use crate::types::ListingResponse;

/// Guard against cycling pagination cursors.
const MAX_PAGES: usize = 200;

/// Collection pages tried when the listing endpoint is unavailable.
const FALLBACK_PATHS: &[&str] = &["/collections/all", "/collections/frontpage", "/"];

enum ListingError {
    Fetch(FetchError),
    Parse(String),
}

pub(crate) async fn extract(
    fetcher: &Fetcher,
    base: &str,
    config: &AppConfig,
) -> Extraction<Vec<Product>> {
    let listing_err = match listing_products(fetcher, base, config).await {
        Ok(products) => {
            return Extraction::from_non_empty(products, Vec::is_empty);
        }
        Err(e) => e,
    };

    match &listing_err {
        ListingError::Fetch(e) => {
            tracing::debug!(base, error = %e, "listing endpoint unavailable, scraping collection pages");
        }
        ListingError::Parse(reason) => {
            tracing::debug!(base, reason, "listing endpoint returned non-catalog body, scraping collection pages");
        }
    }

    if let Some(products) = fallback_products(fetcher, base, config.catalog_max_products).await {
        if !products.is_empty() {
            return Extraction::Found(products);
        }
    }

    // Fallback found nothing; a malformed endpoint is a parse failure, a
    // missing one is a genuinely catalog-less storefront.
    match listing_err {
        ListingError::Parse(reason) => Extraction::Failed(ExtractError::Parse(reason)),
        ListingError::Fetch(_) => Extraction::NotFound,
    }
}

/// Pages through the listing endpoint, normalizing and deduplicating as it
/// goes. Stops at the catalog cap, the last page, or [`MAX_PAGES`].
async fn listing_products(
    fetcher: &Fetcher,
    base: &str,
    config: &AppConfig,
) -> Result<Vec<Product>, ListingError> {
    let cap = config.catalog_max_products;
    let mut products: Vec<Product> = Vec::new();
    let mut seen_ids: HashSet<i64> = HashSet::new();
    let mut cursor: Option<String> = None;
    let mut is_first_page = true;

    for _ in 0..MAX_PAGES {
        if !is_first_page && config.inter_request_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(config.inter_request_delay_ms)).await;
        }
        is_first_page = false;

        let mut url = format!(
            "{base}/products.json?limit={}",
            config.products_page_size
        );
        if let Some(cursor) = &cursor {
            url.push_str("&page_info=");
            url.push_str(cursor);
        }

        let page = fetcher.get(&url).await.map_err(ListingError::Fetch)?;
        let parsed: ListingResponse = serde_json::from_str(&page.body)
            .map_err(|e| ListingError::Parse(format!("listing page from {base}: {e}")))?;

        for raw in parsed.products {
            if !seen_ids.insert(raw.id) {
                continue;
            }
            products.push(normalize_product(raw, base));
            if products.len() >= cap {
                tracing::debug!(base, cap, "catalog cap reached, stopping pagination");
                return Ok(products);
            }
        }

        cursor = next_page_cursor(page.link_header.as_deref());
        if cursor.is_none() {
            return Ok(products);
        }
    }

    tracing::warn!(base, max_pages = MAX_PAGES, "pagination did not terminate, returning what was collected");
    Ok(products)
}

/// Scrapes product cards from the first reachable fallback page.
async fn fallback_products(fetcher: &Fetcher, base: &str, cap: usize) -> Option<Vec<Product>> {
    let (url, body) = probe_first(fetcher, base, FALLBACK_PATHS).await?;
    tracing::debug!(url, "scraping product cards from fallback page");
    Some(scrape_cards(&body, base, cap))
}

fn scrape_cards(html: &str, base: &str, cap: usize) -> Vec<Product> {
    let doc = Html::parse_document(html);
    cards::products_in(doc.root_element(), base, cap)
}
