//! Hero-product extraction from the storefront homepage.
//!
//! Hero products are distinguished structurally from the full catalog: only
//! product links inside recognized primary layout regions (hero banners,
//! featured collections, carousels) count. When the homepage has no such
//! region, the extractor reports `NotFound` rather than guessing.

use scraper::Html;
use shopsight_core::Product;

use crate::extract::{cards, Extraction};
use crate::html::sel;

/// Selectors for the primary layout regions themes use for highlighted
/// products.
const FEATURED_REGION_SELECTORS: &[&str] = &[
    "[class*='hero']",
    "[class*='featured']",
    "[class*='carousel']",
    "[class*='slider']",
    "[class*='best-sell']",
    "section[id*='featured']",
];

/// Hero products are a small highlighted subset, not a second catalog.
const MAX_HERO_PRODUCTS: usize = 24;

pub(crate) fn extract(homepage: &str, base: &str) -> Extraction<Vec<Product>> {
    let doc = Html::parse_document(homepage);

    let mut heroes: Vec<Product> = Vec::new();
    let mut saw_region = false;

    for css in FEATURED_REGION_SELECTORS {
        for region in doc.select(&sel(css)) {
            saw_region = true;
            for product in cards::products_in(region, base, MAX_HERO_PRODUCTS) {
                if heroes.len() >= MAX_HERO_PRODUCTS {
                    break;
                }
                if heroes.iter().all(|p| p.id != product.id) {
                    heroes.push(product);
                }
            }
        }
    }

    if !saw_region {
        tracing::debug!(base, "no recognizable featured region on homepage");
        return Extraction::NotFound;
    }

    Extraction::from_non_empty(heroes, Vec::is_empty)
}
