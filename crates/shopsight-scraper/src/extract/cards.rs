//! Heuristic product-card scraping shared by the catalog fallback and the
//! hero-product extractor.
//!
//! A "card" is any anchor whose href points at a product page. The product
//! handle doubles as the id, so fallback-scraped catalogs keep the
//! unique-id invariant without the listing endpoint.

use scraper::ElementRef;
use shopsight_core::Product;

use crate::html::{absolute_url, element_text, sel};

/// Scrapes product cards inside `scope`, deduplicated by handle, capped at
/// `cap` entries. Order follows document order.
pub(super) fn products_in(scope: ElementRef<'_>, base: &str, cap: usize) -> Vec<Product> {
    let anchor_sel = sel("a[href*='/products/']");
    let img_sel = sel("img");

    let mut products: Vec<Product> = Vec::new();
    for anchor in scope.select(&anchor_sel) {
        if products.len() >= cap {
            break;
        }
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Some(handle) = product_handle(href) else {
            continue;
        };
        if products.iter().any(|p| p.id == handle) {
            continue;
        }

        let image = anchor
            .select(&img_sel)
            .next()
            .and_then(|img| img.value().attr("src").or_else(|| img.value().attr("data-src")))
            .and_then(|src| absolute_url(base, src));

        let title = {
            let text = element_text(anchor);
            if text.is_empty() {
                anchor
                    .select(&img_sel)
                    .next()
                    .and_then(|img| img.value().attr("alt"))
                    .map(str::trim)
                    .filter(|alt| !alt.is_empty())
                    .map(str::to_owned)
            } else {
                Some(text)
            }
        };
        let Some(title) = title else {
            continue; // anchor carries no usable name
        };

        products.push(Product {
            id: handle.clone(),
            title,
            price: None,
            images: image.into_iter().collect(),
            url: absolute_url(base, href),
            vendor: None,
            // Card markup carries no stock signal; assume purchasable.
            available: true,
        });
    }

    products
}

/// Extracts the product handle (URL slug) from an href containing
/// `/products/`.
fn product_handle(href: &str) -> Option<String> {
    let after = &href[href.find("/products/")? + "/products/".len()..];
    let handle: &str = after
        .split(['?', '#', '/'])
        .next()
        .unwrap_or_default();
    if handle.is_empty() {
        None
    } else {
        Some(handle.to_owned())
    }
}
