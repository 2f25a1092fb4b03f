//! Brand-text extraction: a short "about" description of the store.
//!
//! The homepage meta description is the preferred source; when a store has
//! none, the first substantial paragraph of an about page is used instead.

use scraper::Html;

use crate::client::Fetcher;
use crate::extract::Extraction;
use crate::html::{element_text, meta_description, sel};
use crate::probe::probe_first;

const ABOUT_PATHS: &[&str] = &["/pages/about", "/pages/about-us", "/about", "/pages/our-story"];

/// A paragraph shorter than this is a caption or a button label, not brand
/// copy.
const MIN_PARAGRAPH_LEN: usize = 80;

pub(crate) async fn extract(
    fetcher: &Fetcher,
    base: &str,
    homepage: &str,
) -> Extraction<String> {
    if let Some(description) = meta_description(homepage) {
        return Extraction::Found(description);
    }

    if let Some((url, body)) = probe_first(fetcher, base, ABOUT_PATHS).await {
        if let Some(paragraph) = first_substantial_paragraph(&body) {
            tracing::debug!(url, "brand text taken from about page");
            return Extraction::Found(paragraph);
        }
    }

    Extraction::NotFound
}

fn first_substantial_paragraph(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    doc.select(&sel("p"))
        .map(element_text)
        .find(|text| text.len() >= MIN_PARAGRAPH_LEN)
}
