//! Important-link extraction: prominent navigation links, in order of
//! appearance, labeled by their visible anchor text.

use scraper::Html;
use shopsight_core::ImportantLink;

use crate::extract::Extraction;
use crate::html::{absolute_url, element_text, sel};

/// Anchor-text keywords that mark a link as important to shoppers.
const LINK_KEYWORDS: &[&str] = &["order", "track", "contact", "blog", "faq", "help", "support"];

pub(crate) fn extract(homepage: &str, base: &str) -> Extraction<Vec<ImportantLink>> {
    let doc = Html::parse_document(homepage);

    let mut links: Vec<ImportantLink> = Vec::new();
    for anchor in doc.select(&sel("a[href]")) {
        let label = element_text(anchor);
        if label.is_empty() {
            continue;
        }
        let lower = label.to_lowercase();
        if !LINK_KEYWORDS.iter().any(|kw| lower.contains(kw)) {
            continue;
        }
        let Some(url) = anchor
            .value()
            .attr("href")
            .and_then(|href| absolute_url(base, href))
        else {
            continue;
        };
        if links.iter().all(|l| l.url != url) {
            links.push(ImportantLink { label, url });
        }
    }

    Extraction::from_non_empty(links, Vec::is_empty)
}
