//! Privacy and return/refund policy extraction.
//!
//! Probes the standard policy paths first, then falls back to pages the
//! sitemap labels as policy-like. Extracted text is the page's main content
//! with navigation boilerplate stripped; anything shorter than
//! [`MIN_POLICY_LEN`] is treated as not present.

use crate::client::Fetcher;
use crate::extract::Extraction;
use crate::html::main_text;
use crate::probe::{matching_sitemap_pages, probe_first};

/// A policy page shorter than this is a stub or a soft 404, not a policy.
const MIN_POLICY_LEN: usize = 120;

/// How many sitemap-suggested pages to try after the fixed paths miss.
const MAX_SITEMAP_CANDIDATES: usize = 3;

#[derive(Debug, Clone, Copy)]
pub(crate) enum PolicyKind {
    Privacy,
    Refund,
}

impl PolicyKind {
    fn paths(self) -> &'static [&'static str] {
        match self {
            PolicyKind::Privacy => &[
                "/policies/privacy-policy",
                "/pages/privacy-policy",
                "/privacy-policy",
                "/pages/privacy",
            ],
            PolicyKind::Refund => &[
                "/policies/refund-policy",
                "/pages/refund-policy",
                "/policies/return-policy",
                "/pages/return-policy",
                "/refund-policy",
                "/pages/returns",
            ],
        }
    }

    fn sitemap_keywords(self) -> &'static [&'static str] {
        match self {
            PolicyKind::Privacy => &["privacy"],
            PolicyKind::Refund => &["refund", "return"],
        }
    }
}

pub(crate) async fn extract(
    fetcher: &Fetcher,
    base: &str,
    kind: PolicyKind,
    sitemap: &[String],
) -> Extraction<String> {
    if let Some((url, body)) = probe_first(fetcher, base, kind.paths()).await {
        if let Some(text) = policy_text(&body) {
            tracing::debug!(url, "policy text extracted from standard path");
            return Extraction::Found(text);
        }
    }

    for url in matching_sitemap_pages(sitemap, kind.sitemap_keywords())
        .into_iter()
        .take(MAX_SITEMAP_CANDIDATES)
    {
        let Ok(page) = fetcher.get(url).await else {
            continue;
        };
        if let Some(text) = policy_text(&page.body) {
            tracing::debug!(url, "policy text extracted from sitemap-suggested page");
            return Extraction::Found(text);
        }
    }

    Extraction::NotFound
}

fn policy_text(html: &str) -> Option<String> {
    let text = main_text(html);
    if text.len() < MIN_POLICY_LEN {
        None
    } else {
        Some(text)
    }
}
