//! Shared HTML helpers for the extractors.
//!
//! Pages are parsed with `scraper` (CSS selectors over a real DOM); the
//! helpers here cover the cross-cutting bits: URL resolution, whitespace
//! normalization, boilerplate-stripped text, and meta tags.
//!
//! `scraper::Html` is not `Send`, so parsing always happens inside
//! synchronous helpers that take `&str` and return owned data — no document
//! handle ever crosses an await point.

use regex::Regex;
use scraper::{ElementRef, Html, Selector};

/// Parses a CSS selector that is a compile-time constant.
///
/// Only ever called with literal selectors, so a parse failure is a
/// programming error.
pub(crate) fn sel(css: &str) -> Selector {
    Selector::parse(css).expect("valid CSS selector literal")
}

/// Collapses runs of whitespace (including newlines) into single spaces and
/// trims the ends.
#[must_use]
pub(crate) fn collapse_ws(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Whitespace-collapsed text content of an element and its descendants.
#[must_use]
pub(crate) fn element_text(el: ElementRef<'_>) -> String {
    collapse_ws(&el.text().collect::<Vec<_>>().join(" "))
}

/// Resolves `href` against `base`, returning an absolute http(s) URL.
///
/// Fragment-only, `mailto:`, `javascript:`, and `tel:` links resolve to
/// `None` — they are navigation chrome, not destinations.
#[must_use]
pub(crate) fn absolute_url(base: &str, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty()
        || href.starts_with('#')
        || href.starts_with("mailto:")
        || href.starts_with("javascript:")
        || href.starts_with("tel:")
    {
        return None;
    }
    let base_url = reqwest::Url::parse(base).ok()?;
    let resolved = base_url.join(href).ok()?;
    if !matches!(resolved.scheme(), "http" | "https") {
        return None;
    }
    Some(resolved.to_string())
}

/// Removes `<script>`, `<style>`, and `<noscript>` blocks from raw HTML so
/// their contents never leak into extracted text.
fn strip_inline_code(html: &str) -> String {
    let re = Regex::new(r"(?is)<(script|style|noscript)\b[^>]*>.*?</(script|style|noscript)>")
        .expect("valid tag-strip regex");
    re.replace_all(html, " ").into_owned()
}

/// Selectors tried, in order, to find a page's main content region.
/// Matching one of these naturally excludes nav/header/footer chrome.
const MAIN_CONTENT_SELECTORS: &[&str] = &[
    "main",
    "article",
    "[role='main']",
    ".shopify-policy__body",
    "#MainContent",
    ".rte",
    "#content",
    ".content",
];

/// Extracts the main textual content of a page, stripping scripts and, when
/// a recognizable content region exists, navigation boilerplate. Falls back
/// to full-body text when no content region matches.
#[must_use]
pub(crate) fn main_text(html: &str) -> String {
    let cleaned = strip_inline_code(html);
    let doc = Html::parse_document(&cleaned);

    for css in MAIN_CONTENT_SELECTORS {
        if let Some(el) = doc.select(&sel(css)).next() {
            let text = element_text(el);
            if !text.is_empty() {
                return text;
            }
        }
    }

    doc.select(&sel("body"))
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// Reads the page's description from `meta[name=description]`, falling back
/// to `meta[property='og:description']`.
#[must_use]
pub(crate) fn meta_description(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);
    for css in [
        "meta[name='description']",
        "meta[property='og:description']",
    ] {
        if let Some(content) = doc
            .select(&sel(css))
            .next()
            .and_then(|el| el.value().attr("content"))
        {
            let text = collapse_ws(content);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}
