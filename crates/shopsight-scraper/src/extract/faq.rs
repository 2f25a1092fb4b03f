//! FAQ extraction.
//!
//! Candidate pages come from three sources, in order: the standard FAQ
//! paths, homepage/footer links whose anchor text looks FAQ-like, and
//! sitemap pages mentioning "faq". Each candidate page is parsed with an
//! explicit strategy chain: structured accordion markup first, then the
//! heading-followed-by-paragraph pattern. The first page that yields pairs
//! wins; source order of pairs is preserved.

use regex::Regex;
use scraper::{ElementRef, Html};
use shopsight_core::QaPair;

use crate::client::Fetcher;
use crate::extract::Extraction;
use crate::html::{absolute_url, element_text, sel};
use crate::probe::{matching_sitemap_pages, probe_first};

const FAQ_PATHS: &[&str] = &[
    "/pages/faq",
    "/pages/faqs",
    "/faq",
    "/faqs",
    "/pages/help",
    "/pages/support",
];

/// Extra candidate pages fetched beyond the fixed path probe.
const MAX_LINKED_CANDIDATES: usize = 3;

/// How a page's FAQ content was recognized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    StructuredMarkup,
    HeadingPattern,
}

pub(crate) async fn extract(
    fetcher: &Fetcher,
    base: &str,
    homepage: &str,
    sitemap: &[String],
) -> Extraction<Vec<QaPair>> {
    if let Some((url, body)) = probe_first(fetcher, base, FAQ_PATHS).await {
        if let Some((faqs, strategy)) = parse_faqs(&body) {
            tracing::debug!(url, ?strategy, count = faqs.len(), "faqs parsed");
            return Extraction::Found(faqs);
        }
    }

    let mut candidates = faq_links(homepage, base);
    for url in matching_sitemap_pages(sitemap, &["faq"]) {
        if !candidates.iter().any(|c| c == url) {
            candidates.push(url.to_owned());
        }
    }

    for url in candidates.into_iter().take(MAX_LINKED_CANDIDATES) {
        let Ok(page) = fetcher.get(&url).await else {
            continue;
        };
        if let Some((faqs, strategy)) = parse_faqs(&page.body) {
            tracing::debug!(url, ?strategy, count = faqs.len(), "faqs parsed from linked page");
            return Extraction::Found(faqs);
        }
    }

    Extraction::NotFound
}

/// Homepage/footer links whose visible text looks like a FAQ destination.
fn faq_links(homepage: &str, base: &str) -> Vec<String> {
    let re = Regex::new(r"(?i)\b(faqs?|help|support|questions)\b").expect("valid faq-link regex");
    let doc = Html::parse_document(homepage);

    let mut links = Vec::new();
    for anchor in doc.select(&sel("a[href]")) {
        if !re.is_match(&element_text(anchor)) {
            continue;
        }
        let Some(url) = anchor
            .value()
            .attr("href")
            .and_then(|href| absolute_url(base, href))
        else {
            continue;
        };
        if !links.contains(&url) {
            links.push(url);
        }
    }
    links
}

fn parse_faqs(html: &str) -> Option<(Vec<QaPair>, Strategy)> {
    let doc = Html::parse_document(html);

    let structured = structured_faqs(&doc);
    if !structured.is_empty() {
        return Some((structured, Strategy::StructuredMarkup));
    }

    let by_heading = heading_faqs(&doc);
    if by_heading.is_empty() {
        None
    } else {
        Some((by_heading, Strategy::HeadingPattern))
    }
}

/// Accordion-style markup: `<details><summary>` blocks and `.faq` /
/// `.faq-item` / accordion containers with question/answer children.
fn structured_faqs(doc: &Html) -> Vec<QaPair> {
    let mut faqs = Vec::new();

    for details in doc.select(&sel("details")) {
        let Some(summary) = details.select(&sel("summary")).next() else {
            continue;
        };
        let question = element_text(summary);
        let full = element_text(details);
        let answer = full
            .strip_prefix(question.as_str())
            .unwrap_or(full.as_str())
            .trim()
            .to_owned();
        push_pair(&mut faqs, question, answer);
    }

    for item in doc.select(&sel(".faq, .faq-item, [class*='accordion__item']")) {
        let question = item
            .select(&sel("h2, h3, h4, strong, [class*='question']"))
            .next()
            .map(element_text);
        let answer = item
            .select(&sel("[class*='answer'], p"))
            .next()
            .map(element_text);
        if let (Some(q), Some(a)) = (question, answer) {
            push_pair(&mut faqs, q, a);
        }
    }

    faqs
}

/// Fallback pattern: an `h2`/`h3` question followed by a paragraph answer.
fn heading_faqs(doc: &Html) -> Vec<QaPair> {
    let mut faqs = Vec::new();
    for heading in doc.select(&sel("h2, h3")) {
        let Some(paragraph) = next_paragraph(heading) else {
            continue;
        };
        push_pair(&mut faqs, element_text(heading), element_text(paragraph));
    }
    faqs
}

/// First `<p>` element sibling following `el`.
fn next_paragraph<'a>(el: ElementRef<'a>) -> Option<ElementRef<'a>> {
    el.next_siblings()
        .filter_map(ElementRef::wrap)
        .find(|sib| sib.value().name() == "p")
}

fn push_pair(faqs: &mut Vec<QaPair>, question: String, answer: String) {
    if question.is_empty() || answer.is_empty() || question == answer {
        return;
    }
    if faqs.iter().any(|f| f.question == question) {
        return;
    }
    faqs.push(QaPair { question, answer });
}
