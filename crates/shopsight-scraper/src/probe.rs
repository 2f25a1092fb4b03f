//! Endpoint probing: locate the right page among known candidate paths.
//!
//! Storefronts mount the same content under slightly different paths
//! (`/pages/faq` vs `/faqs`, `/policies/refund-policy` vs
//! `/pages/refund-policy`). A probe walks an ordered candidate list and
//! returns the first body that answers 2xx. This list-and-first-success
//! policy is the fallback mechanism every page-discovery extractor reuses.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::client::Fetcher;

/// Upper bound on sitemap entries scanned, to keep huge catalogs cheap.
const MAX_SITEMAP_URLS: usize = 2000;

/// Tries each candidate path against `base` in order and returns the first
/// successful `(url, body)`.
///
/// Fetch failures on individual candidates are expected (that is the point
/// of probing) and logged at debug level only.
pub async fn probe_first(
    fetcher: &Fetcher,
    base: &str,
    paths: &[&str],
) -> Option<(String, String)> {
    for path in paths {
        let url = format!("{base}{path}");
        match fetcher.get(&url).await {
            Ok(page) => {
                tracing::debug!(url, "probe hit");
                return Some((url, page.body));
            }
            Err(e) => {
                tracing::debug!(url, error = %e, "probe miss");
            }
        }
    }
    None
}

/// Fetches `base`'s sitemap and returns the page URLs it lists, capped at
/// [`MAX_SITEMAP_URLS`]. Returns an empty list when there is no sitemap or
/// it does not parse — sitemap hints are strictly best-effort.
pub async fn sitemap_urls(fetcher: &Fetcher, base: &str) -> Vec<String> {
    let Some((_, body)) = probe_first(fetcher, base, &["/sitemap.xml"]).await else {
        return Vec::new();
    };
    parse_sitemap(&body)
}

/// Extracts `<loc>` entries from sitemap XML. Handles both urlsets and
/// sitemap indexes (the `<loc>` tag is the same in both).
fn parse_sitemap(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);

    let mut urls = Vec::new();
    let mut in_loc = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"loc" => in_loc = true,
            Ok(Event::End(e)) if e.name().as_ref() == b"loc" => in_loc = false,
            Ok(Event::Text(e)) if in_loc => {
                let loc = e.unescape().unwrap_or_default().trim().to_owned();
                if loc.starts_with("http") {
                    urls.push(loc);
                }
                if urls.len() >= MAX_SITEMAP_URLS {
                    break;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::debug!(error = %e, "sitemap XML did not parse cleanly");
                break;
            }
            _ => {}
        }
    }

    urls
}

/// Filters sitemap URLs down to those whose path mentions any of `keywords`
/// (case-insensitive), preserving sitemap order.
#[must_use]
pub fn matching_sitemap_pages<'a>(urls: &'a [String], keywords: &[&str]) -> Vec<&'a str> {
    urls.iter()
        .filter(|url| {
            let lower = url.to_lowercase();
            keywords.iter().any(|kw| lower.contains(kw))
        })
        .map(String::as_str)
        .collect()
}
