//! Social-handle extraction from homepage markup.
//!
//! Scans anchors for known social-platform hosts and normalizes each hit to
//! a handle plus profile URL. A platform that is not linked is simply
//! omitted from the mapping; that is not an error.

use std::collections::BTreeMap;

use scraper::Html;
use shopsight_core::{Platform, SocialHandle};

use crate::extract::Extraction;
use crate::html::{absolute_url, sel};

/// Recognized platform hosts. Twitter is matched under both its old and new
/// domains.
const PLATFORM_HOSTS: &[(Platform, &[&str])] = &[
    (Platform::Instagram, &["instagram.com"]),
    (Platform::Facebook, &["facebook.com"]),
    (Platform::Tiktok, &["tiktok.com"]),
    (Platform::Youtube, &["youtube.com"]),
    (Platform::Twitter, &["twitter.com", "x.com"]),
    (Platform::Pinterest, &["pinterest.com"]),
    (Platform::Linkedin, &["linkedin.com"]),
];

/// Path prefixes that are routing, not handles (e.g. `youtube.com/channel/…`,
/// `linkedin.com/company/…`).
const ROUTING_SEGMENTS: &[&str] = &["channel", "user", "c", "company", "in", "pages"];

pub(crate) fn extract(homepage: &str, base: &str) -> Extraction<BTreeMap<Platform, SocialHandle>> {
    let doc = Html::parse_document(homepage);

    let mut handles: BTreeMap<Platform, SocialHandle> = BTreeMap::new();
    for anchor in doc.select(&sel("a[href]")) {
        let Some(url) = anchor
            .value()
            .attr("href")
            .and_then(|href| absolute_url(base, href))
        else {
            continue;
        };
        let Some(platform) = platform_of(&url) else {
            continue;
        };
        // First link per platform wins; headers tend to precede footers.
        handles
            .entry(platform)
            .or_insert_with(|| SocialHandle {
                handle: handle_from_url(&url),
                url,
            });
    }

    Extraction::from_non_empty(handles, BTreeMap::is_empty)
}

fn platform_of(url: &str) -> Option<Platform> {
    let host = reqwest::Url::parse(url).ok()?.host_str()?.to_lowercase();
    for (platform, hosts) in PLATFORM_HOSTS {
        if hosts
            .iter()
            .any(|h| host == *h || host.ends_with(&format!(".{h}")))
        {
            return Some(*platform);
        }
    }
    None
}

/// Pulls the handle out of a profile URL path, skipping routing segments and
/// stripping any `@` prefix.
fn handle_from_url(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let segments: Vec<&str> = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .collect();

    let candidate = match segments.as_slice() {
        [] => return None,
        [first, rest @ ..] if ROUTING_SEGMENTS.contains(first) => rest.first()?,
        [first, ..] => first,
    };

    let handle = candidate.trim_start_matches('@');
    if handle.is_empty() {
        None
    } else {
        Some(handle.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extract_map(html: &str) -> BTreeMap<Platform, SocialHandle> {
        match extract(html, "https://shop.com") {
            Extraction::Found(map) => map,
            other => panic!("expected Found, got {other:?}"),
        }
    }

    #[test]
    fn recognizes_enumerated_platforms() {
        let html = r#"<footer>
            <a href="https://www.instagram.com/drinkmate/">IG</a>
            <a href="https://x.com/drinkmate">X</a>
            <a href="https://www.youtube.com/channel/UCabc123">YT</a>
        </footer>"#;
        let map = extract_map(html);
        assert_eq!(map.len(), 3);
        assert_eq!(map[&Platform::Instagram].handle.as_deref(), Some("drinkmate"));
        assert_eq!(map[&Platform::Twitter].handle.as_deref(), Some("drinkmate"));
        assert_eq!(map[&Platform::Youtube].handle.as_deref(), Some("UCabc123"));
    }

    #[test]
    fn absent_platforms_are_omitted_not_errors() {
        let html = r#"<a href="https://www.pinterest.com/drinkmate/">Pins</a>"#;
        let map = extract_map(html);
        assert_eq!(map.len(), 1);
        assert!(!map.contains_key(&Platform::Facebook));
    }

    #[test]
    fn no_social_links_is_not_found() {
        assert!(matches!(
            extract("<a href='/pages/faq'>FAQ</a>", "https://shop.com"),
            Extraction::NotFound
        ));
    }

    #[test]
    fn first_link_per_platform_wins() {
        let html = r#"
            <a href="https://instagram.com/first">A</a>
            <a href="https://instagram.com/second">B</a>"#;
        let map = extract_map(html);
        assert_eq!(map[&Platform::Instagram].handle.as_deref(), Some("first"));
    }

    #[test]
    fn unrelated_hosts_do_not_match() {
        // "notfacebook.com" must not match the facebook.com pattern.
        let html = r#"<a href="https://notfacebook.com/x">n</a>"#;
        assert!(matches!(
            extract(html, "https://shop.com"),
            Extraction::NotFound
        ));
    }

    #[test]
    fn handle_from_url_strips_at_prefix() {
        assert_eq!(
            handle_from_url("https://www.tiktok.com/@drinkmate").as_deref(),
            Some("drinkmate")
        );
        assert!(handle_from_url("https://www.facebook.com/").is_none());
    }
}
