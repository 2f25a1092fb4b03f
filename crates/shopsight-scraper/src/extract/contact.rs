//! Contact-detail extraction: emails and phone numbers.
//!
//! Scans the homepage plus the first reachable contact page and about page,
//! matching email and phone patterns over the visible text and `mailto:`
//! hrefs. Results are sets, so repeated footer mentions collapse.

use regex::Regex;
use shopsight_core::ContactDetails;

use crate::client::Fetcher;
use crate::extract::Extraction;
use crate::html::main_text;
use crate::probe::probe_first;

const CONTACT_PATHS: &[&str] = &["/pages/contact", "/pages/contact-us", "/contact"];
const ABOUT_PATHS: &[&str] = &["/pages/about", "/pages/about-us", "/about"];

/// A phone match needs at least this many digits to count; shorter runs are
/// prices, quantities, or years.
const MIN_PHONE_DIGITS: usize = 7;

pub(crate) async fn extract(
    fetcher: &Fetcher,
    base: &str,
    homepage: &str,
) -> Extraction<ContactDetails> {
    let mut details = ContactDetails::default();
    scan_page(homepage, &mut details);

    for paths in [CONTACT_PATHS, ABOUT_PATHS] {
        if let Some((_, body)) = probe_first(fetcher, base, paths).await {
            scan_page(&body, &mut details);
        }
    }

    Extraction::from_non_empty(details, ContactDetails::is_empty)
}

/// Scans one page: the raw HTML for `mailto:` hrefs, the stripped main text
/// for email and phone patterns.
fn scan_page(html: &str, details: &mut ContactDetails) {
    let email_re =
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").expect("valid email regex");
    let mailto_re =
        Regex::new(r#"(?i)href\s*=\s*["']mailto:([^"'?]+)"#).expect("valid mailto regex");
    let phone_re = Regex::new(r"\+?\d[\d\s().\-]{5,}\d").expect("valid phone regex");
    // Copyright lines like "2015 - 2024" clear the digit floor but are not
    // phone numbers.
    let year_range_re =
        Regex::new(r"^(19|20)\d{2}\s*-\s*(19|20)\d{2}$").expect("valid year-range regex");

    for cap in mailto_re.captures_iter(html) {
        if let Some(m) = cap.get(1) {
            details.emails.insert(m.as_str().trim().to_lowercase());
        }
    }

    let text = main_text(html);
    for m in email_re.find_iter(&text) {
        details.emails.insert(m.as_str().to_lowercase());
    }
    for m in phone_re.find_iter(&text) {
        let candidate = m.as_str().trim();
        let digits = candidate.chars().filter(char::is_ascii_digit).count();
        if digits >= MIN_PHONE_DIGITS && !year_range_re.is_match(candidate) {
            details.phones.insert(candidate.to_owned());
        }
    }

    // Retina-image names like "logo@2x.png" pattern-match as emails; drop
    // anything that ends in an image extension.
    details
        .emails
        .retain(|e| !e.ends_with(".png") && !e.ends_with(".jpg") && !e.ends_with(".webp"));
}
