//! Canonical store-URL normalization.
//!
//! The canonical form is the origin only: scheme + host (+ non-default
//! port), no path, no trailing slash, no query. Two fetches of the same
//! store must map to the same identity regardless of the URL variant
//! supplied, so the canonical form is computed before anything else touches
//! the network.

use crate::error::FetchError;

/// Normalizes a raw storefront URL to its canonical identity.
///
/// `"example.com/collections/all?ref=x"`, `"http://example.com"`,
/// `"https://example.com/"` and `"https://example.com"` all canonicalize to
/// `"https://example.com"`: a bare host with no scheme is assumed to be
/// `https`, and plain `http` on the default port maps to the same identity
/// as `https`.
///
/// # Errors
///
/// Returns [`FetchError::InvalidUrl`] when the input cannot be parsed as an
/// absolute HTTP(S) URL with a host.
pub fn canonical_store_url(raw: &str) -> Result<String, FetchError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FetchError::InvalidUrl {
            url: raw.to_owned(),
            reason: "empty URL".to_owned(),
        });
    }

    let with_scheme = if trimmed.contains("://") {
        trimmed.to_owned()
    } else {
        format!("https://{trimmed}")
    };

    let url = reqwest::Url::parse(&with_scheme).map_err(|e| FetchError::InvalidUrl {
        url: raw.to_owned(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(FetchError::InvalidUrl {
            url: raw.to_owned(),
            reason: format!("unsupported scheme \"{}\"", url.scheme()),
        });
    }
    if url.host_str().is_none() {
        return Err(FetchError::InvalidUrl {
            url: raw.to_owned(),
            reason: "no host".to_owned(),
        });
    }

    // Origin serialization is exactly scheme://host[:port] with no trailing
    // slash, which is the identity form we store and compare.
    let origin = url.origin().ascii_serialization();

    // http and https on the default port are the same store; an explicit
    // port (local/test servers) keeps its scheme.
    if url.scheme() == "http" && url.port().is_none() {
        return Ok(origin.replacen("http://", "https://", 1));
    }
    Ok(origin)
}
