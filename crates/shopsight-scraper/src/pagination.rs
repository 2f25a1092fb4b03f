//! Cursor pagination for the products listing endpoint.
//!
//! The listing endpoint paginates via the `Link` response header; the cursor
//! for the next page is carried as a `page_info` query parameter:
//!
//! ```text
//! <https://shop.com/products.json?limit=250&page_info=CURSOR>; rel="next"
//! ```

/// Extracts the `page_info` cursor for the next page from a `Link` header.
///
/// Returns `None` when the header is absent, carries no `rel="next"`
/// segment (last page), or the next URL has no `page_info` parameter.
#[must_use]
pub fn next_page_cursor(link_header: Option<&str>) -> Option<String> {
    let header = link_header?;

    for segment in header.split(',') {
        let segment = segment.trim();
        if !segment.contains(r#"rel="next""#) {
            continue;
        }

        let start = segment.find('<')? + 1;
        let end = segment.find('>')?;
        if start >= end {
            return None;
        }
        return query_param(&segment[start..end], "page_info");
    }

    None
}

/// Pulls a named query parameter out of a URL string. Cursors are
/// base64url-encoded, so no percent-decoding is needed.
fn query_param(url: &str, name: &str) -> Option<String> {
    let query = &url[url.find('?')? + 1..];
    let needle = format!("{name}=");
    query
        .split('&')
        .filter_map(|pair| pair.strip_prefix(needle.as_str()))
        .map(|value| value.split('#').next().unwrap_or(value))
        .find(|value| !value.is_empty())
        .map(str::to_owned)
}
