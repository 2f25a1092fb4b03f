//! Raw response types for the machine-readable product listing endpoint
//! (`GET /products.json`).
//!
//! Field shapes follow what live storefronts actually return rather than
//! any published schema: `available` may be absent on older stores and
//! defaults to `true`, and prices are decimal strings.

use serde::Deserialize;

/// Top-level response from `GET /products.json`.
#[derive(Debug, Deserialize)]
pub struct ListingResponse {
    pub products: Vec<RawProduct>,
}

/// A single product from the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct RawProduct {
    /// Store-assigned numeric product id.
    pub id: i64,

    pub title: String,

    /// URL slug for the product page (e.g. `"hibiscus-cooler-4-pack"`).
    pub handle: String,

    /// Vendor / brand name as configured by the store.
    #[serde(default)]
    pub vendor: Option<String>,

    /// Full image gallery, primary image first.
    #[serde(default)]
    pub images: Vec<RawImage>,

    /// Purchasable variants. May be empty on draft-like listings.
    #[serde(default)]
    pub variants: Vec<RawVariant>,
}

/// A purchasable variant of a [`RawProduct`].
#[derive(Debug, Deserialize)]
pub struct RawVariant {
    pub id: i64,

    /// Current price as a decimal string (e.g. `"24.00"`).
    pub price: String,

    /// In-stock flag; absent on some older stores, treated optimistically.
    #[serde(default = "default_available")]
    pub available: bool,

    /// 1-based position; `1` is the storefront-default variant.
    #[serde(default)]
    pub position: Option<i32>,
}

/// A product image.
#[derive(Debug, Deserialize)]
pub struct RawImage {
    /// Canonical CDN URL.
    pub src: String,
}

/// serde `default = "..."` needs a function path; `true` is intentional —
/// availability is assumed when the store omits the field.
fn default_available() -> bool {
    true
}
