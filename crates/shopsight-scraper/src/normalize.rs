//! Normalization from raw listing-endpoint shapes to [`Product`].

use std::str::FromStr;

use rust_decimal::Decimal;
use shopsight_core::{Price, Product};

use crate::types::RawProduct;

/// The listing endpoint carries no currency field; storefronts in scope
/// price in USD, so normalized prices are tagged accordingly.
const DEFAULT_CURRENCY: &str = "USD";

/// Normalizes a raw listing-endpoint product into a [`Product`].
///
/// The default variant (position 1, falling back to the first variant)
/// supplies the price; a price string that does not parse as a decimal
/// yields `price: None` rather than dropping the product. Products with no
/// variants are kept as unavailable, price-less entries.
#[must_use]
pub fn normalize_product(raw: RawProduct, base_url: &str) -> Product {
    let url = Some(format!(
        "{}/products/{}",
        base_url.trim_end_matches('/'),
        raw.handle
    ));

    let has_position_data = raw.variants.iter().any(|v| v.position.is_some());
    let default_variant = raw
        .variants
        .iter()
        .enumerate()
        .find(|(idx, v)| {
            if has_position_data {
                v.position == Some(1)
            } else {
                *idx == 0
            }
        })
        .map(|(_, v)| v);

    let price = default_variant.and_then(|v| {
        Decimal::from_str(&v.price)
            .map(|amount| Price {
                amount,
                currency: DEFAULT_CURRENCY.to_owned(),
            })
            .map_err(|e| {
                tracing::debug!(
                    product_id = raw.id,
                    price = %v.price,
                    error = %e,
                    "unparseable price on default variant"
                );
            })
            .ok()
    });

    let available = raw.variants.iter().any(|v| v.available);

    Product {
        id: raw.id.to_string(),
        title: raw.title,
        price,
        images: raw.images.into_iter().map(|i| i.src).collect(),
        url,
        vendor: raw.vendor.filter(|v| !v.is_empty()),
        available,
    }
}
