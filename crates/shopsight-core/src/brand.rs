//! Domain types for a single storefront extraction pass.
//!
//! A [`BrandContext`] is the aggregate result of one scrape of one
//! storefront. It is built once by the aggregator and never mutated
//! afterwards — a re-fetch produces a fresh value that replaces the old one
//! under the same canonical URL.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One insight category produced by an extractor.
///
/// Used as the key of [`BrandContext::category_status`] so callers can tell
/// "the store has no FAQ page" apart from "the FAQ extractor blew up".
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    ProductCatalog,
    HeroProducts,
    PrivacyPolicy,
    ReturnPolicy,
    Faqs,
    SocialHandles,
    ContactDetails,
    BrandText,
    ImportantLinks,
}

impl Category {
    /// All categories, in the order they appear in serialized output.
    pub const ALL: [Category; 9] = [
        Category::ProductCatalog,
        Category::HeroProducts,
        Category::PrivacyPolicy,
        Category::ReturnPolicy,
        Category::Faqs,
        Category::SocialHandles,
        Category::ContactDetails,
        Category::BrandText,
        Category::ImportantLinks,
    ];
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Category::ProductCatalog => "product_catalog",
            Category::HeroProducts => "hero_products",
            Category::PrivacyPolicy => "privacy_policy",
            Category::ReturnPolicy => "return_policy",
            Category::Faqs => "faqs",
            Category::SocialHandles => "social_handles",
            Category::ContactDetails => "contact_details",
            Category::BrandText => "brand_text",
            Category::ImportantLinks => "important_links",
        };
        write!(f, "{name}")
    }
}

/// Outcome of one extractor, as recorded in the aggregate result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryStatus {
    /// The extractor produced data.
    Found,
    /// The category genuinely is not present on this storefront.
    NotFound,
    /// The extractor failed (timeout, parse failure); data is absent.
    Error,
}

/// A social platform recognized by the social-handle extractor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Instagram,
    Facebook,
    Tiktok,
    Youtube,
    Twitter,
    Pinterest,
    Linkedin,
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Platform::Instagram => "instagram",
            Platform::Facebook => "facebook",
            Platform::Tiktok => "tiktok",
            Platform::Youtube => "youtube",
            Platform::Twitter => "twitter",
            Platform::Pinterest => "pinterest",
            Platform::Linkedin => "linkedin",
        };
        write!(f, "{name}")
    }
}

/// A social profile link found on the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialHandle {
    /// Full profile URL as linked from the storefront.
    pub url: String,
    /// Handle extracted from the URL path (e.g. `"drinkcann"`), when the
    /// URL shape allows it.
    pub handle: Option<String>,
}

/// A price as shown on the storefront.
///
/// Storefront endpoints return prices as decimal strings (e.g. `"12.99"`);
/// they are parsed into `Decimal` at normalization time so downstream
/// consumers never re-parse money values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// ISO 4217 currency code (e.g. `"USD"`).
    pub currency: String,
}

/// A product scraped from a storefront, either from the machine-readable
/// listing endpoint or from heuristic product-card scraping.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Store-assigned identifier, unique within one catalog. Numeric ids are
    /// stored as strings to avoid precision loss; fallback-scraped products
    /// carry a handle-derived id.
    pub id: String,
    pub title: String,
    /// Default-variant price, when one could be parsed.
    pub price: Option<Price>,
    /// Image URLs, primary first.
    pub images: Vec<String>,
    /// Canonical product-page URL, when derivable.
    pub url: Option<String>,
    /// Vendor / brand name as configured by the store.
    pub vendor: Option<String>,
    /// Whether at least one variant is currently purchasable.
    pub available: bool,
}

impl Product {
    /// Returns the primary image URL, if the product has any images.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// A question/answer pair, in the order encountered on the source page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaPair {
    pub question: String,
    pub answer: String,
}

/// Emails and phone numbers scraped from contact/about pages and the
/// homepage. Sets, so repeated footer mentions collapse to one entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetails {
    pub emails: BTreeSet<String>,
    pub phones: BTreeSet<String>,
}

impl ContactDetails {
    /// Returns `true` when neither emails nor phone numbers were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.emails.is_empty() && self.phones.is_empty()
    }
}

/// A prominent navigation link, labeled by its visible anchor text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportantLink {
    pub label: String,
    pub url: String,
}

/// Aggregate structured result of one extraction pass over a storefront.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BrandContext {
    /// Canonical store URL: scheme+host, no trailing slash, no query.
    /// Identity key for upserts — two URL variants of the same store map to
    /// the same `store_url`.
    pub store_url: String,
    /// When this snapshot was taken.
    pub fetched_at: DateTime<Utc>,
    pub product_catalog: Vec<Product>,
    /// Products highlighted in the homepage's primary layout regions.
    pub hero_products: Vec<Product>,
    pub privacy_policy: Option<String>,
    pub return_policy: Option<String>,
    pub faqs: Vec<QaPair>,
    pub social_handles: BTreeMap<Platform, SocialHandle>,
    pub contact_details: ContactDetails,
    pub brand_text: Option<String>,
    pub important_links: Vec<ImportantLink>,
    /// Per-category outcome; every [`Category`] has an entry.
    pub category_status: BTreeMap<Category, CategoryStatus>,
}

impl BrandContext {
    /// Creates an empty context for `store_url` with every category marked
    /// [`CategoryStatus::NotFound`]. The aggregator overwrites entries as
    /// extractors report back.
    #[must_use]
    pub fn empty(store_url: String, fetched_at: DateTime<Utc>) -> Self {
        let category_status = Category::ALL
            .into_iter()
            .map(|c| (c, CategoryStatus::NotFound))
            .collect();
        Self {
            store_url,
            fetched_at,
            product_catalog: Vec::new(),
            hero_products: Vec::new(),
            privacy_policy: None,
            return_policy: None,
            faqs: Vec::new(),
            social_handles: BTreeMap::new(),
            contact_details: ContactDetails::default(),
            brand_text: None,
            important_links: Vec::new(),
            category_status,
        }
    }

    /// Returns the categories that produced data in this pass.
    #[must_use]
    pub fn found_categories(&self) -> Vec<Category> {
        self.category_status
            .iter()
            .filter(|(_, s)| **s == CategoryStatus::Found)
            .map(|(c, _)| *c)
            .collect()
    }

    /// Returns `true` if any extractor ended in [`CategoryStatus::Error`].
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.category_status
            .values()
            .any(|s| *s == CategoryStatus::Error)
    }
}

/// Competitor storefronts discovered from one seed brand.
///
/// References the seed by canonical URL only; each discovered context is
/// independently owned. Contains neither the seed URL nor duplicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompetitorSet {
    pub seed_url: String,
    pub competitors: Vec<BrandContext>,
}

impl CompetitorSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.competitors.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.competitors.is_empty()
    }
}
