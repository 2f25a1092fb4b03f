//! The aggregator: one storefront URL in, one [`BrandContext`] out.
//!
//! The input URL is canonicalized first, then the homepage fetch doubles as
//! the connectivity check — its failure is the only hard error. After that,
//! every extractor runs concurrently under a per-category timeout and the
//! outcomes are folded into the context. Extractors write disjoint fields,
//! so execution order never affects the result.

use chrono::Utc;
use shopsight_core::{AppConfig, BrandContext, Category, CategoryStatus};
use tokio_util::sync::CancellationToken;

use crate::canonical::canonical_store_url;
use crate::client::Fetcher;
use crate::error::FetchError;
use crate::extract::{self, bounded, Extraction};
use crate::probe;

pub struct Aggregator {
    fetcher: Fetcher,
    config: AppConfig,
}

impl Aggregator {
    /// Builds an aggregator with its own HTTP fetcher.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the HTTP client cannot be built.
    pub fn new(config: AppConfig) -> Result<Self, FetchError> {
        let fetcher = Fetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }

    #[must_use]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Runs the full extraction pipeline against one storefront.
    ///
    /// # Errors
    ///
    /// - [`FetchError::InvalidUrl`] — the input does not canonicalize.
    /// - [`FetchError::Unreachable`] / [`FetchError::HttpStatus`] — the base
    ///   page itself failed; individual category failures never escalate.
    /// - [`FetchError::Cancelled`] — `cancel` fired; in-flight extractor
    ///   work is abandoned.
    pub async fn aggregate(
        &self,
        storefront_url: &str,
        cancel: &CancellationToken,
    ) -> Result<BrandContext, FetchError> {
        let base = canonical_store_url(storefront_url)?;
        tokio::select! {
            () = cancel.cancelled() => {
                tracing::info!(base, "aggregation cancelled");
                Err(FetchError::Cancelled)
            }
            result = self.aggregate_base(&base) => result,
        }
    }

    async fn aggregate_base(&self, base: &str) -> Result<BrandContext, FetchError> {
        // Connectivity check; the body is reused by every homepage-driven
        // extractor so the page is fetched exactly once.
        let homepage = self.fetcher.get(base).await?.body;
        let sitemap = probe::sitemap_urls(&self.fetcher, base).await;

        let t = self.config.category_timeout_secs;
        let fetcher = &self.fetcher;

        let (catalog, hero, privacy, refund, faqs, social, contacts, brand_text, links) = tokio::join!(
            bounded(
                Category::ProductCatalog,
                t,
                extract::catalog::extract(fetcher, base, &self.config),
            ),
            bounded(Category::HeroProducts, t, async {
                extract::hero::extract(&homepage, base)
            }),
            bounded(
                Category::PrivacyPolicy,
                t,
                extract::policies::extract(
                    fetcher,
                    base,
                    extract::policies::PolicyKind::Privacy,
                    &sitemap,
                ),
            ),
            bounded(
                Category::ReturnPolicy,
                t,
                extract::policies::extract(
                    fetcher,
                    base,
                    extract::policies::PolicyKind::Refund,
                    &sitemap,
                ),
            ),
            bounded(
                Category::Faqs,
                t,
                extract::faq::extract(fetcher, base, &homepage, &sitemap),
            ),
            bounded(Category::SocialHandles, t, async {
                extract::social::extract(&homepage, base)
            }),
            bounded(
                Category::ContactDetails,
                t,
                extract::contact::extract(fetcher, base, &homepage),
            ),
            bounded(
                Category::BrandText,
                t,
                extract::brand_text::extract(fetcher, base, &homepage),
            ),
            bounded(Category::ImportantLinks, t, async {
                extract::links::extract(&homepage, base)
            }),
        );

        let mut ctx = BrandContext::empty(base.to_owned(), Utc::now());
        apply(&mut ctx, Category::ProductCatalog, catalog, |c, v| {
            c.product_catalog = v;
        });
        apply(&mut ctx, Category::HeroProducts, hero, |c, v| {
            c.hero_products = v;
        });
        apply(&mut ctx, Category::PrivacyPolicy, privacy, |c, v| {
            c.privacy_policy = Some(v);
        });
        apply(&mut ctx, Category::ReturnPolicy, refund, |c, v| {
            c.return_policy = Some(v);
        });
        apply(&mut ctx, Category::Faqs, faqs, |c, v| c.faqs = v);
        apply(&mut ctx, Category::SocialHandles, social, |c, v| {
            c.social_handles = v;
        });
        apply(&mut ctx, Category::ContactDetails, contacts, |c, v| {
            c.contact_details = v;
        });
        apply(&mut ctx, Category::BrandText, brand_text, |c, v| {
            c.brand_text = Some(v);
        });
        apply(&mut ctx, Category::ImportantLinks, links, |c, v| {
            c.important_links = v;
        });

        tracing::info!(
            store = %ctx.store_url,
            products = ctx.product_catalog.len(),
            found = ctx.found_categories().len(),
            errors = ctx.has_errors(),
            "storefront aggregated"
        );
        Ok(ctx)
    }
}

/// Merge fold step: record the category status and, on success, write the
/// extractor's value into its (disjoint) field.
fn apply<T>(
    ctx: &mut BrandContext,
    category: Category,
    extraction: Extraction<T>,
    set: impl FnOnce(&mut BrandContext, T),
) {
    let status = match extraction {
        Extraction::Found(value) => {
            set(ctx, value);
            CategoryStatus::Found
        }
        Extraction::NotFound => CategoryStatus::NotFound,
        Extraction::Failed(e) => {
            tracing::warn!(%category, error = %e, "extractor failed; category recorded as error");
            CategoryStatus::Error
        }
    };
    ctx.category_status.insert(category, status);
}
