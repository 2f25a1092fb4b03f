//! Per-category extractors.
//!
//! Every extractor has the same shape: it consumes fetcher/probe output for
//! one insight category and returns an [`Extraction`]. Extractors are
//! mutually independent — none reads another's output — which is what lets
//! the aggregator run them concurrently and merge with a pure fold.

use std::time::Duration;

use shopsight_core::Category;

use crate::error::ExtractError;

pub mod brand_text;
mod cards;
pub mod catalog;
pub mod contact;
pub mod faq;
pub mod hero;
pub mod links;
pub mod policies;
pub mod social;

/// Outcome of one extractor run.
///
/// `NotFound` is the expected non-error outcome for a storefront that simply
/// does not have the category; `Failed` records a category-local error.
/// Neither ever aborts the pipeline.
#[derive(Debug)]
pub enum Extraction<T> {
    Found(T),
    NotFound,
    Failed(ExtractError),
}

impl<T> Extraction<T> {
    /// `Found(value)` when the collection-like `value` is non-empty per
    /// `is_empty`, `NotFound` otherwise. Saves every extractor restating the
    /// "empty means absent" rule.
    pub fn from_non_empty(value: T, is_empty: impl FnOnce(&T) -> bool) -> Self {
        if is_empty(&value) {
            Extraction::NotFound
        } else {
            Extraction::Found(value)
        }
    }

    #[must_use]
    pub fn is_found(&self) -> bool {
        matches!(self, Extraction::Found(_))
    }
}

/// Runs `work` under the per-category timeout. A timed-out extractor is
/// recorded as [`ExtractError::Timeout`], which the merge treats the same as
/// absent data.
pub(crate) async fn bounded<T>(
    category: Category,
    timeout_secs: u64,
    work: impl std::future::Future<Output = Extraction<T>>,
) -> Extraction<T> {
    match tokio::time::timeout(Duration::from_secs(timeout_secs), work).await {
        Ok(extraction) => extraction,
        Err(_) => {
            tracing::warn!(%category, timeout_secs, "extractor timed out");
            Extraction::Failed(ExtractError::Timeout)
        }
    }
}
