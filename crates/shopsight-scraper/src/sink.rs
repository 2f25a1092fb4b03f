//! The result sink: the pipeline's only outbound persistence interface.
//!
//! The core requires exactly one contract from persistence: an idempotent
//! upsert keyed on the canonical store URL. [`MemorySink`] satisfies it for
//! tests and the CLI; a database-backed implementation plugs in behind the
//! same trait.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use shopsight_core::BrandContext;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("sink upsert failed for {url}: {reason}")]
pub struct SinkError {
    pub url: String,
    pub reason: String,
}

/// Consumer of completed brand contexts.
///
/// `upsert` must be idempotent keyed on `ctx.store_url`: upserting two
/// snapshots of the same store leaves exactly one stored context (the later
/// write wins).
#[async_trait]
pub trait InsightsSink: Send + Sync {
    async fn upsert(&self, ctx: &BrandContext) -> Result<(), SinkError>;
}

/// In-memory sink keyed by canonical URL.
#[derive(Debug, Default)]
pub struct MemorySink {
    contexts: Mutex<BTreeMap<String, BrandContext>>,
}

impl MemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored context for a canonical URL, if any.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn get(&self, store_url: &str) -> Option<BrandContext> {
        self.contexts
            .lock()
            .expect("sink lock poisoned")
            .get(store_url)
            .cloned()
    }

    /// Number of distinct stores currently held.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn len(&self) -> usize {
        self.contexts.lock().expect("sink lock poisoned").len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl InsightsSink for MemorySink {
    async fn upsert(&self, ctx: &BrandContext) -> Result<(), SinkError> {
        let mut contexts = self.contexts.lock().map_err(|_| SinkError {
            url: ctx.store_url.clone(),
            reason: "sink lock poisoned".to_owned(),
        })?;
        contexts.insert(ctx.store_url.clone(), ctx.clone());
        Ok(())
    }
}
