pub mod aggregate;
pub mod canonical;
pub mod client;
pub mod discover;
pub mod error;
pub mod extract;
mod html;
pub mod normalize;
pub mod pagination;
pub mod pipeline;
pub mod probe;
mod retry;
pub mod sink;
pub mod types;

pub use aggregate::Aggregator;
pub use canonical::canonical_store_url;
pub use client::Fetcher;
pub use discover::{CompetitorDiscovery, DuckDuckGoSearch, SearchProvider};
pub use error::{ExtractError, FetchError};
pub use extract::Extraction;
pub use pipeline::{discover_competitors, fetch_insights};
pub use sink::{InsightsSink, MemorySink, SinkError};
