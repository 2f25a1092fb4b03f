//! Environment-driven configuration for the extraction pipeline.
//!
//! All knobs load from `SHOPSIGHT_*` environment variables with sensible
//! defaults, so the CLI works out of the box against a live storefront.

use crate::ConfigError;

/// Runtime configuration shared by the fetcher, extractors, aggregator, and
/// competitor discovery.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Per-request timeout for every HTTP fetch.
    pub request_timeout_secs: u64,
    /// Additional attempts after the first failure, for transient errors only.
    pub max_retries: u32,
    /// Base delay for exponential backoff between retries.
    pub backoff_base_ms: u64,
    pub user_agent: String,
    /// Wall-clock bound for a single extractor; a timed-out category is
    /// recorded as an error, not a pipeline failure.
    pub category_timeout_secs: u64,
    /// Hard cap on catalog size to bound memory and fetch time.
    pub catalog_max_products: usize,
    /// Page size for the products listing endpoint.
    pub products_page_size: u32,
    /// Delay between listing-endpoint page requests.
    pub inter_request_delay_ms: u64,
    /// How many search-result candidates discovery will consider at most.
    pub search_max_candidates: usize,
    /// Default number of competitors to collect when the caller gives none.
    pub competitor_max_count: usize,
}

/// Load configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to pick up a `.env` file first.
///
/// # Errors
///
/// Returns [`ConfigError`] if a set variable has an unparseable value.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load configuration from variables already in the process environment.
///
/// Unlike [`load_app_config`] this does not touch `.env` files, which keeps
/// tests hermetic.
///
/// # Errors
///
/// Returns [`ConfigError`] if a set variable has an unparseable value.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build configuration with the provided env-var lookup function.
///
/// The parsing/validation logic is decoupled from the real environment so it
/// can be tested with a plain `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_usize = |var: &str, default: &str| -> Result<usize, ConfigError> {
        or_default(var, default)
            .parse::<usize>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let catalog_max_products = parse_usize("SHOPSIGHT_CATALOG_MAX_PRODUCTS", "500")?;
    if catalog_max_products == 0 {
        return Err(ConfigError::InvalidEnvVar {
            var: "SHOPSIGHT_CATALOG_MAX_PRODUCTS".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    Ok(AppConfig {
        log_level: or_default("SHOPSIGHT_LOG_LEVEL", "info"),
        request_timeout_secs: parse_u64("SHOPSIGHT_REQUEST_TIMEOUT_SECS", "10")?,
        max_retries: parse_u32("SHOPSIGHT_MAX_RETRIES", "2")?,
        backoff_base_ms: parse_u64("SHOPSIGHT_BACKOFF_BASE_MS", "500")?,
        user_agent: or_default("SHOPSIGHT_USER_AGENT", "shopsight/0.1"),
        category_timeout_secs: parse_u64("SHOPSIGHT_CATEGORY_TIMEOUT_SECS", "20")?,
        catalog_max_products,
        products_page_size: parse_u32("SHOPSIGHT_PRODUCTS_PAGE_SIZE", "250")?,
        inter_request_delay_ms: parse_u64("SHOPSIGHT_INTER_REQUEST_DELAY_MS", "0")?,
        search_max_candidates: parse_usize("SHOPSIGHT_SEARCH_MAX_CANDIDATES", "40")?,
        competitor_max_count: parse_usize("SHOPSIGHT_COMPETITOR_MAX_COUNT", "5")?,
    })
}
