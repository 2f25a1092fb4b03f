use thiserror::Error;

/// Transport-level failures. Only a failure on the storefront's base page
/// aborts a whole fetch; everywhere else callers treat these as "this source
/// unavailable" and continue.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("unreachable: {url}: {source}")]
    Unreachable {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unexpected HTTP status {status} from {url}")]
    HttpStatus { status: u16, url: String },

    #[error("invalid storefront URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("fetch cancelled by caller")]
    Cancelled,
}

impl FetchError {
    /// Returns `true` for transient conditions worth retrying: network-level
    /// failures and 5xx/429 responses. 4xx responses are final.
    #[must_use]
    pub fn is_retriable(&self) -> bool {
        match self {
            FetchError::Unreachable { .. } => true,
            FetchError::HttpStatus { status, .. } => *status >= 500 || *status == 429,
            FetchError::InvalidUrl { .. } | FetchError::Client(_) | FetchError::Cancelled => false,
        }
    }
}

/// Category-local extractor failures. These always degrade to "category
/// absent" in the merged result; they never abort the pipeline.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("extractor timed out")]
    Timeout,

    #[error("parse failure: {0}")]
    Parse(String),
}
