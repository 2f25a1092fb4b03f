//! Shared HTTP fetcher used by every probe and extractor.

use std::time::Duration;

use reqwest::Client;
use shopsight_core::AppConfig;

use crate::error::FetchError;
use crate::retry::retry_with_backoff;

/// A successful HTTP response body plus the headers the pipeline cares about.
#[derive(Debug)]
pub struct FetchedPage {
    pub body: String,
    /// Raw `Link` header value, used for cursor pagination on the products
    /// listing endpoint.
    pub link_header: Option<String>,
}

/// HTTP fetcher with timeout, bounded retry, and status classification.
///
/// One `Fetcher` is shared across all extractors of a fetch request; it holds
/// no mutable state beyond the connection pool inside `reqwest::Client`.
/// Transient failures (network errors, 5xx, 429) are retried with
/// exponential backoff; 4xx responses are returned immediately as
/// [`FetchError::HttpStatus`].
pub struct Fetcher {
    client: Client,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl Fetcher {
    /// Creates a `Fetcher` from the configured timeout, user agent, and
    /// retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::Client`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(config: &AppConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(&config.user_agent)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            max_retries: config.max_retries,
            backoff_base_ms: config.backoff_base_ms,
        })
    }

    /// Fetches `url`, retrying transient failures, and returns the body of
    /// the final 2xx response.
    ///
    /// # Errors
    ///
    /// - [`FetchError::Unreachable`] — network failure after all retries.
    /// - [`FetchError::HttpStatus`] — final non-2xx response (5xx/429 are
    ///   retried first; other 4xx never are).
    pub async fn get(&self, url: &str) -> Result<FetchedPage, FetchError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            let url = url.to_owned();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(
                        reqwest::header::ACCEPT,
                        "text/html,application/json;q=0.9,*/*;q=0.8",
                    )
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
                    .send()
                    .await
                    .map_err(|source| FetchError::Unreachable {
                        url: url.clone(),
                        source,
                    })?;

                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::HttpStatus {
                        status: status.as_u16(),
                        url,
                    });
                }

                // Grab the Link header before consuming the body.
                let link_header = response
                    .headers()
                    .get(reqwest::header::LINK)
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_owned);

                let body = response
                    .text()
                    .await
                    .map_err(|source| FetchError::Unreachable {
                        url: url.clone(),
                        source,
                    })?;

                Ok(FetchedPage { body, link_header })
            }
        })
        .await
    }
}
