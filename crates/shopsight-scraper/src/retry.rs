//! Exponential-backoff retry for transient fetch errors.
//!
//! Non-retriable errors (4xx statuses, invalid URLs) are propagated
//! immediately without sleeping.

use std::future::Future;
use std::time::Duration;

use crate::error::FetchError;

/// Executes `operation`, retrying transient errors with exponential backoff.
///
/// On a retriable error (see [`FetchError::is_retriable`]) the function
/// sleeps `backoff_base_ms * 2^attempt` milliseconds and tries again, up to
/// `max_retries` additional attempts after the first. With `max_retries = 2`
/// the operation runs at most 3 times. The last error is returned when
/// retries are exhausted.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, FetchError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, FetchError>>,
{
    let mut attempt = 0u32;

    loop {
        let err = match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retriable() || attempt >= max_retries {
                    return Err(err);
                }
                err
            }
        };

        // base * 2^attempt, capped to avoid shift overflow on hostile configs.
        let delay_ms = backoff_base_ms.saturating_mul(1u64 << attempt.min(62));
        tracing::warn!(
            attempt,
            max_retries,
            delay_ms,
            error = %err,
            "transient fetch error, retrying after backoff"
        );
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
        attempt += 1;
    }
}
