//! Retry with exponential back-off and jitter for Admin API reads.
//!
//! Only idempotent reads go through here with a non-zero retry budget. The
//! staff assignment mutation is always called with `max_retries = 0`.

use std::future::Future;
use std::time::Duration;

use crate::error::ShopifyError;

const MAX_DELAY_MS: u64 = 30_000;

/// Returns `true` if `err` is a transient condition worth retrying.
///
/// Retriable:
/// - [`ShopifyError::Http`]: network-level failure (connect, timeout, reset).
/// - [`ShopifyError::RateLimited`]: HTTP 429 or a `THROTTLED` GraphQL error.
/// - [`ShopifyError::UnexpectedStatus`] with a 5xx status.
///
/// Everything else (GraphQL errors, malformed bodies, 4xx, missing data) is
/// returned immediately; retrying would produce the same answer.
pub(crate) fn is_retriable(err: &ShopifyError) -> bool {
    match err {
        ShopifyError::Http(_) | ShopifyError::RateLimited { .. } => true,
        ShopifyError::UnexpectedStatus { status, .. } => *status >= 500,
        ShopifyError::Deserialize { .. }
        | ShopifyError::GraphQl { .. }
        | ShopifyError::MissingData { .. }
        | ShopifyError::PaginationLimit { .. }
        | ShopifyError::MissingCursor { .. }
        | ShopifyError::InvalidEndpoint { .. } => false,
    }
}

/// Runs `operation` with up to `max_retries` additional attempts on transient errors.
///
/// The n-th retry waits `backoff_base_ms * 2^(n-1)` ms, scaled by a random
/// factor in `[0.75, 1.25)` and capped at 30 s. A rate-limit error with a
/// `Retry-After` longer than the computed delay waits for `Retry-After` instead.
pub(crate) async fn retry_with_backoff<T, F, Fut>(
    max_retries: u32,
    backoff_base_ms: u64,
    mut operation: F,
) -> Result<T, ShopifyError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ShopifyError>>,
{
    let mut attempt = 0u32;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !is_retriable(&err) || attempt >= max_retries {
                    return Err(err);
                }
                attempt += 1;
                let computed = backoff_base_ms.saturating_mul(1u64 << (attempt - 1).min(10));
                let capped = computed.min(MAX_DELAY_MS);
                #[allow(
                    clippy::cast_possible_truncation,
                    clippy::cast_sign_loss,
                    clippy::cast_precision_loss
                )]
                let jittered = (capped as f64 * (rand::random::<f64>() * 0.5 + 0.75)) as u64;
                let delay_ms = match &err {
                    ShopifyError::RateLimited {
                        retry_after_secs, ..
                    } => jittered.max(retry_after_secs.saturating_mul(1_000).min(MAX_DELAY_MS)),
                    _ => jittered,
                };
                tracing::warn!(
                    attempt,
                    max_retries,
                    delay_ms,
                    error = %err,
                    "transient Admin API error, retrying after back-off"
                );
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}
