use std::fmt::Display;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

/// Retry an async operation with backoff.
///
/// # Arguments
/// * `operation` - The async operation to retry
/// * `delays` - Delay in seconds after each failed attempt; one retry per entry
///
/// # Returns
/// The result of the operation if successful, or the last error if all retries fail.
/// The operation always runs at least once.
pub async fn retry_with_backoff<F, Fut, T, E>(mut operation: F, delays: &[u64]) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: Display,
{
    let total = delays.len() + 1;
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(e) => match delays.get(attempt) {
                Some(&delay_secs) => {
                    attempt += 1;
                    warn!("Request failed ({attempt}/{total}): {e}. Retrying in {delay_secs}s");
                    sleep(Duration::from_secs(delay_secs)).await;
                }
                None => return Err(e),
            },
        }
    }
}
