// Retry utilities

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;
use tracing::warn;

const BASE_DELAY_MS: u64 = 500;

/// Run `operation` up to `max_attempts` times, retrying with exponential
/// backoff only while `should_retry` approves the error. The final error is
/// returned unchanged.
pub async fn with_retry<F, Fut, T, E>(
    mut operation: F,
    max_attempts: u32,
    should_retry: impl Fn(&E) -> bool,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let mut attempt = 0;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(error) => {
                attempt += 1;
                if attempt >= max_attempts || !should_retry(&error) {
                    return Err(error);
                }

                let delay = Duration::from_millis(BASE_DELAY_MS * 2u64.pow(attempt.min(5)));
                warn!(attempt, error = %error, "Retrying failed operation");
                sleep(delay).await;
            }
        }
    }
}
