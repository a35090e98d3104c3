//! Timeout enforcement.

use std::future::Future;
use std::time::Duration;

/// Await `fut` for at most `limit`; on expiry return `on_timeout()`.
pub async fn with_timeout<T, E, F>(
    limit: Duration,
    fut: F,
    on_timeout: impl FnOnce() -> E,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => Err(on_timeout()),
    }
}
