//! Retry loop shared by the HTTP-backed providers.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::AIError;

/// Runs `attempt` until it succeeds, fails with a non-retryable error, or
/// `max_retries` extra attempts have been spent.
///
/// Backoff is exponential: 1s, 2s, 4s, ...
pub(crate) async fn with_retries<T, F, Fut>(max_retries: u32, mut attempt: F) -> Result<T, AIError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AIError>>,
{
    let mut retry_count = 0;

    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                if !err.is_retryable() || retry_count >= max_retries {
                    return Err(err);
                }
                tracing::debug!(retry_count, error = %err, "retrying AI request");
            }
        }

        sleep(Duration::from_secs(1 << retry_count.min(5))).await;
        retry_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn success_returns_immediately() {
        let calls = AtomicU32::new(0);
        let result = with_retries(3, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, AIError>(7)
        })
        .await;

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_retries_means_single_attempt() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retries(0, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AIError::network("reset"))
        })
        .await;

        assert!(matches!(result, Err(AIError::Network(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn non_retryable_error_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retries(3, || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(AIError::AuthenticationFailed)
        })
        .await;

        assert!(matches!(result, Err(AIError::AuthenticationFailed)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn transient_error_is_retried_once() {
        let calls = AtomicU32::new(0);
        let result = with_retries(1, || async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n == 0 {
                Err(AIError::unavailable("503"))
            } else {
                Ok("done")
            }
        })
        .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
