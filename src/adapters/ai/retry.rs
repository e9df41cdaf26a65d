//! Transport-level retry with exponential backoff, shared by the HTTP providers.

use std::future::Future;
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::AIError;

/// Runs `attempt` until it succeeds, fails with a non-retryable error, or
/// `max_retries` retries are spent. Delays double from `base_delay`.
pub(crate) async fn with_backoff<T, F, Fut>(
    provider: &'static str,
    max_retries: u32,
    base_delay: Duration,
    mut attempt: F,
) -> Result<T, AIError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AIError>>,
{
    let mut retry_count = 0;
    loop {
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_retryable() && retry_count < max_retries => {
                let delay = base_delay * 2u32.saturating_pow(retry_count);
                tracing::warn!(
                    provider,
                    attempt = retry_count + 1,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Retrying AI request"
                );
                sleep(delay).await;
                retry_count += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

/// Maps a reqwest send failure onto the provider error vocabulary.
pub(crate) fn map_send_error(err: reqwest::Error, timeout: Duration) -> AIError {
    if err.is_timeout() {
        AIError::Timeout {
            timeout_secs: timeout.as_secs() as u32,
        }
    } else if err.is_connect() {
        AIError::network(format!("Connection failed: {}", err))
    } else {
        AIError::network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn retries_retryable_errors_then_succeeds() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result = with_backoff("test", 3, Duration::from_millis(1), || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) < 2 {
                    Err(AIError::unavailable("busy"))
                } else {
                    Ok("ok")
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), "ok");
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn stops_after_max_retries() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), AIError> = with_backoff("test", 2, Duration::from_millis(1), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AIError::network("reset"))
            }
        })
        .await;

        assert!(matches!(result, Err(AIError::Network(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn does_not_retry_permanent_errors() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let result: Result<(), AIError> = with_backoff("test", 5, Duration::from_millis(1), || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Err(AIError::AuthenticationFailed)
            }
        })
        .await;

        assert!(matches!(result, Err(AIError::AuthenticationFailed)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
