//! Deadline enforcement for single API calls.
//!
//! The external client offers no per-call deadline, so slow calls would hang
//! the caller indefinitely. [`with_timeout`] races an operation against a
//! timer and surfaces a distinguishable [`ApiFailure::Timeout`] when the
//! timer wins.

use std::future::Future;
use std::time::Duration;

use super::error::ApiFailure;

/// Bounds the wall-clock duration of a single asynchronous operation.
///
/// If the operation completes first, its result passes through unchanged.
/// If the timer fires first, the call resolves to [`ApiFailure::Timeout`]
/// whose Display is exactly `message`, and a diagnostic warning is logged.
/// Exactly one outcome is produced; the losing timer is dropped on the
/// winning path.
///
/// Dropping the timed-out future aborts the underlying HTTP request; no work
/// continues past the deadline.
pub async fn with_timeout<T, F>(
    limit: Duration,
    message: impl Into<String>,
    operation: F,
) -> Result<T, ApiFailure>
where
    F: Future<Output = Result<T, ApiFailure>>,
{
    match tokio::time::timeout(limit, operation).await {
        Ok(result) => result,
        Err(_) => {
            let message = message.into();
            tracing::warn!(
                limit_ms = limit.as_millis() as u64,
                "GitHub API call exceeded its deadline: {message}"
            );
            Err(ApiFailure::Timeout { message })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::{sleep, Instant};

    #[tokio::test]
    async fn fast_operation_passes_through() {
        let result = with_timeout(Duration::from_secs(10), "never used", async { Ok(42) }).await;
        assert_eq!(result.unwrap(), 42);
    }

    #[tokio::test]
    async fn operation_error_passes_through() {
        let result: Result<(), _> = with_timeout(Duration::from_secs(10), "never used", async {
            Err(ApiFailure::unknown("boom"))
        })
        .await;
        assert_eq!(result.unwrap_err(), ApiFailure::unknown("boom"));
    }

    #[tokio::test(start_paused = true)]
    async fn timer_wins_at_the_bound_with_exact_message() {
        let start = Instant::now();

        let result: Result<u32, _> = with_timeout(
            Duration::from_secs(10),
            "GitHub API timeout getting installation for octo/widgets",
            async {
                sleep(Duration::from_secs(20)).await;
                Ok(7)
            },
        )
        .await;

        let error = result.unwrap_err();
        assert_eq!(
            error.to_string(),
            "GitHub API timeout getting installation for octo/widgets"
        );
        assert!(!error.is_transient());
        assert_eq!(start.elapsed(), Duration::from_secs(10));
    }

    #[tokio::test(start_paused = true)]
    async fn operation_finishing_under_the_bound_wins() {
        let result = with_timeout(Duration::from_secs(10), "unused", async {
            sleep(Duration::from_secs(9)).await;
            Ok("done")
        })
        .await;
        assert_eq!(result.unwrap(), "done");
    }
}
