//! Mergeable-state polling for pull requests.
//!
//! GitHub computes `mergeable`/`mergeable_state` asynchronously after a PR's
//! head changes, so a fetch issued right after a push may report both as
//! unset. Polling with a short fixed delay is the documented mitigation; the
//! total budget is small (5 × 500 ms), so the delay stays fixed rather than
//! growing exponentially.
//!
//! # Retry policy
//!
//! - An unconverged snapshot is re-fetched while attempts remain.
//! - A transient failure (see [`ApiFailure::is_transient`]) is retried while
//!   attempts remain.
//! - A terminal failure aborts all remaining attempts immediately.
//! - At exhaustion, the last successful snapshot wins over the last
//!   transient error; only a run with no successful fetch at all propagates
//!   an error.

use std::time::Duration;

use crate::types::{PrNumber, PrSnapshot};

use super::client::PullRequestSource;
use super::error::ApiFailure;

/// Default number of fetch attempts per poll.
const DEFAULT_MAX_ATTEMPTS: u32 = 5;

/// Default delay between attempts (500 ms).
const DEFAULT_RETRY_DELAY_MS: u64 = 500;

/// Configuration for mergeable-state polling.
#[derive(Debug, Clone, Copy)]
pub struct PollConfig {
    /// Total fetch attempts, including the first.
    ///
    /// Default: 5. Configure via `GATEWAYZ_MERGEABLE_POLL_ATTEMPTS`.
    pub max_attempts: u32,

    /// Fixed delay between attempts.
    ///
    /// Default: 500 ms. Configure via `GATEWAYZ_MERGEABLE_POLL_DELAY_MS`.
    pub retry_delay: Duration,
}

impl PollConfig {
    /// Creates a `PollConfig` with default values.
    pub fn new() -> Self {
        PollConfig {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay: Duration::from_millis(DEFAULT_RETRY_DELAY_MS),
        }
    }

    /// Creates a `PollConfig` from environment variables.
    ///
    /// Reads `GATEWAYZ_MERGEABLE_POLL_ATTEMPTS` and
    /// `GATEWAYZ_MERGEABLE_POLL_DELAY_MS`; unset or unparsable values fall
    /// back to the defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let max_attempts = lookup("GATEWAYZ_MERGEABLE_POLL_ATTEMPTS")
            .and_then(|s| s.trim().parse::<u32>().ok())
            .unwrap_or(DEFAULT_MAX_ATTEMPTS);

        let delay_ms = lookup("GATEWAYZ_MERGEABLE_POLL_DELAY_MS")
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_RETRY_DELAY_MS);

        PollConfig {
            max_attempts,
            retry_delay: Duration::from_millis(delay_ms),
        }
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Fetches a pull request, polling until its merge computation converges.
///
/// Performs up to `config.max_attempts` fetches with `config.retry_delay`
/// between them. Returns as soon as a snapshot's merge computation is no
/// longer pending, or the last snapshot seen once attempts are exhausted.
///
/// # Errors
///
/// Terminal failures (including 404) propagate immediately. If every attempt
/// failed with a transient error and no fetch ever succeeded, the last error
/// propagates.
pub async fn fetch_pr_with_mergeable_polling<C>(
    client: &C,
    pr: PrNumber,
    config: &PollConfig,
) -> Result<PrSnapshot, ApiFailure>
where
    C: PullRequestSource,
{
    let max_attempts = config.max_attempts.max(1);
    let mut last_snapshot: Option<PrSnapshot> = None;
    let mut last_error: Option<ApiFailure> = None;

    for attempt in 1..=max_attempts {
        match client.fetch_pull_request(pr).await {
            Ok(snapshot) => {
                if !snapshot.merge_state_pending() {
                    return Ok(snapshot);
                }
                tracing::debug!(%pr, attempt, "merge state not yet computed, will re-fetch");
                last_snapshot = Some(snapshot);
            }
            Err(error) if error.is_transient() => {
                tracing::warn!(%pr, attempt, %error, "transient failure fetching pull request");
                last_error = Some(error);
            }
            Err(error) => return Err(error),
        }

        if attempt < max_attempts {
            tokio::time::sleep(config.retry_delay).await;
        }
    }

    match (last_snapshot, last_error) {
        // Attempts exhausted without convergence: the freshest data we have.
        (Some(snapshot), _) => Ok(snapshot),
        (None, Some(error)) => Err(error),
        (None, None) => Err(ApiFailure::unknown("pull request poll made no attempts")),
    }
}
