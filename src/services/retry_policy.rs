use std::time::Duration;

use log::{debug, warn};
use tokio::time::sleep;

use crate::config;
use crate::models::email_result::ResultSet;
use crate::models::search_error::SearchError;
use crate::services::results_source::ResultsSource;

/// How the results resource is polled: fixed interval, bounded attempts,
/// no backoff.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub interval: Duration,
    pub max_attempts: u32,
    /// Every read must bypass caches.
    pub fresh_reads: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            interval: config::POLL_INTERVAL,
            max_attempts: config::MAX_POLL_ATTEMPTS,
            fresh_reads: true,
        }
    }
}

impl RetryPolicy {
    /// Upper bound on time spent waiting between attempts.
    pub fn total_wait(&self) -> Duration {
        self.interval * self.max_attempts
    }
}

/// Reads `source` until it yields a non-empty result set or the policy's
/// attempts run out.
///
/// Failed and empty reads are retried silently. After every unsuccessful
/// attempt the driver sleeps one interval and then calls
/// `on_wait(attempt, waited_so_far)`.
pub async fn poll_until_ready<S, F>(
    policy: &RetryPolicy,
    source: &S,
    mut on_wait: F,
) -> Result<ResultSet, SearchError>
where
    S: ResultsSource + ?Sized,
    F: FnMut(u32, Duration) + Send,
{
    for attempt in 1..=policy.max_attempts {
        match source.fetch(policy.fresh_reads).await {
            Ok(results) if !results.is_empty() => {
                debug!("Attempt {} returned {} results", attempt, results.len());
                return Ok(results);
            }
            Ok(_) => debug!("Attempt {}: results not published yet", attempt),
            Err(e) => debug!("Attempt {} failed: {}", attempt, e),
        }

        sleep(policy.interval).await;
        on_wait(attempt, policy.interval * attempt);
    }

    warn!("Giving up after {} attempts", policy.max_attempts);
    Err(SearchError::Timeout {
        attempts: policy.max_attempts,
    })
}
