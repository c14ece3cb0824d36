//! Retry with exponential backoff for read queries. Mutations never go
//! through here.

use std::{future::Future, time::Duration};

use tracing::{debug, warn};

use crate::domain::QueryKey;
use crate::util::persistence::Settings;

const MAX_DELAY: Duration = Duration::from_secs(30);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retries: 3,
            base_delay: Duration::from_secs(1),
            max_delay: MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            retries: settings.query_retries,
            base_delay: Duration::from_millis(settings.retry_base_delay_ms),
            max_delay: MAX_DELAY,
        }
    }

    /// Same policy with retries removed where the key opts out.
    pub fn for_key(self, key: &QueryKey) -> Self {
        if key.retries() {
            self
        } else {
            Self { retries: 0, ..self }
        }
    }

    /// Delay before retry number `attempt` (1-based): base * 2^(attempt-1),
    /// capped at `max_delay`.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let factor = 2u32.saturating_pow(attempt.saturating_sub(1));
        self.base_delay
            .checked_mul(factor)
            .map_or(self.max_delay, |delay| delay.min(self.max_delay))
    }
}

/// Runs `fetch` until it succeeds or the policy's retries are spent. The last
/// error is returned.
pub async fn fetch_with_retry<T, E, F, Fut>(
    key: &QueryKey,
    policy: RetryPolicy,
    mut fetch: F,
) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let policy = policy.for_key(key);
    let mut attempt = 0;
    loop {
        match fetch().await {
            Ok(value) => {
                debug!(%key, attempt, "query resolved");
                return Ok(value);
            }
            Err(error) if attempt < policy.retries => {
                attempt += 1;
                let delay = policy.delay_for(attempt);
                warn!(%key, attempt, ?delay, "query failed, retrying: {error}");
                tokio::time::sleep(delay).await;
            }
            Err(error) => {
                warn!(%key, attempt, "query failed: {error}");
                return Err(error);
            }
        }
    }
}
