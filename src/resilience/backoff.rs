//! Exponential backoff timer for retrying a single logical request.

use crate::client::types::CancelHandle;
use crate::Result;
use rand::Rng;
use std::time::Duration;
use tokio::time::Instant;

/// Backoff before the first retry.
pub const BACKOFF_INITIAL: Duration = Duration::from_secs(1);
/// Upper bound of the unjittered backoff.
pub const BACKOFF_MAX: Duration = Duration::from_secs(120);
pub const BACKOFF_MULTIPLIER: f64 = 1.6;
/// Jitter fraction: intervals are scaled by a factor in `[1 - JITTER, 1 + JITTER]`.
pub const BACKOFF_JITTER: f64 = 0.23;

/// Grow `backoff` by the multiplier, capped at [`BACKOFF_MAX`].
pub fn next_backoff(backoff: Duration) -> Duration {
    backoff.mul_f64(BACKOFF_MULTIPLIER).min(BACKOFF_MAX)
}

/// Scale `backoff` by a jitter factor derived from `sample`, a uniform value in `[0, 1)`.
pub fn apply_jitter(backoff: Duration, sample: f64) -> Duration {
    let sample = sample.clamp(0.0, 1.0);
    let factor = 1.0 + (sample * 2.0 - 1.0) * BACKOFF_JITTER;
    backoff.mul_f64(factor)
}

/// Per-request backoff state.
///
/// A timer is created at the start of a logical request and owned by that request only;
/// the deadline doubles as a per-attempt timeout floor and as the retry sleep target.
#[derive(Debug)]
pub struct BackoffTimer {
    retry_count: u32,
    backoff: Duration,
    min_timeout: Duration,
    deadline: Instant,
}

impl BackoffTimer {
    pub fn new(min_timeout: Duration) -> Self {
        Self {
            retry_count: 0,
            backoff: BACKOFF_INITIAL,
            min_timeout,
            deadline: Instant::now() + BACKOFF_INITIAL,
        }
    }

    /// Network timeout for the next attempt: the time left until the deadline,
    /// but never less than the configured minimum.
    pub fn timeout(&self) -> Duration {
        self.time_until_deadline().max(self.min_timeout)
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    #[cfg(test)]
    fn backoff(&self) -> Duration {
        self.backoff
    }

    /// Wait until the deadline, then schedule the next one.
    ///
    /// A cancelled wait returns [`crate::Error::Cancelled`] and leaves the timer unchanged.
    pub async fn sleep_until_retry(&mut self, cancel: &CancelHandle) -> Result<()> {
        cancel.sleep(self.time_until_deadline()).await?;

        self.backoff = next_backoff(self.backoff);
        let sample: f64 = rand::thread_rng().gen();
        let jittered = apply_jitter(self.backoff, sample);
        self.deadline = Instant::now() + jittered;
        self.retry_count += 1;
        Ok(())
    }

    fn time_until_deadline(&self) -> Duration {
        self.deadline.saturating_duration_since(Instant::now())
    }
}
