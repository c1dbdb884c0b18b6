use std::time::Duration;
use tokio_util::sync::CancellationToken;

/// Cancellation signal for in-flight operations.
///
/// Every suspension point of the request engine (network attempt, retry sleep, poll sleep)
/// races this signal; a cancelled operation unwinds with [`crate::Error::Cancelled`].
/// Clones share the same signal.
#[derive(Debug, Clone, Default)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A handle that is cancelled together with `self`, but can also be cancelled alone.
    pub fn child(&self) -> Self {
        Self {
            token: self.token.child_token(),
        }
    }

    pub(crate) async fn cancelled(&self) {
        self.token.cancelled().await
    }

    /// Sleep for `duration` unless cancelled first.
    pub(crate) async fn sleep(&self, duration: Duration) -> crate::Result<()> {
        tokio::select! {
            biased;
            _ = self.cancelled() => Err(crate::Error::Cancelled),
            _ = tokio::time::sleep(duration) => Ok(()),
        }
    }
}

/// Per-call facts gathered by the dispatcher.
#[derive(Debug, Clone)]
pub struct CallStats {
    pub method: String,
    pub path: String,
    pub http_status: u16,
    /// Number of retries performed (attempts minus one).
    pub retry_count: u32,
    pub duration_ms: u128,
}
