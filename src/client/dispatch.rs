//! Request dispatcher: one logical request, retried on transient failures.

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

use crate::client::classify::{is_retryable_status, RequestContext};
use crate::client::types::{CallStats, CancelHandle};
use crate::resilience::backoff::BackoffTimer;
use crate::transport::{RequestSpec, Transport, TransportResponse};
use crate::{Error, Result};

/// Executes requests against a [`Transport`] with exponential backoff.
///
/// The dispatcher holds no per-request state: every call to [`dispatch`](Self::dispatch)
/// owns a fresh [`BackoffTimer`], so concurrent dispatches are independent.
#[derive(Clone)]
pub struct RequestDispatcher {
    transport: Arc<dyn Transport>,
    max_retries: u32,
    min_timeout: Duration,
}

impl RequestDispatcher {
    pub fn new(transport: Arc<dyn Transport>, max_retries: u32, min_timeout: Duration) -> Self {
        Self {
            transport,
            max_retries,
            min_timeout,
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn min_timeout(&self) -> Duration {
        self.min_timeout
    }

    /// Send `request` until a terminal outcome or until the retry budget is spent.
    ///
    /// - Timeouts are retried; on exhaustion the connection error is returned.
    /// - 429/5xx responses (see [`is_retryable_status`]) are retried; on exhaustion the last
    ///   response is returned as-is, for the caller to classify.
    /// - Everything else ends the loop immediately.
    pub async fn dispatch(
        &self,
        request: &RequestSpec,
        context: RequestContext,
        cancel: &CancelHandle,
    ) -> Result<(TransportResponse, CallStats)> {
        let mut timer = BackoffTimer::new(self.min_timeout);
        let start = std::time::Instant::now();

        loop {
            if cancel.is_cancelled() {
                return Err(Error::Cancelled);
            }

            let timeout = timer.timeout();
            let attempt = timer.retry_count() + 1;
            debug!(
                method = %request.method(),
                path = request.path(),
                attempt,
                timeout_ms = timeout.as_millis() as u64,
                "dispatching request"
            );

            let outcome = tokio::select! {
                biased;
                _ = cancel.cancelled() => return Err(Error::Cancelled),
                outcome = self.transport.send(request, timeout) => outcome,
            };

            let exhausted = timer.retry_count() >= self.max_retries;
            match outcome {
                Ok(response) => {
                    let status = response.status();
                    if exhausted || !is_retryable_status(status, context) {
                        let stats = CallStats {
                            method: request.method().to_string(),
                            path: request.path().to_string(),
                            http_status: status,
                            retry_count: timer.retry_count(),
                            duration_ms: start.elapsed().as_millis(),
                        };
                        debug!(
                            path = request.path(),
                            status,
                            retry_count = stats.retry_count,
                            duration_ms = stats.duration_ms as u64,
                            "request finished"
                        );
                        return Ok((response, stats));
                    }
                    // Dropping the response closes its body stream.
                    drop(response);
                    warn!(
                        path = request.path(),
                        status,
                        attempt,
                        max_retries = self.max_retries,
                        "transient HTTP status, retrying after backoff"
                    );
                }
                Err(e) => {
                    if !e.is_retryable() || exhausted {
                        debug!(
                            path = request.path(),
                            attempt,
                            retryable = e.is_retryable(),
                            error = %e,
                            "request failed before a response was obtained"
                        );
                        return Err(Error::from(e));
                    }
                    warn!(
                        path = request.path(),
                        attempt,
                        max_retries = self.max_retries,
                        error = %e,
                        "request timed out, retrying after backoff"
                    );
                }
            }

            timer.sleep_until_retry(cancel).await?;
        }
    }
}
