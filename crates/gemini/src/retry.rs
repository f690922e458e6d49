//! Bounded exponential-backoff retry for generation calls.
//!
//! Only transient network failures are retried; a definitive rejection
//! (bad model, bad credentials, malformed request) propagates on the
//! first attempt.

use std::future::Future;
use std::time::Duration;

use crate::api::GeminiApiError;

/// Tunable parameters for the backoff strategy.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempt budget, including the first call.
    pub max_attempts: u32,
    /// Delay before the second attempt.
    pub initial_delay: Duration,
    /// Factor by which the delay grows after each retry.
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(1000),
            multiplier: 2.0,
        }
    }
}

/// Calculate the next backoff delay from the current delay and config.
pub fn next_delay(current: Duration, config: &RetryConfig) -> Duration {
    Duration::from_millis((current.as_millis() as f64 * config.multiplier) as u64)
}

/// Whether a failure is a transient network problem worth retrying.
///
/// Connection-refused and timeout signals qualify, as does any failure
/// whose message mentions a fetch/network problem. Definitive API
/// rejections (4xx with an auth or model complaint) do not.
pub fn is_transient(err: &GeminiApiError) -> bool {
    if let GeminiApiError::Request(req_err) = err {
        if req_err.is_connect() || req_err.is_timeout() {
            return true;
        }
    }
    let message = err.to_string();
    message.contains("fetch failed") || message.contains("network")
}

/// Run `call` up to `config.max_attempts` times, sleeping between
/// attempts with the delay doubling each time.
///
/// Non-transient failures and the failure of the final attempt
/// propagate immediately.
pub async fn with_retry<T, F, Fut>(config: &RetryConfig, mut call: F) -> Result<T, GeminiApiError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GeminiApiError>>,
{
    let mut delay = config.initial_delay;
    let mut attempt = 1u32;

    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) => {
                let last_attempt = attempt >= config.max_attempts;
                if last_attempt || !is_transient(&err) {
                    return Err(err);
                }

                tracing::warn!(
                    attempt,
                    max_attempts = config.max_attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Retrying generation call after transient network failure",
                );
                tokio::time::sleep(delay).await;
                delay = next_delay(delay, config);
                attempt += 1;
            }
        }
    }
}
