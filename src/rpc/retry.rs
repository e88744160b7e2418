//! Retry decorator for unary backend calls.
//!
//! Each attempt is bounded by `per_attempt_timeout`; an attempt that runs out
//! of time counts as `DEADLINE_EXCEEDED`. Only codes in `retryable` are
//! retried, everything else is returned after the first attempt.
use std::future::Future;
use std::time::Duration;

use rand::Rng;
use tonic::{Code, Status};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Status codes worth another attempt
    pub retryable: Vec<Code>,
    /// Total attempts, first call included
    pub max_attempts: u32,
    pub per_attempt_timeout: Duration,
    /// Pause between attempts
    pub backoff: Duration,
    /// Fraction of `backoff` applied as random jitter (0.10 => ±10%)
    pub jitter: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            retryable: vec![Code::NotFound, Code::Aborted, Code::DeadlineExceeded],
            max_attempts: 4,
            per_attempt_timeout: Duration::from_secs(5),
            backoff: Duration::from_millis(50),
            jitter: 0.10,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, per_attempt_timeout: Duration) -> Self {
        Self {
            max_attempts,
            per_attempt_timeout,
            ..Default::default()
        }
    }

    pub fn is_retryable(&self, code: Code) -> bool {
        self.retryable.contains(&code)
    }

    fn next_delay(&self) -> Duration {
        if self.jitter <= 0.0 || self.backoff.is_zero() {
            return self.backoff;
        }
        let factor = 1.0 + rand::thread_rng().gen_range(-self.jitter..=self.jitter);
        self.backoff.mul_f64(factor.max(0.0))
    }

    /// Run `call` until it succeeds, fails with a non-retryable code, or the
    /// attempt budget is spent.
    pub async fn run<F, Fut, T>(&self, op: &str, mut call: F) -> Result<T, Status>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, Status>>,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;

        loop {
            attempt += 1;

            let result = match tokio::time::timeout(self.per_attempt_timeout, call()).await {
                Ok(result) => result,
                Err(_) => Err(Status::deadline_exceeded(format!(
                    "attempt timed out after {:?}",
                    self.per_attempt_timeout
                ))),
            };

            match result {
                Ok(value) => return Ok(value),
                Err(status) if attempt < max_attempts && self.is_retryable(status.code()) => {
                    let delay = self.next_delay();
                    warn!(
                        op,
                        attempt,
                        max_attempts,
                        code = ?status.code(),
                        delay_ms = delay.as_millis() as u64,
                        "transient backend failure, retrying"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(status) => return Err(status),
            }
        }
    }
}
