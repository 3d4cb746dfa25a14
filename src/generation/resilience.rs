//! Timeout and retry policy around the model call
//!
//! The default policy makes exactly one attempt with no timeout. Retries only
//! apply to failures [`ModelError::is_transient`] classifies as transient.

use rand::Rng;
use std::future::Future;
use std::time::Duration;

use super::errors::ModelError;
use crate::settings::GenerationSettings;
use crate::utils::logging::LoggingHelper;

const DEFAULT_BASE_DELAY: Duration = Duration::from_millis(250);
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(5);
/// Upper bound of random jitter added to each delay, as a fraction of it
const JITTER_FRACTION: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
    pub timeout: Option<Duration>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 0,
            base_delay: DEFAULT_BASE_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            timeout: None,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn from_settings(settings: &GenerationSettings) -> Self {
        Self {
            max_retries: settings.max_retries,
            base_delay: settings.retry_base_delay(),
            max_delay: DEFAULT_MAX_DELAY.max(settings.retry_base_delay()),
            timeout: settings.request_timeout(),
        }
    }

    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_base_delay(mut self, base_delay: Duration) -> Self {
        self.base_delay = base_delay;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Exponential delay before retry number `retry` (1-based), without jitter
    #[must_use]
    pub fn delay_for_retry(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }

    fn jittered(delay: Duration) -> Duration {
        let factor = rand::rng().random_range(0.0..=JITTER_FRACTION);
        delay.mul_f64(1.0 + factor)
    }

    /// Run `operation` under this policy
    ///
    /// # Errors
    ///
    /// Returns the last [`ModelError`] once the operation fails with a
    /// non-transient error or the retry budget is spent. A timed-out attempt
    /// yields [`ModelError::Timeout`].
    pub async fn execute<T, F, Fut>(&self, mut operation: F) -> Result<T, ModelError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, ModelError>>,
    {
        let mut retry = 0;
        loop {
            let outcome = match self.timeout {
                Some(limit) => tokio::time::timeout(limit, operation())
                    .await
                    .unwrap_or(Err(ModelError::Timeout(limit))),
                None => operation().await,
            };

            match outcome {
                Ok(value) => return Ok(value),
                Err(error) if error.is_transient() && retry < self.max_retries => {
                    retry += 1;
                    let delay = Self::jittered(self.delay_for_retry(retry));
                    LoggingHelper::log_generation_retry(
                        retry,
                        self.max_retries,
                        delay.as_millis(),
                        &error.to_string(),
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(error) => return Err(error),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::default()
            .with_max_retries(max_retries)
            .with_base_delay(Duration::from_millis(1))
    }

    #[test]
    fn test_default_is_single_attempt_without_timeout() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 0);
        assert_eq!(policy.timeout, None);
    }

    #[test]
    fn test_delay_grows_and_caps() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_for_retry(1), Duration::from_millis(250));
        assert_eq!(policy.delay_for_retry(2), Duration::from_millis(500));
        assert_eq!(policy.delay_for_retry(3), Duration::from_millis(1000));
        assert_eq!(policy.delay_for_retry(30), DEFAULT_MAX_DELAY);
    }

    #[tokio::test]
    async fn test_no_retry_by_default() {
        let calls = AtomicU32::new(0);
        let result: Result<(), ModelError> = RetryPolicy::default()
            .execute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(ModelError::Transport("reset".into())) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_transient_failure_is_retried_once() {
        let calls = AtomicU32::new(0);
        let result = fast_policy(1)
            .execute(|| {
                let attempt = calls.fetch_add(1, Ordering::SeqCst);
                async move {
                    if attempt == 0 {
                        Err(ModelError::Http {
                            status: 503,
                            message: "unavailable".into(),
                        })
                    } else {
                        Ok("ok")
                    }
                }
            })
            .await;

        assert_eq!(result, Ok("ok"));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_permanent_failure_is_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), ModelError> = fast_policy(3)
            .execute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async {
                    Err(ModelError::Http {
                        status: 400,
                        message: "bad request".into(),
                    })
                }
            })
            .await;

        assert!(matches!(result, Err(ModelError::Http { status: 400, .. })));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_retry_budget_is_bounded() {
        let calls = AtomicU32::new(0);
        let result: Result<(), ModelError> = fast_policy(2)
            .execute(|| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(ModelError::Transport("reset".into())) }
            })
            .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_timeout_surfaces_as_timeout_error() {
        let limit = Duration::from_millis(5);
        let result: Result<(), ModelError> = RetryPolicy::default()
            .with_timeout(limit)
            .execute(|| async {
                tokio::time::sleep(Duration::from_millis(200)).await;
                Ok(())
            })
            .await;

        assert_eq!(result, Err(ModelError::Timeout(limit)));
    }
}
