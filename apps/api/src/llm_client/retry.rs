//! Retry policy for calls to the hosted model.
//!
//! Delays are awaited with `tokio::time::sleep`, so a caller can wrap the whole
//! retried call in its own timeout or drop it to cancel.

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::time::Duration;

use tracing::warn;

/// Delay between attempts.
#[derive(Debug, Clone, PartialEq)]
pub enum BackoffPolicy {
    Fixed(Duration),
    /// base * 2^attempt, capped at max.
    Exponential { base: Duration, max: Duration },
    None,
}

impl BackoffPolicy {
    /// Delay after the given failed attempt (0-indexed).
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        match self {
            BackoffPolicy::Fixed(d) => *d,
            BackoffPolicy::Exponential { base, max } => {
                let millis = (base.as_millis() as u64).saturating_mul(2u64.saturating_pow(attempt));
                Duration::from_millis(millis).min(*max)
            }
            BackoffPolicy::None => Duration::ZERO,
        }
    }
}

/// Backoff shape as named in configuration (`fixed`, `exponential`, `none`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackoffKind {
    #[default]
    Fixed,
    Exponential,
    None,
}

impl BackoffKind {
    /// `delay` is the fixed delay, or the first delay for exponential backoff.
    pub fn policy(self, delay: Duration, max_delay: Duration) -> BackoffPolicy {
        match self {
            BackoffKind::Fixed => BackoffPolicy::Fixed(delay),
            BackoffKind::Exponential => BackoffPolicy::Exponential {
                base: delay,
                max: max_delay.max(delay),
            },
            BackoffKind::None => BackoffPolicy::None,
        }
    }
}

impl FromStr for BackoffKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fixed" => Ok(BackoffKind::Fixed),
            "exponential" => Ok(BackoffKind::Exponential),
            "none" => Ok(BackoffKind::None),
            other => Err(format!(
                "unknown backoff '{other}' (expected 'fixed', 'exponential' or 'none')"
            )),
        }
    }
}

impl fmt::Display for BackoffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackoffKind::Fixed => f.write_str("fixed"),
            BackoffKind::Exponential => f.write_str("exponential"),
            BackoffKind::None => f.write_str("none"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total number of calls, including the first. Never less than 1.
    pub max_attempts: u32,
    pub backoff: BackoffPolicy,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff: BackoffPolicy::Fixed(Duration::from_secs(2)),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: BackoffPolicy) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }

    /// Runs `op` until it succeeds, returns a non-retryable error, or attempts run out.
    /// On exhaustion the last error is returned.
    pub async fn run<T, E, F, Fut, R>(&self, label: &str, is_retryable: R, mut op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        R: Fn(&E) -> bool,
        E: std::fmt::Display,
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 0;
        loop {
            match op().await {
                Ok(value) => return Ok(value),
                Err(e) if attempt + 1 < max_attempts && is_retryable(&e) => {
                    let delay = self.backoff.delay_for_attempt(attempt);
                    warn!(
                        call = %label,
                        attempt = attempt + 1,
                        max_attempts,
                        delay_ms = %delay.as_millis(),
                        "attempt failed, retrying: {e}"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[derive(Debug, PartialEq)]
    enum TestError {
        Transient,
        Fatal,
    }

    impl std::fmt::Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{self:?}")
        }
    }

    fn transient(e: &TestError) -> bool {
        *e == TestError::Transient
    }

    #[tokio::test]
    async fn test_success_on_first_try() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let policy = RetryPolicy::new(3, BackoffPolicy::Fixed(Duration::ZERO));

        let result: Result<&str, TestError> = policy
            .run("first", transient, || {
                c.fetch_add(1, Ordering::SeqCst);
                async { Ok("done") }
            })
            .await;

        assert_eq!(result.unwrap(), "done");
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_two_failures_then_success_with_three_attempts() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let policy = RetryPolicy::new(3, BackoffPolicy::Fixed(Duration::from_secs(2)));
        let started = tokio::time::Instant::now();

        let result = policy
            .run("flaky", transient, || {
                let n = c.fetch_add(1, Ordering::SeqCst);
                async move {
                    if n < 2 {
                        Err(TestError::Transient)
                    } else {
                        Ok(n)
                    }
                }
            })
            .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        // Two fixed delays were awaited on the paused clock.
        assert!(started.elapsed() >= Duration::from_secs(4));
    }

    #[tokio::test]
    async fn test_exhaustion_returns_last_error() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let policy = RetryPolicy::new(2, BackoffPolicy::Fixed(Duration::ZERO));

        let result: Result<(), TestError> = policy
            .run("always", transient, || {
                c.fetch_add(1, Ordering::SeqCst);
                async { Err(TestError::Transient) }
            })
            .await;

        assert_eq!(result.unwrap_err(), TestError::Transient);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_error_is_not_retried() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let policy = RetryPolicy::new(5, BackoffPolicy::Fixed(Duration::ZERO));

        let result: Result<(), TestError> = policy
            .run("fatal", transient, || {
                c.fetch_add(1, Ordering::SeqCst);
                async { Err(TestError::Fatal) }
            })
            .await;

        assert_eq!(result.unwrap_err(), TestError::Fatal);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_zero_attempts_still_calls_once() {
        let calls = Arc::new(AtomicU32::new(0));
        let c = calls.clone();
        let policy = RetryPolicy {
            max_attempts: 0,
            backoff: BackoffPolicy::None,
        };

        let _: Result<(), TestError> = policy
            .run("zero", transient, || {
                c.fetch_add(1, Ordering::SeqCst);
                async { Err(TestError::Transient) }
            })
            .await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_fixed_backoff_is_constant() {
        let policy = BackoffPolicy::Fixed(Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(7), Duration::from_millis(200));
    }

    #[test]
    fn test_exponential_backoff_doubles_and_caps() {
        let policy = BackoffPolicy::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(500),
        };
        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(400));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(500));
        assert_eq!(policy.delay_for_attempt(40), Duration::from_millis(500));
    }

    #[test]
    fn test_backoff_kind_builds_policy() {
        let delay = Duration::from_millis(250);
        let max = Duration::from_secs(4);
        assert_eq!("fixed".parse::<BackoffKind>().unwrap().policy(delay, max), BackoffPolicy::Fixed(delay));
        assert_eq!(
            " Exponential ".parse::<BackoffKind>().unwrap().policy(delay, max),
            BackoffPolicy::Exponential { base: delay, max }
        );
        assert_eq!("none".parse::<BackoffKind>().unwrap().policy(delay, max), BackoffPolicy::None);
        assert!("linear".parse::<BackoffKind>().is_err());
    }

    #[test]
    fn test_exponential_cap_never_below_first_delay() {
        let policy = BackoffKind::Exponential.policy(Duration::from_secs(3), Duration::from_secs(1));
        assert_eq!(policy.delay_for_attempt(0), Duration::from_secs(3));
    }

    #[test]
    fn test_default_policy_is_three_attempts_fixed_two_seconds() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 3);
        assert_eq!(policy.backoff, BackoffPolicy::Fixed(Duration::from_secs(2)));
    }
}
