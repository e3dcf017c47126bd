//! Retry policy for TMDB requests.
//!
//! Client errors (4xx except 429) fail immediately. Everything else (network
//! failures, 5xx, 429) is retried with a linearly increasing delay:
//! `delay_base * (attempt_index + 1)`.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

/// Default number of additional attempts after the first one.
const DEFAULT_MAX_RETRIES: u32 = 2;

/// Default backoff unit.
const DEFAULT_DELAY_BASE: Duration = Duration::from_millis(1000);

/// How a failed attempt should be treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Repeating the request cannot succeed (4xx other than 429, bad input).
    Permanent,
    /// The request may succeed later (no status, 5xx, 429).
    Transient,
}

impl FailureKind {
    /// Classifies a failure by its HTTP status (`None` = no response at all).
    #[must_use]
    pub const fn from_status(status: Option<u16>) -> Self {
        match status {
            Some(s) if s >= 400 && s < 500 && s != 429 => Self::Permanent,
            _ => Self::Transient,
        }
    }
}

/// Errors the retry loop can classify.
pub trait Classify {
    /// Returns how the failed attempt should be treated.
    fn failure_kind(&self) -> FailureKind;
}

/// Outcome of consulting the policy after a failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sleep for `delay`, then issue the next attempt.
    Retry {
        /// Time to wait before the next attempt.
        delay: Duration,
    },
    /// Propagate the error of this attempt.
    GiveUp,
}

/// Bounded linear-backoff retry policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct RetryPolicy {
    /// Additional attempts after the first one.
    max_retries: u32,
    /// Backoff unit multiplied by the attempt number.
    delay_base: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES, DEFAULT_DELAY_BASE)
    }
}

impl RetryPolicy {
    /// Creates a policy allowing `max_retries` additional attempts.
    #[must_use]
    pub const fn new(max_retries: u32, delay_base: Duration) -> Self {
        Self {
            max_retries,
            delay_base,
        }
    }

    /// Additional attempts after the first one.
    #[must_use]
    pub const fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Backoff unit.
    #[must_use]
    pub const fn delay_base(&self) -> Duration {
        self.delay_base
    }

    /// Delay before the attempt following `attempt` (0-based).
    #[must_use]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.delay_base.saturating_mul(attempt.saturating_add(1))
    }

    /// Decides what to do after attempt `attempt` (0-based) failed.
    #[must_use]
    pub fn decide(&self, attempt: u32, kind: FailureKind) -> RetryDecision {
        match kind {
            FailureKind::Transient if attempt < self.max_retries => RetryDecision::Retry {
                delay: self.delay_for(attempt),
            },
            FailureKind::Transient | FailureKind::Permanent => RetryDecision::GiveUp,
        }
    }
}

/// Runs `operation` under `policy` until it succeeds or the policy gives up.
///
/// `operation` receives the 0-based attempt index. The error returned is the
/// one produced by the last attempt, unchanged.
///
/// # Errors
///
/// Returns the last attempt's error when it is permanent or when all retries
/// are exhausted.
pub async fn retry_with_policy<T, E, F, Fut>(policy: &RetryPolicy, mut operation: F) -> Result<T, E>
where
    E: Classify + Display,
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt = 0u32;
    loop {
        let err = match operation(attempt).await {
            Ok(value) => return Ok(value),
            Err(err) => err,
        };

        match policy.decide(attempt, err.failure_kind()) {
            RetryDecision::Retry { delay } => {
                attempt = attempt.saturating_add(1);
                tracing::warn!(
                    retry = attempt,
                    max_retries = policy.max_retries,
                    delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                    error = %err,
                    "Transient failure. Retrying..."
                );
                tokio::time::sleep(delay).await;
            }
            RetryDecision::GiveUp => return Err(err),
        }
    }
}
