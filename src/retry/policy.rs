//! Retry policy and delay configuration.

use crate::backoff::ExponentialBackoff;
use std::fmt;
use std::time::Duration;

/// How long to pause before each retry.
///
/// The computed variant receives the zero-based retry count (0 before the
/// first retry, 1 before the second, and so on) and is evaluated fresh for
/// every retry. An [`ExponentialBackoff`] converts directly into this
/// variant, which is the intended integration point between the two.
pub enum RetryDelay {
    /// Retry immediately, without pausing.
    None,
    /// The same pause before every retry.
    Fixed(Duration),
    /// A pause computed from the zero-based retry count.
    Computed(Box<dyn Fn(u32) -> Duration + Send + Sync>),
}

impl RetryDelay {
    /// Build a computed delay from a function of the retry count.
    pub fn computed<F>(f: F) -> Self
    where
        F: Fn(u32) -> Duration + Send + Sync + 'static,
    {
        RetryDelay::Computed(Box::new(f))
    }

    /// The pause before the given zero-based retry, if any.
    pub(crate) fn before_retry(&self, retry: u32) -> Option<Duration> {
        match self {
            RetryDelay::None => None,
            RetryDelay::Fixed(duration) => Some(*duration),
            RetryDelay::Computed(f) => Some(f(retry)),
        }
    }
}

impl Default for RetryDelay {
    fn default() -> Self {
        RetryDelay::None
    }
}

impl fmt::Debug for RetryDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryDelay::None => f.write_str("None"),
            RetryDelay::Fixed(duration) => f.debug_tuple("Fixed").field(duration).finish(),
            RetryDelay::Computed(_) => f.write_str("Computed(..)"),
        }
    }
}

impl From<Duration> for RetryDelay {
    fn from(duration: Duration) -> Self {
        RetryDelay::Fixed(duration)
    }
}

impl From<ExponentialBackoff> for RetryDelay {
    fn from(backoff: ExponentialBackoff) -> Self {
        RetryDelay::computed(move |retry| backoff.delay(retry))
    }
}

/// Policy for retrying a failed operation.
///
/// `times` counts *additional* attempts after the first, so a policy with
/// `times = 3` allows up to 4 invocations in total. `times = 0` means exactly
/// one attempt and no retries.
///
/// # Examples
///
/// ```rust
/// use steadfast::retry::RetryPolicy;
/// use steadfast::backoff::ExponentialBackoff;
/// use std::time::Duration;
///
/// // Defaults: 3 retries, no delay between attempts.
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.times(), 3);
///
/// // Capped exponential pauses between attempts.
/// let policy = RetryPolicy::builder()
///     .times(5)
///     .delay(
///         ExponentialBackoff::builder()
///             .max_time(Duration::from_secs(30))
///             .build(),
///     )
///     .build();
/// ```
#[derive(Debug)]
pub struct RetryPolicy {
    times: u32,
    delay: RetryDelay,
}

impl Default for RetryPolicy {
    /// Three retries, no pause between attempts.
    fn default() -> Self {
        Self {
            times: 3,
            delay: RetryDelay::None,
        }
    }
}

impl RetryPolicy {
    /// Create a new builder for configuring a retry policy.
    pub fn builder() -> RetryPolicyBuilder {
        RetryPolicyBuilder::default()
    }

    /// Number of retries after the initial attempt.
    pub fn times(&self) -> u32 {
        self.times
    }

    pub(crate) fn delay_before_retry(&self, retry: u32) -> Option<Duration> {
        self.delay.before_retry(retry)
    }
}

/// Builder for configuring [`RetryPolicy`].
#[derive(Debug, Default)]
pub struct RetryPolicyBuilder {
    times: Option<u32>,
    delay: Option<RetryDelay>,
}

impl RetryPolicyBuilder {
    /// Set the number of retries after the initial attempt.
    ///
    /// Default: 3.
    pub fn times(mut self, times: u32) -> Self {
        self.times = Some(times);
        self
    }

    /// Set the pause taken before each retry.
    ///
    /// Accepts anything convertible into [`RetryDelay`]: a [`Duration`] for a
    /// fixed pause, an [`ExponentialBackoff`], or a `RetryDelay` directly.
    ///
    /// Default: no pause.
    pub fn delay(mut self, delay: impl Into<RetryDelay>) -> Self {
        self.delay = Some(delay.into());
        self
    }

    /// Build the [`RetryPolicy`] instance.
    pub fn build(self) -> RetryPolicy {
        RetryPolicy {
            times: self.times.unwrap_or(3),
            delay: self.delay.unwrap_or_default(),
        }
    }
}
