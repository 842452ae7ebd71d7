//! Exponential backoff with uniform jitter.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Exponential backoff delay calculator.
///
/// For a zero-based `attempt`, the delay is:
///
/// ```text
/// delay = 2^attempt * slot_time + uniform[0, slot_time)
/// ```
///
/// capped at `max_time` when configured: any computed value above the cap is
/// returned as `max_time` exactly, never rescaled. The jitter term keeps
/// independent callers from retrying in lockstep.
///
/// This type is plain data (and serde-(de)serializable) so applications can
/// carry it in their configuration. It performs no waiting itself; pair it
/// with [`RetryPolicy`](crate::retry::RetryPolicy) or use the returned
/// [`Duration`] with any timer.
///
/// # Examples
///
/// ```rust
/// use steadfast::backoff::ExponentialBackoff;
/// use std::time::Duration;
///
/// // Defaults: slot_time = 500ms, no cap
/// let backoff = ExponentialBackoff::default();
/// assert!(backoff.delay(0) >= Duration::from_millis(500));
/// assert!(backoff.delay(0) < Duration::from_millis(1000));
///
/// let capped = ExponentialBackoff::builder()
///     .slot_time(Duration::from_secs(1))
///     .max_time(Duration::from_secs(10))
///     .build();
/// assert_eq!(capped.delay(30), Duration::from_secs(10));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "UncheckedBackoff")]
pub struct ExponentialBackoff {
    /// Base slot duration; both the growth unit and the jitter range.
    slot_time: Duration,
    /// Hard upper bound on the computed delay.
    max_time: Option<Duration>,
}

impl ExponentialBackoff {
    /// Create a new builder for configuring exponential backoff.
    pub fn builder() -> ExponentialBackoffBuilder {
        ExponentialBackoffBuilder::default()
    }

    /// The configured slot time.
    pub fn slot_time(&self) -> Duration {
        self.slot_time
    }

    /// The configured cap, if any.
    pub fn max_time(&self) -> Option<Duration> {
        self.max_time
    }

    /// Compute the delay for a zero-based attempt using the thread-local RNG.
    pub fn delay(&self, attempt: u32) -> Duration {
        self.delay_with(attempt, &mut rand::thread_rng())
    }

    /// Compute the delay for a zero-based attempt using the supplied RNG.
    ///
    /// Passing a seeded generator (for example `StdRng::seed_from_u64`) makes
    /// the result fully deterministic, which is how the exact-value tests in
    /// this crate are written.
    pub fn delay_with<R: Rng + ?Sized>(&self, attempt: u32, rng: &mut R) -> Duration {
        let slot_ms = self.slot_time.as_millis() as u64;
        assert!(slot_ms > 0, "slot_time must be at least one millisecond");

        // 2^attempt * slot saturates rather than panicking; the cap (when
        // configured) still applies to the saturated value.
        let base_ms = 2u64
            .checked_pow(attempt)
            .and_then(|factor| factor.checked_mul(slot_ms))
            .unwrap_or(u64::MAX);
        let jitter_ms = rng.gen_range(0..slot_ms);
        let delay = Duration::from_millis(base_ms.saturating_add(jitter_ms));

        match self.max_time {
            Some(max) if delay > max => max,
            _ => delay,
        }
    }
}

impl Default for ExponentialBackoff {
    /// Slot time of 500ms, no cap.
    fn default() -> Self {
        Self {
            slot_time: Duration::from_millis(500),
            max_time: None,
        }
    }
}

/// Raw deserialized form of [`ExponentialBackoff`], validated before the
/// values can reach the delay computation. A config-supplied slot time below
/// one millisecond is rejected at load time, matching the builder.
#[derive(Deserialize)]
#[serde(default)]
struct UncheckedBackoff {
    slot_time: Duration,
    max_time: Option<Duration>,
}

impl Default for UncheckedBackoff {
    fn default() -> Self {
        let defaults = ExponentialBackoff::default();
        Self {
            slot_time: defaults.slot_time,
            max_time: defaults.max_time,
        }
    }
}

impl TryFrom<UncheckedBackoff> for ExponentialBackoff {
    type Error = String;

    fn try_from(unchecked: UncheckedBackoff) -> Result<Self, Self::Error> {
        if unchecked.slot_time.as_millis() == 0 {
            return Err("slot_time must be at least one millisecond".to_string());
        }
        Ok(Self {
            slot_time: unchecked.slot_time,
            max_time: unchecked.max_time,
        })
    }
}

/// Builder for configuring [`ExponentialBackoff`].
#[derive(Debug, Default)]
pub struct ExponentialBackoffBuilder {
    slot_time: Option<Duration>,
    max_time: Option<Duration>,
}

impl ExponentialBackoffBuilder {
    /// Set the slot time (growth unit and jitter range).
    ///
    /// Default: 500ms. Must be at least one millisecond.
    pub fn slot_time(mut self, slot_time: Duration) -> Self {
        self.slot_time = Some(slot_time);
        self
    }

    /// Set a hard cap on the computed delay.
    ///
    /// Default: no cap.
    pub fn max_time(mut self, max_time: Duration) -> Self {
        self.max_time = Some(max_time);
        self
    }

    /// Build the [`ExponentialBackoff`] instance.
    ///
    /// # Panics
    ///
    /// Panics if the configured slot time is below one millisecond; a
    /// non-positive slot breaks the growth formula and the jitter range.
    pub fn build(self) -> ExponentialBackoff {
        let slot_time = self.slot_time.unwrap_or(Duration::from_millis(500));
        assert!(
            slot_time.as_millis() > 0,
            "slot_time must be at least one millisecond"
        );
        ExponentialBackoff {
            slot_time,
            max_time: self.max_time,
        }
    }
}
