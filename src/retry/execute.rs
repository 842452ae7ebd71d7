//! The bounded retry loop.

use super::policy::RetryPolicy;
use std::future::Future;

/// Execute an operation, retrying it under the given policy.
///
/// The operation is invoked immediately (attempt 0, never delayed). On
/// failure, while retries remain, the executor pauses per `policy` and
/// invokes the operation again. Attempts are strictly sequential: attempt
/// `k + 1` never starts before attempt `k` has settled.
///
/// Resolves with the first successful attempt's value. Once `policy.times()`
/// retries are exhausted, fails with the **last** attempt's error; earlier
/// errors are discarded, not aggregated.
///
/// # Examples
///
/// ```rust
/// use steadfast::retry::{RetryPolicy, with_retries};
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// # async fn example() -> Result<(), std::io::Error> {
/// let attempts = Arc::new(AtomicU32::new(0));
/// let policy = RetryPolicy::builder().times(3).build();
///
/// let value = with_retries(
///     || {
///         let attempts = Arc::clone(&attempts);
///         async move {
///             if attempts.fetch_add(1, Ordering::SeqCst) < 2 {
///                 Err(std::io::Error::other("transient"))
///             } else {
///                 Ok(42)
///             }
///         }
///     },
///     &policy,
/// )
/// .await?;
///
/// assert_eq!(value, 42);
/// assert_eq!(attempts.load(Ordering::SeqCst), 3);
/// # Ok(())
/// # }
/// ```
pub async fn with_retries<F, Fut, T, E>(operation: F, policy: &RetryPolicy) -> Result<T, E>
where
    F: Fn() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(error) => {
                if attempt >= policy.times() {
                    return Err(error);
                }
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    retry = attempt,
                    remaining = policy.times() - attempt,
                    "attempt failed, retrying"
                );
                if let Some(delay) = policy.delay_before_retry(attempt) {
                    tokio::time::sleep(delay).await;
                }
                attempt += 1;
            }
        }
    }
}

impl RetryPolicy {
    /// Execute an operation under this policy.
    ///
    /// Method-style counterpart of [`with_retries`].
    pub async fn run<F, Fut, T, E>(&self, operation: F) -> Result<T, E>
    where
        F: Fn() -> Fut,
        Fut: Future<Output = Result<T, E>>,
    {
        with_retries(operation, self).await
    }
}
