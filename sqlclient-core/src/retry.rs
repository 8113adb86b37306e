//! Retry policy for connection and session failures
//!
//! A [`RetryPolicy`] says whether a failed operation is rerun and how long to
//! wait before doing so. [`retry_with_policy`] applies it; the operations
//! themselves never sleep or loop.

use std::sync::Arc;
use std::time::Duration;

use crate::error::Error;

/// Whether and how to retry a failing operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Rerun on retryable errors, indefinitely
    pub enabled: bool,
    /// Pause before each rerun
    pub delay: Duration,
}

impl RetryPolicy {
    /// Fail on the first error
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            delay: Duration::ZERO,
        }
    }

    /// Retry forever, waiting `delay` between attempts
    pub const fn forever(delay: Duration) -> Self {
        Self {
            enabled: true,
            delay,
        }
    }
}

/// Information about a retry attempt
#[derive(Debug)]
pub struct RetryInfo<'e> {
    /// Which attempt failed (1-based)
    pub attempt: usize,
    /// How long we'll wait before retrying
    pub delay: Duration,
    /// The error that triggered the retry
    pub error: &'e Error,
}

/// Callback type for retry events
pub type RetryCallback = Arc<dyn Fn(&RetryInfo<'_>)>;

/// Run `op` under `policy`
///
/// Returns the first success. Errors that are not retryable, or any error
/// when the policy is disabled, are returned as is. Before each rerun the
/// callback (if any) is told about the failure.
///
/// # Example
///
/// ```
/// use sqlclient_core::retry::{retry_with_policy, RetryPolicy};
/// use sqlclient_core::Error;
///
/// let mut attempts = 0;
/// let result = retry_with_policy(
///     RetryPolicy::forever(std::time::Duration::ZERO),
///     || {
///         attempts += 1;
///         if attempts < 3 {
///             Err(Error::Io(std::io::ErrorKind::BrokenPipe.into()))
///         } else {
///             Ok(attempts)
///         }
///     },
///     None,
/// );
/// assert_eq!(result.unwrap(), 3);
/// ```
pub fn retry_with_policy<F, T>(
    policy: RetryPolicy,
    mut op: F,
    on_retry: Option<&RetryCallback>,
) -> Result<T, Error>
where
    F: FnMut() -> Result<T, Error>,
{
    let mut attempt = 0;
    loop {
        attempt += 1;
        match op() {
            Ok(result) => return Ok(result),
            Err(err) => {
                if !policy.enabled || !err.is_retryable() {
                    return Err(err);
                }

                log::info!("Attempt {} failed with {}, retrying: {}", attempt, err.kind(), err);
                if let Some(callback) = on_retry {
                    callback(&RetryInfo {
                        attempt,
                        delay: policy.delay,
                        error: &err,
                    });
                }

                if !policy.delay.is_zero() {
                    std::thread::sleep(policy.delay);
                }
            }
        }
    }
}
