use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::Duration;

/// Outcome of classifying one failed request attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RetryDecision {
    /// The failure is terminal; surface it to the caller.
    DoNotRetry,
    /// Resubmit the same request after the given wait.
    RetryAfter(Duration),
}

/// Receives the out-of-band signal raised when the API answers 401.
///
/// The signal is delivered synchronously from whichever task observed the
/// response; implementations must be cheap and must not block.
pub trait AuthorizationObserver: Send + Sync {
    fn authorization_lost(&self);
}

/// Decides, per failed attempt, whether a request is resubmitted.
///
/// Server errors (5xx) are retried with a fixed delay until `retry_limit`
/// retries have been made. A 401 is always terminal and additionally notifies
/// the registered observer. Every other failure, including transport failures
/// that never produced a status code, is terminal.
pub struct RetryPolicy {
    retry_limit: u32,
    retry_delay: Duration,
    // Registration may race with in-flight requests firing the signal.
    observer: RwLock<Option<Arc<dyn AuthorizationObserver>>>,
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("retry_limit", &self.retry_limit)
            .field("retry_delay", &self.retry_delay)
            .finish()
    }
}

impl RetryPolicy {
    /// Creates a policy with a fixed retry budget and delay.
    pub fn new(retry_limit: u32, retry_delay: Duration) -> Self {
        Self {
            retry_limit,
            retry_delay,
            observer: RwLock::new(None),
        }
    }

    /// Maximum number of retries after the initial attempt.
    pub fn retry_limit(&self) -> u32 {
        self.retry_limit
    }

    /// Fixed wait between retry attempts.
    pub fn retry_delay(&self) -> Duration {
        self.retry_delay
    }

    /// Registers the observer notified on authorization loss.
    ///
    /// At most one observer is held; a later registration replaces the
    /// earlier one. With no observer registered the signal is dropped.
    pub fn set_observer(&self, observer: Arc<dyn AuthorizationObserver>) {
        if let Ok(mut slot) = self.observer.write() {
            *slot = Some(observer);
        }
    }

    /// Classifies one failed attempt.
    ///
    /// `status` is the observed HTTP status, absent when the failure happened
    /// below the HTTP layer. `attempts` counts the retries already made for
    /// this logical request.
    pub fn classify(&self, status: Option<u16>, attempts: u32) -> RetryDecision {
        match status {
            Some(401) => {
                // Fires once per failed attempt, even though the decision
                // is terminal.
                self.notify_authorization_lost();
                RetryDecision::DoNotRetry
            }
            Some(status) if (500..600).contains(&status) => {
                if attempts < self.retry_limit {
                    RetryDecision::RetryAfter(self.retry_delay)
                } else {
                    RetryDecision::DoNotRetry
                }
            }
            _ => RetryDecision::DoNotRetry,
        }
    }

    fn notify_authorization_lost(&self) {
        // Clone out of the slot so the lock is not held across the callback.
        let observer = match self.observer.read() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        if let Some(observer) = observer {
            #[cfg(feature = "tracing")]
            tracing::warn!("authorization lost, notifying observer");
            observer.authorization_lost();
        }
    }
}
