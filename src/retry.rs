//! Bounded retry for resource calls.

use std::time::Duration;

use crate::ClientConfig;

/// Counts consecutive transport failures of one logical call and decides whether to try
/// again.
///
/// The policy allows `max_attempts` retries after the initial request, so a call that keeps
/// failing reaches the transport `max_attempts + 1` times. The counter goes back to zero on
/// success and when the policy gives up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    enabled: bool,
    max_attempts: u32,
    backoff: Duration,
    current: u32,
}

/// Result of a retry decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDecision {
    /// Sign the request again and resend it after the given pause.
    Retry(Duration),
    /// Surface the last error.
    GiveUp,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy::new(3)
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32) -> Self {
        RetryPolicy {
            enabled: true,
            max_attempts,
            backoff: Duration::ZERO,
            current: 0,
        }
    }

    /// Disables retries.
    pub fn no_retry() -> Self {
        RetryPolicy {
            enabled: false,
            ..RetryPolicy::new(0)
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        RetryPolicy {
            enabled: config.retry,
            max_attempts: config.retry_attempts,
            backoff: config.retry_backoff,
            current: 0,
        }
    }

    pub fn with_backoff(mut self, backoff: Duration) -> Self {
        self.backoff = backoff;
        self
    }

    pub fn max_attempts(&self) -> u32 {
        if self.enabled {
            self.max_attempts
        } else {
            0
        }
    }

    /// Retries spent on the call in progress.
    pub fn current_retries(&self) -> u32 {
        self.current
    }

    /// Starts a new logical call with the full retry budget.
    pub fn reset(&mut self) {
        self.current = 0;
    }

    pub fn on_success(&mut self) {
        self.reset();
    }

    /// Records a failed attempt.
    pub fn on_failure(&mut self) -> RetryDecision {
        if self.current < self.max_attempts() {
            self.current += 1;
            RetryDecision::Retry(self.backoff)
        } else {
            self.reset();
            RetryDecision::GiveUp
        }
    }
}
