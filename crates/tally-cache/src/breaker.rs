//! Circuit breaker for the shared tier.
//!
//! Explicit three-state machine: closed (counting failures), open (all
//! calls rejected until the cool-down passes), half-open (one probe
//! allowed; success closes, failure re-opens). State is exposed for
//! observability.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Observable breaker state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakerState {
    Closed,
    Open,
    HalfOpen,
}

#[derive(Debug)]
enum Inner {
    Closed { failures: u32 },
    Open { since: Instant },
    HalfOpen,
}

/// Failure-counting circuit breaker.
pub struct CircuitBreaker {
    inner: Mutex<Inner>,
    failure_threshold: u32,
    cooldown: Duration,
}

impl CircuitBreaker {
    pub fn new(failure_threshold: u32, cooldown: Duration) -> Self {
        Self {
            inner: Mutex::new(Inner::Closed { failures: 0 }),
            failure_threshold: failure_threshold.max(1),
            cooldown,
        }
    }

    /// Whether a call may proceed. An open breaker past its cool-down
    /// transitions to half-open and admits one probe.
    pub fn allow(&self) -> bool {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match &*inner {
            Inner::Closed { .. } => true,
            Inner::HalfOpen => true,
            Inner::Open { since } => {
                if since.elapsed() >= self.cooldown {
                    *inner = Inner::HalfOpen;
                    true
                } else {
                    false
                }
            }
        }
    }

    /// Record a successful call: closes the breaker and resets the count.
    pub fn record_success(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        *inner = Inner::Closed { failures: 0 };
    }

    /// Record a failed call. Trips to open at the threshold; a half-open
    /// probe failure re-opens immediately.
    pub fn record_failure(&self) {
        let mut inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match &mut *inner {
            Inner::Closed { failures } => {
                *failures += 1;
                if *failures >= self.failure_threshold {
                    *inner = Inner::Open {
                        since: Instant::now(),
                    };
                }
            }
            Inner::HalfOpen => {
                *inner = Inner::Open {
                    since: Instant::now(),
                };
            }
            Inner::Open { .. } => {}
        }
    }

    /// Current state, for health reporting.
    pub fn state(&self) -> BreakerState {
        let inner = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match &*inner {
            Inner::Closed { .. } => BreakerState::Closed,
            Inner::Open { .. } => BreakerState::Open,
            Inner::HalfOpen => BreakerState::HalfOpen,
        }
    }
}
