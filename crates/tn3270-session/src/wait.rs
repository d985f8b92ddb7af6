//! Bounded-time condition polling.
//!
//! After any input that triggers a host-side repaint, screen state must not
//! be read or written until the expected text or field has appeared. The
//! correct pattern is: poll for the expected condition at a known location
//! with a short time limit tuned to typical redraw latency, then proceed.
//!
//! The poll is deliberately a synchronous, blocking busy-spin on the calling
//! thread. Wait windows are small (hundreds of milliseconds), so bounded
//! worst-case latency wins over CPU efficiency, and a scheduler-yielding wait
//! could systematically overshoot the wall-clock budget.

use std::time::{Duration, Instant};

use tn3270_core::{Error, Result};

/// Result of one bounded poll.
#[derive(Debug, Clone, Copy)]
pub struct WaitOutcome {
    /// Wall-clock time spent polling
    pub elapsed: Duration,
    /// True iff the predicate never returned true within the budget
    pub expired: bool,
}

/// Poll a predicate until it returns true or a time budget runs out.
#[derive(Debug, Clone, Copy)]
pub struct WaitUntil {
    time_limit: Duration,
}

impl WaitUntil {
    /// Create a poller with a time limit in fractional seconds.
    ///
    /// Fails with `Error::InvalidArgument` unless the limit is finite and
    /// strictly positive.
    pub fn new(time_limit_secs: f64) -> Result<Self> {
        if !time_limit_secs.is_finite() || time_limit_secs <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "time_limit must be a positive number of seconds, got {time_limit_secs}"
            )));
        }
        Ok(Self {
            time_limit: Duration::from_secs_f64(time_limit_secs),
        })
    }

    /// Create a poller from a Duration time limit.
    pub fn from_duration(time_limit: Duration) -> Result<Self> {
        if time_limit.is_zero() {
            return Err(Error::InvalidArgument(
                "time_limit must be positive".to_string(),
            ));
        }
        Ok(Self { time_limit })
    }

    /// The configured time limit.
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }

    /// Poll the predicate in a tight loop on the calling thread.
    ///
    /// Returns when the predicate first returns true, or when elapsed
    /// wall-clock time reaches the limit, whichever comes first. Expiry is
    /// reported, never raised; callers that require the condition must check
    /// `expired` themselves (or use [`WaitUntil::poll_required`]). Predicate
    /// errors propagate immediately.
    pub fn poll<F>(&self, mut found: F) -> Result<WaitOutcome>
    where
        F: FnMut() -> Result<bool>,
    {
        let start = Instant::now();
        let mut met = false;

        loop {
            if found()? {
                met = true;
                break;
            }
            if start.elapsed() >= self.time_limit {
                break;
            }
        }

        Ok(WaitOutcome {
            elapsed: start.elapsed(),
            expired: !met,
        })
    }

    /// Poll and escalate expiry to `Error::ScreenWait`.
    ///
    /// `condition` names the awaited screen state for the error message.
    pub fn poll_required<F>(&self, condition: &str, found: F) -> Result<WaitOutcome>
    where
        F: FnMut() -> Result<bool>,
    {
        let outcome = self.poll(found)?;
        if outcome.expired {
            return Err(Error::ScreenWait {
                condition: condition.to_string(),
                waited_ms: outcome.elapsed.as_millis() as u64,
            });
        }
        Ok(outcome)
    }
}
