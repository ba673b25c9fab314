use std::time::Duration;

/// Attempt accounting for the request retry loop.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct RetrySchedule {
    max_attempts: usize,
    base_delay_ms: u64,
}

impl RetrySchedule {
    /// A schedule of `max_attempts` total attempts.
    ///
    /// Zero is clamped to one: a request that runs at all runs at least once.
    pub(crate) fn new(max_attempts: usize, base_delay_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay_ms,
        }
    }

    pub(crate) fn attempts(&self) -> usize {
        self.max_attempts
    }

    /// Backoff delay to wait after the failed zero-based `attempt`, or
    /// `None` once no attempt remains.
    ///
    /// The delay doubles per attempt: base, 2x, 4x, ... The exponent is
    /// capped and the multiplication saturates, so large schedules cannot
    /// overflow.
    pub(crate) fn delay_after(&self, attempt: usize) -> Option<Duration> {
        if attempt + 1 >= self.max_attempts {
            return None;
        }
        let exp = attempt.min(16) as u32;
        let multiplier = 1u64 << exp;
        Some(Duration::from_millis(
            self.base_delay_ms.saturating_mul(multiplier),
        ))
    }
}
