//! Bounded-retry timing for the external boundaries.
//!
//! Both boundaries (symbol source, wall session) retry a fixed number of
//! times with a configurable delay shape. Delay math is pure so callers
//! can test schedules without a clock.

use std::time::Duration;

/// Delay shape between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryDelay {
    /// Constant cooldown between attempts.
    Fixed(Duration),
    /// `base * 2^(attempt-1)`, capped at `max`.
    Exponential { base: Duration, max: Duration },
}

/// Attempt budget plus delay shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay: RetryDelay,
}

impl RetryPolicy {
    pub fn fixed(max_attempts: u32, cooldown: Duration) -> Self {
        Self {
            max_attempts,
            delay: RetryDelay::Fixed(cooldown),
        }
    }

    pub fn exponential(max_attempts: u32, base: Duration, max: Duration) -> Self {
        Self {
            max_attempts,
            delay: RetryDelay::Exponential { base, max },
        }
    }

    /// Delay to wait after a failed `attempt` (1-based) before the next one.
    ///
    /// Exponential: attempt=1 -> base, attempt=2 -> 2*base, attempt=3 ->
    /// 4*base, capped at `max`. Exponent is clamped so large attempt
    /// numbers cannot overflow.
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self.delay {
            RetryDelay::Fixed(cooldown) => cooldown,
            RetryDelay::Exponential { base, max } => {
                let exponent = attempt.saturating_sub(1).min(10);
                let delay = base.saturating_mul(1u32 << exponent);
                delay.min(max)
            }
        }
    }

    /// True while `attempt` (1-based) is within budget.
    pub fn allows(&self, attempt: u32) -> bool {
        attempt <= self.max_attempts
    }
}

impl Default for RetryPolicy {
    /// Three attempts, five-second cooldown.
    fn default() -> Self {
        Self::fixed(3, Duration::from_secs(5))
    }
}
