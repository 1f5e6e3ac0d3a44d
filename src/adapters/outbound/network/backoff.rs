use crate::ports::outbound::BackoffPolicy;
use std::time::Duration;

/// Pauses for the same interval after every failure
#[derive(Debug, Clone, Copy)]
pub struct FixedCooldown {
    interval: Duration,
}

impl FixedCooldown {
    /// Five minutes, long enough for registry rate-limit windows to reset
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(300);

    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedCooldown {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

impl BackoffPolicy for FixedCooldown {
    fn cooldown(&self, _consecutive_failures: u32) -> Duration {
        self.interval
    }
}

/// Never pauses
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCooldown;

impl BackoffPolicy for NoCooldown {
    fn cooldown(&self, _consecutive_failures: u32) -> Duration {
        Duration::ZERO
    }
}
