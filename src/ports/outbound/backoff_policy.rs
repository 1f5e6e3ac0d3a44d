use std::time::Duration;

/// BackoffPolicy port deciding how long to pause after a failed registry call
///
/// The gateway pauses once per failure and then gives up on that call; there is
/// no automatic retry. Tests inject a zero-duration policy.
pub trait BackoffPolicy: Send + Sync {
    /// Returns the pause to apply after `consecutive_failures` failed calls in a row
    fn cooldown(&self, consecutive_failures: u32) -> Duration;
}
