//! Countdown and delay configuration.

use std::time::Duration;

/// Default length of the transfer window, in seconds.
pub const DEFAULT_TRANSFER_DEADLINE_SECS: u32 = 180;

/// Default length of the processing countdown, in seconds.
pub const DEFAULT_PROCESSING_SECS: u32 = 60;

/// Default simulated verification delay.
pub const DEFAULT_VERIFICATION_DELAY: Duration = Duration::from_secs(2);

/// Countdown lengths and the simulated verification delay.
///
/// Countdowns tick once per second; their lengths are whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    pub transfer_deadline_secs: u32,
    pub processing_secs: u32,
    pub verification_delay: Duration,
}

impl TimingConfig {
    /// Period of both countdown timers.
    pub const TICK: Duration = Duration::from_secs(1);
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            transfer_deadline_secs: DEFAULT_TRANSFER_DEADLINE_SECS,
            processing_secs: DEFAULT_PROCESSING_SECS,
            verification_delay: DEFAULT_VERIFICATION_DELAY,
        }
    }
}
