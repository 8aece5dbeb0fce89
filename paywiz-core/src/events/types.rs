//! Event type definitions.
//!
//! Timer events are ephemeral. They carry the timer kind and the generation
//! it was started with, never any wizard data.

use paywiz_sdk::config::TimingConfig;
use std::fmt;
use std::time::Duration;

/// The three timers the wizard can run. At most one of each is live.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// 1 s countdown of the transfer window.
    TransferDeadline,
    /// One-shot simulated verification delay.
    Verification,
    /// 1 s countdown of the processing screen.
    Processing,
}

/// How a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerSchedule {
    Repeating(Duration),
    Once(Duration),
}

impl TimerKind {
    pub const ALL: [TimerKind; 3] = [
        TimerKind::TransferDeadline,
        TimerKind::Verification,
        TimerKind::Processing,
    ];

    pub fn schedule(self, timing: &TimingConfig) -> TimerSchedule {
        match self {
            TimerKind::TransferDeadline | TimerKind::Processing => {
                TimerSchedule::Repeating(TimingConfig::TICK)
            }
            TimerKind::Verification => TimerSchedule::Once(timing.verification_delay),
        }
    }
}

impl fmt::Display for TimerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimerKind::TransferDeadline => write!(f, "transfer_deadline"),
            TimerKind::Verification => write!(f, "verification"),
            TimerKind::Processing => write!(f, "processing"),
        }
    }
}

/// Emitted by a running timer task.
///
/// `generation` identifies the start that spawned the task. Events whose
/// generation is no longer current were produced by a cancelled timer and
/// must be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerEvent {
    pub kind: TimerKind,
    pub generation: u64,
}
