//! Events flowing into and out of the wizard controller.
//!
//! # Event Flow
//!
//! 1. Front end sends `Command` -> `WizardController`
//! 2. `Scheduler` timer tasks send `TimerEvent` -> `WizardController`
//! 3. `WizardController` sends `Notification` -> front end and publishes
//!    the state snapshot on a watch channel

pub mod channels;
pub mod types;

pub use channels::{
    CommandReceiver, CommandSender, DEFAULT_CHANNEL_BUFFER, NotificationReceiver,
    NotificationSender, TimerEventReceiver, TimerEventSender, command_channel,
    notification_channel, timer_event_channel,
};

pub use types::{TimerEvent, TimerKind, TimerSchedule};
