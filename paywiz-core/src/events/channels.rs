//! Channel factories and handle aliases.

use super::types::TimerEvent;
use crate::wizard::Command;
use paywiz_sdk::objects::Notification;
use tokio::sync::mpsc;

/// Default buffer size for event channels.
pub const DEFAULT_CHANNEL_BUFFER: usize = 256;

/// Sender handle for user commands.
pub type CommandSender = mpsc::Sender<Command>;
/// Receiver handle for user commands.
pub type CommandReceiver = mpsc::Receiver<Command>;

/// Sender handle for timer events.
pub type TimerEventSender = mpsc::Sender<TimerEvent>;
/// Receiver handle for timer events.
pub type TimerEventReceiver = mpsc::Receiver<TimerEvent>;

/// Sender handle for user-facing notifications.
pub type NotificationSender = mpsc::Sender<Notification>;
/// Receiver handle for user-facing notifications.
pub type NotificationReceiver = mpsc::Receiver<Notification>;

/// Create a new command channel.
///
/// The front end keeps the sender; the controller owns the receiver.
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

/// Create a new timer event channel.
///
/// Every timer task gets a clone of the sender.
pub fn timer_event_channel() -> (TimerEventSender, TimerEventReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}

/// Create a new notification channel.
pub fn notification_channel() -> (NotificationSender, NotificationReceiver) {
    mpsc::channel(DEFAULT_CHANNEL_BUFFER)
}
