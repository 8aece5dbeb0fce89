//! WizardController processor.
//!
//! The WizardController is responsible for:
//! - Receiving user `Command`s and applying them to the `Wizard`
//! - Receiving `TimerEvent`s, dropping stale ones, and feeding the rest
//!   to the `Wizard`
//! - Executing the resulting effects (timers, notifications, clipboard)
//! - Publishing a snapshot of the state after every change
//!
//! It is the only task that mutates wizard state.

use super::scheduler::Scheduler;
use crate::collaborators::Clipboard;
use crate::events::{
    CommandReceiver, NotificationSender, TimerEvent, TimerEventReceiver, TimerKind,
    timer_event_channel,
};
use crate::wizard::{Command, Effect, Effects, Wizard, WizardError, WizardState};
use paywiz_sdk::config::WizardSettings;
use paywiz_sdk::objects::Notification;
use rand::SeedableRng;
use rand::rngs::StdRng;
use time::OffsetDateTime;
use tokio::sync::watch;
use tracing::{debug, info, warn};

pub struct WizardController {
    wizard: Wizard,
    scheduler: Scheduler,
    rng: StdRng,
    command_rx: CommandReceiver,
    timer_rx: TimerEventReceiver,
    notification_tx: NotificationSender,
    snapshot_tx: watch::Sender<WizardState>,
    clipboard: Box<dyn Clipboard>,
    shutdown_rx: watch::Receiver<bool>,
}

impl WizardController {
    /// Create a new WizardController.
    ///
    /// # Arguments
    ///
    /// * `settings` - Flow variant, timings, transfer targets
    /// * `command_rx` - Receiver for user commands
    /// * `notification_tx` - Sender for user-facing notifications
    /// * `snapshot_tx` - Watch sender the state snapshot is published on
    /// * `clipboard` - Clipboard used by the copy action
    /// * `shutdown_rx` - Receiver for shutdown signal
    pub fn new(
        settings: WizardSettings,
        command_rx: CommandReceiver,
        notification_tx: NotificationSender,
        snapshot_tx: watch::Sender<WizardState>,
        clipboard: Box<dyn Clipboard>,
        shutdown_rx: watch::Receiver<bool>,
    ) -> Self {
        let (timer_tx, timer_rx) = timer_event_channel();
        let scheduler = Scheduler::new(settings.timing, timer_tx);
        let wizard = Wizard::new(settings);
        snapshot_tx.send_replace(wizard.state().clone());

        Self {
            wizard,
            scheduler,
            rng: StdRng::from_os_rng(),
            command_rx,
            timer_rx,
            notification_tx,
            snapshot_tx,
            clipboard,
            shutdown_rx,
        }
    }

    /// Replace the identifier generator, for reproducible identifiers.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Run the WizardController until shutdown or until the command
    /// channel closes.
    pub async fn run(mut self) {
        info!(step = %self.wizard.state().step, "WizardController started");

        loop {
            tokio::select! {
                biased;

                // Shutdown has highest priority.
                changed = self.shutdown_rx.changed() => {
                    if changed.is_err() || *self.shutdown_rx.borrow() {
                        info!("WizardController received shutdown signal");
                        break;
                    }
                }

                // User commands.
                command = self.command_rx.recv() => {
                    let Some(command) = command else {
                        info!("Command channel closed");
                        break;
                    };
                    self.handle_command(command).await;
                }

                // Timer events.
                Some(event) = self.timer_rx.recv() => {
                    self.handle_timer(event).await;
                }
            }
        }

        self.scheduler.cancel_all();
        info!("WizardController shutdown complete");
    }

    async fn handle_command(&mut self, command: Command) {
        let name = command.name();
        debug!(command = name, step = %self.wizard.state().step, "Received command");

        match self.wizard.apply(command) {
            Ok(effects) => self.execute(effects).await,
            Err(WizardError::Validation(e)) => {
                info!(error = %e, "Form rejected");
                self.notify(e.notification()).await;
            }
            Err(e) => {
                warn!(command = name, error = %e, "Command rejected");
            }
        }
        self.publish();
    }

    async fn handle_timer(&mut self, event: TimerEvent) {
        if !self.scheduler.is_current(&event) {
            debug!(timer = %event.kind, generation = event.generation, "Dropping stale timer event");
            return;
        }
        if event.kind == TimerKind::Verification {
            self.scheduler.retire(&event);
        }

        let now = now();
        let effects = self.wizard.on_timer(event.kind, now, &mut self.rng);
        self.execute(effects).await;
        self.publish();
    }

    async fn execute(&mut self, effects: Effects) {
        for effect in effects {
            match effect {
                Effect::Notify(notification) => self.notify(notification).await,
                Effect::StartTimer(kind) => {
                    self.scheduler.start(kind);
                }
                Effect::CancelTimer(kind) => self.scheduler.cancel(kind),
                Effect::CopyToClipboard(text) => match self.clipboard.copy(&text) {
                    Ok(()) => {
                        self.notify(Notification::info(
                            "Скопировано",
                            "Данные скопированы в буфер обмена",
                        ))
                        .await;
                    }
                    Err(e) => warn!(error = %e, "Failed to copy to clipboard"),
                },
            }
        }
    }

    async fn notify(&self, notification: Notification) {
        if let Err(e) = self.notification_tx.send(notification).await {
            warn!(error = %e, "Failed to deliver notification, receiver dropped");
        }
    }

    fn publish(&self) {
        let state = self.wizard.state();
        self.snapshot_tx.send_if_modified(|current| {
            if current == state {
                return false;
            }
            *current = state.clone();
            true
        });
    }
}

/// Local wall-clock time, falling back to UTC when the offset is unknown.
fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}
