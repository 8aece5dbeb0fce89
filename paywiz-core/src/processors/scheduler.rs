//! Scheduler for the wizard timers.
//!
//! Each running timer is a spawned tokio task that sends [`TimerEvent`]s
//! into the controller's timer channel. Starting a timer aborts any
//! previous timer of the same kind and hands out a fresh generation, so
//! events already queued by the old task are recognised as stale.

use crate::events::{TimerEvent, TimerEventSender, TimerKind, TimerSchedule};
use paywiz_sdk::config::TimingConfig;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at, sleep};
use tracing::{debug, warn};

struct ActiveTimer {
    kind: TimerKind,
    generation: u64,
    handle: JoinHandle<()>,
}

/// Owns every live timer task of one wizard.
pub struct Scheduler {
    timing: TimingConfig,
    event_tx: TimerEventSender,
    next_generation: u64,
    active: Vec<ActiveTimer>,
}

impl Scheduler {
    pub fn new(timing: TimingConfig, event_tx: TimerEventSender) -> Self {
        Self {
            timing,
            event_tx,
            next_generation: 0,
            active: Vec::new(),
        }
    }

    /// Start (or restart) the timer of `kind`. Returns its generation.
    pub fn start(&mut self, kind: TimerKind) -> u64 {
        self.cancel(kind);
        self.next_generation += 1;
        let generation = self.next_generation;

        let handle = self.spawn_timer(kind, generation);
        self.active.push(ActiveTimer {
            kind,
            generation,
            handle,
        });
        debug!(timer = %kind, generation, "Timer started");
        generation
    }

    /// Abort the timer of `kind`, if running.
    pub fn cancel(&mut self, kind: TimerKind) {
        self.active.retain(|timer| {
            if timer.kind != kind {
                return true;
            }
            timer.handle.abort();
            debug!(timer = %kind, generation = timer.generation, "Timer cancelled");
            false
        });
    }

    pub fn cancel_all(&mut self) {
        for timer in self.active.drain(..) {
            timer.handle.abort();
        }
    }

    /// Whether `event` comes from the live timer of its kind.
    pub fn is_current(&self, event: &TimerEvent) -> bool {
        self.active
            .iter()
            .any(|timer| timer.kind == event.kind && timer.generation == event.generation)
    }

    /// Forget a one-shot timer that has delivered its event.
    pub fn retire(&mut self, event: &TimerEvent) {
        self.active
            .retain(|timer| !(timer.kind == event.kind && timer.generation == event.generation));
    }

    pub fn is_running(&self, kind: TimerKind) -> bool {
        self.active.iter().any(|timer| timer.kind == kind)
    }

    fn spawn_timer(&self, kind: TimerKind, generation: u64) -> JoinHandle<()> {
        let event_tx = self.event_tx.clone();
        let event = TimerEvent { kind, generation };

        match kind.schedule(&self.timing) {
            TimerSchedule::Repeating(period) => tokio::spawn(async move {
                let mut interval = interval_at(Instant::now() + period, period);
                loop {
                    interval.tick().await;
                    if let Err(e) = event_tx.send(event).await {
                        warn!(timer = %kind, error = %e, "Failed to send TimerEvent, receiver dropped");
                        return;
                    }
                }
            }),
            TimerSchedule::Once(delay) => tokio::spawn(async move {
                sleep(delay).await;
                if let Err(e) = event_tx.send(event).await {
                    warn!(timer = %kind, error = %e, "Failed to send TimerEvent, receiver dropped");
                }
            }),
        }
    }
}

impl Drop for Scheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::timer_event_channel;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_repeating_timer_ticks_every_second() {
        let (tx, mut rx) = timer_event_channel();
        let mut scheduler = Scheduler::new(TimingConfig::default(), tx);
        let generation = scheduler.start(TimerKind::TransferDeadline);

        sleep(Duration::from_millis(3500)).await;
        let mut count = 0;
        while let Ok(event) = rx.try_recv() {
            assert_eq!(event.generation, generation);
            assert!(scheduler.is_current(&event));
            count += 1;
        }
        assert_eq!(count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_restart_makes_old_events_stale() {
        let (tx, mut rx) = timer_event_channel();
        let mut scheduler = Scheduler::new(TimingConfig::default(), tx);
        scheduler.start(TimerKind::Processing);
        sleep(Duration::from_millis(1500)).await;
        let old = rx.recv().await.unwrap();

        scheduler.start(TimerKind::Processing);
        assert!(!scheduler.is_current(&old));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_events() {
        let (tx, mut rx) = timer_event_channel();
        let mut scheduler = Scheduler::new(TimingConfig::default(), tx);
        scheduler.start(TimerKind::TransferDeadline);
        scheduler.start(TimerKind::Verification);
        scheduler.cancel(TimerKind::TransferDeadline);
        assert!(!scheduler.is_running(TimerKind::TransferDeadline));

        sleep(Duration::from_secs(5)).await;
        let event = rx.try_recv().unwrap();
        assert_eq!(event.kind, TimerKind::Verification);
        assert!(rx.try_recv().is_err());

        scheduler.retire(&event);
        assert!(!scheduler.is_running(TimerKind::Verification));
    }

    #[tokio::test(start_paused = true)]
    async fn test_one_shot_fires_after_delay() {
        let (tx, mut rx) = timer_event_channel();
        let mut scheduler = Scheduler::new(TimingConfig::default(), tx);
        scheduler.start(TimerKind::Verification);

        sleep(Duration::from_millis(1900)).await;
        assert!(rx.try_recv().is_err());
        sleep(Duration::from_millis(200)).await;
        assert_eq!(rx.try_recv().unwrap().kind, TimerKind::Verification);
    }
}
