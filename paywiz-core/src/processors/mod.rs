//! Processors driving the wizard.
//!
//! - `WizardController`: receives `Command` and `TimerEvent`, emits
//!   `Notification` and state snapshots
//! - `Scheduler`: owns the timer tasks that emit `TimerEvent`

pub mod controller;
pub mod scheduler;

pub use controller::WizardController;
pub use scheduler::Scheduler;
