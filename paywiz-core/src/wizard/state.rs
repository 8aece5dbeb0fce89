use crate::utils::countdown::Countdown;
use paywiz_sdk::config::TimingConfig;
use paywiz_sdk::objects::{FormData, PayerInfo, PaymentId, PaymentMethod, Step};

/// The single source of truth of one wizard session.
///
/// Only [`Wizard`](super::Wizard) mutates it; front ends receive clones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardState {
    pub step: Step,
    /// Form inputs as typed.
    pub form: FormData,
    /// Set by a successful submit.
    pub payer: Option<PayerInfo>,
    pub payment_method: PaymentMethod,
    pub transfer_deadline: Countdown,
    /// True while the simulated verification delay is in flight.
    pub is_verifying: bool,
    pub processing: Countdown,
    /// Set exactly once, when the receipt is reached.
    pub payment_id: Option<PaymentId>,
    pub completed_at: Option<time::OffsetDateTime>,
}

impl WizardState {
    /// Fresh defaults: the empty form.
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            step: Step::Form,
            form: FormData::default(),
            payer: None,
            payment_method: PaymentMethod::default(),
            transfer_deadline: Countdown::new(timing.transfer_deadline_secs),
            is_verifying: false,
            processing: Countdown::new(timing.processing_secs),
            payment_id: None,
            completed_at: None,
        }
    }
}
