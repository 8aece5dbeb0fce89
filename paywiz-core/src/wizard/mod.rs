//! The payment wizard state machine.
//!
//! [`Wizard`] is a synchronous, side-effect free state machine. User actions
//! go through [`Wizard::apply`], timer expirations through
//! [`Wizard::on_timer`]. Both return the [`Effect`]s the caller must carry
//! out (start/cancel timers, notify, copy to clipboard). The async
//! [`WizardController`](crate::processors::WizardController) is the caller
//! in production.
//!
//! # Transitions
//!
//! | From | Event | To |
//! |---|---|---|
//! | Form | valid submit | SelectMethod |
//! | SelectMethod | confirm | AwaitingCardTransfer / AwaitingSbpTransfer |
//! | SelectMethod | back | Form |
//! | Awaiting* | back | SelectMethod |
//! | Awaiting* | transfer deadline expired | SelectMethod |
//! | Awaiting* | verification done | Processing, or Receipt without the processing step |
//! | Processing | processing countdown expired | Receipt |
//! | Receipt | new payment | Form (defaults) |

mod command;
mod state;

pub use command::{Command, Effect, Effects, WizardError};
pub use state::WizardState;

use crate::events::TimerKind;
use crate::validation::validate_form;
use paywiz_sdk::config::WizardSettings;
use paywiz_sdk::objects::{Notification, PaymentId, Step};
use rand::Rng;
use time::OffsetDateTime;
use tracing::{debug, info};

/// Owns the wizard state and the settings it runs with.
#[derive(Debug, Clone)]
pub struct Wizard {
    settings: WizardSettings,
    state: WizardState,
}

impl Wizard {
    pub fn new(settings: WizardSettings) -> Self {
        let state = WizardState::new(&settings.timing);
        Self { settings, state }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn settings(&self) -> &WizardSettings {
        &self.settings
    }

    /// Apply a user command.
    ///
    /// On error the state is unchanged.
    pub fn apply(&mut self, command: Command) -> Result<Effects, WizardError> {
        let step = self.state.step;
        match (step, command) {
            (Step::Form, Command::EditField { field, value }) => {
                self.state.form.set(field, &value);
                Ok(Vec::new())
            }
            (Step::Form, Command::SubmitForm) => {
                let payer = validate_form(&self.state.form, &self.settings.flow)?;
                info!(contract = %payer.contract_number, "Payer form accepted");
                self.state.payer = Some(payer);
                self.state.step = Step::SelectMethod;
                Ok(Vec::new())
            }
            (Step::SelectMethod, Command::ChooseMethod(method)) => {
                self.state.payment_method = method;
                Ok(Vec::new())
            }
            (Step::SelectMethod, Command::ConfirmMethod) => {
                self.state.step = self.state.payment_method.awaiting_step();
                self.state.transfer_deadline.reset();
                info!(method = %self.state.payment_method, "Awaiting transfer");
                Ok(vec![Effect::StartTimer(TimerKind::TransferDeadline)])
            }
            (Step::SelectMethod, Command::Back) => {
                self.state.step = Step::Form;
                Ok(Vec::new())
            }
            (step, Command::Back) if step.is_awaiting_transfer() => {
                let mut effects = vec![Effect::CancelTimer(TimerKind::TransferDeadline)];
                if self.state.is_verifying {
                    self.state.is_verifying = false;
                    effects.push(Effect::CancelTimer(TimerKind::Verification));
                }
                self.state.step = Step::SelectMethod;
                Ok(effects)
            }
            (step, Command::CheckPayment) if step.is_awaiting_transfer() => {
                if self.state.is_verifying {
                    return Err(WizardError::VerificationInFlight);
                }
                self.state.is_verifying = true;
                debug!(remaining = self.state.transfer_deadline.remaining(), "Verifying payment");
                Ok(vec![
                    Effect::CancelTimer(TimerKind::TransferDeadline),
                    Effect::StartTimer(TimerKind::Verification),
                ])
            }
            (step, Command::CopyTransferTarget) if step.is_awaiting_transfer() => {
                let value = self
                    .settings
                    .targets
                    .copy_value(self.state.payment_method);
                Ok(vec![Effect::CopyToClipboard(value)])
            }
            (Step::Receipt, Command::NewPayment) => {
                self.state = WizardState::new(&self.settings.timing);
                info!("Starting a new payment");
                Ok(vec![
                    Effect::CancelTimer(TimerKind::TransferDeadline),
                    Effect::CancelTimer(TimerKind::Verification),
                    Effect::CancelTimer(TimerKind::Processing),
                ])
            }
            (step, command) => Err(WizardError::UnexpectedCommand {
                command: command.name(),
                step,
            }),
        }
    }

    /// Handle a timer firing.
    ///
    /// Events that no longer match the current step are ignored, so a late
    /// tick can never move the wizard.
    pub fn on_timer<R: Rng>(
        &mut self,
        kind: TimerKind,
        now: OffsetDateTime,
        rng: &mut R,
    ) -> Effects {
        match kind {
            TimerKind::TransferDeadline => self.on_transfer_tick(),
            TimerKind::Verification => self.on_verification_done(now, rng),
            TimerKind::Processing => self.on_processing_tick(now, rng),
        }
    }

    fn on_transfer_tick(&mut self) -> Effects {
        if !self.state.step.is_awaiting_transfer() || self.state.is_verifying {
            debug!(step = %self.state.step, "Ignoring transfer deadline tick");
            return Vec::new();
        }
        if !self.state.transfer_deadline.tick() {
            return Vec::new();
        }

        info!(method = %self.state.payment_method, "Transfer deadline expired");
        self.state.step = Step::SelectMethod;
        self.state.transfer_deadline.reset();
        vec![
            Effect::CancelTimer(TimerKind::TransferDeadline),
            Effect::Notify(Notification::destructive(
                "Время истекло",
                "Пожалуйста, начните процесс оплаты заново",
            )),
        ]
    }

    fn on_verification_done<R: Rng>(&mut self, now: OffsetDateTime, rng: &mut R) -> Effects {
        if !self.state.step.is_awaiting_transfer() || !self.state.is_verifying {
            debug!(step = %self.state.step, "Ignoring stale verification result");
            return Vec::new();
        }
        self.state.is_verifying = false;

        if self.settings.flow.processing_step {
            self.state.step = Step::Processing;
            self.state.processing.reset();
            info!("Payment handed to processing");
            vec![Effect::StartTimer(TimerKind::Processing)]
        } else {
            self.complete(now, rng)
        }
    }

    fn on_processing_tick<R: Rng>(&mut self, now: OffsetDateTime, rng: &mut R) -> Effects {
        if self.state.step != Step::Processing {
            debug!(step = %self.state.step, "Ignoring processing tick");
            return Vec::new();
        }
        if !self.state.processing.tick() {
            return Vec::new();
        }

        self.state.processing.reset();
        let mut effects = vec![Effect::CancelTimer(TimerKind::Processing)];
        effects.extend(self.complete(now, rng));
        effects
    }

    fn complete<R: Rng>(&mut self, now: OffsetDateTime, rng: &mut R) -> Effects {
        let unix_millis = (now.unix_timestamp_nanos() / 1_000_000) as i64;
        let payment_id = self
            .state
            .payment_id
            .get_or_insert_with(|| PaymentId::generate(unix_millis, rng));
        info!(payment_id = %payment_id, "Payment completed");

        self.state.completed_at = Some(now);
        self.state.step = Step::Receipt;
        vec![Effect::Notify(Notification::info(
            "Оплата успешна!",
            "Ваш платёж обработан",
        ))]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paywiz_sdk::config::FlowConfig;
    use paywiz_sdk::objects::{FormField, PaymentMethod, Severity};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn now() -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(1_729_332_000).unwrap()
    }

    fn fill_form(wizard: &mut Wizard) {
        let fields = [
            (FormField::FullName, "Иванов Иван Иванович"),
            (FormField::BirthDate, "1990-01-01"),
            (FormField::ContractNumber, "00283799"),
            (FormField::Amount, "1000"),
        ];
        for (field, value) in fields {
            wizard
                .apply(Command::EditField {
                    field,
                    value: value.to_string(),
                })
                .unwrap();
        }
    }

    fn awaiting(method: PaymentMethod, flow: FlowConfig) -> Wizard {
        let mut wizard = Wizard::new(WizardSettings {
            flow,
            ..WizardSettings::default()
        });
        fill_form(&mut wizard);
        wizard.apply(Command::SubmitForm).unwrap();
        wizard.apply(Command::ChooseMethod(method)).unwrap();
        wizard.apply(Command::ConfirmMethod).unwrap();
        wizard
    }

    fn has_notification(effects: &Effects, title: &str) -> bool {
        effects
            .iter()
            .any(|e| matches!(e, Effect::Notify(n) if n.title == title))
    }

    #[test]
    fn test_valid_submit_moves_to_method_selection() {
        let mut wizard = Wizard::new(WizardSettings::default());
        fill_form(&mut wizard);
        let effects = wizard.apply(Command::SubmitForm).unwrap();
        assert!(effects.is_empty());
        assert_eq!(wizard.state().step, Step::SelectMethod);
        assert!(wizard.state().payer.is_some());
    }

    #[test]
    fn test_invalid_submit_stays_on_form() {
        let mut wizard = Wizard::new(WizardSettings::default());
        wizard
            .apply(Command::EditField {
                field: FormField::FullName,
                value: "Иванов".to_string(),
            })
            .unwrap();
        let before = wizard.state().clone();
        let err = wizard.apply(Command::SubmitForm).unwrap_err();
        assert_eq!(
            err,
            WizardError::Validation(crate::validation::ValidationError::MissingField(
                FormField::BirthDate
            ))
        );
        assert_eq!(wizard.state(), &before);
    }

    #[test]
    fn test_bad_amount_keeps_form() {
        let mut wizard = Wizard::new(WizardSettings::default());
        fill_form(&mut wizard);
        for amount in ["-1", "0", "сто"] {
            wizard
                .apply(Command::EditField {
                    field: FormField::Amount,
                    value: amount.to_string(),
                })
                .unwrap();
            assert_eq!(
                wizard.apply(Command::SubmitForm),
                Err(WizardError::Validation(
                    crate::validation::ValidationError::BadAmount
                ))
            );
            assert_eq!(wizard.state().step, Step::Form);
        }
    }

    #[test]
    fn test_confirm_card_starts_deadline() {
        let mut wizard = Wizard::new(WizardSettings::default());
        fill_form(&mut wizard);
        wizard.apply(Command::SubmitForm).unwrap();
        wizard.apply(Command::ChooseMethod(PaymentMethod::Card)).unwrap();
        let effects = wizard.apply(Command::ConfirmMethod).unwrap();
        assert_eq!(effects, vec![Effect::StartTimer(TimerKind::TransferDeadline)]);
        assert_eq!(wizard.state().step, Step::AwaitingCardTransfer);
        assert_eq!(wizard.state().transfer_deadline.remaining(), 180);
    }

    #[test]
    fn test_back_navigation() {
        let mut wizard = awaiting(PaymentMethod::Sbp, FlowConfig::default());
        assert_eq!(wizard.state().step, Step::AwaitingSbpTransfer);

        let effects = wizard.apply(Command::Back).unwrap();
        assert_eq!(effects, vec![Effect::CancelTimer(TimerKind::TransferDeadline)]);
        assert_eq!(wizard.state().step, Step::SelectMethod);

        wizard.apply(Command::Back).unwrap();
        assert_eq!(wizard.state().step, Step::Form);
        // Form data survives going back.
        assert_eq!(wizard.state().form.contract_number.as_str(), "00283799");
    }

    #[test]
    fn test_deadline_expiry_returns_to_method_selection() {
        let mut wizard = awaiting(PaymentMethod::Card, FlowConfig::default());
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..179 {
            assert!(wizard.on_timer(TimerKind::TransferDeadline, now(), &mut rng).is_empty());
        }
        assert_eq!(wizard.state().transfer_deadline.remaining(), 1);

        let effects = wizard.on_timer(TimerKind::TransferDeadline, now(), &mut rng);
        assert!(has_notification(&effects, "Время истекло"));
        assert!(effects.contains(&Effect::CancelTimer(TimerKind::TransferDeadline)));
        assert_eq!(wizard.state().step, Step::SelectMethod);
        assert_eq!(wizard.state().transfer_deadline.remaining(), 180);
    }

    #[test]
    fn test_check_payment_cancels_deadline_and_rejects_double_click() {
        let mut wizard = awaiting(PaymentMethod::Card, FlowConfig::default());
        let effects = wizard.apply(Command::CheckPayment).unwrap();
        assert_eq!(
            effects,
            vec![
                Effect::CancelTimer(TimerKind::TransferDeadline),
                Effect::StartTimer(TimerKind::Verification),
            ]
        );
        assert!(wizard.state().is_verifying);
        assert_eq!(
            wizard.apply(Command::CheckPayment),
            Err(WizardError::VerificationInFlight)
        );

        // A deadline tick queued before the click no longer counts down.
        let mut rng = StdRng::seed_from_u64(1);
        let before = wizard.state().transfer_deadline;
        assert!(wizard.on_timer(TimerKind::TransferDeadline, now(), &mut rng).is_empty());
        assert_eq!(wizard.state().transfer_deadline, before);
    }

    #[test]
    fn test_verification_then_processing_then_receipt() {
        let mut wizard = awaiting(PaymentMethod::Sbp, FlowConfig::default());
        let mut rng = StdRng::seed_from_u64(9);
        wizard.apply(Command::CheckPayment).unwrap();

        let effects = wizard.on_timer(TimerKind::Verification, now(), &mut rng);
        assert_eq!(effects, vec![Effect::StartTimer(TimerKind::Processing)]);
        assert_eq!(wizard.state().step, Step::Processing);
        assert!(!wizard.state().is_verifying);
        assert_eq!(wizard.state().processing.remaining(), 60);
        assert!(wizard.state().payment_id.is_none());

        for _ in 0..59 {
            assert!(wizard.on_timer(TimerKind::Processing, now(), &mut rng).is_empty());
        }
        let effects = wizard.on_timer(TimerKind::Processing, now(), &mut rng);
        assert!(has_notification(&effects, "Оплата успешна!"));
        assert_eq!(wizard.state().step, Step::Receipt);
        let id = wizard.state().payment_id.clone().unwrap();
        assert!(id.as_str().starts_with("PAY-1729332000000-"));
        assert_eq!(wizard.state().completed_at, Some(now()));

        // Late ticks do not regenerate the identifier.
        wizard.on_timer(TimerKind::Processing, now(), &mut rng);
        wizard.on_timer(TimerKind::Verification, now(), &mut rng);
        assert_eq!(wizard.state().payment_id, Some(id));
    }

    #[test]
    fn test_verification_goes_straight_to_receipt_without_processing_step() {
        let flow = FlowConfig {
            processing_step: false,
            ..FlowConfig::default()
        };
        let mut wizard = awaiting(PaymentMethod::Sbp, flow);
        let mut rng = StdRng::seed_from_u64(3);
        wizard.apply(Command::CheckPayment).unwrap();

        let effects = wizard.on_timer(TimerKind::Verification, now(), &mut rng);
        assert!(has_notification(&effects, "Оплата успешна!"));
        assert_eq!(wizard.state().step, Step::Receipt);
        assert!(wizard.state().payment_id.is_some());
    }

    #[test]
    fn test_back_during_verification_cancels_it() {
        let mut wizard = awaiting(PaymentMethod::Card, FlowConfig::default());
        wizard.apply(Command::CheckPayment).unwrap();
        let effects = wizard.apply(Command::Back).unwrap();
        assert!(effects.contains(&Effect::CancelTimer(TimerKind::Verification)));
        assert!(!wizard.state().is_verifying);

        let mut rng = StdRng::seed_from_u64(1);
        assert!(wizard.on_timer(TimerKind::Verification, now(), &mut rng).is_empty());
        assert_eq!(wizard.state().step, Step::SelectMethod);
    }

    #[test]
    fn test_copy_uses_unspaced_target() {
        let mut wizard = awaiting(PaymentMethod::Card, FlowConfig::default());
        assert_eq!(
            wizard.apply(Command::CopyTransferTarget).unwrap(),
            vec![Effect::CopyToClipboard("2200980205243667".to_string())]
        );
    }

    #[test]
    fn test_unexpected_commands_are_rejected() {
        let mut wizard = Wizard::new(WizardSettings::default());
        assert_eq!(
            wizard.apply(Command::CheckPayment),
            Err(WizardError::UnexpectedCommand {
                command: "check_payment",
                step: Step::Form
            })
        );
        assert!(wizard.apply(Command::NewPayment).is_err());
        assert!(wizard.apply(Command::Back).is_err());

        let mut wizard = awaiting(PaymentMethod::Card, FlowConfig::default());
        assert!(
            wizard
                .apply(Command::EditField {
                    field: FormField::Amount,
                    value: "1".to_string()
                })
                .is_err()
        );
        assert_eq!(wizard.state().step, Step::AwaitingCardTransfer);
    }

    #[test]
    fn test_new_payment_is_idempotent() {
        let defaults = WizardState::new(&WizardSettings::default().timing);
        let mut rng = StdRng::seed_from_u64(5);

        for method in [PaymentMethod::Card, PaymentMethod::Sbp, PaymentMethod::Card] {
            let mut wizard = awaiting(method, FlowConfig {
                processing_step: false,
                ..FlowConfig::default()
            });
            wizard.apply(Command::CheckPayment).unwrap();
            wizard.on_timer(TimerKind::Verification, now(), &mut rng);
            assert_eq!(wizard.state().step, Step::Receipt);

            wizard.apply(Command::NewPayment).unwrap();
            assert_eq!(wizard.state(), &defaults);
        }
    }

    #[test]
    fn test_countdowns_stay_in_bounds() {
        let mut wizard = awaiting(PaymentMethod::Card, FlowConfig::default());
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            wizard.on_timer(TimerKind::TransferDeadline, now(), &mut rng);
            let state = wizard.state();
            assert!(state.transfer_deadline.remaining() <= 180);
            assert!(state.processing.remaining() <= 60);
            if state.step == Step::SelectMethod {
                wizard.apply(Command::ConfirmMethod).unwrap();
            }
        }
    }

    #[test]
    fn test_expiry_notification_is_destructive() {
        let mut wizard = awaiting(PaymentMethod::Card, FlowConfig::default());
        let mut rng = StdRng::seed_from_u64(1);
        let effects = (0..180)
            .flat_map(|_| wizard.on_timer(TimerKind::TransferDeadline, now(), &mut rng))
            .collect::<Vec<_>>();
        let severity = effects.iter().find_map(|e| match e {
            Effect::Notify(n) => Some(n.severity),
            _ => None,
        });
        assert_eq!(severity, Some(Severity::Destructive));
    }
}
