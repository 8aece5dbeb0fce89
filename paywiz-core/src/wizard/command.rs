use crate::events::TimerKind;
use crate::validation::ValidationError;
use paywiz_sdk::objects::{FormField, Notification, PaymentMethod, Step};
use thiserror::Error;

/// A user action on the current screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Type into one of the form inputs.
    EditField { field: FormField, value: String },
    /// Submit the payer form.
    SubmitForm,
    /// Pick a transfer channel on the method screen.
    ChooseMethod(PaymentMethod),
    /// Confirm the picked channel.
    ConfirmMethod,
    /// Go one screen back.
    Back,
    /// "Check payment" on an instructions screen.
    CheckPayment,
    /// Copy the card or phone number shown on an instructions screen.
    CopyTransferTarget,
    /// "New payment" on the receipt.
    NewPayment,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::EditField { .. } => "edit_field",
            Command::SubmitForm => "submit_form",
            Command::ChooseMethod(_) => "choose_method",
            Command::ConfirmMethod => "confirm_method",
            Command::Back => "back",
            Command::CheckPayment => "check_payment",
            Command::CopyTransferTarget => "copy_transfer_target",
            Command::NewPayment => "new_payment",
        }
    }
}

/// Side effects requested by a transition, executed by the controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Notify(Notification),
    StartTimer(TimerKind),
    CancelTimer(TimerKind),
    CopyToClipboard(String),
}

/// Ordered list of effects produced by one transition.
pub type Effects = Vec<Effect>;

/// Errors returned for rejected commands. The state is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{command} is not accepted on the {step} screen")]
    UnexpectedCommand { command: &'static str, step: Step },

    #[error("payment verification is already in progress")]
    VerificationInFlight,
}
