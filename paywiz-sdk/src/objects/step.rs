use serde::{Deserialize, Serialize};

/// The screen the wizard is currently showing.
///
/// Exactly one step is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Payer details form.
    #[default]
    Form,
    /// Choosing between card and SBP transfer.
    SelectMethod,
    /// Card number instructions with the transfer countdown.
    AwaitingCardTransfer,
    /// Phone number (SBP) instructions with the transfer countdown.
    AwaitingSbpTransfer,
    /// Simulated payment processing with its own countdown.
    Processing,
    /// Final receipt.
    Receipt,
}

impl Step {
    /// Whether this step shows transfer instructions and runs the deadline countdown.
    pub fn is_awaiting_transfer(self) -> bool {
        matches!(self, Step::AwaitingCardTransfer | Step::AwaitingSbpTransfer)
    }
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Step::Form => write!(f, "form"),
            Step::SelectMethod => write!(f, "select_method"),
            Step::AwaitingCardTransfer => write!(f, "awaiting_card_transfer"),
            Step::AwaitingSbpTransfer => write!(f, "awaiting_sbp_transfer"),
            Step::Processing => write!(f, "processing"),
            Step::Receipt => write!(f, "receipt"),
        }
    }
}

/// Transfer channel picked on the method screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Transfer to a bank card number.
    #[default]
    Card,
    /// Fast payment system transfer addressed by phone number.
    Sbp,
}

impl PaymentMethod {
    /// The instructions step this method leads to.
    pub fn awaiting_step(self) -> Step {
        match self {
            PaymentMethod::Card => Step::AwaitingCardTransfer,
            PaymentMethod::Sbp => Step::AwaitingSbpTransfer,
        }
    }

    /// Label printed on the receipt.
    pub fn receipt_label(self) -> &'static str {
        match self {
            PaymentMethod::Card => "Банковская карта",
            PaymentMethod::Sbp => "СБП",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::Sbp => write!(f, "sbp"),
        }
    }
}
