//! Static transfer targets.

use crate::objects::PaymentMethod;

/// Card number, phone number and recipient shown on the instruction screens.
///
/// These are fixed display values; nothing is fetched or verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTargets {
    pub card_number: String,
    pub phone_number: String,
    pub recipient: String,
}

impl TransferTargets {
    /// The target as displayed for `method`.
    pub fn display_value(&self, method: PaymentMethod) -> &str {
        match method {
            PaymentMethod::Card => &self.card_number,
            PaymentMethod::Sbp => &self.phone_number,
        }
    }

    /// The target as copied to the clipboard: no whitespace.
    pub fn copy_value(&self, method: PaymentMethod) -> String {
        self.display_value(method)
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect()
    }
}

impl Default for TransferTargets {
    fn default() -> Self {
        Self {
            card_number: "2200 9802 0524 3667".to_string(),
            phone_number: "+7 958 684 12 76".to_string(),
            recipient: "Фора Банк СПБ".to_string(),
        }
    }
}
