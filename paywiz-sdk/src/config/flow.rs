//! Flow variant flags.

/// Switches between the flow variants of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowConfig {
    /// Show a processing screen with its own countdown between
    /// "check payment" and the receipt.
    pub processing_step: bool,
    /// Reject contract numbers that do not have exactly eight digits.
    pub strict_contract_number: bool,
    /// Ask for (and validate) the payment amount.
    pub collect_amount: bool,
    /// Offer exporting the receipt to a file.
    pub receipt_export: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            processing_step: true,
            strict_contract_number: true,
            collect_amount: true,
            receipt_export: true,
        }
    }
}
