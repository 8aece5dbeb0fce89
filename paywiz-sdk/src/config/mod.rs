//! Runtime settings for the payment wizard.
//!
//! These are the validated values the engine runs with. Loading and parsing
//! (TOML, CLI overrides) is handled by the front end crate.

mod embed;
mod flow;
mod receipt;
mod targets;
mod timing;

pub use embed::{EmbedConfig, default_origin};
pub use flow::FlowConfig;
pub use receipt::ReceiptBranding;
pub use targets::TransferTargets;
pub use timing::{
    DEFAULT_PROCESSING_SECS, DEFAULT_TRANSFER_DEADLINE_SECS, DEFAULT_VERIFICATION_DELAY, TimingConfig,
};

/// Everything the wizard needs to run one session.
#[derive(Debug, Clone, Default)]
pub struct WizardSettings {
    /// Feature flags unifying the different flow variants.
    pub flow: FlowConfig,
    /// Countdown lengths and the simulated verification delay.
    pub timing: TimingConfig,
    /// Card and phone numbers shown on the instruction screens.
    pub targets: TransferTargets,
    /// Header lines and export directory of the receipt.
    pub receipt: ReceiptBranding,
    /// Public origin used by the embed-code page.
    pub embed: EmbedConfig,
}
