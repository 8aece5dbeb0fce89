//! TOML file configuration structures.
//!
//! These structs directly map to the `paywiz-config.toml` file format.
//! Every section and every key is optional; missing values fall back to
//! the built-in defaults.

use paywiz_sdk::config::{
    DEFAULT_PROCESSING_SECS, DEFAULT_TRANSFER_DEADLINE_SECS, DEFAULT_VERIFICATION_DELAY,
    EmbedConfig as RuntimeEmbedConfig, FlowConfig as RuntimeFlowConfig, ReceiptBranding,
    TransferTargets, default_origin,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use url::Url;

/// Root configuration structure as read from the TOML file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub flow: FlowConfig,
    pub timing: TimingConfig,
    pub targets: TargetsConfig,
    pub receipt: ReceiptConfig,
    pub embed: EmbedConfig,
}

/// Flow variant section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FlowConfig {
    pub processing_step: bool,
    pub strict_contract_number: bool,
    pub collect_amount: bool,
    pub receipt_export: bool,
}

impl Default for FlowConfig {
    fn default() -> Self {
        let flow = RuntimeFlowConfig::default();
        Self {
            processing_step: flow.processing_step,
            strict_contract_number: flow.strict_contract_number,
            collect_amount: flow.collect_amount,
            receipt_export: flow.receipt_export,
        }
    }
}

/// Timing section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Length of the transfer window in seconds.
    pub transfer_deadline_secs: u32,
    /// Length of the processing countdown in seconds.
    pub processing_secs: u32,
    /// Simulated verification delay in milliseconds.
    pub verification_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            transfer_deadline_secs: DEFAULT_TRANSFER_DEADLINE_SECS,
            processing_secs: DEFAULT_PROCESSING_SECS,
            verification_delay_ms: DEFAULT_VERIFICATION_DELAY.as_millis() as u64,
        }
    }
}

/// Transfer targets section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetsConfig {
    pub card_number: String,
    pub phone_number: String,
    pub recipient: String,
}

impl Default for TargetsConfig {
    fn default() -> Self {
        let TransferTargets {
            card_number,
            phone_number,
            recipient,
        } = TransferTargets::default();
        Self {
            card_number,
            phone_number,
            recipient,
        }
    }
}

/// Receipt section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReceiptConfig {
    pub company: String,
    pub requisites: String,
    /// Directory receipts are exported to.
    pub export_dir: PathBuf,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        let ReceiptBranding {
            company,
            requisites,
            export_dir,
        } = ReceiptBranding::default();
        Self {
            company,
            requisites,
            export_dir,
        }
    }
}

/// Embed page section.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbedConfig {
    /// Public origin the wizard is served from (e.g., "https://pay.example.com").
    #[serde(default = "default_origin")]
    pub origin: Url,
}

impl Default for EmbedConfig {
    fn default() -> Self {
        Self {
            origin: RuntimeEmbedConfig::default().origin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_config_parsing() {
        let toml_str = r#"
[flow]
processing_step = false
strict_contract_number = false
collect_amount = true
receipt_export = false

[timing]
transfer_deadline_secs = 300
processing_secs = 30
verification_delay_ms = 500

[targets]
card_number = "2200 0000 0000 0001"
phone_number = "+7 900 000 00 01"
recipient = "Тест Банк"

[receipt]
company = "ООО \"ТЕСТ\""
requisites = "ИНН: 0000000000"
export_dir = "/tmp/receipts"

[embed]
origin = "https://pay.example.com"
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.flow.processing_step);
        assert!(!config.flow.strict_contract_number);
        assert_eq!(config.timing.transfer_deadline_secs, 300);
        assert_eq!(config.timing.verification_delay_ms, 500);
        assert_eq!(config.targets.recipient, "Тест Банк");
        assert_eq!(config.receipt.export_dir, PathBuf::from("/tmp/receipts"));
        assert_eq!(config.embed.origin.as_str(), "https://pay.example.com/");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert!(config.flow.processing_step);
        assert!(config.flow.strict_contract_number);
        assert_eq!(config.timing.transfer_deadline_secs, 180);
        assert_eq!(config.timing.processing_secs, 60);
        assert_eq!(config.timing.verification_delay_ms, 2000);
        assert_eq!(config.targets.card_number, "2200 9802 0524 3667");
        assert_eq!(config.embed.origin, default_origin());
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let toml_str = r#"
[timing]
processing_secs = 10
"#;
        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.timing.processing_secs, 10);
        assert_eq!(config.timing.transfer_deadline_secs, 180);
    }

    #[test]
    fn test_invalid_origin_is_rejected() {
        let toml_str = r#"
[embed]
origin = "not a url"
"#;
        assert!(toml::from_str::<FileConfig>(toml_str).is_err());
    }
}
