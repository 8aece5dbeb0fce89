//! Configuration module for paywiz.
//!
//! Handles loading configuration from an optional TOML file and applying
//! CLI overrides on top of it.

pub mod file;

use crate::config::file::FileConfig;
use paywiz_sdk::config::{
    EmbedConfig, FlowConfig, ReceiptBranding, TimingConfig, TransferTargets, WizardSettings,
};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("validation error: {0}")]
    ValidationError(String),
}

/// Values given on the command line that win over the file.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub export_dir: Option<PathBuf>,
    pub lenient_contract: bool,
    pub skip_processing: bool,
}

/// Configuration loader that handles the complete loading process.
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
    overrides: Overrides,
}

impl ConfigLoader {
    /// Create a new config loader. Without a path the defaults are used.
    pub fn new(config_path: Option<impl AsRef<Path>>, overrides: Overrides) -> Self {
        Self {
            config_path: config_path.map(|p| p.as_ref().to_path_buf()),
            overrides,
        }
    }

    /// Load and process the configuration.
    ///
    /// This will:
    /// 1. Read the TOML file, if one was given
    /// 2. Apply CLI overrides
    /// 3. Validate the configuration
    /// 4. Build the runtime settings
    pub fn load(&self) -> Result<WizardSettings, ConfigError> {
        let mut file_config = match &self.config_path {
            Some(path) => {
                let config_content = std::fs::read_to_string(path)?;
                toml::from_str(&config_content)?
            }
            None => FileConfig::default(),
        };

        self.apply_overrides(&mut file_config);
        self.validate(&file_config)?;

        Ok(build_settings(file_config))
    }

    fn apply_overrides(&self, config: &mut FileConfig) {
        if let Some(dir) = &self.overrides.export_dir {
            config.receipt.export_dir = dir.clone();
        }
        if self.overrides.lenient_contract {
            config.flow.strict_contract_number = false;
        }
        if self.overrides.skip_processing {
            config.flow.processing_step = false;
        }
    }

    fn validate(&self, config: &FileConfig) -> Result<(), ConfigError> {
        let timing = &config.timing;
        if timing.transfer_deadline_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timing.transfer_deadline_secs must be greater than zero".to_string(),
            ));
        }
        if config.flow.processing_step && timing.processing_secs == 0 {
            return Err(ConfigError::ValidationError(
                "timing.processing_secs must be greater than zero".to_string(),
            ));
        }

        let targets = [
            ("targets.card_number", &config.targets.card_number),
            ("targets.phone_number", &config.targets.phone_number),
            ("targets.recipient", &config.targets.recipient),
        ];
        for (key, value) in targets {
            if value.trim().is_empty() {
                return Err(ConfigError::ValidationError(format!("{key} must not be empty")));
            }
        }

        if !matches!(config.embed.origin.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError(format!(
                "embed.origin must be an http(s) URL, got {}",
                config.embed.origin
            )));
        }
        Ok(())
    }
}

fn build_settings(file_config: FileConfig) -> WizardSettings {
    let FileConfig {
        flow,
        timing,
        targets,
        receipt,
        embed,
    } = file_config;

    WizardSettings {
        flow: FlowConfig {
            processing_step: flow.processing_step,
            strict_contract_number: flow.strict_contract_number,
            collect_amount: flow.collect_amount,
            receipt_export: flow.receipt_export,
        },
        timing: TimingConfig {
            transfer_deadline_secs: timing.transfer_deadline_secs,
            processing_secs: timing.processing_secs,
            verification_delay: Duration::from_millis(timing.verification_delay_ms),
        },
        targets: TransferTargets {
            card_number: targets.card_number,
            phone_number: targets.phone_number,
            recipient: targets.recipient,
        },
        receipt: ReceiptBranding {
            company: receipt.company,
            requisites: receipt.requisites,
            export_dir: receipt.export_dir,
        },
        embed: EmbedConfig {
            origin: embed.origin,
        },
    }
}
