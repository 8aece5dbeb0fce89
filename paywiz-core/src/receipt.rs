//! Receipt rendering and export.
//!
//! A [`Receipt`] is a read-only view of a completed wizard session. It can
//! be rendered as plain text or exported as text or JSON.

use crate::utils::rubles::format_rubles;
use crate::wizard::WizardState;
use paywiz_sdk::config::ReceiptBranding;
use paywiz_sdk::objects::{ContractNumber, PaymentId, PaymentMethod, Step};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use thiserror::Error;
use time::OffsetDateTime;

const BANNER: &str = "========================================";
const RULE: &str = "----------------------------------------";

#[derive(Debug, Error)]
pub enum ReceiptError {
    #[error("failed to write receipt: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to serialize receipt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Export file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReceiptFormat {
    #[default]
    Text,
    Json,
}

impl ReceiptFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ReceiptFormat::Text => "txt",
            ReceiptFormat::Json => "json",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub company: String,
    pub requisites: String,
    pub payment_id: PaymentId,
    #[serde(with = "time::serde::rfc3339")]
    pub issued_at: OffsetDateTime,
    pub payer: String,
    pub contract_number: ContractNumber,
    pub method: PaymentMethod,
    pub method_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,
    pub status: &'static str,
}

impl Receipt {
    /// Build the receipt of a completed session.
    ///
    /// Returns `None` unless the wizard is on the receipt screen.
    pub fn from_state(state: &WizardState, branding: &ReceiptBranding) -> Option<Self> {
        if state.step != Step::Receipt {
            return None;
        }
        let payer = state.payer.as_ref()?;

        Some(Self {
            company: branding.company.clone(),
            requisites: branding.requisites.clone(),
            payment_id: state.payment_id.clone()?,
            issued_at: state.completed_at?,
            payer: payer.full_name.clone(),
            contract_number: payer.contract_number.clone(),
            method: state.payment_method,
            method_label: state.payment_method.receipt_label(),
            amount: payer.amount,
            status: "ОПЛАЧЕНО",
        })
    }

    /// Issue time as `dd.mm.yyyy, hh:mm`.
    pub fn issued_at_display(&self) -> String {
        let at = self.issued_at;
        format!(
            "{:02}.{:02}.{}, {:02}:{:02}",
            at.day(),
            u8::from(at.month()),
            at.year(),
            at.hour(),
            at.minute()
        )
    }

    pub fn amount_display(&self) -> Option<String> {
        self.amount.map(format_rubles)
    }

    pub fn render_text(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "{BANNER}");
        let _ = writeln!(out, "ЧЕК ОБ ОПЛАТЕ");
        let _ = writeln!(out, "{BANNER}");
        let _ = writeln!(out, "{}", self.company);
        let _ = writeln!(out, "{}", self.requisites);
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "НОМЕР ПЛАТЕЖА: {}", self.payment_id);
        let _ = writeln!(out, "Дата: {}", self.issued_at_display());
        let _ = writeln!(out, "Плательщик: {}", self.payer);
        let _ = writeln!(out, "Номер договора: {}", self.contract_number);
        let _ = writeln!(out, "Способ оплаты: {}", self.method_label);
        if let Some(amount) = self.amount_display() {
            let _ = writeln!(out, "Сумма: {amount}");
        }
        let _ = writeln!(out, "{RULE}");
        let _ = writeln!(out, "СТАТУС: {}", self.status);
        let _ = writeln!(out, "{BANNER}");
        out
    }

    pub fn file_name(&self, format: ReceiptFormat) -> String {
        format!("receipt-{}.{}", self.payment_id, format.extension())
    }

    /// Write the receipt into `dir` and return the written path.
    ///
    /// The file is written to a temporary name first and renamed into
    /// place, so a reader never sees a partial receipt.
    pub fn export(&self, dir: &Path, format: ReceiptFormat) -> Result<PathBuf, ReceiptError> {
        let contents = match format {
            ReceiptFormat::Text => self.render_text(),
            ReceiptFormat::Json => serde_json::to_string_pretty(self)?,
        };

        std::fs::create_dir_all(dir)?;
        let path = dir.join(self.file_name(format));
        let temp_path = path.with_extension(format!("{}.tmp", format.extension()));
        std::fs::write(&temp_path, contents)?;
        std::fs::rename(&temp_path, &path)?;

        tracing::info!(path = %path.display(), payment_id = %self.payment_id, "Receipt exported");
        Ok(path)
    }
}
