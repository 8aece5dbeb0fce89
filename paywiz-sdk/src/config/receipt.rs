//! Receipt configuration.

use std::path::PathBuf;

/// Company lines printed on the receipt and where exports are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptBranding {
    /// Company name on the first line of the receipt.
    pub company: String,
    /// Tax requisites line under the company name.
    pub requisites: String,
    /// Directory receipt exports are written to.
    pub export_dir: PathBuf,
}

impl Default for ReceiptBranding {
    fn default() -> Self {
        Self {
            company: "ООО \"ЭКОРРА ПЛАТЕЖ\"".to_string(),
            requisites: "ИНН: 7743123456 | КПП: 774301001".to_string(),
            export_dir: PathBuf::from("."),
        }
    }
}
