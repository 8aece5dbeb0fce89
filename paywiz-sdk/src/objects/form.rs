//! Payer form data, raw and validated.

use serde::{Deserialize, Serialize};

/// Number of digits in a contract number.
pub const CONTRACT_NUMBER_LEN: usize = 8;

/// Fixed prefix shown in front of the contract digits.
pub const CONTRACT_PREFIX: &str = "МД-";

/// Contract number digits, without the display prefix.
///
/// Can only be built through [`ContractNumber::sanitize`], so it always holds
/// ASCII digits and never more than [`CONTRACT_NUMBER_LEN`] of them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ContractNumber(String);

impl ContractNumber {
    /// Strip every non-digit character and truncate to eight digits.
    pub fn sanitize(raw: &str) -> Self {
        Self(
            raw.chars()
                .filter(|c| c.is_ascii_digit())
                .take(CONTRACT_NUMBER_LEN)
                .collect(),
        )
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether all eight digits are present.
    pub fn is_complete(&self) -> bool {
        self.0.len() == CONTRACT_NUMBER_LEN
    }
}

impl From<String> for ContractNumber {
    fn from(value: String) -> Self {
        Self::sanitize(&value)
    }
}

impl From<ContractNumber> for String {
    fn from(value: ContractNumber) -> Self {
        value.0
    }
}

impl std::fmt::Display for ContractNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{CONTRACT_PREFIX}{}", self.0)
    }
}

/// The four inputs of the payer form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormField {
    FullName,
    BirthDate,
    ContractNumber,
    Amount,
}

impl FormField {
    /// Human-readable input label.
    pub fn label(self) -> &'static str {
        match self {
            FormField::FullName => "ФИО",
            FormField::BirthDate => "Дата рождения",
            FormField::ContractNumber => "Номер договора",
            FormField::Amount => "Сумма оплаты (₽)",
        }
    }
}

impl std::fmt::Display for FormField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormField::FullName => write!(f, "full_name"),
            FormField::BirthDate => write!(f, "birth_date"),
            FormField::ContractNumber => write!(f, "contract_number"),
            FormField::Amount => write!(f, "amount"),
        }
    }
}

/// Form inputs exactly as typed, before submit-time validation.
///
/// The contract number is the one field filtered on every edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    pub full_name: String,
    pub birth_date: String,
    pub contract_number: ContractNumber,
    pub amount: String,
}

impl FormData {
    /// Store a new value for `field`.
    pub fn set(&mut self, field: FormField, value: &str) {
        match field {
            FormField::FullName => self.full_name = value.to_owned(),
            FormField::BirthDate => self.birth_date = value.to_owned(),
            FormField::ContractNumber => self.contract_number = ContractNumber::sanitize(value),
            FormField::Amount => self.amount = value.to_owned(),
        }
    }

    /// Current raw value of `field`.
    pub fn get(&self, field: FormField) -> &str {
        match field {
            FormField::FullName => &self.full_name,
            FormField::BirthDate => &self.birth_date,
            FormField::ContractNumber => self.contract_number.as_str(),
            FormField::Amount => &self.amount,
        }
    }
}

/// Validated payer details, produced by a successful form submit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayerInfo {
    pub full_name: String,
    pub birth_date: time::Date,
    pub contract_number: ContractNumber,
    /// `None` when the wizard runs without the amount field.
    pub amount: Option<rust_decimal::Decimal>,
}
