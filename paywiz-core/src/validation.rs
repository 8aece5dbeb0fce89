//! Submit-time validation of the payer form.
//!
//! Checks run in a fixed order and the first failure wins:
//! required fields, birth date, contract number, amount.

use paywiz_sdk::config::FlowConfig;
use paywiz_sdk::objects::{FormData, FormField, Notification, PayerInfo};
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;
use time::Date;
use time::macros::format_description;

/// Reasons a form submit is rejected.
///
/// All of them are recovered locally: the form keeps its data and the user
/// is told what to fix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required input is empty.
    #[error("required field is empty: {0}")]
    MissingField(FormField),

    /// The birth date is not a `YYYY-MM-DD` calendar date.
    #[error("birth date is not a valid YYYY-MM-DD date")]
    BadBirthDate,

    /// The contract number does not have exactly eight digits.
    #[error("contract number must contain exactly 8 digits")]
    BadContractNumber,

    /// The amount is not a positive number.
    #[error("amount must be a positive number")]
    BadAmount,
}

impl ValidationError {
    /// The notification shown to the user for this error.
    pub fn notification(&self) -> Notification {
        match self {
            ValidationError::MissingField(_) => Notification::destructive(
                "Заполните все поля",
                "Все поля обязательны для заполнения",
            ),
            ValidationError::BadBirthDate => Notification::destructive(
                "Некорректная дата рождения",
                "Укажите дату в формате ГГГГ-ММ-ДД",
            ),
            ValidationError::BadContractNumber => Notification::destructive(
                "Некорректный номер договора",
                "Номер должен содержать 8 цифр",
            ),
            ValidationError::BadAmount => {
                Notification::destructive("Некорректная сумма", "Введите положительное число")
            }
        }
    }
}

/// Validate the raw form and produce the payer details.
pub fn validate_form(form: &FormData, flow: &FlowConfig) -> Result<PayerInfo, ValidationError> {
    let mut required = vec![
        FormField::FullName,
        FormField::BirthDate,
        FormField::ContractNumber,
    ];
    if flow.collect_amount {
        required.push(FormField::Amount);
    }
    if let Some(field) = required
        .into_iter()
        .find(|field| form.get(*field).trim().is_empty())
    {
        return Err(ValidationError::MissingField(field));
    }

    let birth_date = parse_birth_date(&form.birth_date)?;

    if flow.strict_contract_number && !form.contract_number.is_complete() {
        return Err(ValidationError::BadContractNumber);
    }

    let amount = if flow.collect_amount {
        Some(parse_amount(&form.amount)?)
    } else {
        None
    };

    Ok(PayerInfo {
        full_name: form.full_name.trim().to_owned(),
        birth_date,
        contract_number: form.contract_number.clone(),
        amount,
    })
}

/// Parse a `YYYY-MM-DD` birth date.
pub fn parse_birth_date(raw: &str) -> Result<Date, ValidationError> {
    Date::parse(raw.trim(), format_description!("[year]-[month]-[day]"))
        .map_err(|_| ValidationError::BadBirthDate)
}

/// Parse a strictly positive amount. Accepts `,` as the decimal separator.
pub fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let normalized = raw.trim().replace(',', ".");
    let amount = Decimal::from_str(&normalized).map_err(|_| ValidationError::BadAmount)?;
    if amount <= Decimal::ZERO {
        return Err(ValidationError::BadAmount);
    }
    Ok(amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use paywiz_sdk::objects::ContractNumber;
    use time::Month;

    fn filled() -> FormData {
        FormData {
            full_name: "Иванов Иван Иванович".to_string(),
            birth_date: "1990-01-01".to_string(),
            contract_number: ContractNumber::sanitize("00283799"),
            amount: "1000".to_string(),
        }
    }

    #[test]
    fn test_valid_form() {
        let payer = validate_form(&filled(), &FlowConfig::default()).unwrap();
        assert_eq!(payer.full_name, "Иванов Иван Иванович");
        assert_eq!(
            payer.birth_date,
            Date::from_calendar_date(1990, Month::January, 1).unwrap()
        );
        assert_eq!(payer.contract_number.as_str(), "00283799");
        assert_eq!(payer.amount, Some(Decimal::from(1000)));
    }

    #[test]
    fn test_each_missing_field_is_reported() {
        let flow = FlowConfig::default();
        for field in [
            FormField::FullName,
            FormField::BirthDate,
            FormField::ContractNumber,
            FormField::Amount,
        ] {
            let mut form = filled();
            form.set(field, "");
            assert_eq!(
                validate_form(&form, &flow),
                Err(ValidationError::MissingField(field))
            );
        }
    }

    #[test]
    fn test_whitespace_only_name_is_missing() {
        let mut form = filled();
        form.full_name = "   ".to_string();
        assert_eq!(
            validate_form(&form, &FlowConfig::default()),
            Err(ValidationError::MissingField(FormField::FullName))
        );
    }

    #[test]
    fn test_bad_birth_date() {
        for raw in ["01.01.1990", "1990-13-01", "1990-02-30", "yesterday"] {
            let mut form = filled();
            form.birth_date = raw.to_string();
            assert_eq!(
                validate_form(&form, &FlowConfig::default()),
                Err(ValidationError::BadBirthDate),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_short_contract_number_strict_and_lenient() {
        let mut form = filled();
        form.set(FormField::ContractNumber, "1234");

        assert_eq!(
            validate_form(&form, &FlowConfig::default()),
            Err(ValidationError::BadContractNumber)
        );

        let lenient = FlowConfig {
            strict_contract_number: false,
            ..FlowConfig::default()
        };
        let payer = validate_form(&form, &lenient).unwrap();
        assert_eq!(payer.contract_number.as_str(), "1234");
    }

    #[test]
    fn test_bad_amounts() {
        for raw in ["0", "-5", "abc", "NaN", "inf", "12abc", "0.00"] {
            let mut form = filled();
            form.amount = raw.to_string();
            assert_eq!(
                validate_form(&form, &FlowConfig::default()),
                Err(ValidationError::BadAmount),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_amount_accepts_comma_separator() {
        assert_eq!(parse_amount("1 ").unwrap(), Decimal::from(1));
        assert_eq!(parse_amount("99,90").unwrap(), Decimal::from_str("99.90").unwrap());
    }

    #[test]
    fn test_amount_not_required_when_not_collected() {
        let flow = FlowConfig {
            collect_amount: false,
            ..FlowConfig::default()
        };
        let mut form = filled();
        form.amount = String::new();
        let payer = validate_form(&form, &flow).unwrap();
        assert_eq!(payer.amount, None);
    }

    #[test]
    fn test_notifications_are_destructive() {
        let errors = [
            ValidationError::MissingField(FormField::Amount),
            ValidationError::BadBirthDate,
            ValidationError::BadContractNumber,
            ValidationError::BadAmount,
        ];
        for error in errors {
            assert_eq!(
                error.notification().severity,
                paywiz_sdk::objects::Severity::Destructive
            );
        }
        assert_eq!(
            ValidationError::MissingField(FormField::FullName)
                .notification()
                .title,
            "Заполните все поля"
        );
    }
}
