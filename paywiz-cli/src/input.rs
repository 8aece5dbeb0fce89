//! Parsing of typed terminal commands.

use paywiz_core::receipt::ReceiptFormat;
use paywiz_core::wizard::Command;
use paywiz_sdk::objects::{FormField, PaymentMethod};
use thiserror::Error;

/// One line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Forwarded to the wizard controller.
    Wizard(Command),
    /// Export the receipt.
    Save(ReceiptFormat),
    /// Open the embed-code page.
    Embed,
    /// Redraw the current screen.
    Status,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("empty input")]
    Empty,

    #[error("unknown command `{0}`, type `help` for the list")]
    UnknownCommand(String),

    #[error("`{0}` needs a value")]
    MissingArgument(&'static str),

    #[error("unknown receipt format `{0}`, expected `text` or `json`")]
    UnknownFormat(String),
}

pub const HELP: &str = "\
Команды:
  name <ФИО>           ФИО плательщика
  birth <ГГГГ-ММ-ДД>   дата рождения
  contract <цифры>     номер договора (8 цифр)
  amount <сумма>       сумма платежа
  submit               продолжить
  card | sbp           выбрать способ оплаты
  select               подтвердить способ оплаты
  copy                 скопировать реквизиты
  check                проверить оплату
  back                 назад
  new                  новый платёж
  save [text|json]     сохранить чек в файл
  embed                код для вставки на сайт
  status               показать экран ещё раз
  quit                 выход";

pub fn parse_input(line: &str) -> Result<Input, InputError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let input = match word.to_lowercase().as_str() {
        "" => return Err(InputError::Empty),
        "name" => edit(FormField::FullName, "name", rest)?,
        "birth" => edit(FormField::BirthDate, "birth", rest)?,
        "contract" => edit(FormField::ContractNumber, "contract", rest)?,
        "amount" => edit(FormField::Amount, "amount", rest)?,
        "submit" => Input::Wizard(Command::SubmitForm),
        "card" => Input::Wizard(Command::ChooseMethod(PaymentMethod::Card)),
        "sbp" => Input::Wizard(Command::ChooseMethod(PaymentMethod::Sbp)),
        "select" => Input::Wizard(Command::ConfirmMethod),
        "back" => Input::Wizard(Command::Back),
        "check" => Input::Wizard(Command::CheckPayment),
        "copy" => Input::Wizard(Command::CopyTransferTarget),
        "new" => Input::Wizard(Command::NewPayment),
        "save" => Input::Save(parse_format(rest)?),
        "embed" => Input::Embed,
        "status" => Input::Status,
        "help" | "?" => Input::Help,
        "quit" | "exit" => Input::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };
    Ok(input)
}

fn edit(field: FormField, name: &'static str, value: &str) -> Result<Input, InputError> {
    if value.is_empty() {
        return Err(InputError::MissingArgument(name));
    }
    Ok(Input::Wizard(Command::EditField {
        field,
        value: value.to_string(),
    }))
}

fn parse_format(raw: &str) -> Result<ReceiptFormat, InputError> {
    match raw.to_lowercase().as_str() {
        "" | "text" | "txt" => Ok(ReceiptFormat::Text),
        "json" => Ok(ReceiptFormat::Json),
        other => Err(InputError::UnknownFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_edits_keep_the_whole_value() {
        assert_eq!(
            parse_input("name  Иванов Иван Иванович ").unwrap(),
            Input::Wizard(Command::EditField {
                field: FormField::FullName,
                value: "Иванов Иван Иванович".to_string()
            })
        );
        assert_eq!(
            parse_input("contract МД-00283799").unwrap(),
            Input::Wizard(Command::EditField {
                field: FormField::ContractNumber,
                value: "МД-00283799".to_string()
            })
        );
    }

    #[test]
    fn test_missing_value() {
        assert_eq!(
            parse_input("amount"),
            Err(InputError::MissingArgument("amount"))
        );
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(
            parse_input("SBP").unwrap(),
            Input::Wizard(Command::ChooseMethod(PaymentMethod::Sbp))
        );
        assert_eq!(parse_input("check").unwrap(), Input::Wizard(Command::CheckPayment));
        assert_eq!(parse_input("exit").unwrap(), Input::Quit);
        assert_eq!(parse_input("embed").unwrap(), Input::Embed);
    }

    #[test]
    fn test_save_formats() {
        assert_eq!(parse_input("save").unwrap(), Input::Save(ReceiptFormat::Text));
        assert_eq!(parse_input("save json").unwrap(), Input::Save(ReceiptFormat::Json));
        assert_eq!(
            parse_input("save pdf"),
            Err(InputError::UnknownFormat("pdf".to_string()))
        );
    }

    #[test]
    fn test_unknown_and_empty() {
        assert_eq!(parse_input("   "), Err(InputError::Empty));
        assert_eq!(
            parse_input("pay now"),
            Err(InputError::UnknownCommand("pay".to_string()))
        );
    }
}
