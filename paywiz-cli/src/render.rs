//! Plain-text screens.
//!
//! Every function here is pure: it turns a state snapshot into the text
//! printed to stdout.

use crate::embed::{TILDA_STEPS, iframe_snippet};
use paywiz_core::receipt::Receipt;
use paywiz_core::utils::rubles::format_rubles;
use paywiz_core::wizard::WizardState;
use paywiz_sdk::config::WizardSettings;
use paywiz_sdk::objects::{FormField, Notification, PaymentMethod, Severity, Step};
use std::fmt::Write as _;

/// Below this many seconds the transfer countdown is shown as urgent.
const URGENT_SECS: u32 = 60;

const SEPARATOR: &str = "────────────────────────────────────────";

/// What a full redraw depends on. The countdowns are drawn separately.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScreenKey {
    pub step: Step,
    pub is_verifying: bool,
    pub payment_method: PaymentMethod,
}

impl ScreenKey {
    pub fn of(state: &WizardState) -> Self {
        Self {
            step: state.step,
            is_verifying: state.is_verifying,
            payment_method: state.payment_method,
        }
    }
}

pub fn render_screen(state: &WizardState, settings: &WizardSettings) -> String {
    let body = match state.step {
        Step::Form => render_form(state, settings),
        Step::SelectMethod => render_method_selection(state),
        Step::AwaitingCardTransfer | Step::AwaitingSbpTransfer => {
            render_transfer(state, settings)
        }
        Step::Processing => render_processing(state),
        Step::Receipt => render_receipt(state, settings),
    };
    format!("{SEPARATOR}\n{body}")
}

fn render_form(state: &WizardState, settings: &WizardSettings) -> String {
    let mut out = String::from("Данные плательщика\n\n");
    let mut fields = vec![
        FormField::FullName,
        FormField::BirthDate,
        FormField::ContractNumber,
    ];
    if settings.flow.collect_amount {
        fields.push(FormField::Amount);
    }
    for field in fields {
        let value = state.form.get(field);
        let shown = if value.is_empty() { "(пусто)" } else { value };
        let _ = writeln!(out, "  {}: {shown}", field.label());
    }
    out.push_str("\nФормат договора: МД-00283799 (8 цифр)\n");
    out.push_str("> name / birth / contract");
    if settings.flow.collect_amount {
        out.push_str(" / amount");
    }
    out.push_str(", затем submit\n");
    out
}

fn render_method_selection(state: &WizardState) -> String {
    let mut out = String::from("Способ оплаты\n\n");
    let options = [
        (
            PaymentMethod::Card,
            "Оплата по номеру карты",
            "Перевод на банковскую карту",
        ),
        (
            PaymentMethod::Sbp,
            "Система быстрых платежей (СБП)",
            "Перевод по номеру телефона",
        ),
    ];
    for (method, title, subtitle) in options {
        let mark = if state.payment_method == method { "x" } else { " " };
        let _ = writeln!(out, "  [{mark}] {title} ({method})");
        let _ = writeln!(out, "      {subtitle}");
    }
    out.push_str("\n> card / sbp, select, back\n");
    out
}

fn render_transfer(state: &WizardState, settings: &WizardSettings) -> String {
    let method = state.payment_method;
    let targets = &settings.targets;
    let mut out = String::new();

    let (title, target_label, steps) = match method {
        PaymentMethod::Card => (
            "Оплата картой",
            "Номер карты для перевода",
            [
                "Скопируйте номер карты",
                "Откройте приложение банка",
                "Выберите \"Переводы на карту\"",
                "Введите номер карты и сумму",
            ],
        ),
        PaymentMethod::Sbp => (
            "Оплата через СБП",
            "Номер телефона для перевода",
            [
                "Скопируйте номер телефона",
                "Откройте приложение вашего банка",
                "Выберите \"Переводы по СБП\"",
                "Введите номер телефона и сумму",
            ],
        ),
    };

    let _ = writeln!(out, "{title}    {}", render_transfer_countdown(state));
    out.push('\n');
    let _ = writeln!(out, "  {target_label}: {}", targets.display_value(method));
    if method == PaymentMethod::Sbp {
        let _ = writeln!(out, "  Получатель: {}", targets.recipient);
    }
    if let Some(amount) = state.payer.as_ref().and_then(|payer| payer.amount) {
        let _ = writeln!(out, "  Сумма к оплате: {}", format_rubles(amount));
    }

    out.push_str("\nКак оплатить:\n");
    let all_steps = steps
        .iter()
        .copied()
        .chain(["Подтвердите перевод", "Нажмите \"Проверить оплату\""]);
    for (i, step) in all_steps.enumerate() {
        let _ = writeln!(out, "  {}. {step}", i + 1);
    }

    if state.is_verifying {
        out.push_str("\nПроверка...\n");
    } else {
        out.push_str("\n> copy, check, back\n");
    }
    out
}

fn render_processing(state: &WizardState) -> String {
    let mut out = String::from("Платёж в обработке\n");
    out.push_str("Пожалуйста, подождите. Мы проверяем ваш платёж\n\n");
    let _ = writeln!(out, "  {}", render_processing_progress(state));
    out.push_str("\nПроверка платежа может занять до 1 минуты. После завершения вы увидите чек.\n");
    out.push_str("Не закрывайте окно\n");
    out
}

fn render_receipt(state: &WizardState, settings: &WizardSettings) -> String {
    let mut out = String::from("Оплата успешна!\nВаш платёж обработан. Спасибо!\n\n");
    match Receipt::from_state(state, &settings.receipt) {
        Some(receipt) => out.push_str(&receipt.render_text()),
        None => out.push_str("Чек недоступен\n"),
    }
    out.push_str("\n> new");
    if settings.flow.receipt_export {
        out.push_str(", save [text|json]");
    }
    out.push('\n');
    out
}

/// `m:ss` of the transfer window, flagged when little time is left.
pub fn render_transfer_countdown(state: &WizardState) -> String {
    let countdown = state.transfer_deadline;
    if countdown.remaining() < URGENT_SECS {
        format!("{countdown} (!)")
    } else {
        countdown.to_string()
    }
}

/// Processing countdown with a text progress bar.
pub fn render_processing_progress(state: &WizardState) -> String {
    const WIDTH: usize = 20;
    let percent = state.processing.elapsed_percent();
    let filled = usize::from(percent) * WIDTH / 100;
    format!(
        "Проверка платежа [{}{}] {percent}%  {}",
        "#".repeat(filled),
        ".".repeat(WIDTH - filled),
        state.processing
    )
}

/// A one-line countdown update, or `None` when this second is not worth
/// a line of output.
pub fn render_countdown_line(state: &WizardState) -> Option<String> {
    match state.step {
        Step::AwaitingCardTransfer | Step::AwaitingSbpTransfer if !state.is_verifying => {
            let remaining = state.transfer_deadline.remaining();
            (remaining % 30 == 0 || remaining <= 10).then(|| {
                format!("Осталось времени: {}", render_transfer_countdown(state))
            })
        }
        Step::Processing => {
            let remaining = state.processing.remaining();
            (remaining % 10 == 0).then(|| render_processing_progress(state))
        }
        _ => None,
    }
}

pub fn render_notification(notification: &Notification) -> String {
    let tag = match notification.severity {
        Severity::Info => "i",
        Severity::Destructive => "!",
    };
    format!(
        "[{tag}] {}: {}",
        notification.title, notification.description
    )
}

pub fn render_embed_page(settings: &WizardSettings) -> String {
    let mut out = format!("{SEPARATOR}\nКод для вставки на сайт\n\n");
    out.push_str("Tilda:\n");
    for (i, step) in TILDA_STEPS.iter().enumerate() {
        let _ = writeln!(out, "  {}. {step}", i + 1);
    }
    out.push('\n');
    out.push_str(&iframe_snippet(&settings.embed));
    out.push_str("\n\n> copy, back (назад к форме)\n");
    out
}
