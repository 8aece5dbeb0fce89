use rust_decimal::Decimal;

/// Thousands separator used by the `ru-RU` number format.
const GROUP_SEPARATOR: char = '\u{a0}';

/// Format an amount the way Russian receipts print it: groups of three
/// separated by a non-breaking space, `,` before at most three fraction
/// digits, trailing zeros dropped, then the ruble sign.
pub fn format_rubles(amount: Decimal) -> String {
    let text = amount.round_dp(3).normalize().to_string();
    let (sign, digits) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text.as_str()),
    };
    let (integer, fraction) = digits.split_once('.').unwrap_or((digits, ""));

    let mut out = String::with_capacity(text.len() + 8);
    out.push_str(sign);
    let len = integer.len();
    for (i, ch) in integer.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(GROUP_SEPARATOR);
        }
        out.push(ch);
    }
    if !fraction.is_empty() {
        out.push(',');
        out.push_str(fraction);
    }
    out.push_str(" ₽");
    out
}
