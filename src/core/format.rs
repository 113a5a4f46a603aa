//! Money formatting (en-PH conventions).
use rust_decimal::{Decimal, RoundingStrategy};

/// Symbol printed before amounts in `code`. Unknown codes are printed as
/// the code itself followed by a space, e.g. `"SGD "`.
pub fn currency_symbol(code: &str) -> String {
    let code = code.trim().to_uppercase();
    match code.as_str() {
        "PHP" => "₱".to_string(),
        "USD" => "$".to_string(),
        "EUR" => "€".to_string(),
        "GBP" => "£".to_string(),
        "JPY" => "¥".to_string(),
        _ => format!("{code} "),
    }
}

/// Formats `amount` with thousands separators, e.g. `₱1,234.50` or `1,235`.
pub fn format_currency(amount: Decimal, symbol: Option<&str>, with_decimals: bool) -> String {
    let dp: u32 = if with_decimals { 2 } else { 0 };
    let rounded = amount.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let digits = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits.as_str(), None),
    };

    let mut out = String::new();
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    if let Some(symbol) = symbol {
        out.push_str(symbol);
    }
    out.push_str(&group_thousands(int_part));
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
