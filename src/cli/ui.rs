use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use rust_decimal::Decimal;

use crate::core::format::format_currency;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Error,
    Warning,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
        StyleType::Error => style(text).red(),
        StyleType::Warning => style(text).yellow(),
        StyleType::Subtle => style(text).dim(),
    };
    styled.to_string()
}

/// Creates a new `comfy_table::Table` with standard styling.
pub fn new_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Creates a styled header cell for a table.
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Right-aligned amount with its currency symbol, red when negative.
pub fn amount_cell(amount: Decimal, symbol: &str) -> Cell {
    let cell =
        Cell::new(format_currency(amount, Some(symbol), true)).set_alignment(CellAlignment::Right);
    if amount.is_sign_negative() && !amount.is_zero() {
        cell.fg(Color::Red)
    } else {
        cell
    }
}

/// Formats a cell with bold and green text
pub fn format_percentage_cell(value: u32) -> Cell {
    Cell::new(format!("{value}%"))
        .add_attribute(Attribute::Bold)
        .fg(Color::Green)
        .set_alignment(CellAlignment::Right)
}

/// A colored block for a palette entry such as `#34C759`.
pub fn swatch_cell(hex: &str) -> Cell {
    match parse_hex_color(hex) {
        Some(color) => Cell::new("██").fg(color),
        None => Cell::new(hex).fg(Color::DarkGrey),
    }
}

/// Parses `#RRGGBB` into a terminal color.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 || !digits.is_ascii() {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Color::Rgb {
        r: channel(0..2)?,
        g: channel(2..4)?,
        b: channel(4..6)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_color() {
        assert_eq!(
            parse_hex_color("#34C759"),
            Some(Color::Rgb {
                r: 0x34,
                g: 0xC7,
                b: 0x59
            })
        );
        assert_eq!(parse_hex_color("34C759"), None);
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GG0000"), None);
    }

    #[test]
    fn test_amount_cell_uses_given_symbol() {
        assert_eq!(amount_cell(Decimal::from(-5), "$").content(), "-$5.00");
        assert_eq!(amount_cell(Decimal::from(1200), "₱").content(), "₱1,200.00");
    }
}
