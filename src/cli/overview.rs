use super::ui;
use crate::core::chart::Breakdown;
use crate::core::format::format_currency;
use crate::core::geometry::{Focus, FocusedSlice, slice_arcs};
use comfy_table::{Cell, CellAlignment};

impl Breakdown {
    /// Slices with their share and position on the circle.
    pub fn display_as_table(&self, focus: Focus, symbol: &str) -> String {
        let mut table = ui::new_styled_table();
        table.set_header(vec![
            ui::header_cell(""),
            ui::header_cell("Account"),
            ui::header_cell("Amount"),
            ui::header_cell("Share"),
            ui::header_cell("Label"),
            ui::header_cell("Arc"),
        ]);

        for ((index, slice), arc) in self.slices.iter().enumerate().zip(slice_arcs(self)) {
            let marker = if focus.index() == Some(index) { "▶ " } else { "" };
            table.add_row(vec![
                ui::swatch_cell(&slice.color),
                Cell::new(format!("{marker}{}", slice.name)),
                ui::amount_cell(slice.balance, symbol),
                ui::format_percentage_cell(slice.percentage),
                Cell::new(slice.label_text().replace('\n', " ")),
                Cell::new(format!("{:.1}°–{:.1}°", arc.start, arc.start + arc.span))
                    .set_alignment(CellAlignment::Right),
            ]);
        }
        table.to_string()
    }
}

/// Detail callout for the focused slice, tagged with its screen corner.
pub fn display_callout(focused: &FocusedSlice<'_>, symbol: &str) -> String {
    let slice = focused.slice;
    let amount = format_currency(slice.balance, Some(symbol), true);
    let amount = if slice.is_owed() {
        ui::style_text(&amount, ui::StyleType::Error)
    } else {
        amount
    };
    format!(
        "{} {}\n  {}\n  {}\n  ({}%)",
        ui::style_text("Callout", ui::StyleType::TotalLabel),
        ui::style_text(&format!("[{}]", focused.quadrant), ui::StyleType::Subtle),
        slice.name,
        amount,
        slice.percentage
    )
}

/// Total, chart and legend, plus the callout when a slice is focused.
pub fn display_overview(breakdown: &Breakdown, focus: Focus, symbol: &str) -> String {
    let mut out = vec![
        ui::style_text("Overview", ui::StyleType::Title),
        format!(
            "{} {}",
            ui::style_text("Total:", ui::StyleType::TotalLabel),
            ui::style_text(
                &format_currency(breakdown.total, Some(symbol), true),
                ui::StyleType::TotalValue
            )
        ),
    ];

    if breakdown.is_empty() {
        out.push(ui::style_text(
            "Add an account with a balance to see a chart",
            ui::StyleType::Subtle,
        ));
        return out.join("\n");
    }

    out.push(breakdown.display_as_table(focus, symbol));
    if let Some(focused) = focus.resolve(breakdown) {
        out.push(display_callout(&focused, symbol));
    }
    out.join("\n")
}
