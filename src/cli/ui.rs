use crate::core::Severity;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Defines different styles for text elements.
pub enum StyleType {
    Title,
    TotalLabel,
    TotalValue,
    Subtle,
}

/// Applies a consistent style to a string.
pub fn style_text(text: &str, style_type: StyleType) -> String {
    let styled = match style_type {
        StyleType::Title => style(text).bold().underlined(),
        StyleType::TotalLabel => style(text).bold(),
        StyleType::TotalValue => style(text).green().bold(),
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

/// Right-aligned cell for numbers.
pub fn number_cell(text: impl Into<String>) -> Cell {
    Cell::new(text.into()).set_alignment(CellAlignment::Right)
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Danger => Color::Red,
        Severity::Warning => Color::Yellow,
        Severity::Success => Color::Green,
    }
}

/// Percentage cell colored like the bucket's diagnostic.
pub fn percentage_cell(value: f64, severity: Severity) -> Cell {
    Cell::new(format!("{value:.1}%"))
        .fg(severity_color(severity))
        .add_attribute(Attribute::Bold)
        .set_alignment(CellAlignment::Right)
}

/// Colored label for a diagnostic tier.
pub fn severity_cell(severity: Severity) -> Cell {
    let text = match severity {
        Severity::Danger => "DANGER",
        Severity::Warning => "WARNING",
        Severity::Success => "OK",
    };
    Cell::new(text)
        .fg(severity_color(severity))
        .add_attribute(Attribute::Bold)
}

/// Spinner shown while waiting on the network.
pub fn new_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}")
    {
        pb.set_style(spinner_style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
