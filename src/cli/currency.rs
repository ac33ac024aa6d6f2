use super::ui;
use crate::core::{CurrencyCode, RateLoader, RateSnapshot};
use anyhow::Result;
use comfy_table::Cell;

async fn load_with_spinner(loader: &RateLoader) -> RateSnapshot {
    let pb = ui::new_spinner("Fetching exchange rates...");
    let snapshot = loader.load().await;
    pb.finish_and_clear();
    snapshot
}

fn origin_note(snapshot: &RateSnapshot) -> String {
    let text = if snapshot.is_live() {
        format!(
            "Live rates as of {}",
            snapshot.updated_at.format("%d/%m/%Y %H:%M UTC")
        )
    } else {
        "Live rates unavailable, using reference rates".to_string()
    };
    ui::style_text(&text, ui::StyleType::Subtle)
}

pub async fn convert(
    amount: f64,
    from: CurrencyCode,
    to: CurrencyCode,
    loader: &RateLoader,
) -> Result<()> {
    let snapshot = load_with_spinner(loader).await;
    println!("{}", display_conversion(amount, from, to, &snapshot));
    println!("{}", origin_note(&snapshot));
    Ok(())
}

fn display_conversion(
    amount: f64,
    from: CurrencyCode,
    to: CurrencyCode,
    snapshot: &RateSnapshot,
) -> String {
    let converted = snapshot.table.convert(amount, from, to);
    let rate = snapshot.table.cross_rate(from, to);
    format!(
        "{} {} {}\n1 {from} = {rate:.6} {to}",
        ui::style_text(&format!("{amount:.2} {from}"), ui::StyleType::TotalLabel),
        ui::style_text("->", ui::StyleType::Subtle),
        ui::style_text(&format!("{converted:.2} {to}"), ui::StyleType::TotalValue),
    )
}

pub async fn list(loader: &RateLoader) -> Result<()> {
    let snapshot = load_with_spinner(loader).await;
    println!("{}", currencies_table(&snapshot));
    println!("{}", origin_note(&snapshot));
    Ok(())
}

fn currencies_table(snapshot: &RateSnapshot) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell("Symbol"),
        ui::header_cell(&format!("Rate ({})", CurrencyCode::BASE)),
    ]);
    for (code, rate) in snapshot.table.iter() {
        table.add_row(vec![
            Cell::new(code.code()),
            Cell::new(code.name()),
            Cell::new(code.symbol()),
            ui::number_cell(format!("{rate:.4}")),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currencies_table() {
        let output = currencies_table(&RateSnapshot::fallback());
        assert!(output.contains("Rate (COP)"));
        assert!(output.contains("Peruvian Sol"));
        assert!(output.contains("4100.0000"));
        assert!(output.contains("4.8000"));
    }

    #[test]
    fn test_origin_note_for_fallback() {
        let note = origin_note(&RateSnapshot::fallback());
        assert!(note.contains("reference rates"));
    }

    #[test]
    fn test_display_conversion_with_reference_rates() {
        let snapshot = RateSnapshot::fallback();

        let output = display_conversion(100.0, CurrencyCode::Eur, CurrencyCode::Usd, &snapshot);
        assert!(output.contains("100.00 EUR"));
        assert!(output.contains("109.76 USD"));
        assert!(output.contains("1 EUR = 1.097561 USD"));

        let output = display_conversion(250.0, CurrencyCode::Cop, CurrencyCode::Cop, &snapshot);
        assert!(output.contains("250.00 COP"));
        assert!(output.contains("1 COP = 1.000000 COP"));
    }

    #[tokio::test]
    async fn test_convert_offline() {
        let result = convert(100.0, CurrencyCode::Usd, CurrencyCode::Eur, &RateLoader::offline()).await;
        assert!(result.is_ok());
    }
}
