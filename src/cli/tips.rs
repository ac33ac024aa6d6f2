use super::ui;
use crate::core::tips::Tip;
use crate::core::{FinancialTips, financial_tips};
use anyhow::Result;
use comfy_table::Cell;

pub fn run() -> Result<()> {
    println!("{}", render(&financial_tips()));
    Ok(())
}

fn tips_table(tips: &[Tip]) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![ui::header_cell("Technique"), ui::header_cell("How")]);
    for tip in tips {
        let mut how = tip.description.to_string();
        let extras = [
            ("Benefit", tip.benefit),
            ("Variant", tip.subtype),
            ("Detail", tip.detail),
            ("Example", tip.example),
            ("Fact", tip.fact),
        ];
        for (label, text) in extras {
            if let Some(text) = text {
                how.push_str(&format!("\n{label}: {text}"));
            }
        }
        table.add_row(vec![Cell::new(tip.title), Cell::new(how)]);
    }
    table.to_string()
}

fn render(tips: &FinancialTips) -> String {
    let mut out = String::new();
    for (title, section) in [
        ("Saving techniques", &tips.saving_techniques),
        ("Getting out of debt", &tips.debt_payoff),
        ("Financial freedom", &tips.financial_freedom),
    ] {
        out.push_str(&format!(
            "\n{}\n{}\n",
            ui::style_text(title, ui::StyleType::Title),
            tips_table(section)
        ));
    }

    out.push_str(&format!(
        "\n{}\n",
        ui::style_text("More tips", ui::StyleType::Title)
    ));
    for tip in &tips.additional_tips {
        out.push_str(&format!(
            "{} {}\n",
            ui::style_text(&format!("{}:", tip.category), ui::StyleType::TotalLabel),
            tip.advice
        ));
    }
    out
}
