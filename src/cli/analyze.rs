use super::ui;
use crate::core::budget::Buckets;
use crate::core::currency::format_amount;
use crate::core::{BudgetAnalysis, CurrencyCode, Expense, Severity, analyze};
use anyhow::Result;
use comfy_table::Cell;

pub fn run(income: f64, expenses: &[Expense], currency: CurrencyCode) -> Result<()> {
    let analysis = analyze(income, expenses, currency)?;
    println!(
        "\n{}",
        ui::style_text("50/30/20 budget analysis", ui::StyleType::Title)
    );
    println!("{}", buckets_table(&analysis));
    println!("{}", diagnostics_table(&analysis));
    println!(
        "{} {}",
        ui::style_text("Room left to save this month:", ui::StyleType::TotalLabel),
        ui::style_text(
            &format_amount(analysis.available_savings, analysis.currency, true),
            ui::StyleType::TotalValue
        )
    );
    Ok(())
}

struct BucketRow {
    label: &'static str,
    total: f64,
    percentage: f64,
    severity: Severity,
    target: &'static str,
}

fn bucket_rows(analysis: &BudgetAnalysis) -> Vec<BucketRow> {
    let Buckets {
        needs,
        wants,
        savings,
    } = analysis.percentages;
    let buckets = [
        ("Needs", analysis.totals.needs, needs, "<= 50%"),
        ("Wants", analysis.totals.wants, wants, "<= 30%"),
        ("Savings", analysis.totals.savings, savings, ">= 20%"),
    ];
    // Diagnostics come in bucket order and were judged on unrounded shares
    buckets
        .into_iter()
        .zip(&analysis.diagnostics)
        .map(|((label, total, percentage, target), diagnostic)| BucketRow {
            label,
            total,
            percentage,
            severity: diagnostic.severity,
            target,
        })
        .collect()
}

fn buckets_table(analysis: &BudgetAnalysis) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Bucket"),
        ui::header_cell(&format!("Total ({})", analysis.currency)),
        ui::header_cell("% of income"),
        ui::header_cell("Target"),
    ]);

    for row in bucket_rows(analysis) {
        table.add_row(vec![
            Cell::new(row.label),
            ui::number_cell(format_amount(row.total, analysis.currency, true)),
            ui::percentage_cell(row.percentage, row.severity),
            Cell::new(ui::style_text(row.target, ui::StyleType::Subtle)),
        ]);
    }
    table.add_row(vec![
        Cell::new(ui::style_text("Income", ui::StyleType::TotalLabel)),
        ui::number_cell(format_amount(analysis.income, analysis.currency, true)),
        Cell::new(""),
        Cell::new(""),
    ]);
    table.to_string()
}

fn diagnostics_table(analysis: &BudgetAnalysis) -> String {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Status"),
        ui::header_cell("Diagnosis"),
        ui::header_cell("Advice"),
    ]);
    for diagnostic in &analysis.diagnostics {
        table.add_row(vec![
            ui::severity_cell(diagnostic.severity),
            Cell::new(&diagnostic.message),
            Cell::new(diagnostic.advice),
        ]);
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ExpenseCategory;

    fn sample() -> BudgetAnalysis {
        analyze(
            4_000_000.0,
            &[
                Expense::new(2_400_000.0, ExpenseCategory::Need),
                Expense::new(900_000.0, ExpenseCategory::Want),
                Expense::new(700_000.0, ExpenseCategory::Saving),
            ],
            CurrencyCode::Cop,
        )
        .unwrap()
    }

    #[test]
    fn test_buckets_table() {
        let output = buckets_table(&sample());
        assert!(output.contains("Needs"));
        assert!(output.contains("$ 2.400.000"));
        assert!(output.contains("60.0%"));
        assert!(output.contains("22.5%"));
        assert!(output.contains("17.5%"));
        assert!(output.contains("$ 4.000.000"));
    }

    #[test]
    fn test_diagnostics_table() {
        let output = diagnostics_table(&sample());
        assert!(output.contains("DANGER"));
        assert!(output.contains("OK"));
        assert!(output.contains("WARNING"));
    }

    #[test]
    fn test_bucket_rows_follow_diagnostics() {
        // 50.04% needs shows as 50.0% but is still past the 50% line
        let analysis = analyze(
            10_000.0,
            &[
                Expense::new(5_004.0, ExpenseCategory::Need),
                Expense::new(3_000.0, ExpenseCategory::Want),
                Expense::new(1_996.0, ExpenseCategory::Saving),
            ],
            CurrencyCode::Cop,
        )
        .unwrap();

        let rows = bucket_rows(&analysis);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].label, "Needs");
        assert_eq!(rows[0].percentage, 50.0);
        assert_eq!(rows[0].severity, Severity::Warning);
        assert_eq!(rows[1].severity, Severity::Success);
        assert_eq!(rows[2].percentage, 20.0);
        assert_eq!(rows[2].severity, Severity::Warning);
    }

    #[test]
    fn test_run_rejects_zero_income() {
        let result = run(0.0, &[], CurrencyCode::Cop);
        assert_eq!(
            result.unwrap_err().to_string(),
            "Income must be greater than 0"
        );
    }
}
