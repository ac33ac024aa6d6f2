use super::ui;
use crate::core::currency::format_amount;
use crate::core::{CurrencyCode, GoalProjection, GoalRequest, project};
use anyhow::Result;
use chrono::Local;
use comfy_table::Cell;

pub fn run(request: &GoalRequest, currency: CurrencyCode) -> Result<()> {
    let projection = project(request, currency, Local::now().date_naive())?;
    println!(
        "\n{}",
        ui::style_text("Savings goal projection", ui::StyleType::Title)
    );
    println!("{}", display_projection(&projection));
    Ok(())
}

fn display_projection(projection: &GoalProjection) -> String {
    let mut table = ui::new_styled_table();
    let mut row = |label: &str, value: String| {
        table.add_row(vec![
            Cell::new(ui::style_text(label, ui::StyleType::TotalLabel)),
            ui::number_cell(value),
        ]);
    };

    match projection {
        GoalProjection::GoalMet {
            message,
            surplus,
            current_savings,
            target,
            currency,
            ..
        } => {
            row("Status", message.to_string());
            row("Target", format_amount(*target, *currency, true));
            row("Current savings", format_amount(*current_savings, *currency, true));
            row("Surplus", format_amount(*surplus, *currency, true));
        }
        GoalProjection::ByTimeframe {
            months,
            required_monthly,
            remaining,
            estimated_completion,
            currency,
            ..
        } => {
            row("Still to save", format_amount(*remaining, *currency, true));
            row("Timeframe", format!("{months} months"));
            row(
                "Save every month",
                format_amount(*required_monthly, *currency, true),
            );
            row("Estimated completion", estimated_completion.long.clone());
        }
        GoalProjection::ByContribution {
            months_required,
            years_required,
            monthly_contribution,
            remaining,
            estimated_completion,
            currency,
            ..
        } => {
            row("Still to save", format_amount(*remaining, *currency, true));
            row(
                "Monthly contribution",
                format_amount(*monthly_contribution, *currency, true),
            );
            row(
                "Time needed",
                format!("{months_required:.1} months ({years_required:.1} years)"),
            );
            row("Estimated completion", estimated_completion.long.clone());
        }
    }
    table.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn projection(monthly: Option<f64>, months: Option<i64>) -> GoalProjection {
        let request = GoalRequest {
            target: 12_000_000.0,
            current_savings: 2_000_000.0,
            monthly_contribution: monthly,
            desired_months: months,
        };
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        project(&request, CurrencyCode::Cop, today).unwrap()
    }

    #[test]
    fn test_display_by_timeframe() {
        let output = display_projection(&projection(None, Some(20)));
        assert!(output.contains("$ 10.000.000"));
        assert!(output.contains("20 months"));
        assert!(output.contains("$ 500.000"));
    }

    #[test]
    fn test_display_by_contribution() {
        let output = display_projection(&projection(Some(400_000.0), None));
        assert!(output.contains("25.0 months (2.1 years)"));
        assert!(output.contains("$ 400.000"));
    }
}
