//! 50/30/20 budget analysis.
//!
//! Expenses are split into needs, wants and savings, each bucket is compared
//! with its share of income and a diagnostic is produced per bucket.

use super::currency::CurrencyCode;
use super::error::{CalcError, CalcResult};
use super::round;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::debug;

/// Share of income that should go to savings.
pub const SAVINGS_TARGET: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ExpenseCategory {
    Need,
    Want,
    Saving,
    /// Any other label. Kept as given and left out of every bucket.
    Other(String),
}

impl From<String> for ExpenseCategory {
    fn from(label: String) -> Self {
        match label.trim().to_lowercase().as_str() {
            "need" | "needs" | "necesidad" => ExpenseCategory::Need,
            "want" | "wants" | "deseo" => ExpenseCategory::Want,
            "saving" | "savings" | "ahorro" => ExpenseCategory::Saving,
            _ => ExpenseCategory::Other(label),
        }
    }
}

impl From<ExpenseCategory> for String {
    fn from(category: ExpenseCategory) -> Self {
        match category {
            ExpenseCategory::Need => "need".to_string(),
            ExpenseCategory::Want => "want".to_string(),
            ExpenseCategory::Saving => "saving".to_string(),
            ExpenseCategory::Other(label) => label,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    #[serde(alias = "monto")]
    pub amount: f64,
    #[serde(alias = "categoria")]
    pub category: ExpenseCategory,
}

impl Expense {
    pub fn new(amount: f64, category: ExpenseCategory) -> Self {
        Self { amount, category }
    }
}

/// Parses `AMOUNT:CATEGORY`, e.g. `1200000:need`.
impl FromStr for Expense {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (amount, category) = s
            .split_once(':')
            .ok_or_else(|| anyhow::anyhow!("Expected AMOUNT:CATEGORY, got '{}'", s))?;
        let amount = amount
            .trim()
            .parse::<f64>()
            .map_err(|e| anyhow::anyhow!("Invalid expense amount '{}': {}", amount, e))?;
        Ok(Expense::new(amount, category.to_string().into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Danger,
    Warning,
    Success,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    pub advice: &'static str,
}

/// Per-bucket values, either money totals or percentages of income.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Buckets {
    pub needs: f64,
    pub wants: f64,
    pub savings: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetAnalysis {
    pub income: f64,
    pub currency: CurrencyCode,
    pub currency_symbol: &'static str,
    pub totals: Buckets,
    pub percentages: Buckets,
    /// Always three entries: needs, wants, savings.
    pub diagnostics: Vec<Diagnostic>,
    /// What is still missing to reach the savings target this month.
    pub available_savings: f64,
}

/// Analyzes `expenses` against `income` with the 50/30/20 rule.
pub fn analyze(
    income: f64,
    expenses: &[Expense],
    currency: CurrencyCode,
) -> CalcResult<BudgetAnalysis> {
    if !(income.is_finite() && income > 0.0) {
        return Err(CalcError::InvalidIncome);
    }
    if let Some(bad) = expenses
        .iter()
        .find(|e| !(e.amount.is_finite() && e.amount >= 0.0))
    {
        return Err(CalcError::InvalidExpense(bad.amount));
    }

    let sum = |wanted: ExpenseCategory| -> f64 {
        expenses
            .iter()
            .filter(|e| e.category == wanted)
            .map(|e| e.amount)
            .sum()
    };
    let totals = Buckets {
        needs: sum(ExpenseCategory::Need),
        wants: sum(ExpenseCategory::Want),
        savings: sum(ExpenseCategory::Saving),
    };
    let percentages = Buckets {
        needs: (totals.needs / income) * 100.0,
        wants: (totals.wants / income) * 100.0,
        savings: (totals.savings / income) * 100.0,
    };
    debug!(?totals, ?percentages, "Classified expenses");

    let diagnostics = vec![
        needs_diagnostic(percentages.needs),
        wants_diagnostic(percentages.wants),
        savings_diagnostic(percentages.savings),
    ];

    let available_savings = (income * SAVINGS_TARGET - totals.savings).max(0.0);

    Ok(BudgetAnalysis {
        income,
        currency,
        currency_symbol: currency.symbol(),
        totals: Buckets {
            needs: round::money(totals.needs),
            wants: round::money(totals.wants),
            savings: round::money(totals.savings),
        },
        percentages: Buckets {
            needs: round::percent(percentages.needs),
            wants: round::percent(percentages.wants),
            savings: round::percent(percentages.savings),
        },
        diagnostics,
        available_savings: round::money(available_savings),
    })
}

fn needs_diagnostic(pct: f64) -> Diagnostic {
    if pct > 55.0 {
        Diagnostic {
            severity: Severity::Danger,
            message: format!(
                "Your needs take {pct:.1}% of your income, above the recommended 50%."
            ),
            advice: "Review fixed costs such as rent, utilities or subscriptions. You could negotiate rates or look for cheaper alternatives.",
        }
    } else if pct > 50.0 {
        Diagnostic {
            severity: Severity::Warning,
            message: format!("Your needs take {pct:.1}%. You are slightly above 50%."),
            advice: "Keep an eye on these costs. Small adjustments to services can make a difference.",
        }
    } else {
        Diagnostic {
            severity: Severity::Success,
            message: format!("Excellent! Your needs are only {pct:.1}% of your income."),
            advice: "You are handling essential costs well. The surplus can go to savings or wants.",
        }
    }
}

fn wants_diagnostic(pct: f64) -> Diagnostic {
    if pct > 35.0 {
        Diagnostic {
            severity: Severity::Danger,
            message: format!(
                "Your wants take {pct:.1}% of your income, above the recommended 30%."
            ),
            advice: "Find 2-3 subscriptions you can cancel or cut back on eating out.",
        }
    } else if pct > 30.0 {
        Diagnostic {
            severity: Severity::Warning,
            message: format!("Your wants take {pct:.1}%. You are at the 30% limit."),
            advice: "Decide which wants really make you happy. A weekly budget for treats can help.",
        }
    } else {
        Diagnostic {
            severity: Severity::Success,
            message: format!("Good! Your wants are only {pct:.1}% of your income."),
            advice: "You enjoy yourself without neglecting your finances. Keep it up!",
        }
    }
}

fn savings_diagnostic(pct: f64) -> Diagnostic {
    if pct < 15.0 {
        Diagnostic {
            severity: Severity::Danger,
            message: format!(
                "You are saving only {pct:.1}%, well below the recommended 20%."
            ),
            advice: "Remember the rule: \"Pay yourself first\". Schedule an automatic transfer on the day you get paid.",
        }
    } else if pct < 20.0 {
        Diagnostic {
            severity: Severity::Warning,
            message: format!("You save {pct:.1}%, close to the ideal 20%."),
            advice: "Try to raise your savings gradually. Every small increase adds up thanks to compound interest.",
        }
    } else {
        Diagnostic {
            severity: Severity::Success,
            message: format!("Excellent! You save {pct:.1}%, beating the 20% target."),
            advice: "Consider diversifying your investments. The saving habit will take you far.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expenses(items: &[(f64, &str)]) -> Vec<Expense> {
        items
            .iter()
            .map(|(amount, category)| Expense::new(*amount, category.to_string().into()))
            .collect()
    }

    fn severities(analysis: &BudgetAnalysis) -> Vec<Severity> {
        analysis.diagnostics.iter().map(|d| d.severity).collect()
    }

    #[test]
    fn test_analyze_reference_budget() {
        let analysis = analyze(
            1000.0,
            &expenses(&[(600.0, "need"), (300.0, "want"), (100.0, "saving")]),
            CurrencyCode::Cop,
        )
        .unwrap();

        assert_eq!(analysis.percentages.needs, 60.0);
        assert_eq!(analysis.percentages.wants, 30.0);
        assert_eq!(analysis.percentages.savings, 10.0);
        // Exactly 30% sits on the boundary and is not yet above it
        assert_eq!(
            severities(&analysis),
            vec![Severity::Danger, Severity::Success, Severity::Danger]
        );
        assert_eq!(analysis.available_savings, 100.0);
        assert_eq!(analysis.currency_symbol, "$");
        assert!(analysis.diagnostics[0].message.contains("60.0%"));
    }

    #[test]
    fn test_analyze_tiers() {
        let analysis = analyze(
            1000.0,
            &expenses(&[(520.0, "need"), (310.0, "want"), (170.0, "saving")]),
            CurrencyCode::Usd,
        )
        .unwrap();
        assert_eq!(
            severities(&analysis),
            vec![Severity::Warning, Severity::Warning, Severity::Warning]
        );
        assert_eq!(analysis.available_savings, 30.0);

        let analysis = analyze(
            1000.0,
            &expenses(&[(450.0, "need"), (360.0, "want"), (200.0, "saving")]),
            CurrencyCode::Usd,
        )
        .unwrap();
        assert_eq!(
            severities(&analysis),
            vec![Severity::Success, Severity::Danger, Severity::Success]
        );
        assert_eq!(analysis.available_savings, 0.0);
    }

    #[test]
    fn test_analyze_excludes_unknown_categories() {
        let analysis = analyze(
            2000.0,
            &expenses(&[
                (500.0, "necesidad"),
                (300.0, "Wants"),
                (400.0, "ahorro"),
                (800.0, "gifts"),
            ]),
            CurrencyCode::Eur,
        )
        .unwrap();

        assert_eq!(analysis.totals.needs, 500.0);
        assert_eq!(analysis.totals.wants, 300.0);
        assert_eq!(analysis.totals.savings, 400.0);
        let pct = analysis.percentages;
        assert_eq!(pct.needs + pct.wants + pct.savings, 60.0);
    }

    #[test]
    fn test_analyze_rounds_outputs() {
        let analysis = analyze(
            3000.0,
            &expenses(&[(1000.0, "need"), (333.333, "saving")]),
            CurrencyCode::Cop,
        )
        .unwrap();
        assert_eq!(analysis.percentages.needs, 33.3);
        assert_eq!(analysis.percentages.savings, 11.1);
        assert_eq!(analysis.totals.savings, 333.33);
        assert_eq!(analysis.available_savings, 266.67);
    }

    #[test]
    fn test_analyze_without_expenses() {
        let analysis = analyze(1500.0, &[], CurrencyCode::Cop).unwrap();
        assert_eq!(analysis.diagnostics.len(), 3);
        assert_eq!(
            severities(&analysis),
            vec![Severity::Success, Severity::Success, Severity::Danger]
        );
        assert_eq!(analysis.available_savings, 300.0);
    }

    #[test]
    fn test_analyze_rejects_invalid_input() {
        assert_eq!(
            analyze(0.0, &[], CurrencyCode::Cop),
            Err(CalcError::InvalidIncome)
        );
        assert_eq!(
            analyze(-10.0, &[], CurrencyCode::Cop),
            Err(CalcError::InvalidIncome)
        );
        assert_eq!(
            analyze(f64::NAN, &[], CurrencyCode::Cop),
            Err(CalcError::InvalidIncome)
        );
        assert_eq!(
            analyze(100.0, &expenses(&[(-5.0, "need")]), CurrencyCode::Cop),
            Err(CalcError::InvalidExpense(-5.0))
        );
    }

    #[test]
    fn test_expense_parsing() {
        let expense: Expense = "1200000:need".parse().unwrap();
        assert_eq!(expense, Expense::new(1_200_000.0, ExpenseCategory::Need));

        let expense: Expense = "50.5: travel".parse().unwrap();
        assert_eq!(
            expense.category,
            ExpenseCategory::Other(" travel".to_string())
        );

        assert!("abc:need".parse::<Expense>().is_err());
        assert!("100".parse::<Expense>().is_err());
    }

    #[test]
    fn test_expense_deserialization() {
        let parsed: Vec<Expense> = serde_json::from_str(
            r#"[{"amount": 10, "category": "want"}, {"monto": 5, "categoria": "ahorro"}]"#,
        )
        .unwrap();
        assert_eq!(parsed[0], Expense::new(10.0, ExpenseCategory::Want));
        assert_eq!(parsed[1], Expense::new(5.0, ExpenseCategory::Saving));
    }
}
