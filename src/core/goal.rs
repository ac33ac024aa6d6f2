//! Savings goal projection.

use super::currency::CurrencyCode;
use super::error::{CalcError, CalcResult};
use super::round;
use chrono::{Days, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize};

/// Every month counts as this many days when estimating a completion date.
pub const DAYS_PER_MONTH: u64 = 30;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GoalRequest {
    #[serde(alias = "monto_objetivo")]
    pub target: f64,
    #[serde(default, alias = "ahorro_actual")]
    pub current_savings: f64,
    #[serde(default, alias = "ahorro_mensual")]
    pub monthly_contribution: Option<f64>,
    #[serde(
        default,
        alias = "plazo_deseado",
        deserialize_with = "deserialize_months"
    )]
    pub desired_months: Option<i64>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawMonths {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

/// Reads a timeframe given as an integer, a float (truncated) or a numeric
/// string. Anything else reads as no timeframe at all.
pub(crate) fn deserialize_months<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<RawMonths>::deserialize(deserializer)?;
    Ok(match raw {
        Some(RawMonths::Int(months)) => Some(months),
        Some(RawMonths::Float(months)) if months.is_finite() => Some(months.trunc() as i64),
        Some(RawMonths::Text(text)) => text.trim().parse::<i64>().ok(),
        _ => None,
    })
}

/// An estimated completion date in both display forms.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EstimatedDate {
    pub date: NaiveDate,
    /// `dd/mm/YYYY`
    pub short: String,
    /// `dd Month YYYY`
    pub long: String,
}

impl EstimatedDate {
    fn after_days(today: NaiveDate, days: u64) -> Self {
        let date = today.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX);
        Self {
            date,
            short: date.format("%d/%m/%Y").to_string(),
            long: date.format("%d %B %Y").to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalProjection {
    GoalMet {
        message: &'static str,
        surplus: f64,
        current_savings: f64,
        target: f64,
        currency: CurrencyCode,
        currency_symbol: &'static str,
    },
    /// How much to save monthly to finish within a timeframe.
    ByTimeframe {
        months: u64,
        required_monthly: f64,
        remaining: f64,
        estimated_completion: EstimatedDate,
        feasible: bool,
        currency: CurrencyCode,
        currency_symbol: &'static str,
    },
    /// How long a fixed monthly contribution takes to reach the target.
    ByContribution {
        months_required: f64,
        years_required: f64,
        monthly_contribution: f64,
        remaining: f64,
        estimated_completion: EstimatedDate,
        currency: CurrencyCode,
        currency_symbol: &'static str,
    },
}

/// Projects a savings goal from `today`.
///
/// A positive `desired_months` wins over `monthly_contribution` when both are
/// given.
pub fn project(
    request: &GoalRequest,
    currency: CurrencyCode,
    today: NaiveDate,
) -> CalcResult<GoalProjection> {
    let GoalRequest {
        target,
        current_savings: current,
        monthly_contribution,
        desired_months,
    } = *request;

    if !(target.is_finite() && target > 0.0) {
        return Err(CalcError::InvalidTarget);
    }

    if current >= target {
        return Ok(GoalProjection::GoalMet {
            message: "You already reached your goal!",
            surplus: round::money(current - target),
            current_savings: current,
            target,
            currency,
            currency_symbol: currency.symbol(),
        });
    }

    let remaining = target - current;

    if let Some(months) = desired_months.filter(|m| *m > 0) {
        let months = months.unsigned_abs();
        let required_monthly = remaining / months as f64;
        return Ok(GoalProjection::ByTimeframe {
            months,
            required_monthly: round::money(required_monthly),
            remaining: round::money(remaining),
            estimated_completion: EstimatedDate::after_days(today, DAYS_PER_MONTH.saturating_mul(months)),
            // Always true here: a zero remainder is already reported as met.
            feasible: required_monthly > 0.0,
            currency,
            currency_symbol: currency.symbol(),
        });
    }

    match monthly_contribution {
        Some(contribution) if contribution > 0.0 => {
            let months = remaining / contribution;
            // Unreachable with a positive remainder and contribution; kept as
            // a guard against non-finite input.
            if !(months.is_finite() && months > 0.0) {
                return Err(CalcError::InvalidComputation);
            }
            let days = (DAYS_PER_MONTH as f64 * months).floor() as u64;
            Ok(GoalProjection::ByContribution {
                months_required: round::percent(months),
                years_required: round::percent(months / 12.0),
                monthly_contribution: contribution,
                remaining: round::money(remaining),
                estimated_completion: EstimatedDate::after_days(today, days),
                currency,
                currency_symbol: currency.symbol(),
            })
        }
        _ => Err(CalcError::MissingParameter),
    }
}
