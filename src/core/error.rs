use thiserror::Error;

/// Validation failures of the calculators.
///
/// Every variant is detected before any arithmetic runs, so a caller always
/// gets one of these instead of a panic or a NaN.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("Unsupported currency: {0}")]
    UnknownCurrency(String),
    #[error("Income must be greater than 0")]
    InvalidIncome,
    #[error("Expense amounts must be non-negative numbers, got {0}")]
    InvalidExpense(f64),
    #[error("Target amount must be greater than 0")]
    InvalidTarget,
    #[error("The projection is not valid. Check the amounts entered.")]
    InvalidComputation,
    #[error("Provide either a monthly contribution or a desired timeframe")]
    MissingParameter,
}

pub type CalcResult<T> = Result<T, CalcError>;
