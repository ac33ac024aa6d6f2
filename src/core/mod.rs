//! Core business logic: the calculators and the exchange-rate table

pub mod budget;
pub mod config;
pub mod currency;
pub mod error;
pub mod goal;
pub mod log;
pub mod rates;
pub mod round;
pub mod tips;

// Re-export main types for cleaner imports
pub use budget::{BudgetAnalysis, Expense, ExpenseCategory, Severity, analyze};
pub use currency::{CurrencyCode, ExchangeRateTable, RateSource};
pub use error::{CalcError, CalcResult};
pub use goal::{GoalProjection, GoalRequest, project};
pub use rates::{RateCache, RateLoader, RateOrigin, RateSnapshot};
pub use tips::{FinancialTips, financial_tips};
