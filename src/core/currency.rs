//! Supported currencies, exchange-rate tables and conversion.

use super::error::{CalcError, CalcResult};
use super::round;
use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CurrencyCode {
    Cop,
    Usd,
    Eur,
    Mxn,
    Ars,
    Clp,
    Pen,
    Brl,
}

impl CurrencyCode {
    /// Every rate is expressed in units of this currency.
    pub const BASE: CurrencyCode = CurrencyCode::Cop;

    pub const ALL: [CurrencyCode; 8] = [
        CurrencyCode::Cop,
        CurrencyCode::Usd,
        CurrencyCode::Eur,
        CurrencyCode::Mxn,
        CurrencyCode::Ars,
        CurrencyCode::Clp,
        CurrencyCode::Pen,
        CurrencyCode::Brl,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            CurrencyCode::Cop => "COP",
            CurrencyCode::Usd => "USD",
            CurrencyCode::Eur => "EUR",
            CurrencyCode::Mxn => "MXN",
            CurrencyCode::Ars => "ARS",
            CurrencyCode::Clp => "CLP",
            CurrencyCode::Pen => "PEN",
            CurrencyCode::Brl => "BRL",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            CurrencyCode::Cop => "$",
            CurrencyCode::Usd => "US$",
            CurrencyCode::Eur => "€",
            CurrencyCode::Mxn => "MX$",
            CurrencyCode::Ars => "AR$",
            CurrencyCode::Clp => "CL$",
            CurrencyCode::Pen => "S/",
            CurrencyCode::Brl => "R$",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CurrencyCode::Cop => "Colombian Peso",
            CurrencyCode::Usd => "US Dollar",
            CurrencyCode::Eur => "Euro",
            CurrencyCode::Mxn => "Mexican Peso",
            CurrencyCode::Ars => "Argentine Peso",
            CurrencyCode::Clp => "Chilean Peso",
            CurrencyCode::Pen => "Peruvian Sol",
            CurrencyCode::Brl => "Brazilian Real",
        }
    }

    /// Approximate units of the base currency per one unit of `self`, used
    /// whenever no live quote is available.
    pub fn static_rate(&self) -> f64 {
        match self {
            CurrencyCode::Cop => 1.0,
            CurrencyCode::Usd => 4100.0,
            CurrencyCode::Eur => 4500.0,
            CurrencyCode::Mxn => 240.0,
            CurrencyCode::Ars => 4.8,
            CurrencyCode::Clp => 4.5,
            CurrencyCode::Pen => 1100.0,
            CurrencyCode::Brl => 820.0,
        }
    }

    pub fn is_base(&self) -> bool {
        *self == Self::BASE
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for CurrencyCode {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_uppercase();
        CurrencyCode::ALL
            .into_iter()
            .find(|c| c.code() == wanted)
            .ok_or_else(|| CalcError::UnknownCurrency(s.to_string()))
    }
}

/// Rates for every supported currency, in units of the base currency per one
/// unit of the quoted currency.
///
/// A table can only be built complete, so lookups never miss.
#[derive(Debug, Clone, PartialEq)]
pub struct ExchangeRateTable {
    rates: [f64; CurrencyCode::ALL.len()],
}

impl ExchangeRateTable {
    /// The built-in fallback table.
    pub fn fallback() -> Self {
        Self {
            rates: CurrencyCode::ALL.map(|c| c.static_rate()),
        }
    }

    /// Builds a table from live quotes expressed as units of each currency per
    /// one unit of the base currency (the orientation rate APIs answer with).
    ///
    /// Each quote is inverted into the table's orientation. A currency whose
    /// quote is absent, zero, negative or not finite keeps its static rate;
    /// the base currency is always 1.
    pub fn from_base_quotes(quotes: &HashMap<String, f64>) -> Self {
        let rates = CurrencyCode::ALL.map(|currency| {
            if currency.is_base() {
                return 1.0;
            }
            match quotes.get(currency.code()).copied() {
                Some(quote) if quote.is_finite() && quote > 0.0 => 1.0 / quote,
                other => {
                    debug!(
                        %currency,
                        quote = ?other,
                        "No usable live quote, keeping static rate"
                    );
                    currency.static_rate()
                }
            }
        });
        Self { rates }
    }

    pub fn rate(&self, currency: CurrencyCode) -> f64 {
        self.rates[currency.index()]
    }

    /// Rate applied when converting one unit of `from` into `to`.
    pub fn cross_rate(&self, from: CurrencyCode, to: CurrencyCode) -> f64 {
        if from == to {
            1.0
        } else {
            self.rate(from) / self.rate(to)
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (CurrencyCode, f64)> + '_ {
        CurrencyCode::ALL.into_iter().map(|c| (c, self.rate(c)))
    }

    /// Converts `amount` from one currency to another by pivoting through the
    /// base currency. The result is rounded to two decimals, except when
    /// `from == to`, where the amount comes back untouched.
    pub fn convert(&self, amount: f64, from: CurrencyCode, to: CurrencyCode) -> f64 {
        if from == to {
            return amount;
        }

        let in_base = if from.is_base() {
            amount
        } else {
            amount * self.rate(from)
        };
        let converted = if to.is_base() {
            in_base
        } else {
            in_base / self.rate(to)
        };
        round::money(converted)
    }
}

impl Default for ExchangeRateTable {
    fn default() -> Self {
        Self::fallback()
    }
}

/// Parses both currency codes and converts `amount` with `table`.
pub fn convert(amount: f64, from: &str, to: &str, table: &ExchangeRateTable) -> CalcResult<f64> {
    let from = from.parse::<CurrencyCode>()?;
    let to = to.parse::<CurrencyCode>()?;
    Ok(table.convert(amount, from, to))
}

/// Formats an amount with no decimals, `.` as thousands separator and,
/// optionally, the currency symbol: `$ 1.234.568`.
pub fn format_amount(amount: f64, currency: CurrencyCode, with_symbol: bool) -> String {
    let whole = round::round_dp(amount, 0);
    let digits = format!("{:.0}", whole.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    if whole < 0.0 {
        grouped.insert(0, '-');
    }

    if with_symbol {
        format!("{} {}", currency.symbol(), grouped)
    } else {
        grouped
    }
}

/// A source of live exchange-rate quotes.
#[async_trait]
pub trait RateSource: Send + Sync {
    /// Returns quotes keyed by currency code, each expressed as units of that
    /// currency per one unit of `base`.
    async fn fetch_quotes(&self, base: CurrencyCode) -> Result<HashMap<String, f64>>;
}
