//! Currency codes and currency-tagged amounts.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! Amounts wrap `rust_decimal::Decimal` and always carry their currency.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a currency code cannot be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyCodeError {
    /// The code was empty after trimming.
    #[error("Currency code cannot be empty")]
    Empty,
}

/// Short uppercase currency identifier (e.g., "USD", "VES").
///
/// Codes are trimmed and uppercased on construction, so two codes compare
/// equal regardless of the casing they were typed with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a normalized currency code.
    pub fn new(code: &str) -> Result<Self, CurrencyCodeError> {
        let normalized = code.trim().to_uppercase();
        if normalized.is_empty() {
            return Err(CurrencyCodeError::Empty);
        }
        Ok(Self(normalized))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if `other` names this code, ignoring case and padding.
    #[must_use]
    pub fn matches(&self, other: &str) -> bool {
        self.0 == other.trim().to_uppercase()
    }
}

impl std::fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = CurrencyCodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CurrencyCodeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

/// A decimal amount tagged with the currency it is denominated in.
///
/// Crossing a currency boundary always goes through an explicit conversion;
/// arithmetic helpers refuse to mix currencies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonetaryAmount {
    /// The amount.
    pub amount: Decimal,
    /// Currency the amount is denominated in.
    pub currency: CurrencyCode,
}

impl MonetaryAmount {
    /// Creates a new amount.
    #[must_use]
    pub const fn new(amount: Decimal, currency: CurrencyCode) -> Self {
        Self { amount, currency }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: CurrencyCode) -> Self {
        Self {
            amount: Decimal::ZERO,
            currency,
        }
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Adds two amounts of the same currency.
    ///
    /// Returns `None` when the currencies differ or the result overflows.
    #[must_use]
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount.checked_add(other.amount)?;
        Some(Self::new(amount, self.currency.clone()))
    }

    /// Subtracts an amount of the same currency.
    ///
    /// Returns `None` when the currencies differ or the result overflows.
    #[must_use]
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        if self.currency != other.currency {
            return None;
        }
        let amount = self.amount.checked_sub(other.amount)?;
        Some(Self::new(amount, self.currency.clone()))
    }
}

impl std::fmt::Display for MonetaryAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use std::str::FromStr;

    fn usd() -> CurrencyCode {
        CurrencyCode::new("USD").unwrap()
    }

    #[rstest]
    #[case("USD", "USD")]
    #[case("  ves ", "VES")]
    #[case("eur", "EUR")]
    #[case("CoP", "COP")]
    fn test_currency_code_normalizes(#[case] input: &str, #[case] expected: &str) {
        let code = CurrencyCode::new(input).unwrap();
        assert_eq!(code.as_str(), expected);
        assert_eq!(code, CurrencyCode::from_str(expected).unwrap());
    }

    #[test]
    fn test_currency_code_rejects_empty() {
        assert_eq!(CurrencyCode::new(""), Err(CurrencyCodeError::Empty));
        assert_eq!(CurrencyCode::new("   "), Err(CurrencyCodeError::Empty));
    }

    #[test]
    fn test_currency_code_matches_ignores_case() {
        assert!(usd().matches("usd"));
        assert!(usd().matches(" Usd "));
        assert!(!usd().matches("EUR"));
    }

    #[test]
    fn test_currency_code_serde_round_trip() {
        let json = serde_json::to_string(&usd()).unwrap();
        assert_eq!(json, "\"USD\"");

        let parsed: CurrencyCode = serde_json::from_str("\"eur\"").unwrap();
        assert_eq!(parsed.as_str(), "EUR");

        assert!(serde_json::from_str::<CurrencyCode>("\"\"").is_err());
    }

    #[test]
    fn test_amount_zero_and_negative() {
        let zero = MonetaryAmount::zero(usd());
        assert!(zero.is_zero());
        assert!(!zero.is_negative());

        let negative = MonetaryAmount::new(dec!(-10), usd());
        assert!(negative.is_negative());
    }

    #[test]
    fn test_amount_refuses_mixed_currencies() {
        let a = MonetaryAmount::new(dec!(10), usd());
        let b = MonetaryAmount::new(dec!(5), CurrencyCode::new("VES").unwrap());
        assert!(a.checked_add(&b).is_none());
        assert!(a.checked_sub(&b).is_none());

        let c = MonetaryAmount::new(dec!(2.5), usd());
        assert_eq!(a.checked_add(&c).unwrap().amount, dec!(12.5));
        assert_eq!(a.checked_sub(&c).unwrap().amount, dec!(7.5));
    }

    #[test]
    fn test_amount_overflow_is_none() {
        let max = MonetaryAmount::new(Decimal::MAX, usd());
        let min = MonetaryAmount::new(Decimal::MIN, usd());
        assert!(max.checked_add(&max).is_none());
        assert!(min.checked_sub(&max).is_none());
    }

    #[test]
    fn test_amount_serializes_decimal_as_string() {
        let amount = MonetaryAmount::new(dec!(45.00), usd());
        let json = serde_json::to_value(&amount).unwrap();
        assert_eq!(json["amount"], "45.00");
        assert_eq!(json["currency"], "USD");
    }

    #[test]
    fn test_amount_display() {
        let amount = MonetaryAmount::new(dec!(1.50), usd());
        assert_eq!(amount.to_string(), "1.50 USD");
    }
}
