//! Currency error types.

use bodega_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur while converting between currencies.
///
/// A registry miss is not an error: unknown currencies fall back to
/// rate 1 (see `RateRegistry::lookup`).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CurrencyError {
    /// A stored rate is zero or negative.
    #[error("Exchange rate for {currency} must be positive, got {rate}")]
    InvalidRate {
        /// Currency symbol or code the rate was looked up for.
        currency: String,
        /// The offending rate.
        rate: Decimal,
    },

    /// A snapshot carried more than one anchor profile.
    #[error("Only one anchor currency is allowed, found {first} and {second}")]
    MultipleAnchors {
        /// Code of the first anchor seen.
        first: String,
        /// Code of the second anchor seen.
        second: String,
    },

    /// The converted amount does not fit in a decimal.
    #[error("Arithmetic overflow converting {amount} at rate {rate}")]
    Overflow {
        /// Amount being converted.
        amount: Decimal,
        /// Rate used.
        rate: Decimal,
    },
}

impl CurrencyError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidRate { .. } => "INVALID_RATE",
            Self::MultipleAnchors { .. } => "MULTIPLE_ANCHORS",
            Self::Overflow { .. } => "ARITHMETIC_OVERFLOW",
        }
    }
}

impl From<CurrencyError> for AppError {
    fn from(err: CurrencyError) -> Self {
        match err {
            CurrencyError::InvalidRate { .. } => Self::BusinessRule(err.to_string()),
            CurrencyError::MultipleAnchors { .. } => Self::Configuration(err.to_string()),
            CurrencyError::Overflow { .. } => Self::Validation(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_codes() {
        let err = CurrencyError::InvalidRate {
            currency: "Bs".to_string(),
            rate: dec!(0),
        };
        assert_eq!(err.error_code(), "INVALID_RATE");
        assert_eq!(
            err.to_string(),
            "Exchange rate for Bs must be positive, got 0"
        );

        let err = CurrencyError::MultipleAnchors {
            first: "USD".to_string(),
            second: "EUR".to_string(),
        };
        assert_eq!(err.error_code(), "MULTIPLE_ANCHORS");
    }

    #[test]
    fn test_into_app_error() {
        let app: AppError = CurrencyError::InvalidRate {
            currency: "Bs".to_string(),
            rate: dec!(-1),
        }
        .into();
        assert_eq!(app.error_code(), "BUSINESS_RULE_VIOLATION");

        let app: AppError = CurrencyError::MultipleAnchors {
            first: "USD".to_string(),
            second: "EUR".to_string(),
        }
        .into();
        assert_eq!(app.error_code(), "CONFIGURATION_ERROR");
    }
}
