//! Settlement error types.

use bodega_shared::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::currency::CurrencyError;

/// Errors that can occur while settling a sale or a receivable payment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    /// A tender could not be normalized to the anchor currency.
    #[error(transparent)]
    Currency(#[from] CurrencyError),

    /// Tender amounts cannot be negative.
    #[error("Tender amount cannot be negative: {amount}")]
    NegativeTender {
        /// The offending amount.
        amount: Decimal,
    },

    /// Receivable payment exceeds the targeted balances beyond tolerance.
    #[error("Payment of {tendered} exceeds outstanding balance of {outstanding}")]
    OverpaymentRejected {
        /// Tendered total in the anchor currency.
        tendered: Decimal,
        /// Sum of the targeted balances.
        outstanding: Decimal,
    },

    /// Receivable payment with nothing tendered.
    #[error("No payment was tendered")]
    NothingTendered,

    /// A running total does not fit in a decimal.
    #[error("Arithmetic overflow adding up {left} and {right}")]
    Overflow {
        /// Running total so far.
        left: Decimal,
        /// Amount that could not be combined with it.
        right: Decimal,
    },

    /// No tender row with the given id.
    #[error("Tender not found: {0}")]
    TenderNotFound(bodega_shared::types::TenderId),
}

impl SettlementError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::Currency(inner) => inner.error_code(),
            Self::NegativeTender { .. } => "NEGATIVE_TENDER",
            Self::OverpaymentRejected { .. } => "OVERPAYMENT_REJECTED",
            Self::NothingTendered => "NOTHING_TENDERED",
            Self::Overflow { .. } => "ARITHMETIC_OVERFLOW",
            Self::TenderNotFound(_) => "TENDER_NOT_FOUND",
        }
    }
}

impl From<SettlementError> for AppError {
    fn from(err: SettlementError) -> Self {
        match err {
            SettlementError::Currency(inner) => inner.into(),
            SettlementError::NegativeTender { .. }
            | SettlementError::NothingTendered
            | SettlementError::Overflow { .. } => {
                Self::Validation(err.to_string())
            }
            SettlementError::OverpaymentRejected { .. } => Self::BusinessRule(err.to_string()),
            SettlementError::TenderNotFound(_) => Self::NotFound(err.to_string()),
        }
    }
}
