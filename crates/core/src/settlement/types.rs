//! Settlement domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bodega_shared::types::{CurrencyCode, InvoiceId, TenderId};

use super::error::SettlementError;
use crate::currency::{RateRegistry, to_anchor_at};

/// Floating-point noise absorbed when deciding a sale is fully paid.
pub const COMPLETENESS_EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 3);

/// Currency rounding tolerance for balances and overpayments.
pub const CURRENCY_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Decimal places kept for the remaining balance of a sale.
pub const REMAINING_DECIMAL_PLACES: u32 = 4;

/// One payment instrument contributed toward a total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tender {
    /// Row ID.
    pub id: TenderId,
    /// Amount in the tender's own currency.
    pub amount: Decimal,
    /// Currency symbol or code the amount is in.
    pub currency: String,
    /// Payment method label (e.g., "cash", "transfer", "card").
    pub method: String,
    /// Rate used for this tender; looked up in the registry when absent.
    #[serde(default)]
    pub rate: Option<Decimal>,
}

impl Tender {
    /// Creates a tender that takes its rate from the registry.
    #[must_use]
    pub fn new(amount: Decimal, currency: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            id: TenderId::new(),
            amount,
            currency: currency.into(),
            method: method.into(),
            rate: None,
        }
    }

    /// Pins the rate used for this tender.
    #[must_use]
    pub fn at_rate(mut self, rate: Decimal) -> Self {
        self.rate = Some(rate);
        self
    }

    /// Rate used to normalize this tender.
    #[must_use]
    pub fn effective_rate(&self, registry: &RateRegistry) -> Decimal {
        self.rate
            .unwrap_or_else(|| registry.get_rate(&self.currency))
    }

    /// Amount of this tender expressed in the anchor currency.
    pub fn anchor_amount(&self, registry: &RateRegistry) -> Result<Decimal, SettlementError> {
        if self.amount.is_sign_negative() && !self.amount.is_zero() {
            return Err(SettlementError::NegativeTender {
                amount: self.amount,
            });
        }
        let rate = self.effective_rate(registry);
        Ok(to_anchor_at(self.amount, &self.currency, rate)?)
    }
}

/// Sums tenders in the anchor currency.
pub fn total_in_anchor(
    tenders: &[Tender],
    registry: &RateRegistry,
) -> Result<Decimal, SettlementError> {
    tenders.iter().try_fold(Decimal::ZERO, |acc, t| {
        checked_total(acc, t.anchor_amount(registry)?)
    })
}

/// Adds two amounts, failing instead of panicking on overflow.
pub fn checked_total(left: Decimal, right: Decimal) -> Result<Decimal, SettlementError> {
    left.checked_add(right)
        .ok_or(SettlementError::Overflow { left, right })
}

/// Progress of a sale settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettlementStatus {
    /// No tenders yet.
    Empty,
    /// Tenders do not cover the total.
    Partial,
    /// Tenders cover the total within `COMPLETENESS_EPSILON`.
    Complete,
}

impl SettlementStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Partial => "partial",
            Self::Complete => "complete",
        }
    }

    /// Returns true if the sale can be committed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, Self::Complete)
    }
}

impl std::fmt::Display for SettlementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Record handed to the collaborator that posts the sale to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementSummary {
    /// Total paid in the anchor currency.
    pub total_paid: Decimal,
    /// Change owed, in `change_currency`.
    pub change_amount: Decimal,
    /// Currency the change is handed back in.
    pub change_currency: CurrencyCode,
    /// Remaining balance in the anchor currency (never negative).
    pub remaining: Decimal,
}

/// Outstanding receivable. Owned by the sales API; only read and updated
/// in memory here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    /// Invoice ID.
    pub id: InvoiceId,
    /// Invoice total in the anchor currency.
    pub total_amount: Decimal,
    /// Unpaid part of the total in the anchor currency.
    pub balance_pending: Decimal,
    /// Whether the invoice is settled.
    pub paid: bool,
}

impl Invoice {
    /// Creates an unpaid invoice whose whole total is pending.
    #[must_use]
    pub fn new(total_amount: Decimal) -> Self {
        Self {
            id: InvoiceId::new(),
            total_amount,
            balance_pending: total_amount,
            paid: false,
        }
    }

    /// Creates an unpaid invoice with a partly paid total.
    #[must_use]
    pub fn with_balance(total_amount: Decimal, balance_pending: Decimal) -> Self {
        Self {
            balance_pending,
            ..Self::new(total_amount)
        }
    }
}
