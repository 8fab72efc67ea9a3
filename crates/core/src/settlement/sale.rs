//! Point-of-sale settlement.
//!
//! Overpayment is expected at the till and is returned as change. Contrast
//! with `receivable`, where it is rejected.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use bodega_shared::types::{CurrencyCode, TenderId};

use super::error::SettlementError;
use super::types::{
    COMPLETENESS_EPSILON, REMAINING_DECIMAL_PLACES, SettlementStatus, SettlementSummary, Tender,
    total_in_anchor,
};
use crate::currency::{RateRegistry, round_money, to_target_at};

/// Outcome of settling a sale against its tenders. All amounts are in the
/// anchor currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleSettlement {
    /// Total due.
    pub total_due: Decimal,
    /// Sum of tenders.
    pub total_paid: Decimal,
    /// `total_due - total_paid` rounded to four places; negative when
    /// overpaid.
    pub remaining: Decimal,
    /// Overpayment to hand back, zero when not overpaid.
    pub change: Decimal,
    /// Settlement progress.
    pub status: SettlementStatus,
    /// Anchor currency of every amount above.
    pub anchor: CurrencyCode,
}

impl SaleSettlement {
    /// Remaining balance clamped at zero, for display.
    #[must_use]
    pub fn outstanding(&self) -> Decimal {
        self.remaining.max(Decimal::ZERO)
    }

    /// Change converted to a secondary display currency at `rate`.
    ///
    /// Presentation only; the settlement itself stays in the anchor.
    pub fn change_in(&self, currency: &str, rate: Decimal) -> Result<Decimal, SettlementError> {
        Ok(to_target_at(self.change, currency, rate)?)
    }

    /// Builds the record posted to the ledger collaborator.
    ///
    /// `change_rate` is ignored when the change is handed back in the anchor.
    pub fn summary(
        &self,
        change_currency: CurrencyCode,
        change_rate: Decimal,
    ) -> Result<SettlementSummary, SettlementError> {
        let change_amount = if change_currency == self.anchor {
            self.change
        } else {
            self.change_in(change_currency.as_str(), change_rate)?
        };
        Ok(SettlementSummary {
            total_paid: self.total_paid,
            change_amount,
            change_currency,
            remaining: self.outstanding(),
        })
    }
}

/// Settles a sale: normalizes every tender to the anchor and compares the
/// sum with `total_due`.
pub fn settle_sale_tender(
    total_due: Decimal,
    tenders: &[Tender],
    registry: &RateRegistry,
) -> Result<SaleSettlement, SettlementError> {
    let total_paid = total_in_anchor(tenders, registry)?;
    let difference = total_due
        .checked_sub(total_paid)
        .ok_or(SettlementError::Overflow {
            left: total_due,
            right: -total_paid,
        })?;
    let remaining = round_money(difference, REMAINING_DECIMAL_PLACES);

    let status = if tenders.is_empty() {
        SettlementStatus::Empty
    } else if remaining <= COMPLETENESS_EPSILON {
        SettlementStatus::Complete
    } else {
        SettlementStatus::Partial
    };

    let change = (-difference).max(Decimal::ZERO);

    Ok(SaleSettlement {
        total_due,
        total_paid,
        remaining,
        change,
        status,
        anchor: registry.anchor().currency_code.clone(),
    })
}

/// Editable tender list for one sale. Every edit recomputes the settlement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleTenders {
    total_due: Decimal,
    tenders: Vec<Tender>,
}

impl SaleTenders {
    /// Starts an empty tender list for a sale.
    #[must_use]
    pub fn new(total_due: Decimal) -> Self {
        Self {
            total_due,
            tenders: Vec::new(),
        }
    }

    /// Total due in the anchor currency.
    #[must_use]
    pub fn total_due(&self) -> Decimal {
        self.total_due
    }

    /// Current tender rows.
    #[must_use]
    pub fn tenders(&self) -> &[Tender] {
        &self.tenders
    }

    /// Adds a tender row.
    pub fn add(
        &mut self,
        tender: Tender,
        registry: &RateRegistry,
    ) -> Result<SaleSettlement, SettlementError> {
        // Validate before the row becomes part of the sale.
        tender.anchor_amount(registry)?;
        self.tenders.push(tender);
        self.settle(registry)
    }

    /// Replaces the tender row with the same id.
    pub fn update(
        &mut self,
        tender: Tender,
        registry: &RateRegistry,
    ) -> Result<SaleSettlement, SettlementError> {
        tender.anchor_amount(registry)?;
        let slot = self
            .tenders
            .iter_mut()
            .find(|t| t.id == tender.id)
            .ok_or(SettlementError::TenderNotFound(tender.id))?;
        *slot = tender;
        self.settle(registry)
    }

    /// Removes a tender row.
    pub fn remove(
        &mut self,
        id: TenderId,
        registry: &RateRegistry,
    ) -> Result<SaleSettlement, SettlementError> {
        let before = self.tenders.len();
        self.tenders.retain(|t| t.id != id);
        if self.tenders.len() == before {
            return Err(SettlementError::TenderNotFound(id));
        }
        self.settle(registry)
    }

    /// Settles the sale against the current rows.
    pub fn settle(&self, registry: &RateRegistry) -> Result<SaleSettlement, SettlementError> {
        settle_sale_tender(self.total_due, &self.tenders, registry)
    }
}
