//! Accounts-receivable payments and bulk apportionment.
//!
//! A lump payment is spread greedily over outstanding invoices in the order
//! the caller gives them (usually oldest due first). Overpayment beyond
//! `CURRENCY_TOLERANCE` is rejected here, unlike at the till.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use bodega_shared::types::InvoiceId;

use super::error::SettlementError;
use super::types::{
    COMPLETENESS_EPSILON, CURRENCY_TOLERANCE, Invoice, Tender, checked_total, total_in_anchor,
};
use crate::currency::RateRegistry;

/// Amount applied to one invoice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedPayment {
    /// Invoice the payment went to.
    pub invoice_id: InvoiceId,
    /// Amount applied in the anchor currency.
    pub applied: Decimal,
    /// Balance left after the payment.
    pub new_balance: Decimal,
    /// Whether the invoice is now settled.
    pub paid: bool,
}

/// Result of spreading a payment over invoices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apportionment {
    /// Every input invoice in input order, updated where paid.
    pub invoices: Vec<Invoice>,
    /// One entry per invoice that received money.
    pub applications: Vec<AppliedPayment>,
    /// Part of the payment left over after the loop stopped.
    pub remaining_payment: Decimal,
}

impl Apportionment {
    /// Total applied across all invoices.
    #[must_use]
    pub fn total_applied(&self) -> Decimal {
        self.applications.iter().map(|a| a.applied).sum()
    }
}

/// Validated receivable payment ready to post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReceivablePayment {
    /// Tendered total in the anchor currency.
    pub tendered: Decimal,
    /// Sum of the targeted balances before payment.
    pub outstanding: Decimal,
    /// How the payment was spread.
    pub apportionment: Apportionment,
}

/// Spreads `tendered` over `invoices` in order.
///
/// Each invoice receives `min(balance, remaining)`; it is marked paid when
/// its new balance is within `CURRENCY_TOLERANCE`. The loop stops as soon as
/// the remaining payment drops to `COMPLETENESS_EPSILON`, leaving later
/// invoices untouched.
#[must_use]
pub fn apportion(invoices: &[Invoice], tendered: Decimal) -> Apportionment {
    let mut updated = invoices.to_vec();
    let mut applications = Vec::new();
    let mut remaining = tendered;

    for invoice in &mut updated {
        if remaining <= COMPLETENESS_EPSILON {
            break;
        }

        let pay = invoice.balance_pending.min(remaining).max(Decimal::ZERO);
        invoice.balance_pending -= pay;
        remaining -= pay;
        if invoice.balance_pending <= CURRENCY_TOLERANCE {
            invoice.paid = true;
        }

        applications.push(AppliedPayment {
            invoice_id: invoice.id,
            applied: pay,
            new_balance: invoice.balance_pending,
            paid: invoice.paid,
        });
    }

    debug!(
        invoices = invoices.len(),
        touched = applications.len(),
        remaining = %remaining,
        "payment apportioned"
    );

    Apportionment {
        invoices: updated,
        applications,
        remaining_payment: remaining,
    }
}

/// Rejects a receivable payment that exceeds the targeted balances by more
/// than `CURRENCY_TOLERANCE`.
pub fn validate_receivable_amount(
    tendered: Decimal,
    outstanding: Decimal,
) -> Result<(), SettlementError> {
    if tendered <= Decimal::ZERO {
        return Err(SettlementError::NothingTendered);
    }
    // A limit past Decimal::MAX cannot be exceeded.
    let over_limit = outstanding
        .checked_add(CURRENCY_TOLERANCE)
        .is_some_and(|limit| tendered > limit);
    if over_limit {
        info!(%tendered, %outstanding, "receivable overpayment rejected");
        return Err(SettlementError::OverpaymentRejected {
            tendered,
            outstanding,
        });
    }
    Ok(())
}

/// Settles a receivable payment made of one or more tenders across
/// `invoices`.
pub fn settle_receivable_payment(
    invoices: &[Invoice],
    tenders: &[Tender],
    registry: &RateRegistry,
) -> Result<ReceivablePayment, SettlementError> {
    let tendered = total_in_anchor(tenders, registry)?;
    let outstanding = invoices
        .iter()
        .try_fold(Decimal::ZERO, |acc, i| checked_total(acc, i.balance_pending))?;

    validate_receivable_amount(tendered, outstanding)?;

    Ok(ReceivablePayment {
        tendered,
        outstanding,
        apportionment: apportion(invoices, tendered),
    })
}
