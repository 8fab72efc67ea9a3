//! Payment reconciliation.
//!
//! Normalizes mixed-currency tenders to the anchor and compares them with
//! what is owed.
//!
//! - `sale` - Point-of-sale settlement with change
//! - `receivable` - Bulk apportionment of a payment over invoices
//! - `types` - Tenders, invoices, tolerances

pub mod error;
pub mod receivable;
pub mod sale;
pub mod types;

#[cfg(test)]
mod props;

pub use error::SettlementError;
pub use receivable::{
    AppliedPayment, Apportionment, ReceivablePayment, apportion, settle_receivable_payment,
    validate_receivable_amount,
};
pub use sale::{SaleSettlement, SaleTenders, settle_sale_tender};
pub use types::{
    COMPLETENESS_EPSILON, CURRENCY_TOLERANCE, Invoice, SettlementStatus, SettlementSummary,
    Tender, checked_total, total_in_anchor,
};
