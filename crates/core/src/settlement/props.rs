//! Property-based tests for settlement.

use proptest::prelude::*;
use rust_decimal::Decimal;

use bodega_shared::types::CurrencyCode;

use super::receivable::apportion;
use super::sale::settle_sale_tender;
use super::types::{COMPLETENESS_EPSILON, Invoice, SettlementStatus, Tender};
use crate::currency::{RateProfile, RateRegistry};

/// Strategy to generate non-negative amounts (0.00 to 10,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (0i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

fn balances() -> impl Strategy<Value = Vec<Decimal>> {
    prop::collection::vec(amount(), 0..8)
}

fn registry() -> RateRegistry {
    let usd = CurrencyCode::new("USD").unwrap();
    let ves = CurrencyCode::new("VES").unwrap();
    RateRegistry::new(usd, "$").upsert(RateProfile::new(ves, "Bs", "Official", Decimal::new(365, 1)))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Applied plus left over always equals the tendered amount.
    #[test]
    fn prop_apportion_conserves_payment(
        balances in balances(),
        tendered in amount(),
    ) {
        let invoices: Vec<Invoice> = balances.iter().map(|b| Invoice::new(*b)).collect();
        let result = apportion(&invoices, tendered);
        prop_assert_eq!(result.total_applied() + result.remaining_payment, tendered);
    }

    /// No balance goes negative and no invoice receives more than it owed.
    #[test]
    fn prop_apportion_never_overpays_an_invoice(
        balances in balances(),
        tendered in amount(),
    ) {
        let invoices: Vec<Invoice> = balances.iter().map(|b| Invoice::new(*b)).collect();
        let result = apportion(&invoices, tendered);

        prop_assert_eq!(result.invoices.len(), invoices.len());
        for (before, after) in invoices.iter().zip(&result.invoices) {
            prop_assert!(after.balance_pending >= Decimal::ZERO);
            prop_assert!(after.balance_pending <= before.balance_pending);
            prop_assert_eq!(after.id, before.id);
        }
    }

    /// Only a prefix of the invoices is touched.
    #[test]
    fn prop_apportion_touches_a_prefix(
        balances in balances(),
        tendered in amount(),
    ) {
        let invoices: Vec<Invoice> = balances.iter().map(|b| Invoice::new(*b)).collect();
        let result = apportion(&invoices, tendered);
        let touched = result.applications.len();
        prop_assert_eq!(&result.invoices[touched..], &invoices[touched..]);
    }

    /// Status agrees with the remaining balance, and change only appears
    /// when the sale is complete.
    #[test]
    fn prop_sale_status_is_consistent(
        total in amount(),
        usd in amount(),
        ves in amount(),
    ) {
        let tenders = vec![
            Tender::new(usd, "$", "cash"),
            Tender::new(ves, "Bs", "transfer"),
        ];
        let result = settle_sale_tender(total, &tenders, &registry()).unwrap();

        prop_assert_eq!(
            result.status == SettlementStatus::Complete,
            result.remaining <= COMPLETENESS_EPSILON
        );
        prop_assert!(result.change >= Decimal::ZERO);
        if result.change > Decimal::ZERO {
            prop_assert_eq!(result.status, SettlementStatus::Complete);
        }
    }
}
