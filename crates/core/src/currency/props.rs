//! Property-based tests for currency operations.

use proptest::prelude::*;
use rust_decimal::Decimal;

use bodega_shared::types::CurrencyCode;

use super::conversion::{round_money, to_anchor, to_target};
use super::registry::{RateProfile, RateRegistry};
use super::style::format_currency;

/// Strategy to generate positive decimal amounts (0.01 to 1,000,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (0.0001 to 10000.0000).
fn positive_rate() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000i64).prop_map(|v| Decimal::new(v, 4))
}

fn registry_with_rate(rate: Decimal) -> RateRegistry {
    let usd = CurrencyCode::new("USD").unwrap();
    let ves = CurrencyCode::new("VES").unwrap();
    RateRegistry::new(usd, "$").upsert(RateProfile::new(ves, "Bs", "Official", rate))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Converting out of the anchor and back returns the amount.
    #[test]
    fn prop_target_anchor_round_trip(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let registry = registry_with_rate(rate);
        let local = to_target(amount, "Bs", &registry).unwrap();
        let back = to_anchor(local, "Bs", &registry).unwrap();
        prop_assert_eq!(round_money(back, 8), round_money(amount, 8));
    }

    /// Unknown currencies always convert 1:1.
    #[test]
    fn prop_unknown_currency_is_identity(
        amount in positive_amount(),
        rate in positive_rate(),
    ) {
        let registry = registry_with_rate(rate);
        prop_assert_eq!(to_anchor(amount, "ZZZ", &registry).unwrap(), amount);
        prop_assert_eq!(to_target(amount, "ZZZ", &registry).unwrap(), amount);
    }

    /// Sub-unit amounts get four fraction digits regardless of sign.
    #[test]
    fn prop_small_values_use_four_digits(
        ten_thousandths in 1i64..10_000i64,
        negative in any::<bool>(),
    ) {
        let magnitude = Decimal::new(ten_thousandths, 4);
        let amount = if negative { -magnitude } else { magnitude };
        let usd = CurrencyCode::new("USD").unwrap();
        let text = format_currency(amount, &usd);
        let frac = text.rsplit('.').next().unwrap_or_default();
        prop_assert_eq!(frac.len(), 4, "{}", text);
    }
}
