//! Currency conversion logic.
//!
//! CRITICAL: all internal totals are in the anchor currency. Conversions
//! happen only when an amount enters (a tendered amount) or leaves
//! (a displayed balance) the core.
//!
//! Conversions are exact; rounding is applied by the caller for display
//! with banker's rounding (round half to even).

use rust_decimal::Decimal;
use rust_decimal::RoundingStrategy;

use bodega_shared::types::{CurrencyCode, MonetaryAmount};

use super::error::CurrencyError;
use super::registry::RateRegistry;

/// Rounds a value using banker's rounding (round half to even).
#[must_use]
pub fn round_money(value: Decimal, decimal_places: u32) -> Decimal {
    value.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven)
}

/// Rejects zero and negative rates.
pub fn ensure_positive_rate(currency: &str, rate: Decimal) -> Result<Decimal, CurrencyError> {
    if rate <= Decimal::ZERO {
        return Err(CurrencyError::InvalidRate {
            currency: currency.to_string(),
            rate,
        });
    }
    Ok(rate)
}

/// Converts an anchor amount at an explicit rate.
pub fn to_target_at(
    anchor_amount: Decimal,
    currency: &str,
    rate: Decimal,
) -> Result<Decimal, CurrencyError> {
    let rate = ensure_positive_rate(currency, rate)?;
    anchor_amount
        .checked_mul(rate)
        .ok_or(CurrencyError::Overflow {
            amount: anchor_amount,
            rate,
        })
}

/// Converts an amount back to the anchor at an explicit rate.
pub fn to_anchor_at(
    target_amount: Decimal,
    currency: &str,
    rate: Decimal,
) -> Result<Decimal, CurrencyError> {
    let rate = ensure_positive_rate(currency, rate)?;
    target_amount
        .checked_div(rate)
        .ok_or(CurrencyError::Overflow {
            amount: target_amount,
            rate,
        })
}

/// Converts an anchor amount into the currency named by `target`.
///
/// Unknown currencies convert 1:1 (see `RateRegistry::lookup`); a stored
/// non-positive rate fails with `InvalidRate`.
pub fn to_target(
    anchor_amount: Decimal,
    target: &str,
    registry: &RateRegistry,
) -> Result<Decimal, CurrencyError> {
    to_target_at(anchor_amount, target, registry.get_rate(target))
}

/// Converts an amount in the currency named by `source` into the anchor.
pub fn to_anchor(
    target_amount: Decimal,
    source: &str,
    registry: &RateRegistry,
) -> Result<Decimal, CurrencyError> {
    to_anchor_at(target_amount, source, registry.get_rate(source))
}

/// Converts a tagged amount into another currency through the anchor.
pub fn convert(
    amount: &MonetaryAmount,
    to: &CurrencyCode,
    registry: &RateRegistry,
) -> Result<MonetaryAmount, CurrencyError> {
    if amount.currency == *to {
        return Ok(amount.clone());
    }

    let anchor = &registry.anchor().currency_code;
    let in_anchor = if amount.currency == *anchor {
        amount.amount
    } else {
        to_anchor(amount.amount, amount.currency.as_str(), registry)?
    };
    let converted = if to == anchor {
        in_anchor
    } else {
        to_target(in_anchor, to.as_str(), registry)?
    };

    Ok(MonetaryAmount::new(converted, to.clone()))
}
