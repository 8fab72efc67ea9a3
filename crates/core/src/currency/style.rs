//! Currency-styled display strings.
//!
//! Precision rule: amounts with `0 < |amount| < 1` are shown with four
//! fraction digits so sub-unit prices and rates never collapse to `0.00`;
//! everything else gets two. The sign does not change the rule.

use rust_decimal::Decimal;

use bodega_shared::types::CurrencyCode;

use super::conversion::{round_money, to_target};
use super::error::CurrencyError;
use super::registry::RateRegistry;
use crate::locale::SeparatorConvention;
use crate::locale::number::group_digits;

/// Display conventions of a currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CurrencyStyle {
    /// Prefix symbol.
    pub symbol: &'static str,
    /// Separator convention.
    pub convention: SeparatorConvention,
    /// Whether a space separates the symbol from the digits.
    pub spaced: bool,
}

const KNOWN_STYLES: &[(&str, CurrencyStyle)] = &[
    (
        "USD",
        CurrencyStyle {
            symbol: "$",
            convention: SeparatorConvention::DotDecimal,
            spaced: false,
        },
    ),
    (
        "VES",
        CurrencyStyle {
            symbol: "Bs.",
            convention: SeparatorConvention::CommaDecimal,
            spaced: true,
        },
    ),
    (
        "EUR",
        CurrencyStyle {
            symbol: "€",
            convention: SeparatorConvention::CommaDecimal,
            spaced: false,
        },
    ),
    (
        "COP",
        CurrencyStyle {
            symbol: "COL$",
            convention: SeparatorConvention::CommaDecimal,
            spaced: true,
        },
    ),
];

impl CurrencyStyle {
    /// Returns the style registered for `code`, if any.
    #[must_use]
    pub fn known(code: &CurrencyCode) -> Option<Self> {
        KNOWN_STYLES
            .iter()
            .find(|(known, _)| *known == code.as_str())
            .map(|(_, style)| *style)
    }
}

/// Number of fraction digits used to display `amount`.
#[must_use]
pub fn display_precision(amount: Decimal) -> u32 {
    let abs = amount.abs();
    if abs > Decimal::ZERO && abs < Decimal::ONE {
        4
    } else {
        2
    }
}

/// Formats an amount in the style of its currency.
///
/// Unknown codes are written as `CODE 1,234.56`.
#[must_use]
pub fn format_currency(amount: Decimal, code: &CurrencyCode) -> String {
    let (symbol, convention, spaced) = match CurrencyStyle::known(code) {
        Some(style) => (style.symbol, style.convention, style.spaced),
        None => (code.as_str(), SeparatorConvention::DotDecimal, true),
    };

    let precision = display_precision(amount);
    let mut rounded = round_money(amount, precision);
    rounded.rescale(precision);

    let unsigned = rounded.abs().to_string();
    let (int_part, frac_part) = unsigned.split_once('.').unwrap_or((unsigned.as_str(), ""));

    let mut out = String::with_capacity(unsigned.len() + symbol.len() + 6);
    if rounded.is_sign_negative() && !rounded.is_zero() {
        out.push('-');
    }
    out.push_str(symbol);
    if spaced {
        out.push(' ');
    }
    out.push_str(&group_digits(int_part, convention.thousands_separator()));
    if !frac_part.is_empty() {
        out.push(convention.decimal_separator());
        out.push_str(frac_part);
    }
    out
}

/// Formats an anchor amount next to its value in `local`, e.g.
/// `$10.00 / Bs. 500,00`.
pub fn format_dual(
    anchor_amount: Decimal,
    local: &CurrencyCode,
    registry: &RateRegistry,
) -> Result<String, CurrencyError> {
    let anchor = &registry.anchor().currency_code;
    let local_amount = to_target(anchor_amount, local.as_str(), registry)?;
    Ok(format!(
        "{} / {}",
        format_currency(anchor_amount, anchor),
        format_currency(local_amount, local)
    ))
}
