//! Live-typing support for amount fields.
//!
//! While a cashier types, the field shows a regrouped display string and the
//! numeric value lags behind it: `"12."` is displayed as typed but reads as
//! `12` until a fractional digit arrives.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::number::{SeparatorConvention, group_digits, parse};

/// State of an amount field after an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveInput {
    /// Text to show in the field.
    pub display: String,
    /// Numeric value of the field, `None` when the field is empty.
    pub value: Option<Decimal>,
}

impl LiveInput {
    /// An empty field.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            display: String::new(),
            value: None,
        }
    }
}

/// Rebuilds the field state from raw typed text.
///
/// Everything that is not a digit or one of the convention's separators is
/// stripped. Thousands separators are regenerated, so typed ones are
/// ignored. Only the first decimal separator is kept.
#[must_use]
pub fn edit(raw: &str, convention: SeparatorConvention) -> LiveInput {
    let decimal = convention.decimal_separator();

    let mut int_digits = String::new();
    let mut frac_digits = String::new();
    let mut seen_decimal = false;

    for ch in raw.chars() {
        if ch.is_ascii_digit() {
            if seen_decimal {
                frac_digits.push(ch);
            } else {
                int_digits.push(ch);
            }
        } else if ch == decimal {
            seen_decimal = true;
        }
    }

    if int_digits.is_empty() && !seen_decimal {
        return LiveInput::empty();
    }

    let trimmed = int_digits.trim_start_matches('0');
    let int_part = if trimmed.is_empty() { "0" } else { trimmed };

    let mut display = group_digits(int_part, convention.thousands_separator());
    if seen_decimal {
        display.push(decimal);
        display.push_str(&frac_digits);
    }

    let value = parse(&display, convention).ok();
    LiveInput { display, value }
}

/// Applies one typed character to the current display string.
///
/// Typing a second decimal separator leaves the field unchanged.
#[must_use]
pub fn insert(current: &str, ch: char, convention: SeparatorConvention) -> LiveInput {
    if ch == convention.decimal_separator() && current.contains(ch) {
        return edit(current, convention);
    }
    let mut raw = String::with_capacity(current.len() + 1);
    raw.push_str(current);
    raw.push(ch);
    edit(&raw, convention)
}
