//! Separator conventions and the decimal <-> display string mapping.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Thousands/decimal separator convention of a display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SeparatorConvention {
    /// `1,234.56`
    DotDecimal,
    /// `1.234,56`
    CommaDecimal,
}

impl SeparatorConvention {
    /// Character between the integer and fractional parts.
    #[must_use]
    pub const fn decimal_separator(self) -> char {
        match self {
            Self::DotDecimal => '.',
            Self::CommaDecimal => ',',
        }
    }

    /// Character between groups of three integer digits.
    #[must_use]
    pub const fn thousands_separator(self) -> char {
        match self {
            Self::DotDecimal => ',',
            Self::CommaDecimal => '.',
        }
    }
}

/// Picks the convention for amounts typed in the currency with `currency_symbol`.
///
/// The local currency is edited comma-decimal; every other currency
/// (the anchor included) is edited dot-decimal.
#[must_use]
pub fn convention_for_symbol(currency_symbol: &str, local_symbol: &str) -> SeparatorConvention {
    if currency_symbol.trim().eq_ignore_ascii_case(local_symbol.trim()) {
        SeparatorConvention::CommaDecimal
    } else {
        SeparatorConvention::DotDecimal
    }
}

/// Errors raised while reading a display string back into a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The text left after removing separators is not a number.
    #[error("Not a number: '{0}'")]
    NotANumber(String),
}

impl ParseError {
    /// Returns the error code for API responses.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotANumber(_) => "NOT_A_NUMBER",
        }
    }
}

/// Formats a value with the convention's separators.
///
/// `None` and zero format to the empty string. The fractional digits are
/// kept exactly as the decimal's scale has them.
#[must_use]
pub fn format(value: Option<Decimal>, convention: SeparatorConvention) -> String {
    let Some(value) = value.filter(|v| !v.is_zero()) else {
        return String::new();
    };

    let canonical = value.to_string();
    let (negative, unsigned) = match canonical.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, canonical.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (unsigned, None),
    };

    let mut out = String::with_capacity(canonical.len() + canonical.len() / 3 + 1);
    if negative {
        out.push('-');
    }
    out.push_str(&group_digits(int_part, convention.thousands_separator()));
    if let Some(frac) = frac_part.filter(|f| !f.is_empty()) {
        out.push(convention.decimal_separator());
        out.push_str(frac);
    }
    out
}

/// Parses a display string written with the convention's separators.
///
/// A trailing decimal separator (`"12."` while typing) is accepted and
/// contributes no fractional digits.
pub fn parse(text: &str, convention: SeparatorConvention) -> Result<Decimal, ParseError> {
    let thousands = convention.thousands_separator();
    let decimal = convention.decimal_separator();

    let mut canonical: String = text
        .trim()
        .chars()
        .filter(|c| *c != thousands)
        .map(|c| if c == decimal { '.' } else { c })
        .collect();

    if canonical.ends_with('.') {
        canonical.pop();
    }
    let numeric = canonical
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-'));
    if canonical.is_empty() || !numeric {
        return Err(ParseError::NotANumber(text.to_string()));
    }

    Decimal::from_str(&canonical).map_err(|_| ParseError::NotANumber(text.to_string()))
}

/// Inserts `separator` before every complete group of three digits,
/// counting from the right, never at the start.
pub(crate) fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        out.push(ch);
        let remaining = len - i - 1;
        if remaining > 0 && remaining % 3 == 0 {
            out.push(separator);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use rust_decimal_macros::dec;

    use SeparatorConvention::{CommaDecimal, DotDecimal};

    #[test]
    fn test_thousands_grouping() {
        assert_eq!(format(Some(dec!(1234567.89)), DotDecimal), "1,234,567.89");
        assert_eq!(format(Some(dec!(1234567.89)), CommaDecimal), "1.234.567,89");
    }

    #[rstest]
    #[case(dec!(1), "1")]
    #[case(dec!(12), "12")]
    #[case(dec!(123), "123")]
    #[case(dec!(1234), "1,234")]
    #[case(dec!(123456), "123,456")]
    #[case(dec!(1000000), "1,000,000")]
    #[case(dec!(0.5), "0.5")]
    #[case(dec!(-1234.5), "-1,234.5")]
    #[case(dec!(1.50), "1.50")]
    fn test_format_dot_decimal(#[case] value: Decimal, #[case] expected: &str) {
        assert_eq!(format(Some(value), DotDecimal), expected);
    }

    #[test]
    fn test_format_zero_and_none_are_empty() {
        assert_eq!(format(None, DotDecimal), "");
        assert_eq!(format(Some(Decimal::ZERO), CommaDecimal), "");
        assert_eq!(format(Some(dec!(0.00)), DotDecimal), "");
    }

    #[rstest]
    #[case("1,234,567.89", DotDecimal, dec!(1234567.89))]
    #[case("1.234.567,89", CommaDecimal, dec!(1234567.89))]
    #[case("12.", DotDecimal, dec!(12))]
    #[case("12,", CommaDecimal, dec!(12))]
    #[case(" 45 ", DotDecimal, dec!(45))]
    #[case("-1.000,5", CommaDecimal, dec!(-1000.5))]
    #[case("0,0001", CommaDecimal, dec!(0.0001))]
    fn test_parse(
        #[case] text: &str,
        #[case] convention: SeparatorConvention,
        #[case] expected: Decimal,
    ) {
        assert_eq!(parse(text, convention).unwrap(), expected);
    }

    #[rstest]
    #[case("")]
    #[case(".")]
    #[case("abc")]
    #[case("12a")]
    #[case("1.2.3")]
    #[case("-")]
    #[case("1_000")]
    #[case("1e5")]
    #[case("$12")]
    fn test_parse_not_a_number(#[case] text: &str) {
        assert_eq!(
            parse(text, DotDecimal),
            Err(ParseError::NotANumber(text.to_string()))
        );
    }

    #[test]
    fn test_parse_error_code() {
        let err = parse("x", DotDecimal).unwrap_err();
        assert_eq!(err.error_code(), "NOT_A_NUMBER");
        assert_eq!(err.to_string(), "Not a number: 'x'");
    }

    #[test]
    fn test_convention_for_symbol() {
        assert_eq!(convention_for_symbol("Bs", "Bs"), CommaDecimal);
        assert_eq!(convention_for_symbol(" bs ", "Bs"), CommaDecimal);
        assert_eq!(convention_for_symbol("$", "Bs"), DotDecimal);
    }

    #[test]
    fn test_group_digits() {
        assert_eq!(group_digits("", ','), "");
        assert_eq!(group_digits("100", ','), "100");
        assert_eq!(group_digits("1000", '.'), "1.000");
        assert_eq!(group_digits("12345678", ','), "12,345,678");
    }
}
