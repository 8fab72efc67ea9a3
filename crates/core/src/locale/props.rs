//! Property-based tests for the numeric parser/formatter.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::live::edit;
use super::number::{SeparatorConvention, format, parse};

/// Strategy to generate non-zero decimals with 0 to 6 fractional digits.
fn non_zero_decimal() -> impl Strategy<Value = Decimal> {
    (
        prop_oneof![(-1_000_000_000_000i64..-1), (1i64..1_000_000_000_000i64)],
        0u32..=6,
    )
        .prop_map(|(mantissa, scale)| Decimal::new(mantissa, scale))
}

fn convention() -> impl Strategy<Value = SeparatorConvention> {
    prop_oneof![
        Just(SeparatorConvention::DotDecimal),
        Just(SeparatorConvention::CommaDecimal),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// parse(format(v)) == v for both conventions.
    #[test]
    fn prop_format_parse_round_trip(value in non_zero_decimal(), conv in convention()) {
        let text = format(Some(value), conv);
        let parsed = parse(&text, conv).unwrap();
        prop_assert_eq!(parsed, value, "round trip through '{}'", text);
    }

    /// Parsing an already canonical dot-decimal string is idempotent.
    #[test]
    fn prop_parse_idempotent_on_canonical(value in non_zero_decimal()) {
        let first = parse(&value.to_string(), SeparatorConvention::DotDecimal).unwrap();
        let second = parse(&first.to_string(), SeparatorConvention::DotDecimal).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Grouped integer parts never hold more than three digits per group.
    #[test]
    fn prop_groups_have_three_digits(value in non_zero_decimal(), conv in convention()) {
        let text = format(Some(value.abs()), conv);
        let int_part = text.split(conv.decimal_separator()).next().unwrap_or_default();
        let groups: Vec<&str> = int_part.split(conv.thousands_separator()).collect();
        prop_assert!(!groups[0].is_empty() && groups[0].len() <= 3);
        for group in &groups[1..] {
            prop_assert_eq!(group.len(), 3);
        }
    }

    /// Re-editing a live display string is stable.
    #[test]
    fn prop_live_edit_is_stable(raw in "[0-9.,]{0,16}", conv in convention()) {
        let once = edit(&raw, conv);
        let twice = edit(&once.display, conv);
        prop_assert_eq!(once, twice);
    }
}
