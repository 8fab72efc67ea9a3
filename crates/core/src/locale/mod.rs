//! Locale-aware numeric parsing and formatting.
//!
//! Amounts are shown with either dot-decimal (`1,234.56`) or comma-decimal
//! (`1.234,56`) separators. The convention is always passed in by the
//! caller; nothing here guesses it.

pub mod live;
pub mod number;

#[cfg(test)]
mod props;

pub use live::{LiveInput, edit, insert};
pub use number::{ParseError, SeparatorConvention, convention_for_symbol, format, parse};
