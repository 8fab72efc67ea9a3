//! Multi-currency handling and exchange rates.
//!
//! - `registry` - Rate profile snapshots and lookups
//! - `book` - Atomic snapshot replacement driven by push events
//! - `conversion` - Anchor <-> target conversions
//! - `style` - Currency-styled display strings

pub mod book;
pub mod conversion;
pub mod error;
pub mod registry;
pub mod style;

#[cfg(test)]
mod props;

pub use book::{RateBook, RateEvent};
pub use conversion::{convert, round_money, to_anchor, to_anchor_at, to_target, to_target_at};
pub use error::CurrencyError;
pub use registry::{RateLookup, RateLookupMethod, RateProfile, RateRegistry};
pub use style::{CurrencyStyle, display_precision, format_currency, format_dual};
