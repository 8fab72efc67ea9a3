//! Business-level configuration owned by the core.
//!
//! Each piece has its own load/refresh lifecycle and is handed to the code
//! that needs it.
//!
//! - `profile` - Business identity and its anchor/local currencies
//! - `flags` - Optional module switches

pub mod flags;
pub mod profile;

pub use flags::{Feature, FeatureFlagSet};
pub use profile::{BusinessProfile, BusinessRecord};
