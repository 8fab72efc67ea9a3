//! Exchange rate registry.
//!
//! A `RateRegistry` is an immutable snapshot of every known rate profile.
//! Mutating operations return a new snapshot; `RateBook` swaps snapshots
//! atomically so readers never see a half-applied update.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use bodega_shared::types::{CurrencyCode, RateProfileId};

use super::error::CurrencyError;

/// One named exchange rate for a currency.
///
/// `rate` is the number of target currency units per one anchor unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateProfile {
    /// Profile ID.
    pub id: RateProfileId,
    /// Currency this profile quotes.
    pub currency_code: CurrencyCode,
    /// Display symbol (e.g., "$", "Bs").
    pub currency_symbol: String,
    /// Label distinguishing profiles of the same currency (e.g., "Official").
    pub name: String,
    /// Target units per anchor unit.
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    /// Whether the profile is usable in conversions.
    pub is_active: bool,
    /// Implicit rate for the currency when none is chosen.
    pub is_default: bool,
    /// True only for the anchor currency.
    pub is_anchor: bool,
    /// When the configuration service last changed the profile.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl RateProfile {
    /// Creates an active, non-default profile.
    #[must_use]
    pub fn new(
        currency_code: CurrencyCode,
        currency_symbol: impl Into<String>,
        name: impl Into<String>,
        rate: Decimal,
    ) -> Self {
        Self {
            id: RateProfileId::new(),
            currency_code,
            currency_symbol: currency_symbol.into(),
            name: name.into(),
            rate,
            is_active: true,
            is_default: false,
            is_anchor: false,
            updated_at: None,
        }
    }

    /// Builds the anchor profile: rate 1, active, default.
    #[must_use]
    pub fn anchor(currency_code: CurrencyCode, currency_symbol: impl Into<String>) -> Self {
        Self {
            is_default: true,
            is_anchor: true,
            ..Self::new(currency_code, currency_symbol, "Anchor", Decimal::ONE)
        }
    }

    /// Marks the profile as the default for its currency.
    #[must_use]
    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Marks the profile as inactive.
    #[must_use]
    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    fn matches_symbol(&self, normalized: &str) -> bool {
        self.currency_symbol.trim().to_uppercase() == normalized
    }
}

/// How a rate lookup was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RateLookupMethod {
    /// Matched a profile's display symbol.
    Symbol,
    /// Matched a profile's currency code.
    Code,
    /// Nothing matched; identity rate used.
    Fallback,
}

/// Result of a rate lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLookup {
    /// The rate (1 on fallback).
    pub rate: Decimal,
    /// How the rate was obtained.
    pub method: RateLookupMethod,
    /// Profile that supplied the rate, if any.
    pub profile_id: Option<RateProfileId>,
}

/// Immutable snapshot of all rate profiles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateRegistry {
    anchor: RateProfile,
    profiles: Vec<RateProfile>,
}

impl RateRegistry {
    /// Creates a registry holding only the anchor currency.
    #[must_use]
    pub fn new(anchor_code: CurrencyCode, anchor_symbol: impl Into<String>) -> Self {
        Self {
            anchor: RateProfile::anchor(anchor_code, anchor_symbol),
            profiles: Vec::new(),
        }
    }

    /// Loads a full snapshot from the configuration service.
    ///
    /// Profiles are applied in order, so when a snapshot marks several
    /// profiles of one currency as default the last one wins. A profile
    /// flagged `is_anchor` replaces the anchor given here.
    pub fn from_profiles(
        anchor: RateProfile,
        profiles: impl IntoIterator<Item = RateProfile>,
    ) -> Result<Self, CurrencyError> {
        let mut registry = Self {
            anchor: normalize_anchor(anchor),
            profiles: Vec::new(),
        };
        let mut anchor_seen = false;
        for profile in profiles {
            if profile.is_anchor {
                if anchor_seen {
                    return Err(CurrencyError::MultipleAnchors {
                        first: registry.anchor.currency_code.to_string(),
                        second: profile.currency_code.to_string(),
                    });
                }
                anchor_seen = true;
            }
            registry.upsert_in_place(profile);
        }
        Ok(registry)
    }

    /// Returns a new snapshot with `profile` inserted or replaced by id.
    ///
    /// A default profile demotes every other profile of its currency.
    #[must_use]
    pub fn upsert(&self, profile: RateProfile) -> Self {
        let mut next = self.clone();
        next.upsert_in_place(profile);
        next
    }

    /// Returns a new snapshot without the profile with `id`.
    ///
    /// The anchor cannot be removed.
    #[must_use]
    pub fn remove(&self, id: RateProfileId) -> Self {
        let mut next = self.clone();
        next.profiles.retain(|p| p.id != id);
        next
    }

    fn upsert_in_place(&mut self, mut profile: RateProfile) {
        if profile.is_anchor {
            self.profiles.retain(|p| p.id != profile.id);
            self.anchor = normalize_anchor(profile);
            // The anchor is always the default of its own code.
            let anchor_code = &self.anchor.currency_code;
            for other in &mut self.profiles {
                if other.currency_code == *anchor_code {
                    other.is_default = false;
                }
            }
            return;
        }

        if profile.currency_code == self.anchor.currency_code {
            profile.is_default = false;
        }

        if profile.is_default {
            for other in &mut self.profiles {
                if other.id != profile.id && other.currency_code == profile.currency_code {
                    other.is_default = false;
                }
            }
        }

        match self.profiles.iter_mut().find(|p| p.id == profile.id) {
            Some(existing) => *existing = profile,
            None => self.profiles.push(profile),
        }
    }

    /// Looks up the rate for a currency symbol or code.
    ///
    /// Symbols are compared first across all profiles, then codes. A miss
    /// resolves to rate 1 and logs a warning.
    #[must_use]
    pub fn lookup(&self, symbol_or_code: &str) -> RateLookup {
        let query = symbol_or_code.trim().to_uppercase();

        if let Some(profile) = self.iter().find(|p| p.matches_symbol(&query)) {
            return RateLookup {
                rate: profile.rate,
                method: RateLookupMethod::Symbol,
                profile_id: Some(profile.id),
            };
        }

        if let Some(profile) = self.iter().find(|p| p.currency_code.as_str() == query) {
            return RateLookup {
                rate: profile.rate,
                method: RateLookupMethod::Code,
                profile_id: Some(profile.id),
            };
        }

        warn!(
            currency = %symbol_or_code,
            "no rate profile matches currency, falling back to rate 1"
        );
        RateLookup {
            rate: Decimal::ONE,
            method: RateLookupMethod::Fallback,
            profile_id: None,
        }
    }

    /// Returns the rate for a currency symbol or code, or 1 when unknown.
    #[must_use]
    pub fn get_rate(&self, symbol_or_code: &str) -> Decimal {
        self.lookup(symbol_or_code).rate
    }

    /// Returns the default profile for a currency, else its first active one.
    #[must_use]
    pub fn get_default_profile(&self, currency_code: &CurrencyCode) -> Option<&RateProfile> {
        if self.anchor.currency_code == *currency_code {
            return Some(&self.anchor);
        }
        let mut same_code = self
            .profiles
            .iter()
            .filter(|p| p.currency_code == *currency_code);
        same_code
            .clone()
            .find(|p| p.is_default)
            .or_else(|| same_code.find(|p| p.is_active))
    }

    /// Returns every active profile, anchor first.
    #[must_use]
    pub fn active_profiles(&self) -> Vec<RateProfile> {
        self.iter().filter(|p| p.is_active).cloned().collect()
    }

    /// Returns a profile by id.
    #[must_use]
    pub fn get(&self, id: RateProfileId) -> Option<&RateProfile> {
        self.iter().find(|p| p.id == id)
    }

    /// The anchor currency profile.
    #[must_use]
    pub fn anchor(&self) -> &RateProfile {
        &self.anchor
    }

    /// Non-anchor profiles in insertion order.
    #[must_use]
    pub fn profiles(&self) -> &[RateProfile] {
        &self.profiles
    }

    /// Number of profiles, anchor included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.profiles.len() + 1
    }

    /// Always false: the anchor is always present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    fn iter(&self) -> impl Iterator<Item = &RateProfile> + Clone {
        std::iter::once(&self.anchor).chain(self.profiles.iter())
    }
}

fn normalize_anchor(mut anchor: RateProfile) -> RateProfile {
    anchor.rate = Decimal::ONE;
    anchor.is_active = true;
    anchor.is_default = true;
    anchor.is_anchor = true;
    anchor
}
