//! Feature flags for optional modules.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Optional modules a business can switch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Laundry service orders.
    Laundry,
    /// Repair service orders.
    Repairs,
    /// Accounts receivable and credit sales.
    Receivables,
    /// Several rate profiles per currency.
    MultiRate,
}

impl Feature {
    /// Every known feature.
    pub const ALL: [Self; 4] = [Self::Laundry, Self::Repairs, Self::Receivables, Self::MultiRate];

    /// Returns the flag name used by the configuration service.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Laundry => "laundry",
            Self::Repairs => "repairs",
            Self::Receivables => "receivables",
            Self::MultiRate => "multi_rate",
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Feature {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == key)
            .ok_or_else(|| format!("Unknown feature: {s}"))
    }
}

/// Set of enabled features. Anything not in the set is disabled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlagSet {
    enabled: BTreeSet<Feature>,
}

impl FeatureFlagSet {
    /// Creates a set with nothing enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the set from `(name, enabled)` pairs as pushed by the
    /// configuration service. Unknown names are skipped.
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let mut enabled = BTreeSet::new();
        for (name, on) in pairs {
            match name.as_ref().parse::<Feature>() {
                Ok(feature) if on => {
                    enabled.insert(feature);
                }
                Ok(feature) => {
                    enabled.remove(&feature);
                }
                Err(_) => debug!(flag = name.as_ref(), "ignoring unknown feature flag"),
            }
        }
        Self { enabled }
    }

    /// Returns a set with `feature` switched on.
    #[must_use]
    pub fn with(mut self, feature: Feature) -> Self {
        self.enabled.insert(feature);
        self
    }

    /// Returns true if `feature` is on.
    #[must_use]
    pub fn is_enabled(&self, feature: Feature) -> bool {
        self.enabled.contains(&feature)
    }

    /// Looks a flag up by name; unknown names are off.
    #[must_use]
    pub fn is_enabled_named(&self, name: &str) -> bool {
        name.parse::<Feature>()
            .is_ok_and(|feature| self.is_enabled(feature))
    }

    /// Replaces the whole set with a fresh push. Flags missing from the
    /// push are turned off.
    #[must_use]
    pub fn refresh<I, S>(&self, pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, bool)>,
        S: AsRef<str>,
    {
        let next = Self::from_pairs(pairs);
        debug!(
            before = self.enabled.len(),
            after = next.enabled.len(),
            "feature flags refreshed"
        );
        next
    }

    /// Enabled features in a stable order.
    pub fn enabled(&self) -> impl Iterator<Item = Feature> + '_ {
        self.enabled.iter().copied()
    }
}
