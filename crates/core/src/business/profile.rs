//! Business identity and currency pair.

use serde::{Deserialize, Serialize};

use bodega_shared::AppError;
use bodega_shared::config::CurrencyConfig;
use bodega_shared::types::CurrencyCode;

use crate::currency::RateRegistry;
use crate::locale::{SeparatorConvention, convention_for_symbol};

/// Business information printed on receipts, plus the anchor and local
/// currencies every amount is expressed in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessProfile {
    /// Trade name.
    pub name: String,
    /// Tax identification number.
    pub tax_id: String,
    /// Street address.
    pub address: String,
    /// Contact phone.
    pub phone: String,
    /// Anchor currency code.
    pub anchor_code: CurrencyCode,
    /// Anchor currency symbol.
    pub anchor_symbol: String,
    /// Local currency code.
    pub local_code: CurrencyCode,
    /// Local currency symbol.
    pub local_symbol: String,
}

/// Partial business record pushed by the configuration service.
///
/// Absent fields keep their current value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BusinessRecord {
    /// Trade name.
    pub name: Option<String>,
    /// Tax identification number.
    pub tax_id: Option<String>,
    /// Street address.
    pub address: Option<String>,
    /// Contact phone.
    pub phone: Option<String>,
    /// Anchor currency code.
    pub anchor_code: Option<CurrencyCode>,
    /// Anchor currency symbol.
    pub anchor_symbol: Option<String>,
    /// Local currency code.
    pub local_code: Option<CurrencyCode>,
    /// Local currency symbol.
    pub local_symbol: Option<String>,
}

impl BusinessProfile {
    /// Seeds a profile from the loaded configuration. Identity fields start
    /// empty until the configuration service sends them.
    pub fn from_config(config: &CurrencyConfig) -> Result<Self, AppError> {
        Ok(Self {
            name: String::new(),
            tax_id: String::new(),
            address: String::new(),
            phone: String::new(),
            anchor_code: CurrencyCode::new(&config.anchor_code)?,
            anchor_symbol: config.anchor_symbol.trim().to_string(),
            local_code: CurrencyCode::new(&config.local_code)?,
            local_symbol: config.local_symbol.trim().to_string(),
        })
    }

    /// Returns a new profile with the fields present in `record` applied.
    #[must_use]
    pub fn refresh(&self, record: BusinessRecord) -> Self {
        Self {
            name: record.name.unwrap_or_else(|| self.name.clone()),
            tax_id: record.tax_id.unwrap_or_else(|| self.tax_id.clone()),
            address: record.address.unwrap_or_else(|| self.address.clone()),
            phone: record.phone.unwrap_or_else(|| self.phone.clone()),
            anchor_code: record
                .anchor_code
                .unwrap_or_else(|| self.anchor_code.clone()),
            anchor_symbol: record
                .anchor_symbol
                .unwrap_or_else(|| self.anchor_symbol.clone()),
            local_code: record.local_code.unwrap_or_else(|| self.local_code.clone()),
            local_symbol: record
                .local_symbol
                .unwrap_or_else(|| self.local_symbol.clone()),
        }
    }

    /// Separator convention used for amounts in the local currency.
    #[must_use]
    pub fn local_convention(&self) -> SeparatorConvention {
        convention_for_symbol(&self.local_symbol, &self.local_symbol)
    }

    /// Separator convention for an amount typed in `currency_symbol`.
    #[must_use]
    pub fn convention_for(&self, currency_symbol: &str) -> SeparatorConvention {
        convention_for_symbol(currency_symbol, &self.local_symbol)
    }

    /// Registry holding only the anchor, used until the first rate snapshot
    /// arrives.
    #[must_use]
    pub fn seed_registry(&self) -> RateRegistry {
        RateRegistry::new(self.anchor_code.clone(), self.anchor_symbol.clone())
    }
}
