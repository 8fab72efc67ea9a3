//! Application configuration management.

use serde::Deserialize;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Currency configuration.
    #[serde(default)]
    pub currency: CurrencyConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Anchor and local currency settings.
///
/// These seed the rate registry and business profile until the external
/// configuration service pushes its own snapshot.
#[derive(Debug, Clone, Deserialize)]
pub struct CurrencyConfig {
    /// Anchor currency code; all internal totals are kept in it.
    #[serde(default = "default_anchor_code")]
    pub anchor_code: String,
    /// Display symbol of the anchor currency.
    #[serde(default = "default_anchor_symbol")]
    pub anchor_symbol: String,
    /// Local (floating) currency code.
    #[serde(default = "default_local_code")]
    pub local_code: String,
    /// Display symbol of the local currency. Amounts typed in this
    /// currency use comma-decimal separators.
    #[serde(default = "default_local_symbol")]
    pub local_symbol: String,
}

fn default_anchor_code() -> String {
    "USD".to_string()
}

fn default_anchor_symbol() -> String {
    "$".to_string()
}

fn default_local_code() -> String {
    "VES".to_string()
}

fn default_local_symbol() -> String {
    "Bs".to_string()
}

impl Default for CurrencyConfig {
    fn default() -> Self {
        Self {
            anchor_code: default_anchor_code(),
            anchor_symbol: default_anchor_symbol(),
            local_code: default_local_code(),
            local_symbol: default_local_symbol(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `EnvFilter` directive, overridden by `RUST_LOG`.
    #[serde(default = "default_filter")]
    pub filter: String,
    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

fn default_filter() -> String {
    "bodega=info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenvy::dotenv().ok();

        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("BODEGA").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.currency.anchor_code, "USD");
        assert_eq!(config.currency.anchor_symbol, "$");
        assert_eq!(config.currency.local_code, "VES");
        assert_eq!(config.currency.local_symbol, "Bs");
        assert_eq!(config.logging.filter, "bodega=info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_load_without_sources_uses_defaults() {
        temp_env::with_vars_unset(
            [
                "BODEGA__CURRENCY__ANCHOR_CODE",
                "BODEGA__CURRENCY__LOCAL_SYMBOL",
                "BODEGA__LOGGING__JSON",
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.currency.anchor_code, "USD");
                assert_eq!(config.currency.local_symbol, "Bs");
            },
        );
    }

    #[test]
    fn test_load_from_environment() {
        temp_env::with_vars(
            [
                ("BODEGA__CURRENCY__LOCAL_SYMBOL", Some("Bs.")),
                ("BODEGA__LOGGING__FILTER", Some("bodega=debug")),
            ],
            || {
                let config = AppConfig::load().unwrap();
                assert_eq!(config.currency.local_symbol, "Bs.");
                assert_eq!(config.logging.filter, "bodega=debug");
                assert_eq!(config.currency.anchor_code, "USD");
            },
        );
    }
}
