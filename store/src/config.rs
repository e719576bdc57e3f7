use std::path::PathBuf;

pub const DEFAULT_SETTINGS_PATH: &str = ".cryptoprice_settings";
pub const DEFAULT_LEDGER_PATH: &str = ".cryptoprice_prices";

/// Locations of the settings and price ledger files
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Settings file path
    pub settings_path: PathBuf,
    /// Price ledger file path
    pub ledger_path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            settings_path: PathBuf::from(DEFAULT_SETTINGS_PATH),
            ledger_path: PathBuf::from(DEFAULT_LEDGER_PATH),
        }
    }
}

impl StoreConfig {
    /// Create a store configuration from environment variables, falling back
    /// to dotfiles in the working directory
    pub fn from_env() -> Self {
        let settings_path = std::env::var("CRYPTOPRICE_SETTINGS")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_SETTINGS_PATH));
        let ledger_path = std::env::var("CRYPTOPRICE_LEDGER")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_LEDGER_PATH));

        Self {
            settings_path,
            ledger_path,
        }
    }
}
