mod config;
mod error;
mod price_ledger;
mod settings_store;

pub use config::{StoreConfig, DEFAULT_LEDGER_PATH, DEFAULT_SETTINGS_PATH};
pub use error::StoreError;
pub use price_ledger::PriceLedger;
pub use settings_store::SettingsStore;
