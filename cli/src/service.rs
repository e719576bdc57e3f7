use common::{
    models::{DisplayMode, Preferences},
    Result,
};
use connectors::TickerConnector;
use std::sync::Arc;
use store::PriceLedger;
use tracing::{debug, warn};

use crate::formatter;

/// Fetches prices, renders them and keeps the price ledger current
pub struct PriceService {
    /// Ticker API connector
    connector: Arc<dyn TickerConnector>,
    /// Last observed price per coin and currency
    ledger: PriceLedger,
}

impl PriceService {
    pub fn new(connector: Arc<dyn TickerConnector>, ledger: PriceLedger) -> Self {
        Self { connector, ledger }
    }

    /// Fetch `coin` in the preferred currency and render it in the preferred mode.
    ///
    /// Every successful fetch replaces the ledger entry for the coin and the
    /// currency the price is actually expressed in.
    pub async fn show_price(&self, coin: &str, prefs: &Preferences) -> Result<String> {
        debug!("Getting price for {} in {}", coin, prefs.currency());

        let fetched = self.connector.fetch_ticker(coin, prefs.currency()).await?;

        let previous = if prefs.display_mode == DisplayMode::Change {
            match self.ledger.lookup(coin, &fetched.currency) {
                Ok(previous) => previous,
                Err(e) => {
                    warn!("Could not read price history for {}: {}", coin, e);
                    None
                }
            }
        } else {
            None
        };

        let text = formatter::render(&fetched, prefs.display_mode, previous.as_ref());

        if let Err(e) = self.ledger.upsert(&fetched.to_record(coin)) {
            warn!("Could not update price history for {}: {}", coin, e);
        }

        Ok(text)
    }

    /// Delete all stored price history
    pub fn purge_history(&self) -> Result<()> {
        self.ledger.purge()?;
        Ok(())
    }
}
