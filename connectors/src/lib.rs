pub mod coinmarketcap;

use async_trait::async_trait;
use common::{models::FetchResult, Result};

/// Trait defining the interface for ticker API clients
#[async_trait]
pub trait TickerConnector: Send + Sync {
    /// Get the latest price of `coin` converted to `currency`.
    ///
    /// When the API has no price in `currency` the USD price is returned
    /// instead and flagged in the result.
    async fn fetch_ticker(&self, coin: &str, currency: &str) -> Result<FetchResult>;
}
