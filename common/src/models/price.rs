use crate::models::PairKey;
use serde::{Deserialize, Serialize};

/// Last observed price of one coin in one currency, as kept in the ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PriceRecord {
    /// Coin identifier as queried (e.g., "bitcoin")
    pub coin: String,
    /// Currency the price is expressed in (e.g., "USD")
    pub currency: String,
    /// Price of one unit of `coin`
    pub price: f64,
    /// Unix timestamp (seconds) the price was observed at
    pub observed_at: i64,
}

impl PriceRecord {
    pub fn key(&self) -> PairKey {
        PairKey::new(self.coin.clone(), self.currency.clone())
    }

    pub fn matches(&self, coin: &str, currency: &str) -> bool {
        self.coin == coin && self.currency == currency
    }
}

/// Scalar values extracted from one ticker response. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FetchResult {
    /// Ticker symbol (e.g., "BTC"), or the coin id when the API omits it
    pub symbol: String,
    /// Price of one unit in `currency`
    pub price: f64,
    /// Unix timestamp (seconds) of the API's last update
    pub observed_at: i64,
    /// 24h change in percent
    pub change_24h: f64,
    /// Currency the price is actually expressed in
    pub currency: String,
    /// True when the requested currency was not honored and USD was used instead
    pub fell_back_to_usd: bool,
}

impl FetchResult {
    /// Ledger record for this result, keyed by the coin as it was queried.
    pub fn to_record(&self, coin: &str) -> PriceRecord {
        PriceRecord {
            coin: coin.to_string(),
            currency: self.currency.clone(),
            price: self.price,
            observed_at: self.observed_at,
        }
    }
}
