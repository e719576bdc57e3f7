use crate::TickerConnector;
use async_trait::async_trait;
use chrono::Utc;
use common::{
    models::{fold_case, FetchResult},
    Error, Result,
};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashMap;
use tracing::{debug, error, warn};

pub const COINMARKETCAP_API_URL: &str = "https://api.coinmarketcap.com/v1/ticker";
const FALLBACK_CURRENCY: &str = "USD";
const USER_AGENT: &str = concat!("cryptoprice/", env!("CARGO_PKG_VERSION"));

pub struct CoinMarketCapConnector {
    client: reqwest::Client,
    base_url: String,
}

impl CoinMarketCapConnector {
    pub fn new() -> Self {
        Self::with_base_url(COINMARKETCAP_API_URL)
    }

    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn ticker_url(&self, coin: &str, currency: &str) -> String {
        format!("{}/{}/?convert={}", self.base_url, coin, currency)
    }
}

impl Default for CoinMarketCapConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TickerResponse {
    Entries(Vec<TickerEntry>),
    Error { error: String },
}

// Every value arrives as a string (or null); price fields are named
// `price_<currency>` so they are collected by name.
#[derive(Debug, Deserialize)]
struct TickerEntry {
    symbol: Option<String>,
    last_updated: Option<Value>,
    percent_change_24h: Option<Value>,
    #[serde(flatten)]
    fields: HashMap<String, Value>,
}

impl TickerEntry {
    fn price(&self, currency: &str) -> Option<f64> {
        self.fields
            .get(&format!("price_{}", fold_case(currency)))
            .and_then(number)
    }
}

fn number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

fn timestamp(value: &Value) -> Option<i64> {
    match value {
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Number(n) => n.as_i64(),
        _ => None,
    }
}

/// Extract the price of `coin` in `currency` from a ticker response body.
///
/// `now` stands in for the observation time when the API omits it.
pub fn parse_ticker(body: &str, coin: &str, currency: &str, now: i64) -> Result<FetchResult> {
    let response: TickerResponse = serde_json::from_str(body).map_err(|e| {
        Error::ApiError(format!("Failed to parse ticker response for '{}': {}", coin, e))
    })?;

    let entry = match response {
        TickerResponse::Entries(entries) => entries.into_iter().next().ok_or_else(|| {
            Error::ApiError(format!("Empty ticker response for '{}'", coin))
        })?,
        TickerResponse::Error { error } => {
            return Err(Error::ApiError(format!(
                "Either the resource is not available, or the coin '{}' is not listed ({})",
                coin, error
            )));
        }
    };

    let requested = currency.to_uppercase();
    let (price, currency, fell_back_to_usd) = match entry.price(&requested) {
        Some(price) => (price, requested, false),
        None => {
            let price = entry.price(FALLBACK_CURRENCY).ok_or_else(|| {
                Error::ApiError(format!(
                    "Either the resource is not available, or the coin '{}' is not listed",
                    coin
                ))
            })?;
            warn!(
                "Currency '{}' not supported. Defaulting to {}.",
                requested, FALLBACK_CURRENCY
            );
            (price, FALLBACK_CURRENCY.to_string(), true)
        }
    };

    let symbol = entry
        .symbol
        .clone()
        .filter(|symbol| !symbol.is_empty())
        .unwrap_or_else(|| coin.to_string());
    let observed_at = entry.last_updated.as_ref().and_then(timestamp).unwrap_or(now);
    let change_24h = entry.percent_change_24h.as_ref().and_then(number).unwrap_or(0.0);

    Ok(FetchResult {
        symbol,
        price,
        observed_at,
        change_24h,
        currency,
        fell_back_to_usd,
    })
}

#[async_trait]
impl TickerConnector for CoinMarketCapConnector {
    async fn fetch_ticker(&self, coin: &str, currency: &str) -> Result<FetchResult> {
        let url = self.ticker_url(coin, currency);

        debug!("Fetching ticker: {}", url);

        let response = self
            .client
            .get(&url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .send()
            .await
            .map_err(Error::HttpError)?;

        let status = response.status();
        let body = response.text().await.map_err(Error::HttpError)?;

        if !status.is_success() {
            // The ticker answers unknown coins with 404 and an error object.
            if let Ok(TickerResponse::Error { error }) = serde_json::from_str(&body) {
                return Err(Error::ApiError(format!(
                    "Either the resource is not available, or the coin '{}' is not listed ({})",
                    coin, error
                )));
            }
            error!("Ticker API error: {} - {}", status, body);
            return Err(Error::ApiError(format!(
                "Ticker API error: {} - {}",
                status, body
            )));
        }

        parse_ticker(&body, coin, currency, Utc::now().timestamp())
    }
}
