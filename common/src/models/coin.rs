use serde::{Deserialize, Serialize};

/// Key of one ledger entry: the coin as queried and the currency it was priced in.
///
/// Both parts are compared as exact, case-sensitive strings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PairKey {
    pub coin: String,     // Coin identifier (e.g., bitcoin)
    pub currency: String, // Currency code (e.g., USD)
}

impl PairKey {
    pub fn new(coin: impl Into<String>, currency: impl Into<String>) -> Self {
        Self {
            coin: coin.into(),
            currency: currency.into(),
        }
    }
}

impl std::fmt::Display for PairKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.coin, self.currency)
    }
}

/// Lowercase copy of a currency code, used for case-insensitive field lookups.
pub fn fold_case(code: &str) -> String {
    code.to_lowercase()
}
