use connectors::coinmarketcap::COINMARKETCAP_API_URL;
use store::StoreConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub store: StoreConfig,
    pub api_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            api_url: COINMARKETCAP_API_URL.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let api_url = std::env::var("CRYPTOPRICE_API_URL")
            .unwrap_or_else(|_| COINMARKETCAP_API_URL.to_string());

        Self {
            store: StoreConfig::from_env(),
            api_url,
        }
    }
}
