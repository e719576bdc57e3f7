mod app;
mod args;
mod config;
mod formatter;
mod service;
#[cfg(test)]
mod test_logs;

use app::{save_settings, App};
use args::Cli;
use common::models::Preferences;
use config::AppConfig;
use connectors::coinmarketcap::CoinMarketCapConnector;
use service::PriceService;
use std::process::ExitCode;
use std::sync::Arc;
use store::{PriceLedger, SettingsStore};
use tracing::{debug, error, Level};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse_args();

    // Log to stderr so stdout only carries prices
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::INFO })
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();

    let config = AppConfig::from_env();
    debug!("Using configuration: {:?}", config);

    let settings = SettingsStore::new(&config.store.settings_path);
    let Some(mut prefs) = load_settings(&settings) else {
        return ExitCode::FAILURE;
    };

    let connector = Arc::new(CoinMarketCapConnector::with_base_url(config.api_url));
    let service = PriceService::new(connector, PriceLedger::new(&config.store.ledger_path));

    let mut stdout = std::io::stdout().lock();
    if let Err(e) = App::new(&settings, &service)
        .run(&cli, &mut prefs, &mut stdout)
        .await
    {
        error!("{}", e);
    }

    save_settings(&settings, &prefs);

    ExitCode::SUCCESS
}

/// Settings that cannot be read abort the whole run.
fn load_settings(settings: &SettingsStore) -> Option<Preferences> {
    match settings.load() {
        Ok(prefs) => Some(prefs),
        Err(e) => {
            error!("There was an error reading the settings file ({}). Aborting", e);
            None
        }
    }
}
