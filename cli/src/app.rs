use common::{
    models::{DisplayMode, Preferences},
    Error, Result,
};
use dialoguer::Confirm;
use std::io::Write;
use store::SettingsStore;
use tracing::{error, info, warn};

use crate::args::Cli;
use crate::service::PriceService;

/// One invocation: settings options first, then queries, purge and prices.
pub struct App<'a> {
    settings: &'a SettingsStore,
    service: &'a PriceService,
}

impl<'a> App<'a> {
    pub fn new(settings: &'a SettingsStore, service: &'a PriceService) -> Self {
        Self { settings, service }
    }

    pub async fn run(&self, cli: &Cli, prefs: &mut Preferences, out: &mut impl Write) -> Result<()> {
        if let Some(currency) = &cli.currency {
            prefs.set_currency_code(currency);
            self.persist(prefs);
        }
        if let Some(writemode) = &cli.writemode {
            self.set_writemode(prefs, writemode, out)?;
        }
        if let Some(coin) = &cli.default_coin {
            prefs.default_coin = coin.clone();
            self.persist(prefs);
        }

        if cli.check_currency {
            writeln!(out, "{}", prefs.currency()).map_err(output_error)?;
        }
        if cli.check_writemode {
            writeln!(out, "Writing in {} mode", prefs.display_mode).map_err(output_error)?;
        }
        if cli.check_default_coin {
            writeln!(out, "{}", prefs.default_coin).map_err(output_error)?;
        }

        if cli.purge_prices {
            match confirm_purge(cli.yes).and_then(|()| self.service.purge_history()) {
                Ok(()) => info!("Price history deleted"),
                Err(Error::UserAbort(msg)) => warn!("{}", msg),
                Err(e) => error!("Could not delete price history: {}", e),
            }
        }

        let mut coins = cli.requested_coins().to_vec();
        if coins.is_empty() {
            coins.push(prefs.default_coin.clone());
        }

        for coin in &coins {
            match self.service.show_price(coin, prefs).await {
                Ok(text) => writeln!(out, "{}", text).map_err(output_error)?,
                Err(e) => error!("{}: {}", coin, e),
            }
        }

        Ok(())
    }

    fn set_writemode(&self, prefs: &mut Preferences, name: &str, out: &mut impl Write) -> Result<()> {
        match name.parse::<DisplayMode>() {
            Ok(mode) => {
                prefs.display_mode = mode;
                self.persist(prefs);
            }
            Err(e) => {
                error!("{}", e);
                writeln!(out, "The valid writemodes are: {}", DisplayMode::valid_names())
                    .map_err(output_error)?;
            }
        }
        Ok(())
    }

    fn persist(&self, prefs: &Preferences) {
        save_settings(self.settings, prefs);
    }
}

/// Write preferences back; failing to do so is never fatal.
pub fn save_settings(settings: &SettingsStore, prefs: &Preferences) {
    if let Err(e) = settings.save(prefs) {
        warn!("There was an error writing the settings: {}", e);
    }
}

fn confirm_purge(assume_yes: bool) -> Result<()> {
    if assume_yes {
        return Ok(());
    }

    let confirmed = Confirm::new()
        .with_prompt("Delete all stored price history?")
        .default(false)
        .interact()
        .map_err(|e| Error::IoError(format!("Could not read confirmation: {}", e)))?;

    if confirmed {
        Ok(())
    } else {
        Err(Error::UserAbort("Price history not deleted".to_string()))
    }
}

fn output_error(e: std::io::Error) -> Error {
    Error::IoError(format!("Could not write output: {}", e))
}
