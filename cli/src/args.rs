use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser};
use std::ffi::OsString;

#[derive(Parser, Debug)]
#[command(author, version, about = "Gets the price for a number of cryptocurrencies.")]
pub struct Cli {
    /// Coins to price (defaults to the stored default coin)
    #[arg(value_name = "COIN")]
    pub coins: Vec<String>,

    /// Check the price of ethereum
    #[arg(short = 'e', long, help_heading = "Price options")]
    pub eth: bool,

    /// Check the price of bitcoin
    #[arg(short = 'b', long, help_heading = "Price options")]
    pub btc: bool,

    /// Check the price of litecoin
    #[arg(short = 'l', long, help_heading = "Price options")]
    pub ltc: bool,

    /// Check the price of iota
    #[arg(short = 'i', long, help_heading = "Price options")]
    pub iota: bool,

    /// Check the price of another coin
    #[arg(short = 'o', long = "coin", value_name = "COIN", help_heading = "Price options")]
    pub extra_coins: Vec<String>,

    /// Change the default currency
    #[arg(short = 'c', long, value_name = "CURRENCY", help_heading = "Other options")]
    pub currency: Option<String>,

    /// Check the current currency
    #[arg(long = "cc", help_heading = "Other options")]
    pub check_currency: bool,

    /// Change the writemode (humanreadable, simple, change, 24hchange)
    #[arg(short = 'w', long, value_name = "WRITEMODE", help_heading = "Other options")]
    pub writemode: Option<String>,

    /// Check the current writemode
    #[arg(long = "cwm", help_heading = "Other options")]
    pub check_writemode: bool,

    /// Change the default coin (displayed when no coins are given)
    #[arg(short = 'd', long = "defaultcoin", value_name = "COIN", help_heading = "Other options")]
    pub default_coin: Option<String>,

    /// Check the default coin
    #[arg(long = "cdc", help_heading = "Other options")]
    pub check_default_coin: bool,

    /// Delete all stored price history
    #[arg(long = "purgeprices", help_heading = "Other options")]
    pub purge_prices: bool,

    /// Do not ask for confirmation before purging
    #[arg(short = 'y', long, help_heading = "Other options")]
    pub yes: bool,

    /// Log debug output to stderr
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Every coin named on the command line, in the order given
    #[arg(skip)]
    requested: Vec<String>,
}

const SHORTCUTS: [(&str, &str); 4] = [
    ("eth", "ethereum"),
    ("btc", "bitcoin"),
    ("ltc", "litecoin"),
    ("iota", "iota"),
];

impl Cli {
    /// Parse the process arguments, exiting with usage on error.
    pub fn parse_args() -> Self {
        let matches = Self::command().get_matches();
        Self::from_matches(&matches).unwrap_or_else(|e| e.exit())
    }

    pub fn try_parse_args_from<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = Self::command().try_get_matches_from(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self, clap::Error> {
        let mut cli = Self::from_arg_matches(matches)?;
        cli.requested = coins_in_argument_order(&cli, matches);
        Ok(cli)
    }

    /// Coins named on the command line: positionals, shortcut flags and
    /// `--coin` values, in the order they appeared.
    pub fn requested_coins(&self) -> &[String] {
        &self.requested
    }
}

fn coins_in_argument_order(cli: &Cli, matches: &ArgMatches) -> Vec<String> {
    let mut indexed: Vec<(usize, String)> = Vec::new();

    for (id, values) in [("coins", &cli.coins), ("extra_coins", &cli.extra_coins)] {
        if let Some(indices) = matches.indices_of(id) {
            indexed.extend(indices.zip(values.iter().cloned()));
        }
    }

    let flags = [cli.eth, cli.btc, cli.ltc, cli.iota];
    for ((id, coin), set) in SHORTCUTS.into_iter().zip(flags) {
        if let (true, Some(index)) = (set, matches.index_of(id)) {
            indexed.push((index, coin.to_string()));
        }
    }

    indexed.sort_by_key(|(index, _)| *index);
    indexed.into_iter().map(|(_, coin)| coin).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_args_from(std::iter::once("cryptoprice").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn command_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn coins_keep_argument_order() {
        let cli = parse(&["dogecoin", "--btc", "-e", "ripple", "-o", "monero", "-l"]);
        assert_eq!(
            cli.requested_coins(),
            ["dogecoin", "bitcoin", "ethereum", "ripple", "monero", "litecoin"]
        );

        let cli = parse(&["-o", "monero", "--iota", "dogecoin"]);
        assert_eq!(cli.requested_coins(), ["monero", "iota", "dogecoin"]);
    }

    #[test]
    fn no_arguments_requests_no_coins() {
        assert!(parse(&[]).requested_coins().is_empty());
        assert!(parse(&["-c", "eur", "--cwm"]).requested_coins().is_empty());
    }

    #[test]
    fn settings_options() {
        let cli = parse(&["-c", "eur", "--cwm", "-w", "24hchange", "-d", "litecoin"]);
        assert_eq!(cli.currency.as_deref(), Some("eur"));
        assert_eq!(cli.writemode.as_deref(), Some("24hchange"));
        assert_eq!(cli.default_coin.as_deref(), Some("litecoin"));
        assert!(cli.check_writemode);

        let cli = parse(&["--purgeprices", "-y"]);
        assert!(cli.purge_prices && cli.yes);
    }
}
