use crate::models::fold_case;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CURRENCY: &str = "USD";
pub const DEFAULT_COIN: &str = "bitcoin";

/// How a fetched price is rendered
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    #[default]
    #[serde(rename = "humanreadable")]
    Human,
    #[serde(rename = "simple")]
    Simple,
    #[serde(rename = "change")]
    Change,
    #[serde(rename = "24hchange")]
    Change24h,
}

impl DisplayMode {
    pub const ALL: [DisplayMode; 4] = [
        DisplayMode::Human,
        DisplayMode::Simple,
        DisplayMode::Change,
        DisplayMode::Change24h,
    ];

    /// Stored index of this mode in the settings file.
    pub fn index(self) -> i64 {
        match self {
            DisplayMode::Human => 0,
            DisplayMode::Simple => 1,
            DisplayMode::Change => 2,
            DisplayMode::Change24h => 3,
        }
    }

    pub fn from_index(index: i64) -> Option<Self> {
        Self::ALL.into_iter().find(|mode| mode.index() == index)
    }

    pub fn name(self) -> &'static str {
        match self {
            DisplayMode::Human => "humanreadable",
            DisplayMode::Simple => "simple",
            DisplayMode::Change => "change",
            DisplayMode::Change24h => "24hchange",
        }
    }

    /// Comma separated list of every accepted mode name.
    pub fn valid_names() -> String {
        Self::ALL
            .iter()
            .map(|mode| mode.name())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for DisplayMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
#[error("\"{0}\" is not a valid writemode")]
pub struct ParseDisplayModeError(pub String);

impl FromStr for DisplayMode {
    type Err = ParseDisplayModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| ParseDisplayModeError(s.to_string()))
    }
}

/// User preferences persisted between runs.
///
/// The currency is kept alongside its lowercase form; both are only ever
/// changed together through [`Preferences::set_currency`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preferences {
    currency: String,
    currency_lower: String,
    pub display_mode: DisplayMode,
    pub default_coin: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            currency_lower: fold_case(DEFAULT_CURRENCY),
            display_mode: DisplayMode::default(),
            default_coin: DEFAULT_COIN.to_string(),
        }
    }
}

impl Preferences {
    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn currency_lower(&self) -> &str {
        &self.currency_lower
    }

    /// Set the currency exactly as given, e.g. when read back from storage.
    pub fn set_currency(&mut self, currency: impl Into<String>) {
        self.currency = currency.into();
        self.currency_lower = fold_case(&self.currency);
    }

    /// Set the currency from user input, normalized to uppercase.
    pub fn set_currency_code(&mut self, code: &str) {
        self.set_currency(code.to_uppercase());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let prefs = Preferences::default();
        assert_eq!(prefs.currency(), "USD");
        assert_eq!(prefs.currency_lower(), "usd");
        assert_eq!(prefs.display_mode, DisplayMode::Human);
        assert_eq!(prefs.default_coin, "bitcoin");
    }

    #[test]
    fn lowercase_mirror_follows_currency() {
        let mut prefs = Preferences::default();
        prefs.set_currency_code("eur");
        assert_eq!(prefs.currency(), "EUR");
        assert_eq!(prefs.currency_lower(), "eur");

        prefs.set_currency("Gbp");
        assert_eq!(prefs.currency(), "Gbp");
        assert_eq!(prefs.currency_lower(), "gbp");
    }

    #[test]
    fn display_mode_indices() {
        for mode in DisplayMode::ALL {
            assert_eq!(DisplayMode::from_index(mode.index()), Some(mode));
        }
        assert_eq!(DisplayMode::from_index(4), None);
        assert_eq!(DisplayMode::from_index(-1), None);
        assert_eq!(DisplayMode::from_index(99), None);
    }

    #[test]
    fn display_mode_names() {
        assert_eq!("humanreadable".parse(), Ok(DisplayMode::Human));
        assert_eq!("simple".parse(), Ok(DisplayMode::Simple));
        assert_eq!("change".parse(), Ok(DisplayMode::Change));
        assert_eq!("24hchange".parse(), Ok(DisplayMode::Change24h));
        assert_eq!(
            "fancy".parse::<DisplayMode>(),
            Err(ParseDisplayModeError("fancy".to_string()))
        );
        assert_eq!(
            DisplayMode::valid_names(),
            "humanreadable, simple, change, 24hchange"
        );
    }
}
