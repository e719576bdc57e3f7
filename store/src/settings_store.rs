use crate::StoreError;
use common::models::{DisplayMode, Preferences};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const CURRENCY_HEADER: &str = "CURRENCY:";
const WRITEMODE_HEADER: &str = "WRITEMODE:";
const DEFAULTCOIN_HEADER: &str = "DEFAULTCOIN:";

/// Reads and writes the settings file.
///
/// The file holds one `HEADER:` line per preference, each immediately
/// followed by its value line. Unknown lines are ignored and missing
/// sections keep their defaults.
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load preferences, creating the file with defaults if it does not exist.
    pub fn load(&self) -> Result<Preferences, StoreError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "Settings file {} not found, creating it with defaults",
                    self.path.display()
                );
                self.save(&Preferences::default())?;
                std::fs::read_to_string(&self.path).map_err(|e| StoreError::io(&self.path, e))?
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let prefs = parse_settings(&contents)?;
        debug!("Loaded settings: {:?}", prefs);
        Ok(prefs)
    }

    /// Overwrite the settings file with all three sections.
    pub fn save(&self, prefs: &Preferences) -> Result<(), StoreError> {
        let contents = format!(
            "{}\n{}\n{}\n{}\n{}\n{}\n",
            CURRENCY_HEADER,
            prefs.currency(),
            WRITEMODE_HEADER,
            prefs.display_mode.index(),
            DEFAULTCOIN_HEADER,
            prefs.default_coin,
        );

        std::fs::write(&self.path, contents).map_err(|e| StoreError::io(&self.path, e))?;
        debug!("Saved settings to {}", self.path.display());
        Ok(())
    }
}

fn parse_settings(contents: &str) -> Result<Preferences, StoreError> {
    let mut prefs = Preferences::default();
    let mut lines = contents.lines();

    while let Some(line) = lines.next() {
        match line {
            CURRENCY_HEADER => {
                let value = value_line(&mut lines, CURRENCY_HEADER)?;
                if value.is_empty() {
                    warn!("Empty currency in settings, using {}", prefs.currency());
                } else {
                    prefs.set_currency(value);
                }
            }
            WRITEMODE_HEADER => {
                let value = value_line(&mut lines, WRITEMODE_HEADER)?;
                prefs.display_mode = match value
                    .trim()
                    .parse::<i64>()
                    .ok()
                    .and_then(DisplayMode::from_index)
                {
                    Some(mode) => mode,
                    None => {
                        debug!("Writemode '{}' out of range, resetting", value);
                        DisplayMode::default()
                    }
                };
            }
            DEFAULTCOIN_HEADER => {
                let value = value_line(&mut lines, DEFAULTCOIN_HEADER)?;
                match value.split_whitespace().next() {
                    Some(coin) => prefs.default_coin = coin.to_string(),
                    None => warn!("Error reading default coin from settings"),
                }
            }
            _ => {}
        }
    }

    Ok(prefs)
}

fn value_line<'a>(
    lines: &mut impl Iterator<Item = &'a str>,
    header: &str,
) -> Result<&'a str, StoreError> {
    lines
        .next()
        .ok_or_else(|| StoreError::Truncated(header.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    fn store_in(dir: &TempDir) -> SettingsStore {
        SettingsStore::new(dir.child("settings"))
    }

    #[test]
    fn missing_file_is_created_with_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        let prefs = store.load().unwrap();
        assert_eq!(prefs, Preferences::default());
        assert_eq!(prefs.currency(), "USD");
        assert_eq!(prefs.display_mode, DisplayMode::Human);
        assert_eq!(prefs.default_coin, "bitcoin");

        let written = std::fs::read_to_string(store.path()).unwrap();
        assert_eq!(
            written,
            "CURRENCY:\nUSD\nWRITEMODE:\n0\nDEFAULTCOIN:\nbitcoin\n"
        );
    }

    #[test]
    fn save_then_load_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);

        for mode in DisplayMode::ALL {
            let mut prefs = Preferences::default();
            prefs.set_currency_code("eur");
            prefs.display_mode = mode;
            prefs.default_coin = "ethereum".to_string();

            store.save(&prefs).unwrap();
            assert_eq!(store.load().unwrap(), prefs);
        }
    }

    #[test]
    fn out_of_range_writemode_resets_to_human() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(
            store.path(),
            "CURRENCY:\nGBP\nWRITEMODE:\n99\nDEFAULTCOIN:\nlitecoin\n",
        )
        .unwrap();

        let prefs = store.load().unwrap();
        assert_eq!(prefs.display_mode, DisplayMode::Human);
        assert_eq!(prefs.currency(), "GBP");
        assert_eq!(prefs.currency_lower(), "gbp");
        assert_eq!(prefs.default_coin, "litecoin");
    }

    #[test]
    fn unparsable_writemode_resets_to_human() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "WRITEMODE:\nsimple\n").unwrap();

        assert_eq!(store.load().unwrap().display_mode, DisplayMode::Human);
    }

    #[test]
    fn unknown_lines_and_missing_sections_keep_defaults() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "# comment\nTHEME:\ndark\nWRITEMODE:\n2\n").unwrap();

        let prefs = store.load().unwrap();
        assert_eq!(prefs.display_mode, DisplayMode::Change);
        assert_eq!(prefs.currency(), "USD");
        assert_eq!(prefs.default_coin, "bitcoin");
    }

    #[test]
    fn truncated_section_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "CURRENCY:\nUSD\nDEFAULTCOIN:\n").unwrap();

        assert!(matches!(
            store.load(),
            Err(StoreError::Truncated(header)) if header == "DEFAULTCOIN:"
        ));
    }

    #[test]
    fn blank_default_coin_keeps_default() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "DEFAULTCOIN:\n   \n").unwrap();

        assert_eq!(store.load().unwrap().default_coin, "bitcoin");
    }

    #[test]
    fn unwritable_path_fails_to_save() {
        let dir = TempDir::new().unwrap();
        let store = SettingsStore::new(dir.child("missing").join("settings"));

        assert!(matches!(
            store.save(&Preferences::default()),
            Err(StoreError::Io { .. })
        ));
    }
}
