use crate::StoreError;
use common::models::PriceRecord;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

const LINES_PER_RECORD: usize = 4;

/// Flat-file store of the last observed price per (coin, currency) pair.
///
/// Each record takes four lines: coin, currency, price with six fractional
/// digits, and the observation time in unix seconds. The whole file is read
/// into memory for every operation and written back in full on update.
pub struct PriceLedger {
    path: PathBuf,
}

impl PriceLedger {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Last record stored for `coin` in `currency`, if any.
    ///
    /// A missing ledger file is created empty.
    pub fn lookup(&self, coin: &str, currency: &str) -> Result<Option<PriceRecord>, StoreError> {
        let contents = match self.read() {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Ledger {} not found, creating it", self.path.display());
                std::fs::write(&self.path, "").map_err(|e| StoreError::io(&self.path, e))?;
                return Ok(None);
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let record = parse_records(&contents)
            .into_iter()
            .find(|record| record.matches(coin, currency));

        match &record {
            Some(record) => debug!("Found {} in ledger at {}", record.key(), record.price),
            None => debug!("No ledger entry for {}/{}", coin, currency),
        }
        Ok(record)
    }

    /// Store `record`, replacing any previous record with the same key.
    ///
    /// The new record always lands at the end of the file. The file is
    /// rewritten through a temporary sibling that is renamed into place.
    pub fn upsert(&self, record: &PriceRecord) -> Result<(), StoreError> {
        validate_key(record)?;

        let mut records = match self.read() {
            Ok(contents) => parse_records(&contents),
            Err(e) if e.kind() == ErrorKind::NotFound => Vec::new(),
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        records.retain(|existing| !existing.matches(&record.coin, &record.currency));
        records.push(record.clone());

        let tmp_path = self.tmp_path();
        std::fs::write(&tmp_path, serialize_records(&records))
            .map_err(|e| StoreError::io(&tmp_path, e))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|e| StoreError::io(&self.path, e))?;

        debug!(
            "Stored {} = {} at {} ({} records)",
            record.key(),
            record.price,
            record.observed_at,
            records.len()
        );
        Ok(())
    }

    /// Delete the whole ledger. Deleting a ledger that does not exist is not an error.
    pub fn purge(&self) -> Result<(), StoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => {
                info!("Deleted price ledger {}", self.path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("Ledger {} already absent", self.path.display());
                Ok(())
            }
            Err(e) => Err(StoreError::io(&self.path, e)),
        }
    }

    // Invalid UTF-8 is replaced rather than rejected so that only the
    // records it touches are lost.
    fn read(&self) -> std::io::Result<String> {
        let bytes = std::fs::read(&self.path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn validate_key(record: &PriceRecord) -> Result<(), StoreError> {
    for part in [&record.coin, &record.currency] {
        if !is_key_component(part) {
            return Err(StoreError::Malformed(format!(
                "invalid ledger key component {:?}",
                part
            )));
        }
    }
    Ok(())
}

/// Key lines must be non-empty, single-line, valid text, and must not read
/// as numbers so they can never be mistaken for a price or timestamp line.
fn is_key_component(part: &str) -> bool {
    !part.is_empty()
        && !part.contains(['\n', '\r', char::REPLACEMENT_CHARACTER])
        && part.trim().parse::<f64>().is_err()
}

/// Parse every well-formed record.
///
/// A window of four lines that does not form a record is skipped one line at
/// a time until the next well-formed record, so a damaged record only loses
/// itself. Later duplicates of a key are dropped and the first occurrence wins.
fn parse_records(contents: &str) -> Vec<PriceRecord> {
    let lines: Vec<&str> = contents.lines().collect();
    let mut records: Vec<PriceRecord> = Vec::with_capacity(lines.len() / LINES_PER_RECORD);
    let mut skipped: Vec<&str> = Vec::new();
    let mut pos = 0;

    while pos < lines.len() {
        let window = &lines[pos..lines.len().min(pos + LINES_PER_RECORD)];
        match parse_record(window) {
            Ok(record) => {
                report_skipped(&mut skipped);
                pos += LINES_PER_RECORD;
                if records
                    .iter()
                    .any(|existing| existing.matches(&record.coin, &record.currency))
                {
                    warn!("Duplicate ledger entry for {}, ignoring", record.key());
                    continue;
                }
                records.push(record);
            }
            Err(e) => {
                if skipped.is_empty() {
                    debug!("Resyncing ledger at line {}: {}", pos + 1, e);
                }
                skipped.push(lines[pos]);
                pos += 1;
            }
        }
    }
    report_skipped(&mut skipped);

    records
}

fn report_skipped(skipped: &mut Vec<&str>) {
    if !skipped.is_empty() {
        warn!("Skipping malformed ledger lines {:?}", skipped);
        skipped.clear();
    }
}

fn parse_record(window: &[&str]) -> Result<PriceRecord, StoreError> {
    let [coin, currency, price, observed_at] = window else {
        return Err(StoreError::Malformed(format!(
            "truncated record {:?}",
            window
        )));
    };

    if !is_key_component(coin) || !is_key_component(currency) {
        return Err(StoreError::Malformed(format!(
            "invalid key {:?}/{:?}",
            coin, currency
        )));
    }

    let price = price
        .trim()
        .parse::<f64>()
        .map_err(|e| StoreError::Malformed(format!("{}/{} price {:?}: {}", coin, currency, price, e)))?;
    let observed_at = observed_at.trim().parse::<i64>().map_err(|e| {
        StoreError::Malformed(format!(
            "{}/{} timestamp {:?}: {}",
            coin, currency, observed_at, e
        ))
    })?;

    Ok(PriceRecord {
        coin: coin.to_string(),
        currency: currency.to_string(),
        price,
        observed_at,
    })
}

fn serialize_records(records: &[PriceRecord]) -> String {
    records
        .iter()
        .map(|record| {
            format!(
                "{}\n{}\n{:.6}\n{}\n",
                record.coin, record.currency, record.price, record.observed_at
            )
        })
        .collect()
}
