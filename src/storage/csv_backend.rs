use std::path::Path;

use csv::{ReaderBuilder, StringRecord, WriterBuilder};
use tracing::warn;

use crate::{errors::Result, ledger::Account};

/// Header written as the first line of every ledger file.
pub const HEADER: [&str; 3] = ["account_id", "name", "balance"];

/// Overwrites `path` with the header followed by one record per account.
///
/// Fields containing commas, quotes or line breaks are quoted.
pub fn write_accounts(path: &Path, accounts: &[Account]) -> Result<()> {
    let mut writer = WriterBuilder::new().has_headers(false).from_path(path)?;
    writer.write_record(HEADER)?;
    for account in accounts {
        writer.write_record(account.to_record())?;
    }
    writer.flush()?;
    Ok(())
}

/// Reads every valid account record from `path`.
///
/// Returns `Ok(None)` when the file does not exist. The first line is always
/// treated as a header and discarded; rows that fail to decode into an
/// [`Account`] are skipped with a warning.
pub fn read_accounts(path: &Path) -> Result<Option<Vec<Account>>> {
    if !path.exists() {
        return Ok(None);
    }
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut accounts = Vec::new();
    for (index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(err) if !err.is_io_error() => {
                warn!(path = %path.display(), error = %err, "skipping unreadable row");
                continue;
            }
            Err(err) => return Err(err.into()),
        };
        if index == 0 {
            continue;
        }
        match decode(&record) {
            Ok(account) => accounts.push(account),
            Err(err) => warn!(
                path = %path.display(),
                line = line_of(&record),
                error = %err,
                "skipping malformed record"
            ),
        }
    }
    Ok(Some(accounts))
}

fn decode(record: &StringRecord) -> Result<Account> {
    let fields: Vec<&str> = record.iter().collect();
    Account::from_record(&fields)
}

fn line_of(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or_default()
}
