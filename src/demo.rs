//! Scripted walkthrough used by the `ledger_demo` binary.

use std::io::Write;

use colored::Colorize;
use tracing::info;

use crate::{config::Config, currency::Money, errors::Result, ledger::Ledger};

/// Loads the configured data file, runs the sample transactions, prints every
/// account to `out` and saves the ledger back to the same file.
pub fn run_demo(config: &Config, out: &mut impl Write) -> Result<Ledger> {
    let mut ledger = Ledger::new();
    let loaded = ledger.load_from_file(&config.data_file)?;
    info!(loaded, path = %config.data_file.display(), "starting demo");

    ledger.create_account("1001", "Wensy", Money::from_major(500))?;
    ledger.create_account("1002", "Haitao", Money::from_major(300))?;

    ledger.deposit("1001", Money::from_major(200))?;
    ledger.withdraw("1002", Money::from_major(100))?;
    ledger.transfer("1001", "1002", Money::from_major(150))?;

    let heading = "All accounts:";
    if config.ui_color_enabled {
        writeln!(out, "\n{}", heading.bold())?;
    } else {
        writeln!(out, "\n{}", heading)?;
    }
    for account in ledger.list_accounts() {
        writeln!(out, "  {}", account.summary(&config.currency))?;
    }

    ledger.save_to_file(&config.data_file)?;
    Ok(ledger)
}
