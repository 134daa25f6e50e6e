use std::path::PathBuf;

use ledger_core::{currency::Money, ledger::Ledger};
use tempfile::TempDir;

/// Returns a path inside a fresh temporary directory; keep the guard alive.
pub fn temp_ledger_path() -> (TempDir, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().join("accounts.csv");
    (temp, path)
}

pub fn money(text: &str) -> Money {
    text.parse().expect("valid money literal")
}

pub fn balance_of(ledger: &Ledger, id: &str) -> Money {
    ledger.get_account(id).expect("account exists").balance()
}
