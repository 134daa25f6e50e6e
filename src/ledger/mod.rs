//! Accounts, the ledger that owns them, and their balance rules.

pub mod account;
#[allow(clippy::module_inception)]
pub mod ledger;

pub use account::{Account, RECORD_FIELDS};
pub use ledger::Ledger;
