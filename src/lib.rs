#![doc(test(attr(deny(warnings))))]

//! Ledger Core keeps named accounts in memory, applies validated deposits,
//! withdrawals and transfers, and persists the whole set to a flat CSV file.
//!
//! ```
//! use ledger_core::{currency::Money, ledger::Ledger};
//!
//! let mut ledger = Ledger::new();
//! ledger.create_account("1001", "Wensy", Money::from_major(500))?;
//! ledger.deposit("1001", Money::from_major(200))?;
//! assert_eq!(ledger.get_account("1001")?.balance(), Money::from_major(700));
//! # Ok::<(), ledger_core::errors::LedgerError>(())
//! ```

pub mod config;
pub mod currency;
pub mod demo;
pub mod errors;
pub mod ledger;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Ledger Core tracing initialized.");
    });
}
