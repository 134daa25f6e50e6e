//! Whole-file persistence for ledger accounts.

pub mod csv_backend;

pub use csv_backend::{read_accounts, write_accounts, HEADER};
