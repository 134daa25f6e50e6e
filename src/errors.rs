use std::result::Result as StdResult;

use thiserror::Error;

use crate::currency::Money;

/// Error type that captures ledger, persistence, and configuration failures.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),
    #[error("Insufficient funds in account {account}: requested {requested}, available {available}")]
    InsufficientFunds {
        account: String,
        requested: Money,
        available: Money,
    },
    #[error("Account not found: {0}")]
    AccountNotFound(String),
    #[error("Invalid money value: {0}")]
    InvalidMoney(String),
    #[error("Malformed record: {0}")]
    MalformedRecord(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = StdResult<T, LedgerError>;

impl From<serde_json::Error> for LedgerError {
    fn from(err: serde_json::Error) -> Self {
        LedgerError::Config(err.to_string())
    }
}
