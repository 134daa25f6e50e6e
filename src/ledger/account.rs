use std::fmt;

use tracing::debug;

use crate::{
    currency::{format_currency, Money, DEFAULT_CURRENCY},
    errors::{LedgerError, Result},
};

/// Number of fields in a persisted account record.
pub const RECORD_FIELDS: usize = 3;

/// A named, balance-holding account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    id: String,
    name: String,
    balance: Money,
}

impl Account {
    /// Creates an account, rejecting a negative opening balance.
    pub fn try_new(id: impl Into<String>, name: impl Into<String>, balance: Money) -> Result<Self> {
        if balance.is_negative() {
            return Err(LedgerError::InvalidAmount(format!(
                "Initial balance cannot be negative, got {}",
                balance
            )));
        }
        Ok(Self::new(id, name, balance))
    }

    /// Unchecked constructor; every caller has already ruled out a negative balance.
    pub(crate) fn new(id: impl Into<String>, name: impl Into<String>, balance: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            balance,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn deposit(&mut self, amount: Money) -> Result<()> {
        ensure_positive(amount, "Deposit")?;
        self.balance = self.credited(amount)?;
        debug!(account = %self.id, %amount, balance = %self.balance, "deposit applied");
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Money) -> Result<()> {
        ensure_positive(amount, "Withdrawal")?;
        self.balance = self.debited(amount)?;
        debug!(account = %self.id, %amount, balance = %self.balance, "withdrawal applied");
        Ok(())
    }

    /// Moves `amount` from this account into `other`.
    ///
    /// Both new balances are computed before either is written, so a failure
    /// leaves both accounts untouched.
    pub fn transfer_to(&mut self, other: &mut Account, amount: Money) -> Result<()> {
        ensure_positive(amount, "Transfer")?;
        let source_balance = self.debited(amount)?;
        let target_balance = other.credited(amount)?;
        self.balance = source_balance;
        other.balance = target_balance;
        debug!(from = %self.id, to = %other.id, %amount, "transfer applied");
        Ok(())
    }

    /// Validates a transfer whose source and target are the same account.
    ///
    /// The money leaves and comes straight back, so only the checks matter.
    pub(crate) fn transfer_to_self(&self, amount: Money) -> Result<()> {
        ensure_positive(amount, "Transfer")?;
        self.debited(amount)?;
        Ok(())
    }

    /// Produces the `(id, name, balance)` record written to disk.
    pub fn to_record(&self) -> [String; RECORD_FIELDS] {
        [self.id.clone(), self.name.clone(), self.balance.to_string()]
    }

    /// Rebuilds an account from a persisted record.
    ///
    /// Rejects records with the wrong field count, an unparsable balance, or a
    /// negative balance. Balances finer than a cent are rounded to the nearest
    /// cent.
    pub fn from_record<S: AsRef<str>>(fields: &[S]) -> Result<Self> {
        let [id, name, balance] = fields else {
            return Err(LedgerError::MalformedRecord(format!(
                "expected {} fields, found {}",
                RECORD_FIELDS,
                fields.len()
            )));
        };
        let balance = Money::parse_lenient(balance.as_ref()).map_err(|err| {
            LedgerError::MalformedRecord(format!("account {}: {}", id.as_ref(), err))
        })?;
        if balance.is_negative() {
            return Err(LedgerError::MalformedRecord(format!(
                "account {} has negative balance {}",
                id.as_ref(),
                balance
            )));
        }
        Ok(Self::new(id.as_ref(), name.as_ref(), balance))
    }

    /// One-line listing such as `1001: Wensy - $550.00`.
    pub fn summary(&self, currency: &str) -> String {
        format!(
            "{}: {} - {}",
            self.id,
            self.name,
            format_currency(self.balance, currency)
        )
    }

    fn credited(&self, amount: Money) -> Result<Money> {
        self.balance.checked_add(amount).ok_or_else(|| {
            LedgerError::InvalidAmount(format!(
                "depositing {} would overflow the balance of account {}",
                amount, self.id
            ))
        })
    }

    fn debited(&self, amount: Money) -> Result<Money> {
        if amount > self.balance {
            return Err(LedgerError::InsufficientFunds {
                account: self.id.clone(),
                requested: amount,
                available: self.balance,
            });
        }
        Ok(Money::from_cents(self.balance.cents() - amount.cents()))
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.summary(DEFAULT_CURRENCY))
    }
}

fn ensure_positive(amount: Money, operation: &str) -> Result<()> {
    if amount.is_positive() {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount(format!(
            "{} amount must be positive, got {}",
            operation, amount
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(value: i64) -> Money {
        Money::from_cents(value)
    }

    fn account(balance: i64) -> Account {
        Account::new("1001", "Alice", cents(balance))
    }

    #[test]
    fn deposit_increases_balance() {
        let mut acct = account(10_000);
        acct.deposit(cents(5_000)).expect("deposit succeeds");
        assert_eq!(acct.balance(), cents(15_000));
    }

    #[test]
    fn deposit_rejects_zero_and_negative_amounts() {
        let mut acct = account(10_000);
        for amount in [0, -100] {
            let err = acct.deposit(cents(amount)).expect_err("must fail");
            assert!(matches!(err, LedgerError::InvalidAmount(_)), "{err:?}");
        }
        assert_eq!(acct.balance(), cents(10_000));
    }

    #[test]
    fn withdraw_decreases_balance() {
        let mut acct = account(10_000);
        acct.withdraw(cents(3_000)).expect("withdraw succeeds");
        assert_eq!(acct.balance(), cents(7_000));
    }

    #[test]
    fn withdraw_beyond_balance_is_rejected() {
        let mut acct = account(2_000);
        let err = acct.withdraw(cents(3_000)).expect_err("must fail");
        assert!(matches!(
            err,
            LedgerError::InsufficientFunds { ref account, requested, available }
                if account == "1001" && requested == cents(3_000) && available == cents(2_000)
        ));
        assert_eq!(acct.balance(), cents(2_000));
    }

    #[test]
    fn withdraw_of_entire_balance_drains_account() {
        let mut acct = account(2_000);
        acct.withdraw(cents(2_000)).expect("full withdrawal succeeds");
        assert_eq!(acct.balance(), Money::ZERO);
    }

    #[test]
    fn non_positive_amount_wins_over_insufficient_funds() {
        let mut acct = account(0);
        let err = acct.withdraw(cents(-1)).expect_err("must fail");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
    }

    #[test]
    fn transfer_moves_funds_between_accounts() {
        let mut source = account(10_000);
        let mut target = Account::new("1002", "Bob", cents(5_000));
        source.transfer_to(&mut target, cents(3_000)).expect("transfer");
        assert_eq!(source.balance(), cents(7_000));
        assert_eq!(target.balance(), cents(8_000));
    }

    #[test]
    fn failed_transfer_leaves_both_sides_untouched() {
        let mut source = account(1_000);
        let mut target = Account::new("1002", "Bob", cents(5_000));

        let err = source
            .transfer_to(&mut target, cents(1_001))
            .expect_err("must fail");
        assert!(matches!(err, LedgerError::InsufficientFunds { .. }));

        let err = source.transfer_to(&mut target, Money::ZERO).expect_err("must fail");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));

        assert_eq!(source.balance(), cents(1_000));
        assert_eq!(target.balance(), cents(5_000));
    }

    #[test]
    fn transfer_overflowing_target_does_not_debit_source() {
        let mut source = account(1_000);
        let mut target = Account::new("1002", "Bob", cents(i64::MAX));
        let err = source
            .transfer_to(&mut target, cents(500))
            .expect_err("must fail");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        assert_eq!(source.balance(), cents(1_000));
    }

    #[test]
    fn record_round_trip_preserves_fields() {
        let acct = Account::new("1001", "Wensy", cents(70_000));
        let record = acct.to_record();
        assert_eq!(record, ["1001", "Wensy", "700.00"]);
        let restored = Account::from_record(&record).expect("valid record");
        assert_eq!(restored, acct);
    }

    #[test]
    fn from_record_rejects_malformed_rows() {
        let too_short = Account::from_record(&["1001", "Wensy"]);
        let too_long = Account::from_record(&["1001", "Wensy", "1.0", "extra"]);
        let bad_balance = Account::from_record(&["1001", "Wensy", "lots"]);
        let negative = Account::from_record(&["1001", "Wensy", "-5.00"]);
        for result in [too_short, too_long, bad_balance, negative] {
            assert!(matches!(result, Err(LedgerError::MalformedRecord(_))));
        }
    }

    #[test]
    fn from_record_rounds_float_noise_in_balance() {
        let restored = Account::from_record(&["1001", "Wensy", "549.9999999999999"])
            .expect("float noise is tolerated");
        assert_eq!(restored.balance(), cents(55_000));
        let restored =
            Account::from_record(&["1002", "Ana", "0.004"]).expect("rounds down to zero");
        assert_eq!(restored.balance(), Money::ZERO);
    }

    #[test]
    fn try_new_rejects_negative_balance() {
        let err = Account::try_new("1001", "Wensy", cents(-1)).expect_err("must fail");
        assert!(matches!(err, LedgerError::InvalidAmount(_)));
        let acct = Account::try_new("1001", "Wensy", Money::ZERO).expect("zero is allowed");
        assert_eq!(acct.balance(), Money::ZERO);
    }

    #[test]
    fn display_matches_listing_format() {
        let acct = Account::new("1001", "Wensy", cents(55_000));
        assert_eq!(acct.to_string(), "1001: Wensy - $550.00");
        assert_eq!(acct.summary("EUR"), "1001: Wensy - €550.00");
    }
}
