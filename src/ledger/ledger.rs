use std::{collections::HashMap, path::Path};

use tracing::{debug, info, warn};

use super::account::Account;
use crate::{
    currency::Money,
    errors::{LedgerError, Result},
    storage,
};

/// Registry owning every account in a session, kept in insertion order.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    accounts: Vec<Account>,
    /// Position of each account in `accounts`, keyed by id.
    index: HashMap<String, usize>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account and stores it, replacing any account with the same id.
    ///
    /// A replaced account keeps its position in the listing order.
    pub fn create_account(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        initial_balance: Money,
    ) -> Result<&Account> {
        let account = Account::try_new(id, name, initial_balance)?;
        debug!(account = %account.id(), balance = %initial_balance, "account created");
        let index = self.upsert(account);
        Ok(&self.accounts[index])
    }

    /// Opens an account with a zero balance.
    pub fn open_account(&mut self, id: impl Into<String>, name: impl Into<String>) -> &Account {
        let index = self.upsert(Account::new(id, name, Money::ZERO));
        &self.accounts[index]
    }

    pub fn get_account(&self, id: &str) -> Result<&Account> {
        let index = self.position(id)?;
        Ok(&self.accounts[index])
    }

    pub fn get_account_mut(&mut self, id: &str) -> Result<&mut Account> {
        let index = self.position(id)?;
        Ok(&mut self.accounts[index])
    }

    pub fn deposit(&mut self, id: &str, amount: Money) -> Result<()> {
        self.get_account_mut(id)?.deposit(amount)
    }

    pub fn withdraw(&mut self, id: &str, amount: Money) -> Result<()> {
        self.get_account_mut(id)?.withdraw(amount)
    }

    /// Moves `amount` between two accounts. The source is resolved first.
    pub fn transfer(&mut self, from_id: &str, to_id: &str, amount: Money) -> Result<()> {
        let from = self.position(from_id)?;
        let to = self.position(to_id)?;
        if from == to {
            return self.accounts[from].transfer_to_self(amount);
        }
        let (source, target) = pair_mut(&mut self.accounts, from, to);
        source.transfer_to(target, amount)
    }

    pub fn list_accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Sum of all balances, or `None` if it does not fit in [`Money`].
    pub fn total_balance(&self) -> Option<Money> {
        self.accounts
            .iter()
            .try_fold(Money::ZERO, |total, account| {
                total.checked_add(account.balance())
            })
    }

    /// Overwrites `path` with a header line and one record per account.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        storage::write_accounts(path, &self.accounts)?;
        info!(path = %path.display(), accounts = self.accounts.len(), "ledger saved");
        Ok(())
    }

    /// Replaces every account with the contents of `path`.
    ///
    /// A missing file leaves the ledger untouched. Rows that do not form a
    /// valid record are skipped. Returns the number of records loaded.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let path = path.as_ref();
        let Some(loaded) = storage::read_accounts(path)? else {
            debug!(path = %path.display(), "no ledger file, keeping current accounts");
            return Ok(0);
        };
        let count = loaded.len();
        self.accounts.clear();
        self.index.clear();
        for account in loaded {
            self.upsert(account);
        }
        info!(path = %path.display(), accounts = self.accounts.len(), "ledger loaded");
        Ok(count)
    }

    fn position(&self, id: &str) -> Result<usize> {
        self.index
            .get(id)
            .copied()
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_string()))
    }

    fn upsert(&mut self, account: Account) -> usize {
        if let Some(&position) = self.index.get(account.id()) {
            warn!(account = %account.id(), "replacing existing account with the same id");
            self.accounts[position] = account;
            return position;
        }
        let position = self.accounts.len();
        self.index.insert(account.id().to_string(), position);
        self.accounts.push(account);
        position
    }
}

/// Borrows two distinct elements of a slice mutably.
fn pair_mut<T>(items: &mut [T], first: usize, second: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(first, second);
    if first < second {
        let (head, tail) = items.split_at_mut(second);
        (&mut head[first], &mut tail[0])
    } else {
        let (head, tail) = items.split_at_mut(first);
        (&mut tail[0], &mut head[second])
    }
}
