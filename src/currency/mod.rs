//! Fixed-point money representation and display helpers.
//!
//! Balances are kept as integer minor units (cents) so repeated deposits and
//! withdrawals never drift. Decimal text only appears at the boundaries: the
//! persisted record format and human-facing listings.

use std::{fmt, str::FromStr};

use rust_decimal::{prelude::ToPrimitive, Decimal, RoundingStrategy};

use crate::errors::LedgerError;

pub const DEFAULT_CURRENCY: &str = "USD";

/// Number of fraction digits carried by every amount.
pub const MINOR_DIGITS: usize = 2;
const MINOR_PER_MAJOR: i64 = 100;

/// An amount of money in integer minor units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(i64);

impl Money {
    pub const ZERO: Money = Money(0);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    /// Builds an amount from whole currency units, saturating on overflow.
    pub const fn from_major(units: i64) -> Self {
        Self(units.saturating_mul(MINOR_PER_MAJOR))
    }

    pub const fn cents(self) -> i64 {
        self.0
    }

    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    pub fn checked_sub(self, other: Money) -> Option<Money> {
        self.0.checked_sub(other.0).map(Money)
    }
}

/// Plain decimal with exactly two fraction digits, e.g. `700.00` or `-0.50`.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let magnitude = self.0.unsigned_abs();
        let per_major = MINOR_PER_MAJOR as u64;
        write!(
            f,
            "{}{}.{:02}",
            sign,
            magnitude / per_major,
            magnitude % per_major
        )
    }
}

/// Parses decimal text such as `700`, `700.0`, `350.25` or `-3.5`.
///
/// At most two fraction digits are accepted; anything finer is rejected
/// rather than rounded. See [`Money::parse_lenient`] for persisted balances.
impl FromStr for Money {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (value, fraction_digits) = parse_decimal(s)?;
        if fraction_digits > MINOR_DIGITS {
            return Err(LedgerError::InvalidMoney(s.to_string()));
        }
        to_money(value).ok_or_else(|| LedgerError::InvalidMoney(s.to_string()))
    }
}

impl Money {
    /// Parses decimal text of any precision, rounding to the nearest cent
    /// with ties away from zero.
    ///
    /// Used for balances written by tools that store binary floating point,
    /// e.g. `549.9999999999999` reads as `550.00`.
    pub fn parse_lenient(s: &str) -> Result<Self, LedgerError> {
        let (value, _) = parse_decimal(s)?;
        let rounded =
            value.round_dp_with_strategy(MINOR_DIGITS as u32, RoundingStrategy::MidpointAwayFromZero);
        to_money(rounded).ok_or_else(|| LedgerError::InvalidMoney(s.to_string()))
    }
}

/// Accepts an optional sign, digits, and an optional `.` with digits.
/// Returns the value and the number of fraction digits written.
fn parse_decimal(s: &str) -> Result<(Decimal, usize), LedgerError> {
    let invalid = || LedgerError::InvalidMoney(s.to_string());
    let raw = s.trim();
    let (negative, body) = match raw.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let (whole, fraction) = body.split_once('.').unwrap_or((body, ""));
    if whole.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    let all_digits = |part: &str| part.chars().all(|c| c.is_ascii_digit());
    if !all_digits(whole) || !all_digits(fraction) {
        return Err(invalid());
    }

    let normalized = format!(
        "{}{}.{}",
        if negative { "-" } else { "" },
        if whole.is_empty() { "0" } else { whole },
        if fraction.is_empty() { "0" } else { fraction }
    );
    let value = Decimal::from_str(&normalized).map_err(|_| invalid())?;
    Ok((value, fraction.len()))
}

fn to_money(value: Decimal) -> Option<Money> {
    value
        .checked_mul(Decimal::ONE_HUNDRED)?
        .trunc()
        .to_i64()
        .map(Money)
}

pub fn symbol_for(code: &str) -> String {
    match code.to_ascii_uppercase().as_str() {
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "AUD" => "A$".into(),
        other => format!("{} ", other),
    }
}

/// Renders an amount for people: currency symbol, grouped thousands.
///
/// ```
/// use ledger_core::currency::{format_currency, Money};
///
/// assert_eq!(format_currency(Money::from_cents(123_450), "USD"), "$1,234.50");
/// ```
pub fn format_currency(amount: Money, code: &str) -> String {
    let plain = amount.to_string();
    let unsigned = plain.trim_start_matches('-');
    let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));
    let sign = if amount.is_negative() { "-" } else { "" };
    format!(
        "{}{}{}.{}",
        sign,
        symbol_for(code),
        group_digits(whole, ','),
        fraction
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let mut grouped = String::new();
    for (count, ch) in digits.chars().rev().enumerate() {
        if count != 0 && count % 3 == 0 {
            grouped.insert(0, separator);
        }
        grouped.insert(0, ch);
    }
    grouped
}
