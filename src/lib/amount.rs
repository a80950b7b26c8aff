//! Fixed-point monetary values
//!
//! An `Amount` is an integer number of cents. All ledger arithmetic happens
//! on cents so that balances never drift.
//!
//! Operators are plain `i64` arithmetic. Text is only accepted up to
//! `Amount::MAX` in magnitude, and `checked_add` keeps running totals
//! inside that range.

use num_traits::Zero;
use std::fmt;
use std::iter::Sum;
use std::ops;
use std::str::FromStr;

/// A signed amount of money, in cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Amount(i64);

/// Reasons for rejecting a textual amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("empty amount")]
    Empty,
    #[error("'{0}' is not a decimal number")]
    Invalid(char),
    #[error("more than two decimal places")]
    TooPrecise,
    #[error("amount does not fit in the supported range")]
    Overflow,
}

impl Amount {
    /// Largest magnitude read from text or reached by `checked_add`
    pub const MAX: Self = Self(i64::MAX / 1000);

    pub const fn from_cents(cents: i64) -> Self {
        Self(cents)
    }

    pub fn cents(self) -> i64 {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Sum of `self` and `other`, `None` outside of `-MAX..=MAX`
    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0
            .checked_add(other.0)
            .filter(|c| c.abs() <= Self::MAX.0)
            .map(Self)
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        // padding and alignment of the caller apply to the whole number
        f.pad(&format!("{}{}.{:02}", sign, abs / 100, abs % 100))
    }
}

impl FromStr for Amount {
    type Err = AmountError;

    /// Parse `[-]DIGITS[.D[D]]`
    fn from_str(s: &str) -> Result<Self, AmountError> {
        let (neg, digits) = match s.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, s),
        };
        let (whole, frac) = match digits.split_once('.') {
            Some((whole, frac)) => (whole, frac),
            None => (digits, ""),
        };
        if whole.is_empty() {
            return Err(AmountError::Empty);
        }
        if let Some(c) = whole.chars().chain(frac.chars()).find(|c| !c.is_ascii_digit()) {
            return Err(AmountError::Invalid(c));
        }
        if frac.len() > 2 {
            return Err(AmountError::TooPrecise);
        }
        let units = whole.parse::<i64>().map_err(|_| AmountError::Overflow)?;
        let mut cents = 0;
        for (i, d) in frac.bytes().enumerate() {
            let scale = if i == 0 { 10 } else { 1 };
            cents += i64::from(d - b'0') * scale;
        }
        let total = units
            .checked_mul(100)
            .and_then(|u| u.checked_add(cents))
            .filter(|&t| t <= Self::MAX.0)
            .ok_or(AmountError::Overflow)?;
        Ok(Self(if neg { -total } else { total }))
    }
}

impl ops::Add for Amount {
    type Output = Self;
    fn add(self, other: Self) -> Self {
        Self(self.0 + other.0)
    }
}

impl ops::Sub for Amount {
    type Output = Self;
    fn sub(self, other: Self) -> Self {
        Self(self.0 - other.0)
    }
}

impl ops::Neg for Amount {
    type Output = Self;
    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl ops::AddAssign for Amount {
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl ops::SubAssign for Amount {
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

impl Zero for Amount {
    fn zero() -> Self {
        Self(0)
    }

    fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl Sum for Amount {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = Self>,
    {
        iter.fold(Self::zero(), |acc, a| acc + a)
    }
}

impl<'a> Sum<&'a Amount> for Amount {
    fn sum<I>(iter: I) -> Self
    where
        I: Iterator<Item = &'a Self>,
    {
        iter.copied().sum()
    }
}
