use std::fmt;

use crate::lib::amount::Amount;

/// A single ledger line: a signed amount and what it was for
///
/// Never modified once recorded in a `Category`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    amount: Amount,
    description: String,
}

impl Transaction {
    pub fn new<S>(amount: Amount, description: S) -> Self
    where
        S: ToString,
    {
        Self {
            amount,
            description: description.to_string(),
        }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.amount, self.description)
    }
}
