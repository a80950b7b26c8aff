//! Named spending categories and their ledgers
//!
//! A `Category` only ever grows: deposits, withdrawals and transfers append
//! to its ledger, and the balance is always recomputed from the ledger.

use log::debug;
use num_traits::Zero;
use std::fmt;

use crate::lib::{amount::Amount, transaction::Transaction};

/// Width of the `*`-padded title line
const TITLE_WIDTH: usize = 30;
/// Descriptions longer than this are cut
const DESCRIPTION_WIDTH: usize = 23;
const AMOUNT_WIDTH: usize = 7;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    ledger: Vec<Transaction>,
}

impl Category {
    /// Create a category with an empty ledger
    pub fn new<S>(name: S) -> Self
    where
        S: ToString,
    {
        Self {
            name: name.to_string(),
            ledger: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// All transactions, oldest first
    pub fn ledger(&self) -> &[Transaction] {
        &self.ledger
    }

    fn record<S>(&mut self, amount: Amount, description: S)
    where
        S: ToString,
    {
        let tr = Transaction::new(amount, description);
        debug!("'{}' records {}", self.name, tr);
        self.ledger.push(tr);
    }

    /// Add money to the category
    ///
    /// The sign is not checked: a negative deposit is recorded as is.
    pub fn deposit<S>(&mut self, amount: Amount, description: S)
    where
        S: ToString,
    {
        self.record(amount, description);
    }

    /// Take money out of the category
    ///
    /// Returns `false` and leaves the ledger untouched if `amount` exceeds
    /// the current balance.
    #[must_use]
    pub fn withdraw<S>(&mut self, amount: Amount, description: S) -> bool
    where
        S: ToString,
    {
        if !self.check_funds(amount) {
            debug!(
                "'{}' rejects withdrawal of {}: balance is {}",
                self.name,
                amount,
                self.balance()
            );
            return false;
        }
        self.record(-amount, description);
        true
    }

    /// Move money from `self` to `other`
    ///
    /// Both ledgers are written or neither is: the funds check happens once,
    /// before any mutation.
    #[must_use]
    pub fn transfer(&mut self, amount: Amount, other: &mut Category) -> bool {
        if !self.check_funds(amount) {
            debug!(
                "'{}' rejects transfer of {} to '{}': balance is {}",
                self.name,
                amount,
                other.name,
                self.balance()
            );
            return false;
        }
        self.record(-amount, format!("Transfer to {}", other.name));
        other.record(amount, format!("Transfer from {}", self.name));
        true
    }

    /// Whether `amount` can be taken out right now
    pub fn check_funds(&self, amount: Amount) -> bool {
        amount <= self.balance()
    }

    pub fn balance(&self) -> Amount {
        self.ledger.iter().map(Transaction::amount).sum()
    }

    /// Total money that left the category (withdrawals and transfers out)
    pub fn spent(&self) -> Amount {
        self.ledger
            .iter()
            .map(Transaction::amount)
            .filter(|a| a.is_negative())
            .fold(Amount::zero(), |acc, a| acc + a.abs())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{:*^width$}", self.name, width = TITLE_WIDTH)?;
        for tr in self.ledger() {
            let descr = tr
                .description()
                .chars()
                .take(DESCRIPTION_WIDTH)
                .collect::<String>();
            writeln!(
                f,
                "{:<dw$}{:>aw$}",
                descr,
                tr.amount(),
                dw = DESCRIPTION_WIDTH,
                aw = AMOUNT_WIDTH
            )?;
        }
        write!(f, "Total: {}", self.balance())
    }
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
    use super::*;
    use quickcheck_macros::quickcheck;

    macro_rules! amt {
        ( $s:expr ) => { $s.parse::<Amount>().unwrap() };
    }

    fn food() -> Category {
        let mut food = Category::new("Food");
        food.deposit(amt!("900"), "deposit");
        assert!(food.withdraw(amt!("105.55"), "groceries"));
        assert!(food.withdraw(amt!("10.99"), "restaurant"));
        food
    }

    #[test]
    fn balance_after_withdrawals() {
        assert_eq!(food().balance(), amt!("783.46"));
        assert_eq!(food().spent(), amt!("116.54"));
    }

    #[test]
    fn empty_category() {
        let cat = Category::new("Auto");
        assert!(cat.ledger().is_empty());
        assert_eq!(cat.balance(), Amount::zero());
        assert!(cat.check_funds(Amount::zero()));
        assert!(!cat.check_funds(amt!("0.01")));
    }

    #[test]
    fn negative_deposit_is_recorded() {
        let mut cat = Category::new("Auto");
        cat.deposit(amt!("-20"), "");
        assert_eq!(cat.balance(), amt!("-20"));
        assert_eq!(cat.ledger().len(), 1);
    }

    #[test]
    fn withdraw_insufficient() {
        let mut cat = food();
        let before = cat.clone();
        assert!(!cat.withdraw(amt!("783.47"), "too much"));
        assert_eq!(cat, before);
    }

    #[test]
    fn withdraw_exact_balance() {
        let mut cat = food();
        assert!(cat.withdraw(amt!("783.46"), "everything"));
        assert_eq!(cat.balance(), Amount::zero());
        assert_eq!(cat.ledger().last().unwrap().amount(), amt!("-783.46"));
    }

    #[test]
    fn transfer_moves_funds() {
        let mut food = food();
        let mut clothing = Category::new("Clothing");
        assert!(food.transfer(amt!("50"), &mut clothing));
        assert_eq!(food.balance(), amt!("733.46"));
        assert_eq!(clothing.balance(), amt!("50"));
        assert_eq!(food.ledger().len(), 4);
        assert_eq!(clothing.ledger().len(), 1);
        assert_eq!(food.ledger()[3].description(), "Transfer to Clothing");
        assert_eq!(clothing.ledger()[0].description(), "Transfer from Food");
        assert_eq!(food.spent(), amt!("166.54"));
        assert_eq!(clothing.spent(), Amount::zero());
    }

    #[test]
    fn transfer_insufficient() {
        let mut food = food();
        let mut clothing = Category::new("Clothing");
        clothing.deposit(amt!("10"), "");
        let (before_food, before_clothing) = (food.clone(), clothing.clone());
        assert!(!food.transfer(amt!("1000"), &mut clothing));
        assert_eq!(food, before_food);
        assert_eq!(clothing, before_clothing);
        assert!(clothing.transfer(amt!("10"), &mut food));
        assert_eq!(clothing.balance(), Amount::zero());
    }

    #[test]
    fn display() {
        let mut food = Category::new("Food");
        food.deposit(amt!("1000"), "initial deposit");
        assert!(food.withdraw(amt!("10.15"), "groceries"));
        assert!(food.withdraw(amt!("15.89"), "restaurant and more food for dessert"));
        let mut clothing = Category::new("Clothing");
        assert!(food.transfer(amt!("50"), &mut clothing));
        let expected = "\
*************Food*************
initial deposit        1000.00
groceries               -10.15
restaurant and more foo -15.89
Transfer to Clothing    -50.00
Total: 923.96";
        assert_eq!(&format!("{}", food), expected);
        assert_eq!(&format!("{}", clothing), "\
***********Clothing***********
Transfer from Food       50.00
Total: 50.00");
    }

    #[test]
    fn display_odd_padding() {
        let cat = Category::new("Auto");
        assert_eq!(&format!("{}", cat), "*************Auto*************\nTotal: 0.00");
        let cat = Category::new("Bus");
        assert_eq!(&format!("{}", cat), "*************Bus**************\nTotal: 0.00");
    }

    #[test]
    fn display_sums_to_total() {
        let text = format!("{}", food());
        let mut lines = text.lines().skip(1).collect::<Vec<_>>();
        let total = lines.pop().unwrap().strip_prefix("Total: ").unwrap();
        let sum = lines.iter()
            .map(|l| amt!(l[DESCRIPTION_WIDTH..].trim()))
            .sum::<Amount>();
        assert_eq!(sum, amt!(total));
    }

    #[quickcheck]
    fn balance_is_sum_of_ledger(ops: Vec<(bool, u32)>) -> bool {
        let mut cat = Category::new("Prop");
        for (deposit, cents) in ops {
            let amount = Amount::from_cents(i64::from(cents));
            if deposit {
                cat.deposit(amount, "in");
            } else {
                let before = cat.ledger().len();
                let ok = cat.withdraw(amount, "out");
                if ok != (cat.ledger().len() == before + 1) {
                    return false;
                }
            }
        }
        let sum = cat.ledger().iter().map(|t| t.amount().cents()).sum::<i64>();
        cat.balance().cents() == sum && !cat.balance().is_negative()
    }

    #[quickcheck]
    fn transfer_preserves_total(a: u32, b: u32, moved: u32) -> bool {
        let mut x = Category::new("X");
        let mut y = Category::new("Y");
        x.deposit(Amount::from_cents(i64::from(a)), "");
        y.deposit(Amount::from_cents(i64::from(b)), "");
        let before = x.balance() + y.balance();
        let ok = x.transfer(Amount::from_cents(i64::from(moved)), &mut y);
        let len = if ok { 2 } else { 1 };
        ok == (moved <= a)
            && x.balance() + y.balance() == before
            && x.ledger().len() == len
            && y.ledger().len() == len
    }
}
