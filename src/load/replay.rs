//! Run the operations of a script against fresh categories
//!
//! Categories are created in order of first appearance, then every
//! operation is applied in file order. Rejected withdrawals and transfers
//! are reported as warnings and otherwise skipped. Balances and the total
//! spending of the file stay within `Amount::MAX`.

use log::info;
use num_traits::Zero;
use std::collections::HashMap;

use crate::lib::{amount::Amount, category::Category};
use crate::load::{
    error,
    parse::{Ast, Op},
};

/// Turn blocks into categories
///
/// Returns `None` if a transfer names a category that does not exist or
/// its own category; nothing is applied in that case. Also returns `None`
/// as soon as an operation would take a balance or the total spending out
/// of range.
pub fn replay(errs: &mut error::Record, ast: Ast) -> Option<Vec<Category>> {
    let mut index = HashMap::new();
    let mut categories = Vec::new();
    for block in &ast {
        index.entry(block.name).or_insert_with(|| {
            categories.push(Category::new(block.name));
            categories.len() - 1
        });
    }
    for block in &ast {
        for (op, loc) in &block.ops {
            if let Op::Transfer(_, target) = op {
                if !index.contains_key(target) {
                    errs.make("Unknown category")
                        .span(loc, format!("'{}' is not declared", target))
                        .text("Transfers may only target categories of this file")
                        .hint(format!("add a block '{} {{ }}' or fix the name", target));
                } else if *target == block.name {
                    errs.make("Transfer to self")
                        .span(loc, format!("'{}' is both source and destination", target))
                        .hint("remove this operation");
                }
            }
        }
    }
    if errs.is_fatal() {
        return None;
    }

    let mut spent = Amount::zero();
    for block in &ast {
        let idx = index[block.name];
        for (op, loc) in &block.ops {
            let checked = match *op {
                Op::Deposit(amount, _) => within_range(&categories[idx], amount, spent),
                // rejected below, nothing is recorded
                Op::Withdraw(amount, _) | Op::Transfer(amount, _)
                    if !categories[idx].check_funds(amount) =>
                {
                    Some(spent)
                }
                Op::Withdraw(amount, _) => within_range(&categories[idx], -amount, spent),
                Op::Transfer(amount, target) => within_range(&categories[idx], -amount, spent)
                    .and_then(|spent| within_range(&categories[index[target]], amount, spent)),
            };
            spent = match checked {
                Some(spent) => spent,
                None => {
                    errs.make("Amount out of range")
                        .span(loc, "a balance or the total spending would overflow here")
                        .text(format!("Balances and total spending are limited to {}", Amount::MAX))
                        .hint("split this budget into smaller units");
                    return None;
                }
            };
            let applied = match *op {
                Op::Deposit(amount, descr) => {
                    categories[idx].deposit(amount, descr);
                    true
                }
                Op::Withdraw(amount, descr) => categories[idx].withdraw(amount, descr),
                Op::Transfer(amount, target) => {
                    let (from, to) = pair_mut(&mut categories, idx, index[target]);
                    from.transfer(amount, to)
                }
            };
            if !applied {
                errs.make("Insufficient funds")
                    .nonfatal()
                    .span(
                        loc,
                        format!("'{}' only has {}", block.name, categories[idx].balance()),
                    )
                    .text("The operation was skipped")
                    .hint("deposit more before this point");
            }
        }
    }
    info!("replayed {} categories", categories.len());
    Some(categories)
}

/// Total spending after recording `entry` in `cat`
///
/// `None` if the balance of `cat` or the total would go out of range.
fn within_range(cat: &Category, entry: Amount, spent: Amount) -> Option<Amount> {
    cat.balance().checked_add(entry)?;
    if entry.is_negative() {
        spent.checked_add(entry.abs())
    } else {
        Some(spent)
    }
}

/// Two distinct elements of a slice, mutably
fn pair_mut<T>(items: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    assert_ne!(i, j);
    if i < j {
        let (lo, hi) = items.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = items.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}
