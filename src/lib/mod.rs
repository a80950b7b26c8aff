//! Money, ledgers and categories

pub mod amount;
pub mod category;
pub mod transaction;
