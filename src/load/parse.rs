//! Convert the contents of a script into a list of category blocks

#![allow(clippy::upper_case_acronyms)]

use pest::Parser;
use pest_derive::*;

/// Wrapper around Pest's `Pair`
type Pair<'i> = pest::iterators::Pair<'i, Rule>;
/// Wrapper around Pest's `Pairs`
type Pairs<'i> = pest::iterators::Pairs<'i, Rule>;

use crate::lib::amount::Amount;
use crate::load::error;

/// Pest-generated parser
#[derive(Parser)]
#[grammar = "load/tally.pest"]
pub struct TallyParser;

/// All blocks of a file, in order
pub type Ast<'i> = Vec<Block<'i>>;

/// A category and the operations listed in one of its blocks
#[derive(Debug)]
pub struct Block<'i> {
    pub name: &'i str,
    pub ops: Vec<(Op<'i>, error::Loc<'i>)>,
}

/// A single ledger operation, applied to the category of its block
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op<'i> {
    Deposit(Amount, &'i str),
    Withdraw(Amount, &'i str),
    /// amount and name of the receiving category
    Transfer(Amount, &'i str),
}

/// Get the blocks of `contents`, read from file `path`
///
/// The return value may be non-empty even if some errors (including fatal ones) occurred:
/// it holds every block that was read correctly.
///
/// Caller should determine the success of this function not through its return value
/// but by querying `errs` (e.g. by checking `errs.is_fatal()`)
pub fn extract<'i>(path: &'i str, errs: &mut error::Record, contents: &'i str) -> Ast<'i> {
    match TallyParser::parse(Rule::program, contents) {
        Ok(pairs) => validate(path, errs, pairs),
        Err(e) => {
            errs.make("Parsing failure").from(e.with_path(path));
            Vec::new()
        }
    }
}

// extract contents of wrapper rule
macro_rules! subrule {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No subrule"));
        if items.next().is_some() {
            panic!("Several subrules");
        }
        fst
    }};
}

// get first and rest of inner
macro_rules! decapitate {
    ( $node:expr ) => {{
        let mut items = $node.into_inner();
        let fst = items.next().unwrap_or_else(|| panic!("No head"));
        (fst, items)
    }};
}

/// Check all blocks, recording errors and keeping the correct ones
pub fn validate<'i>(path: &'i str, errs: &mut error::Record, pairs: Pairs<'i>) -> Ast<'i> {
    let mut ast = Vec::new();
    for pair in pairs {
        match pair.as_rule() {
            Rule::block => ast.push(validate_block(path, errs, pair)),
            Rule::EOI => break,
            _ => unreachable!(),
        }
    }
    ast
}

fn validate_block<'i>(path: &'i str, errs: &mut error::Record, pair: Pair<'i>) -> Block<'i> {
    let (head, body) = decapitate!(pair);
    assert_eq!(head.as_rule(), Rule::name);
    let name = read_name(head);
    let ops = body
        .filter_map(|op| {
            let loc = (path, op.as_span());
            validate_op(path, errs, op).map(|op| (op, loc))
        })
        .collect::<Vec<_>>();
    Block { name, ops }
}

/// Contents of a `name`: an identifier as is, or the inside of quotes
fn read_name<'i>(pair: Pair<'i>) -> &'i str {
    let inner = subrule!(pair);
    match inner.as_rule() {
        Rule::identifier => inner.as_str(),
        Rule::quoted => read_quoted(inner),
        _ => unreachable!(),
    }
}

fn read_quoted<'i>(pair: Pair<'i>) -> &'i str {
    subrule!(pair).as_str()
}

fn validate_op<'i>(path: &'i str, errs: &mut error::Record, pair: Pair<'i>) -> Option<Op<'i>> {
    let loc = (path, pair.as_span());
    let rule = pair.as_rule();
    let (amount, mut rest) = decapitate!(pair);
    assert_eq!(amount.as_rule(), Rule::money_amount);
    let amount = validate_amount(path, errs, amount)?;
    if amount.is_negative() && rule != Rule::deposit {
        errs.make("Negative amount")
            .nonfatal()
            .span(&loc, format!("{} is negative", amount))
            .text("Money will flow in the opposite direction")
            .hint("use a positive amount, or a deposit");
    }
    Some(match rule {
        Rule::deposit => Op::Deposit(amount, rest.next().map(read_quoted).unwrap_or("")),
        Rule::withdraw => Op::Withdraw(amount, rest.next().map(read_quoted).unwrap_or("")),
        Rule::transfer => {
            let target = rest.next().unwrap_or_else(|| panic!("No target"));
            Op::Transfer(amount, read_name(target))
        }
        _ => unreachable!(),
    })
}

fn validate_amount(path: &str, errs: &mut error::Record, pair: Pair) -> Option<Amount> {
    let loc = (path, pair.as_span());
    match pair.as_str().parse::<Amount>() {
        Ok(amount) => Some(amount),
        Err(e) => {
            errs.make("Invalid amount")
                .span(&loc, e)
                .text("Amounts are in cents precision, e.g. 105.55")
                .hint("round to at most two decimal places");
            None
        }
    }
}

#[cfg(test)]
#[rustfmt::skip]
mod test {
    use super::*;

    macro_rules! amt {
        ( $s:expr ) => { $s.parse::<Amount>().unwrap() };
    }

    fn ops<'i>(block: &Block<'i>) -> Vec<Op<'i>> {
        block.ops.iter().map(|(op, _)| *op).collect()
    }

    #[test]
    fn blocks_and_operations() {
        let text = r#"
            // monthly budget
            Food {
                deposit 1000 "initial deposit";
                withdraw 10.15 "groceries";
                withdraw 15.89;
                transfer 50 to Clothing; // new shoes
            }
            "Auto Loan" {}
            Clothing {
                deposit -2.5 "refund gone wrong";
                transfer 1 to "Auto Loan";
            }
        "#;
        let mut errs = error::Record::new();
        let ast = extract("test.tly", &mut errs, text);
        assert!(errs.is_empty(), "{}", errs);
        assert_eq!(ast.len(), 3);
        assert_eq!(ast[0].name, "Food");
        assert_eq!(ops(&ast[0]), vec![
            Op::Deposit(amt!("1000"), "initial deposit"),
            Op::Withdraw(amt!("10.15"), "groceries"),
            Op::Withdraw(amt!("15.89"), ""),
            Op::Transfer(amt!("50"), "Clothing"),
        ]);
        assert_eq!(ast[1].name, "Auto Loan");
        assert!(ast[1].ops.is_empty());
        assert_eq!(ops(&ast[2]), vec![
            Op::Deposit(amt!("-2.5"), "refund gone wrong"),
            Op::Transfer(amt!("1"), "Auto Loan"),
        ]);
        assert_eq!(ast[0].ops[1].1.1.as_str(), "withdraw 10.15 \"groceries\";");
    }

    #[test]
    fn empty_file() {
        let mut errs = error::Record::new();
        assert!(extract("test.tly", &mut errs, "  // nothing\n").is_empty());
        assert!(errs.is_empty());
    }

    macro_rules! fails {
        ( $text:expr => $label:expr ) => {{
            let mut errs = error::Record::new();
            let _ = extract("test.tly", &mut errs, $text);
            assert!(errs.is_fatal(), "{} should be rejected", $text);
            let fmt = format!("{:?}", errs);
            assert!(fmt.contains($label), "{} should contain {}", fmt, $label);
        }};
    }

    #[test]
    fn rejected() {
        fails!("Food { deposit 1.234; }" => "Invalid amount");
        fails!("Food { deposit 99999999999999999999; }" => "Invalid amount");
        fails!("Food { deposit 92233720368547.76; }" => "Invalid amount");
        fails!("Food { deposit 12 }" => "Parsing failure");
        fails!("Food { spend 12; }" => "Parsing failure");
        fails!("Food { transfer 12 Auto; }" => "Parsing failure");
        fails!("Food deposit 12;" => "Parsing failure");
        fails!("\"Food { }" => "Parsing failure");
    }

    #[test]
    fn negative_withdrawal_warns() {
        let mut errs = error::Record::new();
        let ast = extract("test.tly", &mut errs, "Food { withdraw -5; }");
        assert!(!errs.is_fatal());
        assert_eq!(errs.count_warnings(), 1);
        assert_eq!(ops(&ast[0]), vec![Op::Withdraw(amt!("-5"), "")]);
    }
}
