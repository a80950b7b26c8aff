//! Text bar chart of how spending splits across categories
//!
//! ```txt
//! Percentage spent by category
//! 100|
//!  90|
//!  80|
//!  70|
//!  60| o
//!  50| o
//!  40| o
//!  30| o  o
//!  20| o  o
//!  10| o  o
//!   0| o  o  o
//!     ----------
//!      F  C  A
//!      o  l  u
//!      o  o  t
//!      d  t  o
//!         h
//!         i
//!         n
//!         g
//! ```

use num_traits::Zero;
use std::fmt;

use crate::lib::{amount::Amount, category::Category};

const TITLE: &str = "Percentage spent by category";
const MARGIN: &str = "    ";
const RULE: &str = "----------";

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ChartError {
    /// Percentages are undefined when nothing was spent at all
    #[error("no category has any spending, percentages are undefined")]
    NoSpending,
}

/// One column of the chart
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bar {
    pub name: String,
    pub spent: Amount,
    /// Share of the total, rounded down to a multiple of 10
    pub percent: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpendChart {
    bars: Vec<Bar>,
}

impl SpendChart {
    /// Compute the share of spending of each category
    ///
    /// An empty slice gives a chart with no columns; a non-empty slice in
    /// which nothing was spent is rejected.
    pub fn from(data: &[Category]) -> Result<Self, ChartError> {
        let spent = data.iter().map(Category::spent).collect::<Vec<_>>();
        let total = spent.iter().sum::<Amount>();
        if !data.is_empty() && total.is_zero() {
            return Err(ChartError::NoSpending);
        }
        let bars = data
            .iter()
            .zip(spent)
            .map(|(cat, spent)| Bar {
                name: cat.name().to_string(),
                spent,
                percent: bucket(spent, total),
            })
            .collect();
        Ok(Self { bars })
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn total(&self) -> Amount {
        self.bars.iter().map(|b| b.spent).sum()
    }
}

/// `floor(10 * part / total) * 10`, exact since both are in cents
///
/// Computed in `i128`, which holds ten times any pair of `i64` cents.
fn bucket(part: Amount, total: Amount) -> u8 {
    if total.is_zero() {
        return 0;
    }
    // part <= total, so this is at most 10
    let tenths = i128::from(part.cents()) * 10 / i128::from(total.cents());
    tenths as u8 * 10
}

/// Render the chart for `categories` as a string with no trailing newline
pub fn create_spend_chart(categories: &[Category]) -> Result<String, ChartError> {
    SpendChart::from(categories).map(|chart| chart.to_string())
}

impl fmt::Display for SpendChart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", TITLE)?;
        for threshold in (0..=100).rev().step_by(10) {
            write!(f, "{:>3}|", threshold)?;
            for bar in &self.bars {
                let mark = if bar.percent >= threshold { " o " } else { "   " };
                write!(f, "{}", mark)?;
            }
            writeln!(f, " ")?;
        }
        write!(f, "{}{}", MARGIN, RULE)?;
        // names are written vertically, padded to the longest one
        let names = self
            .bars
            .iter()
            .map(|b| b.name.chars().collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let height = names.iter().map(Vec::len).max().unwrap_or(0);
        for row in 0..height {
            write!(f, "\n{}", MARGIN)?;
            for name in &names {
                write!(f, " {} ", name.get(row).copied().unwrap_or(' '))?;
            }
            write!(f, " ")?;
        }
        Ok(())
    }
}
