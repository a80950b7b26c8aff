//! Pretty-printing facility for script diagnostics
//!
//! Source excerpts are rendered by `pest::error::Error`, this module only
//! aggregates messages and colors them.
//!
//! # Example
//!
//! ```rust
//! errs.make("Insufficient funds")
//!     .nonfatal()
//!     .span(&loc, "'Food' only has 12.50")
//!     .text("The operation was skipped")
//!     .hint("deposit more before this point")
//! ```
//!
//! ```txt
//! --> Warning: Insufficient funds
//!  |    --> demos/budget.tly:4:5
//!  |     |
//!  |   4 |     withdraw 20 "groceries";
//!  |     |     ^----------------------^
//!  |     |
//!  |     = 'Food' only has 12.50
//!  |  The operation was skipped
//!  |      ? hint: deposit more before this point
//! ```

use std::fmt;

use crate::load::parse::Rule;

/// Location of an error: file name and span within that file
pub type Loc<'i> = (&'i str, pest::Span<'i>);

/// Report for a single error
///
/// All messages (`label` passed to `make`, arguments of `text`
/// and `hint`) should fit in a single line.
#[derive(Debug)]
pub struct Error {
    /// warning (yellow) or error (red)
    fatal: bool,
    label: String,
    items: Vec<Item>,
}

/// Kinds of items that can be added to an error report
#[derive(Debug)]
enum Item {
    /// source excerpt
    Block(pest::error::Error<Rule>),
    /// important message
    Text(String),
    /// recommendation for a fix
    Hint(String),
}

/// A collection of errors, typically everything detected in one file
#[must_use]
#[derive(Debug, Default)]
pub struct Record {
    contents: Vec<Error>,
}

impl Error {
    fn new<S>(msg: S) -> Self
    where
        S: ToString,
    {
        Self {
            fatal: true,
            label: msg.to_string(),
            items: Vec::new(),
        }
    }

    /// Wrap a parsing failure
    pub fn from(&mut self, err: pest::error::Error<Rule>) -> &mut Self {
        self.items.push(Item::Block(err.renamed_rules(rule_rename)));
        self
    }

    /// Mark as a warning rather than a fatal error
    pub fn nonfatal(&mut self) -> &mut Self {
        self.fatal = false;
        self
    }

    /// Add a source excerpt and its associated message
    pub fn span<S>(&mut self, loc: &Loc, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Block(
            pest::error::Error::new_from_span(
                pest::error::ErrorVariant::CustomError {
                    message: msg.to_string(),
                },
                loc.1.clone(),
            )
            .with_path(loc.0),
        ));
        self
    }

    /// Add an important note
    pub fn text<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Text(msg.to_string()));
        self
    }

    /// Add a hint on how to fix
    pub fn hint<S>(&mut self, msg: S) -> &mut Self
    where
        S: ToString,
    {
        self.items.push(Item::Hint(msg.to_string()));
        self
    }
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new report, fatal unless marked otherwise
    pub fn make<S>(&mut self, msg: S) -> &mut Error
    where
        S: ToString,
    {
        self.contents.push(Error::new(msg));
        let last = self.contents.len() - 1;
        &mut self.contents[last]
    }

    pub fn is_fatal(&self) -> bool {
        self.count_errors() > 0
    }

    pub fn count_errors(&self) -> usize {
        self.contents.iter().filter(|e| e.fatal).count()
    }

    pub fn count_warnings(&self) -> usize {
        self.contents.len() - self.count_errors()
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}

const RED: &str = "\x1b[0;91;1m";
const YELLOW: &str = "\x1b[0;93;1m";
const BLUE: &str = "\x1b[0;96;1m";
const WHITE: &str = "\x1b[0;1m";
const NONE: &str = "\x1b[0m";

/// At most this many reports are printed
const SHOWN: usize = 10;

/// Copy a pest excerpt, coloring its gutter in blue and its carets like the report
fn excerpt(f: &mut fmt::Formatter<'_>, color: &str, err: &pest::error::Error<Rule>) -> fmt::Result {
    for line in err.to_string().replace('␊', "").lines() {
        write!(f, " {}|  ", color)?;
        let gutter = if line.trim_start().starts_with("-->") {
            None
        } else {
            line.find(|c: char| c == '|' || c == '=')
        };
        match gutter {
            Some(end) => {
                let (gutter, body) = line.split_at(end + 1);
                let body_color = if body.contains('^') { color } else { NONE };
                writeln!(f, "{}{}{}{}{}", BLUE, gutter, body_color, body, NONE)?;
            }
            None => writeln!(f, "{}{}{}", BLUE, line, NONE)?,
        }
    }
    Ok(())
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (color, kind) = if self.fatal {
            (RED, "Error")
        } else {
            (YELLOW, "Warning")
        };
        writeln!(f, "{}--> {}:{} {}{}", color, kind, WHITE, self.label, NONE)?;
        for item in &self.items {
            match item {
                Item::Block(err) => excerpt(f, color, err)?,
                Item::Text(txt) => writeln!(f, " {}|  {}{}{}", color, WHITE, txt, NONE)?,
                Item::Hint(txt) => writeln!(f, " {}|      {}? hint: {}{}", color, BLUE, NONE, txt)?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for Record {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // warnings are hidden once there is a fatal error
        let fatal = self.is_fatal();
        let shown = self
            .contents
            .iter()
            .filter(|err| err.fatal == fatal)
            .collect::<Vec<_>>();
        if shown.is_empty() {
            return Ok(());
        }
        let (color, severity, noun) = if fatal {
            (RED, "Fatal", "error")
        } else {
            (YELLOW, "Nonfatal", "warning")
        };
        for err in shown.iter().take(SHOWN) {
            writeln!(f, "{}", err)?;
        }
        if shown.len() > SHOWN {
            writeln!(f, "{} And {} more.", color, shown.len() - SHOWN)?;
        }
        let plural = if shown.len() > 1 { "s" } else { "" };
        writeln!(
            f,
            "{}{}: {}{} {}{} emitted{}",
            color,
            severity,
            WHITE,
            shown.len(),
            noun,
            plural,
            NONE
        )
    }
}

/// Describe grammar rules in terms a script author understands
fn rule_rename(r: &Rule) -> String {
    let descr = match r {
        Rule::EOI => "EOF",
        Rule::money_amount => "a monetary value ('XXX.XX')",
        Rule::string => "a string of non-'\"' characters",
        Rule::quoted => "a quoted text ('\"foo\"')",
        Rule::identifier => "an identifier composed of a..zA..Z0..9-_",
        Rule::name => "a category name (identifier or quoted text)",
        Rule::deposit => "a deposit ('deposit AMOUNT \"description\";')",
        Rule::withdraw => "a withdrawal ('withdraw AMOUNT \"description\";')",
        Rule::transfer => "a transfer ('transfer AMOUNT to NAME;')",
        Rule::block => "a category block ('NAME { ... }')",
        // silent rules never appear in a report
        _ => "a token",
    };
    descr.to_string()
}
