pub mod error;
pub mod parse;
pub mod replay;

use log::info;

use crate::lib::category::Category;

/// Read categories from the script `filename`
///
/// Success is determined by `errs`, see `read_str`.
pub fn read_categories(filename: &str, errs: &mut error::Record) -> Option<Vec<Category>> {
    let contents = match std::fs::read_to_string(filename) {
        Ok(contents) => contents,
        Err(e) => {
            errs.make("File not found")
                .text(format!("Initial file loaded is '{}'", filename))
                .text(e)
                .hint("pass the script as first argument");
            return None;
        }
    };
    read_str(filename, errs, &contents)
}

/// Parse and replay `contents`, known as `path` in diagnostics
///
/// Returns `None` on fatal errors; warnings may be recorded either way.
pub fn read_str(path: &str, errs: &mut error::Record, contents: &str) -> Option<Vec<Category>> {
    let ast = parse::extract(path, errs, contents);
    if errs.is_fatal() {
        return None;
    }
    info!("'{}' describes {} blocks", path, ast.len());
    replay::replay(errs, ast)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_file() {
        let mut errs = error::Record::new();
        assert!(read_categories("does/not/exist.tly", &mut errs).is_none());
        assert!(errs.is_fatal());
    }

    #[test]
    fn parse_errors_stop_early() {
        let mut errs = error::Record::new();
        assert!(read_str("test.tly", &mut errs, "Food { deposit 5 }").is_none());
        assert_eq!(errs.count_errors(), 1);
    }

    #[test]
    fn huge_amounts_are_rejected() {
        let mut errs = error::Record::new();
        assert!(read_str("test.tly", &mut errs, "A { deposit 92233720368547758; deposit 1; }").is_none());
        assert!(format!("{:?}", errs).contains("Invalid amount"));
        let mut errs = error::Record::new();
        let text = "A { deposit 10000000000000; withdraw 10000000000000; }";
        let cats = read_str("test.tly", &mut errs, text).unwrap();
        assert_eq!(cats[0].balance().cents(), 0);
        let chart = crate::cli::chart::create_spend_chart(&cats).unwrap();
        assert!(chart.starts_with("Percentage spent by category\n100| o  \n"));
    }

    #[test]
    fn demo_script() {
        let mut errs = error::Record::new();
        let contents = include_str!("../../demos/budget.tly");
        let cats = read_str("budget.tly", &mut errs, contents).unwrap();
        assert!(errs.is_empty(), "{}", errs);
        assert_eq!(cats.len(), 3);
        assert!(crate::cli::chart::create_spend_chart(&cats).is_ok());
    }
}
