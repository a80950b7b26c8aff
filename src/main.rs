mod cli;
mod lib;
mod load;

use cli::{
    chart::{create_spend_chart, SpendChart},
    plot::Plotter,
};

fn main() {
    env_logger::init();
    let mut args = std::env::args().skip(1);
    let filename = args.next().unwrap_or_else(|| "budget.tly".to_string());
    let plot = args.next();

    let mut errs = load::error::Record::new();
    let categories = load::read_categories(&filename, &mut errs);
    if !errs.is_empty() {
        print!("{}", errs);
    }
    let categories = match categories {
        Some(categories) => categories,
        None => std::process::exit(1),
    };
    for cat in &categories {
        println!("{}\n", cat);
    }
    match create_spend_chart(&categories) {
        Ok(chart) => println!("{}", chart),
        Err(e) => println!("No chart: {}", e),
    }
    if let Some(file) = plot {
        // chart errors were already reported above
        if let Ok(chart) = SpendChart::from(&categories) {
            if let Err(e) = Plotter::from(&chart).render(&file) {
                eprintln!("Could not write '{}': {}", file, e);
                std::process::exit(1);
            }
        }
    }
}
