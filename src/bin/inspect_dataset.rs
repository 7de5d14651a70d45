use anyhow::Result;
use clap::Parser;
use covidmap::store::load_dataset;
use std::{cmp::Ordering, path::PathBuf};

#[derive(Parser)]
#[command(about = "Summarise a cleaned COVID-19 dataset file")]
struct Args {
    /// Path to the dataset written by `covidmap`
    path: PathBuf,
    /// How many countries to list, by total cases
    #[arg(long, default_value_t = 10)]
    top: usize,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let ds = load_dataset(&args.path)?;

    println!("=== Dataset: {} ===", args.path.display());
    println!("Countries:            {}", ds.len());
    println!("Columns:              {}", ds.headers.len());
    for h in &ds.headers {
        println!("- {}", h);
    }
    println!();

    // Unparseable counts sort last.
    let mut ranked: Vec<_> = ds.records.iter().collect();
    ranked.sort_by(|a, b| match (a.total_cases_value(), b.total_cases_value()) {
        (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    println!("=== Top {} by total cases ===", args.top);
    println!("{:<30} | {:>12} | {:>10}", "Country", "TotalCases", "Deaths");
    for r in ranked.into_iter().take(args.top) {
        println!(
            "{:<30} | {:>12} | {:>10}",
            r.country, r.total_cases, r.total_deaths
        );
    }
    Ok(())
}
