use anyhow::Context;
use clap::Parser;
use std::collections::BTreeMap;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use carsift::{filter, limit, load_or_tokenize, order, render, Criteria, Exchange};

#[derive(Parser)]
#[command(name = "carsift")]
#[command(about = "Search car listing CSV exports by typed criteria")]
#[command(version = "0.3.0")]
struct Args {
    /// Vehicle manufacturer
    #[arg(long)]
    brand: Option<String>,

    /// Vehicle model
    #[arg(long)]
    model: Option<String>,

    /// Minimal price in USD
    #[arg(long)]
    price_from: Option<u32>,

    /// Maximal price in USD
    #[arg(long)]
    price_to: Option<u32>,

    /// Build year from
    #[arg(long)]
    year_from: Option<u16>,

    /// Build year to
    #[arg(long)]
    year_to: Option<u16>,

    /// Type of transmission
    #[arg(long)]
    transmission: Option<String>,

    /// Minimal engine volume in cm^3
    #[arg(long)]
    engine_from: Option<u32>,

    /// Maximal engine volume in cm^3
    #[arg(long)]
    engine_to: Option<u32>,

    /// Type of fuel
    #[arg(long)]
    fuel: Option<String>,

    /// Maximal mileage in km
    #[arg(long)]
    mileage: Option<u32>,

    /// Type of body
    #[arg(long)]
    body: Option<String>,

    /// Ready to exchange
    #[arg(long, value_enum)]
    exchange: Option<Exchange>,

    /// Independent keywords separated by commas, searched anywhere in the ad
    #[arg(long)]
    keywords: Option<String>,

    /// Maximal number of records output
    #[arg(long, default_value_t = 20)]
    max_records: i64,

    /// Path to the file with data
    #[arg(long, default_value = "data/cars-av-by_card_v3.csv")]
    file: PathBuf,

    /// Show processing details
    #[arg(long)]
    debug: bool,
}

impl Args {
    fn criteria(&self) -> Criteria {
        Criteria {
            brand: self.brand.clone(),
            model: self.model.clone(),
            price_from: self.price_from,
            price_to: self.price_to,
            year_from: self.year_from,
            year_to: self.year_to,
            transmission: self.transmission.clone(),
            engine_from: self.engine_from,
            engine_to: self.engine_to,
            fuel: self.fuel.clone(),
            mileage_max: self.mileage,
            body: self.body.clone(),
            exchange: self.exchange,
            keywords: self.keywords.clone(),
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(e) = run(args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let criteria = args.criteria();
    criteria.validate()?;

    let report = load_or_tokenize(&args.file)
        .with_context(|| format!("failed to load data from '{}'", args.file.display()))?;

    // One stderr summary for dropped rows; per-row detail only with --debug.
    if report.stats.rows_dropped() > 0 {
        let mut by_field: BTreeMap<&str, usize> = BTreeMap::new();
        for drop in &report.stats.drops {
            *by_field.entry(drop.error.field).or_default() += 1;
        }
        let summary: Vec<String> = by_field
            .iter()
            .map(|(field, count)| format!("{}: {}", field, count))
            .collect();
        eprintln!(
            "carsift: warning: {} rows dropped during tokenization ({})",
            report.stats.rows_dropped(),
            summary.join(", ")
        );
        if args.debug {
            for drop in &report.stats.drops {
                eprintln!("carsift: line {}: {}", drop.line, drop.error);
            }
        }
    }

    let loaded = report.records.len();
    let mut result = filter(report.records, &criteria);
    let matched = result.len();
    order(&mut result);
    let result = limit(result, args.max_records);

    let stdout = io::stdout();
    let mut output = io::BufWriter::new(stdout.lock());
    render::write_table(&mut output, &result)?;
    output.flush()?;

    if args.debug {
        eprintln!("Final statistics:");
        eprintln!(
            "  Source: {} ({})",
            args.file.display(),
            if report.from_cache {
                "cache hit"
            } else {
                "tokenized"
            }
        );
        eprintln!("  Cache file: {}", report.cache_path.display());
        eprintln!("  Records loaded: {}", loaded);
        eprintln!("  Records matched: {}", matched);
        eprintln!("  Records shown: {}", result.len());
        eprintln!("  Processing time: {:?}", start_time.elapsed());
    }

    Ok(())
}
