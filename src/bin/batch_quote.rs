//! Price a batch of quotations in parallel
//!
//! Reads a JSON array of quotation states and writes one CSV row of
//! first-year fees per state.

use std::fs::File;
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use rayon::prelude::*;

use premium_quote::engine::loader::load_states;
use premium_quote::{FeeBreakdown, QuoteConfig, QuoteEngine};

#[derive(Parser, Debug)]
#[command(name = "batch_quote", about = "Price a JSON array of quotation states")]
struct Args {
    /// JSON file with an array of quotation states
    #[arg(short, long, default_value = "data/sample_batch.json")]
    input: PathBuf,

    /// CSV file to write
    #[arg(short, long, default_value = "batch_quotes.csv")]
    output: PathBuf,

    /// Date ages are computed at, YYYY-MM-DD (today if omitted)
    #[arg(long)]
    reference_date: Option<NaiveDate>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match args.reference_date {
        Some(date) => QuoteConfig::with_reference_date(date),
        None => QuoteConfig::default(),
    };
    let reference = config.reference_date;
    let engine = QuoteEngine::standard(config);

    let start = Instant::now();
    let mut states = load_states(&args.input)
        .map_err(|e| anyhow::anyhow!("loading {}: {}", args.input.display(), e))?;
    println!("Loaded {} quotations in {:?}", states.len(), start.elapsed());

    let calc_start = Instant::now();
    let results: Vec<FeeBreakdown> = states
        .par_iter_mut()
        .map(|state| {
            state.resolve_ages(reference);
            engine.calculate_all(state)
        })
        .collect();
    println!("Priced {} quotations in {:?}", results.len(), calc_start.elapsed());

    let file = File::create(&args.output).with_context(|| format!("creating {}", args.output.display()))?;
    let mut wtr = csv::Writer::from_writer(file);
    wtr.write_record(["index", "main_product", "base_main", "extra", "total_supp", "total"])?;
    for (i, (state, fees)) in states.iter().zip(&results).enumerate() {
        wtr.write_record([
            i.to_string(),
            state.main_product.clone().unwrap_or_default(),
            fees.base_main.to_string(),
            fees.extra.to_string(),
            fees.total_supp.to_string(),
            fees.total.to_string(),
        ])?;
    }
    wtr.flush()?;

    let grand_total: u64 = results.iter().map(|f| f.total).sum();
    println!("Total first-year premium: {}", premium_quote::calc::format_vnd_with_unit(grand_total));
    println!("Results written to: {}", args.output.display());
    println!("Total time: {:?}", start.elapsed());

    Ok(())
}
