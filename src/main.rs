//! Premium Quote CLI
//!
//! Prices a quotation from a JSON state file and optionally writes its
//! premium illustration and account-value projections.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::Parser;

use premium_quote::calc::{format_vnd, format_vnd_with_unit};
use premium_quote::engine::loader::load_state;
use premium_quote::{build_illustration, Catalog, QuoteConfig, QuoteEngine, RateTables, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "premium_quote", version, about = "Price an insurance quotation")]
struct Args {
    /// Quotation state JSON file
    #[arg(short, long)]
    state: PathBuf,

    /// Directory holding projection CSV tables (built-in tables if omitted)
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Product catalog JSON file (built-in catalog if omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Date ages are computed at, YYYY-MM-DD (today if omitted)
    #[arg(long)]
    reference_date: Option<NaiveDate>,

    /// Build the year-by-year premium illustration
    #[arg(long)]
    illustration: bool,

    /// Run account-value projections for investment-linked products
    #[arg(long)]
    projection: bool,

    /// Write the illustration as CSV to this file
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match args.reference_date {
        Some(date) => QuoteConfig::with_reference_date(date),
        None => QuoteConfig::default(),
    };
    let reference = config.reference_date;

    let tables = match &args.tables {
        Some(dir) => RateTables::from_csv_path(dir)
            .with_context(|| format!("loading tables from {}", dir.display()))?,
        None => RateTables::default_pricing(),
    };
    let catalog = match &args.catalog {
        Some(path) => Catalog::from_json_file(path)
            .map_err(|e| anyhow::anyhow!("loading catalog {}: {}", path.display(), e))?,
        None => Catalog::standard(),
    };
    let engine = QuoteEngine::new(catalog, tables, config);

    let mut state = load_state(&args.state)
        .map_err(|e| anyhow::anyhow!("loading state {}: {}", args.state.display(), e))?;
    state.resolve_ages(reference);

    println!("Premium Quote v{}", env!("CARGO_PKG_VERSION"));
    println!("==================\n");
    println!("Reference date: {}", reference.format("%d/%m/%Y"));
    println!("Main product:   {}", state.main_product.as_deref().unwrap_or("-"));
    println!();

    let fees = engine.calculate_all(&state);

    println!("{:<10} {:>4} {:>16} {:>16} {:>16}", "Person", "Age", "Main", "Riders", "Total");
    println!("{}", "-".repeat(66));
    for person in &state.persons {
        let Some(person_fees) = fees.by_person.get(&person.id) else {
            continue;
        };
        println!(
            "{:<10} {:>4} {:>16} {:>16} {:>16}",
            person.id,
            person.age,
            format_vnd(person_fees.main),
            format_vnd(person_fees.supp),
            format_vnd(person_fees.total),
        );
        for (rider, premium) in &person_fees.supp_details {
            println!("  {:<20} {:>16}", rider, format_vnd(*premium));
        }
    }
    for (product, detail) in &fees.waiver_details {
        println!(
            "Waiver {:<12} on {:<8} base {:>16} premium {:>14}",
            product,
            detail.target_person,
            format_vnd(detail.stbh_base),
            format_vnd(detail.premium),
        );
    }

    println!("\nSummary:");
    println!("  Base main premium: {}", format_vnd_with_unit(fees.base_main));
    println!("  Extra premium:     {}", format_vnd_with_unit(fees.extra));
    println!("  Supplements:       {}", format_vnd_with_unit(fees.total_supp));
    println!("  Total:             {}", format_vnd_with_unit(fees.total));

    if args.illustration || args.output.is_some() {
        let illustration = build_illustration(&engine, &state, &fees).context("building illustration")?;
        println!(
            "\nIllustration: ages {} to {}, {} rows, total {}",
            illustration.term.start_age,
            illustration.term.end_age,
            illustration.rows.len(),
            format_vnd_with_unit(illustration.totals.total),
        );

        match &args.output {
            Some(path) => {
                let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
                illustration
                    .write_csv(file)
                    .map_err(|e| anyhow::anyhow!("writing {}: {}", path.display(), e))?;
                println!("Illustration written to: {}", path.display());
            }
            None => {
                for row in illustration.rows.iter().take(10) {
                    println!("  Year {:>3} age {:>3}: {:>16}", row.year, row.age, format_vnd(row.total));
                }
                if illustration.rows.len() > 10 {
                    println!("  ... ({} more years)", illustration.rows.len() - 10);
                }
            }
        }
    }

    if args.projection {
        let runner = ScenarioRunner::with_tables(engine.tables().clone());
        match runner.project_quote(&engine, &state, false).context("projecting account value")? {
            Some(set) => {
                println!("\nAccount value projection ({}):", set.guaranteed.product_id);
                println!("{:>4} {:>4} {:>18} {:>18} {:>18}", "PY", "Age", "Guaranteed", "Custom capped", "Custom");
                let rows = set
                    .guaranteed
                    .year_end
                    .iter()
                    .zip(&set.custom_capped.year_end)
                    .zip(&set.custom_full.year_end);
                for ((g, capped), full) in rows {
                    println!(
                        "{:>4} {:>4} {:>18} {:>18} {:>18}",
                        g.policy_year,
                        g.attained_age,
                        format_vnd(g.account_value),
                        format_vnd(capped.account_value),
                        format_vnd(full.account_value),
                    );
                }
            }
            None => println!("\nMain product has no account value to project"),
        }
    }

    Ok(())
}
