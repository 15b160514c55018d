//! Year-by-year premium schedule

use std::collections::BTreeMap;
use std::error::Error;
use std::io::Write;

use serde::Serialize;

use crate::calc::Vnd;
use crate::customer::{calculate_age, parse_date_of_birth, Person};
use crate::engine::{FeeBreakdown, MainPayment, PricingMode, QuoteEngine, QuoteState, WaiverTarget};
use crate::error::{QuoteError, Result};

use super::target_age::{resolve_term, TermResolution};

/// One policy year
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IllustrationRow {
    pub year: u32,
    /// Main insured's attained age
    pub age: u32,
    pub main_premium: Vnd,
    pub extra_premium: Vnd,
    /// Rider id -> premium over all persons
    pub rider_premiums: BTreeMap<String, Vnd>,
    pub waiver_premium: Vnd,
    pub total: Vnd,
}

/// Column sums over every row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct IllustrationTotals {
    pub main_premium: Vnd,
    pub extra_premium: Vnd,
    pub rider_premiums: BTreeMap<String, Vnd>,
    pub waiver_premium: Vnd,
    pub total: Vnd,
}

impl IllustrationTotals {
    fn add(&mut self, row: &IllustrationRow) {
        self.main_premium += row.main_premium;
        self.extra_premium += row.extra_premium;
        for (id, premium) in &row.rider_premiums {
            *self.rider_premiums.entry(id.clone()).or_insert(0) += *premium;
        }
        self.waiver_premium += row.waiver_premium;
        self.total += row.total;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Illustration {
    pub product_id: String,
    pub term: TermResolution,
    pub rows: Vec<IllustrationRow>,
    pub totals: IllustrationTotals,
}

impl Illustration {
    /// Every rider that appears in any row, in id order
    pub fn rider_columns(&self) -> Vec<String> {
        let mut columns: Vec<String> = self.totals.rider_premiums.keys().cloned().collect();
        columns.sort();
        columns
    }

    /// Write the schedule as CSV with one column per rider and a totals row
    pub fn write_csv<W: Write>(&self, writer: W) -> std::result::Result<(), Box<dyn Error>> {
        let columns = self.rider_columns();
        let mut wtr = csv::Writer::from_writer(writer);

        let mut header = vec!["year".to_string(), "age".to_string(), "main".to_string(), "extra".to_string()];
        header.extend(columns.iter().cloned());
        header.extend(["waiver".to_string(), "total".to_string()]);
        wtr.write_record(&header)?;

        let rider_cells = |premiums: &BTreeMap<String, Vnd>| {
            columns
                .iter()
                .map(|c| premiums.get(c).copied().unwrap_or(0).to_string())
                .collect::<Vec<_>>()
        };

        for row in &self.rows {
            let mut record = vec![
                row.year.to_string(),
                row.age.to_string(),
                row.main_premium.to_string(),
                row.extra_premium.to_string(),
            ];
            record.extend(rider_cells(&row.rider_premiums));
            record.extend([row.waiver_premium.to_string(), row.total.to_string()]);
            wtr.write_record(&record)?;
        }

        let totals = &self.totals;
        let mut record = vec![
            "total".to_string(),
            String::new(),
            totals.main_premium.to_string(),
            totals.extra_premium.to_string(),
        ];
        record.extend(rider_cells(&totals.rider_premiums));
        record.extend([totals.waiver_premium.to_string(), totals.total.to_string()]);
        wtr.write_record(&record)?;

        wtr.flush()?;
        Ok(())
    }
}

/// Every date of birth in the quotation must be a real `DD/MM/YYYY` date
fn validate_dates_of_birth(state: &QuoteState) -> Result<()> {
    for person in &state.persons {
        parse_date_of_birth(&person.date_of_birth)?;
    }
    if let Some(selection) = &state.waiver {
        if let WaiverTarget::Other { person } = &selection.target {
            parse_date_of_birth(&person.date_of_birth)?;
        }
    }
    Ok(())
}

/// Build the premium schedule for a quotation
///
/// Fails before any pricing on a bad date of birth, an unknown main
/// product, a missing main insured or an unresolvable term. Main premium
/// and top-up are taken from `fees` and paid while the year is within the
/// payment term. Riders and waivers are repriced each year at attained
/// age and drop out past their renewal age.
pub fn build_illustration(engine: &QuoteEngine, state: &QuoteState, fees: &FeeBreakdown) -> Result<Illustration> {
    validate_dates_of_birth(state)?;

    let product_id = state.main_product.clone().unwrap_or_default();
    let product = engine
        .catalog()
        .get(&product_id)
        .filter(|p| p.is_main())
        .ok_or_else(|| QuoteError::UnknownMainProduct(product_id.clone()))?;
    let main_person = state.main_person().ok_or(QuoteError::MissingMainInsured)?;

    let reference = engine.config().reference_date;
    let start_age = calculate_age(&main_person.date_of_birth, reference)?;
    let term = resolve_term(product, start_age, &state.main_inputs)?;

    let mut resolved = state.clone();
    resolved.resolve_ages(reference);
    let target = resolved.waiver_target();

    let mut rows = Vec::with_capacity(term.years() as usize);
    let mut totals = IllustrationTotals::default();

    for year in 1..=term.years() {
        let offset = year - 1;
        let paying = year <= term.payment_term;
        let payment = MainPayment {
            level: fees.base_main,
            paid: if paying { fees.base_main } else { 0 },
            extra: if paying { fees.extra } else { 0 },
        };
        let mode = if year == 1 {
            PricingMode::NewBusiness
        } else {
            PricingMode::Renewal
        };

        let persons: Vec<Person> = resolved.persons.iter().map(|p| p.aged(offset)).collect();
        let aged_target = target.as_ref().map(|t| t.aged(offset));
        let year_fees = engine.price_year(&resolved, &persons, aged_target.as_ref(), payment, mode);

        let rider_premiums = year_fees.rider_totals();
        let waiver_premium = year_fees.waiver_total();
        let row = IllustrationRow {
            year,
            age: term.start_age + offset,
            main_premium: payment.paid,
            extra_premium: payment.extra,
            total: payment.paid + payment.extra + rider_premiums.values().sum::<Vnd>() + waiver_premium,
            rider_premiums,
            waiver_premium,
        };
        totals.add(&row);
        rows.push(row);
    }

    log::info!(
        "Illustration for {}: {} rows, ages {}-{}, total {}",
        product_id,
        rows.len(),
        term.start_age,
        term.end_age,
        totals.total
    );

    Ok(Illustration {
        product_id,
        term,
        rows,
        totals,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::calc::MainInputs;
    use crate::customer::{Gender, HealthProgram, HealthScope, RiderInput};
    use crate::engine::{QuoteConfig, WaiverSelection};

    fn engine() -> QuoteEngine {
        QuoteEngine::standard(QuoteConfig::with_reference_date(NaiveDate::from_ymd_opt(2025, 6, 15).unwrap()))
    }

    fn person(id: &str, dob: &str, gender: Gender, is_main: bool) -> Person {
        let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        Person::from_date_of_birth(id, id, dob, gender, 1, is_main, reference).unwrap()
    }

    /// Main insured aged 55, payment term 10, illustrated to 70
    fn state() -> QuoteState {
        QuoteState {
            persons: vec![
                person("p1", "01/01/1970", Gender::Male, true)
                    .with_rider("bhn", RiderInput::with_stbh(100_000_000))
                    .with_rider("accident", RiderInput::with_stbh(100_000_000)),
                person("p2", "01/01/1975", Gender::Female, false).with_rider(
                    "health_scl",
                    RiderInput::health(HealthProgram::Basic, HealthScope::Domestic, false, false),
                ),
            ],
            main_product: Some("KHOE_TRON_VEN".to_string()),
            main_inputs: MainInputs {
                stbh: 200_000_000,
                payment_term: Some(10),
                target_age: Some(70),
                ..Default::default()
            },
            waiver: Some(WaiverSelection {
                target: WaiverTarget::Insured { id: "p2".to_string() },
                products: vec!["mdp3".to_string()],
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_sixteen_rows_with_payment_term_ten() {
        let engine = engine();
        let state = state();
        let fees = engine.calculate_all(&state);
        let illustration = build_illustration(&engine, &state, &fees).unwrap();

        assert_eq!(illustration.rows.len(), 16);
        assert_eq!(illustration.rows[0].age, 55);
        assert_eq!(illustration.rows[15].age, 70);
        for row in &illustration.rows[..10] {
            assert_eq!(row.main_premium, fees.base_main);
        }
        for row in &illustration.rows[10..] {
            assert_eq!(row.main_premium, 0);
        }
    }

    #[test]
    fn test_first_row_matches_fees() {
        let engine = engine();
        let state = state();
        let fees = engine.calculate_all(&state);
        let illustration = build_illustration(&engine, &state, &fees).unwrap();

        let first = &illustration.rows[0];
        assert_eq!(first.total, fees.total);
        assert_eq!(first.rider_premiums, fees.rider_totals());
        assert_eq!(first.waiver_premium, fees.waiver_total());
    }

    #[test]
    fn test_riders_lapse_at_renewal_age() {
        let engine = engine();
        let state = state();
        let fees = engine.calculate_all(&state);
        let illustration = build_illustration(&engine, &state, &fees).unwrap();

        // accident renews to 65: year 11 is age 65, year 12 is 66
        assert!(illustration.rows[10].rider_premiums.contains_key("accident"));
        assert!(!illustration.rows[11].rider_premiums.contains_key("accident"));
        // critical illness renews to 85
        assert!(illustration.rows.iter().all(|r| r.rider_premiums.contains_key("bhn")));

        // waiver target p2 turns 61 in year 12
        assert!(illustration.rows[10].waiver_premium > 0);
        assert_eq!(illustration.rows[11].waiver_premium, 0);
    }

    #[test]
    fn test_totals_sum_rows() {
        let engine = engine();
        let state = state();
        let fees = engine.calculate_all(&state);
        let illustration = build_illustration(&engine, &state, &fees).unwrap();

        let total: Vnd = illustration.rows.iter().map(|r| r.total).sum();
        assert_eq!(illustration.totals.total, total);
        assert_eq!(illustration.totals.main_premium, fees.base_main * 10);
        for row in &illustration.rows {
            assert_eq!(row.total % 1_000, 0);
        }
    }

    #[test]
    fn test_fail_fast_errors() {
        let engine = engine();
        let fees = FeeBreakdown::default();

        let mut bad_dob = state();
        bad_dob.persons[1].date_of_birth = "31/02/1980".to_string();
        assert_eq!(
            build_illustration(&engine, &bad_dob, &fees),
            Err(QuoteError::InvalidDateOfBirth("31/02/1980".to_string()))
        );

        let mut unknown = state();
        unknown.main_product = Some("NOPE".to_string());
        assert_eq!(
            build_illustration(&engine, &unknown, &fees),
            Err(QuoteError::UnknownMainProduct("NOPE".to_string()))
        );

        let mut rider_as_main = state();
        rider_as_main.main_product = Some("bhn".to_string());
        assert!(matches!(
            build_illustration(&engine, &rider_as_main, &fees),
            Err(QuoteError::UnknownMainProduct(_))
        ));

        let mut no_end = state();
        no_end.main_inputs.target_age = None;
        assert!(matches!(
            build_illustration(&engine, &no_end, &fees),
            Err(QuoteError::InvalidIllustrationEnd { start_age: 55, end_age: None })
        ));

        let mut no_main = state();
        for p in &mut no_main.persons {
            p.is_main = false;
        }
        assert_eq!(
            build_illustration(&engine, &no_main, &fees),
            Err(QuoteError::MissingMainInsured)
        );
    }

    #[test]
    fn test_fixed_term_contract_stops_at_term() {
        let engine = engine();
        let state = QuoteState {
            persons: vec![person("p1", "01/01/1990", Gender::Male, true)
                .with_rider("bhn", RiderInput::with_stbh(100_000_000))],
            main_product: Some("VUNG_TAM_AN".to_string()),
            main_inputs: MainInputs {
                stbh: 500_000_000,
                ..Default::default()
            },
            ..Default::default()
        };
        let fees = engine.calculate_all(&state);
        assert!(fees.base_main > 0);
        let illustration = build_illustration(&engine, &state, &fees).unwrap();

        assert_eq!(illustration.term.end_age, 45);
        assert_eq!(illustration.rows.len(), 10);
        assert_eq!(illustration.rows[9].age, 44);
        assert!(illustration.rows.iter().all(|r| r.main_premium == fees.base_main));
        assert!(illustration.rows.iter().all(|r| r.rider_premiums.contains_key("bhn")));
        assert_eq!(illustration.totals.main_premium, fees.base_main * 10);
    }

    #[test]
    fn test_csv_output_has_totals_row() {
        let engine = engine();
        let state = state();
        let fees = engine.calculate_all(&state);
        let illustration = build_illustration(&engine, &state, &fees).unwrap();

        let mut buf = Vec::new();
        illustration.write_csv(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 1 + 16 + 1);
        assert_eq!(lines[0], "year,age,main,extra,accident,bhn,health_scl,waiver,total");
        assert!(lines[17].starts_with("total,,"));
    }
}
