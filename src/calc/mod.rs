//! Premium formulas
//!
//! Every product's config names one `CalcKey`. `evaluate` dispatches the
//! key against a category-specific argument struct and returns a VND
//! premium. Pricing never fails: a missing table row, an ineligible age
//! or a key used with the wrong argument category prices at 0.

pub mod money;
mod main_premium;
mod riders;
mod sum_insured;

pub use money::{format_vnd, format_vnd_with_unit, per_mille, round_down_thousand, round_up_thousand, Vnd};
pub use sum_insured::{premium_range_for_sum_insured, sum_insured_range};

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::catalog::{AccumulatorKey, Catalog, ProductConfig};
use crate::customer::{Person, RiderInput};
use crate::rules::{evaluate_and, RuleContext};
use crate::tables::{MainRateTable, RateTables};

/// Premium formula identifier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "formula", rename_all = "snake_case")]
pub enum CalcKey {
    /// Per mille of sum insured from an exact-age main table
    RateTableMain { table: MainRateTable },
    /// Premium is the amount entered by the user
    DirectInput,
    /// Endowment rate keyed by payment term, then age
    TermBanded,
    /// Prices an underlying main product with fixed inputs
    PackageProxy { underlying: String, stbh: Vnd, term: u32 },
    Health,
    CriticalIllness,
    Accident,
    HospitalSupport,
    Waiver,
}

/// Values entered for the main product
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MainInputs {
    #[serde(default)]
    pub stbh: Vnd,
    /// Entered premium for direct-input products
    #[serde(default)]
    pub premium: Vnd,
    #[serde(default)]
    pub payment_term: Option<u32>,
    /// Flat top-up paid alongside the base premium
    #[serde(default)]
    pub extra_premium: Vnd,
    /// Illustration end age for products that take it as input
    #[serde(default)]
    pub target_age: Option<u32>,
}

/// Totals over all persons, keyed by accumulator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Accumulators {
    totals: BTreeMap<AccumulatorKey, Vnd>,
}

impl Accumulators {
    /// Sum each rider's requested accumulators over `persons`
    pub fn gather<'a>(catalog: &Catalog, persons: impl IntoIterator<Item = &'a Person>) -> Self {
        let mut totals = BTreeMap::new();
        for person in persons {
            for (product_id, input) in &person.supplements {
                let Some(product) = catalog.get(product_id) else {
                    continue;
                };
                for key in product.accumulator_keys() {
                    *totals.entry(*key).or_insert(0) += input.stbh;
                }
            }
        }
        Self { totals }
    }

    pub fn get(&self, key: AccumulatorKey) -> Vnd {
        self.totals.get(&key).copied().unwrap_or(0)
    }
}

pub struct MainArgs<'a> {
    pub product: &'a ProductConfig,
    pub customer: &'a Person,
    pub inputs: &'a MainInputs,
    pub catalog: &'a Catalog,
    pub tables: &'a RateTables,
}

pub struct RiderArgs<'a> {
    pub customer: &'a Person,
    pub input: &'a RiderInput,
    /// Level main premium, for caps that scale with it
    pub main_premium: Vnd,
    pub accumulators: &'a Accumulators,
    pub tables: &'a RateTables,
}

pub struct WaiverArgs<'a> {
    /// Person whose premiums are waived
    pub target: &'a Person,
    /// Premium base the waiver insures
    pub stbh_base: Vnd,
    pub tables: &'a RateTables,
}

/// Formula arguments, one variant per product category
pub enum FormulaInput<'a> {
    Main(MainArgs<'a>),
    Rider(RiderArgs<'a>),
    Waiver(WaiverArgs<'a>),
}

/// Price `key` against `input`
pub fn evaluate(key: &CalcKey, input: FormulaInput<'_>) -> Vnd {
    match (key, input) {
        (CalcKey::RateTableMain { table }, FormulaInput::Main(args)) => main_premium::rate_table(*table, &args),
        (CalcKey::DirectInput, FormulaInput::Main(args)) => main_premium::direct_input(&args),
        (CalcKey::TermBanded, FormulaInput::Main(args)) => main_premium::term_banded(&args),
        (CalcKey::PackageProxy { underlying, stbh, term }, FormulaInput::Main(args)) => {
            main_premium::package_proxy(underlying, *stbh, *term, &args)
        }
        (CalcKey::Health, FormulaInput::Rider(args)) => riders::health(&args),
        (CalcKey::CriticalIllness, FormulaInput::Rider(args)) => riders::critical_illness(&args),
        (CalcKey::Accident, FormulaInput::Rider(args)) => riders::accident(&args),
        (CalcKey::HospitalSupport, FormulaInput::Rider(args)) => riders::hospital_support(&args),
        (CalcKey::Waiver, FormulaInput::Waiver(args)) => riders::waiver(&args),
        (key, _) => {
            log::warn!("Formula {:?} called with arguments of another category", key);
            0
        }
    }
}

/// Base premium of the main product for the main insured
///
/// Unpriced keys, missing configs and a main insured outside the
/// product's issue rules yield 0.
pub fn main_premium(
    product: &ProductConfig,
    customer: &Person,
    inputs: &MainInputs,
    catalog: &Catalog,
    tables: &RateTables,
) -> Vnd {
    let ctx = RuleContext::new(customer, Some(product), &product.id);
    if !evaluate_and(product.eligibility.as_ref(), &ctx) {
        log::debug!("{} not issuable to {} at age {}", product.id, customer.id, customer.age);
        return 0;
    }
    let Some(key) = product.calc_key() else {
        log::debug!("Main product {} has no calculation key", product.id);
        return 0;
    };
    evaluate(
        key,
        FormulaInput::Main(MainArgs {
            product,
            customer,
            inputs,
            catalog,
            tables,
        }),
    )
}
