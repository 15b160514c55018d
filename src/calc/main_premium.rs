//! Main product formulas

use crate::tables::MainRateTable;

use super::money::{per_mille, round_down_thousand, Vnd};
use super::{evaluate, CalcKey, FormulaInput, MainArgs, MainInputs};

pub(super) fn rate_table(table: MainRateTable, args: &MainArgs<'_>) -> Vnd {
    if args.inputs.stbh == 0 {
        return 0;
    }
    let customer = args.customer;
    match args.tables.premium.main_table(table).rate(customer.age, customer.gender) {
        Some(rate) => per_mille(args.inputs.stbh, rate),
        None => {
            log::debug!("{}: no {:?} rate for age {}", args.product.id, table, customer.age);
            0
        }
    }
}

pub(super) fn direct_input(args: &MainArgs<'_>) -> Vnd {
    round_down_thousand(args.inputs.premium as f64)
}

pub(super) fn term_banded(args: &MainArgs<'_>) -> Vnd {
    let inputs = args.inputs;
    let Some(term) = inputs.payment_term else {
        return 0;
    };
    if inputs.stbh == 0 {
        return 0;
    }
    let customer = args.customer;
    match args.tables.premium.endowment.rate(term, customer.age, customer.gender) {
        Some(rate) => per_mille(inputs.stbh, rate),
        None => {
            log::debug!(
                "{}: no endowment rate for term {} age {}",
                args.product.id,
                term,
                customer.age
            );
            0
        }
    }
}

/// Price the underlying product with the package's fixed sum insured and term
pub(super) fn package_proxy(underlying: &str, stbh: Vnd, term: u32, args: &MainArgs<'_>) -> Vnd {
    let Some(product) = args.catalog.get(underlying) else {
        log::warn!("{}: underlying product {} not in catalog", args.product.id, underlying);
        return 0;
    };
    let Some(key) = product.calc_key() else {
        return 0;
    };
    if matches!(key, CalcKey::PackageProxy { .. }) {
        log::warn!("{}: package cannot proxy another package ({})", args.product.id, underlying);
        return 0;
    }

    let inputs = MainInputs {
        stbh,
        payment_term: Some(term),
        ..Default::default()
    };
    evaluate(
        key,
        FormulaInput::Main(MainArgs {
            product,
            inputs: &inputs,
            ..*args
        }),
    )
}
