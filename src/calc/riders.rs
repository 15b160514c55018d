//! Rider and waiver formulas

use crate::catalog::AccumulatorKey;

use super::money::{per_mille, round_down_thousand, Vnd};
use super::{RiderArgs, WaiverArgs};

/// Hospital support daily cash is capped per person by age
const HOSPITAL_CAP_ADULT: Vnd = 1_000_000;
const HOSPITAL_CAP_MINOR: Vnd = 300_000;
/// Shared daily cash allowed per 4,000,000 of main premium
const HOSPITAL_STEP_PREMIUM: Vnd = 4_000_000;
const HOSPITAL_STEP_AMOUNT: Vnd = 100_000;
const HOSPITAL_SHARED_MAX: Vnd = 1_000_000;

pub(super) fn health(args: &RiderArgs<'_>) -> Vnd {
    let input = args.input;
    let Some(program) = input.program else {
        return 0;
    };
    let age = args.customer.age;
    let Some(band) = args.tables.premium.health.lookup_age(age) else {
        log::debug!("No health rates for age {}", age);
        return 0;
    };

    let idx = program.index();
    let mut total = match input.scope {
        crate::customer::HealthScope::Domestic => band.domestic[idx],
        crate::customer::HealthScope::Global => band.global[idx],
    };
    if input.outpatient {
        total += band.outpatient[idx];
        // dental is only sold with outpatient
        if input.dental {
            total += band.dental[idx];
        }
    }
    round_down_thousand(total)
}

pub(super) fn critical_illness(args: &RiderArgs<'_>) -> Vnd {
    let stbh = args.input.stbh;
    if stbh == 0 {
        return 0;
    }
    let customer = args.customer;
    args.tables
        .premium
        .critical_illness
        .rate(customer.age, customer.gender)
        .map_or(0, |rate| per_mille(stbh, rate))
}

pub(super) fn accident(args: &RiderArgs<'_>) -> Vnd {
    let stbh = args.input.stbh;
    if stbh == 0 {
        return 0;
    }
    args.tables
        .premium
        .accident_rate(args.customer.risk_group)
        .map_or(0, |rate| per_mille(stbh, rate))
}

/// Shared daily-cash ceiling for all hospital support riders on a contract
pub fn hospital_support_ceiling(main_premium: Vnd) -> Vnd {
    (main_premium / HOSPITAL_STEP_PREMIUM * HOSPITAL_STEP_AMOUNT).min(HOSPITAL_SHARED_MAX)
}

/// Daily cash actually insured for one person
///
/// The person keeps at most what the shared ceiling leaves after everyone
/// else, and never more than the per-person cap for their age.
pub fn hospital_support_amount(own: Vnd, total_selected: Vnd, main_premium: Vnd, age: u32) -> Vnd {
    let others = total_selected.saturating_sub(own);
    let remaining = hospital_support_ceiling(main_premium).saturating_sub(others);
    let personal_cap = if age >= 18 {
        HOSPITAL_CAP_ADULT
    } else {
        HOSPITAL_CAP_MINOR
    };
    own.min(remaining).min(personal_cap)
}

pub(super) fn hospital_support(args: &RiderArgs<'_>) -> Vnd {
    let own = args.input.stbh;
    if own == 0 {
        return 0;
    }
    let age = args.customer.age;
    let total = args.accumulators.get(AccumulatorKey::HospitalSupportStbh);
    let amount = hospital_support_amount(own, total, args.main_premium, age);
    if amount < own {
        log::debug!("Hospital support for {} capped from {} to {}", args.customer.id, own, amount);
    }

    match args.tables.premium.hospital_support.lookup_age(age) {
        // rate is per 100 VND of daily cash
        Some(rate) => round_down_thousand(amount as f64 / 100.0 * rate),
        None => 0,
    }
}

/// Waiver loading by occupation class
fn waiver_risk_factor(risk_group: u8) -> Option<f64> {
    match risk_group {
        1 => Some(1.0),
        2 | 3 => Some(1.5),
        4 => Some(2.0),
        _ => None,
    }
}

pub(super) fn waiver(args: &WaiverArgs<'_>) -> Vnd {
    let target = args.target;
    if args.stbh_base == 0 || !(18..=60).contains(&target.age) {
        return 0;
    }
    let Some(factor) = waiver_risk_factor(target.risk_group) else {
        return 0;
    };
    args.tables
        .premium
        .waiver
        .rate(target.age, target.gender)
        .map_or(0, |rate| per_mille(args.stbh_base, rate * factor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::{evaluate, Accumulators, CalcKey, FormulaInput};
    use crate::catalog::Catalog;
    use crate::customer::{Gender, HealthProgram, HealthScope, Person, RiderInput};
    use crate::tables::RateTables;

    fn rider_premium(key: CalcKey, customer: &Person, input: &RiderInput, main_premium: Vnd) -> Vnd {
        let tables = RateTables::default_pricing();
        let catalog = Catalog::standard();
        let accumulators = Accumulators::gather(&catalog, [customer]);
        evaluate(
            &key,
            FormulaInput::Rider(RiderArgs {
                customer,
                input,
                main_premium,
                accumulators: &accumulators,
                tables: &tables,
            }),
        )
    }

    fn waiver_premium(target: &Person, stbh_base: Vnd) -> Vnd {
        let tables = RateTables::default_pricing();
        evaluate(
            &CalcKey::Waiver,
            FormulaInput::Waiver(WaiverArgs {
                target,
                stbh_base,
                tables: &tables,
            }),
        )
    }

    #[test]
    fn test_hospital_support_rounds_down() {
        // 300,000 / 100 * 0.5 = 1,500
        let input = RiderInput::with_stbh(300_000);
        let customer = Person::new("p1", 30, Gender::Male, 1, true).with_rider("hospital_support", input.clone());
        assert_eq!(rider_premium(CalcKey::HospitalSupport, &customer, &input, 20_000_000), 1_000);
    }

    #[test]
    fn test_hospital_support_caps() {
        assert_eq!(hospital_support_ceiling(3_999_999), 0);
        assert_eq!(hospital_support_ceiling(12_000_000), 300_000);
        assert_eq!(hospital_support_ceiling(80_000_000), 1_000_000);

        // minor capped at 300,000 even with room left
        assert_eq!(hospital_support_amount(500_000, 500_000, 40_000_000, 10), 300_000);
        // others already use most of the ceiling
        assert_eq!(hospital_support_amount(400_000, 900_000, 24_000_000, 30), 100_000);
        assert_eq!(hospital_support_amount(400_000, 1_000_000, 24_000_000, 30), 0);

        // no main premium, no cover
        let input = RiderInput::with_stbh(300_000);
        let customer = Person::new("p1", 30, Gender::Male, 1, true).with_rider("hospital_support", input.clone());
        assert_eq!(rider_premium(CalcKey::HospitalSupport, &customer, &input, 0), 0);
    }

    #[test]
    fn test_health_options() {
        let customer = Person::new("p1", 35, Gender::Female, 1, true);
        let basic = RiderInput::health(HealthProgram::Basic, HealthScope::Domestic, false, false);
        assert_eq!(rider_premium(CalcKey::Health, &customer, &basic, 0), 1_450_000);

        let full = RiderInput::health(HealthProgram::Basic, HealthScope::Domestic, true, true);
        assert_eq!(rider_premium(CalcKey::Health, &customer, &full, 0), 1_450_000 + 900_000 + 350_000);

        let dental_only = RiderInput::health(HealthProgram::Basic, HealthScope::Domestic, false, true);
        assert_eq!(rider_premium(CalcKey::Health, &customer, &dental_only, 0), 1_450_000);

        let no_program = RiderInput::default();
        assert_eq!(rider_premium(CalcKey::Health, &customer, &no_program, 0), 0);

        let old = Person::new("p1", 75, Gender::Female, 1, true);
        assert_eq!(rider_premium(CalcKey::Health, &old, &basic, 0), 0);
    }

    #[test]
    fn test_critical_illness_and_accident() {
        let customer = Person::new("p1", 30, Gender::Male, 3, true);
        let input = RiderInput::with_stbh(200_000_000);
        // 200,000 * 1.5
        assert_eq!(rider_premium(CalcKey::CriticalIllness, &customer, &input, 0), 300_000);
        // 200,000 * 1.8
        assert_eq!(rider_premium(CalcKey::Accident, &customer, &input, 0), 360_000);

        let unclassified = Person::new("p1", 30, Gender::Male, 0, true);
        assert_eq!(rider_premium(CalcKey::Accident, &unclassified, &input, 0), 0);
    }

    #[test]
    fn test_waiver_eligibility() {
        let target = Person::new("p2", 40, Gender::Female, 1, false);
        // 10,000 * 7.3
        assert_eq!(waiver_premium(&target, 10_000_000), 73_000);

        // 10,000 * 7.3 * 1.5 = 109,500
        let office = Person::new("p2", 40, Gender::Female, 2, false);
        assert_eq!(waiver_premium(&office, 10_000_000), 109_000);
        let manual = Person::new("p2", 40, Gender::Female, 3, false);
        assert_eq!(waiver_premium(&manual, 10_000_000), 109_000);

        let heavy = Person::new("p2", 40, Gender::Female, 4, false);
        assert_eq!(waiver_premium(&heavy, 10_000_000), 146_000);

        let old = Person::new("p2", 65, Gender::Female, 1, false);
        assert_eq!(waiver_premium(&old, 10_000_000), 0);

        let young = Person::new("p2", 17, Gender::Female, 1, false);
        assert_eq!(waiver_premium(&young, 10_000_000), 0);

        let unclassified = Person::new("p2", 40, Gender::Female, 0, false);
        assert_eq!(waiver_premium(&unclassified, 10_000_000), 0);

        assert_eq!(waiver_premium(&target, 0), 0);
    }
}
