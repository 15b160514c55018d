//! Fee aggregation over all persons and products
//!
//! Runs in five phases:
//! 1. main premium and top-up for the main insured
//! 2. cross-person accumulators
//! 3. pass-1 riders per person
//! 4. snapshot of every person's pass-1 premiums
//! 5. waivers, priced on the snapshot so they never see each other
//!
//! Reads only the state and the read-only catalog and tables, so repeated
//! calls give identical results.

use std::collections::BTreeMap;

use crate::calc::{self, evaluate, round_down_thousand, Accumulators, FormulaInput, RiderArgs, Vnd, WaiverArgs};
use crate::catalog::{Pass, ProductConfig, StbhTerm};
use crate::customer::Person;
use crate::rules::{rider_flags, RiderFlags, RuleContext};

use super::fees::{FeeBreakdown, PersonFees, WaiverDetail};
use super::state::QuoteState;
use super::QuoteEngine;

/// Which age rules gate a rider
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PricingMode {
    /// Issue-age eligibility rules
    NewBusiness,
    /// Renewal age limits, for later policy years
    Renewal,
}

/// Main premium amounts for one policy year
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MainPayment {
    /// Contract's level base premium; rider caps scale with it
    pub level: Vnd,
    /// Base premium due this year
    pub paid: Vnd,
    pub extra: Vnd,
}

/// Per-person premiums frozen after pass 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct PassOneSnapshot {
    main_base: Vnd,
    supp: Vnd,
}

/// Premium base a waiver insures, from the pass-1 snapshot
///
/// `RidersExceptTarget` subtracts the target's own rider premiums. The
/// result never goes below 0.
fn waiver_stbh_base(terms: &[StbhTerm], snapshot: &BTreeMap<String, PassOneSnapshot>, target_id: &str) -> Vnd {
    let mut base: i128 = 0;
    for term in terms {
        match term {
            StbhTerm::MainBase => base += snapshot.values().map(|s| s.main_base as i128).sum::<i128>(),
            StbhTerm::RidersAll => base += snapshot.values().map(|s| s.supp as i128).sum::<i128>(),
            StbhTerm::RidersExceptTarget => base -= snapshot.get(target_id).map_or(0, |s| s.supp as i128),
        }
    }
    Vnd::try_from(base.max(0)).unwrap_or(Vnd::MAX)
}

impl QuoteEngine {
    /// First-year fees of a quotation
    pub fn calculate_all(&self, state: &QuoteState) -> FeeBreakdown {
        let main_config = self.main_config(state);
        let main_person = state.main_person();

        let base_main = match (main_config, main_person) {
            (Some(product), Some(person)) => {
                calc::main_premium(product, person, &state.main_inputs, &self.catalog, &self.tables)
            }
            (None, _) => {
                if let Some(id) = &state.main_product {
                    log::warn!("Main product {} not in catalog, pricing at 0", id);
                }
                0
            }
            (Some(_), None) => {
                log::warn!("Quotation has no main insured, main premium priced at 0");
                0
            }
        };
        let extra = match main_person {
            Some(_) => round_down_thousand(state.main_inputs.extra_premium as f64),
            None => 0,
        };

        let target = state.waiver_target();
        let payment = MainPayment {
            level: base_main,
            paid: base_main,
            extra,
        };
        let fees = self.price_year(state, &state.persons, target.as_ref(), payment, PricingMode::NewBusiness);
        log::debug!(
            "Quotation fees: main {} supp {} total {}",
            fees.total_main,
            fees.total_supp,
            fees.total
        );
        fees
    }

    /// Selection flags of a rider for one person
    pub fn rider_flags(&self, state: &QuoteState, person: &Person, product_id: &str) -> Option<RiderFlags> {
        let product = self.catalog.get(product_id)?;
        let ctx = RuleContext::new(person, self.main_config(state), product_id);
        Some(rider_flags(product, &ctx))
    }

    pub(crate) fn main_config(&self, state: &QuoteState) -> Option<&ProductConfig> {
        state.main_product.as_deref().and_then(|id| self.catalog.get(id))
    }

    fn rider_applies(
        &self,
        product: &ProductConfig,
        person: &Person,
        main_config: Option<&ProductConfig>,
        mode: PricingMode,
    ) -> bool {
        let flags = rider_flags(product, &RuleContext::new(person, main_config, &product.id));
        if flags.disabled {
            return false;
        }
        match mode {
            PricingMode::NewBusiness => flags.eligible,
            PricingMode::Renewal => product.renews_at(person.age),
        }
    }

    /// Price one policy year for `persons` at their current ages
    pub(crate) fn price_year(
        &self,
        state: &QuoteState,
        persons: &[Person],
        waiver_target: Option<&Person>,
        payment: MainPayment,
        mode: PricingMode,
    ) -> FeeBreakdown {
        let main_config = self.main_config(state);

        // Phase 1: main premium
        let mut breakdown = FeeBreakdown {
            base_main: payment.paid,
            extra: payment.extra,
            total_main: payment.paid + payment.extra,
            ..Default::default()
        };
        for person in persons {
            let mut fees = PersonFees::default();
            if person.is_main {
                fees.main_base = payment.paid;
                fees.main = payment.paid + payment.extra;
                fees.total = fees.main;
            }
            breakdown.by_person.insert(person.id.clone(), fees);
        }

        // Phase 2: accumulators
        let accumulators = Accumulators::gather(&self.catalog, persons);

        // Phase 3: pass-1 riders
        for person in persons {
            for (product_id, input) in &person.supplements {
                let Some(product) = self.catalog.get(product_id) else {
                    log::debug!("Rider {} on {} not in catalog", product_id, person.id);
                    continue;
                };
                if product.pass() != Pass::Direct || !self.rider_applies(product, person, main_config, mode) {
                    continue;
                }
                let Some(key) = product.calc_key() else {
                    continue;
                };
                let premium = evaluate(
                    key,
                    FormulaInput::Rider(RiderArgs {
                        customer: person,
                        input,
                        main_premium: payment.level,
                        accumulators: &accumulators,
                        tables: &self.tables,
                    }),
                );
                if premium == 0 {
                    continue;
                }
                if let Some(fees) = breakdown.by_person.get_mut(&person.id) {
                    fees.add_supplement(product_id, premium);
                }
                breakdown.total_supp += premium;
            }
        }

        // Phase 4: snapshot
        let snapshot: BTreeMap<String, PassOneSnapshot> = breakdown
            .by_person
            .iter()
            .map(|(id, fees)| {
                let snap = PassOneSnapshot {
                    main_base: fees.main_base,
                    supp: fees.supp,
                };
                (id.clone(), snap)
            })
            .collect();

        // Phase 5: waivers
        if let (Some(selection), Some(target)) = (state.waiver.as_ref(), waiver_target) {
            for product_id in &selection.products {
                let Some(product) = self.catalog.get(product_id) else {
                    log::debug!("Waiver {} not in catalog", product_id);
                    continue;
                };
                if product.pass() != Pass::Waiver || !self.rider_applies(product, target, main_config, mode) {
                    continue;
                }
                let Some(key) = product.calc_key() else {
                    continue;
                };
                let stbh_base = waiver_stbh_base(product.stbh_terms(), &snapshot, &target.id);
                let premium = evaluate(
                    key,
                    FormulaInput::Waiver(WaiverArgs {
                        target,
                        stbh_base,
                        tables: &self.tables,
                    }),
                );
                if premium == 0 {
                    continue;
                }
                breakdown
                    .by_person
                    .entry(target.id.clone())
                    .or_default()
                    .add_supplement(product_id, premium);
                breakdown.total_supp += premium;
                breakdown.waiver_details.insert(
                    product_id.clone(),
                    WaiverDetail {
                        premium,
                        target_person: target.id.clone(),
                        stbh_base,
                    },
                );
            }
        }

        breakdown.total = breakdown.total_main + breakdown.total_supp;
        breakdown
    }
}
