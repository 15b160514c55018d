//! Monthly account-value projection for investment-linked products

use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};

use crate::calc::{self, round_down_thousand, Vnd};
use crate::catalog::{BonusStyle, SumInsuredGrowth};
use crate::customer::{calculate_age, Gender};
use crate::engine::{PaymentFrequency, QuoteEngine, QuoteState};
use crate::error::{QuoteError, Result};
use crate::illustration::resolve_term;
use crate::tables::{GuaranteedRates, PremiumComponent, RateTables};

use super::cashflows::{AccountRow, ProjectionResult};
use super::state::ProjectionState;

/// Interest-rate scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestScenario {
    /// Guaranteed rate table only
    Guaranteed,
    /// Custom rate (floored at guaranteed) for the first years, then guaranteed
    CustomCapped,
    /// Custom rate (floored at guaranteed) for the whole horizon
    CustomFull,
}

impl InterestScenario {
    pub const ALL: [InterestScenario; 3] = [
        InterestScenario::Guaranteed,
        InterestScenario::CustomCapped,
        InterestScenario::CustomFull,
    ];

    /// Effective annual crediting rate for a policy year
    pub fn annual_rate(&self, policy_year: u32, custom_rate: f64, guaranteed: &GuaranteedRates, capped_years: u32) -> f64 {
        let floor = guaranteed.rate(policy_year);
        match self {
            InterestScenario::Guaranteed => floor,
            InterestScenario::CustomCapped if policy_year <= capped_years => custom_rate.max(floor),
            InterestScenario::CustomCapped => floor,
            InterestScenario::CustomFull => custom_rate.max(floor),
        }
    }
}

/// Monthly compounding rate equivalent to an annual rate
pub fn monthly_rate(annual_rate: f64) -> f64 {
    (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
}

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    pub scenario: InterestScenario,

    /// Annual rate entered for the custom scenarios
    pub custom_rate: f64,

    /// Policy years the capped scenario uses the custom rate
    pub capped_years: u32,

    /// Whether to keep monthly rows
    pub detailed_output: bool,

    /// Calendar year of policy year 1, for admin fees
    pub start_year: i32,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            scenario: InterestScenario::Guaranteed,
            custom_rate: 0.0,
            capped_years: 20,
            detailed_output: true,
            start_year: Local::now().year(),
        }
    }
}

/// Contract values a projection needs
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionInput {
    pub product_id: String,
    pub issue_age: u32,
    pub gender: Gender,
    pub sum_insured: Vnd,
    pub annual_base_premium: Vnd,
    pub annual_extra_premium: Vnd,
    pub payment_term: u32,
    pub target_age: u32,
    pub frequency: PaymentFrequency,
    pub bonus: BonusStyle,
    pub growth: SumInsuredGrowth,
}

impl ProjectionInput {
    /// Months from issue through the end of the target-age year
    pub fn projection_months(&self) -> u32 {
        (self.target_age.saturating_sub(self.issue_age) + 1) * 12
    }

    /// Build from a quotation
    ///
    /// `Ok(None)` when the main product has no account value. Fails like
    /// illustration building on an unknown product, a missing main insured,
    /// a bad date of birth or an unresolvable term.
    pub fn from_quote(engine: &QuoteEngine, state: &QuoteState) -> Result<Option<Self>> {
        let product_id = state.main_product.clone().unwrap_or_default();
        let product = engine
            .catalog()
            .get(&product_id)
            .filter(|p| p.is_main())
            .ok_or_else(|| QuoteError::UnknownMainProduct(product_id.clone()))?;
        let Some(profile) = product.projection else {
            return Ok(None);
        };

        let main_person = state.main_person().ok_or(QuoteError::MissingMainInsured)?;
        let issue_age = calculate_age(&main_person.date_of_birth, engine.config().reference_date)?;
        let term = resolve_term(product, issue_age, &state.main_inputs)?;

        let mut customer = main_person.clone();
        customer.age = issue_age;
        let base = calc::main_premium(product, &customer, &state.main_inputs, engine.catalog(), engine.tables());

        Ok(Some(Self {
            product_id,
            issue_age,
            gender: main_person.gender,
            sum_insured: state.main_inputs.stbh,
            annual_base_premium: base,
            annual_extra_premium: round_down_thousand(state.main_inputs.extra_premium as f64),
            payment_term: term.payment_term,
            target_age: term.end_age,
            frequency: state.payment_frequency,
            bonus: profile.bonus,
            growth: profile.growth,
        }))
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    tables: RateTables,
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(tables: RateTables, config: ProjectionConfig) -> Self {
        Self { tables, config }
    }

    /// Run projection for a single contract
    pub fn project(&self, input: &ProjectionInput) -> ProjectionResult {
        let mut result = ProjectionResult::new(input.product_id.clone(), self.config.scenario);
        let mut state = ProjectionState::new(input.issue_age);

        for _month in 1..=input.projection_months() {
            state.advance_month();
            let row = self.calculate_month(input, &mut state);
            result.add_row(row, self.config.detailed_output);
        }

        log::debug!(
            "{} {:?}: {} months, final AV {:.0}",
            input.product_id,
            self.config.scenario,
            input.projection_months(),
            state.account_value
        );
        result
    }

    /// Calculate values for a single month and carry the account forward
    fn calculate_month(&self, input: &ProjectionInput, state: &mut ProjectionState) -> AccountRow {
        let features = &self.tables.features;
        let py = state.policy_year;

        let mut row = AccountRow::new(state.projection_month);
        row.policy_year = py;
        row.month_in_policy_year = state.month_in_policy_year;
        row.attained_age = state.attained_age;
        row.bop_av = state.account_value;

        let mut av = state.account_value;

        // Premium net of initial fees
        if py <= input.payment_term && input.frequency.is_payment_month(state.month_in_policy_year) {
            let periods = input.frequency.periods_per_year() as f64;
            let base = round_down_thousand(input.annual_base_premium as f64 / periods) as f64;
            let extra = round_down_thousand(input.annual_extra_premium as f64 / periods) as f64;
            row.premium = base + extra;
            row.initial_fee = base * features.initial_fees.rate(py, PremiumComponent::Base)
                + extra * features.initial_fees.rate(py, PremiumComponent::Extra);
            av += row.premium - row.initial_fee;
        }

        // Admin fee by calendar year
        row.admin_fee = features.admin_fees.monthly_fee(self.config.start_year + py as i32 - 1);
        av -= row.admin_fee;

        // Cost of insurance on the amount at risk
        row.sum_insured = input.growth.sum_insured(input.sum_insured as f64, py);
        row.sum_at_risk = (row.sum_insured - av).max(0.0);
        row.coi = row.sum_at_risk * self.tables.coi.monthly_rate(state.attained_age, input.gender) / 1000.0;
        av -= row.coi;

        // Interest on the net amount
        row.annual_rate = self.config.scenario.annual_rate(
            py,
            self.config.custom_rate,
            &features.guaranteed,
            self.config.capped_years,
        );
        if av > 0.0 {
            row.interest = av * monthly_rate(row.annual_rate);
            av += row.interest;
        }

        // Persistency bonus at the policy-year boundary
        if state.is_year_end() {
            let rate = match input.bonus {
                BonusStyle::Periodic if py >= 5 && py <= input.payment_term => features.bonus.periodic_rate(py),
                BonusStyle::Milestone if input.payment_term >= py => features.bonus.milestone_rate(py).unwrap_or(0.0),
                _ => 0.0,
            };
            row.bonus = input.annual_base_premium as f64 * rate;
            av += row.bonus;
        }

        row.eop_av = av.max(0.0);
        state.account_value = row.eop_av;
        row
    }
}
