//! Scenario runner for account-value projections
//!
//! Pre-loads tables once, then runs the three interest scenarios of a
//! contract in parallel.

use chrono::Datelike;
use rayon::prelude::*;
use serde::Serialize;

use crate::engine::{QuoteEngine, QuoteState};
use crate::error::{Result, TableError};
use crate::projection::{InterestScenario, ProjectionConfig, ProjectionEngine, ProjectionInput, ProjectionResult};
use crate::tables::RateTables;

/// Projections of one contract under every scenario
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioSet {
    pub guaranteed: ProjectionResult,
    pub custom_capped: ProjectionResult,
    pub custom_full: ProjectionResult,
}

impl ScenarioSet {
    pub fn get(&self, scenario: InterestScenario) -> &ProjectionResult {
        match scenario {
            InterestScenario::Guaranteed => &self.guaranteed,
            InterestScenario::CustomCapped => &self.custom_capped,
            InterestScenario::CustomFull => &self.custom_full,
        }
    }
}

/// Settings shared by the three scenario runs
#[derive(Debug, Clone)]
pub struct ScenarioOptions {
    pub custom_rate: f64,
    pub capped_years: u32,
    pub start_year: i32,
    pub detailed_output: bool,
}

impl ScenarioOptions {
    fn config(&self, scenario: InterestScenario) -> ProjectionConfig {
        ProjectionConfig {
            scenario,
            custom_rate: self.custom_rate,
            capped_years: self.capped_years,
            detailed_output: self.detailed_output,
            start_year: self.start_year,
        }
    }
}

/// Pre-loaded scenario runner
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    tables: RateTables,
}

impl ScenarioRunner {
    /// Create runner with built-in tables
    pub fn new() -> Self {
        Self {
            tables: RateTables::default_pricing(),
        }
    }

    /// Create runner by loading tables from CSV files
    pub fn from_csv() -> std::result::Result<Self, TableError> {
        Ok(Self {
            tables: RateTables::from_csv()?,
        })
    }

    pub fn from_csv_path(path: &std::path::Path) -> std::result::Result<Self, TableError> {
        Ok(Self {
            tables: RateTables::from_csv_path(path)?,
        })
    }

    pub fn with_tables(tables: RateTables) -> Self {
        Self { tables }
    }

    /// Run a single projection with the given config
    pub fn run(&self, input: &ProjectionInput, config: ProjectionConfig) -> ProjectionResult {
        let engine = ProjectionEngine::new(self.tables.clone(), config);
        engine.project(input)
    }

    /// Run several configs for one contract in parallel, results in config order
    pub fn run_scenarios(&self, input: &ProjectionInput, configs: &[ProjectionConfig]) -> Vec<ProjectionResult> {
        configs
            .par_iter()
            .map(|config| self.run(input, config.clone()))
            .collect()
    }

    /// Guaranteed, capped and full custom scenarios
    pub fn run_all(&self, input: &ProjectionInput, options: &ScenarioOptions) -> ScenarioSet {
        let configs: Vec<ProjectionConfig> = InterestScenario::ALL.iter().map(|s| options.config(*s)).collect();
        let mut results = self.run_scenarios(input, &configs).into_iter();

        // ALL has exactly three entries in this order
        let mut next = |scenario| {
            results
                .next()
                .unwrap_or_else(|| ProjectionResult::new(input.product_id.clone(), scenario))
        };
        ScenarioSet {
            guaranteed: next(InterestScenario::Guaranteed),
            custom_capped: next(InterestScenario::CustomCapped),
            custom_full: next(InterestScenario::CustomFull),
        }
    }

    /// Project a quotation's main product; `Ok(None)` when it has no account value
    pub fn project_quote(&self, engine: &QuoteEngine, state: &QuoteState, detailed_output: bool) -> Result<Option<ScenarioSet>> {
        let Some(input) = ProjectionInput::from_quote(engine, state)? else {
            return Ok(None);
        };
        let options = ScenarioOptions {
            custom_rate: state.custom_interest_rate.unwrap_or(0.0),
            capped_years: engine.config().capped_custom_years,
            start_year: engine.config().reference_date.year(),
            detailed_output,
        };
        Ok(Some(self.run_all(&input, &options)))
    }

    pub fn tables(&self) -> &RateTables {
        &self.tables
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::MainInputs;
    use crate::catalog::{BonusStyle, SumInsuredGrowth};
    use crate::customer::{Gender, Person};
    use crate::engine::{PaymentFrequency, QuoteConfig};
    use chrono::NaiveDate;

    fn test_input() -> ProjectionInput {
        ProjectionInput {
            product_id: "MUL_LINH_HOAT".to_string(),
            issue_age: 35,
            gender: Gender::Male,
            sum_insured: 800_000_000,
            annual_base_premium: 30_000_000,
            annual_extra_premium: 0,
            payment_term: 25,
            target_age: 75,
            frequency: PaymentFrequency::Annual,
            bonus: BonusStyle::Periodic,
            growth: SumInsuredGrowth::Level,
        }
    }

    fn options(custom_rate: f64) -> ScenarioOptions {
        ScenarioOptions {
            custom_rate,
            capped_years: 20,
            start_year: 2025,
            detailed_output: false,
        }
    }

    #[test]
    fn test_scenarios_are_ordered() {
        let runner = ScenarioRunner::new();
        let set = runner.run_all(&test_input(), &options(0.06));

        let g = set.guaranteed.summary().final_av;
        let capped = set.custom_capped.summary().final_av;
        let full = set.custom_full.summary().final_av;
        assert!(g <= capped, "{g} > {capped}");
        assert!(capped <= full, "{capped} > {full}");
        assert!(full > g);

        assert_eq!(set.get(InterestScenario::CustomFull).scenario, InterestScenario::CustomFull);
        assert_eq!(set.guaranteed.year_end.len(), 41);
        assert!(set.guaranteed.rows.is_empty());
    }

    #[test]
    fn test_capped_matches_full_within_cap() {
        let runner = ScenarioRunner::new();
        let set = runner.run_all(&test_input(), &options(0.06));
        let capped = set.custom_capped.year_end_values();
        let full = set.custom_full.year_end_values();
        assert_eq!(capped[..20], full[..20]);
        assert!(capped[25] < full[25]);
    }

    #[test]
    fn test_low_custom_rate_equals_guaranteed() {
        let runner = ScenarioRunner::new();
        let set = runner.run_all(&test_input(), &options(0.0));
        assert_eq!(set.guaranteed.year_end_values(), set.custom_full.year_end_values());
    }

    #[test]
    fn test_project_quote() {
        let reference = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let engine = QuoteEngine::standard(QuoteConfig::with_reference_date(reference));
        let state = QuoteState {
            persons: vec![Person::from_date_of_birth("p1", "A", "01/01/1990", Gender::Female, 1, true, reference).unwrap()],
            main_product: Some("PUL_TRON_DOI".to_string()),
            main_inputs: MainInputs {
                stbh: 1_000_000_000,
                premium: 20_000_000,
                target_age: Some(70),
                ..Default::default()
            },
            custom_interest_rate: Some(0.055),
            ..Default::default()
        };
        let runner = ScenarioRunner::with_tables(engine.tables().clone());
        let set = runner.project_quote(&engine, &state, true).unwrap().unwrap();
        // issue age 35, through age 70
        assert_eq!(set.custom_full.rows.len(), 36 * 12);
        assert_eq!(set.custom_full.year_end.last().map(|v| v.attained_age), Some(70));
    }
}
