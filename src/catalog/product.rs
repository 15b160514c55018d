//! Product configuration records

use serde::{Deserialize, Serialize};

use crate::calc::CalcKey;
use crate::rules::RuleSet;

/// Main product family
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MainGroup {
    /// Universal life with a declared crediting rate
    UnitLinked,
    /// Universal life credited at a market rate
    MarketUnitLinked,
    TermEndowment,
    WholeLife,
    FixedTerm,
    /// Fixed bundle pricing through an underlying main product
    Package,
}

impl MainGroup {
    /// Whether the product carries an account value
    pub fn is_investment_linked(&self) -> bool {
        matches!(self, MainGroup::UnitLinked | MainGroup::MarketUnitLinked)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "group", rename_all = "snake_case")]
pub enum ProductKind {
    Main(MainGroup),
    Rider,
    Waiver,
}

/// Aggregation pass a rider is priced in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Pass {
    /// Ordinary riders, priced per person
    Direct,
    /// Waiver riders, priced on the pass-1 snapshot
    Waiver,
}

/// Cross-person sums gathered before pricing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccumulatorKey {
    /// Total hospital-support daily cash over all persons
    HospitalSupportStbh,
}

/// One term of a waiver's sum-insured base
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StbhTerm {
    /// Main insured's base premium
    MainBase,
    /// Every person's pass-1 rider premiums
    RidersAll,
    /// Subtracts the waiver target's own pass-1 rider premiums
    RidersExceptTarget,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculationSpec {
    pub key: CalcKey,
    #[serde(default)]
    pub pass: Option<Pass>,
    #[serde(default)]
    pub accumulator_keys: Vec<AccumulatorKey>,
    #[serde(default)]
    pub stbh_terms: Vec<StbhTerm>,
}

impl CalculationSpec {
    pub fn new(key: CalcKey) -> Self {
        Self {
            key,
            pass: None,
            accumulator_keys: Vec::new(),
            stbh_terms: Vec::new(),
        }
    }

    pub fn in_pass(mut self, pass: Pass) -> Self {
        self.pass = Some(pass);
        self
    }
}

/// How a main product's payment term and illustration end are chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "rule", rename_all = "snake_case")]
pub enum TermRule {
    /// Illustration runs to the entered target age
    UserInput,
    /// Payment term picked from a fixed list
    SelectedTerm { options: Vec<u32> },
    Fixed { years: u32 },
}

/// Persistency bonus schedule an investment-linked product pays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusStyle {
    /// Yearly bonus from policy year 5 through the payment term
    Periodic,
    /// One-off bonuses at milestone years within the payment term
    Milestone,
}

/// Sum insured over the policy life
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "growth", rename_all = "snake_case")]
pub enum SumInsuredGrowth {
    Level,
    /// Grows by `annual_rate` of the initial amount each year, for `max_years` years
    Stepped { annual_rate: f64, max_years: u32 },
}

impl SumInsuredGrowth {
    pub fn sum_insured(&self, initial: f64, policy_year: u32) -> f64 {
        match *self {
            SumInsuredGrowth::Level => initial,
            SumInsuredGrowth::Stepped { annual_rate, max_years } => {
                let steps = policy_year.saturating_sub(1).min(max_years);
                initial * (1.0 + annual_rate * steps as f64)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionProfile {
    pub bonus: BonusStyle,
    pub growth: SumInsuredGrowth,
}

/// One catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    pub id: String,
    pub name: String,
    pub kind: ProductKind,

    #[serde(default)]
    pub eligibility: Option<RuleSet>,
    #[serde(default)]
    pub mandatory: Option<RuleSet>,
    #[serde(default)]
    pub disabled: Option<RuleSet>,

    /// Oldest attained age at which the rider still renews
    #[serde(default)]
    pub max_renewal_age: Option<u32>,

    #[serde(default)]
    pub calculation: Option<CalculationSpec>,

    #[serde(default)]
    pub term_rule: Option<TermRule>,

    #[serde(default)]
    pub projection: Option<ProjectionProfile>,

    /// Riders bundled with a package main product
    #[serde(default)]
    pub package_riders: Vec<String>,
}

impl ProductConfig {
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: ProductKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            eligibility: None,
            mandatory: None,
            disabled: None,
            max_renewal_age: None,
            calculation: None,
            term_rule: None,
            projection: None,
            package_riders: Vec::new(),
        }
    }

    pub fn main_group(&self) -> Option<MainGroup> {
        match self.kind {
            ProductKind::Main(group) => Some(group),
            _ => None,
        }
    }

    pub fn is_main(&self) -> bool {
        self.main_group().is_some()
    }

    pub fn calc_key(&self) -> Option<&CalcKey> {
        self.calculation.as_ref().map(|c| &c.key)
    }

    /// Pass this product is priced in; riders without one price in pass 1
    pub fn pass(&self) -> Pass {
        match &self.calculation {
            Some(CalculationSpec { pass: Some(pass), .. }) => *pass,
            _ if self.kind == ProductKind::Waiver => Pass::Waiver,
            _ => Pass::Direct,
        }
    }

    pub fn accumulator_keys(&self) -> &[AccumulatorKey] {
        self.calculation.as_ref().map_or(&[], |c| &c.accumulator_keys)
    }

    pub fn stbh_terms(&self) -> &[StbhTerm] {
        self.calculation.as_ref().map_or(&[], |c| &c.stbh_terms)
    }

    /// Whether an attained age is still within the renewal limit
    ///
    /// Products without a renewal limit renew for life.
    pub fn renews_at(&self, age: u32) -> bool {
        self.max_renewal_age.map_or(true, |max| age <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stepped_sum_insured() {
        let growth = SumInsuredGrowth::Stepped {
            annual_rate: 0.05,
            max_years: 10,
        };
        assert_eq!(growth.sum_insured(1_000_000.0, 1), 1_000_000.0);
        assert!((growth.sum_insured(1_000_000.0, 3) - 1_100_000.0).abs() < 1e-6);
        assert!((growth.sum_insured(1_000_000.0, 11) - 1_500_000.0).abs() < 1e-6);
        assert!((growth.sum_insured(1_000_000.0, 30) - 1_500_000.0).abs() < 1e-6);
        assert_eq!(SumInsuredGrowth::Level.sum_insured(5.0, 40), 5.0);
    }

    #[test]
    fn test_pass_defaults() {
        let rider = ProductConfig::new("r", "Rider", ProductKind::Rider);
        assert_eq!(rider.pass(), Pass::Direct);

        let waiver = ProductConfig::new("w", "Waiver", ProductKind::Waiver);
        assert_eq!(waiver.pass(), Pass::Waiver);
        assert!(waiver.stbh_terms().is_empty());
        assert!(rider.renews_at(120));
    }
}
