//! Rule engine for product eligibility, mandatory and disabled flags
//!
//! Rules are a closed set of predicates over an immutable context. AND
//! and OR treat an absent rule set differently: no rules under AND means
//! "always eligible", no rules under OR means "never applies". Rule kinds
//! this build does not know (from a newer catalog file) pass.

use serde::{Deserialize, Serialize};

use crate::catalog::{MainGroup, ProductConfig};
use crate::customer::{Gender, Person};

/// A single predicate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rule {
    /// Customer age within `[min, max]`; a missing bound is open
    AgeRange {
        #[serde(default)]
        min: Option<u32>,
        #[serde(default)]
        max: Option<u32>,
    },
    GenderIs { gender: Gender },
    /// Customer occupation class is not one of `groups`
    RiskGroupNotIn { groups: Vec<u8> },
    /// Customer has an occupation class (1-4)
    RiskGroupClassified,
    /// The selected main product belongs to `group`
    MainGroupIs { group: MainGroup },
    /// Customer is (or is not) the main insured
    IsMainInsured { expected: bool },
    /// Product is in the selected package's fixed rider list
    InPackage,
    #[serde(other)]
    Unknown,
}

/// Rule set as written in a product config: a bare flag or a list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RuleSet {
    Flag(bool),
    Rules(Vec<Rule>),
}

impl From<Vec<Rule>> for RuleSet {
    fn from(rules: Vec<Rule>) -> Self {
        RuleSet::Rules(rules)
    }
}

/// Everything a rule may look at
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub customer: &'a Person,
    pub main_product: Option<&'a ProductConfig>,
    /// Product whose rules are being evaluated
    pub product_id: &'a str,
}

impl<'a> RuleContext<'a> {
    pub fn new(customer: &'a Person, main_product: Option<&'a ProductConfig>, product_id: &'a str) -> Self {
        Self {
            customer,
            main_product,
            product_id,
        }
    }
}

/// All rules must pass; no rules passes
pub fn evaluate_and(rules: Option<&RuleSet>, ctx: &RuleContext<'_>) -> bool {
    match rules {
        None => true,
        Some(RuleSet::Flag(flag)) => *flag,
        Some(RuleSet::Rules(rules)) => rules.iter().all(|r| evaluate_single(r, ctx)),
    }
}

/// At least one rule must pass; no rules fails
pub fn evaluate_or(rules: Option<&RuleSet>, ctx: &RuleContext<'_>) -> bool {
    match rules {
        None => false,
        Some(RuleSet::Flag(flag)) => *flag,
        Some(RuleSet::Rules(rules)) => rules.iter().any(|r| evaluate_single(r, ctx)),
    }
}

pub fn evaluate_single(rule: &Rule, ctx: &RuleContext<'_>) -> bool {
    let customer = ctx.customer;
    match rule {
        Rule::AgeRange { min, max } => {
            min.map_or(true, |m| customer.age >= m) && max.map_or(true, |m| customer.age <= m)
        }
        Rule::GenderIs { gender } => customer.gender == *gender,
        Rule::RiskGroupNotIn { groups } => !groups.contains(&customer.risk_group),
        Rule::RiskGroupClassified => (1..=4).contains(&customer.risk_group),
        Rule::MainGroupIs { group } => ctx.main_product.and_then(|p| p.main_group()) == Some(*group),
        Rule::IsMainInsured { expected } => customer.is_main == *expected,
        Rule::InPackage => ctx
            .main_product
            .map_or(false, |p| p.package_riders.iter().any(|id| id == ctx.product_id)),
        Rule::Unknown => true,
    }
}

/// Selection flags for one rider on one person
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RiderFlags {
    pub eligible: bool,
    pub mandatory: bool,
    pub disabled: bool,
}

impl RiderFlags {
    /// Whether the rider may be priced
    pub fn priceable(&self) -> bool {
        self.eligible && !self.disabled
    }
}

pub fn rider_flags(product: &ProductConfig, ctx: &RuleContext<'_>) -> RiderFlags {
    RiderFlags {
        eligible: evaluate_and(product.eligibility.as_ref(), ctx),
        mandatory: evaluate_or(product.mandatory.as_ref(), ctx),
        disabled: evaluate_or(product.disabled.as_ref(), ctx),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn person(age: u32, risk_group: u8) -> Person {
        Person::new("p1", age, Gender::Female, risk_group, true)
    }

    #[test]
    fn test_empty_rule_sets_are_asymmetric() {
        let customer = person(30, 1);
        let ctx = RuleContext::new(&customer, None, "x");
        let empty = RuleSet::Rules(Vec::new());

        assert!(evaluate_and(None, &ctx));
        assert!(evaluate_and(Some(&empty), &ctx));
        assert!(!evaluate_or(None, &ctx));
        assert!(!evaluate_or(Some(&empty), &ctx));
    }

    #[test]
    fn test_bare_flag_returns_itself() {
        let customer = person(30, 1);
        let ctx = RuleContext::new(&customer, None, "x");
        for flag in [true, false] {
            assert_eq!(evaluate_and(Some(&RuleSet::Flag(flag)), &ctx), flag);
            assert_eq!(evaluate_or(Some(&RuleSet::Flag(flag)), &ctx), flag);
        }
    }

    #[test]
    fn test_age_and_risk_rules() {
        let adult = person(40, 0);
        let ctx = RuleContext::new(&adult, None, "x");
        let rules: RuleSet = vec![Rule::AgeRange { min: Some(18), max: Some(60) }].into();
        assert!(evaluate_and(Some(&rules), &ctx));

        let rules: RuleSet = vec![Rule::AgeRange { min: Some(18), max: Some(60) }, Rule::RiskGroupClassified].into();
        assert!(!evaluate_and(Some(&rules), &ctx));
        assert!(evaluate_or(Some(&rules), &ctx));

        let mut heavy = person(40, 4);
        heavy.gender = Gender::Male;
        let ctx = RuleContext::new(&heavy, None, "x");
        assert!(!evaluate_single(&Rule::RiskGroupNotIn { groups: vec![4] }, &ctx));
        assert!(evaluate_single(&Rule::GenderIs { gender: Gender::Male }, &ctx));
        assert!(!evaluate_single(&Rule::IsMainInsured { expected: false }, &ctx));
    }

    #[test]
    fn test_unknown_rule_kind_fails_open() {
        let rules: RuleSet =
            serde_json::from_str(r#"[{"kind": "credit_score_above", "score": 700}, {"kind": "age_range", "max": 50}]"#)
                .unwrap();
        assert_eq!(
            rules,
            RuleSet::Rules(vec![Rule::Unknown, Rule::AgeRange { min: None, max: Some(50) }])
        );

        let customer = person(30, 1);
        let ctx = RuleContext::new(&customer, None, "x");
        assert!(evaluate_and(Some(&rules), &ctx));
        assert!(evaluate_single(&Rule::Unknown, &ctx));
    }

    #[test]
    fn test_package_rules() {
        let catalog = Catalog::standard();
        let package = catalog.get("TRON_TAM_AN").unwrap();
        let whole_life = catalog.get("KHOE_TRON_VEN").unwrap();
        let customer = person(30, 1);

        let health = catalog.get("health_scl").unwrap();
        let in_package = rider_flags(health, &RuleContext::new(&customer, Some(package), "health_scl"));
        assert!(in_package.mandatory);
        assert!(in_package.eligible);

        let standalone = rider_flags(health, &RuleContext::new(&customer, Some(whole_life), "health_scl"));
        assert!(!standalone.mandatory);
        assert!(!standalone.disabled);

        let accident = catalog.get("accident").unwrap();
        let flags = rider_flags(accident, &RuleContext::new(&customer, Some(package), "accident"));
        assert!(flags.disabled);
        assert!(!flags.priceable());

        assert!(evaluate_single(
            &Rule::MainGroupIs { group: MainGroup::Package },
            &RuleContext::new(&customer, Some(package), "accident")
        ));
        assert!(!evaluate_single(
            &Rule::MainGroupIs { group: MainGroup::Package },
            &RuleContext::new(&customer, None, "accident")
        ));
    }
}
