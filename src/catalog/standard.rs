//! Built-in product catalog

use crate::calc::CalcKey;
use crate::rules::{Rule, RuleSet};
use crate::tables::MainRateTable;

use super::product::{
    AccumulatorKey, BonusStyle, CalculationSpec, MainGroup, Pass, ProductConfig, ProductKind,
    ProjectionProfile, StbhTerm, SumInsuredGrowth, TermRule,
};

/// Fixed sum insured of the package product
pub const PACKAGE_SUM_INSURED: u64 = 100_000_000;
pub const PACKAGE_TERM: u32 = 10;

fn ages(min: u32, max: u32) -> Rule {
    Rule::AgeRange {
        min: Some(min),
        max: Some(max),
    }
}

fn main_product(
    id: &str,
    name: &str,
    group: MainGroup,
    key: CalcKey,
    term_rule: TermRule,
    issue_ages: (u32, u32),
) -> ProductConfig {
    ProductConfig {
        eligibility: Some(RuleSet::Rules(vec![ages(issue_ages.0, issue_ages.1)])),
        calculation: Some(CalculationSpec::new(key)),
        term_rule: Some(term_rule),
        ..ProductConfig::new(id, name, ProductKind::Main(group))
    }
}

fn rider(id: &str, name: &str, key: CalcKey, eligibility: Vec<Rule>, max_renewal_age: u32) -> ProductConfig {
    ProductConfig {
        eligibility: Some(RuleSet::Rules(eligibility)),
        max_renewal_age: Some(max_renewal_age),
        calculation: Some(CalculationSpec::new(key).in_pass(Pass::Direct)),
        // package riders are a fixed list
        disabled: Some(RuleSet::Rules(vec![Rule::MainGroupIs {
            group: MainGroup::Package,
        }])),
        ..ProductConfig::new(id, name, ProductKind::Rider)
    }
}

pub(super) fn standard_products() -> Vec<ProductConfig> {
    let mut products = vec![
        ProductConfig {
            projection: Some(ProjectionProfile {
                bonus: BonusStyle::Milestone,
                growth: SumInsuredGrowth::Level,
            }),
            ..main_product(
                "PUL_TRON_DOI",
                "PUL Trọn Đời",
                MainGroup::UnitLinked,
                CalcKey::DirectInput,
                TermRule::UserInput,
                (0, 70),
            )
        },
        ProductConfig {
            projection: Some(ProjectionProfile {
                bonus: BonusStyle::Milestone,
                growth: SumInsuredGrowth::Stepped {
                    annual_rate: 0.05,
                    max_years: 10,
                },
            }),
            ..main_product(
                "PUL_TANG_TRUONG",
                "PUL Tăng Trưởng",
                MainGroup::UnitLinked,
                CalcKey::DirectInput,
                TermRule::UserInput,
                (0, 60),
            )
        },
        ProductConfig {
            projection: Some(ProjectionProfile {
                bonus: BonusStyle::Periodic,
                growth: SumInsuredGrowth::Level,
            }),
            ..main_product(
                "MUL_LINH_HOAT",
                "MUL Linh Hoạt",
                MainGroup::MarketUnitLinked,
                CalcKey::DirectInput,
                TermRule::UserInput,
                (0, 70),
            )
        },
        main_product(
            "KHOE_TRON_VEN",
            "Khỏe Trọn Vẹn",
            MainGroup::WholeLife,
            CalcKey::RateTableMain {
                table: MainRateTable::WholeLife,
            },
            TermRule::UserInput,
            (0, 65),
        ),
        main_product(
            "AN_BINH_UU_VIET",
            "An Bình Ưu Việt",
            MainGroup::TermEndowment,
            CalcKey::TermBanded,
            TermRule::SelectedTerm {
                options: vec![5, 10, 15],
            },
            (0, 60),
        ),
        main_product(
            "VUNG_TAM_AN",
            "Vững Tâm An",
            MainGroup::FixedTerm,
            CalcKey::RateTableMain {
                table: MainRateTable::FixedTerm,
            },
            TermRule::Fixed { years: 10 },
            (18, 60),
        ),
        ProductConfig {
            package_riders: vec!["health_scl".to_string()],
            ..main_product(
                "TRON_TAM_AN",
                "Trọn Tâm An",
                MainGroup::Package,
                CalcKey::PackageProxy {
                    underlying: "AN_BINH_UU_VIET".to_string(),
                    stbh: PACKAGE_SUM_INSURED,
                    term: PACKAGE_TERM,
                },
                TermRule::Fixed { years: PACKAGE_TERM },
                (0, 55),
            )
        },
    ];

    let mut health = rider("health_scl", "Sức Khỏe Toàn Diện", CalcKey::Health, vec![ages(0, 65)], 74);
    health.mandatory = Some(RuleSet::Rules(vec![Rule::InPackage]));
    health.disabled = None;

    let mut hospital = rider(
        "hospital_support",
        "Hỗ Trợ Chi Phí Nằm Viện",
        CalcKey::HospitalSupport,
        vec![ages(0, 55)],
        65,
    );
    if let Some(calc) = hospital.calculation.as_mut() {
        calc.accumulator_keys.push(AccumulatorKey::HospitalSupportStbh);
    }

    products.extend([
        health,
        rider("bhn", "Bệnh Hiểm Nghèo", CalcKey::CriticalIllness, vec![ages(0, 70)], 85),
        rider(
            "accident",
            "Tai Nạn",
            CalcKey::Accident,
            vec![ages(0, 64), Rule::RiskGroupClassified],
            65,
        ),
        hospital,
        ProductConfig {
            max_renewal_age: Some(60),
            calculation: Some(CalculationSpec {
                key: CalcKey::Waiver,
                pass: Some(Pass::Waiver),
                accumulator_keys: Vec::new(),
                stbh_terms: vec![StbhTerm::MainBase, StbhTerm::RidersAll, StbhTerm::RidersExceptTarget],
            }),
            ..ProductConfig::new("mdp3", "Miễn Đóng Phí 3.0", ProductKind::Waiver)
        },
    ]);

    products
}
