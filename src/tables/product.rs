//! Investment-linked product features: acquisition fees, admin fees,
//! guaranteed interest, persistency bonuses and sum-insured bands

use std::collections::BTreeMap;

/// Premium component an initial fee applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PremiumComponent {
    Base,
    Extra,
}

/// Initial (acquisition) fee rates by policy year
///
/// Beyond the last listed year the last row applies.
#[derive(Debug, Clone)]
pub struct InitialFeeSchedule {
    /// `(base, extra)` rates, index 0 = policy year 1
    rows: Vec<(f64, f64)>,
}

impl InitialFeeSchedule {
    pub fn new(rows: Vec<(f64, f64)>) -> Self {
        Self { rows }
    }

    pub fn from_loaded(rows: &[(f64, f64)]) -> Self {
        Self::new(rows.to_vec())
    }

    pub fn standard() -> Self {
        Self::new(vec![
            (0.65, 0.02), // Year 1
            (0.45, 0.02), // Year 2
            (0.25, 0.02), // Year 3
            (0.15, 0.02), // Year 4
            (0.10, 0.02), // Year 5
            (0.00, 0.02), // Year 6+
        ])
    }

    pub fn rate(&self, policy_year: u32, component: PremiumComponent) -> f64 {
        let idx = (policy_year.max(1) as usize - 1).min(self.rows.len().saturating_sub(1));
        let Some(&(base, extra)) = self.rows.get(idx) else {
            return 0.0;
        };
        match component {
            PremiumComponent::Base => base,
            PremiumComponent::Extra => extra,
        }
    }
}

/// Flat monthly admin fee by calendar year
#[derive(Debug, Clone)]
pub struct AdminFeeSchedule {
    by_year: BTreeMap<i32, f64>,
    default_fee: f64,
}

impl AdminFeeSchedule {
    pub fn new(by_year: BTreeMap<i32, f64>, default_fee: f64) -> Self {
        Self { by_year, default_fee }
    }

    pub fn standard() -> Self {
        let by_year = BTreeMap::from([(2024, 40_000.0), (2025, 43_000.0), (2026, 45_000.0), (2027, 47_000.0)]);
        Self::new(by_year, 50_000.0)
    }

    pub fn monthly_fee(&self, calendar_year: i32) -> f64 {
        self.by_year.get(&calendar_year).copied().unwrap_or(self.default_fee)
    }
}

/// Guaranteed annual crediting rate by policy year
///
/// Beyond the last listed year the last rate applies.
#[derive(Debug, Clone)]
pub struct GuaranteedRates {
    rates: Vec<f64>,
}

impl GuaranteedRates {
    pub fn new(rates: Vec<f64>) -> Self {
        Self { rates }
    }

    pub fn from_loaded(rates: &[f64]) -> Self {
        Self::new(rates.to_vec())
    }

    pub fn standard() -> Self {
        let mut rates = vec![0.04, 0.04];
        rates.extend([0.035; 3]);
        rates.extend([0.03; 5]);
        rates.extend([0.025; 10]);
        rates.push(0.02); // Year 21+
        Self::new(rates)
    }

    pub fn rate(&self, policy_year: u32) -> f64 {
        let idx = (policy_year.max(1) as usize - 1).min(self.rates.len().saturating_sub(1));
        self.rates.get(idx).copied().unwrap_or(0.0)
    }
}

/// Persistency bonus rates, as a fraction of annual base premium
#[derive(Debug, Clone)]
pub struct PersistencyBonus {
    /// `(from_year, to_year, rate)` paid every year in range
    periodic: Vec<(u32, u32, f64)>,
    /// `(policy_year, rate)` paid once
    milestones: Vec<(u32, f64)>,
}

impl PersistencyBonus {
    pub fn new(periodic: Vec<(u32, u32, f64)>, milestones: Vec<(u32, f64)>) -> Self {
        Self { periodic, milestones }
    }

    pub fn standard() -> Self {
        Self::new(
            vec![(5, 9, 0.03), (10, 19, 0.05), (20, 99, 0.07)],
            vec![(10, 0.30), (20, 0.40), (30, 0.50)],
        )
    }

    pub fn periodic_rate(&self, policy_year: u32) -> f64 {
        self.periodic
            .iter()
            .find(|(from, to, _)| policy_year >= *from && policy_year <= *to)
            .map(|(_, _, rate)| *rate)
            .unwrap_or(0.0)
    }

    pub fn milestone_rate(&self, policy_year: u32) -> Option<f64> {
        self.milestones
            .iter()
            .find(|(year, _)| *year == policy_year)
            .map(|(_, rate)| *rate)
    }
}

/// Allowed sum insured as multiples of annual base premium, by issue age
#[derive(Debug, Clone)]
pub struct SumInsuredBands {
    /// `(min_age, max_age, min_factor, max_factor)`
    bands: Vec<(u32, u32, f64, f64)>,
}

impl SumInsuredBands {
    pub fn standard() -> Self {
        Self {
            bands: vec![
                (0, 9, 40.0, 100.0),
                (10, 19, 35.0, 90.0),
                (20, 29, 30.0, 80.0),
                (30, 39, 25.0, 70.0),
                (40, 49, 18.0, 50.0),
                (50, 59, 10.0, 30.0),
                (60, 70, 5.0, 15.0),
            ],
        }
    }

    /// `(min_factor, max_factor)` for an issue age
    pub fn factors(&self, age: u32) -> Option<(f64, f64)> {
        self.bands
            .iter()
            .find(|(lo, hi, _, _)| age >= *lo && age <= *hi)
            .map(|(_, _, min, max)| (*min, *max))
    }
}

/// All projection features for investment-linked products
#[derive(Debug, Clone)]
pub struct ProjectionFeatures {
    pub initial_fees: InitialFeeSchedule,
    pub admin_fees: AdminFeeSchedule,
    pub guaranteed: GuaranteedRates,
    pub bonus: PersistencyBonus,
    pub sum_insured_bands: SumInsuredBands,
}

impl Default for ProjectionFeatures {
    fn default() -> Self {
        Self {
            initial_fees: InitialFeeSchedule::standard(),
            admin_fees: AdminFeeSchedule::standard(),
            guaranteed: GuaranteedRates::standard(),
            bonus: PersistencyBonus::standard(),
            sum_insured_bands: SumInsuredBands::standard(),
        }
    }
}

impl ProjectionFeatures {
    /// Create from loaded CSV tables; sum-insured bands stay built in
    pub fn from_loaded(loaded: &super::loader::LoadedTables) -> Self {
        Self {
            initial_fees: InitialFeeSchedule::from_loaded(&loaded.initial_fees),
            admin_fees: AdminFeeSchedule::new(loaded.admin_fees.clone(), loaded.admin_fee_default),
            guaranteed: GuaranteedRates::from_loaded(&loaded.guaranteed_rates),
            bonus: PersistencyBonus::new(loaded.bonus_periodic.clone(), loaded.bonus_milestones.clone()),
            sum_insured_bands: SumInsuredBands::standard(),
        }
    }
}
