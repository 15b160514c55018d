//! Account-value output structures for projections

use serde::{Deserialize, Serialize};

use crate::calc::Vnd;

use super::engine::InterestScenario;

/// A single row of projection output for one month
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountRow {
    // Timing
    pub projection_month: u32,
    pub policy_year: u32,
    pub month_in_policy_year: u32,
    pub attained_age: u32,

    pub bop_av: f64,

    // Premium
    pub premium: f64,
    pub initial_fee: f64,

    // Charges
    pub admin_fee: f64,
    pub sum_insured: f64,
    pub sum_at_risk: f64,
    pub coi: f64,

    // Crediting
    pub annual_rate: f64,
    pub interest: f64,
    pub bonus: f64,

    pub eop_av: f64,
}

impl AccountRow {
    pub fn new(projection_month: u32) -> Self {
        Self {
            projection_month,
            policy_year: 1,
            month_in_policy_year: 1,
            ..Default::default()
        }
    }
}

/// Account value at the end of a policy year
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearEndValue {
    pub policy_year: u32,
    pub attained_age: u32,
    /// Floored to whole dong
    pub account_value: Vnd,
}

/// Results of projecting one contract under one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub product_id: String,
    pub scenario: InterestScenario,
    /// Monthly rows; empty unless detailed output was requested
    pub rows: Vec<AccountRow>,
    pub year_end: Vec<YearEndValue>,
    totals: ProjectionSummary,
}

impl ProjectionResult {
    pub fn new(product_id: impl Into<String>, scenario: InterestScenario) -> Self {
        Self {
            product_id: product_id.into(),
            scenario,
            rows: Vec::new(),
            year_end: Vec::new(),
            totals: ProjectionSummary::default(),
        }
    }

    /// Record a month; keeps the row itself only when `detailed`
    pub fn add_row(&mut self, row: AccountRow, detailed: bool) {
        let totals = &mut self.totals;
        totals.total_months += 1;
        totals.total_premium += row.premium;
        totals.total_initial_fees += row.initial_fee;
        totals.total_admin_fees += row.admin_fee;
        totals.total_coi += row.coi;
        totals.total_interest += row.interest;
        totals.total_bonus += row.bonus;
        totals.final_av = row.eop_av;

        if row.month_in_policy_year == 12 {
            self.year_end.push(YearEndValue {
                policy_year: row.policy_year,
                attained_age: row.attained_age,
                account_value: row.eop_av.max(0.0).floor() as Vnd,
            });
        }
        if detailed {
            self.rows.push(row);
        }
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        self.totals.clone()
    }

    /// Year-end account values in policy-year order
    pub fn year_end_values(&self) -> Vec<Vnd> {
        self.year_end.iter().map(|v| v.account_value).collect()
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub total_premium: f64,
    pub total_initial_fees: f64,
    pub total_admin_fees: f64,
    pub total_coi: f64,
    pub total_interest: f64,
    pub total_bonus: f64,
    pub final_av: f64,
}
