//! Projection state tracking for a single contract

/// State of the account at a point in time during projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current projection month (1-indexed)
    pub projection_month: u32,

    /// Policy year (1-indexed)
    pub policy_year: u32,

    /// Month within policy year (1-12)
    pub month_in_policy_year: u32,

    pub attained_age: u32,

    /// Account value carried between months
    pub account_value: f64,

    issue_age: u32,
}

impl ProjectionState {
    /// State just before the first month
    pub fn new(issue_age: u32) -> Self {
        Self {
            projection_month: 0,
            policy_year: 1,
            month_in_policy_year: 0,
            attained_age: issue_age,
            account_value: 0.0,
            issue_age,
        }
    }

    /// Move timing forward one month
    pub fn advance_month(&mut self) {
        self.projection_month += 1;
        if self.month_in_policy_year == 12 {
            self.policy_year += 1;
            self.month_in_policy_year = 1;
        } else {
            self.month_in_policy_year += 1;
        }
        self.attained_age = self.issue_age + self.policy_year - 1;
    }

    pub fn is_year_end(&self) -> bool {
        self.month_in_policy_year == 12
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_advance_month_rolls_policy_year() {
        let mut state = ProjectionState::new(30);
        for _ in 0..12 {
            state.advance_month();
        }
        assert_eq!(state.projection_month, 12);
        assert_eq!(state.policy_year, 1);
        assert!(state.is_year_end());

        state.advance_month();
        assert_eq!(state.policy_year, 2);
        assert_eq!(state.month_in_policy_year, 1);
        assert_eq!(state.attained_age, 31);
    }
}
