//! Cost-of-insurance rates for investment-linked products
//!
//! Rates are annual, per mille of the sum at risk, stored as
//! `(female, male)` indexed by attained age. The monthly charge is the
//! annual rate divided by 12.

use crate::customer::Gender;

/// Cost-of-insurance table by attained age and gender
#[derive(Debug, Clone)]
pub struct CoiTable {
    /// Annual per-mille rates by age (index = age), `(female, male)`
    base_rates: Vec<(f64, f64)>,
}

impl CoiTable {
    /// Built-in table
    pub fn standard() -> Self {
        Self::new(Self::standard_rates())
    }

    pub fn new(base_rates: Vec<(f64, f64)>) -> Self {
        Self { base_rates }
    }

    /// Create from loaded CSV tables
    pub fn from_loaded(loaded: &super::loader::LoadedTables) -> Self {
        Self::new(loaded.coi_rates.clone())
    }

    /// Annual per-mille rate; ages past the table use the last row
    pub fn annual_rate(&self, attained_age: u32, gender: Gender) -> f64 {
        let idx = (attained_age as usize).min(self.base_rates.len().saturating_sub(1));
        let Some(&(female, male)) = self.base_rates.get(idx) else {
            return 0.0;
        };
        match gender {
            Gender::Female => female,
            Gender::Male => male,
        }
    }

    /// Monthly per-mille rate
    pub fn monthly_rate(&self, attained_age: u32, gender: Gender) -> f64 {
        self.annual_rate(attained_age, gender) / 12.0
    }

    fn standard_rates() -> Vec<(f64, f64)> {
        vec![
            // Age 0-9
            (0.36, 0.514), (0.364, 0.52), (0.368, 0.526), (0.373, 0.533), (0.378, 0.54),
            (0.383, 0.548), (0.39, 0.556), (0.396, 0.566), (0.403, 0.576), (0.411, 0.587),
            // Age 10-19
            (0.42, 0.6), (0.429, 0.613), (0.439, 0.627), (0.45, 0.643), (0.462, 0.66),
            (0.475, 0.679), (0.489, 0.699), (0.505, 0.721), (0.522, 0.745), (0.54, 0.771),
            // Age 20-29
            (0.56, 0.8), (0.582, 0.831), (0.605, 0.865), (0.631, 0.902), (0.659, 0.942),
            (0.69, 0.985), (0.723, 1.033), (0.759, 1.085), (0.799, 1.141), (0.842, 1.202),
            // Age 30-39
            (0.888, 1.269), (0.939, 1.342), (0.994, 1.421), (1.055, 1.507), (1.12, 1.6),
            (1.192, 1.703), (1.27, 1.814), (1.354, 1.935), (1.446, 2.066), (1.547, 2.21),
            // Age 40-49
            (1.656, 2.366), (1.775, 2.536), (1.905, 2.721), (2.046, 2.922), (2.199, 3.142),
            (2.366, 3.381), (2.548, 3.641), (2.746, 3.924), (2.962, 4.232), (3.197, 4.567),
            // Age 50-59
            (3.453, 4.932), (3.731, 5.33), (4.034, 5.763), (4.364, 6.234), (4.723, 6.748),
            (5.114, 7.306), (5.54, 7.915), (6.004, 8.577), (6.509, 9.298), (7.058, 10.083),
            // Age 60-69
            (7.656, 10.937), (8.307, 11.868), (9.017, 12.881), (9.789, 13.984), (10.629, 15.184),
            (11.544, 16.491), (12.54, 17.915), (13.625, 19.464), (14.806, 21.151), (16.091, 22.987),
            // Age 70-79
            (17.491, 24.987), (19.015, 27.164), (20.674, 29.534), (22.48, 32.114), (24.446, 34.923),
            (26.587, 37.981), (28.918, 41.311), (31.455, 44.936), (34.218, 48.883), (37.226, 53.18),
            // Age 80-89
            (40.5, 57.858), (44.065, 62.951), (47.947, 68.496), (52.173, 74.532), (56.773, 81.105),
            (61.782, 88.26), (67.235, 96.05), (73.172, 104.532), (79.636, 113.766), (86.673, 123.819),
            // Age 90-99
            (94.335, 134.764), (102.676, 146.68), (111.757, 159.653), (121.644, 173.777), (132.408, 189.154),
            (144.126, 205.895), (156.885, 224.121), (170.775, 243.965), (185.898, 265.569), (202.363, 289.089),
        ]
    }
}
