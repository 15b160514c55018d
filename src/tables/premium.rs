//! Premium rate tables for main products and riders
//!
//! Rates are per mille of sum insured unless noted. Health fees are annual
//! amounts in VND. Hospital support rates are per 100 VND of daily cash.

use serde::{Deserialize, Serialize};

use super::rate_table::{GenderRateTable, GenderRates, RateTable, TermRateTable};

/// Which exact-age table a rate-table main product reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MainRateTable {
    WholeLife,
    FixedTerm,
}

/// Annual health fees by program tier (Basic, Advanced, Comprehensive, Premier)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HealthRates {
    pub domestic: [f64; 4],
    pub global: [f64; 4],
    pub outpatient: [f64; 4],
    pub dental: [f64; 4],
}

/// All premium tables, loaded once and shared read-only
#[derive(Debug, Clone)]
pub struct PremiumTables {
    pub whole_life: GenderRateTable,
    pub fixed_term: GenderRateTable,
    pub endowment: TermRateTable,
    pub critical_illness: GenderRateTable,
    /// Per mille by occupation class 1-4
    pub accident: [f64; 4],
    pub hospital_support: RateTable<f64>,
    pub health: RateTable<HealthRates>,
    pub waiver: GenderRateTable,
}

impl Default for PremiumTables {
    fn default() -> Self {
        Self {
            whole_life: GenderRateTable::from_pairs(0, Self::whole_life_rates()),
            fixed_term: GenderRateTable::from_pairs(18, Self::fixed_term_rates()),
            endowment: TermRateTable::by_term(vec![
                (5, GenderRateTable::from_pairs(0, Self::endowment_5_rates())),
                (10, GenderRateTable::from_pairs(0, Self::endowment_10_rates())),
                (15, GenderRateTable::from_pairs(0, Self::endowment_15_rates())),
            ]),
            critical_illness: Self::critical_illness_rates(),
            accident: [0.9, 1.3, 1.8, 2.6],
            hospital_support: RateTable::by_age_band(vec![
                (0, 4, 0.9),
                (5, 17, 0.45),
                (18, 40, 0.5),
                (41, 50, 0.65),
                (51, 55, 0.85),
                (56, 65, 1.15),
            ]),
            health: Self::health_rates(),
            waiver: GenderRateTable::from_pairs(18, Self::waiver_rates()),
        }
    }
}

impl PremiumTables {
    pub fn main_table(&self, table: MainRateTable) -> &GenderRateTable {
        match table {
            MainRateTable::WholeLife => &self.whole_life,
            MainRateTable::FixedTerm => &self.fixed_term,
        }
    }

    /// Accident rate for an occupation class; 0 and >4 are not insurable
    pub fn accident_rate(&self, risk_group: u8) -> Option<f64> {
        match risk_group {
            1..=4 => Some(self.accident[(risk_group - 1) as usize]),
            _ => None,
        }
    }

    /// Whole-life main product, (female, male) from age 0
    fn whole_life_rates() -> Vec<(f64, f64)> {
        vec![
            // Age 0-9
            (8.0, 8.96), (8.56, 9.59), (9.15, 10.25), (9.76, 10.93), (10.39, 11.64),
            (11.05, 12.38), (11.73, 13.14), (12.44, 13.93), (13.17, 14.75), (13.92, 15.59),
            // Age 10-19
            (14.7, 16.46), (15.5, 17.36), (16.33, 18.29), (17.18, 19.24), (18.05, 20.22),
            (18.95, 21.22), (19.87, 22.26), (20.82, 23.32), (21.79, 24.4), (22.78, 25.52),
            // Age 20-29
            (23.8, 26.66), (24.84, 27.82), (25.91, 29.02), (27.0, 30.24), (28.11, 31.49),
            (29.25, 32.76), (30.41, 34.06), (31.6, 35.39), (32.81, 36.74), (34.04, 38.13),
            // Age 30-39
            (35.3, 39.54), (36.58, 40.97), (37.89, 42.43), (39.22, 43.92), (40.57, 45.44),
            (41.95, 46.98), (43.35, 48.55), (44.78, 50.15), (46.23, 51.78), (47.7, 53.43),
            // Age 40-49
            (49.2, 55.1), (50.72, 56.81), (52.27, 58.54), (53.84, 60.3), (55.43, 62.08),
            (57.05, 63.9), (58.69, 65.74), (60.36, 67.6), (62.05, 69.49), (63.76, 71.41),
            // Age 50-59
            (65.5, 73.36), (67.26, 75.33), (69.05, 77.33), (70.86, 79.36), (72.69, 81.42),
            (74.55, 83.5), (76.43, 85.6), (78.34, 87.74), (80.27, 89.9), (82.22, 92.09),
            // Age 60-65
            (84.2, 94.3), (86.2, 96.55), (88.23, 98.82), (90.28, 101.11), (92.35, 103.43),
            (94.45, 105.78),
        ]
    }

    /// Ten-year term product, (female, male) from age 18
    fn fixed_term_rates() -> Vec<(f64, f64)> {
        vec![
            // Age 18-19
            (1.55, 2.02), (1.6, 2.09),
            // Age 20-29
            (1.66, 2.16), (1.72, 2.23), (1.78, 2.31), (1.84, 2.39), (1.9, 2.47),
            (1.96, 2.55), (2.03, 2.64), (2.1, 2.72), (2.17, 2.82), (2.24, 2.91),
            // Age 30-39
            (2.31, 3.0), (2.38, 3.1), (2.46, 3.2), (2.54, 3.3), (2.62, 3.41),
            (2.7, 3.51), (2.79, 3.62), (2.87, 3.73), (2.96, 3.85), (3.05, 3.96),
            // Age 40-49
            (3.14, 4.08), (3.23, 4.2), (3.33, 4.33), (3.42, 4.45), (3.52, 4.58),
            (3.62, 4.71), (3.72, 4.84), (3.83, 4.98), (3.93, 5.11), (4.04, 5.25),
            // Age 50-59
            (4.15, 5.4), (4.26, 5.54), (4.37, 5.69), (4.49, 5.83), (4.6, 5.99),
            (4.72, 6.14), (4.84, 6.3), (4.96, 6.45), (5.09, 6.61), (5.21, 6.78),
            // Age 60-60
            (5.34, 6.94),
        ]
    }

    fn endowment_5_rates() -> Vec<(f64, f64)> {
        vec![
            // Age 0-9
            (182.0, 182.0), (182.09, 182.12), (182.2, 182.24), (182.31, 182.38), (182.42, 182.52),
            (182.55, 182.68), (182.68, 182.84), (182.83, 183.02), (182.98, 183.2), (183.13, 183.4),
            // Age 10-19
            (183.3, 183.6), (183.47, 183.81), (183.66, 184.04), (183.85, 184.28), (184.04, 184.52),
            (184.25, 184.78), (184.46, 185.04), (184.69, 185.31), (184.92, 185.6), (185.15, 185.9),
            // Age 20-29
            (185.4, 186.2), (185.65, 186.52), (185.92, 186.84), (186.19, 187.18), (186.46, 187.52),
            (186.75, 187.88), (187.04, 188.24), (187.35, 188.62), (187.66, 189.0), (187.97, 189.4),
            // Age 30-39
            (188.3, 189.8), (188.63, 190.22), (188.98, 190.64), (189.33, 191.07), (189.68, 191.52),
            (190.05, 191.97), (190.42, 192.44), (190.81, 192.91), (191.2, 193.4), (191.59, 193.89),
            // Age 40-49
            (192.0, 194.4), (192.41, 194.91), (192.84, 195.44), (193.27, 195.97), (193.7, 196.52),
            (194.15, 197.07), (194.6, 197.64), (195.07, 198.21), (195.54, 198.8), (196.01, 199.39),
            // Age 50-59
            (196.5, 200.0), (196.99, 200.62), (197.5, 201.24), (198.01, 201.88), (198.52, 202.52),
            (199.05, 203.18), (199.58, 203.84), (200.13, 204.52), (200.68, 205.2), (201.23, 205.9),
            // Age 60-60
            (201.8, 206.6),
        ]
    }

    fn endowment_10_rates() -> Vec<(f64, f64)> {
        vec![
            // Age 0-9
            (88.0, 88.0), (88.09, 88.11), (88.2, 88.24), (88.31, 88.38), (88.42, 88.52),
            (88.55, 88.67), (88.68, 88.84), (88.83, 89.02), (88.98, 89.2), (89.13, 89.39),
            // Age 10-19
            (89.3, 89.6), (89.47, 89.81), (89.66, 90.04), (89.85, 90.28), (90.04, 90.52),
            (90.25, 90.78), (90.46, 91.04), (90.69, 91.31), (90.92, 91.6), (91.15, 91.9),
            // Age 20-29
            (91.4, 92.2), (91.65, 92.52), (91.92, 92.84), (92.19, 93.17), (92.46, 93.52),
            (92.75, 93.88), (93.04, 94.24), (93.35, 94.61), (93.66, 95.0), (93.97, 95.39),
            // Age 30-39
            (94.3, 95.8), (94.63, 96.22), (94.98, 96.64), (95.33, 97.07), (95.68, 97.52),
            (96.05, 97.97), (96.42, 98.44), (96.81, 98.91), (97.2, 99.4), (97.59, 99.9),
            // Age 40-49
            (98.0, 100.4), (98.41, 100.92), (98.84, 101.44), (99.27, 101.98), (99.7, 102.52),
            (100.15, 103.08), (100.6, 103.64), (101.07, 104.22), (101.54, 104.8), (102.01, 105.39),
            // Age 50-55
            (102.5, 106.0), (102.99, 106.61), (103.5, 107.24), (104.01, 107.88), (104.52, 108.52),
            (105.05, 109.17),
        ]
    }

    fn endowment_15_rates() -> Vec<(f64, f64)> {
        vec![
            // Age 0-9
            (55.0, 55.0), (55.09, 55.12), (55.2, 55.24), (55.31, 55.38), (55.42, 55.52),
            (55.55, 55.67), (55.68, 55.84), (55.83, 56.02), (55.98, 56.2), (56.13, 56.4),
            // Age 10-19
            (56.3, 56.6), (56.47, 56.81), (56.66, 57.04), (56.85, 57.27), (57.04, 57.52),
            (57.25, 57.77), (57.46, 58.04), (57.69, 58.31), (57.92, 58.6), (58.15, 58.9),
            // Age 20-29
            (58.4, 59.2), (58.65, 59.52), (58.92, 59.84), (59.19, 60.18), (59.46, 60.52),
            (59.75, 60.88), (60.04, 61.24), (60.35, 61.62), (60.66, 62.0), (60.97, 62.39),
            // Age 30-39
            (61.3, 62.8), (61.63, 63.21), (61.98, 63.64), (62.33, 64.08), (62.68, 64.52),
            (63.05, 64.98), (63.42, 65.44), (63.81, 65.92), (64.2, 66.4), (64.59, 66.89),
            // Age 40-49
            (65.0, 67.4), (65.41, 67.91), (65.84, 68.44), (66.27, 68.98), (66.7, 69.52),
            (67.15, 70.08), (67.6, 70.64), (68.07, 71.22), (68.54, 71.8), (69.01, 72.39),
            // Age 50-50
            (69.5, 73.0),
        ]
    }

    /// Waiver of premium, per mille of the waived premium base, from age 18
    fn waiver_rates() -> Vec<(f64, f64)> {
        vec![
            // Age 18-19
            (4.07, 4.68), (4.18, 4.81),
            // Age 20-29
            (4.3, 4.94), (4.42, 5.08), (4.55, 5.23), (4.67, 5.37), (4.8, 5.52),
            (4.94, 5.68), (5.07, 5.84), (5.21, 6.0), (5.36, 6.16), (5.5, 6.33),
            // Age 30-39
            (5.65, 6.5), (5.8, 6.67), (5.96, 6.85), (6.11, 7.03), (6.27, 7.22),
            (6.44, 7.4), (6.6, 7.59), (6.77, 7.79), (6.95, 7.99), (7.12, 8.19),
            // Age 40-49
            (7.3, 8.39), (7.48, 8.6), (7.67, 8.82), (7.85, 9.03), (8.04, 9.25),
            (8.24, 9.47), (8.43, 9.7), (8.63, 9.93), (8.84, 10.16), (9.04, 10.4),
            // Age 50-59
            (9.25, 10.64), (9.46, 10.88), (9.68, 11.13), (9.89, 11.38), (10.11, 11.63),
            (10.34, 11.89), (10.56, 12.15), (10.79, 12.41), (11.03, 12.68), (11.26, 12.95),
            // Age 60-60
            (11.5, 13.22),
        ]
    }

    fn critical_illness_rates() -> GenderRateTable {
        let band = |min, max, female, male| (min, max, GenderRates { female, male });
        RateTable::by_age_band(vec![
            band(0, 17, 1.2, 1.3),
            band(18, 30, 1.6, 1.5),
            band(31, 35, 2.3, 2.2),
            band(36, 40, 3.4, 3.6),
            band(41, 45, 5.1, 5.9),
            band(46, 50, 7.6, 9.4),
            band(51, 55, 11.2, 14.8),
            band(56, 60, 16.5, 22.3),
            band(61, 65, 23.9, 32.6),
            band(66, 70, 33.8, 46.1),
            band(71, 75, 46.5, 63.0),
            band(76, 85, 64.0, 88.0),
        ])
    }

    fn health_rates() -> RateTable<HealthRates> {
        RateTable::by_age_band(vec![
            (
                0,
                4,
                HealthRates {
                    domestic: [2_100_000.0, 3_780_000.0, 6_300_000.0, 10_500_000.0],
                    global: [3_360_000.0, 6_048_000.0, 10_080_000.0, 16_800_000.0],
                    outpatient: [1_600_000.0, 2_880_000.0, 4_800_000.0, 8_000_000.0],
                    dental: [350_000.0, 600_000.0, 950_000.0, 1_400_000.0],
                },
            ),
            (
                5,
                9,
                HealthRates {
                    domestic: [1_500_000.0, 2_700_000.0, 4_500_000.0, 7_500_000.0],
                    global: [2_400_000.0, 4_320_000.0, 7_200_000.0, 12_000_000.0],
                    outpatient: [1_000_000.0, 1_800_000.0, 3_000_000.0, 5_000_000.0],
                    dental: [350_000.0, 600_000.0, 950_000.0, 1_400_000.0],
                },
            ),
            (
                10,
                17,
                HealthRates {
                    domestic: [1_250_000.0, 2_250_000.0, 3_750_000.0, 6_250_000.0],
                    global: [2_000_000.0, 3_600_000.0, 6_000_000.0, 10_000_000.0],
                    outpatient: [800_000.0, 1_440_000.0, 2_400_000.0, 4_000_000.0],
                    dental: [350_000.0, 600_000.0, 950_000.0, 1_400_000.0],
                },
            ),
            (
                18,
                29,
                HealthRates {
                    domestic: [1_300_000.0, 2_340_000.0, 3_900_000.0, 6_500_000.0],
                    global: [2_080_000.0, 3_744_000.0, 6_240_000.0, 10_400_000.0],
                    outpatient: [850_000.0, 1_530_000.0, 2_550_000.0, 4_250_000.0],
                    dental: [350_000.0, 600_000.0, 950_000.0, 1_400_000.0],
                },
            ),
            (
                30,
                39,
                HealthRates {
                    domestic: [1_450_000.0, 2_610_000.0, 4_350_000.0, 7_250_000.0],
                    global: [2_320_000.0, 4_176_000.0, 6_960_000.0, 11_600_000.0],
                    outpatient: [900_000.0, 1_620_000.0, 2_700_000.0, 4_500_000.0],
                    dental: [350_000.0, 600_000.0, 950_000.0, 1_400_000.0],
                },
            ),
            (
                40,
                49,
                HealthRates {
                    domestic: [1_900_000.0, 3_420_000.0, 5_700_000.0, 9_500_000.0],
                    global: [3_040_000.0, 5_472_000.0, 9_120_000.0, 15_200_000.0],
                    outpatient: [1_100_000.0, 1_980_000.0, 3_300_000.0, 5_500_000.0],
                    dental: [350_000.0, 600_000.0, 950_000.0, 1_400_000.0],
                },
            ),
            (
                50,
                59,
                HealthRates {
                    domestic: [2_700_000.0, 4_860_000.0, 8_100_000.0, 13_500_000.0],
                    global: [4_320_000.0, 7_776_000.0, 12_960_000.0, 21_600_000.0],
                    outpatient: [1_500_000.0, 2_700_000.0, 4_500_000.0, 7_500_000.0],
                    dental: [350_000.0, 600_000.0, 950_000.0, 1_400_000.0],
                },
            ),
            (
                60,
                65,
                HealthRates {
                    domestic: [3_600_000.0, 6_480_000.0, 10_800_000.0, 18_000_000.0],
                    global: [5_760_000.0, 10_368_000.0, 17_280_000.0, 28_800_000.0],
                    outpatient: [2_000_000.0, 3_600_000.0, 6_000_000.0, 10_000_000.0],
                    dental: [350_000.0, 600_000.0, 950_000.0, 1_400_000.0],
                },
            ),
            (
                66,
                70,
                HealthRates {
                    domestic: [4_600_000.0, 8_280_000.0, 13_800_000.0, 23_000_000.0],
                    global: [7_360_000.0, 13_248_000.0, 22_080_000.0, 36_800_000.0],
                    outpatient: [2_600_000.0, 4_680_000.0, 7_800_000.0, 13_000_000.0],
                    dental: [350_000.0, 600_000.0, 950_000.0, 1_400_000.0],
                },
            ),
            (
                71,
                74,
                HealthRates {
                    domestic: [5_800_000.0, 10_440_000.0, 17_400_000.0, 29_000_000.0],
                    global: [9_280_000.0, 16_704_000.0, 27_840_000.0, 46_400_000.0],
                    outpatient: [3_200_000.0, 5_760_000.0, 9_600_000.0, 16_000_000.0],
                    dental: [350_000.0, 600_000.0, 950_000.0, 1_400_000.0],
                },
            ),
        ])
    }
}
