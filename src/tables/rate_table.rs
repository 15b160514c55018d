//! Generic rate table: ordered records keyed by exact age, age band or term
//!
//! Lookups scan records in order and return the first match. Source tables
//! use non-overlapping keys, so order only matters for malformed data. An
//! age or term outside every record is `None`; callers price that as 0.

use serde::{Deserialize, Serialize};

use crate::customer::Gender;

/// Key of a single rate record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateKey {
    Age(u32),
    AgeRange { min: u32, max: u32 },
    Term(u32),
}

impl RateKey {
    fn contains_age(&self, age: u32) -> bool {
        match *self {
            RateKey::Age(a) => a == age,
            RateKey::AgeRange { min, max } => age >= min && age <= max,
            RateKey::Term(_) => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateRecord<R> {
    pub key: RateKey,
    pub rates: R,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateTable<R> {
    records: Vec<RateRecord<R>>,
}

impl<R> RateTable<R> {
    pub fn new(records: Vec<RateRecord<R>>) -> Self {
        Self { records }
    }

    /// Exact-age table, one entry per age starting at `start_age`
    pub fn by_age(start_age: u32, rates: Vec<R>) -> Self {
        let records = rates
            .into_iter()
            .enumerate()
            .map(|(i, rates)| RateRecord {
                key: RateKey::Age(start_age + i as u32),
                rates,
            })
            .collect();
        Self { records }
    }

    /// Age-band table from `(min_age, max_age, rates)` triples
    pub fn by_age_band(bands: Vec<(u32, u32, R)>) -> Self {
        let records = bands
            .into_iter()
            .map(|(min, max, rates)| RateRecord {
                key: RateKey::AgeRange { min, max },
                rates,
            })
            .collect();
        Self { records }
    }

    /// First record whose exact age or age band contains `age`
    pub fn lookup_age(&self, age: u32) -> Option<&R> {
        self.records
            .iter()
            .find(|r| r.key.contains_age(age))
            .map(|r| &r.rates)
    }

    /// First record keyed by exactly `term`
    pub fn lookup_term(&self, term: u32) -> Option<&R> {
        self.records
            .iter()
            .find(|r| r.key == RateKey::Term(term))
            .map(|r| &r.rates)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[RateRecord<R>] {
        &self.records
    }
}

/// Rate pair for a gender-specific column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenderRates {
    pub female: f64,
    pub male: f64,
}

impl GenderRates {
    pub fn for_gender(&self, gender: Gender) -> f64 {
        match gender {
            Gender::Female => self.female,
            Gender::Male => self.male,
        }
    }
}

impl From<(f64, f64)> for GenderRates {
    /// `(female, male)`
    fn from((female, male): (f64, f64)) -> Self {
        Self { female, male }
    }
}

pub type GenderRateTable = RateTable<GenderRates>;

impl GenderRateTable {
    /// Build an exact-age table from `(female, male)` pairs
    pub fn from_pairs(start_age: u32, pairs: Vec<(f64, f64)>) -> Self {
        Self::by_age(start_age, pairs.into_iter().map(GenderRates::from).collect())
    }

    pub fn rate(&self, age: u32, gender: Gender) -> Option<f64> {
        self.lookup_age(age).map(|r| r.for_gender(gender))
    }
}

/// Exact-age gender tables keyed by payment term
pub type TermRateTable = RateTable<GenderRateTable>;

impl TermRateTable {
    pub fn by_term(tables: Vec<(u32, GenderRateTable)>) -> Self {
        Self::new(
            tables
                .into_iter()
                .map(|(term, rates)| RateRecord {
                    key: RateKey::Term(term),
                    rates,
                })
                .collect(),
        )
    }

    pub fn rate(&self, term: u32, age: u32, gender: Gender) -> Option<f64> {
        self.lookup_term(term).and_then(|t| t.rate(age, gender))
    }

    /// Terms present in the table, in record order
    pub fn terms(&self) -> Vec<u32> {
        self.records()
            .iter()
            .filter_map(|r| match r.key {
                RateKey::Term(t) => Some(t),
                _ => None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_age_lookup() {
        let table = GenderRateTable::from_pairs(18, vec![(1.0, 2.0), (1.5, 2.5), (2.0, 3.0)]);
        assert_eq!(table.rate(18, Gender::Female), Some(1.0));
        assert_eq!(table.rate(19, Gender::Male), Some(2.5));
        assert_eq!(table.rate(20, Gender::Male), Some(3.0));
        assert_eq!(table.rate(17, Gender::Male), None);
        assert_eq!(table.rate(21, Gender::Female), None);
    }

    #[test]
    fn test_band_lookup_first_match_wins() {
        let table = RateTable::by_age_band(vec![(0, 17, 1.0), (18, 40, 2.0), (30, 60, 9.0)]);
        assert_eq!(table.lookup_age(0), Some(&1.0));
        assert_eq!(table.lookup_age(17), Some(&1.0));
        assert_eq!(table.lookup_age(35), Some(&2.0));
        assert_eq!(table.lookup_age(41), Some(&9.0));
        assert_eq!(table.lookup_age(61), None);
    }

    #[test]
    fn test_term_table() {
        let term5 = GenderRateTable::from_pairs(0, vec![(10.0, 11.0)]);
        let term10 = GenderRateTable::from_pairs(0, vec![(5.0, 6.0)]);
        let table = TermRateTable::by_term(vec![(5, term5), (10, term10)]);

        assert_eq!(table.rate(10, 0, Gender::Male), Some(6.0));
        assert_eq!(table.rate(15, 0, Gender::Male), None);
        assert_eq!(table.rate(5, 1, Gender::Male), None);
        assert_eq!(table.terms(), vec![5, 10]);
        // Term keys never match an age lookup
        assert!(table.lookup_age(5).is_none());
    }
}
