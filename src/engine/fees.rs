//! Fee breakdown produced by aggregation

use std::collections::BTreeMap;

use serde::Serialize;

use crate::calc::Vnd;

/// Fees attributed to one person
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PersonFees {
    /// Main premium plus top-up; non-zero only for the main insured
    pub main: Vnd,
    /// Main premium without top-up
    pub main_base: Vnd,
    pub supp: Vnd,
    pub total: Vnd,
    /// Rider and waiver id -> premium
    pub supp_details: BTreeMap<String, Vnd>,
}

impl PersonFees {
    pub(crate) fn add_supplement(&mut self, product_id: &str, premium: Vnd) {
        *self.supp_details.entry(product_id.to_string()).or_insert(0) += premium;
        self.supp += premium;
        self.total = self.main + self.supp;
    }
}

/// Premium of one waiver product and what it was priced on
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaiverDetail {
    pub premium: Vnd,
    pub target_person: String,
    pub stbh_base: Vnd,
}

/// First-year fees of a quotation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeeBreakdown {
    pub base_main: Vnd,
    pub extra: Vnd,
    pub total_main: Vnd,
    pub total_supp: Vnd,
    pub total: Vnd,
    pub by_person: BTreeMap<String, PersonFees>,
    pub waiver_details: BTreeMap<String, WaiverDetail>,
}

impl FeeBreakdown {
    /// Total premium of every waiver product
    pub fn waiver_total(&self) -> Vnd {
        self.waiver_details.values().map(|d| d.premium).sum()
    }

    /// Rider premiums (waivers excluded) summed over persons, by product
    pub fn rider_totals(&self) -> BTreeMap<String, Vnd> {
        let mut totals = BTreeMap::new();
        for fees in self.by_person.values() {
            for (product_id, premium) in &fees.supp_details {
                if self.waiver_details.contains_key(product_id) {
                    continue;
                }
                *totals.entry(product_id.clone()).or_insert(0) += *premium;
            }
        }
        totals
    }

    /// Whether the parts add up to the totals
    pub fn is_consistent(&self) -> bool {
        let person_supp: Vnd = self.by_person.values().map(|p| p.supp).sum();
        let person_main: Vnd = self.by_person.values().map(|p| p.main).sum();
        self.total_main == self.base_main + self.extra
            && self.total == self.total_main + self.total_supp
            && person_supp == self.total_supp
            && person_main == self.total_main
            && self.by_person.values().all(|p| p.total == p.main + p.supp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_supplement_keeps_totals() {
        let mut fees = PersonFees {
            main: 10_000_000,
            main_base: 10_000_000,
            total: 10_000_000,
            ..Default::default()
        };
        fees.add_supplement("bhn", 300_000);
        fees.add_supplement("bhn", 100_000);
        fees.add_supplement("mdp3", 50_000);

        assert_eq!(fees.supp, 450_000);
        assert_eq!(fees.total, 10_450_000);
        assert_eq!(fees.supp_details["bhn"], 400_000);
    }

    #[test]
    fn test_rider_totals_exclude_waivers() {
        let mut person = PersonFees::default();
        person.add_supplement("bhn", 300_000);
        person.add_supplement("mdp3", 50_000);

        let mut breakdown = FeeBreakdown {
            total_supp: 350_000,
            total: 350_000,
            ..Default::default()
        };
        breakdown.by_person.insert("p1".to_string(), person);
        breakdown.waiver_details.insert(
            "mdp3".to_string(),
            WaiverDetail {
                premium: 50_000,
                target_person: "p1".to_string(),
                stbh_base: 1_000_000,
            },
        );

        assert_eq!(breakdown.rider_totals(), BTreeMap::from([("bhn".to_string(), 300_000)]));
        assert_eq!(breakdown.waiver_total(), 50_000);
        assert!(breakdown.is_consistent());
    }
}
