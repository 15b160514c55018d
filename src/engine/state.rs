//! Quotation state: persons, selected products and entered values

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calc::MainInputs;
use crate::customer::{Person, WaiverTargetPerson};

/// Premium payment frequency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentFrequency {
    #[default]
    Annual,
    SemiAnnual,
    Quarterly,
}

impl PaymentFrequency {
    pub fn periods_per_year(&self) -> u32 {
        match self {
            PaymentFrequency::Annual => 1,
            PaymentFrequency::SemiAnnual => 2,
            PaymentFrequency::Quarterly => 4,
        }
    }

    /// Whether a premium falls due in this month of the policy year (1-12)
    pub fn is_payment_month(&self, month_in_policy_year: u32) -> bool {
        let interval = 12 / self.periods_per_year();
        month_in_policy_year >= 1 && (month_in_policy_year - 1) % interval == 0
    }
}

/// Whose premiums a waiver covers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum WaiverTarget {
    /// One of the insured persons, by id
    Insured { id: String },
    /// A payer outside the insured list
    Other { person: WaiverTargetPerson },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiverSelection {
    pub target: WaiverTarget,
    /// Enabled waiver product ids
    pub products: Vec<String>,
}

/// Full state of one quotation
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuoteState {
    pub persons: Vec<Person>,

    #[serde(default)]
    pub main_product: Option<String>,

    #[serde(default)]
    pub main_inputs: MainInputs,

    #[serde(default)]
    pub waiver: Option<WaiverSelection>,

    #[serde(default)]
    pub payment_frequency: PaymentFrequency,

    /// Annual crediting rate for the custom projection scenarios
    #[serde(default)]
    pub custom_interest_rate: Option<f64>,
}

impl QuoteState {
    pub fn main_person(&self) -> Option<&Person> {
        self.persons.iter().find(|p| p.is_main)
    }

    pub fn person(&self, id: &str) -> Option<&Person> {
        self.persons.iter().find(|p| p.id == id)
    }

    /// The waiver target as a person, if a waiver is selected and resolvable
    pub fn waiver_target(&self) -> Option<Person> {
        match &self.waiver.as_ref()?.target {
            WaiverTarget::Insured { id } => self.person(id).cloned(),
            WaiverTarget::Other { person } => Some(person.as_person()),
        }
    }

    /// Recompute every age from its date of birth
    pub fn resolve_ages(&mut self, reference: NaiveDate) {
        for person in &mut self.persons {
            person.resolve_age(reference);
        }
        if let Some(WaiverSelection {
            target: WaiverTarget::Other { person },
            ..
        }) = self.waiver.as_mut()
        {
            person.resolve_age(reference);
        }
    }
}
