//! Person records as supplied by the quoting front-end

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::age::calculate_age;
use crate::error::Result;

/// Id given to the synthesized payer that is not one of the insured persons
pub const OTHER_PAYER_ID: &str = "other";

/// Gender of the insured
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
}

/// Health rider program tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthProgram {
    Basic,
    Advanced,
    Comprehensive,
    Premier,
}

impl HealthProgram {
    /// Column index into the health rate tables
    pub fn index(&self) -> usize {
        match self {
            HealthProgram::Basic => 0,
            HealthProgram::Advanced => 1,
            HealthProgram::Comprehensive => 2,
            HealthProgram::Premier => 3,
        }
    }
}

/// Territorial scope of the health rider
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthScope {
    #[default]
    Domestic,
    Global,
}

/// Rider-specific inputs for one rider on one person
///
/// A single bag covers every rider formula; each formula reads the fields
/// it needs and treats a zero or missing one as "not selected".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiderInput {
    /// Sum insured, or the daily cash amount for hospital support
    #[serde(default)]
    pub stbh: u64,

    /// Health program tier
    #[serde(default)]
    pub program: Option<HealthProgram>,

    /// Health scope
    #[serde(default)]
    pub scope: HealthScope,

    /// Health outpatient benefit selected
    #[serde(default)]
    pub outpatient: bool,

    /// Health dental benefit selected (only priced with outpatient)
    #[serde(default)]
    pub dental: bool,
}

impl RiderInput {
    pub fn with_stbh(stbh: u64) -> Self {
        Self { stbh, ..Default::default() }
    }

    pub fn health(program: HealthProgram, scope: HealthScope, outpatient: bool, dental: bool) -> Self {
        Self {
            stbh: 0,
            program: Some(program),
            scope,
            outpatient,
            dental,
        }
    }
}

/// An insured person in the quotation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: String,

    #[serde(default)]
    pub name: String,

    /// `DD/MM/YYYY`
    #[serde(default)]
    pub date_of_birth: String,

    /// Completed years at the quotation reference date
    #[serde(default)]
    pub age: u32,

    pub gender: Gender,

    /// Occupation class 1-4, 0 = unclassified
    #[serde(default)]
    pub risk_group: u8,

    /// Exactly one person per quotation is the main insured
    #[serde(default)]
    pub is_main: bool,

    /// Rider product id -> rider inputs
    #[serde(default)]
    pub supplements: BTreeMap<String, RiderInput>,
}

impl Person {
    /// Person with an already-resolved age
    pub fn new(id: impl Into<String>, age: u32, gender: Gender, risk_group: u8, is_main: bool) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            date_of_birth: String::new(),
            age,
            gender,
            risk_group,
            is_main,
            supplements: BTreeMap::new(),
        }
    }

    /// Person whose age is derived from a `DD/MM/YYYY` date of birth
    pub fn from_date_of_birth(
        id: impl Into<String>,
        name: impl Into<String>,
        date_of_birth: &str,
        gender: Gender,
        risk_group: u8,
        is_main: bool,
        reference: NaiveDate,
    ) -> Result<Self> {
        let age = calculate_age(date_of_birth, reference)?;
        Ok(Self {
            name: name.into(),
            date_of_birth: date_of_birth.to_string(),
            ..Self::new(id, age, gender, risk_group, is_main)
        })
    }

    /// Add a rider selection
    pub fn with_rider(mut self, product_id: impl Into<String>, input: RiderInput) -> Self {
        self.supplements.insert(product_id.into(), input);
        self
    }

    /// Recompute `age` from the date of birth when it parses
    ///
    /// An unparseable date leaves the supplied age in place; the
    /// illustration builder reports the bad date itself.
    pub fn resolve_age(&mut self, reference: NaiveDate) {
        if let Ok(age) = calculate_age(&self.date_of_birth, reference) {
            self.age = age;
        }
    }

    /// The same person `years` later
    pub fn aged(&self, years: u32) -> Self {
        Self {
            age: self.age + years,
            ..self.clone()
        }
    }
}

/// The payer covered by a waiver-of-premium rider when it is not one of
/// the insured persons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaiverTargetPerson {
    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub date_of_birth: String,

    #[serde(default)]
    pub age: u32,

    pub gender: Gender,

    #[serde(default)]
    pub risk_group: u8,
}

impl WaiverTargetPerson {
    /// View as a person with the reserved `other` id and no riders
    pub fn as_person(&self) -> Person {
        Person {
            name: self.name.clone(),
            date_of_birth: self.date_of_birth.clone(),
            ..Person::new(OTHER_PAYER_ID, self.age, self.gender, self.risk_group, false)
        }
    }

    pub fn resolve_age(&mut self, reference: NaiveDate) {
        if let Ok(age) = calculate_age(&self.date_of_birth, reference) {
            self.age = age;
        }
    }
}
