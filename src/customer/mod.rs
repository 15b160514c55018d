//! Insured persons, their rider selections and age resolution

mod data;
pub mod age;

pub use data::{
    Gender, HealthProgram, HealthScope, Person, RiderInput, WaiverTargetPerson, OTHER_PAYER_ID,
};
pub use age::{calculate_age, parse_date_of_birth};
