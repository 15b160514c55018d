//! Premium Quote - rules-driven premium quotation engine for Vietnamese
//! life, health and accident products
//!
//! This library provides:
//! - A product catalog with declarative eligibility and disable rules
//! - Premium formulas for main products, riders and waiver-of-premium
//! - Five-phase fee aggregation across every insured person
//! - Year-by-year premium illustrations to a target age
//! - Account-value projections for investment-linked products

pub mod calc;
pub mod catalog;
pub mod customer;
pub mod engine;
pub mod error;
pub mod illustration;
pub mod projection;
pub mod rules;
pub mod scenario;
pub mod tables;

// Re-export commonly used types
pub use catalog::{Catalog, ProductConfig};
pub use customer::{Gender, Person, RiderInput};
pub use engine::{FeeBreakdown, QuoteConfig, QuoteEngine, QuoteState};
pub use error::{QuoteError, TableError};
pub use illustration::{build_illustration, Illustration};
pub use projection::{ProjectionEngine, ProjectionResult};
pub use scenario::{ScenarioRunner, ScenarioSet};
pub use tables::RateTables;
