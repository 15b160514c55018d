//! Account-value projection for investment-linked products

mod state;
mod engine;
mod cashflows;

pub use state::ProjectionState;
pub use engine::{monthly_rate, InterestScenario, ProjectionConfig, ProjectionEngine, ProjectionInput};
pub use cashflows::{AccountRow, ProjectionResult, ProjectionSummary, YearEndValue};
