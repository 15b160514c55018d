//! Static actuarial tables: premium rates, cost of insurance and
//! investment-linked product features

mod rate_table;
mod premium;
mod coi;
mod product;
pub mod loader;

pub use rate_table::{GenderRateTable, GenderRates, RateKey, RateRecord, RateTable, TermRateTable};
pub use premium::{HealthRates, MainRateTable, PremiumTables};
pub use coi::CoiTable;
pub use product::{
    AdminFeeSchedule, GuaranteedRates, InitialFeeSchedule, PersistencyBonus, PremiumComponent,
    ProjectionFeatures, SumInsuredBands,
};
pub use loader::LoadedTables;

use std::path::Path;

use crate::error::TableError;

/// Container for every table the engine reads
///
/// Loaded once, then shared read-only across calculations.
#[derive(Debug, Clone)]
pub struct RateTables {
    pub premium: PremiumTables,
    pub coi: CoiTable,
    pub features: ProjectionFeatures,
}

impl RateTables {
    /// Built-in tables
    pub fn default_pricing() -> Self {
        Self {
            premium: PremiumTables::default(),
            coi: CoiTable::standard(),
            features: ProjectionFeatures::default(),
        }
    }

    /// Load projection tables from CSV files in the default location (data/tables/)
    pub fn from_csv() -> Result<Self, TableError> {
        Self::from_csv_path(Path::new(loader::DEFAULT_TABLES_PATH))
    }

    /// Load projection tables from CSV files in a specific directory
    pub fn from_csv_path(path: &Path) -> Result<Self, TableError> {
        let loaded = LoadedTables::load_from(path)?;

        Ok(Self {
            premium: PremiumTables::default(),
            coi: CoiTable::from_loaded(&loaded),
            features: ProjectionFeatures::from_loaded(&loaded),
        })
    }
}

impl Default for RateTables {
    fn default() -> Self {
        Self::default_pricing()
    }
}
