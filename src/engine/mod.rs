//! Quotation engine: state, fee aggregation and state loading

mod aggregate;
mod fees;
mod state;
pub mod loader;

pub use aggregate::PricingMode;
pub(crate) use aggregate::MainPayment;
pub use fees::{FeeBreakdown, PersonFees, WaiverDetail};
pub use state::{PaymentFrequency, QuoteState, WaiverSelection, WaiverTarget};

use chrono::{Local, NaiveDate};

use crate::catalog::Catalog;
use crate::tables::RateTables;

/// Settings shared by every quotation an engine prices
#[derive(Debug, Clone)]
pub struct QuoteConfig {
    /// Date ages are computed at
    pub reference_date: NaiveDate,

    /// Years the custom crediting rate applies in the capped scenario
    pub capped_custom_years: u32,
}

impl Default for QuoteConfig {
    fn default() -> Self {
        Self {
            reference_date: Local::now().date_naive(),
            capped_custom_years: 20,
        }
    }
}

impl QuoteConfig {
    pub fn with_reference_date(reference_date: NaiveDate) -> Self {
        Self {
            reference_date,
            ..Self::default()
        }
    }
}

/// Prices quotations against a catalog and rate tables
pub struct QuoteEngine {
    catalog: Catalog,
    tables: RateTables,
    config: QuoteConfig,
}

impl QuoteEngine {
    pub fn new(catalog: Catalog, tables: RateTables, config: QuoteConfig) -> Self {
        Self { catalog, tables, config }
    }

    /// Built-in catalog and tables
    pub fn standard(config: QuoteConfig) -> Self {
        Self::new(Catalog::standard(), RateTables::default_pricing(), config)
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn tables(&self) -> &RateTables {
        &self.tables
    }

    pub fn config(&self) -> &QuoteConfig {
        &self.config
    }
}
