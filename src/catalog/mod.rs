//! Product catalog: main products, riders and waivers keyed by id

mod product;
mod standard;

pub use product::{
    AccumulatorKey, BonusStyle, CalculationSpec, MainGroup, Pass, ProductConfig, ProductKind,
    ProjectionProfile, StbhTerm, SumInsuredGrowth, TermRule,
};
pub use standard::{PACKAGE_SUM_INSURED, PACKAGE_TERM};

use std::collections::BTreeMap;
use std::error::Error;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read-only product catalog
#[derive(Debug, Clone)]
pub struct Catalog {
    products: BTreeMap<String, ProductConfig>,
}

impl Catalog {
    pub fn new(products: Vec<ProductConfig>) -> Self {
        Self {
            products: products.into_iter().map(|p| (p.id.clone(), p)).collect(),
        }
    }

    /// Built-in catalog
    pub fn standard() -> Self {
        Self::new(standard::standard_products())
    }

    /// Load a catalog from a JSON array of product configs
    pub fn from_json_file(path: &Path) -> Result<Self, Box<dyn Error>> {
        let file = File::open(path)?;
        let products: Vec<ProductConfig> = serde_json::from_reader(BufReader::new(file))?;
        log::info!("Loaded {} products from {}", products.len(), path.display());
        Ok(Self::new(products))
    }

    pub fn get(&self, id: &str) -> Option<&ProductConfig> {
        self.products.get(id)
    }

    pub fn products(&self) -> impl Iterator<Item = &ProductConfig> {
        self.products.values()
    }

    pub fn main_products(&self) -> impl Iterator<Item = &ProductConfig> {
        self.products().filter(|p| p.is_main())
    }

    /// Riders and waivers
    pub fn supplements(&self) -> impl Iterator<Item = &ProductConfig> {
        self.products().filter(|p| !p.is_main())
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
