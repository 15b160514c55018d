//! Error types
//!
//! Pricing is fail-soft and never returns these. They are raised only by
//! illustration building and by table loading.

use thiserror::Error;

/// Preconditions that abort illustration building
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuoteError {
    /// Date of birth is not `DD/MM/YYYY` or not a real calendar date
    #[error("invalid date of birth '{0}', expected DD/MM/YYYY")]
    InvalidDateOfBirth(String),

    /// End age could not be resolved or does not lie after the start age
    #[error("invalid illustration end: start age {start_age}, end age {}", display_age(.end_age))]
    InvalidIllustrationEnd {
        start_age: u32,
        end_age: Option<u32>,
    },

    /// Main product key is not in the catalog
    #[error("unknown main product '{0}'")]
    UnknownMainProduct(String),

    /// No person in the quotation is flagged as main insured
    #[error("quotation has no main insured person")]
    MissingMainInsured,

    /// Selected payment term is not one the product offers
    #[error("payment term {term} is not offered by product '{product}'")]
    InvalidPaymentTerm { product: String, term: u32 },
}

fn display_age(age: &Option<u32>) -> String {
    age.map(|a| a.to_string()).unwrap_or_else(|| "missing".to_string())
}

/// Result alias for fail-fast operations
pub type Result<T> = std::result::Result<T, QuoteError>;

/// Errors raised while loading rate tables from CSV
#[derive(Debug, Error)]
pub enum TableError {
    #[error("I/O error reading {file}: {source}")]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error in {file}: {source}")]
    Csv {
        file: String,
        #[source]
        source: csv::Error,
    },

    #[error("{file} line {line}: {message}")]
    Parse {
        file: String,
        line: usize,
        message: String,
    },

    #[error("table file {0} has no rows")]
    Empty(String),
}
