//! Illustration end age and payment term per product term rule

use serde::Serialize;

use crate::calc::MainInputs;
use crate::catalog::{ProductConfig, TermRule};
use crate::error::{QuoteError, Result};

/// Resolved illustration span
///
/// A target age entered by the user is itself illustrated, giving one
/// more row than `end_age - start_age`. Contracts with a set term end at
/// `end_age` and have exactly `term` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TermResolution {
    pub start_age: u32,
    pub end_age: u32,
    /// Years the main premium is paid
    pub payment_term: u32,
    policy_years: u32,
}

impl TermResolution {
    /// Number of illustrated policy years
    pub fn years(&self) -> u32 {
        self.policy_years
    }
}

/// Resolve the illustration span for `product` issued at `start_age`
///
/// Products without a term rule take the target age from the inputs.
pub fn resolve_term(product: &ProductConfig, start_age: u32, inputs: &MainInputs) -> Result<TermResolution> {
    let rule = product.term_rule.clone().unwrap_or(TermRule::UserInput);

    let (end_age, payment_term, policy_years) = match rule {
        TermRule::UserInput => {
            let end_age = match inputs.target_age {
                Some(end) if end > start_age => end,
                end_age => return Err(QuoteError::InvalidIllustrationEnd { start_age, end_age }),
            };
            let years = end_age - start_age + 1;
            let payment_term = match inputs.payment_term {
                None => end_age - start_age,
                Some(term) if (1..=years).contains(&term) => term,
                Some(term) => {
                    return Err(QuoteError::InvalidPaymentTerm {
                        product: product.id.clone(),
                        term,
                    })
                }
            };
            (end_age, payment_term, years)
        }
        TermRule::SelectedTerm { options } => {
            let term = inputs.payment_term.unwrap_or(0);
            if !options.contains(&term) {
                return Err(QuoteError::InvalidPaymentTerm {
                    product: product.id.clone(),
                    term,
                });
            }
            (start_age + term, term, term)
        }
        TermRule::Fixed { years } => {
            if years == 0 {
                return Err(QuoteError::InvalidPaymentTerm {
                    product: product.id.clone(),
                    term: years,
                });
            }
            (start_age + years, years, years)
        }
    };

    Ok(TermResolution {
        start_age,
        end_age,
        payment_term,
        policy_years,
    })
}
