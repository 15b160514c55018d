//! AWS Lambda handler for pricing quotations
//!
//! Accepts a quotation state as JSON and returns its fees, plus the
//! premium illustration and account-value projections when requested.

use chrono::NaiveDate;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde::{Deserialize, Serialize};

use premium_quote::engine::QuoteState;
use premium_quote::{build_illustration, FeeBreakdown, Illustration, QuoteConfig, QuoteEngine, ScenarioRunner, ScenarioSet};

/// Input for one quotation
#[derive(Debug, Deserialize)]
pub struct QuoteRequest {
    pub state: QuoteState,

    /// Date ages are computed at (default: today)
    #[serde(default)]
    pub reference_date: Option<NaiveDate>,

    /// Build the premium illustration
    #[serde(default)]
    pub illustration: bool,

    /// Run account-value projections for investment-linked products
    #[serde(default)]
    pub projection: bool,

    /// Include monthly projection rows
    #[serde(default)]
    pub detailed_output: bool,
}

/// Output for one quotation
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub fees: FeeBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub illustration: Option<Illustration>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projection: Option<ScenarioSet>,
    pub execution_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

fn price(request: QuoteRequest) -> QuoteResponse {
    let start = std::time::Instant::now();

    let config = match request.reference_date {
        Some(date) => QuoteConfig::with_reference_date(date),
        None => QuoteConfig::default(),
    };
    let engine = QuoteEngine::standard(config);

    let mut state = request.state;
    state.resolve_ages(engine.config().reference_date);
    let fees = engine.calculate_all(&state);

    let mut error = None;

    let illustration = if request.illustration {
        match build_illustration(&engine, &state, &fees) {
            Ok(illustration) => Some(illustration),
            Err(e) => {
                log::warn!("Illustration failed: {}", e);
                error = Some(e.to_string());
                None
            }
        }
    } else {
        None
    };

    let projection = if request.projection {
        let runner = ScenarioRunner::with_tables(engine.tables().clone());
        match runner.project_quote(&engine, &state, request.detailed_output) {
            Ok(set) => set,
            Err(e) => {
                log::warn!("Projection failed: {}", e);
                error.get_or_insert_with(|| e.to_string());
                None
            }
        }
    } else {
        None
    };

    QuoteResponse {
        fees,
        illustration,
        projection,
        execution_time_ms: start.elapsed().as_millis() as u64,
        error,
    }
}

/// Lambda handler function
async fn handler(event: LambdaEvent<QuoteRequest>) -> Result<QuoteResponse, Error> {
    let (request, _context) = event.into_parts();
    Ok(price(request))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_price_request_with_illustration() {
        let json = r#"{
            "state": {
                "persons": [{
                    "id": "p1",
                    "date_of_birth": "15/06/1995",
                    "gender": "Female",
                    "risk_group": 1,
                    "is_main": true
                }],
                "main_product": "KHOE_TRON_VEN",
                "main_inputs": { "stbh": 100000000, "target_age": 40 }
            },
            "reference_date": "2025-06-15",
            "illustration": true
        }"#;
        let request: QuoteRequest = serde_json::from_str(json).unwrap();
        let response = price(request);

        assert_eq!(response.fees.base_main, 3_530_000);
        assert!(response.error.is_none());
        assert_eq!(response.illustration.map(|i| i.rows.len()), Some(11));
        assert!(response.projection.is_none());
    }

    #[test]
    fn test_illustration_error_is_reported() {
        let json = r#"{
            "state": {
                "persons": [{ "id": "p1", "date_of_birth": "31/02/1990", "gender": "Male", "is_main": true }],
                "main_product": "KHOE_TRON_VEN",
                "main_inputs": { "stbh": 100000000, "target_age": 60 }
            },
            "reference_date": "2025-06-15",
            "illustration": true
        }"#;
        let request: QuoteRequest = serde_json::from_str(json).unwrap();
        let response = price(request);
        assert!(response.illustration.is_none());
        assert!(response.error.unwrap().contains("31/02/1990"));
    }
}
