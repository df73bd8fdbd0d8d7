//! AWS Lambda handler for planning calculations
//!
//! Accepts a tagged calculation request as JSON and returns its result:
//!
//! ```json
//! {"calculation": "mortgage_vs_invest", "balance": 200000, "mortgage_rate": 0.03,
//!  "term_years": 15, "investment_return": 0.07}
//! ```
//!
//! Supports Lambda Function URLs for direct HTTP access.

use std::sync::Arc;

use lambda_http::{run, service_fn, Body, Error, Request, Response};
use log::{info, warn};
use serde::Serialize;

use retirement_planner::{CalculationRequest, CalculationResponse, PlanningAssumptions, PlanningError};

/// Response body
#[derive(Debug, Serialize)]
struct HandlerResponse {
    #[serde(flatten)]
    response: CalculationResponse,
    execution_time_ms: u64,
}

/// Error body, naming the rejected parameter for input errors
#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    parameter: Option<&'static str>,
}

fn error_response(status: u16, message: &str, parameter: Option<&'static str>) -> Result<Response<Body>, Error> {
    let body = serde_json::to_string(&ErrorBody { error: message, parameter })?;
    Ok(Response::builder()
        .status(status)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .body(Body::Text(body))?)
}

fn json_response(body: &HandlerResponse) -> Result<Response<Body>, Error> {
    Ok(Response::builder()
        .status(200)
        .header("Content-Type", "application/json")
        .header("Access-Control-Allow-Origin", "*")
        .header("Access-Control-Allow-Methods", "POST, OPTIONS")
        .header("Access-Control-Allow-Headers", "Content-Type")
        .body(Body::Text(serde_json::to_string(body)?))?)
}

/// Lambda handler function
async fn handler(event: Request, assumptions: &PlanningAssumptions) -> Result<Response<Body>, Error> {
    let start = std::time::Instant::now();

    // Handle CORS preflight
    if event.method().as_str() == "OPTIONS" {
        return Ok(Response::builder()
            .status(200)
            .header("Access-Control-Allow-Origin", "*")
            .header("Access-Control-Allow-Methods", "POST, OPTIONS")
            .header("Access-Control-Allow-Headers", "Content-Type")
            .body(Body::Empty)?);
    }

    let body_str = match event.body() {
        Body::Text(s) => s.clone(),
        Body::Binary(b) => String::from_utf8_lossy(b).to_string(),
        Body::Empty => return error_response(400, "Empty request body", None),
    };

    let request: CalculationRequest = match serde_json::from_str(&body_str) {
        Ok(r) => r,
        Err(e) => return error_response(400, &format!("Invalid JSON: {}", e), None),
    };

    let response = match request.evaluate(assumptions) {
        Ok(r) => r,
        Err(e @ PlanningError::InvalidInput { .. }) => {
            warn!("{} rejected: {}", request.name(), e);
            return error_response(400, &e.to_string(), e.parameter());
        }
        Err(e) => return error_response(500, &e.to_string(), None),
    };

    let execution_time_ms = start.elapsed().as_millis() as u64;
    info!("{} evaluated in {} ms", request.name(), execution_time_ms);

    json_response(&HandlerResponse {
        response,
        execution_time_ms,
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    let assumptions = Arc::new(PlanningAssumptions::load_or_default()?);
    run(service_fn(move |event: Request| {
        let assumptions = Arc::clone(&assumptions);
        async move { handler(event, &assumptions).await }
    }))
    .await
}
