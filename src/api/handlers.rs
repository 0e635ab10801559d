//! HTTP request handlers for the household income API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};
use uuid::Uuid;

use crate::analysis::{SweepRange, advise, find_trap_zones, income_curve};
use crate::calculation::calculate_household;
use crate::models::HouseholdSituation;

use super::request::{CalculationRequest, SituationRequest, SweepRequest};
use super::response::{ApiError, ApiErrorResponse, CalculationResponse, RecommendationItem};
use super::state::AppState;

/// Most points a single sweep request may ask for.
const MAX_SWEEP_POINTS: u32 = 10_000;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/recommendations", post(recommendations_handler))
        .route("/trap-zones", post(trap_zones_handler))
        .route("/income-curve", post(income_curve_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts a household and returns its full outcome with audit trace.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let situation = match validated_situation(correlation_id, request.household) {
        Ok(situation) => situation,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let outcome = calculate_household(state.config(), &situation);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        region = %situation.region,
        household_size = outcome.household_size,
        total_household_income = %outcome.total_household_income,
        duration_us,
        "Calculation completed successfully"
    );

    json_response(
        StatusCode::OK,
        CalculationResponse::new(correlation_id, state.tax_year(), duration_us, outcome),
    )
}

/// Handler for POST /recommendations endpoint.
async fn recommendations_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing recommendations request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(correlation_id, rejection),
    };
    let situation = match validated_situation(correlation_id, request.household) {
        Ok(situation) => situation,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let config = state.config();
    let outcome = calculate_household(config, &situation);
    let recommendations: Vec<RecommendationItem> = advise(config, &situation, &outcome)
        .into_iter()
        .map(Into::into)
        .collect();
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        recommendations = recommendations.len(),
        duration_us,
        "Recommendations completed successfully"
    );

    json_response(
        StatusCode::OK,
        CalculationResponse::new(correlation_id, state.tax_year(), duration_us, recommendations),
    )
}

/// Handler for POST /trap-zones endpoint.
async fn trap_zones_handler(
    State(state): State<AppState>,
    payload: Result<Json<SweepRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing trap zone request");

    let (situation, range) = match validated_sweep(correlation_id, payload) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let zones = find_trap_zones(state.config(), &situation, &range);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        trap_zones = zones.len(),
        duration_us,
        "Trap zone sweep completed successfully"
    );

    json_response(
        StatusCode::OK,
        CalculationResponse::new(correlation_id, state.tax_year(), duration_us, zones),
    )
}

/// Handler for POST /income-curve endpoint.
async fn income_curve_handler(
    State(state): State<AppState>,
    payload: Result<Json<SweepRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing income curve request");

    let (situation, range) = match validated_sweep(correlation_id, payload) {
        Ok(parts) => parts,
        Err(response) => return response,
    };

    let start_time = Instant::now();
    let curve = income_curve(state.config(), &situation, &range);
    let duration_us = start_time.elapsed().as_micros() as u64;

    info!(
        correlation_id = %correlation_id,
        points = curve.len(),
        duration_us,
        "Income curve completed successfully"
    );

    json_response(
        StatusCode::OK,
        CalculationResponse::new(correlation_id, state.tax_year(), duration_us, curve),
    )
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(correlation_id: Uuid, rejection: JsonRejection) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            // The body text carries serde's description of the problem.
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };
    json_response(StatusCode::BAD_REQUEST, error)
}

/// Converts the request household and rejects values the engine cannot accept.
fn validated_situation(
    correlation_id: Uuid,
    request: SituationRequest,
) -> Result<HouseholdSituation, Response> {
    let situation: HouseholdSituation = request.into();
    situation.validate().map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Household validation failed"
        );
        let api_error: ApiErrorResponse = err.into();
        json_response(api_error.status, api_error.error)
    })?;
    Ok(situation)
}

fn validated_sweep(
    correlation_id: Uuid,
    payload: Result<Json<SweepRequest>, JsonRejection>,
) -> Result<(HouseholdSituation, SweepRange), Response> {
    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return Err(rejection_response(correlation_id, rejection)),
    };
    let situation = validated_situation(correlation_id, request.household)?;

    let range = request.range;
    range.validate().map_err(|err| {
        warn!(
            correlation_id = %correlation_id,
            error = %err,
            "Sweep range validation failed"
        );
        let api_error: ApiErrorResponse = err.into();
        json_response(api_error.status, api_error.error)
    })?;

    let too_many_points = range.step > Decimal::ZERO
        && range.max_gross > range.min_gross
        && (range.max_gross - range.min_gross)
            .checked_div(range.step)
            .is_none_or(|count| count > Decimal::from(MAX_SWEEP_POINTS));
    if too_many_points {
        warn!(
            correlation_id = %correlation_id,
            min_gross = %range.min_gross,
            max_gross = %range.max_gross,
            step = %range.step,
            "Sweep range too large"
        );
        return Err(json_response(
            StatusCode::BAD_REQUEST,
            ApiError::validation_error(format!(
                "Sweep range exceeds {} points",
                MAX_SWEEP_POINTS
            )),
        ));
    }

    Ok((situation, range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigLoader, HouseholdConfig};
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal_macros::dec;
    use serde_json::{Value, json};
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_state() -> AppState {
        AppState::new(ConfigLoader::from_config(HouseholdConfig::austria_2025()))
    }

    async fn post_json(uri: &str, body: String) -> (StatusCode, Value) {
        let router = create_router(create_test_state());
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    fn decimal(value: &Value) -> Decimal {
        Decimal::from_str(value.as_str().unwrap()).unwrap()
    }

    fn single_household(gross: &str) -> Value {
        json!({
            "gross_income": gross,
            "marital_status": "single",
            "region": "vienna"
        })
    }

    #[tokio::test]
    async fn test_valid_request_returns_200() {
        let body = json!({ "household": single_household("2000") }).to_string();
        let (status, json) = post_json("/calculate", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["tax_year"], 2025);
        assert!(json["calculation_id"].is_string());

        let result = &json["result"];
        assert_eq!(decimal(&result["primary"]["net"]).round_dp(2), dec!(1606.59));
        assert_eq!(result["household_size"], 1);
        assert_eq!(result["audit_trace"]["steps"][0]["rule_id"], "net_income");
    }

    #[tokio::test]
    async fn test_content_type_is_json() {
        let router = create_router(create_test_state());
        let body = json!({ "household": single_household("2000") }).to_string();
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/calculate")
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let content_type = response.headers().get("content-type").unwrap();
        assert_eq!(content_type, "application/json");
    }

    #[tokio::test]
    async fn test_malformed_json_returns_400() {
        let (status, json) = post_json("/calculate", "{invalid json".to_string()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_missing_region_returns_400() {
        let body = json!({
            "household": { "gross_income": "2000", "marital_status": "single" }
        })
        .to_string();
        let (status, json) = post_json("/calculate", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("missing field"));
    }

    #[tokio::test]
    async fn test_negative_housing_cost_returns_400() {
        let body = json!({
            "household": {
                "gross_income": "2000",
                "marital_status": "single",
                "region": "vienna",
                "housing_cost": "-1"
            }
        })
        .to_string();
        let (status, json) = post_json("/calculate", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("housing_cost"));
    }

    #[tokio::test]
    async fn test_yearly_income_is_converted() {
        let body = json!({
            "household": {
                "gross_income": "28000",
                "income_period": "yearly",
                "marital_status": "single",
                "region": "vienna"
            }
        })
        .to_string();
        let (status, json) = post_json("/calculate", body).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(decimal(&json["result"]["primary"]["gross"]), dec!(2000));
    }

    #[tokio::test]
    async fn test_trap_zones_for_minimum_income_floor() {
        let body = json!({ "household": single_household("0") }).to_string();
        let (status, json) = post_json("/trap-zones", body).await;

        assert_eq!(status, StatusCode::OK);
        let zones = json["result"].as_array().unwrap();
        assert!(!zones.is_empty());
        assert_eq!(decimal(&zones[0]["from_gross"]), Decimal::ZERO);
        assert_eq!(decimal(&zones[0]["to_gross"]), dec!(100));
        assert_eq!(decimal(&zones[0]["difference"]), Decimal::ZERO);
    }

    #[tokio::test]
    async fn test_income_curve_with_custom_range() {
        let body = json!({
            "household": single_household("0"),
            "range": { "min_gross": "0", "max_gross": "1000", "step": "500" }
        })
        .to_string();
        let (status, json) = post_json("/income-curve", body).await;

        assert_eq!(status, StatusCode::OK);
        let curve = json["result"].as_array().unwrap();
        assert_eq!(curve.len(), 3);
        assert_eq!(decimal(&curve[2]["gross"]), dec!(1000));
        assert_eq!(decimal(&curve[2]["total"]), dec!(1209));
    }

    #[tokio::test]
    async fn test_oversized_sweep_returns_400() {
        let body = json!({
            "household": single_household("0"),
            "range": { "min_gross": "0", "max_gross": "1000000", "step": "1" }
        })
        .to_string();
        let (status, json) = post_json("/income-curve", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_gross_income_above_bound_returns_400() {
        let body = json!({ "household": single_household("7000000000000000000000000000") })
            .to_string();
        let (status, json) = post_json("/calculate", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("monthly_gross_income"));
    }

    #[tokio::test]
    async fn test_sweep_bound_above_limit_returns_400() {
        let body = json!({
            "household": single_household("0"),
            "range": {
                "min_gross": "79228162514264337593543950000",
                "max_gross": "79228162514264337593543950335",
                "step": "100"
            }
        })
        .to_string();
        let (status, json) = post_json("/trap-zones", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
        assert!(json["message"].as_str().unwrap().contains("range.min_gross"));
    }

    #[tokio::test]
    async fn test_tiny_sweep_step_returns_400() {
        let body = json!({
            "household": single_household("0"),
            "range": {
                "min_gross": "0",
                "max_gross": "1000000000",
                "step": "0.0000000000000000000000000001"
            }
        })
        .to_string();
        let (status, json) = post_json("/income-curve", body).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_recommendations_include_severity() {
        let body = json!({
            "household": {
                "gross_income": "3000",
                "marital_status": "married",
                "children": [{ "age": 4 }, { "age": 9 }],
                "housing_cost": "900",
                "dwelling_size": "75",
                "region": "vienna"
            }
        })
        .to_string();
        let (status, json) = post_json("/recommendations", body).await;

        assert_eq!(status, StatusCode::OK);
        let items = json["result"].as_array().unwrap();
        let granted = items
            .iter()
            .find(|item| item["kind"] == "single_earner_credit_granted")
            .unwrap();
        assert_eq!(granted["severity"], "positive");
        assert_eq!(decimal(&granted["annual_credit"]), dec!(813));
    }
}
