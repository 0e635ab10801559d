//! Response types for the household income API.
//!
//! This module defines the success envelope, the error response structures
//! and the mapping from engine errors to HTTP status codes.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::{Recommendation, Severity};
use crate::error::EngineError;

/// Envelope around every successful result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationResponse<T> {
    /// Unique identifier for this calculation.
    pub calculation_id: Uuid,
    /// When the calculation was performed.
    pub timestamp: DateTime<Utc>,
    /// Version of the engine that produced the result.
    pub engine_version: String,
    /// Tax year of the tables used.
    pub tax_year: i32,
    /// Time spent calculating, in microseconds.
    pub duration_us: u64,
    /// The endpoint specific result.
    pub result: T,
}

impl<T> CalculationResponse<T> {
    /// Wraps a result computed against the tables of `tax_year`.
    pub fn new(calculation_id: Uuid, tax_year: i32, duration_us: u64, result: T) -> Self {
        Self {
            calculation_id,
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            tax_year,
            duration_us,
            result,
        }
    }
}

/// A recommendation together with its severity.
#[derive(Debug, Clone, Serialize)]
pub struct RecommendationItem {
    /// How the recommendation should be read.
    pub severity: Severity,
    /// The recommendation itself.
    #[serde(flatten)]
    pub recommendation: Recommendation,
}

impl From<Recommendation> for RecommendationItem {
    fn from(recommendation: Recommendation) -> Self {
        Self {
            severity: recommendation.severity(),
            recommendation,
        }
    }
}

/// API error response structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling.
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional details about the error.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Creates a new API error with details.
    pub fn with_details(
        code: impl Into<String>,
        message: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            details: Some(details.into()),
        }
    }

    /// Creates a validation error response.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    /// Creates a malformed JSON error response.
    pub fn malformed_json(message: impl Into<String>) -> Self {
        Self::new("MALFORMED_JSON", message)
    }
}

/// API error with HTTP status code.
pub struct ApiErrorResponse {
    /// The HTTP status code.
    pub status: StatusCode,
    /// The error body.
    pub error: ApiError,
}

impl IntoResponse for ApiErrorResponse {
    fn into_response(self) -> Response {
        (self.status, Json(self.error)).into_response()
    }
}

impl From<EngineError> for ApiErrorResponse {
    fn from(error: EngineError) -> Self {
        match error {
            EngineError::InvalidSituation { field, message } => ApiErrorResponse {
                status: StatusCode::BAD_REQUEST,
                error: ApiError::with_details(
                    "VALIDATION_ERROR",
                    format!("Invalid household field '{}': {}", field, message),
                    "The household data contains invalid information",
                ),
            },
            EngineError::ConfigNotFound { path } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration error",
                    format!("Configuration file not found: {}", path),
                ),
            },
            EngineError::ConfigParseError { path, message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details(
                    "CONFIG_ERROR",
                    "Configuration parse error",
                    format!("Failed to parse {}: {}", path, message),
                ),
            },
            EngineError::InvalidConfig { message } => ApiErrorResponse {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                error: ApiError::with_details("CONFIG_ERROR", "Invalid configuration", message),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_api_error_serialization() {
        let error = ApiError::new("TEST_ERROR", "Test message");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"code\":\"TEST_ERROR\""));
        assert!(json.contains("\"message\":\"Test message\""));
        assert!(!json.contains("details"));
    }

    #[test]
    fn test_invalid_situation_maps_to_bad_request() {
        let api_error: ApiErrorResponse = EngineError::InvalidSituation {
            field: "housing_cost".to_string(),
            message: "must not be negative".to_string(),
        }
        .into();

        assert_eq!(api_error.status, StatusCode::BAD_REQUEST);
        assert_eq!(api_error.error.code, "VALIDATION_ERROR");
        assert!(api_error.error.message.contains("housing_cost"));
    }

    #[test]
    fn test_config_errors_map_to_internal_error() {
        let api_error: ApiErrorResponse = EngineError::InvalidConfig {
            message: "tax brackets are not contiguous".to_string(),
        }
        .into();

        assert_eq!(api_error.status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(api_error.error.code, "CONFIG_ERROR");
    }

    #[test]
    fn test_envelope_carries_version_and_year() {
        let response = CalculationResponse::new(Uuid::new_v4(), 2025, 42, vec![1, 2]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["engine_version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(json["tax_year"], 2025);
        assert_eq!(json["duration_us"], 42);
        assert_eq!(json["result"], serde_json::json!([1, 2]));
    }

    #[test]
    fn test_recommendation_item_flattens_kind() {
        let item = RecommendationItem::from(Recommendation::SingleEarnerCreditGranted {
            annual_credit: dec!(601),
        });
        let json = serde_json::to_value(&item).unwrap();

        assert_eq!(json["severity"], "positive");
        assert_eq!(json["kind"], "single_earner_credit_granted");
        assert_eq!(json["annual_credit"], "601");
    }
}
