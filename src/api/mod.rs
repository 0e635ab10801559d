//! HTTP API module for the household income engine.
//!
//! This module provides the REST endpoints for the point calculation, the
//! income curve, trap zone detection and recommendations.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, SituationRequest, SweepRequest};
pub use response::{ApiError, CalculationResponse, RecommendationItem};
pub use state::AppState;
