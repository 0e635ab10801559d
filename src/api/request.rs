//! Request types for the household income API.
//!
//! This module defines the JSON request structures for all endpoints. The
//! wire format allows incomes to be stated per month or per year; conversion
//! to the engine's monthly [`HouseholdSituation`] happens here.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analysis::SweepRange;
use crate::models::{
    Child, DEFAULT_DWELLING_SIZE, HouseholdSituation, IncomePeriod, MaritalStatus, Region,
};

/// Request body for the `/calculate` and `/recommendations` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The household to calculate.
    pub household: SituationRequest,
}

/// Request body for the `/trap-zones` and `/income-curve` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SweepRequest {
    /// The household whose primary gross income is varied.
    pub household: SituationRequest,
    /// The gross range to sweep, 0 to 6000 in steps of 100 when omitted.
    #[serde(default)]
    pub range: SweepRange,
}

/// Household information in a request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SituationRequest {
    /// Gross salary of the primary earner.
    pub gross_income: Decimal,
    /// Whether the gross incomes are monthly payments or annual totals.
    #[serde(default)]
    pub income_period: IncomePeriod,
    /// Gross salary of the partner, in the same period.
    #[serde(default)]
    pub partner_gross_income: Option<Decimal>,
    /// Marital status of the primary earner.
    pub marital_status: MaritalStatus,
    /// Children in the household.
    #[serde(default)]
    pub children: Vec<Child>,
    /// Monthly rent or housing cost.
    #[serde(default)]
    pub housing_cost: Decimal,
    /// Dwelling size in square metres.
    #[serde(default)]
    pub dwelling_size: Option<Decimal>,
    /// Federal state of residence.
    pub region: Region,
    /// Re-entering the workforce after a break.
    #[serde(default)]
    pub reentering_workforce: bool,
}

impl From<SituationRequest> for HouseholdSituation {
    fn from(req: SituationRequest) -> Self {
        let period = req.income_period;
        HouseholdSituation {
            monthly_gross_income: period.to_monthly(req.gross_income),
            partner_monthly_gross_income: req.partner_gross_income.map(|g| period.to_monthly(g)),
            marital_status: req.marital_status,
            children: req.children,
            housing_cost: req.housing_cost,
            dwelling_size: req.dwelling_size.unwrap_or(DEFAULT_DWELLING_SIZE),
            region: req.region,
            reentering_workforce: req.reentering_workforce,
        }
    }
}
