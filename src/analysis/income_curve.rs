//! Household income over a range of gross salaries.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculation::calculate_household;
use crate::config::HouseholdConfig;
use crate::error::{EngineError, EngineResult};
use crate::models::{HouseholdSituation, MAX_INPUT_AMOUNT};

/// The gross salaries a sweep visits.
///
/// Points run from `min_gross` to `max_gross` inclusive in steps of `step`.
/// A step of zero or below yields no points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepRange {
    /// First monthly gross.
    pub min_gross: Decimal,
    /// Last monthly gross.
    pub max_gross: Decimal,
    /// Distance between points.
    pub step: Decimal,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            min_gross: Decimal::ZERO,
            max_gross: dec!(6000),
            step: dec!(100),
        }
    }
}

impl SweepRange {
    /// Returns the gross salaries in ascending order.
    ///
    /// ```
    /// use household_income::analysis::SweepRange;
    /// use rust_decimal_macros::dec;
    ///
    /// let range = SweepRange { min_gross: dec!(0), max_gross: dec!(300), step: dec!(100) };
    /// assert_eq!(range.points(), vec![dec!(0), dec!(100), dec!(200), dec!(300)]);
    /// ```
    pub fn points(&self) -> Vec<Decimal> {
        let mut points = Vec::new();
        if self.step <= Decimal::ZERO {
            return points;
        }

        let mut gross = self.min_gross;
        while gross <= self.max_gross {
            points.push(gross);
            match gross.checked_add(self.step) {
                Some(next) => gross = next,
                None => break,
            }
        }
        points
    }

    /// Checks a range supplied by an external caller.
    ///
    /// Both ends must lie between zero and [`MAX_INPUT_AMOUNT`], the same
    /// bound applied to a situation's gross income.
    pub fn validate(&self) -> EngineResult<()> {
        let ends = [
            ("range.min_gross", self.min_gross),
            ("range.max_gross", self.max_gross),
        ];
        for (field, value) in ends {
            if value < Decimal::ZERO || value > MAX_INPUT_AMOUNT {
                return Err(EngineError::InvalidSituation {
                    field: field.to_string(),
                    message: format!("must be between 0 and {}", MAX_INPUT_AMOUNT),
                });
            }
        }
        Ok(())
    }
}

/// One point of the income curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeCurvePoint {
    /// Monthly gross of the primary earner.
    pub gross: Decimal,
    /// Combined monthly net income.
    pub combined_net: Decimal,
    /// Family allowance.
    pub family_allowance: Decimal,
    /// Housing subsidy.
    pub housing_subsidy: Decimal,
    /// Monthly Kindermehrbetrag.
    pub kindermehrbetrag: Decimal,
    /// Minimum-income support.
    pub minimum_income: Decimal,
    /// Childcare costs.
    pub childcare_costs: Decimal,
    /// Total household income.
    pub total: Decimal,
}

/// Calculates the household at every gross salary in `range`.
///
/// Everything except the primary earner's gross is taken from `situation`,
/// including the partner's income.
pub fn income_curve(
    config: &HouseholdConfig,
    situation: &HouseholdSituation,
    range: &SweepRange,
) -> Vec<IncomeCurvePoint> {
    range
        .points()
        .into_iter()
        .map(|gross| {
            let outcome = calculate_household(config, &situation.with_monthly_gross(gross));
            IncomeCurvePoint {
                gross,
                combined_net: outcome.combined_net_income,
                family_allowance: outcome.family_allowance.monthly_amount,
                housing_subsidy: outcome.housing_subsidy.monthly_amount,
                kindermehrbetrag: outcome.family_bonus.monthly_amount,
                minimum_income: outcome.minimum_income_support.monthly_amount,
                childcare_costs: outcome.childcare_costs.monthly_amount,
                total: outcome.total_household_income,
            }
        })
        .collect()
}
