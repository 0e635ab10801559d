//! Searching lower salaries for a cheaper working point.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::calculation::calculate_household;
use crate::config::HouseholdConfig;
use crate::models::{HouseholdOutcome, HouseholdSituation};

/// Gross reductions tried below the current salary.
const GROSS_REDUCTIONS: [Decimal; 3] = [dec!(500), dec!(1000), dec!(1500)];

/// Points losing this much household income per gross euro or more are ignored.
const MAX_LOSS_PER_EURO: Decimal = dec!(0.5);

/// A lower salary at which the household loses little income.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkingPoint {
    /// The lower monthly gross.
    pub gross: Decimal,
    /// Household income at that gross.
    pub total: Decimal,
    /// Household income lost compared to the current salary.
    pub difference: Decimal,
    /// Income lost per euro of gross given up.
    pub difference_per_euro: Decimal,
}

/// Finds the lower salary that costs the household least per gross euro.
///
/// Tries the current gross minus 500, 1000 and 1500 (skipping negative
/// values) and keeps the point with the smallest loss per euro, provided
/// that loss is below 50 cents. Returns `None` when no candidate qualifies.
pub fn find_cheaper_working_point(
    config: &HouseholdConfig,
    situation: &HouseholdSituation,
    current: &HouseholdOutcome,
) -> Option<WorkingPoint> {
    let current_gross = situation.monthly_gross_income;
    let mut best: Option<WorkingPoint> = None;

    for reduction in GROSS_REDUCTIONS {
        let gross = current_gross - reduction;
        if gross < Decimal::ZERO {
            continue;
        }

        let outcome = calculate_household(config, &situation.with_monthly_gross(gross));
        let difference = current.total_household_income - outcome.total_household_income;
        let difference_per_euro = difference / reduction;

        let improves = best
            .as_ref()
            .is_none_or(|b| difference_per_euro < b.difference_per_euro);
        if improves && difference_per_euro < MAX_LOSS_PER_EURO {
            best = Some(WorkingPoint {
                gross,
                total: outcome.total_household_income,
                difference,
                difference_per_euro,
            });
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Region;

    fn cheaper_point(situation: &HouseholdSituation) -> Option<WorkingPoint> {
        let config = HouseholdConfig::austria_2025();
        let current = calculate_household(&config, situation);
        find_cheaper_working_point(&config, situation, &current)
    }

    #[test]
    fn test_low_salary_has_no_lower_points() {
        assert_eq!(cheaper_point(&HouseholdSituation::single(dec!(400), Region::Vienna)), None);
    }

    #[test]
    fn test_salary_without_benefits_loses_more_than_half() {
        // Without benefits every gross euro above the threshold keeps more
        // than 50 cents of net income.
        assert_eq!(cheaper_point(&HouseholdSituation::single(dec!(3000), Region::Vienna)), None);
    }

    #[test]
    fn test_minimum_income_floor_makes_working_less_cheap() {
        let point = cheaper_point(&HouseholdSituation::single(dec!(1000), Region::Vienna))
            .expect("working point");

        // Minimum income tops 1000 and 500 gross up to the same total.
        assert_eq!(point.gross, dec!(500));
        assert_eq!(point.difference, Decimal::ZERO);
        assert_eq!(point.difference_per_euro, Decimal::ZERO);
    }

    #[test]
    fn test_reductions_skip_negative_gross() {
        let point = cheaper_point(&HouseholdSituation::single(dec!(1200), Region::Vienna))
            .expect("working point");
        assert!(point.gross >= Decimal::ZERO);
        assert!(point.difference_per_euro < MAX_LOSS_PER_EURO);
    }
}
