//! Childcare costs.
//!
//! Children under six who attend a childcare facility cost the household a
//! monthly care fee (full-day or half-day) plus meals, per the fee table of
//! the federal state.

use rust_decimal::Decimal;

use crate::config::ChildcareCostTable;
use crate::models::{AuditStep, Child, ChildcareCosts, ChildcareLine};

use super::common::round_half_up;

/// Children from this age attend school and no longer incur childcare fees.
const SCHOOL_AGE: u32 = 6;

/// The result of a childcare cost calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct ChildcareResult {
    /// The childcare costs.
    pub costs: ChildcareCosts,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates monthly childcare costs.
///
/// A region without a fee table yields zero.
///
/// # Examples
///
/// ```
/// use household_income::calculation::calculate_childcare_costs;
/// use household_income::config::HouseholdConfig;
/// use household_income::models::{Child, Region};
/// use rust_decimal_macros::dec;
///
/// let config = HouseholdConfig::austria_2025();
/// let children = [Child::in_care(3, true), Child::new(8)];
///
/// let result = calculate_childcare_costs(&children, config.childcare_costs(Region::Styria), 1);
/// assert_eq!(result.costs.monthly_amount, dec!(250.00));
/// ```
pub fn calculate_childcare_costs(
    children: &[Child],
    table: Option<&ChildcareCostTable>,
    step_number: u32,
) -> ChildcareResult {
    let breakdown: Vec<ChildcareLine> = match table {
        Some(table) => children
            .iter()
            .enumerate()
            .filter(|(_, child)| child.in_childcare && child.age < SCHOOL_AGE)
            .map(|(child_index, child)| {
                let care_cost = if child.full_day {
                    table.full_day
                } else {
                    table.half_day
                };
                ChildcareLine {
                    child_index,
                    age: child.age,
                    full_day: child.full_day,
                    care_cost,
                    meal_cost: table.meals,
                    total: care_cost + table.meals,
                }
            })
            .collect(),
        None => Vec::new(),
    };

    let monthly_amount = round_half_up(breakdown.iter().map(|line| line.total).sum());

    let costs = ChildcareCosts {
        monthly_amount,
        breakdown,
        table_name: table.map(|t| t.name.clone()),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "childcare_costs".to_string(),
        rule_name: "Childcare Costs".to_string(),
        legal_ref: "Landes-Kinderbetreuungsgesetz".to_string(),
        input: serde_json::json!({
            "children": children,
            "table": costs.table_name,
        }),
        output: serde_json::json!({
            "children_in_care": costs.breakdown.len(),
            "monthly_amount": monthly_amount.normalize().to_string(),
        }),
        reasoning: format!(
            "{} children under {} in care: {} per month",
            costs.breakdown.len(),
            SCHOOL_AGE,
            monthly_amount.normalize()
        ),
    };

    ChildcareResult { costs, audit_step }
}
