//! Minimum-income support.
//!
//! Sozialhilfe tops household income up to an entitlement that depends on
//! the household composition (Sozialhilfe-Grundsatzgesetz). Family allowance
//! counts as income; re-entrants to the workforce keep part of their
//! earnings.

use rust_decimal::Decimal;

use crate::config::MinimumIncomeConfig;
use crate::models::{AuditStep, IneligibilityReason, MinimumIncomeSupport};

use super::common::round_half_up;

/// Household figures minimum-income support depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinimumIncomeParams {
    /// Number of adults.
    pub num_adults: u32,
    /// Number of children.
    pub num_children: u32,
    /// Combined monthly net income.
    pub monthly_net_income: Decimal,
    /// Monthly family allowance paid to the household.
    pub family_allowance: Decimal,
    /// Whether an earner is re-entering the workforce.
    pub reentering_workforce: bool,
}

/// The result of a minimum-income calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct MinimumIncomeResult {
    /// The support.
    pub support: MinimumIncomeSupport,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the monthly minimum-income top-up.
///
/// # Examples
///
/// ```
/// use household_income::calculation::{calculate_minimum_income, MinimumIncomeParams};
/// use household_income::config::HouseholdConfig;
/// use rust_decimal_macros::dec;
///
/// let config = HouseholdConfig::austria_2025();
/// let params = MinimumIncomeParams {
///     num_adults: 1,
///     num_children: 0,
///     monthly_net_income: dec!(900),
///     family_allowance: dec!(0),
///     reentering_workforce: false,
/// };
///
/// let result = calculate_minimum_income(&params, &config.benefits().minimum_income, 1);
/// assert_eq!(result.support.monthly_amount, dec!(309.00));
/// ```
pub fn calculate_minimum_income(
    params: &MinimumIncomeParams,
    config: &MinimumIncomeConfig,
    step_number: u32,
) -> MinimumIncomeResult {
    let adult_entitlement = if params.num_adults >= 2 {
        config.couple
    } else {
        config.single
    };
    let max_entitlement =
        adult_entitlement + config.child_supplement * Decimal::from(params.num_children);
    let with_housing = max_entitlement * (Decimal::ONE + config.housing_supplement_rate);

    let income_disregard = if params.reentering_workforce {
        params.monthly_net_income * config.reentry_disregard_rate
    } else {
        Decimal::ZERO
    };
    let countable_income = params.monthly_net_income - income_disregard + params.family_allowance;

    let monthly_amount = round_half_up((max_entitlement - countable_income).max(Decimal::ZERO));
    let eligible = monthly_amount > Decimal::ZERO;

    let support = MinimumIncomeSupport {
        eligible,
        monthly_amount,
        reason: (!eligible).then_some(IneligibilityReason::IncomeCoversEntitlement),
        max_entitlement,
        with_housing,
        income_disregard,
        countable_income,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "minimum_income".to_string(),
        rule_name: "Minimum Income Support".to_string(),
        legal_ref: "§ 5 Sozialhilfe-Grundsatzgesetz".to_string(),
        input: serde_json::json!({
            "num_adults": params.num_adults,
            "num_children": params.num_children,
            "monthly_net_income": params.monthly_net_income.normalize().to_string(),
            "family_allowance": params.family_allowance.normalize().to_string(),
            "reentering_workforce": params.reentering_workforce,
        }),
        output: serde_json::json!({
            "max_entitlement": max_entitlement.normalize().to_string(),
            "countable_income": countable_income.normalize().to_string(),
            "monthly_amount": monthly_amount.normalize().to_string(),
        }),
        reasoning: format!(
            "Entitlement {} less countable income {} = {}",
            max_entitlement.normalize(),
            round_half_up(countable_income).normalize(),
            monthly_amount.normalize()
        ),
    };

    MinimumIncomeResult {
        support,
        audit_step,
    }
}
