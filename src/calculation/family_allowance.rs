//! Family allowance calculation.
//!
//! Familienbeihilfe (§ 8 FLAG) is paid per child by age band, together with
//! the Kinderabsetzbetrag (§ 33 Abs 3 EStG) and, from the second child, the
//! Geschwisterstaffelung.

use rust_decimal::Decimal;

use crate::config::FamilyAllowanceRates;
use crate::models::{AuditStep, ChildAllowance, FamilyAllowance, IneligibilityReason};

use super::common::round_half_up;

/// Households with more children than this use the top sibling bonus tier.
/// A tier missing from the table pays no bonus.
const SIBLING_BONUS_CAP: u32 = 7;

/// The result of a family allowance calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct FamilyAllowanceResult {
    /// The family allowance.
    pub allowance: FamilyAllowance,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the monthly Familienbeihilfe for a child of the given age.
pub fn allowance_for_age(age: u32, rates: &FamilyAllowanceRates) -> Decimal {
    match age {
        0..=2 => rates.age_0_to_2,
        3..=9 => rates.age_3_to_9,
        10..=18 => rates.age_10_to_18,
        _ => rates.age_19_plus,
    }
}

/// Calculates the monthly family allowance for all children.
///
/// The sibling bonus is a per-child amount that depends on the number of
/// children, multiplied by that number.
///
/// # Examples
///
/// ```
/// use household_income::calculation::calculate_family_allowance;
/// use household_income::config::HouseholdConfig;
/// use rust_decimal_macros::dec;
///
/// let config = HouseholdConfig::austria_2025();
/// let rates = &config.benefits().family_allowance;
///
/// let result = calculate_family_allowance(&[5], rates, 1);
/// assert_eq!(result.allowance.monthly_amount, dec!(218.90));
/// ```
pub fn calculate_family_allowance(
    child_ages: &[u32],
    rates: &FamilyAllowanceRates,
    step_number: u32,
) -> FamilyAllowanceResult {
    let num_children = child_ages.len() as u32;

    let per_child: Vec<ChildAllowance> = child_ages
        .iter()
        .map(|&age| ChildAllowance {
            age,
            base_amount: allowance_for_age(age, rates),
            tax_offset: rates.tax_offset_per_child,
        })
        .collect();

    let base_amount: Decimal = per_child.iter().map(|c| c.base_amount).sum();
    let tax_offset: Decimal = per_child.iter().map(|c| c.tax_offset).sum();

    let sibling_bonus = if num_children >= 2 {
        rates
            .sibling_bonus
            .get(&num_children.min(SIBLING_BONUS_CAP))
            .copied()
            .unwrap_or(Decimal::ZERO)
            * Decimal::from(num_children)
    } else {
        Decimal::ZERO
    };

    let eligible = num_children > 0;
    let monthly_amount = round_half_up(base_amount + tax_offset + sibling_bonus);

    let allowance = FamilyAllowance {
        eligible,
        monthly_amount,
        reason: (!eligible).then_some(IneligibilityReason::NoChildren),
        num_children,
        base_amount,
        tax_offset,
        sibling_bonus,
        per_child,
    };

    let reasoning = if eligible {
        format!(
            "{} children: base {} + tax offset {} + sibling bonus {} = {}",
            num_children,
            base_amount.normalize(),
            tax_offset.normalize(),
            sibling_bonus.normalize(),
            monthly_amount.normalize()
        )
    } else {
        "No children in household: no family allowance".to_string()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "family_allowance".to_string(),
        rule_name: "Family Allowance".to_string(),
        legal_ref: "§ 8 FLAG, § 33 Abs 3 EStG".to_string(),
        input: serde_json::json!({
            "child_ages": child_ages,
        }),
        output: serde_json::json!({
            "base_amount": base_amount.normalize().to_string(),
            "tax_offset": tax_offset.normalize().to_string(),
            "sibling_bonus": sibling_bonus.normalize().to_string(),
            "monthly_amount": monthly_amount.normalize().to_string(),
        }),
        reasoning,
    };

    FamilyAllowanceResult {
        allowance,
        audit_step,
    }
}
