//! Familienbonus Plus and Kindermehrbetrag.
//!
//! The bonus (§ 33 Abs 3a EStG) reduces income tax per child. Whatever the
//! household's tax cannot absorb is paid out as Kindermehrbetrag
//! (§ 33 Abs 7 EStG), capped per child.

use rust_decimal::Decimal;

use crate::config::FamilyBonusConfig;
use crate::models::{AuditStep, FamilyBonus, IneligibilityReason};

use super::common::round_half_up;

const ADULT_AGE: u32 = 18;

/// The result of a family bonus calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct FamilyBonusResult {
    /// The family bonus.
    pub bonus: FamilyBonus,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates the family bonus against an annual tax liability.
///
/// `tax_liability` is the household's annual tax after the single earner
/// credit. A negative liability is treated as zero.
///
/// # Examples
///
/// ```
/// use household_income::calculation::calculate_family_bonus;
/// use household_income::config::HouseholdConfig;
/// use rust_decimal_macros::dec;
///
/// let config = HouseholdConfig::austria_2025();
/// let result = calculate_family_bonus(&[4], dec!(5000), &config.benefits().family_bonus, 1);
///
/// assert_eq!(result.bonus.used_bonus, dec!(2000));
/// assert_eq!(result.bonus.remaining_tax, dec!(3000));
/// assert_eq!(result.bonus.kindermehrbetrag, dec!(0));
/// ```
pub fn calculate_family_bonus(
    child_ages: &[u32],
    tax_liability: Decimal,
    config: &FamilyBonusConfig,
    step_number: u32,
) -> FamilyBonusResult {
    let num_children = child_ages.len() as u32;
    let liability = tax_liability.max(Decimal::ZERO);

    let max_bonus: Decimal = child_ages
        .iter()
        .map(|&age| {
            if age < ADULT_AGE {
                config.under_18
            } else {
                config.over_18
            }
        })
        .sum();

    let used_bonus = max_bonus.min(liability);
    let remaining_tax = liability - used_bonus;
    let kindermehrbetrag = (max_bonus - used_bonus)
        .min(config.kindermehrbetrag_per_child * Decimal::from(num_children));

    let eligible = num_children > 0;
    let monthly_amount = round_half_up(kindermehrbetrag / Decimal::from(12));

    let bonus = FamilyBonus {
        eligible,
        monthly_amount,
        reason: (!eligible).then_some(IneligibilityReason::NoChildren),
        max_bonus,
        used_bonus,
        remaining_tax,
        kindermehrbetrag,
    };

    let reasoning = if eligible {
        format!(
            "Bonus up to {} against tax {}: used {}, Kindermehrbetrag {}",
            max_bonus.normalize(),
            liability.normalize(),
            used_bonus.normalize(),
            kindermehrbetrag.normalize()
        )
    } else {
        "No children in household: no family bonus".to_string()
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "family_bonus".to_string(),
        rule_name: "Family Bonus Plus".to_string(),
        legal_ref: "§ 33 Abs 3a EStG, § 33 Abs 7 EStG".to_string(),
        input: serde_json::json!({
            "child_ages": child_ages,
            "tax_liability": liability.normalize().to_string(),
        }),
        output: serde_json::json!({
            "max_bonus": max_bonus.normalize().to_string(),
            "used_bonus": used_bonus.normalize().to_string(),
            "remaining_tax": remaining_tax.normalize().to_string(),
            "kindermehrbetrag": kindermehrbetrag.normalize().to_string(),
        }),
        reasoning,
    };

    FamilyBonusResult { bonus, audit_step }
}
