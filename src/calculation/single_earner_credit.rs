//! Single earner and single parent credit.
//!
//! Alleinverdienerabsetzbetrag and Alleinerzieherabsetzbetrag
//! (§ 33 Abs 4 Z 1 und 2 EStG) share one schedule by number of children.

use rust_decimal::Decimal;

use crate::config::SingleEarnerCreditConfig;
use crate::models::{AuditStep, CreditKind, IneligibilityReason, MaritalStatus, SingleEarnerCredit};

use super::common::round_half_up;

/// The result of a single earner credit calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct SingleEarnerCreditResult {
    /// The credit.
    pub credit: SingleEarnerCredit,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Returns the annual credit for a number of children.
pub fn credit_for_children(num_children: u32, config: &SingleEarnerCreditConfig) -> Decimal {
    match num_children {
        0 => Decimal::ZERO,
        1 => config.one_child,
        n => config.two_children + config.additional_child * Decimal::from(n - 2),
    }
}

/// Calculates the single earner or single parent credit.
///
/// Single parents always qualify. Married earners qualify when the partner's
/// annual income is at or below the configured limit. Nobody qualifies
/// without children.
///
/// # Examples
///
/// ```
/// use household_income::calculation::calculate_single_earner_credit;
/// use household_income::config::HouseholdConfig;
/// use household_income::models::MaritalStatus;
/// use rust_decimal_macros::dec;
///
/// let config = HouseholdConfig::austria_2025();
/// let rates = &config.benefits().single_earner_credit;
///
/// let result = calculate_single_earner_credit(MaritalStatus::SingleParent, 2, dec!(0), rates, 1);
/// assert_eq!(result.credit.annual_credit, dec!(813));
/// ```
pub fn calculate_single_earner_credit(
    marital_status: MaritalStatus,
    num_children: u32,
    partner_annual_income: Decimal,
    config: &SingleEarnerCreditConfig,
    step_number: u32,
) -> SingleEarnerCreditResult {
    let outcome = if num_children == 0 {
        Err(IneligibilityReason::NoChildren)
    } else {
        match marital_status {
            MaritalStatus::SingleParent => Ok(CreditKind::SingleParent),
            MaritalStatus::Married if partner_annual_income <= config.partner_income_limit => {
                Ok(CreditKind::SingleEarner)
            }
            MaritalStatus::Married => Err(IneligibilityReason::PartnerIncomeAboveLimit),
            MaritalStatus::Single => Err(IneligibilityReason::MaritalStatusNotEligible),
        }
    };

    let (credit, reasoning) = match outcome {
        Ok(kind) => {
            let annual_credit = credit_for_children(num_children, config);
            let reasoning = format!(
                "{:?} credit for {} children: {} per year",
                kind,
                num_children,
                annual_credit.normalize()
            );
            let credit = SingleEarnerCredit {
                eligible: true,
                monthly_amount: round_half_up(annual_credit / Decimal::from(12)),
                reason: None,
                kind: Some(kind),
                annual_credit,
            };
            (credit, reasoning)
        }
        Err(reason) => {
            let credit = SingleEarnerCredit {
                reason: Some(reason),
                ..SingleEarnerCredit::default()
            };
            (credit, format!("No credit: {}", reason))
        }
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "single_earner_credit".to_string(),
        rule_name: "Single Earner / Single Parent Credit".to_string(),
        legal_ref: "§ 33 Abs 4 EStG".to_string(),
        input: serde_json::json!({
            "marital_status": marital_status,
            "num_children": num_children,
            "partner_annual_income": partner_annual_income.normalize().to_string(),
        }),
        output: serde_json::json!({
            "eligible": credit.eligible,
            "kind": credit.kind,
            "annual_credit": credit.annual_credit.normalize().to_string(),
        }),
        reasoning,
    };

    SingleEarnerCreditResult { credit, audit_step }
}
