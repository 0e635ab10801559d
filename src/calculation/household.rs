//! Household aggregation.
//!
//! Runs every rule for a household situation in a fixed order and combines
//! the results into a [`HouseholdOutcome`] with its audit trace.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::HouseholdConfig;
use crate::models::{
    AuditStep, AuditTrace, AuditWarning, HouseholdOutcome, HouseholdSituation,
    IneligibilityReason, NetIncomeBreakdown,
};

use super::childcare::calculate_childcare_costs;
use super::family_allowance::calculate_family_allowance;
use super::family_bonus::calculate_family_bonus;
use super::housing_subsidy::{HousingParams, calculate_housing_subsidy};
use super::minimum_income::{MinimumIncomeParams, calculate_minimum_income};
use super::net_income::{NetIncomeOptions, calculate_monthly_net};
use super::single_earner_credit::calculate_single_earner_credit;

/// Calculates the complete financial picture of a household.
///
/// The rules run in this order, each recording one audit step:
///
/// 1. Net income of the primary earner, then of the partner if any
/// 2. Family allowance
/// 3. Single earner / single parent credit
/// 4. Family bonus on the combined tax left after the credit
/// 5. Housing subsidy on combined net income
/// 6. Minimum-income support on combined net income plus family allowance
/// 7. Childcare costs
///
/// The calculation never fails. Missing configuration for a region yields
/// ineligible results and a warning in the audit trace.
///
/// # Examples
///
/// ```
/// use household_income::calculation::{calculate_household, round_half_up};
/// use household_income::config::HouseholdConfig;
/// use household_income::models::{HouseholdSituation, Region};
/// use rust_decimal_macros::dec;
///
/// let config = HouseholdConfig::austria_2025();
/// let situation = HouseholdSituation::single(dec!(2000), Region::Vienna);
///
/// let outcome = calculate_household(&config, &situation);
/// assert_eq!(round_half_up(outcome.total_household_income), dec!(1606.59));
/// ```
pub fn calculate_household(
    config: &HouseholdConfig,
    situation: &HouseholdSituation,
) -> HouseholdOutcome {
    let mut steps: Vec<AuditStep> = Vec::new();
    let mut warnings: Vec<AuditWarning> = Vec::new();
    let mut step_number: u32 = 1;

    let benefits = config.benefits();
    let child_ages = situation.child_ages();
    let num_children = situation.num_children();
    let num_adults = situation.num_adults();
    let household_size = situation.household_size();

    let primary = calculate_monthly_net(
        situation.monthly_gross_income,
        config.tax(),
        NetIncomeOptions::default(),
        step_number,
    );
    debug!(
        gross = %situation.monthly_gross_income,
        net = %primary.breakdown.net,
        "Primary net income"
    );
    steps.push(primary.audit_step);
    step_number += 1;

    let partner: Option<NetIncomeBreakdown> = match situation.partner_income() {
        Some(partner_gross) => {
            let result = calculate_monthly_net(
                partner_gross,
                config.tax(),
                NetIncomeOptions::default(),
                step_number,
            );
            debug!(gross = %partner_gross, net = %result.breakdown.net, "Partner net income");
            let mut audit_step = result.audit_step;
            audit_step.rule_id = "partner_net_income".to_string();
            audit_step.rule_name = "Partner Gross To Net".to_string();
            steps.push(audit_step);
            step_number += 1;
            Some(result.breakdown)
        }
        None => None,
    };
    let primary = primary.breakdown;

    let combined_net_income =
        primary.net + partner.as_ref().map_or(Decimal::ZERO, |p| p.net);
    let combined_annual_tax =
        primary.annual_tax + partner.as_ref().map_or(Decimal::ZERO, |p| p.annual_tax);

    let allowance = calculate_family_allowance(&child_ages, &benefits.family_allowance, step_number);
    debug!(amount = %allowance.allowance.monthly_amount, "Family allowance");
    steps.push(allowance.audit_step);
    step_number += 1;
    let family_allowance = allowance.allowance;

    let partner_annual_income = situation
        .partner_monthly_gross_income
        .unwrap_or(Decimal::ZERO)
        * Decimal::from(12);
    let credit = calculate_single_earner_credit(
        situation.marital_status,
        num_children,
        partner_annual_income,
        &benefits.single_earner_credit,
        step_number,
    );
    debug!(
        eligible = credit.credit.eligible,
        annual = %credit.credit.annual_credit,
        "Single earner credit"
    );
    steps.push(credit.audit_step);
    step_number += 1;
    let single_earner_credit = credit.credit;

    let tax_after_credit = (combined_annual_tax - single_earner_credit.annual_credit).max(Decimal::ZERO);
    let bonus = calculate_family_bonus(
        &child_ages,
        tax_after_credit,
        &benefits.family_bonus,
        step_number,
    );
    debug!(
        used = %bonus.bonus.used_bonus,
        kindermehrbetrag = %bonus.bonus.kindermehrbetrag,
        "Family bonus"
    );
    steps.push(bonus.audit_step);
    step_number += 1;
    let family_bonus = bonus.bonus;

    let housing_params = HousingParams {
        household_size,
        num_adults,
        num_children,
        monthly_net_income: combined_net_income,
        housing_cost: situation.housing_cost,
        dwelling_size: situation.dwelling_size,
    };
    let housing = calculate_housing_subsidy(
        situation.region,
        config.housing_scheme(situation.region),
        &housing_params,
        step_number,
    );
    debug!(
        region = %situation.region,
        amount = %housing.subsidy.monthly_amount,
        "Housing subsidy"
    );
    steps.push(housing.audit_step);
    step_number += 1;
    let housing_subsidy = housing.subsidy;

    if housing_subsidy.reason == Some(IneligibilityReason::RegionNotConfigured) {
        warnings.push(AuditWarning {
            code: "HOUSING_SCHEME_MISSING".to_string(),
            message: format!("No housing subsidy scheme configured for {}", situation.region),
            severity: "medium".to_string(),
        });
    }

    let minimum_income = calculate_minimum_income(
        &MinimumIncomeParams {
            num_adults,
            num_children,
            monthly_net_income: combined_net_income,
            family_allowance: family_allowance.monthly_amount,
            reentering_workforce: situation.reentering_workforce,
        },
        &benefits.minimum_income,
        step_number,
    );
    debug!(amount = %minimum_income.support.monthly_amount, "Minimum income support");
    steps.push(minimum_income.audit_step);
    step_number += 1;
    let minimum_income_support = minimum_income.support;

    let childcare_table = config.childcare_costs(situation.region);
    if childcare_table.is_none() && situation.children.iter().any(|c| c.in_childcare) {
        warnings.push(AuditWarning {
            code: "CHILDCARE_TABLE_MISSING".to_string(),
            message: format!("No childcare fees configured for {}", situation.region),
            severity: "low".to_string(),
        });
    }
    let childcare = calculate_childcare_costs(&situation.children, childcare_table, step_number);
    debug!(amount = %childcare.costs.monthly_amount, "Childcare costs");
    steps.push(childcare.audit_step);
    let childcare_costs = childcare.costs;

    let total_tax_credits = single_earner_credit.annual_credit + family_bonus.used_bonus;
    let total_monthly_benefits = family_allowance.monthly_amount
        + housing_subsidy.monthly_amount
        + family_bonus.monthly_amount
        + minimum_income_support.monthly_amount;
    let total_household_income =
        combined_net_income + total_monthly_benefits - childcare_costs.monthly_amount;

    debug!(
        household_size,
        combined_net = %combined_net_income,
        benefits = %total_monthly_benefits,
        total = %total_household_income,
        "Household calculation complete"
    );

    HouseholdOutcome {
        household_size,
        primary,
        partner,
        combined_net_income,
        combined_annual_tax,
        family_allowance,
        single_earner_credit,
        family_bonus,
        housing_subsidy,
        minimum_income_support,
        childcare_costs,
        total_tax_credits,
        total_monthly_benefits,
        total_household_income,
        audit_trace: AuditTrace { steps, warnings },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::round_half_up;
    use crate::models::{Child, CreditKind, MAX_INPUT_AMOUNT, MaritalStatus, Region};
    use rust_decimal_macros::dec;

    fn config() -> HouseholdConfig {
        HouseholdConfig::austria_2025()
    }

    fn married_vienna() -> HouseholdSituation {
        HouseholdSituation {
            monthly_gross_income: dec!(3000),
            partner_monthly_gross_income: Some(Decimal::ZERO),
            marital_status: MaritalStatus::Married,
            children: vec![Child::new(4), Child::new(9)],
            housing_cost: dec!(900),
            dwelling_size: dec!(75),
            region: Region::Vienna,
            reentering_workforce: false,
        }
    }

    #[test]
    fn test_single_2000_without_benefits() {
        let outcome = calculate_household(&config(), &HouseholdSituation::single(dec!(2000), Region::Vienna));

        assert_eq!(outcome.household_size, 1);
        assert!(outcome.partner.is_none());
        assert_eq!(outcome.total_monthly_benefits, Decimal::ZERO);
        assert_eq!(outcome.total_household_income, outcome.primary.net);
        assert_eq!(round_half_up(outcome.total_household_income), dec!(1606.59));
        assert_eq!(outcome.minimum_income_support.monthly_amount, Decimal::ZERO);
        assert_eq!(
            outcome.housing_subsidy.reason,
            Some(IneligibilityReason::NoHousingCost)
        );
    }

    #[test]
    fn test_married_with_two_children() {
        let outcome = calculate_household(&config(), &married_vienna());

        assert_eq!(outcome.household_size, 4);
        assert_eq!(outcome.combined_net_income, dec!(2141.576));
        assert_eq!(outcome.family_allowance.monthly_amount, dec!(455.00));
        assert_eq!(outcome.single_earner_credit.kind, Some(CreditKind::SingleEarner));
        assert_eq!(outcome.single_earner_credit.annual_credit, dec!(813));
        assert_eq!(outcome.family_bonus.used_bonus, dec!(2982.888));
        assert_eq!(outcome.family_bonus.kindermehrbetrag, dec!(1017.112));
        assert_eq!(
            outcome.housing_subsidy.reason,
            Some(IneligibilityReason::NoAssessableCost)
        );
        assert_eq!(outcome.minimum_income_support.monthly_amount, Decimal::ZERO);
        assert_eq!(outcome.total_tax_credits, dec!(3795.888));
        assert_eq!(outcome.total_monthly_benefits, dec!(539.76));
        assert_eq!(outcome.total_household_income, dec!(2681.336));
    }

    #[test]
    fn test_zero_partner_income_is_not_an_earner() {
        let outcome = calculate_household(&config(), &married_vienna());
        assert!(outcome.partner.is_none());
        assert!(outcome.audit_trace.step("partner_net_income").is_none());
    }

    #[test]
    fn test_partner_income_is_combined() {
        let mut situation = married_vienna();
        situation.partner_monthly_gross_income = Some(dec!(2000));
        let outcome = calculate_household(&config(), &situation);

        let partner = outcome.partner.as_ref().unwrap();
        assert_eq!(outcome.combined_net_income, outcome.primary.net + partner.net);
        assert_eq!(outcome.combined_annual_tax, dec!(3795.888) + dec!(1092.152));
        // 24,000 per year is above the partner limit
        assert!(!outcome.single_earner_credit.eligible);
        assert!(outcome.audit_trace.step("partner_net_income").is_some());
    }

    #[test]
    fn test_largest_accepted_amounts_calculate() {
        let situation = HouseholdSituation {
            monthly_gross_income: MAX_INPUT_AMOUNT,
            partner_monthly_gross_income: Some(MAX_INPUT_AMOUNT),
            marital_status: MaritalStatus::Married,
            children: vec![Child::in_care(2, true), Child::new(12)],
            housing_cost: MAX_INPUT_AMOUNT,
            dwelling_size: MAX_INPUT_AMOUNT,
            region: Region::Vienna,
            reentering_workforce: false,
        };
        assert!(situation.validate().is_ok());

        let outcome = calculate_household(&config(), &situation);

        assert!(outcome.combined_net_income > Decimal::ZERO);
        assert!(outcome.combined_net_income < MAX_INPUT_AMOUNT * dec!(2));
        assert_eq!(
            outcome.housing_subsidy.reason,
            Some(IneligibilityReason::IncomeAboveLimit)
        );
        assert_eq!(outcome.minimum_income_support.monthly_amount, Decimal::ZERO);
    }

    #[test]
    fn test_partner_income_ignored_when_single() {
        let mut situation = HouseholdSituation::single(dec!(2000), Region::Tyrol);
        situation.partner_monthly_gross_income = Some(dec!(3000));
        let outcome = calculate_household(&config(), &situation);

        assert!(outcome.partner.is_none());
        assert_eq!(outcome.combined_net_income, outcome.primary.net);
    }

    #[test]
    fn test_unemployed_single_gets_minimum_income() {
        let outcome = calculate_household(&config(), &HouseholdSituation::single(Decimal::ZERO, Region::Styria));

        assert_eq!(outcome.minimum_income_support.monthly_amount, dec!(1209));
        assert_eq!(outcome.total_household_income, dec!(1209));
    }

    #[test]
    fn test_childcare_reduces_total() {
        let mut situation = HouseholdSituation::single(dec!(2500), Region::Salzburg);
        situation.marital_status = MaritalStatus::SingleParent;
        situation.children = vec![Child::in_care(3, true)];
        let outcome = calculate_household(&config(), &situation);

        assert_eq!(outcome.childcare_costs.monthly_amount, dec!(275));
        assert_eq!(
            outcome.total_household_income,
            outcome.combined_net_income + outcome.total_monthly_benefits - dec!(275)
        );
        assert_eq!(outcome.single_earner_credit.kind, Some(CreditKind::SingleParent));
    }

    #[test]
    fn test_missing_housing_scheme_is_warned() {
        let config = config().with_housing_scheme(Region::Tyrol, None).unwrap();
        let mut situation = HouseholdSituation::single(dec!(1200), Region::Tyrol);
        situation.housing_cost = dec!(600);
        let outcome = calculate_household(&config, &situation);

        assert_eq!(
            outcome.housing_subsidy.reason,
            Some(IneligibilityReason::RegionNotConfigured)
        );
        assert_eq!(outcome.audit_trace.warnings.len(), 1);
        assert_eq!(outcome.audit_trace.warnings[0].code, "HOUSING_SCHEME_MISSING");
    }

    #[test]
    fn test_audit_steps_are_numbered_in_order() {
        let outcome = calculate_household(&config(), &married_vienna());
        let rule_ids: Vec<&str> = outcome
            .audit_trace
            .steps
            .iter()
            .map(|s| s.rule_id.as_str())
            .collect();

        assert_eq!(
            rule_ids,
            vec![
                "net_income",
                "family_allowance",
                "single_earner_credit",
                "family_bonus",
                "housing_subsidy",
                "minimum_income",
                "childcare_costs",
            ]
        );
        for (index, step) in outcome.audit_trace.steps.iter().enumerate() {
            assert_eq!(step.step_number, index as u32 + 1);
        }
    }

    #[test]
    fn test_outcome_serializes_to_json() {
        let outcome = calculate_household(&config(), &married_vienna());
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["household_size"], 4);
        assert_eq!(json["family_allowance"]["monthly_amount"], "455.00");
        assert!(json.get("partner").is_none());
    }
}
