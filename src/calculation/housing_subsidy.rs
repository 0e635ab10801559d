//! Regional housing subsidy calculation.
//!
//! Housing subsidies (Wohnbeihilfe, Wohnunterstützung) are granted by the
//! federal states. Vienna and Styria have their own formulas; the remaining
//! states share one schedule that differs only in its parameters. The
//! formula is fixed by the [`HousingSubsidyScheme`] variant configured for a
//! region.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::config::{GenericScheme, HousingSubsidyScheme, StyriaScheme, ViennaScheme};
use crate::models::{AuditStep, HousingFormula, HousingSubsidy, IneligibilityReason, Region};

use super::common::{ratio, round_half_up, tier_lookup};

const VIENNA_SIZE_CAP: u32 = 5;
const STYRIA_LIMIT_CAP: u32 = 7;
const STYRIA_RENT_CAP: u32 = 5;
const GENERIC_SIZE_CAP: u32 = 5;

/// Styria pays only amounts above this.
const STYRIA_MIN_BENEFIT: Decimal = dec!(10);
/// Generic schemes without a configured minimum pay from this amount.
const GENERIC_DEFAULT_MIN_BENEFIT: Decimal = dec!(10);

/// Household figures the housing formulas depend on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HousingParams {
    /// Adults plus children.
    pub household_size: u32,
    /// Number of adults.
    pub num_adults: u32,
    /// Number of children.
    pub num_children: u32,
    /// Combined monthly net income.
    pub monthly_net_income: Decimal,
    /// Monthly rent or housing cost.
    pub housing_cost: Decimal,
    /// Dwelling size in square metres.
    pub dwelling_size: Decimal,
}

/// The result of a housing subsidy calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct HousingSubsidyResult {
    /// The housing subsidy.
    pub subsidy: HousingSubsidy,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

fn base_result(region: Region, formula: HousingFormula) -> HousingSubsidy {
    HousingSubsidy {
        formula: Some(formula),
        ..HousingSubsidy::ineligible(region, IneligibilityReason::IncomeAboveLimit)
    }
}

fn payable(mut subsidy: HousingSubsidy, benefit: Decimal) -> HousingSubsidy {
    subsidy.eligible = true;
    subsidy.monthly_amount = round_half_up(benefit);
    subsidy.reason = None;
    subsidy
}

fn not_payable(mut subsidy: HousingSubsidy, benefit: Decimal) -> HousingSubsidy {
    subsidy.reason = Some(if benefit > Decimal::ZERO {
        IneligibilityReason::BelowMinimumBenefit
    } else {
        IneligibilityReason::NoAssessableCost
    });
    subsidy
}

/// Wiener Wohnbeihilfe.
///
/// The assessable cost is the rent, capped at the appropriate dwelling size
/// times the maximum rate per square metre. The household pays a share of
/// its income itself; the subsidy covers the rest.
pub fn calculate_vienna_subsidy(
    region: Region,
    scheme: &ViennaScheme,
    params: &HousingParams,
) -> HousingSubsidy {
    let mut subsidy = base_result(region, HousingFormula::Vienna);
    let income = params.monthly_net_income;

    let income_limit = tier_lookup(&scheme.income_limits, params.household_size, VIENNA_SIZE_CAP);
    subsidy.income_limit = Some(income_limit);
    if income > income_limit {
        return subsidy;
    }

    let sizes = &scheme.appropriate_size;
    let appropriate_size = match params.household_size {
        0 | 1 => sizes.single,
        2 => sizes.couple,
        n => sizes.base + Decimal::from(n - 2) * sizes.per_additional,
    };

    let max_housing_cost = params.dwelling_size.min(appropriate_size) * scheme.max_rate_per_sqm;
    let assessable = params.housing_cost.min(max_housing_cost);
    let reasonable = income * scheme.min_housing_cost_percent;
    let benefit = (assessable - reasonable).max(Decimal::ZERO);

    subsidy.appropriate_size = Some(appropriate_size);
    subsidy.assessable_housing_cost = Some(assessable);
    subsidy.reasonable_housing_cost = Some(reasonable);

    if benefit > Decimal::ZERO {
        payable(subsidy, benefit)
    } else {
        not_payable(subsidy, benefit)
    }
}

/// Steirische Wohnunterstützung.
///
/// The considered rent is capped by household size and the result tapers
/// linearly with the ratio of income to the income limit.
pub fn calculate_styria_subsidy(
    region: Region,
    scheme: &StyriaScheme,
    params: &HousingParams,
) -> HousingSubsidy {
    let mut subsidy = base_result(region, HousingFormula::Styria);
    let income = params.monthly_net_income;

    let weights = &scheme.weighting_factors;
    let weighted_size = weights.household
        + Decimal::from(params.num_adults) * weights.adult
        + Decimal::from(params.num_children) * weights.minor;
    subsidy.weighted_income = Some(ratio(income, weighted_size));

    let income_limit = tier_lookup(&scheme.income_limits, params.household_size, STYRIA_LIMIT_CAP);
    subsidy.income_limit = Some(income_limit);
    if income > income_limit {
        return subsidy;
    }

    let max_subsidy = tier_lookup(&scheme.max_rent_subsidy, params.household_size, STYRIA_RENT_CAP);
    let reasonable = income * scheme.min_housing_cost_percent;
    let assessable = params.housing_cost.min(max_subsidy);
    let income_ratio = ratio(income, income_limit);

    let benefit = (assessable - reasonable).max(Decimal::ZERO) * (Decimal::ONE - income_ratio * dec!(0.5));

    subsidy.max_subsidy = Some(max_subsidy);
    subsidy.assessable_housing_cost = Some(assessable);
    subsidy.reasonable_housing_cost = Some(reasonable);

    if benefit > STYRIA_MIN_BENEFIT {
        payable(subsidy, benefit)
    } else {
        not_payable(subsidy, benefit)
    }
}

/// Housing subsidy schedule of the remaining federal states.
///
/// Applies, in order: the income limit (raised per child where configured),
/// the appropriate size cap, the own contribution (waived for very low
/// incomes where configured), the maximum benefit, and a taper once income
/// exceeds half the limit.
pub fn calculate_generic_subsidy(
    region: Region,
    scheme: &GenericScheme,
    params: &HousingParams,
) -> HousingSubsidy {
    let mut subsidy = base_result(region, HousingFormula::Generic);
    let income = params.monthly_net_income;

    let mut income_limit =
        tier_lookup(&scheme.income_limits, params.household_size, GENERIC_SIZE_CAP);
    if let Some(child_bonus) = scheme.child_bonus {
        income_limit += child_bonus * Decimal::from(params.num_children);
    }
    subsidy.income_limit = Some(income_limit);
    if income > income_limit {
        return subsidy;
    }

    let sizes = scheme.appropriate_size.clone().unwrap_or_default();
    let appropriate_size =
        sizes.first + Decimal::from(params.household_size.saturating_sub(1)) * sizes.per_additional;

    let max_housing_cost = params.dwelling_size.min(appropriate_size) * scheme.max_rate_per_sqm;
    let assessable = params.housing_cost.min(max_housing_cost);

    let reasonable = match scheme.no_contribution_below {
        Some(threshold) if income <= threshold => Decimal::ZERO,
        _ => income * scheme.min_housing_cost_percent,
    };

    let mut benefit = (assessable - reasonable).max(Decimal::ZERO);
    if let Some(max_benefit) = scheme.max_benefit {
        benefit = benefit.min(max_benefit);
    }

    let income_ratio = ratio(income, income_limit);
    if income_ratio > dec!(0.5) {
        benefit *= Decimal::ONE - (income_ratio - dec!(0.5)) * dec!(0.8);
    }

    subsidy.appropriate_size = Some(appropriate_size);
    subsidy.assessable_housing_cost = Some(assessable);
    subsidy.reasonable_housing_cost = Some(reasonable);
    subsidy.max_benefit = scheme.max_benefit;

    let min_benefit = scheme.min_benefit.unwrap_or(GENERIC_DEFAULT_MIN_BENEFIT);
    if benefit < min_benefit {
        not_payable(subsidy, benefit)
    } else {
        payable(subsidy, benefit)
    }
}

fn legal_ref(formula: Option<HousingFormula>) -> &'static str {
    match formula {
        Some(HousingFormula::Vienna) => "§ 20 WWFSG 1989",
        Some(HousingFormula::Styria) => "Stmk. Wohnunterstützungsgesetz",
        Some(HousingFormula::Generic) => "Wohnbauförderungsgesetz des Landes",
        None => "",
    }
}

/// Calculates the housing subsidy for a region.
///
/// Nothing is computed without a housing cost or without a scheme for the
/// region; both yield an ineligible result carrying the reason.
///
/// # Examples
///
/// ```
/// use household_income::calculation::{calculate_housing_subsidy, HousingParams};
/// use household_income::config::HouseholdConfig;
/// use household_income::models::{IneligibilityReason, Region};
/// use rust_decimal_macros::dec;
///
/// let config = HouseholdConfig::austria_2025();
/// let params = HousingParams {
///     household_size: 1,
///     num_adults: 1,
///     num_children: 0,
///     monthly_net_income: dec!(1000),
///     housing_cost: dec!(0),
///     dwelling_size: dec!(50),
/// };
///
/// let result = calculate_housing_subsidy(
///     Region::Vienna,
///     config.housing_scheme(Region::Vienna),
///     &params,
///     1,
/// );
/// assert_eq!(result.subsidy.reason, Some(IneligibilityReason::NoHousingCost));
/// ```
pub fn calculate_housing_subsidy(
    region: Region,
    scheme: Option<&HousingSubsidyScheme>,
    params: &HousingParams,
    step_number: u32,
) -> HousingSubsidyResult {
    let subsidy = if params.housing_cost <= Decimal::ZERO {
        HousingSubsidy::ineligible(region, IneligibilityReason::NoHousingCost)
    } else {
        match scheme {
            None => HousingSubsidy::ineligible(region, IneligibilityReason::RegionNotConfigured),
            Some(HousingSubsidyScheme::Vienna(s)) => calculate_vienna_subsidy(region, s, params),
            Some(HousingSubsidyScheme::Styria(s)) => calculate_styria_subsidy(region, s, params),
            Some(HousingSubsidyScheme::Generic(s)) => calculate_generic_subsidy(region, s, params),
        }
    };

    let reasoning = match subsidy.reason {
        None => format!(
            "{}: {} per month",
            region.housing_office(),
            subsidy.monthly_amount.normalize()
        ),
        Some(reason) => format!("{}: not payable, {}", region.housing_office(), reason),
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "housing_subsidy".to_string(),
        rule_name: "Housing Subsidy".to_string(),
        legal_ref: legal_ref(subsidy.formula).to_string(),
        input: serde_json::json!({
            "region": region,
            "household_size": params.household_size,
            "monthly_net_income": params.monthly_net_income.normalize().to_string(),
            "housing_cost": params.housing_cost.normalize().to_string(),
            "dwelling_size": params.dwelling_size.normalize().to_string(),
        }),
        output: serde_json::json!({
            "eligible": subsidy.eligible,
            "formula": subsidy.formula,
            "income_limit": subsidy.income_limit.map(|l| l.normalize().to_string()),
            "monthly_amount": subsidy.monthly_amount.normalize().to_string(),
            "reason": subsidy.reason,
        }),
        reasoning,
    };

    HousingSubsidyResult {
        subsidy,
        audit_step,
    }
}
