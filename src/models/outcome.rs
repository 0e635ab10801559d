//! Calculation outcome models.
//!
//! This module contains the per-benefit results and the aggregated
//! [`HouseholdOutcome`]. All of them are derived values, recomputed on every
//! call and never mutated afterwards.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{AuditTrace, Region};

/// Why a benefit was not granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibilityReason {
    /// The benefit requires at least one child.
    NoChildren,
    /// The marital status does not qualify for the credit.
    MaritalStatusNotEligible,
    /// The partner earns more than the credit allows.
    PartnerIncomeAboveLimit,
    /// No housing cost was stated.
    NoHousingCost,
    /// Household income exceeds the regional limit.
    IncomeAboveLimit,
    /// The reasonable own contribution covers the assessable housing cost.
    NoAssessableCost,
    /// The computed amount is below the payable minimum.
    BelowMinimumBenefit,
    /// No housing subsidy scheme is configured for the region.
    RegionNotConfigured,
    /// Countable income covers the minimum-income entitlement.
    IncomeCoversEntitlement,
}

impl fmt::Display for IneligibilityReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            IneligibilityReason::NoChildren => "no children in household",
            IneligibilityReason::MaritalStatusNotEligible => "marital status not eligible",
            IneligibilityReason::PartnerIncomeAboveLimit => "partner income above limit",
            IneligibilityReason::NoHousingCost => "no housing cost stated",
            IneligibilityReason::IncomeAboveLimit => "income above limit",
            IneligibilityReason::NoAssessableCost => "own contribution covers housing cost",
            IneligibilityReason::BelowMinimumBenefit => "amount below minimum benefit",
            IneligibilityReason::RegionNotConfigured => "region not configured",
            IneligibilityReason::IncomeCoversEntitlement => "income covers entitlement",
        };
        f.write_str(text)
    }
}

/// Monthly social-security contributions (employee share).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityContributions {
    /// Health insurance (Krankenversicherung).
    pub health: Decimal,
    /// Pension insurance (Pensionsversicherung).
    pub pension: Decimal,
    /// Unemployment insurance (Arbeitslosenversicherung).
    pub unemployment: Decimal,
    /// Housing levy and chamber of labour levy.
    pub other: Decimal,
    /// Sum of all contributions.
    pub total: Decimal,
}

/// Gross-to-net breakdown for one earner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetIncomeBreakdown {
    /// Monthly gross salary.
    pub gross: Decimal,
    /// Annual gross across 14 payments.
    pub annual_gross: Decimal,
    /// Monthly contributions, identical for all 14 payments.
    pub social_security: SocialSecurityContributions,
    /// Progressive tax on the 12 regular payments.
    pub regular_tax: Decimal,
    /// Flat tax on the 13th and 14th payments.
    pub special_payment_tax: Decimal,
    /// Annual tax after credits, spread over 12 months.
    pub monthly_tax: Decimal,
    /// Annual tax after credits.
    pub annual_tax: Decimal,
    /// Additional credits supplied by the caller.
    pub tax_credits: Decimal,
    /// Monthly net income.
    pub net: Decimal,
    /// Annual tax as a percentage of annual gross.
    pub effective_tax_rate: Decimal,
    /// Annual tax plus contributions as a percentage of annual gross.
    pub effective_total_rate: Decimal,
}

/// Family allowance for one child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildAllowance {
    /// Age of the child.
    pub age: u32,
    /// Age-banded Familienbeihilfe.
    pub base_amount: Decimal,
    /// Kinderabsetzbetrag paid with the allowance.
    pub tax_offset: Decimal,
}

/// Familienbeihilfe, Kinderabsetzbetrag and sibling bonus.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyAllowance {
    /// True when at least one child qualifies.
    pub eligible: bool,
    /// Total monthly amount.
    pub monthly_amount: Decimal,
    /// Set when not eligible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibilityReason>,
    /// Number of children considered.
    pub num_children: u32,
    /// Sum of age-banded amounts.
    pub base_amount: Decimal,
    /// Sum of per-child tax offsets.
    pub tax_offset: Decimal,
    /// Sibling bonus for the whole household.
    pub sibling_bonus: Decimal,
    /// Per-child detail.
    pub per_child: Vec<ChildAllowance>,
}

/// Familienbonus Plus and Kindermehrbetrag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyBonus {
    /// True when the household has children.
    pub eligible: bool,
    /// Monthly share of the Kindermehrbetrag (paid out in cash).
    pub monthly_amount: Decimal,
    /// Set when not eligible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibilityReason>,
    /// Annual bonus ceiling across all children.
    pub max_bonus: Decimal,
    /// Annual bonus absorbed by tax liability.
    pub used_bonus: Decimal,
    /// Annual tax left after the bonus.
    pub remaining_tax: Decimal,
    /// Annual Kindermehrbetrag.
    pub kindermehrbetrag: Decimal,
}

/// Which of the two credits was granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreditKind {
    /// Alleinverdienerabsetzbetrag.
    SingleEarner,
    /// Alleinerzieherabsetzbetrag.
    SingleParent,
}

/// Alleinverdiener- or Alleinerzieherabsetzbetrag.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleEarnerCredit {
    /// True when a credit was granted.
    pub eligible: bool,
    /// Annual credit spread over 12 months.
    pub monthly_amount: Decimal,
    /// Set when not eligible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibilityReason>,
    /// Which credit applies.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<CreditKind>,
    /// Annual credit.
    pub annual_credit: Decimal,
}

/// The regional formula a housing subsidy was computed with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HousingFormula {
    /// Wiener Wohnbeihilfe.
    Vienna,
    /// Steirische Wohnunterstützung.
    Styria,
    /// Income-limit and rate-cap schedule shared by the remaining states.
    Generic,
}

/// Regional housing subsidy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HousingSubsidy {
    /// True when an amount is payable.
    pub eligible: bool,
    /// Monthly amount, rounded to cents.
    pub monthly_amount: Decimal,
    /// Set when not eligible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibilityReason>,
    /// Region the household lives in.
    pub region: Region,
    /// Formula applied, absent when none was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub formula: Option<HousingFormula>,
    /// Income limit for the household size.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub income_limit: Option<Decimal>,
    /// Dwelling size considered appropriate for the household.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub appropriate_size: Option<Decimal>,
    /// Housing cost the subsidy is assessed on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assessable_housing_cost: Option<Decimal>,
    /// Own contribution expected from household income.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reasonable_housing_cost: Option<Decimal>,
    /// Highest rent the subsidy considers (Styria).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_subsidy: Option<Decimal>,
    /// Income per weighted household member (Styria).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weighted_income: Option<Decimal>,
    /// Highest payable amount (generic formula).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_benefit: Option<Decimal>,
}

impl HousingSubsidy {
    /// An ineligible result carrying only the reason.
    pub fn ineligible(region: Region, reason: IneligibilityReason) -> Self {
        Self {
            eligible: false,
            monthly_amount: Decimal::ZERO,
            reason: Some(reason),
            region,
            formula: None,
            income_limit: None,
            appropriate_size: None,
            assessable_housing_cost: None,
            reasonable_housing_cost: None,
            max_subsidy: None,
            weighted_income: None,
            max_benefit: None,
        }
    }
}

/// Sozialhilfe / Mindestsicherung.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinimumIncomeSupport {
    /// True when a top-up is payable.
    pub eligible: bool,
    /// Monthly top-up, rounded to cents.
    pub monthly_amount: Decimal,
    /// Set when not eligible.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<IneligibilityReason>,
    /// Entitlement for the household composition.
    pub max_entitlement: Decimal,
    /// Entitlement including the housing supplement (informational).
    pub with_housing: Decimal,
    /// Income disregarded for workforce re-entrants.
    pub income_disregard: Decimal,
    /// Income counted against the entitlement.
    pub countable_income: Decimal,
}

/// Childcare cost for one child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildcareLine {
    /// Position of the child in the situation.
    pub child_index: usize,
    /// Age of the child.
    pub age: u32,
    /// Full-day or half-day care.
    pub full_day: bool,
    /// Care fee.
    pub care_cost: Decimal,
    /// Meal fee.
    pub meal_cost: Decimal,
    /// Care plus meals.
    pub total: Decimal,
}

/// Monthly childcare costs deducted from household income.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildcareCosts {
    /// Total monthly cost, rounded to cents.
    pub monthly_amount: Decimal,
    /// Per-child detail.
    pub breakdown: Vec<ChildcareLine>,
    /// Name of the cost table used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub table_name: Option<String>,
}

/// The consolidated financial picture of a household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseholdOutcome {
    /// Adults plus children.
    pub household_size: u32,
    /// Primary earner's breakdown.
    pub primary: NetIncomeBreakdown,
    /// Partner's breakdown, present when partner income is considered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner: Option<NetIncomeBreakdown>,
    /// Monthly net income of all earners.
    pub combined_net_income: Decimal,
    /// Annual tax of all earners.
    pub combined_annual_tax: Decimal,
    /// Familienbeihilfe.
    pub family_allowance: FamilyAllowance,
    /// Alleinverdiener- / Alleinerzieherabsetzbetrag.
    pub single_earner_credit: SingleEarnerCredit,
    /// Familienbonus Plus.
    pub family_bonus: FamilyBonus,
    /// Wohnbeihilfe.
    pub housing_subsidy: HousingSubsidy,
    /// Sozialhilfe.
    pub minimum_income_support: MinimumIncomeSupport,
    /// Childcare costs.
    pub childcare_costs: ChildcareCosts,
    /// Annual credits against tax (single earner credit plus used bonus).
    pub total_tax_credits: Decimal,
    /// Monthly benefits paid to the household.
    pub total_monthly_benefits: Decimal,
    /// Net income plus benefits minus childcare costs.
    pub total_household_income: Decimal,
    /// Every rule applied, in order.
    pub audit_trace: AuditTrace,
}
