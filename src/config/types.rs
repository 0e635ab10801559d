//! Configuration types for the household income engine.
//!
//! This module contains the strongly-typed tables that are deserialized from
//! YAML configuration files (or built in code by
//! [`HouseholdConfig::austria_2025`]).

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{HousingFormula, Region};

/// Metadata about the tax year the tables belong to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxYearMetadata {
    /// The calendar year (e.g. 2025).
    pub year: i32,
    /// The date from which the tables apply.
    pub effective_date: NaiveDate,
    /// Human-readable name of the table set.
    pub name: String,
    /// URL to the official tariff documentation.
    pub source_url: String,
}

/// One bracket of the progressive income tax tariff.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxBracket {
    /// Lower bound of annual taxable income.
    pub min: Decimal,
    /// Upper bound, `None` for the top bracket.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Marginal rate as a fraction.
    pub rate: Decimal,
}

/// Employee social-security rates applied to the capped contribution base.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SocialSecurityRates {
    /// Health insurance rate.
    pub health: Decimal,
    /// Pension insurance rate.
    pub pension: Decimal,
    /// Standard unemployment insurance rate.
    pub unemployment: Decimal,
    /// Housing levy plus chamber of labour levy.
    pub other: Decimal,
    /// Monthly contribution ceiling (Höchstbeitragsgrundlage).
    pub ceiling_base: Decimal,
}

/// One step of the graduated unemployment insurance rate for low earners.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraduatedRate {
    /// Highest monthly gross this rate applies to, `None` for the last tier.
    #[serde(default)]
    pub upper_bound: Option<Decimal>,
    /// Rate as a fraction.
    pub rate: Decimal,
}

/// Preferential treatment of the 13th and 14th salary.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpecialPaymentConfig {
    /// Flat tax rate on special payments.
    pub flat_rate: Decimal,
    /// Annual tax-free allowance deducted before the flat rate.
    pub allowance: Decimal,
}

/// Income tax and social-security tables (tax.yaml).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaxConfig {
    /// Progressive tariff, ascending and contiguous.
    pub brackets: Vec<TaxBracket>,
    /// Social-security rates.
    pub social_security: SocialSecurityRates,
    /// Graduated unemployment insurance tiers, ascending.
    pub unemployment_tiers: Vec<GraduatedRate>,
    /// Monthly gross below which no contributions are due.
    pub marginal_earnings_threshold: Decimal,
    /// 13th/14th salary treatment.
    pub special_payments: SpecialPaymentConfig,
    /// Verkehrsabsetzbetrag granted to every employee.
    pub commuter_credit: Decimal,
}

/// Familienbeihilfe amounts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FamilyAllowanceRates {
    /// Monthly amount for children aged 0 to 2.
    pub age_0_to_2: Decimal,
    /// Monthly amount for children aged 3 to 9.
    pub age_3_to_9: Decimal,
    /// Monthly amount for children aged 10 to 18.
    pub age_10_to_18: Decimal,
    /// Monthly amount from age 19.
    pub age_19_plus: Decimal,
    /// Kinderabsetzbetrag paid per child with the allowance.
    pub tax_offset_per_child: Decimal,
    /// Per-child sibling bonus keyed by number of children (2 to 7).
    pub sibling_bonus: BTreeMap<u32, Decimal>,
}

/// Familienbonus Plus ceilings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FamilyBonusConfig {
    /// Annual bonus per child under 18.
    pub under_18: Decimal,
    /// Annual bonus per child aged 18 or over.
    pub over_18: Decimal,
    /// Annual Kindermehrbetrag cap per child.
    pub kindermehrbetrag_per_child: Decimal,
}

/// Alleinverdiener-/Alleinerzieherabsetzbetrag schedule.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SingleEarnerCreditConfig {
    /// Annual credit with one child.
    pub one_child: Decimal,
    /// Annual credit with two children.
    pub two_children: Decimal,
    /// Increment per child beyond the second.
    pub additional_child: Decimal,
    /// Highest annual partner income for the single earner credit.
    pub partner_income_limit: Decimal,
}

/// Sozialhilfe base amounts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MinimumIncomeConfig {
    /// Monthly entitlement for a single adult.
    pub single: Decimal,
    /// Monthly entitlement for two adults.
    pub couple: Decimal,
    /// Monthly supplement per child.
    pub child_supplement: Decimal,
    /// Housing supplement as a fraction of the entitlement.
    pub housing_supplement_rate: Decimal,
    /// Share of net income disregarded for workforce re-entrants.
    pub reentry_disregard_rate: Decimal,
}

/// Federal benefit tables (benefits.yaml).
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BenefitsConfig {
    /// Familienbeihilfe.
    pub family_allowance: FamilyAllowanceRates,
    /// Familienbonus Plus.
    pub family_bonus: FamilyBonusConfig,
    /// Single earner / single parent credit.
    pub single_earner_credit: SingleEarnerCreditConfig,
    /// Sozialhilfe.
    pub minimum_income: MinimumIncomeConfig,
}

/// Monthly childcare fees of one federal state.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ChildcareCostTable {
    /// Display name of the table.
    pub name: String,
    /// Full-day care fee.
    pub full_day: Decimal,
    /// Half-day care fee.
    pub half_day: Decimal,
    /// Meal fee.
    pub meals: Decimal,
}

/// Childcare fees by region (childcare.yaml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ChildcareConfig {
    /// Cost table per federal state.
    pub regions: HashMap<Region, ChildcareCostTable>,
}

/// Appropriate dwelling size for the Vienna formula.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViennaAppropriateSize {
    /// Square metres for one person.
    pub single: Decimal,
    /// Square metres for two persons.
    pub couple: Decimal,
    /// Base for three or more persons.
    pub base: Decimal,
    /// Square metres per person beyond two.
    pub per_additional: Decimal,
}

/// Wiener Wohnbeihilfe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ViennaScheme {
    /// Monthly net income limit by household size (1 to 5).
    pub income_limits: BTreeMap<u32, Decimal>,
    /// Appropriate dwelling size.
    pub appropriate_size: ViennaAppropriateSize,
    /// Highest assessable housing cost per square metre.
    pub max_rate_per_sqm: Decimal,
    /// Reasonable own contribution as a fraction of income.
    pub min_housing_cost_percent: Decimal,
}

/// Household weighting for the Styria formula.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WeightingFactors {
    /// Constant per household.
    pub household: Decimal,
    /// Weight per adult.
    pub adult: Decimal,
    /// Weight per minor.
    pub minor: Decimal,
}

/// Steirische Wohnunterstützung.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StyriaScheme {
    /// Household weighting factors.
    pub weighting_factors: WeightingFactors,
    /// Monthly net income limit by household size (1 to 7).
    pub income_limits: BTreeMap<u32, Decimal>,
    /// Highest considered rent by household size (1 to 5).
    pub max_rent_subsidy: BTreeMap<u32, Decimal>,
    /// Reasonable own contribution as a fraction of income.
    pub min_housing_cost_percent: Decimal,
}

fn default_first_person_size() -> Decimal {
    Decimal::from(50)
}

fn default_per_additional_size() -> Decimal {
    Decimal::from(10)
}

/// Appropriate dwelling size for the generic formula.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenericAppropriateSize {
    /// Square metres for the first person.
    #[serde(default = "default_first_person_size")]
    pub first: Decimal,
    /// Square metres per further person.
    #[serde(default = "default_per_additional_size")]
    pub per_additional: Decimal,
}

impl Default for GenericAppropriateSize {
    fn default() -> Self {
        Self {
            first: default_first_person_size(),
            per_additional: default_per_additional_size(),
        }
    }
}

/// Housing subsidy schedule shared by the remaining federal states.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenericScheme {
    /// Monthly net income limit by household size (1 to 5).
    pub income_limits: BTreeMap<u32, Decimal>,
    /// Limit increase per child.
    #[serde(default)]
    pub child_bonus: Option<Decimal>,
    /// Appropriate dwelling size, 50 m² plus 10 m² per person when absent.
    #[serde(default)]
    pub appropriate_size: Option<GenericAppropriateSize>,
    /// Highest assessable housing cost per square metre.
    pub max_rate_per_sqm: Decimal,
    /// Reasonable own contribution as a fraction of income.
    pub min_housing_cost_percent: Decimal,
    /// Income at or below which no own contribution is expected.
    #[serde(default)]
    pub no_contribution_below: Option<Decimal>,
    /// Highest payable amount.
    #[serde(default)]
    pub max_benefit: Option<Decimal>,
    /// Smallest payable amount, 10 when absent.
    #[serde(default)]
    pub min_benefit: Option<Decimal>,
}

/// The housing subsidy formula of one federal state.
///
/// The variant is chosen once when the configuration is loaded, so the
/// calculation never re-dispatches on region names.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "formula", rename_all = "snake_case")]
pub enum HousingSubsidyScheme {
    /// Region-A schedule (Vienna).
    Vienna(ViennaScheme),
    /// Region-B schedule (Styria).
    Styria(StyriaScheme),
    /// Generic schedule.
    Generic(GenericScheme),
}

impl HousingSubsidyScheme {
    /// The formula this scheme applies.
    pub fn formula(&self) -> HousingFormula {
        match self {
            HousingSubsidyScheme::Vienna(_) => HousingFormula::Vienna,
            HousingSubsidyScheme::Styria(_) => HousingFormula::Styria,
            HousingSubsidyScheme::Generic(_) => HousingFormula::Generic,
        }
    }

    fn income_limits(&self) -> &BTreeMap<u32, Decimal> {
        match self {
            HousingSubsidyScheme::Vienna(s) => &s.income_limits,
            HousingSubsidyScheme::Styria(s) => &s.income_limits,
            HousingSubsidyScheme::Generic(s) => &s.income_limits,
        }
    }
}

/// One file in the housing/ directory.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HousingSubsidyFile {
    /// The federal state the scheme applies to.
    pub region: Region,
    /// The scheme.
    pub scheme: HousingSubsidyScheme,
}

/// The complete configuration for one tax year.
///
/// This is an immutable value passed explicitly into every calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseholdConfig {
    pub(super) metadata: TaxYearMetadata,
    pub(super) tax: TaxConfig,
    pub(super) benefits: BenefitsConfig,
    pub(super) childcare: ChildcareConfig,
    pub(super) housing: HashMap<Region, HousingSubsidyScheme>,
}

impl HouseholdConfig {
    /// Creates a configuration from its parts and checks table invariants.
    pub fn new(
        metadata: TaxYearMetadata,
        tax: TaxConfig,
        benefits: BenefitsConfig,
        childcare: ChildcareConfig,
        housing: HashMap<Region, HousingSubsidyScheme>,
    ) -> EngineResult<Self> {
        let config = Self {
            metadata,
            tax,
            benefits,
            childcare,
            housing,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the tax year metadata.
    pub fn metadata(&self) -> &TaxYearMetadata {
        &self.metadata
    }

    /// Returns the tax and contribution tables.
    pub fn tax(&self) -> &TaxConfig {
        &self.tax
    }

    /// Returns the federal benefit tables.
    pub fn benefits(&self) -> &BenefitsConfig {
        &self.benefits
    }

    /// Returns the childcare cost tables.
    pub fn childcare(&self) -> &ChildcareConfig {
        &self.childcare
    }

    /// Returns all housing subsidy schemes.
    pub fn housing_schemes(&self) -> &HashMap<Region, HousingSubsidyScheme> {
        &self.housing
    }

    /// Returns the housing subsidy scheme for a region, if configured.
    pub fn housing_scheme(&self, region: Region) -> Option<&HousingSubsidyScheme> {
        self.housing.get(&region)
    }

    /// Returns the childcare cost table for a region, if configured.
    pub fn childcare_costs(&self, region: Region) -> Option<&ChildcareCostTable> {
        self.childcare.regions.get(&region)
    }

    /// Returns a copy with the tax tables replaced.
    pub fn with_tax(mut self, tax: TaxConfig) -> EngineResult<Self> {
        self.tax = tax;
        self.validate()?;
        Ok(self)
    }

    /// Returns a copy with the benefit tables replaced.
    pub fn with_benefits(mut self, benefits: BenefitsConfig) -> Self {
        self.benefits = benefits;
        self
    }

    /// Returns a copy with one region's housing scheme replaced or removed.
    pub fn with_housing_scheme(
        mut self,
        region: Region,
        scheme: Option<HousingSubsidyScheme>,
    ) -> EngineResult<Self> {
        match scheme {
            Some(scheme) => {
                self.housing.insert(region, scheme);
            }
            None => {
                self.housing.remove(&region);
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Checks the invariants the calculations rely on.
    ///
    /// Tax brackets must start at zero, be contiguous, and only the last one
    /// may be unbounded. Unemployment tiers must ascend and end unbounded.
    /// Every housing scheme needs at least one income limit.
    pub fn validate(&self) -> EngineResult<()> {
        validate_brackets(&self.tax.brackets)?;
        validate_tiers(&self.tax.unemployment_tiers)?;

        for (region, scheme) in &self.housing {
            if scheme.income_limits().is_empty() {
                return Err(EngineError::InvalidConfig {
                    message: format!("housing scheme for {} has no income limits", region),
                });
            }
        }

        Ok(())
    }
}

fn invalid(message: impl Into<String>) -> EngineError {
    EngineError::InvalidConfig {
        message: message.into(),
    }
}

fn validate_brackets(brackets: &[TaxBracket]) -> EngineResult<()> {
    let (first, last) = match (brackets.first(), brackets.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => return Err(invalid("no tax brackets configured")),
    };

    if first.min != Decimal::ZERO {
        return Err(invalid(format!(
            "first tax bracket starts at {} instead of 0",
            first.min
        )));
    }
    if last.max.is_some() {
        return Err(invalid("last tax bracket must be unbounded"));
    }

    for pair in brackets.windows(2) {
        match pair[0].max {
            Some(max) if max == pair[1].min && max > pair[0].min => {}
            Some(max) => {
                return Err(invalid(format!(
                    "tax bracket ending at {} is not followed by a bracket starting there",
                    max
                )));
            }
            None => return Err(invalid("only the last tax bracket may be unbounded")),
        }
    }

    Ok(())
}

fn validate_tiers(tiers: &[GraduatedRate]) -> EngineResult<()> {
    match tiers.last() {
        None => return Err(invalid("no unemployment tiers configured")),
        Some(last) if last.upper_bound.is_some() => {
            return Err(invalid("last unemployment tier must be unbounded"));
        }
        Some(_) => {}
    }

    let bounds: Vec<Decimal> = tiers[..tiers.len() - 1]
        .iter()
        .map(|t| t.upper_bound.ok_or_else(|| invalid("only the last unemployment tier may be unbounded")))
        .collect::<EngineResult<_>>()?;

    if bounds.windows(2).any(|w| w[0] >= w[1]) {
        return Err(invalid("unemployment tiers must ascend"));
    }

    Ok(())
}
