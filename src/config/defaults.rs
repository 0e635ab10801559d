//! Built-in tables for tax year 2025.
//!
//! [`HouseholdConfig::austria_2025`] is the fallback used when the YAML
//! configuration cannot be loaded. It has exactly the shape of the loaded
//! schema and matches the files shipped under `config/at2025`.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::Region;

use super::types::{
    BenefitsConfig, ChildcareConfig, ChildcareCostTable, FamilyAllowanceRates, FamilyBonusConfig,
    GenericAppropriateSize, GenericScheme, GraduatedRate, HouseholdConfig, HousingSubsidyScheme,
    MinimumIncomeConfig, SingleEarnerCreditConfig, SocialSecurityRates, SpecialPaymentConfig,
    StyriaScheme, TaxBracket, TaxConfig, TaxYearMetadata, ViennaAppropriateSize, ViennaScheme,
    WeightingFactors,
};

fn table(entries: &[(u32, Decimal)]) -> BTreeMap<u32, Decimal> {
    entries.iter().copied().collect()
}

fn bracket(min: Decimal, max: Option<Decimal>, rate: Decimal) -> TaxBracket {
    TaxBracket { min, max, rate }
}

fn tier(upper_bound: Option<Decimal>, rate: Decimal) -> GraduatedRate {
    GraduatedRate { upper_bound, rate }
}

fn childcare(name: &str, full_day: Decimal, half_day: Decimal, meals: Decimal) -> ChildcareCostTable {
    ChildcareCostTable {
        name: name.to_string(),
        full_day,
        half_day,
        meals,
    }
}

struct GenericTerms {
    limits: [Decimal; 5],
    child_bonus: Option<Decimal>,
    rate: Decimal,
    percent: Decimal,
    no_contribution_below: Option<Decimal>,
    max_benefit: Decimal,
    min_benefit: Option<Decimal>,
}

fn generic(terms: GenericTerms) -> HousingSubsidyScheme {
    let limits = terms
        .limits
        .iter()
        .enumerate()
        .map(|(i, limit)| (i as u32 + 1, *limit))
        .collect();

    HousingSubsidyScheme::Generic(GenericScheme {
        income_limits: limits,
        child_bonus: terms.child_bonus,
        appropriate_size: Some(GenericAppropriateSize::default()),
        max_rate_per_sqm: terms.rate,
        min_housing_cost_percent: terms.percent,
        no_contribution_below: terms.no_contribution_below,
        max_benefit: Some(terms.max_benefit),
        min_benefit: terms.min_benefit,
    })
}

fn tax_2025() -> TaxConfig {
    TaxConfig {
        brackets: vec![
            bracket(dec!(0), Some(dec!(13308)), dec!(0)),
            bracket(dec!(13308), Some(dec!(21617)), dec!(0.20)),
            bracket(dec!(21617), Some(dec!(35836)), dec!(0.30)),
            bracket(dec!(35836), Some(dec!(69166)), dec!(0.40)),
            bracket(dec!(69166), Some(dec!(103072)), dec!(0.48)),
            bracket(dec!(103072), Some(dec!(1000000)), dec!(0.50)),
            bracket(dec!(1000000), None, dec!(0.55)),
        ],
        social_security: SocialSecurityRates {
            health: dec!(0.0387),
            pension: dec!(0.1025),
            unemployment: dec!(0.0295),
            other: dec!(0.01),
            ceiling_base: dec!(6450),
        },
        unemployment_tiers: vec![
            tier(Some(dec!(2074)), dec!(0)),
            tier(Some(dec!(2262)), dec!(0.01)),
            tier(Some(dec!(2451)), dec!(0.02)),
            tier(None, dec!(0.0295)),
        ],
        marginal_earnings_threshold: dec!(551.10),
        special_payments: SpecialPaymentConfig {
            flat_rate: dec!(0.06),
            allowance: dec!(620),
        },
        commuter_credit: dec!(487),
    }
}

fn benefits_2025() -> BenefitsConfig {
    BenefitsConfig {
        family_allowance: FamilyAllowanceRates {
            age_0_to_2: dec!(138.40),
            age_3_to_9: dec!(148.00),
            age_10_to_18: dec!(171.80),
            age_19_plus: dec!(200.40),
            tax_offset_per_child: dec!(70.90),
            sibling_bonus: table(&[
                (2, dec!(8.60)),
                (3, dec!(21.10)),
                (4, dec!(32.10)),
                (5, dec!(38.90)),
                (6, dec!(43.40)),
                (7, dec!(63.10)),
            ]),
        },
        family_bonus: FamilyBonusConfig {
            under_18: dec!(2000),
            over_18: dec!(700),
            kindermehrbetrag_per_child: dec!(700),
        },
        single_earner_credit: SingleEarnerCreditConfig {
            one_child: dec!(601),
            two_children: dec!(813),
            additional_child: dec!(268),
            partner_income_limit: dec!(7284),
        },
        minimum_income: MinimumIncomeConfig {
            single: dec!(1209),
            couple: dec!(1693),
            child_supplement: dec!(326.43),
            housing_supplement_rate: dec!(0.30),
            reentry_disregard_rate: dec!(0.35),
        },
    }
}

fn childcare_2025() -> ChildcareConfig {
    let regions = HashMap::from([
        (Region::Vienna, childcare("Wien", dec!(0), dec!(0), dec!(77.40))),
        (Region::Styria, childcare("Steiermark", dec!(180), dec!(110), dec!(70))),
        (Region::UpperAustria, childcare("Oberösterreich", dec!(110), dec!(0), dec!(65))),
        (Region::LowerAustria, childcare("Niederösterreich", dec!(120), dec!(0), dec!(68))),
        (Region::Salzburg, childcare("Salzburg", dec!(200), dec!(120), dec!(75))),
        (Region::Tyrol, childcare("Tirol", dec!(150), dec!(80), dec!(70))),
        (Region::Vorarlberg, childcare("Vorarlberg", dec!(190), dec!(100), dec!(80))),
        (Region::Carinthia, childcare("Kärnten", dec!(0), dec!(0), dec!(60))),
        (Region::Burgenland, childcare("Burgenland", dec!(0), dec!(0), dec!(55))),
    ]);
    ChildcareConfig { regions }
}

fn housing_2025() -> HashMap<Region, HousingSubsidyScheme> {
    let vienna = HousingSubsidyScheme::Vienna(ViennaScheme {
        income_limits: table(&[
            (1, dec!(1500)),
            (2, dec!(2250)),
            (3, dec!(2650)),
            (4, dec!(3050)),
            (5, dec!(3450)),
        ]),
        appropriate_size: ViennaAppropriateSize {
            single: dec!(50),
            couple: dec!(70),
            base: dec!(70),
            per_additional: dec!(15),
        },
        max_rate_per_sqm: dec!(5.10),
        min_housing_cost_percent: dec!(0.25),
    });

    let styria = HousingSubsidyScheme::Styria(StyriaScheme {
        weighting_factors: WeightingFactors {
            household: dec!(0.5),
            adult: dec!(0.5),
            minor: dec!(0.3),
        },
        income_limits: table(&[
            (1, dec!(1400)),
            (2, dec!(2000)),
            (3, dec!(2300)),
            (4, dec!(2600)),
            (5, dec!(2900)),
            (6, dec!(3200)),
            (7, dec!(3500)),
        ]),
        max_rent_subsidy: table(&[
            (1, dec!(330)),
            (2, dec!(400)),
            (3, dec!(460)),
            (4, dec!(520)),
            (5, dec!(580)),
        ]),
        min_housing_cost_percent: dec!(0.15),
    });

    HashMap::from([
        (Region::Vienna, vienna),
        (Region::Styria, styria),
        (
            Region::UpperAustria,
            generic(GenericTerms {
                limits: [dec!(1480), dec!(2070), dec!(2370), dec!(2670), dec!(2970)],
                child_bonus: None,
                rate: dec!(3.70),
                percent: dec!(0.20),
                no_contribution_below: None,
                max_benefit: dec!(300),
                min_benefit: None,
            }),
        ),
        (
            Region::LowerAustria,
            generic(GenericTerms {
                limits: [dec!(1500), dec!(2100), dec!(2400), dec!(2700), dec!(3000)],
                child_bonus: Some(dec!(150)),
                rate: dec!(4.00),
                percent: dec!(0.20),
                no_contribution_below: None,
                max_benefit: dec!(350),
                min_benefit: None,
            }),
        ),
        (
            Region::Salzburg,
            generic(GenericTerms {
                limits: [dec!(1600), dec!(2200), dec!(2500), dec!(2800), dec!(3100)],
                child_bonus: None,
                rate: dec!(5.00),
                percent: dec!(0.25),
                no_contribution_below: Some(dec!(1000)),
                max_benefit: dec!(400),
                min_benefit: None,
            }),
        ),
        (
            Region::Tyrol,
            generic(GenericTerms {
                limits: [dec!(1550), dec!(2300), dec!(2600), dec!(2900), dec!(3200)],
                child_bonus: Some(dec!(100)),
                rate: dec!(4.50),
                percent: dec!(0.22),
                no_contribution_below: None,
                max_benefit: dec!(380),
                min_benefit: None,
            }),
        ),
        (
            Region::Vorarlberg,
            generic(GenericTerms {
                limits: [dec!(1650), dec!(2400), dec!(2700), dec!(3000), dec!(3300)],
                child_bonus: None,
                rate: dec!(5.20),
                percent: dec!(0.25),
                no_contribution_below: None,
                max_benefit: dec!(420),
                min_benefit: Some(dec!(20)),
            }),
        ),
        (
            Region::Carinthia,
            generic(GenericTerms {
                limits: [dec!(1400), dec!(1950), dec!(2250), dec!(2550), dec!(2850)],
                child_bonus: None,
                rate: dec!(3.50),
                percent: dec!(0.20),
                no_contribution_below: Some(dec!(900)),
                max_benefit: dec!(280),
                min_benefit: None,
            }),
        ),
        (
            Region::Burgenland,
            generic(GenericTerms {
                limits: [dec!(1350), dec!(1900), dec!(2200), dec!(2500), dec!(2800)],
                child_bonus: None,
                rate: dec!(3.20),
                percent: dec!(0.20),
                no_contribution_below: None,
                max_benefit: dec!(250),
                min_benefit: None,
            }),
        ),
    ])
}

impl HouseholdConfig {
    /// The built-in tables for tax year 2025.
    ///
    /// ```
    /// use household_income::config::HouseholdConfig;
    /// use household_income::models::Region;
    ///
    /// let config = HouseholdConfig::austria_2025();
    /// assert_eq!(config.metadata().year, 2025);
    /// assert!(config.housing_scheme(Region::Vienna).is_some());
    /// ```
    pub fn austria_2025() -> Self {
        Self {
            metadata: TaxYearMetadata {
                year: 2025,
                effective_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or_default(),
                name: "Österreich 2025 (built-in)".to_string(),
                source_url: "https://www.bmf.gv.at/themen/steuern/arbeitnehmerinnenveranlagung/steuertarif-steuerabsetzbetraege.html".to_string(),
            },
            tax: tax_2025(),
            benefits: benefits_2025(),
            childcare: childcare_2025(),
            housing: housing_2025(),
        }
    }
}

impl Default for HouseholdConfig {
    fn default() -> Self {
        Self::austria_2025()
    }
}
