//! Advice derived from a household outcome.
//!
//! Recommendations are typed values; wording and presentation are left to
//! the consumer.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::config::HouseholdConfig;
use crate::models::{HouseholdOutcome, HouseholdSituation, Region};

use super::income_curve::SweepRange;
use super::trap_zones::find_trap_zones;
use super::working_point::find_cheaper_working_point;

/// How close (in gross euros) a salary must be to a trap zone to be warned.
const TRAP_ZONE_MARGIN: Decimal = dec!(200);
/// A cheaper working point must lie at least this far below the salary.
const MIN_WORKING_POINT_DISTANCE: Decimal = dec!(200);
/// A cheaper working point is only reported when it costs less than this.
const MAX_WORKING_POINT_LOSS: Decimal = dec!(100);

/// How a recommendation should be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// Something works against the household.
    Warning,
    /// Neutral information.
    Info,
    /// Something works in the household's favour.
    Positive,
}

/// A piece of advice about the household's situation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Recommendation {
    /// The salary is within 200 euros of a trap zone.
    NearTrapZone {
        /// Lower gross of the zone.
        from_gross: Decimal,
        /// Higher gross of the zone.
        to_gross: Decimal,
        /// Income lost across the zone.
        difference: Decimal,
    },
    /// A housing subsidy is payable.
    HousingSubsidyAvailable {
        /// Federal state.
        region: Region,
        /// Monthly amount.
        monthly_amount: Decimal,
        /// Office to apply at.
        office: String,
    },
    /// Net income exceeds the housing subsidy limit.
    HousingIncomeAboveLimit {
        /// Federal state.
        region: Region,
        /// Combined monthly net income.
        net_income: Decimal,
        /// Income limit for the household size.
        income_limit: Decimal,
        /// Amount by which income exceeds the limit.
        difference: Decimal,
        /// Household size the limit applies to.
        household_size: u32,
    },
    /// Less than half the family bonus is absorbed by tax.
    FamilyBonusUnderused {
        /// Annual bonus absorbed.
        used_bonus: Decimal,
        /// Annual bonus ceiling.
        max_bonus: Decimal,
        /// Share used, in whole percent.
        used_percent: Decimal,
    },
    /// The full family bonus is absorbed by tax.
    FamilyBonusFullyUsed {
        /// Annual bonus ceiling.
        max_bonus: Decimal,
    },
    /// The married household receives the single earner credit.
    SingleEarnerCreditGranted {
        /// Annual credit.
        annual_credit: Decimal,
    },
    /// The married household would receive the credit with a lower partner income.
    SingleEarnerCreditMissed {
        /// Highest qualifying annual partner income.
        partner_income_limit: Decimal,
    },
    /// Effective tax and contribution burden of the primary earner.
    EffectiveRate {
        /// Tax plus contributions as a percentage of gross.
        total_rate: Decimal,
        /// Tax alone as a percentage of gross.
        tax_rate: Decimal,
    },
    /// Working less would cost the household little.
    WorkingLessCostsLittle {
        /// The lower monthly gross.
        gross: Decimal,
        /// Household income lost.
        difference: Decimal,
        /// Income lost per euro of gross, in cents.
        cents_per_euro: Decimal,
    },
}

impl Recommendation {
    /// Returns how the recommendation should be read.
    pub fn severity(&self) -> Severity {
        match self {
            Recommendation::NearTrapZone { .. } | Recommendation::WorkingLessCostsLittle { .. } => {
                Severity::Warning
            }
            Recommendation::HousingSubsidyAvailable { .. }
            | Recommendation::FamilyBonusFullyUsed { .. }
            | Recommendation::SingleEarnerCreditGranted { .. } => Severity::Positive,
            Recommendation::HousingIncomeAboveLimit { .. }
            | Recommendation::FamilyBonusUnderused { .. }
            | Recommendation::SingleEarnerCreditMissed { .. }
            | Recommendation::EffectiveRate { .. } => Severity::Info,
        }
    }
}

/// Derives recommendations for a household from its calculated outcome.
///
/// Runs a trap zone sweep over the default range and tries lower salaries,
/// so this costs considerably more than the point calculation.
pub fn advise(
    config: &HouseholdConfig,
    situation: &HouseholdSituation,
    outcome: &HouseholdOutcome,
) -> Vec<Recommendation> {
    let mut recommendations = Vec::new();
    let current_gross = situation.monthly_gross_income;

    for zone in find_trap_zones(config, situation, &SweepRange::default()) {
        if current_gross >= zone.from_gross - TRAP_ZONE_MARGIN
            && current_gross <= zone.to_gross + TRAP_ZONE_MARGIN
        {
            recommendations.push(Recommendation::NearTrapZone {
                from_gross: zone.from_gross,
                to_gross: zone.to_gross,
                difference: zone.difference,
            });
        }
    }

    let housing = &outcome.housing_subsidy;
    if housing.eligible {
        recommendations.push(Recommendation::HousingSubsidyAvailable {
            region: situation.region,
            monthly_amount: housing.monthly_amount,
            office: situation.region.housing_office().to_string(),
        });
    } else if situation.housing_cost > Decimal::ZERO {
        if let Some(limit) = housing.income_limit {
            if outcome.combined_net_income > limit {
                recommendations.push(Recommendation::HousingIncomeAboveLimit {
                    region: situation.region,
                    net_income: outcome.combined_net_income,
                    income_limit: limit,
                    difference: outcome.combined_net_income - limit,
                    household_size: outcome.household_size,
                });
            }
        }
    }

    let bonus = &outcome.family_bonus;
    if bonus.max_bonus > Decimal::ZERO {
        if bonus.used_bonus < bonus.max_bonus * dec!(0.5) {
            recommendations.push(Recommendation::FamilyBonusUnderused {
                used_bonus: bonus.used_bonus,
                max_bonus: bonus.max_bonus,
                used_percent: (bonus.used_bonus / bonus.max_bonus * Decimal::ONE_HUNDRED).round(),
            });
        } else if bonus.used_bonus >= bonus.max_bonus {
            recommendations.push(Recommendation::FamilyBonusFullyUsed {
                max_bonus: bonus.max_bonus,
            });
        }
    }

    if situation.is_married() && situation.num_children() > 0 {
        let credit = &outcome.single_earner_credit;
        recommendations.push(if credit.eligible {
            Recommendation::SingleEarnerCreditGranted {
                annual_credit: credit.annual_credit,
            }
        } else {
            Recommendation::SingleEarnerCreditMissed {
                partner_income_limit: config.benefits().single_earner_credit.partner_income_limit,
            }
        });
    }

    if outcome.primary.effective_total_rate > Decimal::ZERO {
        recommendations.push(Recommendation::EffectiveRate {
            total_rate: outcome.primary.effective_total_rate.round_dp(1),
            tax_rate: outcome.primary.effective_tax_rate.round_dp(1),
        });
    }

    if let Some(point) = find_cheaper_working_point(config, situation, outcome) {
        let distance = current_gross - point.gross;
        if distance > MIN_WORKING_POINT_DISTANCE && point.difference < MAX_WORKING_POINT_LOSS {
            recommendations.push(Recommendation::WorkingLessCostsLittle {
                gross: point.gross,
                difference: point.difference,
                cents_per_euro: (point.difference / distance * Decimal::ONE_HUNDRED).round(),
            });
        }
    }

    recommendations
}
