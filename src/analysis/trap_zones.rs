//! Trap zone detection.
//!
//! A trap zone is a step on the income curve where a higher gross salary
//! does not raise total household income, typically because a benefit is
//! withdrawn faster than net income grows.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::HouseholdConfig;
use crate::models::HouseholdSituation;

use super::income_curve::{IncomeCurvePoint, SweepRange, income_curve};

/// An interval where earning more does not pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrapZone {
    /// Lower gross salary.
    pub from_gross: Decimal,
    /// Higher gross salary.
    pub to_gross: Decimal,
    /// Household income at the lower gross.
    pub from_total: Decimal,
    /// Household income at the higher gross.
    pub to_total: Decimal,
    /// Income lost by moving up, never negative.
    pub difference: Decimal,
}

/// Finds trap zones between adjacent points of an income curve.
pub fn trap_zones_from_curve(curve: &[IncomeCurvePoint]) -> Vec<TrapZone> {
    curve
        .windows(2)
        .filter(|pair| pair[1].gross > pair[0].gross && pair[1].total <= pair[0].total)
        .map(|pair| TrapZone {
            from_gross: pair[0].gross,
            to_gross: pair[1].gross,
            from_total: pair[0].total,
            to_total: pair[1].total,
            difference: pair[0].total - pair[1].total,
        })
        .collect()
}

/// Sweeps `range` and returns every trap zone, in ascending gross order.
///
/// # Examples
///
/// ```
/// use household_income::analysis::{find_trap_zones, SweepRange};
/// use household_income::config::HouseholdConfig;
/// use household_income::models::{HouseholdSituation, Region};
/// use rust_decimal_macros::dec;
///
/// let config = HouseholdConfig::austria_2025();
/// let situation = HouseholdSituation::single(dec!(2000), Region::Vienna);
/// let range = SweepRange { min_gross: dec!(2000), max_gross: dec!(4000), step: dec!(100) };
///
/// assert!(find_trap_zones(&config, &situation, &range).is_empty());
/// ```
pub fn find_trap_zones(
    config: &HouseholdConfig,
    situation: &HouseholdSituation,
    range: &SweepRange,
) -> Vec<TrapZone> {
    trap_zones_from_curve(&income_curve(config, situation, range))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{GenericScheme, HousingSubsidyScheme, MinimumIncomeConfig};
    use crate::models::Region;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;

    fn without_minimum_income(config: HouseholdConfig) -> HouseholdConfig {
        let mut benefits = config.benefits().clone();
        benefits.minimum_income = MinimumIncomeConfig {
            single: Decimal::ZERO,
            couple: Decimal::ZERO,
            child_supplement: Decimal::ZERO,
            housing_supplement_rate: Decimal::ZERO,
            reentry_disregard_rate: Decimal::ZERO,
        };
        config.with_benefits(benefits)
    }

    fn cliff_config() -> HouseholdConfig {
        let scheme = HousingSubsidyScheme::Generic(GenericScheme {
            income_limits: BTreeMap::from([(1, dec!(1500))]),
            child_bonus: None,
            appropriate_size: None,
            max_rate_per_sqm: dec!(20),
            min_housing_cost_percent: Decimal::ZERO,
            no_contribution_below: None,
            max_benefit: None,
            min_benefit: None,
        });
        let config = HouseholdConfig::austria_2025()
            .with_housing_scheme(Region::Salzburg, Some(scheme))
            .unwrap();
        without_minimum_income(config)
    }

    fn point(gross: Decimal, total: Decimal) -> IncomeCurvePoint {
        IncomeCurvePoint {
            gross,
            combined_net: total,
            family_allowance: Decimal::ZERO,
            housing_subsidy: Decimal::ZERO,
            kindermehrbetrag: Decimal::ZERO,
            minimum_income: Decimal::ZERO,
            childcare_costs: Decimal::ZERO,
            total,
        }
    }

    #[test]
    fn test_flat_step_counts_as_trap() {
        let curve = [point(dec!(0), dec!(1000)), point(dec!(100), dec!(1000))];
        let zones = trap_zones_from_curve(&curve);

        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].difference, Decimal::ZERO);
    }

    #[test]
    fn test_rising_curve_has_no_traps() {
        let curve = [
            point(dec!(0), dec!(1000)),
            point(dec!(100), dec!(1050)),
            point(dec!(200), dec!(1100)),
        ];
        assert!(trap_zones_from_curve(&curve).is_empty());
    }

    #[test]
    fn test_empty_and_single_point_curves() {
        assert!(trap_zones_from_curve(&[]).is_empty());
        assert!(trap_zones_from_curve(&[point(dec!(0), dec!(1))]).is_empty());
    }

    #[test]
    fn test_housing_cliff_is_a_trap_zone() {
        let config = cliff_config();
        let mut situation = HouseholdSituation::single(Decimal::ZERO, Region::Salzburg);
        situation.housing_cost = dec!(800);

        let zones = find_trap_zones(&config, &situation, &SweepRange::default());

        assert!(!zones.is_empty());
        for zone in &zones {
            assert!(zone.to_total <= zone.from_total);
            assert_eq!(zone.difference, zone.from_total - zone.to_total);
            assert!(zone.to_gross > zone.from_gross);
        }
        assert!(zones.iter().any(|z| z.difference > dec!(100)));
    }

    #[test]
    fn test_marginal_earnings_threshold_is_a_trap_zone() {
        let config = without_minimum_income(HouseholdConfig::austria_2025());
        let situation = HouseholdSituation::single(Decimal::ZERO, Region::Vienna);
        let range = SweepRange {
            min_gross: dec!(500),
            max_gross: dec!(600),
            step: dec!(10),
        };

        let zones = find_trap_zones(&config, &situation, &range);

        // Contributions start at 551.10, so 560 gross nets 475.328.
        assert_eq!(zones.len(), 1);
        assert_eq!(zones[0].from_gross, dec!(550));
        assert_eq!(zones[0].to_gross, dec!(560));
        assert_eq!(zones[0].difference, dec!(74.672));
    }

    #[test]
    fn test_no_trap_zones_in_default_sweep_without_benefits() {
        let config = without_minimum_income(HouseholdConfig::austria_2025());
        let situation = HouseholdSituation::single(Decimal::ZERO, Region::Vienna);

        assert!(find_trap_zones(&config, &situation, &SweepRange::default()).is_empty());
    }

    #[test]
    fn test_zero_step_finds_nothing() {
        let config = cliff_config();
        let situation = HouseholdSituation::single(Decimal::ZERO, Region::Salzburg);
        let range = SweepRange {
            step: Decimal::ZERO,
            ..SweepRange::default()
        };

        assert!(find_trap_zones(&config, &situation, &range).is_empty());
    }
}
