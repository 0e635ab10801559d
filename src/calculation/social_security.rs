//! Employee social-security contributions.
//!
//! Contributions are levied on the monthly gross up to the contribution
//! ceiling. Earnings below the marginal-earnings threshold
//! (Geringfügigkeitsgrenze) are exempt altogether.

use rust_decimal::Decimal;

use crate::config::{GraduatedRate, TaxConfig};
use crate::models::SocialSecurityContributions;

/// Returns the unemployment insurance rate for a monthly gross.
///
/// The first tier whose upper bound is at or above `monthly_gross` applies;
/// a tier without an upper bound matches everything. The lookup uses the
/// uncapped gross, so the contribution ceiling never lowers the rate.
pub fn unemployment_rate(monthly_gross: Decimal, tiers: &[GraduatedRate]) -> Decimal {
    tiers
        .iter()
        .find(|tier| tier.upper_bound.is_none_or(|bound| monthly_gross <= bound))
        .map(|tier| tier.rate)
        .unwrap_or(Decimal::ZERO)
}

/// Calculates monthly employee contributions for one salary payment.
///
/// # Examples
///
/// ```
/// use household_income::calculation::calculate_social_security;
/// use household_income::config::HouseholdConfig;
/// use rust_decimal_macros::dec;
///
/// let config = HouseholdConfig::austria_2025();
/// let ss = calculate_social_security(dec!(2000), config.tax());
///
/// assert_eq!(ss.health, dec!(77.40));
/// assert_eq!(ss.unemployment, dec!(0));
/// assert_eq!(ss.total, dec!(302.40));
/// ```
pub fn calculate_social_security(monthly_gross: Decimal, tax: &TaxConfig) -> SocialSecurityContributions {
    if monthly_gross < tax.marginal_earnings_threshold {
        return SocialSecurityContributions::default();
    }

    let rates = &tax.social_security;
    let base = monthly_gross.min(rates.ceiling_base);

    let health = base * rates.health;
    let pension = base * rates.pension;
    let unemployment = base * unemployment_rate(monthly_gross, &tax.unemployment_tiers);
    let other = base * rates.other;

    SocialSecurityContributions {
        health,
        pension,
        unemployment,
        other,
        total: health + pension + unemployment + other,
    }
}
