//! Progressive income tax.
//!
//! Applies the Lohnsteuer tariff (§ 33 Abs 1 EStG) to annual taxable income.

use rust_decimal::Decimal;

use crate::config::TaxBracket;

/// Calculates annual income tax on annual taxable income.
///
/// Each bracket taxes the part of the income that falls inside it. The loop
/// stops at the first bracket starting at or above the income, so the
/// unbounded top bracket is only reached by incomes that exceed its start.
///
/// Never returns a negative amount; an income of zero (or below) yields zero.
///
/// # Examples
///
/// ```
/// use household_income::calculation::calculate_income_tax;
/// use household_income::config::HouseholdConfig;
/// use rust_decimal_macros::dec;
///
/// let config = HouseholdConfig::austria_2025();
/// let brackets = &config.tax().brackets;
///
/// assert_eq!(calculate_income_tax(dec!(13308), brackets), dec!(0));
/// // 8,309 in the 20% bracket
/// assert_eq!(calculate_income_tax(dec!(21617), brackets), dec!(1661.80));
/// ```
pub fn calculate_income_tax(annual_taxable_income: Decimal, brackets: &[TaxBracket]) -> Decimal {
    let mut tax = Decimal::ZERO;

    for bracket in brackets {
        if annual_taxable_income <= bracket.min {
            break;
        }

        let upper = match bracket.max {
            Some(max) => annual_taxable_income.min(max),
            None => annual_taxable_income,
        };
        let taxable_amount = upper - bracket.min;
        if taxable_amount > Decimal::ZERO {
            tax += taxable_amount * bracket.rate;
        }
    }

    tax.max(Decimal::ZERO)
}
