//! Gross-to-net calculation for one earner.
//!
//! Salaries are paid 14 times a year. The 12 regular payments are taxed on
//! the progressive tariff, the 13th and 14th at a flat rate above an annual
//! allowance (§ 67 Abs 1 EStG).

use rust_decimal::Decimal;

use crate::config::TaxConfig;
use crate::models::{AuditStep, NetIncomeBreakdown, PAYMENTS_PER_YEAR};

use super::common::{ratio, round_half_up};
use super::income_tax::calculate_income_tax;
use super::social_security::calculate_social_security;

const REGULAR_PAYMENTS: u32 = 12;
const SPECIAL_PAYMENTS: u32 = 2;

/// Options for the gross-to-net calculation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NetIncomeOptions {
    /// Annual credits deducted from tax on top of the commuter credit.
    pub tax_credits: Decimal,
}

/// The result of a net income calculation, including the audit step.
#[derive(Debug, Clone)]
pub struct NetIncomeResult {
    /// The gross-to-net breakdown.
    pub breakdown: NetIncomeBreakdown,
    /// The audit step recording this calculation.
    pub audit_step: AuditStep,
}

/// Calculates monthly net income from monthly gross.
///
/// Annual tax is the progressive tax on the regular payments plus the flat
/// tax on the special payments, less the commuter credit and any credits in
/// `options`, floored at zero. Net income is gross less contributions less
/// one twelfth of the annual tax.
///
/// # Examples
///
/// ```
/// use household_income::calculation::{calculate_monthly_net, round_half_up, NetIncomeOptions};
/// use household_income::config::HouseholdConfig;
/// use rust_decimal_macros::dec;
///
/// let config = HouseholdConfig::austria_2025();
/// let result = calculate_monthly_net(dec!(2000), config.tax(), NetIncomeOptions::default(), 1);
///
/// assert_eq!(result.breakdown.social_security.total, dec!(302.40));
/// assert_eq!(round_half_up(result.breakdown.net), dec!(1606.59));
/// ```
pub fn calculate_monthly_net(
    monthly_gross: Decimal,
    tax: &TaxConfig,
    options: NetIncomeOptions,
    step_number: u32,
) -> NetIncomeResult {
    let social_security = calculate_social_security(monthly_gross, tax);
    let monthly_after_ss = monthly_gross - social_security.total;

    let regular_taxable = monthly_after_ss * Decimal::from(REGULAR_PAYMENTS);
    let regular_tax = calculate_income_tax(regular_taxable, &tax.brackets);

    let special_taxable = (monthly_after_ss * Decimal::from(SPECIAL_PAYMENTS)
        - tax.special_payments.allowance)
        .max(Decimal::ZERO);
    let special_payment_tax = special_taxable * tax.special_payments.flat_rate;

    let annual_tax = (regular_tax + special_payment_tax - tax.commuter_credit - options.tax_credits)
        .max(Decimal::ZERO);
    let monthly_tax = annual_tax / Decimal::from(REGULAR_PAYMENTS);

    let net = (monthly_gross - social_security.total - monthly_tax).max(Decimal::ZERO);

    let annual_gross = monthly_gross * Decimal::from(PAYMENTS_PER_YEAR);
    let annual_ss = social_security.total * Decimal::from(PAYMENTS_PER_YEAR);
    let hundred = Decimal::ONE_HUNDRED;
    let effective_tax_rate = ratio(annual_tax, annual_gross) * hundred;
    let effective_total_rate = ratio(annual_tax + annual_ss, annual_gross) * hundred;

    let breakdown = NetIncomeBreakdown {
        gross: monthly_gross,
        annual_gross,
        social_security,
        regular_tax,
        special_payment_tax,
        monthly_tax,
        annual_tax,
        tax_credits: options.tax_credits,
        net,
        effective_tax_rate,
        effective_total_rate,
    };

    let audit_step = AuditStep {
        step_number,
        rule_id: "net_income".to_string(),
        rule_name: "Gross To Net".to_string(),
        legal_ref: "§ 33 EStG, § 67 EStG, ASVG".to_string(),
        input: serde_json::json!({
            "monthly_gross": monthly_gross.normalize().to_string(),
            "tax_credits": options.tax_credits.normalize().to_string(),
        }),
        output: serde_json::json!({
            "social_security": social_security.total.normalize().to_string(),
            "regular_tax": regular_tax.normalize().to_string(),
            "special_payment_tax": special_payment_tax.normalize().to_string(),
            "annual_tax": annual_tax.normalize().to_string(),
            "net": round_half_up(net).normalize().to_string(),
        }),
        reasoning: format!(
            "Gross {} less contributions {} less tax {}/12 = net {}",
            monthly_gross.normalize(),
            social_security.total.normalize(),
            round_half_up(annual_tax).normalize(),
            round_half_up(net).normalize()
        ),
    };

    NetIncomeResult {
        breakdown,
        audit_step,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::HouseholdConfig;
    use rust_decimal_macros::dec;

    fn tax() -> TaxConfig {
        HouseholdConfig::austria_2025().tax().clone()
    }

    fn net(gross: Decimal) -> NetIncomeBreakdown {
        calculate_monthly_net(gross, &tax(), NetIncomeOptions::default(), 1).breakdown
    }

    #[test]
    fn test_net_income_at_2000() {
        let breakdown = net(dec!(2000));

        assert_eq!(breakdown.annual_gross, dec!(28000));
        assert_eq!(breakdown.regular_tax, dec!(1412.64));
        assert_eq!(breakdown.special_payment_tax, dec!(166.512));
        assert_eq!(breakdown.annual_tax, dec!(1092.152));
        assert_eq!(round_half_up(breakdown.monthly_tax), dec!(91.01));
        assert_eq!(round_half_up(breakdown.net), dec!(1606.59));
    }

    #[test]
    fn test_net_income_at_3000() {
        let breakdown = net(dec!(3000));

        assert_eq!(breakdown.social_security.total, dec!(542.10));
        assert_eq!(breakdown.regular_tax, dec!(4025.14));
        assert_eq!(breakdown.special_payment_tax, dec!(257.748));
        assert_eq!(breakdown.annual_tax, dec!(3795.888));
        assert_eq!(breakdown.monthly_tax, dec!(316.324));
        assert_eq!(breakdown.net, dec!(2141.576));
    }

    #[test]
    fn test_zero_gross_has_zero_rates() {
        let breakdown = net(Decimal::ZERO);

        assert_eq!(breakdown.net, Decimal::ZERO);
        assert_eq!(breakdown.annual_tax, Decimal::ZERO);
        assert_eq!(breakdown.effective_tax_rate, Decimal::ZERO);
        assert_eq!(breakdown.effective_total_rate, Decimal::ZERO);
    }

    #[test]
    fn test_marginal_earnings_are_untaxed() {
        let breakdown = net(dec!(500));
        assert_eq!(breakdown.net, dec!(500));
        assert_eq!(breakdown.social_security.total, Decimal::ZERO);
    }

    #[test]
    fn test_special_payments_below_allowance_are_untaxed() {
        let mut tax = tax();
        tax.special_payments.allowance = dec!(100000);
        let breakdown =
            calculate_monthly_net(dec!(3000), &tax, NetIncomeOptions::default(), 1).breakdown;
        assert_eq!(breakdown.special_payment_tax, Decimal::ZERO);
    }

    #[test]
    fn test_supplied_credits_reduce_tax() {
        let tax = tax();
        let options = NetIncomeOptions {
            tax_credits: dec!(1200),
        };
        let with_credits = calculate_monthly_net(dec!(3000), &tax, options, 1).breakdown;

        assert_eq!(with_credits.annual_tax, dec!(2595.888));
        assert_eq!(with_credits.net - net(dec!(3000)).net, dec!(100));
    }

    #[test]
    fn test_credits_never_make_tax_negative() {
        let options = NetIncomeOptions {
            tax_credits: dec!(100000),
        };
        let breakdown = calculate_monthly_net(dec!(3000), &tax(), options, 1).breakdown;
        assert_eq!(breakdown.annual_tax, Decimal::ZERO);
        assert_eq!(breakdown.net, dec!(2457.90));
    }

    #[test]
    fn test_effective_rates() {
        let breakdown = net(dec!(3000));
        // 3795.888 / 42000 * 100
        assert_eq!(breakdown.effective_tax_rate.round_dp(4), dec!(9.0378));
        // (3795.888 + 7589.40) / 42000 * 100
        assert_eq!(breakdown.effective_total_rate.round_dp(4), dec!(27.1078));
    }

    #[test]
    fn test_audit_step_records_rule() {
        let result = calculate_monthly_net(dec!(2000), &tax(), NetIncomeOptions::default(), 3);

        assert_eq!(result.audit_step.step_number, 3);
        assert_eq!(result.audit_step.rule_id, "net_income");
        assert_eq!(result.audit_step.input["monthly_gross"], "2000");
        assert_eq!(result.audit_step.output["net"], "1606.59");
    }
}
