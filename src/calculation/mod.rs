//! Calculation logic for the household income engine.
//!
//! This module contains the tax and contribution engine (income tax, social
//! security, gross-to-net), the benefit rules (family allowance, family
//! bonus, single earner credit, housing subsidy, minimum-income support,
//! childcare costs) and the aggregation that combines them for a household.
//!
//! Every function is pure: the configuration is passed in explicitly and no
//! state is kept between calls.

mod childcare;
mod common;
mod family_allowance;
mod family_bonus;
mod household;
mod housing_subsidy;
mod income_tax;
mod minimum_income;
mod net_income;
mod single_earner_credit;
mod social_security;

pub use childcare::{ChildcareResult, calculate_childcare_costs};
pub use common::{ratio, round_half_up, tier_lookup};
pub use family_allowance::{FamilyAllowanceResult, allowance_for_age, calculate_family_allowance};
pub use family_bonus::{FamilyBonusResult, calculate_family_bonus};
pub use household::calculate_household;
pub use housing_subsidy::{
    HousingParams, HousingSubsidyResult, calculate_generic_subsidy, calculate_housing_subsidy,
    calculate_styria_subsidy, calculate_vienna_subsidy,
};
pub use income_tax::calculate_income_tax;
pub use minimum_income::{MinimumIncomeParams, MinimumIncomeResult, calculate_minimum_income};
pub use net_income::{NetIncomeOptions, NetIncomeResult, calculate_monthly_net};
pub use single_earner_credit::{
    SingleEarnerCreditResult, calculate_single_earner_credit, credit_for_children,
};
pub use social_security::{calculate_social_security, unemployment_rate};
