//! Core data models for the household income engine.
//!
//! This module contains the situation a calculation starts from, the
//! per-benefit results, and the audit trace.

mod audit;
mod outcome;
mod situation;

pub use audit::{AuditStep, AuditTrace, AuditWarning};
pub use outcome::{
    ChildAllowance, ChildcareCosts, ChildcareLine, CreditKind, FamilyAllowance, FamilyBonus,
    HouseholdOutcome, HousingFormula, HousingSubsidy, IneligibilityReason, MinimumIncomeSupport,
    NetIncomeBreakdown, SingleEarnerCredit, SocialSecurityContributions,
};
pub use situation::{
    Child, DEFAULT_DWELLING_SIZE, HouseholdSituation, IncomePeriod, MAX_CHILD_AGE, MAX_INPUT_AMOUNT,
    MaritalStatus, PAYMENTS_PER_YEAR, Region,
};
