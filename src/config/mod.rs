//! Configuration loading and management for the household income engine.
//!
//! This module loads the tax tariff, social-security rates and benefit tables
//! from YAML files, with a built-in fallback for tax year 2025.
//!
//! # Example
//!
//! ```no_run
//! use household_income::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load_or_default("./config/at2025");
//! println!("Tax year: {}", loader.metadata().year);
//! ```

mod defaults;
mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{
    BenefitsConfig, ChildcareConfig, ChildcareCostTable, FamilyAllowanceRates, FamilyBonusConfig,
    GenericAppropriateSize, GenericScheme, GraduatedRate, HouseholdConfig, HousingSubsidyFile,
    HousingSubsidyScheme, MinimumIncomeConfig, SingleEarnerCreditConfig, SocialSecurityRates,
    SpecialPaymentConfig, StyriaScheme, TaxBracket, TaxConfig, TaxYearMetadata,
    ViennaAppropriateSize, ViennaScheme, WeightingFactors,
};
