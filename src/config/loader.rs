//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading the tax and
//! benefit tables from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::{info, warn};

use crate::error::{EngineError, EngineResult};
use crate::models::Region;

use super::types::{
    BenefitsConfig, ChildcareConfig, HouseholdConfig, HousingSubsidyFile, HousingSubsidyScheme,
    TaxConfig, TaxYearMetadata,
};

/// Loads and provides access to the household configuration.
///
/// # Directory Structure
///
/// ```text
/// config/at2025/
/// ├── tax_year.yaml       # Tax year metadata
/// ├── tax.yaml            # Tariff, social security, special payments
/// ├── benefits.yaml       # Federal benefit tables
/// ├── childcare.yaml      # Childcare fees per federal state
/// └── housing/
///     └── vienna.yaml     # One housing subsidy scheme per federal state
/// ```
///
/// # Example
///
/// ```no_run
/// use household_income::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/at2025").unwrap();
/// println!("Loaded tables: {}", loader.metadata().name);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: HouseholdConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - Two housing files configure the same region
    /// - The tables violate an invariant (see [`HouseholdConfig::validate`])
    ///
    /// # Example
    ///
    /// ```no_run
    /// use household_income::config::ConfigLoader;
    ///
    /// let loader = ConfigLoader::load("./config/at2025")?;
    /// # Ok::<(), household_income::error::EngineError>(())
    /// ```
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let metadata = Self::load_yaml::<TaxYearMetadata>(&path.join("tax_year.yaml"))?;
        let tax = Self::load_yaml::<TaxConfig>(&path.join("tax.yaml"))?;
        let benefits = Self::load_yaml::<BenefitsConfig>(&path.join("benefits.yaml"))?;
        let childcare = Self::load_yaml::<ChildcareConfig>(&path.join("childcare.yaml"))?;
        let housing = Self::load_housing(&path.join("housing"))?;

        let config = HouseholdConfig::new(metadata, tax, benefits, childcare, housing)?;

        info!(
            path = %path.display(),
            year = config.metadata().year,
            housing_regions = config.housing_schemes().len(),
            "Loaded household configuration"
        );

        Ok(Self { config })
    }

    /// Loads configuration, falling back to the built-in 2025 tables.
    ///
    /// A load failure is logged and never surfaced: the returned loader
    /// always holds a usable configuration.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match Self::load(path.as_ref()) {
            Ok(loader) => loader,
            Err(err) => {
                warn!(
                    path = %path.as_ref().display(),
                    error = %err,
                    "Falling back to built-in configuration"
                );
                Self::from_config(HouseholdConfig::austria_2025())
            }
        }
    }

    /// Wraps an already built configuration.
    pub fn from_config(config: HouseholdConfig) -> Self {
        Self { config }
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads all housing subsidy files from the housing directory.
    fn load_housing(housing_dir: &Path) -> EngineResult<HashMap<Region, HousingSubsidyScheme>> {
        let housing_dir_str = housing_dir.display().to_string();

        let entries = fs::read_dir(housing_dir).map_err(|_| EngineError::ConfigNotFound {
            path: housing_dir_str.clone(),
        })?;

        let mut schemes = HashMap::new();

        for entry in entries {
            let entry = entry.map_err(|_| EngineError::ConfigNotFound {
                path: housing_dir_str.clone(),
            })?;

            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "yaml") {
                let file = Self::load_yaml::<HousingSubsidyFile>(&path)?;
                if schemes.insert(file.region, file.scheme).is_some() {
                    return Err(EngineError::ConfigParseError {
                        path: path.display().to_string(),
                        message: format!("duplicate housing scheme for {}", file.region),
                    });
                }
            }
        }

        if schemes.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no housing files found)", housing_dir_str),
            });
        }

        Ok(schemes)
    }

    /// Returns the underlying configuration.
    pub fn config(&self) -> &HouseholdConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> HouseholdConfig {
        self.config
    }

    /// Returns the tax year metadata.
    pub fn metadata(&self) -> &TaxYearMetadata {
        self.config.metadata()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn config_path() -> &'static str {
        "./config/at2025"
    }

    #[test]
    fn test_load_valid_configuration() {
        let result = ConfigLoader::load(config_path());
        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());

        let loader = result.unwrap();
        assert_eq!(loader.metadata().year, 2025);
    }

    #[test]
    fn test_shipped_files_match_built_in_tables() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let builtin = HouseholdConfig::austria_2025();

        assert_eq!(loader.config().tax(), builtin.tax());
        assert_eq!(loader.config().benefits(), builtin.benefits());
        assert_eq!(loader.config().childcare(), builtin.childcare());
        assert_eq!(loader.config().housing_schemes(), builtin.housing_schemes());
    }

    #[test]
    fn test_loaded_tax_tables() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        let tax = loader.config().tax();

        assert_eq!(tax.marginal_earnings_threshold, dec!(551.10));
        assert_eq!(tax.social_security.ceiling_base, dec!(6450));
        assert_eq!(tax.special_payments.flat_rate, dec!(0.06));
        assert!(tax.brackets.last().unwrap().max.is_none());
    }

    #[test]
    fn test_loaded_housing_schemes_cover_every_region() {
        let loader = ConfigLoader::load(config_path()).unwrap();
        for region in Region::ALL {
            assert!(loader.config().housing_scheme(region).is_some());
        }
    }

    #[test]
    fn test_load_missing_directory_returns_error() {
        let result = ConfigLoader::load("/nonexistent/path");
        assert!(result.is_err());

        match result {
            Err(EngineError::ConfigNotFound { path }) => {
                assert!(path.contains("tax_year.yaml"));
            }
            _ => panic!("Expected ConfigNotFound error"),
        }
    }

    #[test]
    fn test_load_or_default_falls_back_to_built_in_tables() {
        let loader = ConfigLoader::load_or_default("/nonexistent/path");
        assert_eq!(loader.config(), &HouseholdConfig::austria_2025());
    }

    #[test]
    fn test_into_config_returns_loaded_tables() {
        let config = ConfigLoader::from_config(HouseholdConfig::austria_2025()).into_config();
        assert_eq!(config.metadata().year, 2025);
    }
}
