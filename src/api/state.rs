//! Application state for the household income API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{ConfigLoader, HouseholdConfig};

/// Shared application state.
///
/// Holds the tax and benefit tables. They are loaded once at startup and
/// never change while the server runs.
#[derive(Clone)]
pub struct AppState {
    config: Arc<ConfigLoader>,
}

impl AppState {
    /// Creates a new application state with the given configuration loader.
    pub fn new(config: ConfigLoader) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the household configuration.
    pub fn config(&self) -> &HouseholdConfig {
        self.config.config()
    }

    /// Returns the tax year of the loaded tables.
    pub fn tax_year(&self) -> i32 {
        self.config.metadata().year
    }
}
