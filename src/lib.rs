//! Household Income Engine for Austria
//!
//! This crate calculates the net monthly income of an Austrian household for
//! tax year 2025: wage tax and social security, federal family benefits,
//! regional housing subsidies, minimum-income support and childcare costs.
//! On top of the point calculation it sweeps gross salaries to find trap
//! zones where earning more does not raise household income.

#![warn(missing_docs)]

pub mod analysis;
pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
