//! Harvest calculation modules.
//!
//! This module provides the calculation engine that turns roof and rainfall
//! parameters into a derived harvest result, along with shared helpers.

pub mod common;
pub mod harvest;

pub use harvest::{
    CO2_KG_PER_LITER, CalculationError, DEFAULT_TANK_CAPACITY_L, FALLBACK_COEFFICIENT,
    HarvestCalculator, HarvestConfig, HarvestConfigError, HarvestInput,
};
