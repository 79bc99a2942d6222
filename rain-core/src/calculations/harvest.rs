//! Rainwater harvest calculations.
//!
//! Derives the annual collectible volume of a roof from its area, the annual
//! precipitation and the runoff coefficient of the roof material, plus the
//! savings, payback and CO₂ figures that follow from it.
//!
//! # Formula
//!
//! | Quantity        | Definition |
//! |-----------------|------------|
//! | `volume_m3`     | area (m²) × precipitation (mm) / 1000 × coefficient |
//! | `volume_l`      | `volume_m3` × 1000 |
//! | `annual_savings`| monthly savings × 12 (only when monthly savings > 0) |
//! | `roi_months`    | cost / monthly savings, one decimal (only when both > 0) |
//! | `co2_kg`        | `volume_l` × emission factor |
//! | tanks           | ⌊`volume_l` / tank capacity⌋ |
//! | showers         | ⌊`volume_l` / 60⌋ |
//! | wash loads      | ⌊`volume_l` / 50⌋ |
//!
//! # Example
//!
//! ```
//! use rain_core::calculations::{HarvestCalculator, HarvestInput};
//!
//! let calculator = HarvestCalculator::default();
//! let result = calculator
//!     .calculate(&HarvestInput::new(100.0, "metal", 800.0))
//!     .unwrap();
//!
//! assert_eq!(result.volume_l, 76000.0);
//! assert_eq!(result.equivalences.tanks_full, 69);
//! assert!(!result.has_roi);
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::calculations::common::{is_positive, round_one_decimal};
use crate::models::{Equivalences, HarvestResult, InputField, RoofMaterial};

/// Default storage-tank capacity in liters.
pub const DEFAULT_TANK_CAPACITY_L: f64 = 1100.0;

/// Kilograms of CO₂ avoided per liter of harvested water.
pub const CO2_KG_PER_LITER: f64 = 0.00027;

/// Runoff coefficient applied to materials without a known coefficient.
pub const FALLBACK_COEFFICIENT: f64 = 0.75;

/// Errors raised by the calculation engine for unusable input.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalculationError {
    /// Area must be a finite number greater than zero.
    #[error("invalid area: {0}")]
    InvalidArea(f64),

    /// A roof material is required.
    #[error("roof material is required")]
    MissingMaterial,

    /// Precipitation must be a finite number, zero or greater.
    #[error("invalid precipitation: {0}")]
    InvalidPrecipitation(f64),

    /// Monthly savings so large that the annual figure overflows.
    #[error("monthly savings out of range: {0}")]
    InvalidSavings(Decimal),
}

impl CalculationError {
    /// The form field the error refers to.
    pub fn field(&self) -> InputField {
        match self {
            Self::InvalidArea(_) => InputField::Area,
            Self::MissingMaterial => InputField::Material,
            Self::InvalidPrecipitation(_) => InputField::Precipitation,
            Self::InvalidSavings(_) => InputField::MonthlySavings,
        }
    }
}

/// Errors raised when a [`HarvestConfig`] holds out-of-range constants.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum HarvestConfigError {
    #[error("default tank capacity must be positive, got {0}")]
    InvalidTankCapacity(f64),

    #[error("CO2 emission factor must be non-negative, got {0}")]
    InvalidEmissionFactor(f64),

    #[error("fallback coefficient must be in (0, 1], got {0}")]
    InvalidFallbackCoefficient(f64),
}

/// Constants used by the calculation engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestConfig {
    /// Capacity used when the input omits one or gives a non-positive value.
    pub default_tank_capacity_l: f64,

    /// Kilograms of CO₂ avoided per harvested liter.
    pub co2_kg_per_liter: f64,

    /// Coefficient for materials outside [`RoofMaterial`].
    pub fallback_coefficient: f64,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            default_tank_capacity_l: DEFAULT_TANK_CAPACITY_L,
            co2_kg_per_liter: CO2_KG_PER_LITER,
            fallback_coefficient: FALLBACK_COEFFICIENT,
        }
    }
}

impl HarvestConfig {
    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`HarvestConfigError`] if:
    /// - `default_tank_capacity_l` is not a positive finite number
    /// - `co2_kg_per_liter` is negative or not finite
    /// - `fallback_coefficient` is not in (0, 1]
    pub fn validate(&self) -> Result<(), HarvestConfigError> {
        if !is_positive(self.default_tank_capacity_l) {
            return Err(HarvestConfigError::InvalidTankCapacity(
                self.default_tank_capacity_l,
            ));
        }
        if !self.co2_kg_per_liter.is_finite() || self.co2_kg_per_liter < 0.0 {
            return Err(HarvestConfigError::InvalidEmissionFactor(
                self.co2_kg_per_liter,
            ));
        }
        if !is_positive(self.fallback_coefficient) || self.fallback_coefficient > 1.0 {
            return Err(HarvestConfigError::InvalidFallbackCoefficient(
                self.fallback_coefficient,
            ));
        }
        Ok(())
    }
}

/// Input parameters for one calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestInput {
    /// Roof area in square meters.
    pub area: f64,

    /// Annual precipitation in millimeters.
    pub precipitation: f64,

    /// Roof material key as entered.
    pub material: String,

    /// Liters per storage tank; `None` uses the configured default.
    pub tank_capacity_l: Option<f64>,

    /// Cost of the harvesting system.
    pub system_cost: Option<Decimal>,

    /// Expected savings per month.
    pub monthly_savings: Option<Decimal>,
}

impl HarvestInput {
    /// Creates an input with only the required fields set.
    pub fn new(
        area: f64,
        material: impl Into<String>,
        precipitation: f64,
    ) -> Self {
        Self {
            area,
            precipitation,
            material: material.into(),
            tank_capacity_l: None,
            system_cost: None,
            monthly_savings: None,
        }
    }
}

/// The calculation engine.
///
/// Pure: no I/O and no hidden state, so identical inputs always produce
/// identical results.
#[derive(Debug, Clone, Default)]
pub struct HarvestCalculator {
    config: HarvestConfig,
}

impl HarvestCalculator {
    /// Creates a calculator after validating `config`.
    pub fn new(config: HarvestConfig) -> Result<Self, HarvestConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &HarvestConfig {
        &self.config
    }

    /// Calculates the derived result for `input`.
    ///
    /// # Errors
    ///
    /// Returns [`CalculationError`] if:
    /// - the area is not a positive finite number
    /// - the material is empty
    /// - the precipitation is negative or not finite
    /// - area and precipitation are finite but their volume is not
    /// - twelve times the monthly savings does not fit a [`Decimal`]
    pub fn calculate(
        &self,
        input: &HarvestInput,
    ) -> Result<HarvestResult, CalculationError> {
        if !is_positive(input.area) {
            return Err(CalculationError::InvalidArea(input.area));
        }
        let material = input.material.trim();
        if material.is_empty() {
            return Err(CalculationError::MissingMaterial);
        }
        if !input.precipitation.is_finite() || input.precipitation < 0.0 {
            return Err(CalculationError::InvalidPrecipitation(input.precipitation));
        }

        let coefficient = self.coefficient(material);
        let volume_m3 = input.area * (input.precipitation / 1000.0) * coefficient;
        let volume_l = volume_m3 * 1000.0;
        let co2_kg = volume_l * self.config.co2_kg_per_liter;
        if !volume_l.is_finite() || !co2_kg.is_finite() {
            return Err(CalculationError::InvalidArea(input.area));
        }
        let tank_capacity_l = self.tank_capacity(input.tank_capacity_l);

        let monthly_savings = positive(input.monthly_savings);
        let system_cost = positive(input.system_cost);
        let annual_savings = monthly_savings
            .map(|m| {
                m.checked_mul(Decimal::from(12))
                    .ok_or(CalculationError::InvalidSavings(m))
            })
            .transpose()?;
        let roi_months = self.payback_months(system_cost, monthly_savings);

        Ok(HarvestResult {
            area: input.area,
            material: input.material.clone(),
            precipitation: input.precipitation,
            coefficient,
            tank_capacity_l,
            volume_m3,
            volume_l,
            has_savings: monthly_savings.is_some(),
            monthly_savings,
            annual_savings,
            system_cost,
            has_roi: roi_months.is_some(),
            roi_months,
            co2_kg,
            equivalences: Equivalences::from_volume(volume_l, tank_capacity_l),
        })
    }

    /// Runoff coefficient for a material key, falling back for unknown keys.
    fn coefficient(
        &self,
        material: &str,
    ) -> f64 {
        RoofMaterial::parse(material)
            .map(|m| m.runoff_coefficient())
            .unwrap_or(self.config.fallback_coefficient)
    }

    /// Tank capacity actually used for the equivalence count.
    fn tank_capacity(
        &self,
        requested: Option<f64>,
    ) -> f64 {
        requested
            .filter(|c| is_positive(*c))
            .unwrap_or(self.config.default_tank_capacity_l)
    }

    /// Months until savings cover the cost, present only when both are positive.
    fn payback_months(
        &self,
        system_cost: Option<Decimal>,
        monthly_savings: Option<Decimal>,
    ) -> Option<Decimal> {
        let (cost, savings) = (system_cost?, monthly_savings?);
        cost.checked_div(savings).map(round_one_decimal)
    }
}

fn positive(value: Option<Decimal>) -> Option<Decimal> {
    value.filter(|v| *v > Decimal::ZERO)
}
