//! Raw state of the calculator form and its validation.

use rain_core::calculations::common::is_positive;
use rain_core::{CalculationError, HarvestInput, HarvestResult, InputField};
use rust_decimal::Decimal;

use crate::utils::{number_to_field, parse_number, parse_optional_decimal};

pub const AREA_MESSAGE: &str = "Enter a valid area (> 0).";
pub const MATERIAL_MESSAGE: &str = "Select the roof material.";
pub const PRECIPITATION_MESSAGE: &str = "Enter a valid precipitation (0 or more).";
pub const COST_MESSAGE: &str = "The cost cannot be negative.";
pub const SAVINGS_MESSAGE: &str = "Monthly savings cannot be negative.";
pub const SAVINGS_RANGE_MESSAGE: &str = "Monthly savings are too large.";
pub const TANK_MESSAGE: &str = "Enter a valid tank capacity.";

/// First failed check of an explicit submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    pub field: InputField,
    pub message: &'static str,
    /// Whether the offending field receives focus.
    pub focus: bool,
}

impl FieldError {
    /// Message shown for a field, also used for engine errors.
    pub fn for_field(field: InputField) -> Self {
        let (message, focus) = match field {
            InputField::Area => (AREA_MESSAGE, true),
            InputField::Material => (MATERIAL_MESSAGE, true),
            InputField::Precipitation => (PRECIPITATION_MESSAGE, true),
            InputField::SystemCost => (COST_MESSAGE, false),
            InputField::MonthlySavings => (SAVINGS_MESSAGE, false),
            InputField::TankCapacity => (TANK_MESSAGE, false),
        };
        Self {
            field,
            message,
            focus,
        }
    }

    /// Message shown when the engine rejects an input the form accepted.
    pub fn for_error(error: &CalculationError) -> Self {
        match error {
            CalculationError::InvalidSavings(_) => Self {
                field: InputField::MonthlySavings,
                message: SAVINGS_RANGE_MESSAGE,
                focus: false,
            },
            other => Self::for_field(other.field()),
        }
    }
}

/// Field values exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CalculatorForm {
    pub area: String,
    pub material: String,
    pub precipitation: String,
    pub tank_capacity: String,
    pub system_cost: String,
    pub monthly_savings: String,
}

impl CalculatorForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, field: InputField) -> &str {
        match field {
            InputField::Area => &self.area,
            InputField::Material => &self.material,
            InputField::Precipitation => &self.precipitation,
            InputField::TankCapacity => &self.tank_capacity,
            InputField::SystemCost => &self.system_cost,
            InputField::MonthlySavings => &self.monthly_savings,
        }
    }

    pub fn set(
        &mut self,
        field: InputField,
        value: impl Into<String>,
    ) {
        let slot = match field {
            InputField::Area => &mut self.area,
            InputField::Material => &mut self.material,
            InputField::Precipitation => &mut self.precipitation,
            InputField::TankCapacity => &mut self.tank_capacity,
            InputField::SystemCost => &mut self.system_cost,
            InputField::MonthlySavings => &mut self.monthly_savings,
        };
        *slot = value.into();
    }

    /// Input for a silent auto-calculation, or `None` while the required
    /// fields are incomplete.
    pub fn auto_input(&self) -> Option<HarvestInput> {
        let area = parse_number(&self.area).filter(|a| is_positive(*a))?;
        let precipitation = parse_number(&self.precipitation).filter(|p| *p >= 0.0)?;
        let material = self.material.trim();
        if material.is_empty() {
            return None;
        }
        Some(self.build_input(area, material, precipitation))
    }

    /// Checks area, material, precipitation, cost and savings in that order
    /// and stops at the first failure.
    pub fn validate_submission(&self) -> Result<HarvestInput, FieldError> {
        let area = parse_number(&self.area)
            .filter(|a| is_positive(*a))
            .ok_or_else(|| FieldError::for_field(InputField::Area))?;

        let material = self.material.trim();
        if material.is_empty() {
            return Err(FieldError::for_field(InputField::Material));
        }

        let precipitation = parse_number(&self.precipitation)
            .filter(|p| *p >= 0.0)
            .ok_or_else(|| FieldError::for_field(InputField::Precipitation))?;

        let input = self.build_input(area, material, precipitation);
        if input.system_cost.is_some_and(|c| c < Decimal::ZERO) {
            return Err(FieldError::for_field(InputField::SystemCost));
        }
        if let Some(savings) = input.monthly_savings {
            if savings < Decimal::ZERO {
                return Err(FieldError::for_field(InputField::MonthlySavings));
            }
            if savings.checked_mul(Decimal::from(12)).is_none() {
                return Err(FieldError::for_error(&CalculationError::InvalidSavings(savings)));
            }
        }
        Ok(input)
    }

    fn build_input(
        &self,
        area: f64,
        material: &str,
        precipitation: f64,
    ) -> HarvestInput {
        HarvestInput {
            area,
            precipitation,
            material: material.to_string(),
            tank_capacity_l: parse_number(&self.tank_capacity),
            system_cost: parse_optional_decimal(&self.system_cost),
            monthly_savings: parse_optional_decimal(&self.monthly_savings),
        }
    }

    /// Copies stored values back into the form. Only values that are
    /// present and non-zero are written; returns the fields that changed.
    pub fn populate_from(
        &mut self,
        result: &HarvestResult,
    ) -> Vec<InputField> {
        let mut written = Vec::new();
        let mut write = |form: &mut Self, field: InputField, value: String| {
            form.set(field, value);
            written.push(field);
        };

        if result.area != 0.0 && result.area.is_finite() {
            write(self, InputField::Area, number_to_field(result.area));
        }
        if result.precipitation != 0.0 && result.precipitation.is_finite() {
            write(self, InputField::Precipitation, number_to_field(result.precipitation));
        }
        if !result.material.is_empty() {
            write(self, InputField::Material, result.material.clone());
        }
        if let Some(cost) = result.system_cost.filter(|c| !c.is_zero()) {
            write(self, InputField::SystemCost, cost.normalize().to_string());
        }
        if let Some(savings) = result.monthly_savings.filter(|s| !s.is_zero()) {
            write(self, InputField::MonthlySavings, savings.normalize().to_string());
        }
        if result.tank_capacity_l != 0.0 && result.tank_capacity_l.is_finite() {
            write(self, InputField::TankCapacity, number_to_field(result.tank_capacity_l));
        }
        written
    }
}
