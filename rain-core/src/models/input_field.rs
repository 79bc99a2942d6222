use serde::{Deserialize, Serialize};

/// Fields of the harvest calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputField {
    Area,
    Material,
    Precipitation,
    TankCapacity,
    SystemCost,
    MonthlySavings,
}

impl InputField {
    /// Every field, in form order.
    pub fn all() -> &'static [InputField] {
        &[
            InputField::Area,
            InputField::Precipitation,
            InputField::Material,
            InputField::TankCapacity,
            InputField::SystemCost,
            InputField::MonthlySavings,
        ]
    }

    /// Stable element id used by the page layer.
    pub fn id(&self) -> &'static str {
        match self {
            Self::Area => "areaTecho",
            Self::Material => "materialTecho",
            Self::Precipitation => "precipitacion",
            Self::TankCapacity => "capacidadTinaco",
            Self::SystemCost => "costoSistema",
            Self::MonthlySavings => "ahorroMensual",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Area => "Roof area (m²)",
            Self::Material => "Roof material",
            Self::Precipitation => "Annual precipitation (mm)",
            Self::TankCapacity => "Tank capacity (L)",
            Self::SystemCost => "System cost",
            Self::MonthlySavings => "Monthly savings",
        }
    }
}
