use serde::{Deserialize, Serialize};

/// Roof surface materials with a known runoff coefficient.
///
/// Each material accepts its English key and the historic Spanish key the
/// calculator page used (`teja`, `concreto`, `lamina`, `otros`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RoofMaterial {
    Metal,
    Tile,
    Concrete,
    SheetMetal,
    Other,
}

impl RoofMaterial {
    pub fn all() -> &'static [RoofMaterial] {
        &[
            RoofMaterial::Metal,
            RoofMaterial::Tile,
            RoofMaterial::Concrete,
            RoofMaterial::SheetMetal,
            RoofMaterial::Other,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Metal => "metal",
            Self::Tile => "tile",
            Self::Concrete => "concrete",
            Self::SheetMetal => "sheet-metal",
            Self::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Metal => "Metal",
            Self::Tile => "Tile",
            Self::Concrete => "Concrete",
            Self::SheetMetal => "Sheet metal",
            Self::Other => "Other",
        }
    }

    /// Fraction of precipitation that becomes collectible water.
    pub fn runoff_coefficient(&self) -> f64 {
        match self {
            Self::Metal => 0.95,
            Self::Tile => 0.85,
            Self::Concrete => 0.80,
            Self::SheetMetal => 0.90,
            Self::Other => 0.70,
        }
    }

    /// Case-insensitive lookup; surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metal" => Some(Self::Metal),
            "tile" | "teja" => Some(Self::Tile),
            "concrete" | "concreto" => Some(Self::Concrete),
            "sheet-metal" | "lamina" => Some(Self::SheetMetal),
            "other" | "otros" => Some(Self::Other),
            _ => None,
        }
    }
}
