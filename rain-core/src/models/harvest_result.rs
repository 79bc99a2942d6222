use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::whole_units;

/// Liters used by one reference shower.
pub const SHOWER_LITERS: f64 = 60.0;

/// Liters used by one reference washing-machine load.
pub const WASH_LOAD_LITERS: f64 = 50.0;

/// Whole consumption units represented by a harvested volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Equivalences {
    pub tanks_full: u64,
    pub showers: u64,
    pub wash_loads: u64,
}

impl Equivalences {
    pub fn from_volume(
        volume_l: f64,
        tank_capacity_l: f64,
    ) -> Self {
        Self {
            tanks_full: whole_units(volume_l, tank_capacity_l),
            showers: whole_units(volume_l, SHOWER_LITERS),
            wash_loads: whole_units(volume_l, WASH_LOAD_LITERS),
        }
    }
}

/// Derived result of one harvest calculation.
///
/// Created by the calculation engine and never mutated afterwards. The
/// savings and ROI options are `Some` exactly when their flag is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HarvestResult {
    // Inputs as used
    pub area: f64,
    pub material: String,
    pub precipitation: f64,
    pub coefficient: f64,
    pub tank_capacity_l: f64,

    // Volume
    pub volume_m3: f64,
    pub volume_l: f64,

    // Money
    pub has_savings: bool,
    pub monthly_savings: Option<Decimal>,
    pub annual_savings: Option<Decimal>,
    pub system_cost: Option<Decimal>,
    pub has_roi: bool,
    pub roi_months: Option<Decimal>,

    pub co2_kg: f64,

    #[serde(flatten)]
    pub equivalences: Equivalences,
}

/// The record kept in the persisted-result slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedHarvest {
    #[serde(flatten)]
    pub result: HarvestResult,
    pub saved_at: DateTime<Utc>,
}

impl SavedHarvest {
    pub fn new(
        result: HarvestResult,
        saved_at: DateTime<Utc>,
    ) -> Self {
        Self { result, saved_at }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample_result() -> HarvestResult {
        HarvestResult {
            area: 100.0,
            material: "metal".to_string(),
            precipitation: 800.0,
            coefficient: 0.95,
            tank_capacity_l: 1100.0,
            volume_m3: 76.0,
            volume_l: 76000.0,
            has_savings: true,
            monthly_savings: Some(dec!(500)),
            annual_savings: Some(dec!(6000)),
            system_cost: Some(dec!(10000)),
            has_roi: true,
            roi_months: Some(dec!(20.0)),
            co2_kg: 20.52,
            equivalences: Equivalences::from_volume(76000.0, 1100.0),
        }
    }

    #[test]
    fn equivalences_from_volume_counts_whole_units() {
        let eq = Equivalences::from_volume(76000.0, 1100.0);

        assert_eq!(
            eq,
            Equivalences {
                tanks_full: 69,
                showers: 1266,
                wash_loads: 1520,
            }
        );
    }

    #[test]
    fn saved_harvest_serializes_as_a_flat_record() {
        let saved_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let saved = SavedHarvest::new(sample_result(), saved_at);

        let value = serde_json::to_value(&saved).unwrap();

        assert_eq!(value["volume_l"], 76000.0);
        assert_eq!(value["tanks_full"], 69);
        assert_eq!(value["wash_loads"], 1520);
        assert_eq!(value["has_roi"], true);
        assert_eq!(value["saved_at"], "2025-06-01T12:00:00Z");
    }

    #[test]
    fn saved_harvest_survives_json_round_trip() {
        let saved_at = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
        let saved = SavedHarvest::new(sample_result(), saved_at);

        let json = serde_json::to_string(&saved).unwrap();
        let restored: SavedHarvest = serde_json::from_str(&json).unwrap();

        assert_eq!(restored, saved);
    }
}
