//! Fixed catalogue of rainfall monitoring locations shown on the map.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MapType {
    Roadmap,
    Satellite,
    Terrain,
}

impl MapType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Roadmap => "roadmap",
            Self::Satellite => "satellite",
            Self::Terrain => "terrain",
        }
    }
}

/// Map setup passed to the surface when the map is created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapOptions {
    pub center: LatLng,
    pub zoom: u8,
    pub map_type: MapType,
}

pub const MAP_OPTIONS: MapOptions = MapOptions {
    center: LatLng {
        lat: 19.266,
        lng: -99.76,
    },
    zoom: 12,
    map_type: MapType::Terrain,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapLocation {
    pub position: LatLng,
    pub title: &'static str,
    /// Status lines shown in the popup, one per line break.
    pub info: &'static [&'static str],
}

impl MapLocation {
    /// Popup markup for this location.
    pub fn info_html(&self) -> String {
        format!(
            r#"<div style="font-size:14px;"><strong>{}</strong><br>{}</div>"#,
            self.title,
            self.info.join("<br>")
        )
    }
}

pub const LOCATIONS: [MapLocation; 5] = [
    MapLocation {
        position: LatLng {
            lat: 19.274528,
            lng: -99.774278,
        },
        title: "San Antonio Acahualco",
        info: &[
            "Light rain 🌧️",
            "Feels like: 17°",
            "Precipitation: 50% (0.3 mm)",
            "Condition: In drought.",
        ],
    },
    MapLocation {
        position: LatLng {
            lat: 19.292056,
            lng: -99.768167,
        },
        title: "San Francisco Tlalcilalcalpan",
        info: &[
            "Precipitation: 7.4 mm ☔",
            "Probability: 80%",
            "Condition: In drought.",
        ],
    },
    MapLocation {
        position: LatLng {
            lat: 19.27925,
            lng: -99.731667,
        },
        title: "San Miguel Zinacantepec",
        info: &[
            "Light rain 🌦️",
            "Feels like: 16°",
            "Precipitation: 60% (0.4 mm)",
            "Condition: In drought.",
        ],
    },
    MapLocation {
        position: LatLng {
            lat: 19.240944,
            lng: -99.760389,
        },
        title: "San Juan de las Huertas",
        info: &[
            "Light rain 🌧️",
            "Feels like: 15°",
            "Precipitation: 70% (1.1 mm)",
            "Condition: In drought.",
        ],
    },
    MapLocation {
        position: LatLng {
            lat: 19.265694,
            lng: -99.758056,
        },
        title: "Colonia Ricardo Flores Magón",
        info: &[
            "Chance of rain: 60% ☁️",
            "Precipitation: 5.6 mm",
            "Condition: In drought.",
        ],
    },
];
