//! Application configuration loaded from a TOML file.
//!
//! Every field has a default, so a missing file, an empty file and a file
//! that sets only a few keys are all valid.
//!
//! ```toml
//! [storage]
//! backend = "file"
//! location = ".rain-harvest"
//!
//! [timing]
//! debounce_ms = 500
//!
//! [share]
//! page_url = "https://example.org/calculator"
//!
//! [logging]
//! level = "debug"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use rain_core::calculations::{
    CO2_KG_PER_LITER, DEFAULT_TANK_CAPACITY_L, FALLBACK_COEFFICIENT, HarvestConfig,
    HarvestConfigError,
};
use rain_core::share::ShareContacts;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// File looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "rain-harvest.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error(transparent)]
    Calculation(#[from] HarvestConfigError),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub storage: StorageSection,
    pub timing: TimingSection,
    pub share: ShareSection,
    pub calculation: CalculationSection,
    pub logging: LoggingSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSection {
    /// Backend name, `file` or `memory`.
    pub backend: String,
    /// Backend-specific location, a directory for `file`.
    pub location: String,
}

impl Default for StorageSection {
    fn default() -> Self {
        Self {
            backend: "file".to_string(),
            location: rain_store::DEFAULT_STORE_DIR.to_string(),
        }
    }
}

/// Delays, all in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingSection {
    pub debounce_ms: u64,
    pub busy_delay_ms: u64,
    pub share_feedback_ms: u64,
    pub contact_send_ms: u64,
}

impl Default for TimingSection {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            busy_delay_ms: 220,
            share_feedback_ms: 3000,
            contact_send_ms: 900,
        }
    }
}

impl TimingSection {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    pub fn busy_delay(&self) -> Duration {
        Duration::from_millis(self.busy_delay_ms)
    }

    pub fn share_feedback(&self) -> Duration {
        Duration::from_millis(self.share_feedback_ms)
    }

    pub fn contact_send(&self) -> Duration {
        Duration::from_millis(self.contact_send_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShareSection {
    /// Address of the calculator page, passed to the Facebook and X links.
    pub page_url: String,
    #[serde(flatten)]
    pub contacts: ShareContacts,
}

impl Default for ShareSection {
    fn default() -> Self {
        Self {
            page_url: "https://example.org/rain-harvest".to_string(),
            contacts: ShareContacts::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculationSection {
    pub default_tank_capacity_l: f64,
    pub co2_kg_per_liter: f64,
    pub fallback_coefficient: f64,
}

impl Default for CalculationSection {
    fn default() -> Self {
        Self {
            default_tank_capacity_l: DEFAULT_TANK_CAPACITY_L,
            co2_kg_per_liter: CO2_KG_PER_LITER,
            fallback_coefficient: FALLBACK_COEFFICIENT,
        }
    }
}

impl CalculationSection {
    pub fn harvest_config(&self) -> HarvestConfig {
        HarvestConfig {
            default_tank_capacity_l: self.default_tank_capacity_l,
            co2_kg_per_liter: self.co2_kg_per_liter,
            fallback_coefficient: self.fallback_coefficient,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins when set.
    pub level: String,
    /// Log file, appended to in addition to stderr.
    pub file: Option<PathBuf>,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}

impl AppConfig {
    /// Parses configuration text and validates the calculation constants.
    pub fn from_toml_str(
        text: &str,
        path: &Path,
    ) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.calculation.harvest_config().validate()?;
        Ok(config)
    }

    /// Loads `path`, or [`DEFAULT_CONFIG_FILE`] when `path` is `None`.
    ///
    /// An explicit path must exist; the default file may be absent, in
    /// which case the defaults are returned.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => Self::from_toml_str(&text, &path),
            Err(e) if !required && e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(source) => Err(ConfigError::Read { path, source }),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn parse(text: &str) -> Result<AppConfig, ConfigError> {
        AppConfig::from_toml_str(text, Path::new("test.toml"))
    }

    #[test]
    fn empty_file_yields_defaults() {
        assert_eq!(parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn default_timings_match_the_page() {
        let timing = TimingSection::default();

        assert_eq!(timing.debounce(), Duration::from_millis(500));
        assert_eq!(timing.busy_delay(), Duration::from_millis(220));
        assert_eq!(timing.share_feedback(), Duration::from_secs(3));
        assert_eq!(timing.contact_send(), Duration::from_millis(900));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = parse(
            r#"
            [storage]
            backend = "memory"

            [timing]
            debounce_ms = 250

            [share]
            whatsapp = "+1 555 0100"
            "#,
        )
        .unwrap();

        assert_eq!(config.storage.backend, "memory");
        assert_eq!(config.storage.location, rain_store::DEFAULT_STORE_DIR);
        assert_eq!(config.timing.debounce_ms, 250);
        assert_eq!(config.timing.busy_delay_ms, 220);
        assert_eq!(config.share.contacts.whatsapp, "+1 555 0100");
        assert_eq!(
            config.share.contacts.facebook,
            ShareContacts::default().facebook
        );
    }

    #[test]
    fn invalid_calculation_constants_are_rejected() {
        let result = parse(
            r#"
            [calculation]
            default_tank_capacity_l = 0.0
            "#,
        );

        assert!(matches!(
            result,
            Err(ConfigError::Calculation(HarvestConfigError::InvalidTankCapacity(_)))
        ));
    }

    #[test]
    fn malformed_toml_names_the_file() {
        let err = parse("[storage\nbackend = 1").unwrap_err();

        assert!(err.to_string().contains("test.toml"));
    }

    #[test]
    fn explicit_missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");

        assert!(matches!(
            AppConfig::load(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));
    }

    #[test]
    fn load_reads_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rain.toml");
        std::fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();

        let config = AppConfig::load(Some(&path)).unwrap();

        assert_eq!(config.logging.level, "debug");
    }
}
