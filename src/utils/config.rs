//! Mission configuration loaded from TOML
//!
//! Every field has a default, so a file only needs to name what it changes:
//!
//! ```toml
//! default_altitude = 80
//! command_delay_ms = 0
//!
//! [safety]
//! battery_threshold = 30
//! ```

use std::fs::read_to_string;
use std::path::Path;
use std::time::Duration;

use log::info;
use serde::Deserialize;

use crate::common::{MissionResult, Waypoint};
use crate::mission_planning::safety::SafetyLimits;
use crate::mission_planning::search_pattern::DEFAULT_ALTITUDE;
use crate::mission_planning::survey::DEFAULT_SURVEY_SPACING;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MissionConfig {
    /// Altitude of generated search patterns [cm]
    pub default_altitude: i32,
    /// Distance between survey lines [cm]
    pub survey_spacing: i32,
    /// Pause after each drone command [ms]
    pub command_delay_ms: u64,
    /// How long the operator has to choose an emergency action [ms]
    pub emergency_timeout_ms: u64,
    /// Position returned to between deliveries and on `ReturnHome`
    pub home: Waypoint,
    pub safety: SafetyLimits,
}

impl Default for MissionConfig {
    fn default() -> Self {
        Self {
            default_altitude: DEFAULT_ALTITUDE,
            survey_spacing: DEFAULT_SURVEY_SPACING,
            command_delay_ms: 2000,
            emergency_timeout_ms: 5000,
            home: Waypoint::new(0, 0, 50),
            safety: SafetyLimits::default(),
        }
    }
}

impl MissionConfig {
    pub fn from_toml_str(s: &str) -> MissionResult<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn command_delay(&self) -> Duration {
        Duration::from_millis(self.command_delay_ms)
    }

    pub fn emergency_timeout(&self) -> Duration {
        Duration::from_millis(self.emergency_timeout_ms)
    }
}

/// Load a mission configuration file
pub fn load<P: AsRef<Path>>(path: P) -> MissionResult<MissionConfig> {
    let path = path.as_ref();
    let config = MissionConfig::from_toml_str(&read_to_string(path)?)?;
    info!("Loaded mission configuration from {:?}", path);
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::MissionError;

    #[test]
    fn test_empty_config_is_default() {
        let config = MissionConfig::from_toml_str("").unwrap();
        assert_eq!(config, MissionConfig::default());
        assert_eq!(config.command_delay(), Duration::from_secs(2));
    }

    #[test]
    fn test_partial_config() {
        let config = MissionConfig::from_toml_str(
            r#"
            default_altitude = 80
            command_delay_ms = 0
            home = { x = 10, y = -10, z = 60 }

            [safety]
            battery_threshold = 30
            "#,
        )
        .unwrap();

        assert_eq!(config.default_altitude, 80);
        assert_eq!(config.command_delay(), Duration::from_millis(0));
        assert_eq!(config.home, Waypoint::new(10, -10, 60));
        assert_eq!(config.safety.battery_threshold, 30);
        assert_eq!(config.safety.coordinate_limit, 500);
        assert_eq!(config.survey_spacing, 50);
    }

    #[test]
    fn test_bad_config() {
        let result = MissionConfig::from_toml_str("default_altitude = \"high\"");
        assert!(matches!(result, Err(MissionError::ConfigError(_))));
    }

    #[test]
    fn test_missing_file() {
        let result = load("does/not/exist.toml");
        assert!(matches!(result, Err(MissionError::IoError(_))));
    }
}
