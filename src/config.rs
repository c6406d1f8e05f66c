//! # Monitor Configuration
//!
//! Tunables for staleness detection, zone thresholds, gateway probing,
//! and alert policy. Defaults mirror [`crate::constants`]; values can be
//! layered from a YAML file and `FLEETBOARD_`-prefixed environment
//! variables.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::constants;
use crate::error::{FleetboardError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// Minutes an unassigned job may wait before it is flagged stale.
    pub stale_after_minutes: i64,
    /// Ratio at or above which the zone is red.
    pub red_zone_ratio: f64,
    /// Ratio at or above which the zone is yellow.
    pub yellow_zone_ratio: f64,
    /// Seconds before a gateway probe is treated as offline.
    pub probe_timeout_seconds: u64,
    /// Minutes a severe zone may persist before re-notifying.
    /// Zero disables re-notification entirely.
    pub renotify_after_minutes: i64,
    /// Whether an easing transition back to green sends a notification.
    pub alert_on_recovery: bool,
    /// How many recent jobs the snapshot enriches for display.
    pub recent_jobs_limit: u32,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            stale_after_minutes: constants::DEFAULT_STALE_AFTER_MINUTES,
            red_zone_ratio: constants::RED_ZONE_RATIO,
            yellow_zone_ratio: constants::YELLOW_ZONE_RATIO,
            probe_timeout_seconds: constants::DEFAULT_PROBE_TIMEOUT_SECONDS,
            renotify_after_minutes: constants::DEFAULT_RENOTIFY_AFTER_MINUTES,
            alert_on_recovery: false,
            recent_jobs_limit: constants::DEFAULT_RECENT_JOBS_LIMIT,
        }
    }
}

impl MonitorConfig {
    /// Load configuration from an optional YAML file layered with
    /// `FLEETBOARD_`-prefixed environment variables.
    pub fn load(config_path: Option<&str>) -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(path) = config_path {
            builder = builder.add_source(config::File::with_name(path));
        }

        let settings = builder
            .add_source(config::Environment::with_prefix("FLEETBOARD"))
            .build()
            .map_err(|e| FleetboardError::ConfigurationError(e.to_string()))?;

        Self::from_settings(&settings)
    }

    /// Apply loaded settings over the defaults.
    ///
    /// Unsigned tunables are converted with `try_from` so a negative
    /// value from file or env is rejected instead of wrapping into a
    /// huge positive one.
    fn from_settings(settings: &config::Config) -> Result<Self> {
        let mut loaded = Self::default();

        if let Ok(minutes) = settings.get_int("stale_after_minutes") {
            loaded.stale_after_minutes = minutes;
        }
        if let Ok(ratio) = settings.get_float("red_zone_ratio") {
            loaded.red_zone_ratio = ratio;
        }
        if let Ok(ratio) = settings.get_float("yellow_zone_ratio") {
            loaded.yellow_zone_ratio = ratio;
        }
        if let Ok(seconds) = settings.get_int("probe_timeout_seconds") {
            loaded.probe_timeout_seconds = u64::try_from(seconds).map_err(|_| {
                FleetboardError::ConfigurationError(format!(
                    "probe_timeout_seconds must be non-negative, got {seconds}"
                ))
            })?;
        }
        if let Ok(minutes) = settings.get_int("renotify_after_minutes") {
            loaded.renotify_after_minutes = minutes;
        }
        if let Ok(flag) = settings.get_bool("alert_on_recovery") {
            loaded.alert_on_recovery = flag;
        }
        if let Ok(limit) = settings.get_int("recent_jobs_limit") {
            loaded.recent_jobs_limit = u32::try_from(limit).map_err(|_| {
                FleetboardError::ConfigurationError(format!(
                    "recent_jobs_limit must fit an unsigned 32-bit value, got {limit}"
                ))
            })?;
        }

        loaded.validate()?;
        Ok(loaded)
    }

    /// Reject threshold combinations the classifier cannot honor.
    pub fn validate(&self) -> Result<()> {
        if self.stale_after_minutes <= 0 {
            return Err(FleetboardError::ConfigurationError(
                "stale_after_minutes must be positive".to_string(),
            ));
        }
        if self.yellow_zone_ratio <= 0.0 || self.red_zone_ratio <= 0.0 {
            return Err(FleetboardError::ConfigurationError(
                "zone ratios must be positive".to_string(),
            ));
        }
        if self.yellow_zone_ratio >= self.red_zone_ratio {
            return Err(FleetboardError::ConfigurationError(format!(
                "yellow_zone_ratio ({}) must be below red_zone_ratio ({})",
                self.yellow_zone_ratio, self.red_zone_ratio
            )));
        }
        if self.probe_timeout_seconds == 0 {
            return Err(FleetboardError::ConfigurationError(
                "probe_timeout_seconds must be positive".to_string(),
            ));
        }
        Ok(())
    }

    pub fn stale_after(&self) -> Duration {
        Duration::minutes(self.stale_after_minutes)
    }

    pub fn renotify_after(&self) -> Duration {
        Duration::minutes(self.renotify_after_minutes)
    }

    pub fn probe_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.probe_timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = MonitorConfig::default();
        assert_eq!(config.stale_after_minutes, 20);
        assert_eq!(config.yellow_zone_ratio, 3.0);
        assert_eq!(config.red_zone_ratio, 5.0);
        assert!(!config.alert_on_recovery);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_inverted_thresholds_rejected() {
        let config = MonitorConfig {
            yellow_zone_ratio: 6.0,
            ..MonitorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nonpositive_staleness_rejected() {
        let config = MonitorConfig {
            stale_after_minutes: 0,
            ..MonitorConfig::default()
        };
        assert!(config.validate().is_err());
    }

    fn settings_from_yaml(yaml: &str) -> config::Config {
        config::Config::builder()
            .add_source(config::File::from_str(yaml, config::FileFormat::Yaml))
            .build()
            .unwrap()
    }

    #[test]
    fn test_settings_layer_over_defaults() {
        let settings = settings_from_yaml(
            "stale_after_minutes: 45\n\
             alert_on_recovery: true\n\
             probe_timeout_seconds: 3\n",
        );
        let config = MonitorConfig::from_settings(&settings).unwrap();

        assert_eq!(config.stale_after_minutes, 45);
        assert!(config.alert_on_recovery);
        assert_eq!(config.probe_timeout_seconds, 3);
        // Untouched tunables keep their defaults
        assert_eq!(config.red_zone_ratio, 5.0);
    }

    #[test]
    fn test_negative_probe_timeout_rejected() {
        let settings = settings_from_yaml("probe_timeout_seconds: -5\n");
        let result = MonitorConfig::from_settings(&settings);
        assert!(matches!(
            result,
            Err(FleetboardError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_negative_recent_jobs_limit_rejected() {
        let settings = settings_from_yaml("recent_jobs_limit: -1\n");
        let result = MonitorConfig::from_settings(&settings);
        assert!(matches!(
            result,
            Err(FleetboardError::ConfigurationError(_))
        ));
    }
}
