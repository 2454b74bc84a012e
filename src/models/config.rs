use crate::models::locale::Locale;
use crate::models::session_state::{DEFAULT_SECTION, MAX_LOG_ENTRIES};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Validation failures for [`AppConfig`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("session.log_capacity must be at least 1")]
    ZeroLogCapacity,

    #[error("session.initial_section must not be empty")]
    EmptyInitialSection,

    #[error("transition.frame_interval_ms must be at least 1")]
    ZeroFrameInterval,

    #[error("logging.prefix must not be empty")]
    EmptyLogPrefix,
}

/// Application configuration from `portfolio.yaml`
///
/// Every section and field has a default, so an empty or missing file yields
/// a working configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub locale: LocaleSettings,
    pub session: SessionSettings,
    pub transition: TransitionSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocaleSettings {
    /// Locale active at startup
    pub default: Locale,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionSettings {
    pub enable_3d: bool,
    pub initial_section: String,
    pub log_capacity: usize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            enable_3d: true,
            initial_section: DEFAULT_SECTION.to_string(),
            log_capacity: MAX_LOG_ENTRIES,
        }
    }
}

/// Timing of the direction-change fade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransitionSettings {
    pub fade_out_ms: u64,
    pub fade_in_ms: u64,
    pub frame_interval_ms: u64,
}

impl Default for TransitionSettings {
    fn default() -> Self {
        Self {
            fade_out_ms: 200,
            fade_in_ms: 300,
            frame_interval_ms: 16,
        }
    }
}

impl TransitionSettings {
    pub fn fade_out(&self) -> Duration {
        Duration::from_millis(self.fade_out_ms)
    }

    pub fn fade_in(&self) -> Duration {
        Duration::from_millis(self.fade_in_ms)
    }

    pub fn frame_interval(&self) -> Duration {
        Duration::from_millis(self.frame_interval_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub dir: String,
    pub prefix: String,
    pub debug: bool,
    pub console: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            dir: "logs".to_string(),
            prefix: "portfolio".to_string(),
            debug: false,
            console: true,
        }
    }
}

impl AppConfig {
    /// Check the invariants that serde cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.session.log_capacity == 0 {
            return Err(ConfigError::ZeroLogCapacity);
        }
        if self.session.initial_section.trim().is_empty() {
            return Err(ConfigError::EmptyInitialSection);
        }
        if self.transition.frame_interval_ms == 0 {
            return Err(ConfigError::ZeroFrameInterval);
        }
        if self.logging.prefix.trim().is_empty() {
            return Err(ConfigError::EmptyLogPrefix);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.locale.default, Locale::En);
        assert_eq!(config.session.log_capacity, 50);
        assert_eq!(config.transition.fade_out(), Duration::from_millis(200));
        assert_eq!(config.transition.fade_in(), Duration::from_millis(300));
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let yaml = "locale:\n  default: ar\nsession:\n  enable_3d: false\n";
        let config: AppConfig = serde_yaml_ng::from_str(yaml).unwrap();

        assert_eq!(config.locale.default, Locale::Ar);
        assert!(!config.session.enable_3d);
        assert_eq!(config.session.initial_section, "main");
        assert_eq!(config.transition.frame_interval_ms, 16);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.session.log_capacity = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroLogCapacity));

        let mut config = AppConfig::default();
        config.session.initial_section = "  ".to_string();
        assert_eq!(config.validate(), Err(ConfigError::EmptyInitialSection));

        let mut config = AppConfig::default();
        config.transition.frame_interval_ms = 0;
        assert_eq!(config.validate(), Err(ConfigError::ZeroFrameInterval));

        let mut config = AppConfig::default();
        config.logging.prefix = String::new();
        assert_eq!(config.validate(), Err(ConfigError::EmptyLogPrefix));
    }
}
