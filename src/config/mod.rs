use crate::models::AppConfig;
use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use std::fs;

/// File name of the application configuration inside the config directory
pub const CONFIG_FILE_NAME: &str = "portfolio.yaml";

/// Prefix of environment variables that override file settings
/// (`PORTFOLIO__SESSION__ENABLE_3D=false`)
pub const ENV_PREFIX: &str = "PORTFOLIO";

/// Configuration manager for loading and saving `portfolio.yaml`.
///
/// Settings are layered: built-in defaults, then the YAML file (optional),
/// then `PORTFOLIO__*` environment variables.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config_dir: Utf8PathBuf,
    config_path: Utf8PathBuf,
}

impl ConfigManager {
    /// Create a new ConfigManager with the specified configuration directory.
    ///
    /// # Arguments
    /// * `config_dir` - Directory containing configuration files (e.g., "Portfolio Data")
    pub fn new<P: AsRef<Utf8Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref().to_path_buf();

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {}", config_dir))?;
        }

        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE_NAME),
            config_dir,
        })
    }

    /// Load the configuration, including environment overrides.
    ///
    /// # Returns
    /// The merged, validated AppConfig; defaults if the file doesn't exist
    pub fn load(&self) -> Result<AppConfig> {
        self.load_layers(true)
    }

    /// Load the configuration from the file only
    pub fn load_file_only(&self) -> Result<AppConfig> {
        self.load_layers(false)
    }

    fn load_layers(&self, with_env: bool) -> Result<AppConfig> {
        if !self.config_path.exists() {
            tracing::warn!(
                "Config file not found at {}, using defaults",
                self.config_path
            );
        }

        let mut builder = config::Config::builder().add_source(
            config::File::new(self.config_path.as_str(), config::FileFormat::Yaml).required(false),
        );
        if with_env {
            builder = builder.add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );
        }

        let config: AppConfig = builder
            .build()
            .with_context(|| format!("Failed to read config: {}", self.config_path))?
            .try_deserialize()
            .with_context(|| format!("Failed to parse config: {}", self.config_path))?;

        config
            .validate()
            .with_context(|| format!("Invalid config: {}", self.config_path))?;

        tracing::info!("Loaded config from {}", self.config_path);
        Ok(config)
    }

    /// Save the configuration file.
    pub fn save(&self, config: &AppConfig) -> Result<()> {
        let yaml_string =
            serde_yaml_ng::to_string(config).context("Failed to serialize config to YAML")?;

        fs::write(&self.config_path, yaml_string)
            .with_context(|| format!("Failed to write config: {}", self.config_path))?;

        tracing::info!("Saved config to {}", self.config_path);
        Ok(())
    }

    /// Get the configuration directory path.
    pub fn config_dir(&self) -> &Utf8Path {
        &self.config_dir
    }

    pub fn config_path(&self) -> &Utf8Path {
        &self.config_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Locale;
    use tempfile::TempDir;

    fn create_test_config_manager() -> (ConfigManager, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let config_path = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
        let manager = ConfigManager::new(&config_path).unwrap();
        (manager, temp_dir)
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let (manager, _temp_dir) = create_test_config_manager();
        let config = manager.load_file_only().unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let (manager, _temp_dir) = create_test_config_manager();

        let mut config = AppConfig::default();
        config.locale.default = Locale::Fr;
        config.session.initial_section = "projects".to_string();
        manager.save(&config).unwrap();

        let loaded = manager.load_file_only().unwrap();
        assert_eq!(loaded.locale.default, Locale::Fr);
        assert_eq!(loaded.session.initial_section, "projects");
    }

    #[test]
    fn test_creates_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let nested = Utf8PathBuf::try_from(temp_dir.path().join("a").join("b")).unwrap();

        let manager = ConfigManager::new(&nested).unwrap();
        assert!(manager.config_dir().exists());
        assert_eq!(manager.config_path(), nested.join("portfolio.yaml"));
    }
}
