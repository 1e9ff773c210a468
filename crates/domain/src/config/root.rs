use serde::{Deserialize, Serialize};
use std::path::Path;

use super::errors::ConfigError;
use super::hosts::HostsConfig;
use super::logging::LoggingConfig;

const LOCAL_CONFIG_PATH: &str = "ferrous-hosts.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/ferrous-hosts/config.toml";

/// Main configuration structure for Ferrous Hosts
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Hosts sources and watcher tuning
    #[serde(default)]
    pub hosts: HostsConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ferrous-hosts.toml in current directory
    /// 3. /etc/ferrous-hosts/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if Path::new(LOCAL_CONFIG_PATH).exists() {
            Self::from_file(LOCAL_CONFIG_PATH)?
        } else if Path::new(SYSTEM_CONFIG_PATH).exists() {
            Self::from_file(SYSTEM_CONFIG_PATH)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(paths) = overrides.hosts_paths {
            if !paths.is_empty() {
                self.hosts.paths = paths;
            }
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.hosts.enabled {
            return Ok(());
        }

        if self.hosts.paths.is_empty() {
            return Err(ConfigError::Validation(
                "Hosts resolution is enabled but no paths are configured".to_string(),
            ));
        }

        if self.hosts.paths.iter().any(|p| p.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "Hosts path cannot be empty".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub hosts_paths: Option<Vec<String>>,
    pub log_level: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();

        assert!(config.hosts.enabled);
        assert_eq!(config.hosts.paths.len(), 1);
        assert_eq!(config.hosts.debounce_ms, 50);
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config = Config::from_toml(
            r#"
            [hosts]
            paths = ["/tmp/a.hosts", "/tmp/hosts.d"]
        "#,
        )
        .unwrap();

        assert_eq!(config.hosts.paths, vec!["/tmp/a.hosts", "/tmp/hosts.d"]);
        assert!(config.hosts.enabled);
        assert_eq!(config.hosts.debounce_ms, 50);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_load_applies_cli_overrides() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[hosts]\npaths = [\"/etc/hosts\"]\n[logging]\nlevel = \"warn\"").unwrap();
        file.flush().unwrap();

        let config = Config::load(
            file.path().to_str(),
            CliOverrides {
                hosts_paths: Some(vec!["/srv/hosts".to_string()]),
                log_level: Some("debug".to_string()),
            },
        )
        .unwrap();

        assert_eq!(config.hosts.paths, vec!["/srv/hosts"]);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_empty_override_keeps_file_paths() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[hosts]\npaths = [\"/etc/hosts\"]").unwrap();
        file.flush().unwrap();

        let config = Config::load(
            file.path().to_str(),
            CliOverrides {
                hosts_paths: Some(vec![]),
                log_level: None,
            },
        )
        .unwrap();

        assert_eq!(config.hosts.paths, vec!["/etc/hosts"]);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let result = Config::load(Some("/nonexistent/ferrous-hosts.toml"), CliOverrides::default());
        assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
    }

    #[test]
    fn test_invalid_toml_fails() {
        let result = Config::from_toml("[hosts\npaths = 1");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_rejects_missing_paths() {
        let mut config = Config::default();
        config.hosts.paths.clear();
        assert!(config.validate().is_err());

        config.hosts.paths.push("   ".to_string());
        assert!(config.validate().is_err());

        config.hosts.enabled = false;
        assert!(config.validate().is_ok());
    }
}
