//! Configuration management for Sleuth.
//!
//! Provides TOML-based configuration with XDG-compliant paths and
//! environment variable overrides. Credentials are deliberately absent from
//! this file; see [`Credentials`](crate::credential::Credentials).

use crate::error::{ConfigError, ConfigResult};
use crate::types::Radio;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main application configuration.
///
/// This is loaded from `~/.config/sleuth/config.toml` (or platform equivalent).
/// If the file doesn't exist, default values are used.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Outbound HTTP settings
    pub http: HttpConfig,
    /// Provider endpoint overrides
    pub providers: ProviderEndpoints,
    /// Cell-tower lookup settings
    pub cell: CellConfig,
    /// Input limits
    pub limits: LimitsConfig,
}

impl AppConfig {
    /// Load configuration from disk, falling back to defaults if not found.
    ///
    /// # Errors
    /// Returns error if:
    /// - Config directory cannot be determined
    /// - File exists but cannot be read
    /// - File contents are not valid TOML
    pub fn load() -> ConfigResult<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from an explicit path, falling back to defaults if absent.
    pub fn load_from(path: &Path) -> ConfigResult<Self> {
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            let contents = fs::read_to_string(path)?;
            let config: Self = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            tracing::debug!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load configuration with environment variable overrides.
    ///
    /// Supports the following environment variables:
    /// - `SLEUTH_HTTP_TIMEOUT_SECS`: Override request timeout
    /// - `SLEUTH_CELL_BACKEND`: `opencellid` or `unwiredlabs`
    /// - `SLEUTH_DEFAULT_MCC`: Override the mobile country code used when none is given
    pub fn load_with_env() -> ConfigResult<Self> {
        let mut config = Self::load()?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Apply `SLEUTH_*` environment overrides in place.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("SLEUTH_HTTP_TIMEOUT_SECS") {
            if let Ok(secs) = val.parse() {
                self.http.timeout_secs = secs;
                tracing::debug!("Override http.timeout_secs from env: {}", secs);
            }
        }

        if let Ok(val) = std::env::var("SLEUTH_CELL_BACKEND") {
            match val.trim().to_ascii_lowercase().as_str() {
                "opencellid" => self.cell.backend = CellBackendKind::OpenCellId,
                "unwiredlabs" => self.cell.backend = CellBackendKind::UnwiredLabs,
                other => tracing::warn!("Ignoring unknown SLEUTH_CELL_BACKEND '{}'", other),
            }
        }

        if let Ok(val) = std::env::var("SLEUTH_DEFAULT_MCC") {
            self.cell.default_mcc = val.trim().to_string();
            tracing::debug!("Override cell.default_mcc from env: {}", self.cell.default_mcc);
        }
    }

    /// Check values that TOML typing alone cannot enforce.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.timeout_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        let mcc = &self.cell.default_mcc;
        if mcc.len() != 3 || !mcc.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ConfigError::InvalidValue {
                field: "cell.default_mcc".to_string(),
                reason: format!("must be exactly three digits, got '{mcc}'"),
            });
        }

        if self.limits.max_image_bytes == 0 {
            return Err(ConfigError::InvalidValue {
                field: "limits.max_image_bytes".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }

        Ok(())
    }

    /// Save configuration to disk.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> ConfigResult<()> {
        let config_path = Self::config_path()?;
        let config_dir = config_path
            .parent()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "config_path".to_string(),
                reason: "no parent directory".to_string(),
            })?;

        fs::create_dir_all(config_dir)?;
        tracing::debug!("Saving config to {}", config_path.display());

        let contents = toml::to_string_pretty(self)?;
        fs::write(config_path, contents)?;
        Ok(())
    }

    /// Get the path to the configuration file.
    ///
    /// Uses XDG base directories: `~/.config/sleuth/config.toml`
    pub fn config_path() -> ConfigResult<PathBuf> {
        let dirs = ProjectDirs::from("com", "sleuth", "sleuth").ok_or(ConfigError::NoConfigDir)?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

/// Outbound HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Transport-level timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Sleuth/0.1.0 (+https://github.com/sleuth-osint/sleuth)".to_string(),
        }
    }
}

/// Provider endpoints. Overridable for self-hosted mirrors and tests.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderEndpoints {
    /// `FaceCheck` API base URL
    pub facecheck_url: String,
    /// `PeopleDataLabs` API base URL
    pub people_data_labs_url: String,
    /// `RapidAPI` host for caller-ID lookups
    pub caller_id_host: String,
    /// `RapidAPI` host for visual matches
    pub visual_match_host: String,
    /// `OpenCellID` API base URL
    pub opencellid_url: String,
    /// Unwired Labs API base URL
    pub unwiredlabs_url: String,
}

impl Default for ProviderEndpoints {
    fn default() -> Self {
        Self {
            facecheck_url: "https://facecheck.id".to_string(),
            people_data_labs_url: "https://api.peopledatalabs.com".to_string(),
            caller_id_host: "eyecon.p.rapidapi.com".to_string(),
            visual_match_host: "real-time-lens-data.p.rapidapi.com".to_string(),
            opencellid_url: "https://opencellid.org".to_string(),
            unwiredlabs_url: "https://us1.unwiredlabs.com".to_string(),
        }
    }
}

/// Which geolocation provider backs the cell lookup tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellBackendKind {
    /// opencellid.org
    #[default]
    #[serde(rename = "opencellid")]
    OpenCellId,
    /// unwiredlabs.com
    #[serde(rename = "unwiredlabs")]
    UnwiredLabs,
}

/// Cell-tower lookup settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CellConfig {
    /// MCC used when the request omits one
    pub default_mcc: String,
    /// Radio type used when the request omits one
    pub default_radio: Radio,
    /// Geolocation backend
    pub backend: CellBackendKind,
}

impl Default for CellConfig {
    fn default() -> Self {
        Self {
            default_mcc: "470".to_string(),
            default_radio: Radio::Gsm,
            backend: CellBackendKind::OpenCellId,
        }
    }
}

/// Input limits enforced by the validator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest decoded image accepted for upload
    pub max_image_bytes: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_image_bytes: 8 * 1024 * 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.cell.default_mcc, "470");
        assert_eq!(config.cell.backend, CellBackendKind::OpenCellId);
        assert_eq!(config.limits.max_image_bytes, 8 * 1024 * 1024);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string_pretty(&config).expect("serialize default config");
        assert!(toml_str.contains("[http]"));
        assert!(toml_str.contains("[providers]"));
        assert!(toml_str.contains("[cell]"));
        assert!(toml_str.contains("backend = \"opencellid\""));

        let parsed: AppConfig = toml::from_str(&toml_str).expect("parse serialized config");
        assert_eq!(parsed.cell.default_mcc, config.cell.default_mcc);
    }

    #[test]
    fn test_load_from_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let config_path = tmp.path().join("config.toml");

        let mut config = AppConfig::default();
        config.cell.backend = CellBackendKind::UnwiredLabs;
        config.cell.default_radio = Radio::Lte;
        config.http.timeout_secs = 10;

        let contents = toml::to_string_pretty(&config).expect("serialize config");
        fs::write(&config_path, contents).expect("write config file");

        let loaded = AppConfig::load_from(&config_path).expect("load config");
        assert_eq!(loaded.cell.backend, CellBackendKind::UnwiredLabs);
        assert_eq!(loaded.cell.default_radio, Radio::Lte);
        assert_eq!(loaded.http.timeout_secs, 10);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let tmp = TempDir::new().expect("create temp dir");
        let loaded = AppConfig::load_from(&tmp.path().join("absent.toml")).expect("load config");
        assert_eq!(loaded.cell.default_mcc, "470");
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[cell]
default_mcc = "310"

[providers]
opencellid_url = "http://localhost:8080"
"#;

        let config: AppConfig = toml::from_str(toml_str).expect("parse partial config");
        assert_eq!(config.cell.default_mcc, "310");
        assert_eq!(config.providers.opencellid_url, "http://localhost:8080");
        // These should be defaults
        assert_eq!(config.http.timeout_secs, 30);
        assert_eq!(config.providers.caller_id_host, "eyecon.p.rapidapi.com");
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = AppConfig::default();
        config.cell.default_mcc = "47".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { ref field, .. }) if field == "cell.default_mcc"
        ));

        let mut config = AppConfig::default();
        config.http.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_env_overrides() {
        std::env::set_var("SLEUTH_HTTP_TIMEOUT_SECS", "12");
        std::env::set_var("SLEUTH_CELL_BACKEND", "unwiredlabs");
        std::env::set_var("SLEUTH_DEFAULT_MCC", "310");

        let mut config = AppConfig::default();
        config.apply_env_overrides();
        assert_eq!(config.http.timeout_secs, 12);
        assert_eq!(config.cell.backend, CellBackendKind::UnwiredLabs);
        assert_eq!(config.cell.default_mcc, "310");

        std::env::remove_var("SLEUTH_HTTP_TIMEOUT_SECS");
        std::env::remove_var("SLEUTH_CELL_BACKEND");
        std::env::remove_var("SLEUTH_DEFAULT_MCC");
    }
}
