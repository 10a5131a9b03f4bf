//! TOML-based configuration for the seafood manager.
//!
//! Reads `AppConfig` from the platform-appropriate config file:
//! - Windows:  `%APPDATA%\SeafoodMan\config.toml`
//! - Linux:    `~/.config/seafoodman/config.toml`
//! - macOS:    `~/Library/Application Support/SeafoodMan/config.toml`
//!
//! # What is TOML? (for beginners)
//!
//! TOML (Tom's Obvious Minimal Language) is a configuration file format designed
//! to be easy to read and write.  Example:
//!
//! ```toml
//! [general]
//! log_level = "debug"
//!
//! [storage]
//! snapshot_path = "/var/lib/seafoodman/records.toml"
//!
//! [identifiers]
//! customer_prefix = "K"
//! ```
//!
//! # Serde default values
//!
//! Every section and field has a default, so a missing file, a missing
//! section or a missing key all behave like first run.  Identifier prefixes
//! are fixed once the allocators are built at startup.

use std::path::{Path, PathBuf};

use seafood_core::IdPrefixes;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// An identifier prefix is not a single uppercase ASCII letter.
    #[error("identifiers.{field} must be a single uppercase letter, got {value:?}")]
    InvalidPrefix { field: &'static str, value: String },
}

// ── Config schema types ───────────────────────────────────────────────────────

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub identifiers: IdentifierConfig,
}

/// General behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneralConfig {
    /// Schema version string – bump when breaking changes are introduced.
    #[serde(default = "default_version")]
    pub version: String,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Where stored records live.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorageConfig {
    /// Snapshot file to load at startup.  Nothing is loaded when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snapshot_path: Option<PathBuf>,
}

/// Prefix letters of the text identifiers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IdentifierConfig {
    #[serde(default = "default_customer_prefix")]
    pub customer_prefix: String,
    #[serde(default = "default_seafood_prefix")]
    pub seafood_prefix: String,
    #[serde(default = "default_bill_prefix")]
    pub bill_prefix: String,
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
}

impl IdentifierConfig {
    /// Validates the configured letters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidPrefix`] for any value that is not exactly
    /// one uppercase ASCII letter.
    pub fn prefixes(&self) -> Result<IdPrefixes, ConfigError> {
        Ok(IdPrefixes {
            customer: single_letter("customer_prefix", &self.customer_prefix)?,
            seafood: single_letter("seafood_prefix", &self.seafood_prefix)?,
            bill: single_letter("bill_prefix", &self.bill_prefix)?,
            table: single_letter("table_prefix", &self.table_prefix)?,
        })
    }
}

fn single_letter(field: &'static str, value: &str) -> Result<char, ConfigError> {
    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_uppercase() => Ok(c),
        _ => Err(ConfigError::InvalidPrefix {
            field,
            value: value.to_string(),
        }),
    }
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_version() -> String {
    "1.0".to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_customer_prefix() -> String {
    "C".to_string()
}
fn default_seafood_prefix() -> String {
    "S".to_string()
}
fn default_bill_prefix() -> String {
    "B".to_string()
}
fn default_table_prefix() -> String {
    "T".to_string()
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            log_level: default_log_level(),
        }
    }
}

impl Default for IdentifierConfig {
    fn default() -> Self {
        Self {
            customer_prefix: default_customer_prefix(),
            seafood_prefix: default_seafood_prefix(),
            bill_prefix: default_bill_prefix(),
            table_prefix: default_table_prefix(),
        }
    }
}

// ── Config repository ─────────────────────────────────────────────────────────

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot be
/// determined.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    let dir = platform_config_dir().ok_or(ConfigError::NoPlatformConfigDir)?;
    Ok(dir.join("config.toml"))
}

/// Loads `AppConfig` from the platform config file, returning
/// `AppConfig::default()` if the file does not yet exist.
///
/// # Errors
///
/// See [`load_config_from`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_file_path()?)
}

/// Loads `AppConfig` from `path`, returning `AppConfig::default()` if the
/// file does not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found",
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => {
            let cfg: AppConfig = toml::from_str(&content)?;
            Ok(cfg)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(AppConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Resolves the platform config base directory including the `SeafoodMan`
/// subdirectory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        // %APPDATA% e.g. C:\Users\<user>\AppData\Roaming
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("SeafoodMan"))
    }

    #[cfg(target_os = "linux")]
    {
        // XDG_CONFIG_HOME or ~/.config
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("seafoodman"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME")
            .map(|h| PathBuf::from(h).join("Library").join("Application Support").join("SeafoodMan"))
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    // ── AppConfig defaults ────────────────────────────────────────────────────

    #[test]
    fn test_app_config_default_uses_standard_prefixes() {
        // Arrange / Act
        let prefixes = AppConfig::default().identifiers.prefixes().unwrap();

        // Assert
        assert_eq!(prefixes, IdPrefixes::default());
    }

    #[test]
    fn test_general_config_default_log_level_is_info() {
        let cfg = GeneralConfig::default();
        assert_eq!(cfg.log_level, "info");
        assert_eq!(cfg.version, "1.0");
    }

    #[test]
    fn test_storage_config_default_has_no_snapshot() {
        assert!(StorageConfig::default().snapshot_path.is_none());
    }

    // ── TOML parsing ──────────────────────────────────────────────────────────

    #[test]
    fn test_deserialize_empty_toml_uses_defaults() {
        let cfg: AppConfig = toml::from_str("").expect("deserialize empty");

        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_deserialize_partial_identifiers_overrides_defaults() {
        // Arrange
        let toml_str = r#"
[identifiers]
customer_prefix = "K"
"#;

        // Act
        let cfg: AppConfig = toml::from_str(toml_str).expect("deserialize partial");
        let prefixes = cfg.identifiers.prefixes().unwrap();

        // Assert
        assert_eq!(prefixes.customer, 'K');
        // Unspecified fields keep their defaults
        assert_eq!(prefixes.seafood, 'S');
    }

    #[test]
    fn test_app_config_serializes_and_deserializes_round_trip() {
        let mut cfg = AppConfig::default();
        cfg.general.log_level = "debug".to_string();
        cfg.storage.snapshot_path = Some(PathBuf::from("records.toml"));

        let toml_str = toml::to_string_pretty(&cfg).expect("serialize");
        let restored: AppConfig = toml::from_str(&toml_str).expect("deserialize");

        assert_eq!(cfg, restored);
    }

    // ── prefix validation ─────────────────────────────────────────────────────

    #[test]
    fn test_invalid_prefixes_are_rejected() {
        for bad in ["", "c", "CC", "1", "Č"] {
            let cfg = IdentifierConfig {
                bill_prefix: bad.to_string(),
                ..IdentifierConfig::default()
            };

            let result = cfg.prefixes();

            assert!(
                matches!(result, Err(ConfigError::InvalidPrefix { field: "bill_prefix", .. })),
                "{bad:?} must be rejected"
            );
        }
    }

    // ── load_config_from ──────────────────────────────────────────────────────

    #[test]
    fn test_load_config_from_returns_default_when_file_absent() {
        let path = PathBuf::from("/nonexistent/path/that/cannot/exist/config.toml");

        let cfg = load_config_from(&path).expect("absent file is first run");

        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_load_config_from_reads_temp_file() {
        // Arrange
        let dir = std::env::temp_dir().join(format!("seafoodman_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[general]\nlog_level = \"warn\"\n").unwrap();

        // Act
        let cfg = load_config_from(&path).unwrap();

        // Assert
        assert_eq!(cfg.general.log_level, "warn");
        assert_eq!(cfg.identifiers, IdentifierConfig::default());

        // Cleanup
        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_load_config_from_reports_parse_errors() {
        let dir = std::env::temp_dir().join(format!("seafoodman_test_{}", Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("config.toml");
        std::fs::write(&path, "[[[ not valid toml").unwrap();

        let result = load_config_from(&path);

        assert!(matches!(result, Err(ConfigError::Parse(_))));
        std::fs::remove_dir_all(&dir).ok();
    }

    // ── config path formation ─────────────────────────────────────────────────

    #[test]
    fn test_config_file_path_ends_with_config_toml() {
        if let Ok(path) = config_file_path() {
            assert!(
                path.ends_with("config.toml"),
                "config file must be named config.toml, got {path:?}"
            );
        }
        // NoPlatformConfigDir in a stripped CI env is also acceptable.
    }
}
