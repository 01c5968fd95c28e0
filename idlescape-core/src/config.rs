//! Configuration for the Idlescape data layer.
//!
//! Maps directly to an `idlescape.toml` file; every section and key is
//! optional and falls back to the defaults below.

use serde::{Deserialize, Serialize};

/// Default location of the extracted Idlescape data documents.
pub const DEFAULT_URL_BASE: &str = "https://raw.githubusercontent.com/HighOnMikey/idlescape-extraction/main/data";

/// Top-level configuration, loadable from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataConfig {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Where the three documents are fetched from.
    #[serde(default)]
    pub source: SourceConfig,
    /// How documents are turned into collections.
    #[serde(default)]
    pub index: IndexConfig,
}

impl DataConfig {
    /// Load configuration from a TOML string.
    ///
    /// # Errors
    /// Returns `DataError::Config` if the TOML is invalid.
    pub fn from_toml(toml_str: &str) -> crate::error::Result<Self> {
        toml::from_str(toml_str).map_err(|e| crate::DataError::Config(e.to_string()))
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> crate::error::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }
}

// ---------------------------------------------------------------------------
// Sub-configs
// ---------------------------------------------------------------------------

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Remote document source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Base URL (or directory) the relative paths are joined onto.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Relative path of the enchantments document.
    #[serde(default = "default_enchantments_path")]
    pub enchantments_path: String,
    /// Relative path of the items document.
    #[serde(default = "default_items_path")]
    pub items_path: String,
    /// Relative path of the locations document.
    #[serde(default = "default_locations_path")]
    pub locations_path: String,
    /// Hard timeout for each document request in milliseconds.
    #[serde(default = "default_10000")]
    pub request_timeout_ms: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_URL_BASE.to_string(),
            enchantments_path: "enchantments.json".to_string(),
            items_path: "items.json".to_string(),
            locations_path: "locations.json".to_string(),
            request_timeout_ms: 10_000,
        }
    }
}

/// Document indexing behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Reject documents with non-canonical keys or malformed records
    /// instead of skipping them.
    #[serde(default)]
    pub strict_keys: bool,
}

impl IndexConfig {
    /// Key policy selected by this config.
    #[must_use]
    pub fn key_policy(&self) -> KeyPolicy {
        if self.strict_keys {
            KeyPolicy::Strict
        } else {
            KeyPolicy::Lenient
        }
    }
}

/// How irregular keys and records are handled while building a collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyPolicy {
    /// Skip irregular entries and log them.
    #[default]
    Lenient,
    /// Fail the whole document on the first irregular entry.
    Strict,
}

// ---------------------------------------------------------------------------
// Serde default helpers
// ---------------------------------------------------------------------------

fn default_log_level() -> String { "info".to_string() }
fn default_base_url() -> String { DEFAULT_URL_BASE.to_string() }
fn default_enchantments_path() -> String { "enchantments.json".to_string() }
fn default_items_path() -> String { "items.json".to_string() }
fn default_locations_path() -> String { "locations.json".to_string() }
fn default_10000() -> u64 { 10_000 }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_gives_defaults() {
        let config = DataConfig::from_toml("").expect("config");
        assert_eq!(config.source.base_url, DEFAULT_URL_BASE);
        assert_eq!(config.source.items_path, "items.json");
        assert_eq!(config.source.request_timeout_ms, 10_000);
        assert_eq!(config.index.key_policy(), KeyPolicy::Lenient);
        assert_eq!(config.general.log_level, "info");
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = DataConfig::from_toml(
            r#"
            [source]
            base_url = "http://localhost:8080/data"
            request_timeout_ms = 250

            [index]
            strict_keys = true
            "#,
        )
        .expect("config");

        assert_eq!(config.source.base_url, "http://localhost:8080/data");
        assert_eq!(config.source.request_timeout_ms, 250);
        assert_eq!(config.source.locations_path, "locations.json");
        assert_eq!(config.index.key_policy(), KeyPolicy::Strict);
    }

    #[test]
    fn invalid_toml_is_a_config_error() {
        let err = DataConfig::from_toml("[source\nbase_url = 1").expect_err("should fail");
        assert!(matches!(err, crate::DataError::Config(_)));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("idlescape.toml");
        std::fs::write(&path, "[general]\nlog_level = \"debug\"\n").expect("write");

        let config = DataConfig::from_file(&path).expect("config");
        assert_eq!(config.general.log_level, "debug");
    }
}
