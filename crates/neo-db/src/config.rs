//! Configuration for the NEO database

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NeoConfig {
    /// Input data locations
    #[serde(default)]
    pub data: DataConfig,
    /// Linking behaviour
    #[serde(default)]
    pub linking: LinkingConfig,
    /// Query defaults
    #[serde(default)]
    pub query: QueryConfig,
}

impl NeoConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("Failed to read config '{}': {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }
}

/// Input data locations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataConfig {
    /// CSV file of near-Earth objects
    #[serde(default = "default_neo_path")]
    pub neo_path: PathBuf,
    /// JSON file of close approaches
    #[serde(default = "default_cad_path")]
    pub cad_path: PathBuf,
}

fn default_neo_path() -> PathBuf {
    PathBuf::from("data/neos.csv")
}

fn default_cad_path() -> PathBuf {
    PathBuf::from("data/cad.json")
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            neo_path: default_neo_path(),
            cad_path: default_cad_path(),
        }
    }
}

/// What to do when two NEO records share a designation
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Fail the load
    #[default]
    Reject,
    /// Keep the last record seen for the designation
    LastWriteWins,
}

/// Linking configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkingConfig {
    #[serde(default)]
    pub duplicate_policy: DuplicatePolicy,
}

/// Query configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Results printed when no explicit limit is given (0 = unlimited)
    #[serde(default = "default_limit")]
    pub default_limit: usize,
}

fn default_limit() -> usize {
    10
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = NeoConfig::from_toml_str("").unwrap();
        assert_eq!(config.data.neo_path, PathBuf::from("data/neos.csv"));
        assert_eq!(config.data.cad_path, PathBuf::from("data/cad.json"));
        assert_eq!(config.linking.duplicate_policy, DuplicatePolicy::Reject);
        assert_eq!(config.query.default_limit, 10);
    }

    #[test]
    fn test_partial_toml() {
        let config = NeoConfig::from_toml_str(
            r#"
            [data]
            cad_path = "/tmp/cad.json"

            [linking]
            duplicate_policy = "last_write_wins"
            "#,
        )
        .unwrap();

        assert_eq!(config.data.neo_path, PathBuf::from("data/neos.csv"));
        assert_eq!(config.data.cad_path, PathBuf::from("/tmp/cad.json"));
        assert_eq!(config.linking.duplicate_policy, DuplicatePolicy::LastWriteWins);
    }

    #[test]
    fn test_unknown_policy_is_error() {
        let err = NeoConfig::from_toml_str("[linking]\nduplicate_policy = \"merge\"").unwrap_err();
        assert!(matches!(err, Error::Toml(_)));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let err = NeoConfig::from_file("/nonexistent/neo.toml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
