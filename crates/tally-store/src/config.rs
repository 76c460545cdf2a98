use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};

/// Configuration for in-memory collections and their registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Number of keys each collection pre-sizes its map for.
    pub initial_capacity: usize,
    /// Whether key patterns in regular-expression resolution ignore case.
    pub case_insensitive_regex: bool,
    /// Collections the registry creates up front.
    pub collections: Vec<String>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            initial_capacity: 1000,
            case_insensitive_regex: true,
            collections: ["GLOBAL", "IP", "SESSION", "USER", "RESOURCE"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

impl StoreConfig {
    /// Parse a TOML document. Missing fields take their defaults.
    pub fn from_toml_str(text: &str) -> StoreResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config() {
        let c = StoreConfig::default();
        assert_eq!(c.initial_capacity, 1000);
        assert!(c.case_insensitive_regex);
        assert_eq!(c.collections, vec!["GLOBAL", "IP", "SESSION", "USER", "RESOURCE"]);
    }

    #[test]
    fn empty_document_is_default() {
        let c = StoreConfig::from_toml_str("").unwrap();
        assert_eq!(c, StoreConfig::default());
    }

    #[test]
    fn partial_document_overrides() {
        let c = StoreConfig::from_toml_str(
            "initial_capacity = 64\ncollections = [\"TX_STATE\"]\n",
        )
        .unwrap();
        assert_eq!(c.initial_capacity, 64);
        assert!(c.case_insensitive_regex);
        assert_eq!(c.collections, vec!["TX_STATE"]);
    }

    #[test]
    fn bad_document_is_parse_error() {
        let err = StoreConfig::from_toml_str("initial_capacity = \"lots\"").unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "case_insensitive_regex = false").unwrap();
        let c = StoreConfig::load(file.path()).unwrap();
        assert!(!c.case_insensitive_regex);
        assert_eq!(c.initial_capacity, 1000);
    }

    #[test]
    fn load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = StoreConfig::load(dir.path().join("absent.toml")).unwrap_err();
        match err {
            StoreError::Io { path, .. } => assert!(path.ends_with("absent.toml")),
            other => panic!("unexpected error: {other}"),
        }
    }
}
