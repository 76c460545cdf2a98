use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{PatternError, Result};

/// Resolves a dataset name to its newline-delimited pattern text.
pub trait DatasetProvider: Send + Sync {
    /// Fetch the full text of dataset `name`.
    fn fetch(&self, name: &str) -> Result<String>;
}

/// Datasets held in memory, keyed by name.
///
/// A provider created with [`unset`](Self::unset) (or `Default`) has no data
/// map at all and rejects every lookup with [`PatternError::DataMapUnset`].
#[derive(Clone, Debug, Default)]
pub struct InMemoryDatasets {
    data: Option<HashMap<String, String>>,
}

impl InMemoryDatasets {
    /// An empty data map.
    pub fn new() -> Self {
        Self {
            data: Some(HashMap::new()),
        }
    }

    /// A provider without a data map.
    pub fn unset() -> Self {
        Self { data: None }
    }

    /// Add or replace dataset `name`, installing the data map if needed.
    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.data
            .get_or_insert_with(HashMap::new)
            .insert(name.into(), text.into());
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }
}

impl DatasetProvider for InMemoryDatasets {
    fn fetch(&self, name: &str) -> Result<String> {
        let data = self.data.as_ref().ok_or(PatternError::DataMapUnset)?;
        data.get(name).cloned().ok_or_else(|| PatternError::NotFound {
            name: name.to_string(),
        })
    }
}

/// Datasets stored as files, resolved relative to a root directory.
///
/// Absolute names are used as-is. Remote (`http://`, `https://`) names are
/// rejected with [`PatternError::Download`]: this provider never touches
/// the network.
#[derive(Clone, Debug)]
pub struct DirectoryDatasets {
    root: PathBuf,
}

impl DirectoryDatasets {
    /// Resolve dataset names against `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The directory relative names are resolved against.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Filesystem path dataset `name` resolves to.
    pub fn resolve(&self, name: &str) -> PathBuf {
        let path = Path::new(name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }
}

impl DatasetProvider for DirectoryDatasets {
    fn fetch(&self, name: &str) -> Result<String> {
        if name.starts_with("https://") || name.starts_with("http://") {
            return Err(PatternError::Download {
                name: name.to_string(),
                reason: "remote pattern sources are not supported".to_string(),
            });
        }

        fs::read_to_string(self.resolve(name)).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => PatternError::NotFound {
                name: name.to_string(),
            },
            _ => PatternError::Io {
                name: name.to_string(),
                source,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn in_memory_lookup() {
        let datasets = InMemoryDatasets::new().with("bad-agents", "curl\nwget\n");
        assert_eq!(datasets.fetch("bad-agents").unwrap(), "curl\nwget\n");
    }

    #[test]
    fn in_memory_missing_dataset() {
        let datasets = InMemoryDatasets::new();
        let err = datasets.fetch("nope").unwrap_err();
        assert!(matches!(err, PatternError::NotFound { ref name } if name == "nope"));
        assert_eq!(err.to_string(), "the data 'nope' is not found");
    }

    #[test]
    fn unset_data_map() {
        let err = InMemoryDatasets::unset().fetch("any").unwrap_err();
        assert!(matches!(err, PatternError::DataMapUnset));
        assert_eq!(err.to_string(), "data map is not set");
    }

    #[test]
    fn insert_installs_map() {
        let mut datasets = InMemoryDatasets::unset();
        datasets.insert("x", "y");
        assert_eq!(datasets.fetch("x").unwrap(), "y");
    }

    #[test]
    fn directory_relative_and_absolute() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("words.txt"), "alpha\n").unwrap();
        let datasets = DirectoryDatasets::new(dir.path());

        assert_eq!(datasets.fetch("words.txt").unwrap(), "alpha\n");

        let absolute = dir.path().join("words.txt");
        let other_root = DirectoryDatasets::new("/nonexistent-root");
        assert_eq!(
            other_root.fetch(absolute.to_str().unwrap()).unwrap(),
            "alpha\n"
        );
    }

    #[test]
    fn directory_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let datasets = DirectoryDatasets::new(dir.path());
        let err = datasets.fetch("missing.txt").unwrap_err();
        assert!(matches!(err, PatternError::NotFound { .. }));
    }

    #[test]
    fn directory_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("subdir")).unwrap();
        let datasets = DirectoryDatasets::new(dir.path());
        let err = datasets.fetch("subdir").unwrap_err();
        assert!(matches!(err, PatternError::Io { ref name, .. } if name == "subdir"));
        assert!(err.to_string().starts_with("failed to open file: subdir."));
    }

    #[test]
    fn directory_rejects_remote_names() {
        let datasets = DirectoryDatasets::new(".");
        let err = datasets.fetch("https://example.com/list.txt").unwrap_err();
        assert!(matches!(err, PatternError::Download { .. }));
    }
}
