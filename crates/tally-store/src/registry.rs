//! Registry of named collections.
//!
//! [`Collections`] replaces process-global collection singletons: the rule
//! engine context owns one registry, and every collection it hands out lives
//! exactly as long as the registry (or the last handle) does.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use crate::config::StoreConfig;
use crate::memory::InMemoryCollection;

/// Name-to-collection mapping owned by a rule-engine context.
///
/// Names are case-insensitive and stored upper-cased, matching how rule
/// languages spell `SESSION`, `IP`, or `GLOBAL`.
#[derive(Debug)]
pub struct Collections {
    config: StoreConfig,
    by_name: RwLock<HashMap<String, Arc<InMemoryCollection>>>,
}

impl Collections {
    /// Create an empty registry; collections are built from `config`.
    pub fn new(config: StoreConfig) -> Self {
        Self {
            config,
            by_name: RwLock::new(HashMap::new()),
        }
    }

    /// Create a registry with every collection named in `config` already
    /// present.
    pub fn with_defaults(config: StoreConfig) -> Self {
        let registry = Self::new(config);
        for name in registry.config.collections.clone() {
            registry.get_or_create(&name);
        }
        registry
    }

    /// The configuration new collections are built from.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Look up an existing collection.
    pub fn get(&self, name: &str) -> Option<Arc<InMemoryCollection>> {
        self.read().get(&normalize(name)).cloned()
    }

    /// Look up a collection, creating it if it does not exist yet.
    pub fn get_or_create(&self, name: &str) -> Arc<InMemoryCollection> {
        let name = normalize(name);
        if let Some(existing) = self.read().get(&name) {
            return Arc::clone(existing);
        }

        let mut by_name = self.write();
        let collection = by_name.entry(name).or_insert_with_key(|name| {
            info!(
                collection = %name,
                capacity = self.config.initial_capacity,
                "collection created"
            );
            Arc::new(InMemoryCollection::from_config(name.as_str(), &self.config))
        });
        Arc::clone(collection)
    }

    /// Drop a collection from the registry. Returns `true` if it existed.
    ///
    /// Outstanding handles keep the collection alive until they are dropped.
    pub fn remove(&self, name: &str) -> bool {
        let name = normalize(name);
        let removed = self.write().remove(&name).is_some();
        if removed {
            info!(collection = %name, "collection removed");
        }
        removed
    }

    /// Sorted list of collection names.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    /// Number of registered collections.
    pub fn len(&self) -> usize {
        self.read().len()
    }

    /// Returns `true` if no collections are registered.
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Drop every collection from the registry.
    pub fn clear(&self) {
        self.write().clear();
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, Arc<InMemoryCollection>>> {
        self.by_name.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, Arc<InMemoryCollection>>> {
        self.by_name.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Collections {
    fn default() -> Self {
        Self::new(StoreConfig::default())
    }
}

fn normalize(name: &str) -> String {
    name.to_ascii_uppercase()
}
