use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Instant;

use tally_types::{KeyExclusionFilter, KeyPattern, VariableValue};
use tracing::{debug, warn};

use crate::config::StoreConfig;
use crate::traits::Collection;
use crate::value::ExpirableValue;

/// Key to bucket. Buckets are never empty.
type Buckets = HashMap<String, Vec<ExpirableValue>>;

/// Location of the expired entry that stopped a scan.
struct Expired {
    key: String,
    index: usize,
}

/// In-memory, per-process variable collection.
///
/// Buckets live in a `HashMap` behind one `Mutex`. Every public operation
/// holds the lock for its whole duration, and the erasure a resolution
/// performs on an expired entry reuses the guard it already holds.
///
/// The scan order of the collection-wide resolutions is the map's iteration
/// order, which is unspecified but stable while the map is not mutated.
/// [`keys`](Self::keys) exposes it.
pub struct InMemoryCollection {
    name: String,
    case_insensitive_regex: bool,
    buckets: Mutex<Buckets>,
}

impl InMemoryCollection {
    /// Create an empty collection sized for the default working set.
    pub fn new(name: impl Into<String>) -> Self {
        Self::from_config(name, &StoreConfig::default())
    }

    /// Create an empty collection pre-sized for `capacity` keys.
    pub fn with_capacity(name: impl Into<String>, capacity: usize) -> Self {
        Self {
            name: name.into(),
            case_insensitive_regex: true,
            buckets: Mutex::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Create an empty collection using the sizing and matching options of
    /// `config`.
    pub fn from_config(name: impl Into<String>, config: &StoreConfig) -> Self {
        Self {
            case_insensitive_regex: config.case_insensitive_regex,
            ..Self::with_capacity(name, config.initial_capacity)
        }
    }

    /// Total number of stored values across all keys, expired ones included.
    pub fn len(&self) -> usize {
        self.lock().values().map(Vec::len).sum()
    }

    /// Number of distinct keys.
    pub fn key_count(&self) -> usize {
        self.lock().len()
    }

    /// Returns `true` if the collection holds no values.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Keys in the order collection-wide scans visit them.
    pub fn keys(&self) -> Vec<String> {
        self.lock().keys().cloned().collect()
    }

    /// Remove every value.
    pub fn clear(&self) {
        self.lock().clear();
    }

    /// Erase every expired value, returning how many were removed.
    ///
    /// Resolutions only erase the first expired value they reach; this is
    /// the explicit, caller-driven sweep for everything else.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let mut buckets = self.lock();
        let mut removed = 0;
        buckets.retain(|_, bucket| {
            let before = bucket.len();
            bucket.retain(|value| !value.is_expired_at(now));
            removed += before - bucket.len();
            !bucket.is_empty()
        });
        if removed > 0 {
            debug!(collection = %self.name, removed, "purged expired variables");
        }
        removed
    }

    fn lock(&self) -> MutexGuard<'_, Buckets> {
        // Every statement leaves the map consistent, so a panic elsewhere
        // does not invalidate it.
        self.buckets.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, key: &str, value: &ExpirableValue) -> VariableValue {
        VariableValue::new(self.name.as_str(), key, value.payload())
    }

    /// Collect records from `buckets` in order, stopping at the first expired
    /// value.
    fn collect_until_expired<'a, I>(
        &self,
        buckets: I,
        found: &mut Vec<VariableValue>,
    ) -> Option<Expired>
    where
        I: IntoIterator<Item = (&'a String, &'a Vec<ExpirableValue>)>,
    {
        for (key, bucket) in buckets {
            for (index, value) in bucket.iter().enumerate() {
                if value.is_expired() {
                    return Some(Expired {
                        key: key.clone(),
                        index,
                    });
                }
                found.push(self.record(key, value));
            }
        }
        None
    }

    fn erase(&self, buckets: &mut Buckets, expired: Expired) {
        if let Some(bucket) = buckets.get_mut(&expired.key) {
            bucket.remove(expired.index);
            if bucket.is_empty() {
                buckets.remove(&expired.key);
            }
        }
        debug!(collection = %self.name, key = %expired.key, "expired variable erased");
    }
}

fn insert(buckets: &mut Buckets, key: &str, value: &str) {
    buckets
        .entry(key.to_string())
        .or_default()
        .push(ExpirableValue::new(value));
}

fn update_first(buckets: &mut Buckets, key: &str, value: &str) -> bool {
    match buckets.get_mut(key).and_then(|bucket| bucket.first_mut()) {
        Some(first) => {
            first.set_payload(value);
            true
        }
        None => false,
    }
}

/// Place `found` in front of `out`, last-found first.
fn prepend_reversed(out: &mut Vec<VariableValue>, mut found: Vec<VariableValue>) {
    found.reverse();
    found.append(out);
    *out = found;
}

impl Collection for InMemoryCollection {
    fn name(&self) -> &str {
        &self.name
    }

    fn store(&self, key: &str, value: &str) {
        insert(&mut self.lock(), key, value);
    }

    fn update_first(&self, key: &str, value: &str) -> bool {
        update_first(&mut self.lock(), key, value)
    }

    fn store_or_update_first(&self, key: &str, value: &str) -> bool {
        let mut buckets = self.lock();
        if !update_first(&mut buckets, key, value) {
            insert(&mut buckets, key, value);
        }
        true
    }

    fn del(&self, key: &str) {
        self.lock().remove(key);
    }

    fn set_expiry(&self, key: &str, seconds: i32) {
        if let Some(bucket) = self.lock().get_mut(key) {
            for value in bucket.iter_mut() {
                value.set_expiry(seconds);
            }
        }
    }

    fn resolve_first(&self, key: &str) -> Option<String> {
        self.lock()
            .get(key)
            .and_then(|bucket| bucket.first())
            .map(|value| value.payload().to_string())
    }

    fn resolve_single_match(&self, key: &str, out: &mut Vec<VariableValue>) {
        let mut buckets = self.lock();
        if let Some(expired) = self.collect_until_expired(buckets.get_key_value(key), out) {
            self.erase(&mut buckets, expired);
        }
    }

    fn resolve_multi_matches(
        &self,
        key: &str,
        out: &mut Vec<VariableValue>,
        exclusions: &dyn KeyExclusionFilter,
    ) {
        let mut buckets = self.lock();
        let mut found = Vec::new();
        let expired = if key.is_empty() {
            let visible = buckets
                .iter()
                .filter(|(entry_key, _)| !exclusions.should_omit(entry_key));
            self.collect_until_expired(visible, &mut found)
        } else if exclusions.should_omit(key) {
            None
        } else {
            self.collect_until_expired(buckets.get_key_value(key), &mut found)
        };
        if let Some(expired) = expired {
            self.erase(&mut buckets, expired);
        }
        prepend_reversed(out, found);
    }

    fn resolve_regular_expression(
        &self,
        pattern: &str,
        out: &mut Vec<VariableValue>,
        exclusions: &dyn KeyExclusionFilter,
    ) {
        let matcher = match KeyPattern::compile(pattern, self.case_insensitive_regex) {
            Ok(matcher) => matcher,
            Err(e) => {
                warn!(
                    collection = %self.name,
                    error = %e,
                    "key pattern does not compile; nothing resolved"
                );
                return;
            }
        };

        let mut buckets = self.lock();
        let mut found = Vec::new();
        let visible = buckets.iter().filter(|(entry_key, _)| {
            matcher.search(entry_key) && !exclusions.should_omit(entry_key)
        });
        if let Some(expired) = self.collect_until_expired(visible, &mut found) {
            self.erase(&mut buckets, expired);
        }
        prepend_reversed(out, found);
    }
}

impl std::fmt::Debug for InMemoryCollection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.len();
        f.debug_struct("InMemoryCollection")
            .field("name", &self.name)
            .field("entry_count", &count)
            .finish()
    }
}
