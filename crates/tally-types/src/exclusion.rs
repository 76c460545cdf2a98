//! Key exclusion filters.
//!
//! Rules frequently ask for "every variable in the collection except these
//! keys". The engine expresses the exceptions as a [`KeyExclusionFilter`] and
//! passes it into collection-wide and pattern scans. Filters are pure with
//! respect to the collection: they only answer whether a key is omitted.

use crate::error::TypeError;
use crate::pattern::KeyPattern;

/// Decides whether a candidate key must be omitted from a scan.
pub trait KeyExclusionFilter {
    /// Returns `true` if `key` must not appear in the scan result.
    fn should_omit(&self, key: &str) -> bool;
}

impl<F> KeyExclusionFilter for F
where
    F: Fn(&str) -> bool,
{
    fn should_omit(&self, key: &str) -> bool {
        self(key)
    }
}

/// A filter that never omits anything.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NoExclusions;

impl KeyExclusionFilter for NoExclusions {
    fn should_omit(&self, _key: &str) -> bool {
        false
    }
}

/// A single exclusion entry.
#[derive(Clone, Debug, PartialEq)]
pub enum KeyExclusion {
    /// Omit a key equal to this one, ignoring ASCII case.
    Exact(String),
    /// Omit any key the pattern matches.
    Pattern(KeyPattern),
}

impl KeyExclusion {
    /// Build a pattern exclusion; patterns are matched case-insensitively.
    pub fn pattern(pattern: &str) -> Result<Self, TypeError> {
        Ok(Self::Pattern(KeyPattern::compile(pattern, true)?))
    }

    /// Returns `true` if this exclusion covers `key`.
    pub fn matches(&self, key: &str) -> bool {
        match self {
            Self::Exact(name) => name.eq_ignore_ascii_case(key),
            Self::Pattern(pattern) => pattern.search(key),
        }
    }
}

/// An ordered set of exclusions; a key is omitted if any entry matches.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct KeyExclusions {
    entries: Vec<KeyExclusion>,
}

impl KeyExclusions {
    /// Create an empty exclusion list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact key exclusion.
    pub fn exact(mut self, key: impl Into<String>) -> Self {
        self.entries.push(KeyExclusion::Exact(key.into()));
        self
    }

    /// Add a pattern exclusion.
    pub fn pattern(mut self, pattern: &str) -> Result<Self, TypeError> {
        self.entries.push(KeyExclusion::pattern(pattern)?);
        Ok(self)
    }

    /// Append an already-built exclusion.
    pub fn push(&mut self, exclusion: KeyExclusion) {
        self.entries.push(exclusion);
    }

    /// Number of exclusion entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no exclusions are configured.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over the configured exclusions.
    pub fn iter(&self) -> impl Iterator<Item = &KeyExclusion> {
        self.entries.iter()
    }
}

impl KeyExclusionFilter for KeyExclusions {
    fn should_omit(&self, key: &str) -> bool {
        self.entries.iter().any(|e| e.matches(key))
    }
}

impl FromIterator<KeyExclusion> for KeyExclusions {
    fn from_iter<I: IntoIterator<Item = KeyExclusion>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
