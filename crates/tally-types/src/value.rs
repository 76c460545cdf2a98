use std::fmt;

use serde::{Deserialize, Serialize};

/// A single resolved variable, copied out of a collection at match time.
///
/// Records never alias collection storage: the collection name, key and
/// payload are owned strings, so a record stays valid after the collection
/// has been mutated, expired, or dropped. The caller owns every record it
/// receives.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariableValue {
    collection: String,
    key: String,
    value: String,
}

impl VariableValue {
    /// Create a record for `collection:key = value`.
    pub fn new(
        collection: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            collection: collection.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Name of the collection that produced this record.
    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// The variable key within its collection.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The variable payload.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Fully-qualified variable name, e.g. `SESSION:score`.
    pub fn qualified_name(&self) -> String {
        format!("{}:{}", self.collection, self.key)
    }

    /// Consume the record, yielding its payload.
    pub fn into_value(self) -> String {
        self.value
    }
}

impl fmt::Display for VariableValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}={}", self.collection, self.key, self.value)
    }
}
