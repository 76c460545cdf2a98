use tally_types::{KeyExclusionFilter, VariableValue};

/// A named, multi-valued variable collection with lazy expiry.
///
/// All implementations must satisfy these invariants:
/// - Several values may share a key. A key's values (its bucket) are kept in
///   insertion order, and every key present has at least one value.
/// - Each call is atomic with respect to every other call on the same
///   collection, including the erasures a resolution performs.
/// - Absence is never an error: lookups return `None` or push nothing.
/// - Resolutions erase the first expired entry they reach and stop scanning
///   there. Entries behind it are left for a later call.
pub trait Collection: Send + Sync {
    /// The collection name embedded in every produced record.
    fn name(&self) -> &str;

    /// Insert a new value under `key`, never overwriting existing values.
    fn store(&self, key: &str, value: &str);

    /// Overwrite the payload of the first value under `key`, keeping its
    /// expiry. Returns `false` if the key has no values.
    fn update_first(&self, key: &str, value: &str) -> bool;

    /// Update the first value under `key`, or insert one if there is none.
    ///
    /// Always returns `true`.
    fn store_or_update_first(&self, key: &str, value: &str) -> bool;

    /// Remove every value under `key`.
    fn del(&self, key: &str);

    /// Set the expiry of every value under `key` to `seconds` from now.
    ///
    /// Zero or negative `seconds` expire the values on their next access.
    fn set_expiry(&self, key: &str, seconds: i32);

    /// Payload of the first value under `key`. Expiry is not consulted.
    fn resolve_first(&self, key: &str) -> Option<String>;

    /// Append the unexpired prefix of `key`'s bucket to `out`, in bucket
    /// order.
    fn resolve_single_match(&self, key: &str, out: &mut Vec<VariableValue>);

    /// Resolve `key`'s bucket, or the whole collection when `key` is empty.
    ///
    /// Records are inserted at the front of `out`, so they appear in reverse
    /// scan order. For a non-empty `key` the exclusion filter is asked about
    /// `key` itself; for the whole collection it is asked about each entry's
    /// key.
    fn resolve_multi_matches(
        &self,
        key: &str,
        out: &mut Vec<VariableValue>,
        exclusions: &dyn KeyExclusionFilter,
    );

    /// Resolve every value whose key the regular expression `pattern`
    /// matches anywhere, inserting records at the front of `out`.
    ///
    /// A pattern that does not compile matches nothing.
    fn resolve_regular_expression(
        &self,
        pattern: &str,
        out: &mut Vec<VariableValue>,
        exclusions: &dyn KeyExclusionFilter,
    );

    /// Convenience wrapper: first payload under `key` as an owned record.
    fn resolve_first_value(&self, key: &str) -> Option<VariableValue> {
        self.resolve_first(key)
            .map(|value| VariableValue::new(self.name(), key, value))
    }
}
