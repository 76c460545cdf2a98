//! Foundation types for Tally.
//!
//! Tally keeps named, process-scoped variable collections (`SESSION`, `IP`,
//! `GLOBAL`, ...) for a rule-evaluation engine. This crate holds the types
//! that cross the boundary between the engine and the collections.
//!
//! # Key Types
//!
//! - [`VariableValue`] — An owned `{collection, key, value}` match result
//! - [`KeyExclusionFilter`] — Predicate suppressing keys from wide scans
//! - [`KeyExclusions`] — Ordered list of exact and pattern key exclusions
//! - [`KeyPattern`] — Compiled, match-anywhere regular expression over keys

pub mod error;
pub mod exclusion;
pub mod pattern;
pub mod value;

pub use error::TypeError;
pub use exclusion::{KeyExclusion, KeyExclusionFilter, KeyExclusions, NoExclusions};
pub use pattern::KeyPattern;
pub use value::VariableValue;
