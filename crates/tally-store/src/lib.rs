//! Per-process variable collections for Tally.
//!
//! A collection is a named, multi-valued map from key to time-limited string
//! values, shared by every worker thread of one process. The rule engine
//! mutates it with `store`/`update_first`/`del`/`set_expiry` and reads it
//! through three resolution protocols: exact key, collection-wide, and
//! regular-expression key match.
//!
//! # Storage Backends
//!
//! All backends implement the [`Collection`] trait:
//!
//! - [`InMemoryCollection`] -- `HashMap`-of-buckets store behind one mutex
//!
//! Named collections are owned by a [`Collections`] registry that lives as
//! long as the rule-engine context holding it.
//!
//! # Design Rules
//!
//! 1. Multiple values may share a key; a bucket keeps insertion order.
//! 2. Expiry is lazy: an expired entry is erased when a resolution reaches it,
//!    never by a background sweep.
//! 3. Every public operation runs inside a single critical section.
//! 4. Callers receive copies ([`VariableValue`]), never references into the
//!    map.
//! 5. Data operations never fail; absence is an empty result.

pub mod config;
pub mod error;
pub mod memory;
pub mod registry;
pub mod traits;
pub mod value;

pub use config::StoreConfig;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryCollection;
pub use registry::Collections;
pub use traits::Collection;
pub use value::ExpirableValue;

pub use tally_types::{KeyExclusionFilter, KeyExclusions, NoExclusions, VariableValue};
