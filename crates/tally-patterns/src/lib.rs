//! Pattern dataset loading.
//!
//! Multi-pattern operators (phrase matching against a list of strings) are
//! configured with a dataset name. This crate resolves the name to text
//! through a [`DatasetProvider`], filters comment lines, and feeds each
//! remaining line to a [`PatternSetBuilder`], which stands in for the
//! external multi-pattern matcher.
//!
//! # Modules
//!
//! - [`error`] — [`PatternError`], reported to the operator's configuration
//! - [`source`] — [`DatasetProvider`] plus in-memory and directory providers
//! - [`loader`] — comment detection and [`load_patterns`]

pub mod error;
pub mod loader;
pub mod source;

pub use error::{PatternError, Result};
pub use loader::{is_comment, load_patterns, pattern_lines, PatternList, PatternSetBuilder};
pub use source::{DatasetProvider, DirectoryDatasets, InMemoryDatasets};
