//! Index construction: raw discovery records to searchable partitions.

mod builder;
mod phonetic;

pub use builder::build_snapshot;
pub use phonetic::{contains_cjk, phonetic_initials, phonetic_key, word_initials};

use crate::types::IndexEntry;

/// One fully-built generation of the index.
///
/// Every entry belongs to exactly one partition: `fuzzy` holds applications,
/// plugin launchers and text commands; `pattern` holds pattern commands.
/// Order within each partition is the builder's traversal order and governs
/// tie-breaking downstream.
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    pub fuzzy: Vec<IndexEntry>,
    pub pattern: Vec<IndexEntry>,
}

impl IndexSnapshot {
    pub fn len(&self) -> usize {
        self.fuzzy.len() + self.pattern.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fuzzy.is_empty() && self.pattern.is_empty()
    }
}
