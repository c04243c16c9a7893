//! Search orchestration over one index generation.

use serde::Serialize;

use crate::index::IndexSnapshot;
use crate::types::IndexEntry;

use super::fuzzy::{FuzzyIndex, SearchHit};
use super::pattern::PatternMatcher;

/// The two independent result streams of a query.
///
/// Fuzzy and pattern results are never interleaved here; pattern entries are
/// invoked by satisfying a structural predicate, not by textual similarity,
/// so ranking them against fuzzy hits is meaningless. The presentation layer
/// decides how to compose the two sections.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResponse {
    pub best_matches: Vec<SearchHit>,
    pub pattern_matches: Vec<IndexEntry>,
}

/// One immutable, fully-built generation: both partitions plus the matchers
/// over them. Replaced wholesale on re-index.
pub struct SearchIndex {
    applications: Vec<IndexEntry>,
    fuzzy: FuzzyIndex,
    patterns: PatternMatcher,
}

impl SearchIndex {
    pub fn empty() -> Self {
        Self::build(IndexSnapshot::default())
    }

    pub fn build(snapshot: IndexSnapshot) -> Self {
        let applications = snapshot
            .fuzzy
            .iter()
            .filter(|entry| entry.is_application())
            .cloned()
            .collect();
        Self {
            applications,
            fuzzy: FuzzyIndex::build(snapshot.fuzzy),
            patterns: PatternMatcher::build(snapshot.pattern),
        }
    }

    pub fn len(&self) -> usize {
        self.fuzzy.len() + self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fuzzy.is_empty() && self.patterns.is_empty()
    }

    /// Answers one query.
    ///
    /// An empty query is the default "show installed applications" view:
    /// all `Application` entries in partition order, unranked, and no
    /// pattern matches. Plugin entries are deliberately absent from it.
    pub fn search(&self, query: &str) -> SearchResponse {
        if query.is_empty() {
            return SearchResponse {
                best_matches: self
                    .applications
                    .iter()
                    .map(|entry| SearchHit {
                        entry: entry.clone(),
                        score: 0.0,
                        matches: Vec::new(),
                    })
                    .collect(),
                pattern_matches: Vec::new(),
            };
        }

        SearchResponse {
            best_matches: self.fuzzy.query(query),
            pattern_matches: self.patterns.query(query),
        }
    }
}
