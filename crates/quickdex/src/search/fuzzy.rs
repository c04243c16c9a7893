//! Weighted multi-field substring index over the fuzzy-searchable partition.
//!
//! Matching is strict: a field matches only when the query occurs in it as a
//! contiguous substring, case-insensitively and regardless of position. There
//! is no edit-distance tolerance. Each hit reports the matched fields with
//! character ranges for highlighting.

use serde::Serialize;

use crate::types::IndexEntry;

/// Searchable field of a fuzzy-partition entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    DisplayName,
    PhoneticKey,
    PhoneticInitials,
}

impl SearchField {
    /// Relative weight of a match in this field.
    pub fn weight(self) -> f64 {
        match self {
            SearchField::DisplayName => 2.0,
            SearchField::PhoneticKey => 1.5,
            SearchField::PhoneticInitials => 1.0,
        }
    }
}

/// A matched field with the matched character range (for highlighting).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    pub field: SearchField,
    /// Start of the match, in characters of the lower-cased field value.
    pub start: usize,
    /// Exclusive end of the match.
    pub end: usize,
}

/// One ranked result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub entry: IndexEntry,
    pub score: f64,
    pub matches: Vec<FieldMatch>,
}

struct FuzzyDoc {
    entry: IndexEntry,
    name: Vec<char>,
    phonetic_key: Vec<char>,
    phonetic_initials: Vec<char>,
}

/// Index over the fuzzy-searchable partition. Holds no state across
/// rebuilds; a new generation gets a fresh index.
#[derive(Default)]
pub struct FuzzyIndex {
    docs: Vec<FuzzyDoc>,
}

impl FuzzyIndex {
    pub fn build(entries: Vec<IndexEntry>) -> Self {
        let docs = entries
            .into_iter()
            .map(|entry| FuzzyDoc {
                name: lower_chars(&entry.display_name),
                phonetic_key: lower_chars(&entry.phonetic_key),
                phonetic_initials: lower_chars(&entry.phonetic_initials),
                entry,
            })
            .collect();
        Self { docs }
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// All entries with at least one field match, best composite score
    /// first. Ties keep partition order. An empty query matches nothing.
    pub fn query(&self, query: &str) -> Vec<SearchHit> {
        let needle = lower_chars(query);
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = self
            .docs
            .iter()
            .filter_map(|doc| score_doc(doc, &needle))
            .collect();

        // Stable sort: equal scores stay in partition order.
        hits.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        hits
    }
}

fn score_doc(doc: &FuzzyDoc, needle: &[char]) -> Option<SearchHit> {
    let mut matches = Vec::new();
    let mut best = 0.0_f64;

    for (field, value) in [
        (SearchField::DisplayName, &doc.name),
        (SearchField::PhoneticKey, &doc.phonetic_key),
        (SearchField::PhoneticInitials, &doc.phonetic_initials),
    ] {
        if let Some(start) = find_substring(value, needle) {
            // Match quality is coverage of the field; a query spanning the
            // whole field scores the full field weight.
            let quality = needle.len() as f64 / value.len() as f64;
            let score = field.weight() * quality;
            if score > best {
                best = score;
            }
            matches.push(FieldMatch {
                field,
                start,
                end: start + needle.len(),
            });
        }
    }

    if matches.is_empty() {
        return None;
    }
    Some(SearchHit {
        entry: doc.entry.clone(),
        score: best,
        matches,
    })
}

fn find_substring(haystack: &[char], needle: &[char]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len()).find(|&start| haystack[start..start + needle.len()] == *needle)
}

fn lower_chars(text: &str) -> Vec<char> {
    text.chars().flat_map(char::to_lowercase).collect()
}
