//! Query answering over a built index generation.

mod engine;
mod fuzzy;
mod pattern;

pub use engine::{SearchIndex, SearchResponse};
pub use fuzzy::{FieldMatch, FuzzyIndex, SearchField, SearchHit};
pub use pattern::PatternMatcher;
