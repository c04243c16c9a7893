//! Shared types for the launch index.

use serde::{Deserialize, Serialize};

/// Identity of a launchable entry.
///
/// Applications are keyed by their filesystem path. Plugin entries are keyed
/// by the plugin root path plus the feature they launch; the plugin launcher
/// entry itself may carry no feature when the manifest selects none.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EntryId {
    App {
        path: String,
    },
    Plugin {
        path: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        feature: Option<String>,
    },
}

/// Variant tag for an index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    Application,
    PluginLauncher,
    PluginTextCommand,
    PluginPatternCommand,
}

/// Matching instruction attached to a pattern command.
///
/// Decoded once from the plugin manifest; downstream code only ever matches
/// on this enum, never re-inspects the raw command value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPolicy {
    /// Accepts a query iff it is at least `min_length` characters long and
    /// the regular expression matches it.
    Regex { min_length: usize, pattern: String },
    /// Accepts any query whose length lies in `[min_length, max_length]`
    /// and that does not match the optional exclusion pattern.
    FreeText {
        min_length: usize,
        max_length: usize,
        exclude: Option<String>,
    },
}

/// One indexed, launchable unit.
///
/// Immutable once built; the whole set is rebuilt on re-index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexEntry {
    pub id: EntryId,
    pub display_name: String,
    pub icon: Option<String>,
    pub kind: EntryKind,
    /// Feature explanation from the plugin manifest, when present.
    pub explain: Option<String>,
    /// Full phonetic transliteration of `display_name`, lower-cased with
    /// whitespace removed. Empty unless the name contains CJK characters.
    pub phonetic_key: String,
    /// Phonetic first letters, or whitespace-token initials for non-CJK
    /// multi-word names. Empty otherwise.
    pub phonetic_initials: String,
    /// Present only for `PluginPatternCommand` entries.
    pub policy: Option<MatchPolicy>,
}

impl IndexEntry {
    pub fn is_application(&self) -> bool {
        self.kind == EntryKind::Application
    }
}
