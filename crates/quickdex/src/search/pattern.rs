//! Boolean pattern matching over the pattern-command partition.
//!
//! Acceptance is structural, never ranked: a regex policy gates on query
//! length then tests the pattern; a free-text policy gates on length bounds
//! and an optional exclusion pattern. Patterns are compiled once per
//! generation; a pattern that fails to compile disables its entry only.

use regex::Regex;

use crate::types::{IndexEntry, MatchPolicy};

enum CompiledPolicy {
    Regex {
        min_length: usize,
        regex: Regex,
    },
    FreeText {
        min_length: usize,
        max_length: usize,
        exclude: Option<Regex>,
    },
    /// Compile failed; the entry never matches.
    Broken,
}

struct PatternDoc {
    entry: IndexEntry,
    policy: CompiledPolicy,
}

/// Matcher over the pattern partition, rebuilt with each generation.
#[derive(Default)]
pub struct PatternMatcher {
    docs: Vec<PatternDoc>,
}

impl PatternMatcher {
    pub fn build(entries: Vec<IndexEntry>) -> Self {
        let docs = entries
            .into_iter()
            .map(|entry| {
                let policy = compile_policy(&entry);
                PatternDoc { entry, policy }
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

    /// All entries whose policy accepts `query`, in partition order.
    pub fn query(&self, query: &str) -> Vec<IndexEntry> {
        let query_len = query.chars().count();
        self.docs
            .iter()
            .filter(|doc| accepts(&doc.policy, query, query_len))
            .map(|doc| doc.entry.clone())
            .collect()
    }
}

fn accepts(policy: &CompiledPolicy, query: &str, query_len: usize) -> bool {
    match policy {
        CompiledPolicy::Regex { min_length, regex } => {
            query_len >= *min_length && regex.is_match(query)
        }
        CompiledPolicy::FreeText {
            min_length,
            max_length,
            exclude,
        } => {
            query_len >= *min_length
                && query_len <= *max_length
                && exclude.as_ref().is_none_or(|re| !re.is_match(query))
        }
        CompiledPolicy::Broken => false,
    }
}

fn compile_policy(entry: &IndexEntry) -> CompiledPolicy {
    let Some(policy) = &entry.policy else {
        log::warn!(
            "pattern entry without policy treated as non-matching: {}",
            entry.display_name
        );
        return CompiledPolicy::Broken;
    };

    match policy {
        MatchPolicy::Regex {
            min_length,
            pattern,
        } => match compile_pattern(pattern) {
            Ok(regex) => CompiledPolicy::Regex {
                min_length: *min_length,
                regex,
            },
            Err(error) => {
                log::warn!(
                    "regex pattern failed to compile for {}: {error}",
                    entry.display_name
                );
                CompiledPolicy::Broken
            }
        },
        MatchPolicy::FreeText {
            min_length,
            max_length,
            exclude,
        } => {
            let exclude = match exclude.as_deref().map(compile_pattern).transpose() {
                Ok(exclude) => exclude,
                Err(error) => {
                    log::warn!(
                        "exclude pattern failed to compile for {}: {error}",
                        entry.display_name
                    );
                    return CompiledPolicy::Broken;
                }
            };
            CompiledPolicy::FreeText {
                min_length: *min_length,
                max_length: *max_length,
                exclude,
            }
        }
    }
}

fn compile_pattern(raw: &str) -> Result<Regex, regex::Error> {
    Regex::new(strip_regex_literal(raw))
}

/// Manifests written for a JS host may wrap patterns as regex literals
/// (`/body/flags`). Strip the wrapper so only the body is compiled.
fn strip_regex_literal(raw: &str) -> &str {
    let body = raw.strip_prefix('/').unwrap_or(raw);
    let without_flags = body.trim_end_matches(['g', 'i', 'm', 'u', 'y']);
    match without_flags.strip_suffix('/') {
        Some(stripped) => stripped,
        None => body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{EntryId, EntryKind};

    fn pattern_entry(label: &str, policy: MatchPolicy) -> IndexEntry {
        IndexEntry {
            id: EntryId::Plugin {
                path: "/p".to_string(),
                feature: Some(label.to_string()),
            },
            display_name: label.to_string(),
            icon: None,
            kind: EntryKind::PluginPatternCommand,
            explain: None,
            phonetic_key: String::new(),
            phonetic_initials: String::new(),
            policy: Some(policy),
        }
    }

    fn regex_policy(min_length: usize, pattern: &str) -> MatchPolicy {
        MatchPolicy::Regex {
            min_length,
            pattern: pattern.to_string(),
        }
    }

    fn free_text_policy(min: usize, max: usize, exclude: Option<&str>) -> MatchPolicy {
        MatchPolicy::FreeText {
            min_length: min,
            max_length: max,
            exclude: exclude.map(str::to_string),
        }
    }

    #[test]
    fn regex_length_gate_applies_before_pattern() {
        let matcher =
            PatternMatcher::build(vec![pattern_entry("digits", regex_policy(3, "^\\d+$"))]);
        assert!(matcher.query("12").is_empty());
        assert_eq!(matcher.query("123").len(), 1);
        assert!(matcher.query("12a").is_empty());
    }

    #[test]
    fn free_text_length_bounds() {
        let matcher =
            PatternMatcher::build(vec![pattern_entry("note", free_text_policy(1, 5, None))]);
        assert_eq!(matcher.query("hello").len(), 1);
        assert!(matcher.query("toolong").is_empty());
        assert!(matcher.query("").is_empty());
    }

    #[test]
    fn free_text_exclusion_wins_within_bounds() {
        let matcher = PatternMatcher::build(vec![pattern_entry(
            "not-numbers",
            free_text_policy(1, 100, Some("^\\d+$")),
        )]);
        assert_eq!(matcher.query("hello").len(), 1);
        assert!(matcher.query("12345").is_empty());
    }

    #[test]
    fn length_gates_count_characters_not_bytes() {
        let matcher =
            PatternMatcher::build(vec![pattern_entry("cjk", free_text_policy(1, 3, None))]);
        assert_eq!(matcher.query("苹果商").len(), 1);
        assert!(matcher.query("苹果商店").is_empty());
    }

    #[test]
    fn broken_pattern_disables_only_its_entry() {
        let matcher = PatternMatcher::build(vec![
            pattern_entry("broken", regex_policy(1, "(unclosed")),
            pattern_entry("digits", regex_policy(1, "^\\d+$")),
        ]);
        let hits = matcher.query("42");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].display_name, "digits");
    }

    #[test]
    fn broken_exclude_disables_its_entry() {
        let matcher = PatternMatcher::build(vec![pattern_entry(
            "free",
            free_text_policy(1, 100, Some("(unclosed")),
        )]);
        assert!(matcher.query("anything").is_empty());
    }

    #[test]
    fn results_keep_partition_order() {
        let matcher = PatternMatcher::build(vec![
            pattern_entry("any", free_text_policy(1, 100, None)),
            pattern_entry("digits", regex_policy(1, "^\\d+$")),
        ]);
        let hits = matcher.query("42");
        let names: Vec<&str> = hits.iter().map(|e| e.display_name.as_str()).collect();
        assert_eq!(names, vec!["any", "digits"]);
    }

    #[test]
    fn strips_js_regex_literal_wrapper() {
        assert_eq!(strip_regex_literal("/^\\d+$/"), "^\\d+$");
        assert_eq!(strip_regex_literal("/^\\d+$/gi"), "^\\d+$");
        assert_eq!(strip_regex_literal("^\\d+$"), "^\\d+$");

        let matcher = PatternMatcher::build(vec![pattern_entry(
            "url",
            regex_policy(1, "/^https?:\\/\\//i"),
        )]);
        assert_eq!(matcher.query("https://example.com").len(), 1);
    }
}
