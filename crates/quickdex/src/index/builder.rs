//! Builds the two index partitions from raw discovery records.

use crate::discovery::{AppRecord, FeatureCommand, MatchCommand, PluginManifest};
use crate::types::{EntryId, EntryKind, IndexEntry, MatchPolicy};

use super::phonetic::{contains_cjk, phonetic_initials, phonetic_key, word_initials};
use super::IndexSnapshot;

const FREE_TEXT_DEFAULT_MIN: usize = 1;
const FREE_TEXT_DEFAULT_MAX: usize = 10_000;

/// Normalizes applications and plugin manifests into index entries.
///
/// Entry order within each partition follows the input traversal order:
/// applications first, then per manifest the launcher entry followed by each
/// feature's commands. This order is the downstream tie-break.
pub fn build_snapshot(apps: &[AppRecord], plugins: &[PluginManifest]) -> IndexSnapshot {
    let mut snapshot = IndexSnapshot::default();

    for app in apps {
        snapshot.fuzzy.push(application_entry(app));
    }

    for plugin in plugins {
        snapshot.fuzzy.push(launcher_entry(plugin));

        for feature in &plugin.features {
            for cmd in &feature.cmds {
                match cmd {
                    FeatureCommand::Text(label) => {
                        snapshot.fuzzy.push(text_command_entry(
                            plugin,
                            &feature.code,
                            feature.explain.as_deref(),
                            label,
                        ));
                    }
                    FeatureCommand::Match(instruction) => {
                        snapshot.pattern.push(pattern_command_entry(
                            plugin,
                            &feature.code,
                            feature.explain.as_deref(),
                            instruction,
                        ));
                    }
                }
            }
        }
    }

    snapshot
}

fn application_entry(app: &AppRecord) -> IndexEntry {
    let (key, initials) = phonetic_fields(&app.name);
    IndexEntry {
        id: EntryId::App {
            path: app.path.clone(),
        },
        display_name: app.name.clone(),
        icon: app.icon.clone(),
        kind: EntryKind::Application,
        explain: None,
        phonetic_key: key,
        phonetic_initials: initials,
        policy: None,
    }
}

fn launcher_entry(plugin: &PluginManifest) -> IndexEntry {
    let (key, initials) = phonetic_fields(&plugin.name);
    IndexEntry {
        id: EntryId::Plugin {
            path: plugin.path.clone(),
            feature: default_feature(plugin),
        },
        display_name: plugin.name.clone(),
        icon: plugin.logo.clone(),
        kind: EntryKind::PluginLauncher,
        explain: None,
        phonetic_key: key,
        phonetic_initials: initials,
        policy: None,
    }
}

/// Plugins without an explicit `main` default to the first feature that has
/// at least one text command. No match leaves the launcher without a feature.
fn default_feature(plugin: &PluginManifest) -> Option<String> {
    if plugin.main.is_some() {
        return None;
    }
    plugin
        .features
        .iter()
        .find(|feature| feature.cmds.iter().any(FeatureCommand::is_text))
        .map(|feature| feature.code.clone())
}

fn text_command_entry(
    plugin: &PluginManifest,
    feature_code: &str,
    explain: Option<&str>,
    label: &str,
) -> IndexEntry {
    let (key, initials) = phonetic_fields(label);
    IndexEntry {
        id: EntryId::Plugin {
            path: plugin.path.clone(),
            feature: Some(feature_code.to_string()),
        },
        display_name: label.to_string(),
        icon: plugin.logo.clone(),
        kind: EntryKind::PluginTextCommand,
        explain: explain.map(str::to_string),
        phonetic_key: key,
        phonetic_initials: initials,
        policy: None,
    }
}

fn pattern_command_entry(
    plugin: &PluginManifest,
    feature_code: &str,
    explain: Option<&str>,
    instruction: &MatchCommand,
) -> IndexEntry {
    let (label, policy) = match instruction {
        MatchCommand::Regex {
            label,
            min_length,
            pattern,
        } => (
            label.clone(),
            MatchPolicy::Regex {
                min_length: *min_length,
                pattern: pattern.clone(),
            },
        ),
        MatchCommand::Over {
            label,
            exclude,
            min_length,
            max_length,
        } => (
            label.clone(),
            MatchPolicy::FreeText {
                min_length: min_length.unwrap_or(FREE_TEXT_DEFAULT_MIN),
                max_length: max_length.unwrap_or(FREE_TEXT_DEFAULT_MAX),
                exclude: exclude.clone(),
            },
        ),
    };

    IndexEntry {
        id: EntryId::Plugin {
            path: plugin.path.clone(),
            feature: Some(feature_code.to_string()),
        },
        display_name: label,
        icon: plugin.logo.clone(),
        kind: EntryKind::PluginPatternCommand,
        explain: explain.map(str::to_string),
        phonetic_key: String::new(),
        phonetic_initials: String::new(),
        policy: Some(policy),
    }
}

/// CJK names get pinyin fields; non-CJK multi-word names get whitespace-token
/// initials only; everything else searches by literal text alone.
fn phonetic_fields(name: &str) -> (String, String) {
    if contains_cjk(name) {
        return (phonetic_key(name), phonetic_initials(name));
    }
    if name.split_whitespace().nth(1).is_some() {
        return (String::new(), word_initials(name));
    }
    (String::new(), String::new())
}
