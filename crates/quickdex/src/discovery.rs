//! Raw discovery records and the source trait the coordinator consumes.
//!
//! Application scanning and plugin enumeration are platform concerns that
//! live outside this crate; they feed the index through [`DiscoverySource`].
//! Plugin manifests arrive in the launcher's JSON shape and are decoded into
//! a tagged command union here, at the edge.

use serde::Deserialize;

use crate::error::Result;

/// A discovered application.
#[derive(Debug, Clone, Deserialize)]
pub struct AppRecord {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub icon: Option<String>,
}

/// A plugin manifest as produced by plugin enumeration.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginManifest {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub logo: Option<String>,
    /// Explicit default entry point. When absent, the first feature with a
    /// text command becomes the launcher's default feature.
    #[serde(default)]
    pub main: Option<String>,
    #[serde(default)]
    pub features: Vec<PluginFeature>,
}

/// One feature block of a plugin manifest.
#[derive(Debug, Clone, Deserialize)]
pub struct PluginFeature {
    pub code: String,
    #[serde(default)]
    pub explain: Option<String>,
    #[serde(default)]
    pub cmds: Vec<FeatureCommand>,
}

/// A feature command: either a plain search label or a structured matching
/// instruction.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FeatureCommand {
    Text(String),
    Match(MatchCommand),
}

impl FeatureCommand {
    pub fn is_text(&self) -> bool {
        matches!(self, FeatureCommand::Text(_))
    }
}

/// Structured matching instruction, discriminated by the manifest's `type`
/// field.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum MatchCommand {
    #[serde(rename_all = "camelCase")]
    Regex {
        label: String,
        #[serde(default)]
        min_length: usize,
        /// Pattern source, possibly wrapped as a JS regex literal (`/…/i`).
        #[serde(rename = "match")]
        pattern: String,
    },
    #[serde(rename_all = "camelCase")]
    Over {
        label: String,
        #[serde(default)]
        exclude: Option<String>,
        #[serde(default)]
        min_length: Option<usize>,
        #[serde(default)]
        max_length: Option<usize>,
    },
}

/// Everything one discovery pass produces.
#[derive(Debug, Clone, Default)]
pub struct DiscoverySnapshot {
    pub apps: Vec<AppRecord>,
    pub plugins: Vec<PluginManifest>,
}

/// Produces the raw application and plugin lists on demand.
///
/// Implementations are expected to be cheap to call repeatedly; the
/// coordinator invokes `discover` once per rebuild.
pub trait DiscoverySource: Send + Sync {
    fn discover(&self) -> Result<DiscoverySnapshot>;
}

/// A source backed by fixed records, for embedding and tests.
#[derive(Debug, Default)]
pub struct StaticSource {
    snapshot: DiscoverySnapshot,
}

impl StaticSource {
    pub fn new(apps: Vec<AppRecord>, plugins: Vec<PluginManifest>) -> Self {
        Self {
            snapshot: DiscoverySnapshot { apps, plugins },
        }
    }
}

impl DiscoverySource for StaticSource {
    fn discover(&self) -> Result<DiscoverySnapshot> {
        Ok(self.snapshot.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserialize_full_manifest() {
        let manifest_json = json!({
            "name": "Translate",
            "path": "/plugins/translate",
            "logo": "logo.png",
            "features": [
                {
                    "code": "translate-text",
                    "explain": "Translate selected text",
                    "cmds": [
                        "translate",
                        { "type": "regex", "minLength": 3, "match": "/^[a-z ]+$/i" },
                        { "type": "over", "minLength": 2, "maxLength": 200, "exclude": "/^\\d+$/" }
                    ]
                }
            ]
        });

        let manifest: PluginManifest =
            serde_json::from_value(manifest_json).expect("should deserialize");
        assert_eq!(manifest.name, "Translate");
        assert!(manifest.main.is_none());
        let cmds = &manifest.features[0].cmds;
        assert_eq!(cmds.len(), 3);
        assert!(cmds[0].is_text());
        match &cmds[1] {
            FeatureCommand::Match(MatchCommand::Regex {
                min_length,
                pattern,
                ..
            }) => {
                assert_eq!(*min_length, 3);
                assert_eq!(pattern, "/^[a-z ]+$/i");
            }
            other => panic!("expected regex command, got {other:?}"),
        }
        match &cmds[2] {
            FeatureCommand::Match(MatchCommand::Over {
                min_length,
                max_length,
                exclude,
                ..
            }) => {
                assert_eq!(*min_length, Some(2));
                assert_eq!(*max_length, Some(200));
                assert!(exclude.is_some());
            }
            other => panic!("expected over command, got {other:?}"),
        }
    }

    #[test]
    fn deserialize_minimal_manifest() {
        let manifest_json = json!({
            "name": "Bare",
            "path": "/plugins/bare"
        });

        let manifest: PluginManifest =
            serde_json::from_value(manifest_json).expect("should deserialize");
        assert!(manifest.features.is_empty());
        assert!(manifest.logo.is_none());
    }

    #[test]
    fn static_source_round_trips_records() {
        let source = StaticSource::new(
            vec![AppRecord {
                name: "Terminal".to_string(),
                path: "/apps/terminal".to_string(),
                icon: None,
            }],
            Vec::new(),
        );
        let snapshot = source.discover().expect("discover");
        assert_eq!(snapshot.apps.len(), 1);
        assert_eq!(snapshot.apps[0].name, "Terminal");
    }
}
