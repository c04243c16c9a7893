//! Usage history: recency-ordered, persisted wholesale after every mutation.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::DocStore;
use crate::types::{EntryId, EntryKind, IndexEntry};

/// Fixed document identity of the persisted history snapshot.
pub const HISTORY_DOC_KEY: &str = "app-history";

/// One line of usage history. Display fields are denormalized so the record
/// stays renderable after the underlying entry disappears from the index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: EntryId,
    pub name: String,
    pub icon: Option<String>,
    pub kind: EntryKind,
    pub explain: Option<String>,
    /// Unix milliseconds of the most recent use.
    pub last_used_at: i64,
    pub use_count: u32,
}

/// In-memory history list synchronized to the document store.
///
/// In-memory state is the source of truth for reads; persistence failures
/// are logged and never roll a mutation back.
pub struct HistoryStore {
    store: Arc<dyn DocStore>,
    records: Vec<HistoryRecord>,
    rev: Option<u64>,
}

impl HistoryStore {
    /// Restores history from the store, degrading to an empty list when the
    /// document is missing or unreadable.
    pub async fn load(store: Arc<dyn DocStore>) -> Self {
        match store.get(HISTORY_DOC_KEY).await {
            Ok(Some(doc)) => {
                let rev = Some(doc.rev);
                match serde_json::from_value(doc.data) {
                    Ok(records) => Self {
                        store,
                        records,
                        rev,
                    },
                    Err(error) => {
                        log::warn!("history document unreadable, starting empty: {error}");
                        Self {
                            store,
                            records: Vec::new(),
                            rev,
                        }
                    }
                }
            }
            Ok(None) => Self {
                store,
                records: Vec::new(),
                rev: None,
            },
            Err(error) => {
                log::warn!("history load failed, starting empty: {error}");
                Self {
                    store,
                    records: Vec::new(),
                    rev: None,
                }
            }
        }
    }

    /// Upserts a usage event for `entry`: refreshes the timestamp and bumps
    /// the counter on repeat use, inserts with a count of one otherwise.
    /// The list ends up most-recent-first either way.
    pub async fn record(&mut self, entry: &IndexEntry) {
        let now = chrono::Utc::now().timestamp_millis();

        if let Some(pos) = self.records.iter().position(|r| r.id == entry.id) {
            let mut existing = self.records.remove(pos);
            existing.last_used_at = now;
            existing.use_count += 1;
            self.records.insert(0, existing);
        } else {
            self.records.insert(
                0,
                HistoryRecord {
                    id: entry.id.clone(),
                    name: entry.display_name.clone(),
                    icon: entry.icon.clone(),
                    kind: entry.kind,
                    explain: entry.explain.clone(),
                    last_used_at: now,
                    use_count: 1,
                },
            );
        }

        self.resort();
        self.persist().await;
    }

    /// The first `limit` records in recency order, or all of them.
    pub fn list(&self, limit: Option<usize>) -> &[HistoryRecord] {
        match limit {
            Some(n) => &self.records[..n.min(self.records.len())],
            None => &self.records,
        }
    }

    pub async fn remove(&mut self, id: &EntryId) {
        let before = self.records.len();
        self.records.retain(|record| &record.id != id);
        if self.records.len() != before {
            self.persist().await;
        }
    }

    pub async fn clear(&mut self) {
        self.records.clear();
        self.persist().await;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn resort(&mut self) {
        // Stable: the freshly-touched record stays first among equal stamps.
        self.records
            .sort_by(|a, b| b.last_used_at.cmp(&a.last_used_at));
    }

    async fn persist(&mut self) {
        let data = match serde_json::to_value(&self.records) {
            Ok(data) => data,
            Err(error) => {
                log::warn!("history snapshot failed to serialize: {error}");
                return;
            }
        };
        match self.store.put(HISTORY_DOC_KEY, data, self.rev).await {
            Ok(receipt) => self.rev = Some(receipt.rev),
            Err(error) => {
                log::warn!("history persistence failed, keeping in-memory state: {error}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{QuickdexError, Result};
    use crate::storage::{Document, MemoryDocStore, PutReceipt};
    use async_trait::async_trait;
    use serde_json::Value;

    fn entry(path: &str, name: &str) -> IndexEntry {
        IndexEntry {
            id: EntryId::App {
                path: path.to_string(),
            },
            display_name: name.to_string(),
            icon: None,
            kind: EntryKind::Application,
            explain: None,
            phonetic_key: String::new(),
            phonetic_initials: String::new(),
            policy: None,
        }
    }

    fn plugin_entry(path: &str, feature: &str) -> IndexEntry {
        IndexEntry {
            id: EntryId::Plugin {
                path: path.to_string(),
                feature: Some(feature.to_string()),
            },
            display_name: feature.to_string(),
            icon: None,
            kind: EntryKind::PluginTextCommand,
            explain: None,
            phonetic_key: String::new(),
            phonetic_initials: String::new(),
            policy: None,
        }
    }

    #[tokio::test]
    async fn repeat_use_upserts_one_record() {
        let store = Arc::new(MemoryDocStore::new());
        let mut history = HistoryStore::load(store).await;

        let terminal = entry("/apps/terminal", "Terminal");
        for _ in 0..5 {
            history.record(&terminal).await;
        }

        assert_eq!(history.len(), 1);
        assert_eq!(history.list(None)[0].use_count, 5);
    }

    #[tokio::test]
    async fn most_recent_record_is_first() {
        let store = Arc::new(MemoryDocStore::new());
        let mut history = HistoryStore::load(store).await;

        history.record(&entry("/a", "A")).await;
        history.record(&entry("/b", "B")).await;
        assert_eq!(history.list(None)[0].name, "B");

        history.record(&entry("/a", "A")).await;
        assert_eq!(history.list(None)[0].name, "A");
        assert_eq!(history.list(None)[0].use_count, 2);
    }

    #[tokio::test]
    async fn plugin_features_are_distinct_history_lines() {
        let store = Arc::new(MemoryDocStore::new());
        let mut history = HistoryStore::load(store).await;

        history.record(&plugin_entry("/p", "translate")).await;
        history.record(&plugin_entry("/p", "ocr")).await;

        assert_eq!(history.len(), 2);
    }

    #[tokio::test]
    async fn list_limit_truncates() {
        let store = Arc::new(MemoryDocStore::new());
        let mut history = HistoryStore::load(store).await;

        for i in 0..4 {
            history.record(&entry(&format!("/app-{i}"), "App")).await;
        }

        assert_eq!(history.list(Some(2)).len(), 2);
        assert_eq!(history.list(Some(99)).len(), 4);
        assert_eq!(history.list(None).len(), 4);
    }

    #[tokio::test]
    async fn remove_and_clear_persist() {
        let store = Arc::new(MemoryDocStore::new());
        let mut history = HistoryStore::load(store.clone()).await;

        history.record(&entry("/a", "A")).await;
        history.record(&entry("/b", "B")).await;

        history
            .remove(&EntryId::App {
                path: "/a".to_string(),
            })
            .await;
        assert_eq!(history.len(), 1);

        history.clear().await;
        assert!(history.is_empty());

        let reloaded = HistoryStore::load(store).await;
        assert!(reloaded.is_empty());
    }

    #[tokio::test]
    async fn state_survives_reload() {
        let store = Arc::new(MemoryDocStore::new());
        {
            let mut history = HistoryStore::load(store.clone()).await;
            history.record(&entry("/a", "A")).await;
            history.record(&entry("/a", "A")).await;
        }

        let reloaded = HistoryStore::load(store).await;
        assert_eq!(reloaded.len(), 1);
        assert_eq!(reloaded.list(None)[0].use_count, 2);
    }

    struct FailingStore;

    #[async_trait]
    impl crate::storage::DocStore for FailingStore {
        async fn get(&self, _key: &str) -> Result<Option<Document>> {
            Err(QuickdexError::Storage("offline".to_string()))
        }

        async fn put(&self, _key: &str, _data: Value, _rev: Option<u64>) -> Result<PutReceipt> {
            Err(QuickdexError::Storage("offline".to_string()))
        }
    }

    #[tokio::test]
    async fn persistence_failure_does_not_roll_back() {
        let mut history = HistoryStore::load(Arc::new(FailingStore)).await;
        history.record(&entry("/a", "A")).await;
        assert_eq!(history.len(), 1);
    }
}
