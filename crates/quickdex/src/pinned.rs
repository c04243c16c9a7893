//! User-pinned entries: an explicitly ordered list under user control.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::storage::DocStore;
use crate::types::{EntryId, EntryKind, IndexEntry};

/// Fixed document identity of the persisted pinned list.
pub const PINNED_DOC_KEY: &str = "pinned-apps";

/// A pinned entry. Like history records, display fields are denormalized
/// so the pin outlives the indexed entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PinnedRecord {
    pub id: EntryId,
    pub name: String,
    pub icon: Option<String>,
    pub kind: EntryKind,
    pub explain: Option<String>,
}

impl PinnedRecord {
    fn from_entry(entry: &IndexEntry) -> Self {
        Self {
            id: entry.id.clone(),
            name: entry.display_name.clone(),
            icon: entry.icon.clone(),
            kind: entry.kind,
            explain: entry.explain.clone(),
        }
    }
}

/// Ordered, duplicate-free pinned list synchronized to the document store.
///
/// Order is owned by the user: new pins append, and [`reorder`] replaces the
/// whole list. Nothing here re-sorts on the user's behalf.
///
/// [`reorder`]: PinnedStore::reorder
pub struct PinnedStore {
    store: Arc<dyn DocStore>,
    records: Vec<PinnedRecord>,
    rev: Option<u64>,
}

impl PinnedStore {
    /// Restores the pinned list, degrading to empty when the document is
    /// missing or unreadable.
    pub async fn load(store: Arc<dyn DocStore>) -> Self {
        match store.get(PINNED_DOC_KEY).await {
            Ok(Some(doc)) => {
                let rev = Some(doc.rev);
                match serde_json::from_value(doc.data) {
                    Ok(records) => Self {
                        store,
                        records,
                        rev,
                    },
                    Err(error) => {
                        log::warn!("pinned document unreadable, starting empty: {error}");
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
                log::warn!("pinned load failed, starting empty: {error}");
                Self {
                    store,
                    records: Vec::new(),
                    rev: None,
                }
            }
        }
    }

    /// Appends `entry` to the pinned list. Pinning an already-pinned entry
    /// is a no-op and does not disturb its position.
    pub async fn pin(&mut self, entry: &IndexEntry) {
        if self.is_pinned(&entry.id) {
            return;
        }
        self.records.push(PinnedRecord::from_entry(entry));
        self.persist().await;
    }

    pub async fn unpin(&mut self, id: &EntryId) {
        let before = self.records.len();
        self.records.retain(|record| &record.id != id);
        if self.records.len() != before {
            self.persist().await;
        }
    }

    pub fn is_pinned(&self, id: &EntryId) -> bool {
        self.records.iter().any(|record| &record.id == id)
    }

    /// The pinned list in user order.
    pub fn list(&self) -> &[PinnedRecord] {
        &self.records
    }

    /// Replaces the whole list with `records`, dropping any duplicate ids
    /// after their first occurrence.
    pub async fn reorder(&mut self, records: Vec<PinnedRecord>) {
        let mut seen: Vec<&EntryId> = Vec::with_capacity(records.len());
        let mut deduped = Vec::with_capacity(records.len());
        for record in &records {
            if seen.contains(&&record.id) {
                continue;
            }
            deduped.push(record.clone());
            seen.push(&record.id);
        }
        self.records = deduped;
        self.persist().await;
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

    async fn persist(&mut self) {
        let data = match serde_json::to_value(&self.records) {
            Ok(data) => data,
            Err(error) => {
                log::warn!("pinned snapshot failed to serialize: {error}");
                return;
            }
        };
        match self.store.put(PINNED_DOC_KEY, data, self.rev).await {
            Ok(receipt) => self.rev = Some(receipt.rev),
            Err(error) => {
                log::warn!("pinned persistence failed, keeping in-memory state: {error}");
            }
        }
    }
}
