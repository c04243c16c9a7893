//! Document persistence consumed by the history and pinned stores.
//!
//! A deliberately small contract: keyed JSON documents with last-write-wins
//! revision tracking. Callers read before writing so they can hand the
//! current revision back; a stale revision is rejected with a conflict.

mod file;
mod memory;

pub use file::FileDocStore;
pub use memory::MemoryDocStore;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// A stored document.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub key: String,
    pub rev: u64,
    pub data: Value,
}

/// Acknowledgement of a successful put.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutReceipt {
    pub key: String,
    pub rev: u64,
}

/// Keyed JSON document store with revision tracking.
#[async_trait]
pub trait DocStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<Document>>;

    /// Writes `data` under `key`. `expected_rev` must match the stored
    /// revision (`None` for a document that does not exist yet) or the
    /// write is rejected with [`QuickdexError::Conflict`].
    ///
    /// [`QuickdexError::Conflict`]: crate::error::QuickdexError::Conflict
    async fn put(&self, key: &str, data: Value, expected_rev: Option<u64>) -> Result<PutReceipt>;
}

pub(crate) fn validate_key(key: &str) -> Result<()> {
    if key.is_empty() || key == "." || key == ".." {
        return Err(crate::error::QuickdexError::InvalidInput(format!(
            "invalid document key {key}"
        )));
    }
    if key.contains('/') || key.contains('\\') {
        return Err(crate::error::QuickdexError::InvalidInput(format!(
            "invalid document key {key}"
        )));
    }
    Ok(())
}
