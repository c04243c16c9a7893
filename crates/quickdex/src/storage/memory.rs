//! In-memory document store, the default for tests and embedding.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;

use crate::error::{QuickdexError, Result};

use super::{validate_key, DocStore, Document, PutReceipt};

#[derive(Debug, Default)]
pub struct MemoryDocStore {
    docs: Mutex<HashMap<String, (u64, Value)>>,
}

impl MemoryDocStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocStore for MemoryDocStore {
    async fn get(&self, key: &str) -> Result<Option<Document>> {
        validate_key(key)?;
        Ok(self.docs.lock().get(key).map(|(rev, data)| Document {
            key: key.to_string(),
            rev: *rev,
            data: data.clone(),
        }))
    }

    async fn put(&self, key: &str, data: Value, expected_rev: Option<u64>) -> Result<PutReceipt> {
        validate_key(key)?;
        let mut docs = self.docs.lock();
        let current = docs.get(key).map(|(rev, _)| *rev);
        if current != expected_rev {
            return Err(QuickdexError::Conflict(key.to_string()));
        }
        let rev = current.unwrap_or(0) + 1;
        docs.insert(key.to_string(), (rev, data));
        Ok(PutReceipt {
            key: key.to_string(),
            rev,
        })
    }
}
