//! File-backed document store: one JSON file per document under a root
//! directory, with the revision embedded alongside the payload.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{QuickdexError, Result};

use super::{validate_key, DocStore, Document, PutReceipt};

#[derive(Debug, Serialize, Deserialize)]
struct StoredDoc {
    rev: u64,
    data: Value,
}

#[derive(Debug, Clone)]
pub struct FileDocStore {
    root: PathBuf,
}

impl FileDocStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn doc_path(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{key}.json")))
    }

    async fn read_stored(&self, path: &Path) -> Result<Option<StoredDoc>> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(error) => {
                return Err(QuickdexError::Storage(format!(
                    "failed to read document {}: {error}",
                    path.display()
                )))
            }
        };
        let stored = serde_json::from_slice(&bytes).map_err(|error| {
            QuickdexError::Serialization(format!(
                "corrupt document {}: {error}",
                path.display()
            ))
        })?;
        Ok(Some(stored))
    }
}

#[async_trait]
impl DocStore for FileDocStore {
    async fn get(&self, key: &str) -> Result<Option<Document>> {
        let path = self.doc_path(key)?;
        Ok(self.read_stored(&path).await?.map(|stored| Document {
            key: key.to_string(),
            rev: stored.rev,
            data: stored.data,
        }))
    }

    async fn put(&self, key: &str, data: Value, expected_rev: Option<u64>) -> Result<PutReceipt> {
        let path = self.doc_path(key)?;
        let current = self.read_stored(&path).await?.map(|stored| stored.rev);
        if current != expected_rev {
            return Err(QuickdexError::Conflict(key.to_string()));
        }

        let rev = current.unwrap_or(0) + 1;
        let serialized = serde_json::to_vec_pretty(&StoredDoc { rev, data })
            .map_err(|error| QuickdexError::Serialization(error.to_string()))?;

        tokio::fs::create_dir_all(&self.root).await.map_err(|error| {
            QuickdexError::Storage(format!(
                "failed to create store directory {}: {error}",
                self.root.display()
            ))
        })?;
        tokio::fs::write(&path, serialized).await.map_err(|error| {
            QuickdexError::Storage(format!(
                "failed to write document {}: {error}",
                path.display()
            ))
        })?;

        Ok(PutReceipt {
            key: key.to_string(),
            rev,
        })
    }
}
