pub mod error;
pub mod types;

pub mod discovery;
pub mod index;
pub mod search;

pub mod coordinator;
pub mod history;
pub mod pinned;
pub mod storage;

pub use crate::coordinator::{IndexCoordinator, IndexState};
pub use crate::discovery::{AppRecord, DiscoverySnapshot, DiscoverySource, PluginManifest};
pub use crate::error::{QuickdexError, Result};
pub use crate::history::{HistoryRecord, HistoryStore};
pub use crate::pinned::{PinnedRecord, PinnedStore};
pub use crate::search::{SearchHit, SearchIndex, SearchResponse};
pub use crate::storage::{DocStore, FileDocStore, MemoryDocStore};
pub use crate::types::{EntryId, EntryKind, IndexEntry, MatchPolicy};
