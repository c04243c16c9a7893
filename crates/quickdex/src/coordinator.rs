//! Index lifecycle: builds generations off to the side and swaps them in
//! atomically, coalescing bursts of change notifications.

use std::sync::Arc;

use parking_lot::{Mutex, RwLock};

use crate::discovery::DiscoverySource;
use crate::index::build_snapshot;
use crate::search::{SearchIndex, SearchResponse};

/// Where the coordinator is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    /// No build has been requested yet.
    Uninitialized,
    /// A build is in flight. Queries are served from the previous
    /// generation, which is empty before the first build completes.
    Loading,
    /// The most recent build is live.
    Ready,
}

struct Lifecycle {
    state: IndexState,
    pending: bool,
}

/// Owns the live [`SearchIndex`] generation and rebuilds it on demand.
///
/// Rebuilds never mutate the live generation: discovery and index
/// construction happen entirely on a fresh [`SearchIndex`], which replaces
/// the old one in a single pointer swap. Readers therefore always see one
/// complete generation, never a partial build.
///
/// Change notifications arriving while a build is in flight collapse into a
/// single follow-up build, so a burst of filesystem events costs at most one
/// extra pass over the sources.
pub struct IndexCoordinator {
    source: Arc<dyn DiscoverySource>,
    current: RwLock<Arc<SearchIndex>>,
    lifecycle: Mutex<Lifecycle>,
}

impl IndexCoordinator {
    pub fn new(source: Arc<dyn DiscoverySource>) -> Self {
        Self {
            source,
            current: RwLock::new(Arc::new(SearchIndex::empty())),
            lifecycle: Mutex::new(Lifecycle {
                state: IndexState::Uninitialized,
                pending: false,
            }),
        }
    }

    pub fn state(&self) -> IndexState {
        self.lifecycle.lock().state
    }

    /// Runs the first build. Equivalent to [`notify_changed`]; the name
    /// marks the call sites that happen at startup.
    ///
    /// [`notify_changed`]: IndexCoordinator::notify_changed
    pub async fn initialize(&self) {
        self.notify_changed().await;
    }

    /// Requests a rebuild from the discovery source.
    ///
    /// If a build is already in flight this only marks a follow-up pass and
    /// returns immediately; any number of such requests collapse into one
    /// extra build. Otherwise the call drives the rebuild to completion.
    pub async fn notify_changed(&self) {
        {
            let mut lifecycle = self.lifecycle.lock();
            if lifecycle.state == IndexState::Loading {
                lifecycle.pending = true;
                return;
            }
            lifecycle.state = IndexState::Loading;
        }

        loop {
            self.rebuild_once().await;

            let mut lifecycle = self.lifecycle.lock();
            if lifecycle.pending {
                lifecycle.pending = false;
            } else {
                lifecycle.state = IndexState::Ready;
                return;
            }
        }
    }

    /// Answers one query against the live generation.
    ///
    /// Always non-blocking with respect to rebuilds: a build in flight keeps
    /// serving the previous generation, and before the first build completes
    /// that generation is empty.
    pub fn search(&self, query: &str) -> SearchResponse {
        let index = Arc::clone(&self.current.read());
        index.search(query)
    }

    pub fn entry_count(&self) -> usize {
        self.current.read().len()
    }

    async fn rebuild_once(&self) {
        let source = Arc::clone(&self.source);
        let discovered = tokio::task::spawn_blocking(move || source.discover()).await;

        match discovered {
            Ok(Ok(snapshot)) => {
                let built = build_snapshot(&snapshot.apps, &snapshot.plugins);
                let next = Arc::new(SearchIndex::build(built));
                log::info!("index rebuilt entries={}", next.len());
                *self.current.write() = next;
            }
            Ok(Err(error)) => {
                log::warn!("discovery failed, keeping previous index: {error}");
            }
            Err(error) => {
                log::warn!("discovery task failed, keeping previous index: {error}");
            }
        }
    }
}
