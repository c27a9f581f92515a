//! Shared, reloadable holder for the loaded knowledge base.

use std::sync::{Arc, RwLock};
use tracing::{error, info, warn};

use super::loader::{self, DataSource};
use super::schema::KnowledgeBase;
use crate::error::AppError;

/// Load lifecycle of the knowledge base.
#[derive(Debug, Clone)]
pub enum LoadState {
    /// No load has completed yet.
    Loading,
    Ready(Arc<KnowledgeBase>),
    /// The last load failed; the message is the cause.
    Failed(String),
}

/// Publishes the current knowledge base snapshot to every turn.
///
/// Readers take an `Arc` snapshot, so a reload never disturbs a turn in flight.
#[derive(Debug, Clone)]
pub struct KnowledgeStore {
    source: DataSource,
    state: Arc<RwLock<LoadState>>,
}

impl KnowledgeStore {
    /// Creates a store in the `Loading` state; call [`KnowledgeStore::reload`] to fill it.
    pub fn new(source: DataSource) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(LoadState::Loading)),
        }
    }

    /// Creates a store that is already `Ready` with `kb`.
    pub fn with_knowledge(source: DataSource, kb: KnowledgeBase) -> Self {
        Self {
            source,
            state: Arc::new(RwLock::new(LoadState::Ready(Arc::new(kb)))),
        }
    }

    pub fn source(&self) -> &DataSource {
        &self.source
    }

    pub fn state(&self) -> LoadState {
        match self.state.read() {
            Ok(guard) => guard.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// The current knowledge base, or `None` while loading or after a failure.
    pub fn snapshot(&self) -> Option<Arc<KnowledgeBase>> {
        match self.state() {
            LoadState::Ready(kb) => Some(kb),
            LoadState::Loading | LoadState::Failed(_) => None,
        }
    }

    /// (Re)loads the document from the configured source.
    ///
    /// On success the new snapshot replaces the old one. On failure the store
    /// moves to `Failed` and the error is returned for the caller to report.
    pub async fn reload(&self) -> Result<Arc<KnowledgeBase>, AppError> {
        match loader::load_from(&self.source).await {
            Ok(kb) => {
                for warning in kb.validate() {
                    warn!("knowledge base: {}", warning);
                }
                let kb = Arc::new(kb);
                self.set(LoadState::Ready(Arc::clone(&kb)));
                info!(source = %self.source, "knowledge base ready");
                Ok(kb)
            }
            Err(e) => {
                error!(source = %self.source, "failed to load knowledge base: {}", e);
                self.set(LoadState::Failed(e.to_string()));
                Err(e)
            }
        }
    }

    fn set(&self, next: LoadState) {
        match self.state.write() {
            Ok(mut guard) => *guard = next,
            Err(poisoned) => *poisoned.into_inner() = next,
        }
    }
}
