//! Catalog store - the DJ list snapshot fetched from the backend

use parking_lot::RwLock;
use std::sync::Arc;

use super::{LoaderError, LoaderKind};
use crate::api::DjApi;
use crate::models::{DjId, DjRecord};

#[derive(Debug, Default)]
struct CatalogState {
    /// Server-ordered snapshot, replaced wholesale on every successful fetch
    snapshot: Arc<Vec<DjRecord>>,
    loaded: bool,
    error: Option<LoaderError>,
}

/// Holds the last successfully fetched DJ list
#[derive(Debug, Default)]
pub struct CatalogStore {
    state: RwLock<CatalogState>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the full DJ collection once.
    ///
    /// A failure keeps the previous snapshot and records the error; there is
    /// no retry.
    pub async fn load(&self, api: &dyn DjApi) -> bool {
        match api.fetch_djs().await {
            Ok(djs) => {
                tracing::debug!("Catalog loaded with {} DJs", djs.len());
                let mut state = self.state.write();
                state.snapshot = Arc::new(djs);
                state.loaded = true;
                state.error = None;
                true
            }
            Err(e) => {
                tracing::error!("Error fetching DJs: {}", e);
                self.state.write().error = Some(LoaderError::from_cause(LoaderKind::Catalog, &e));
                false
            }
        }
    }

    /// Current snapshot; empty until the first successful load
    pub fn snapshot(&self) -> Arc<Vec<DjRecord>> {
        Arc::clone(&self.state.read().snapshot)
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().loaded
    }

    pub fn error(&self) -> Option<LoaderError> {
        self.state.read().error.clone()
    }

    pub fn count(&self) -> usize {
        self.state.read().snapshot.len()
    }

    pub fn get_by_id(&self, id: DjId) -> Option<DjRecord> {
        self.state
            .read()
            .snapshot
            .iter()
            .find(|dj| dj.id == id)
            .cloned()
    }
}
