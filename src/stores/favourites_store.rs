//! Favourites overlay - the signed-in user's favourite DJs
//!
//! Toggles are optimistic and two-phase: the local set changes first, then
//! the backend is asked to follow. A failed request reverts the change, but
//! only while it is still the latest toggle on that DJ. A later toggle is the
//! user's newer intent and stays on display until the next full refetch.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

use super::{LoaderError, LoaderKind};
use crate::api::DjApi;
use crate::core::FilterCriteria;
use crate::models::{DjId, DjRecord};

/// Prefix for a toggle the backend refused
const UPDATE_FAILED: &str = "Error updating favourites";

/// What a toggle ended up doing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The backend accepted the change
    Committed { favourite: bool },
    /// The backend refused; local state went back to `favourite`
    RolledBack { favourite: bool, error: LoaderError },
    /// The request failed after a newer toggle on the same DJ; nothing reverted
    Superseded,
}

impl ToggleOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, ToggleOutcome::Committed { .. })
    }
}

/// An applied but not yet confirmed toggle
#[derive(Debug, Clone, Copy)]
struct PendingToggle {
    seq: u64,
    /// Position the record held, for putting it back on rollback
    index: usize,
}

#[derive(Debug, Default)]
struct FavouritesState {
    /// Favourites in the order they were added
    records: Vec<DjRecord>,
    /// Latest unconfirmed toggle per DJ
    pending: HashMap<DjId, PendingToggle>,
    next_seq: u64,
    loaded: bool,
    error: Option<LoaderError>,
}

impl FavouritesState {
    fn position(&self, id: DjId) -> Option<usize> {
        self.records.iter().position(|dj| dj.id == id)
    }
}

#[derive(Debug, Default)]
pub struct FavouritesStore {
    state: RwLock<FavouritesState>,
}

impl FavouritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// GET /api/me/favourites, replacing local state wholesale
    pub async fn load(&self, api: &dyn DjApi) -> bool {
        match api.fetch_favourites().await {
            Ok(records) => {
                tracing::debug!("Loaded {} favourites", records.len());
                let mut state = self.state.write();
                state.records = records;
                state.pending.clear();
                state.loaded = true;
                state.error = None;
                true
            }
            Err(e) => {
                let error = LoaderError::from_cause(LoaderKind::Favourites, &e);
                tracing::error!("{}", error.message);
                self.state.write().error = Some(error);
                false
            }
        }
    }

    pub fn is_favourite(&self, id: DjId) -> bool {
        self.state.read().position(id).is_some()
    }

    pub fn ids(&self) -> HashSet<DjId> {
        self.state.read().records.iter().map(|dj| dj.id).collect()
    }

    pub fn records(&self) -> Vec<DjRecord> {
        self.state.read().records.clone()
    }

    pub fn count(&self) -> usize {
        self.state.read().records.len()
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().loaded
    }

    /// True while any toggle waits for the backend
    pub fn has_pending(&self) -> bool {
        !self.state.read().pending.is_empty()
    }

    pub fn error(&self) -> Option<LoaderError> {
        self.state.read().error.clone()
    }

    /// Favourites passing `criteria`, in favourite order
    pub fn filtered(&self, criteria: &FilterCriteria) -> Vec<DjRecord> {
        let state = self.state.read();
        criteria
            .apply(&state.records)
            .into_iter()
            .cloned()
            .collect()
    }

    /// Flip membership of `dj` locally, then commit it to the backend
    pub async fn toggle(&self, api: &dyn DjApi, dj: &DjRecord) -> ToggleOutcome {
        let (seq, was_favourite) = self.apply_local(dj);

        let result = if was_favourite {
            api.remove_favourite(dj.id).await
        } else {
            api.add_favourite(dj.id).await
        };

        let mut state = self.state.write();
        let latest = state.pending.get(&dj.id).map(|p| p.seq) == Some(seq);

        match result {
            Ok(()) => {
                if latest {
                    state.pending.remove(&dj.id);
                    state.error = None;
                }
                ToggleOutcome::Committed {
                    favourite: !was_favourite,
                }
            }
            Err(e) if latest => {
                let pending = state.pending.remove(&dj.id);
                let index = pending.map(|p| p.index).unwrap_or(state.records.len());
                if was_favourite {
                    let index = index.min(state.records.len());
                    state.records.insert(index, dj.clone());
                } else if let Some(pos) = state.position(dj.id) {
                    state.records.remove(pos);
                }

                let error = LoaderError::with_context(LoaderKind::Favourites, UPDATE_FAILED, &e);
                tracing::warn!("Rolled back favourite toggle on DJ {}: {}", dj.id, e);
                state.error = Some(error.clone());
                ToggleOutcome::RolledBack {
                    favourite: was_favourite,
                    error,
                }
            }
            Err(e) => {
                tracing::warn!(
                    "Favourite request for DJ {} failed after a newer toggle: {}",
                    dj.id,
                    e
                );
                ToggleOutcome::Superseded
            }
        }
    }

    /// Phase one: change local membership and remember how to undo it
    fn apply_local(&self, dj: &DjRecord) -> (u64, bool) {
        let mut state = self.state.write();
        state.next_seq += 1;
        let seq = state.next_seq;

        let (was_favourite, index) = match state.position(dj.id) {
            Some(pos) => {
                state.records.remove(pos);
                (true, pos)
            }
            None => {
                state.records.push(dj.clone());
                (false, state.records.len() - 1)
            }
        };

        state.pending.insert(
            dj.id,
            PendingToggle { seq, index },
        );
        tracing::debug!(
            "Toggled DJ {} to {} (seq {})",
            dj.id,
            if was_favourite { "not favourite" } else { "favourite" },
            seq
        );

        (seq, was_favourite)
    }
}
