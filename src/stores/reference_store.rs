//! Reference data loaders for the filter controls
//!
//! Genres and venues load unconditionally. Subgenres depend on the selected
//! genre: every selection change issues a new request token and empties the
//! options at once, and a response is applied only if its token is still the
//! latest one issued.

use parking_lot::RwLock;

use super::{ErrorSlots, LoaderError, LoaderKind};
use crate::api::{ApiResult, DjApi};
use crate::models::{GenreRef, SubgenreRef, VenueRef};

/// Handle for one in-flight subgenre fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubgenreRequest {
    pub token: u64,
    pub genre: String,
}

#[derive(Debug, Default)]
struct ReferenceState {
    genres: Vec<GenreRef>,
    venues: Vec<VenueRef>,
    subgenres: Vec<SubgenreRef>,
    /// Genre the current subgenre options belong to
    subgenres_for: Option<String>,
    latest_token: u64,
    errors: ErrorSlots,
}

#[derive(Debug, Default)]
pub struct ReferenceStore {
    state: RwLock<ReferenceState>,
}

impl ReferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// GET /api/genres into the genre options
    pub async fn load_genres(&self, api: &dyn DjApi) -> bool {
        let result = api.fetch_genres().await;
        self.apply(LoaderKind::Genres, result, |state, genres| {
            state.genres = genres
        })
    }

    /// GET /api/venues into the venue options
    pub async fn load_venues(&self, api: &dyn DjApi) -> bool {
        let result = api.fetch_venues().await;
        self.apply(LoaderKind::Venues, result, |state, venues| {
            state.venues = venues
        })
    }

    fn apply<T>(
        &self,
        kind: LoaderKind,
        result: ApiResult<T>,
        store: impl FnOnce(&mut ReferenceState, T),
    ) -> bool {
        let mut state = self.state.write();
        match result {
            Ok(value) => {
                store(&mut state, value);
                state.errors.clear(kind);
                true
            }
            Err(e) => {
                tracing::error!("{}: {}", kind.failure_text(), e);
                state.errors.set(LoaderError::from_cause(kind, &e));
                false
            }
        }
    }

    /// Invalidate the current subgenre options for a new genre selection.
    ///
    /// Returns the request to issue, or `None` when no genre is selected and
    /// the options simply stay empty.
    pub fn begin_subgenres(&self, genre: Option<&str>) -> Option<SubgenreRequest> {
        let mut state = self.state.write();
        state.latest_token += 1;
        state.subgenres.clear();
        state.subgenres_for = None;

        let genre = genre.filter(|g| !g.is_empty())?;
        Some(SubgenreRequest {
            token: state.latest_token,
            genre: genre.to_string(),
        })
    }

    /// Apply a subgenre response if it still belongs to the latest request.
    ///
    /// Returns whether the response was applied.
    pub fn finish_subgenres(
        &self,
        request: &SubgenreRequest,
        result: ApiResult<Vec<SubgenreRef>>,
    ) -> bool {
        let mut state = self.state.write();
        if request.token != state.latest_token {
            tracing::debug!(
                "Discarding stale subgenres for {} (token {}, latest {})",
                request.genre,
                request.token,
                state.latest_token
            );
            return false;
        }

        match result {
            Ok(subgenres) => {
                state.subgenres = subgenres;
                state.subgenres_for = Some(request.genre.clone());
                state.errors.clear(LoaderKind::Subgenres);
            }
            Err(e) => {
                tracing::error!("Error fetching subgenres for {}: {}", request.genre, e);
                state
                    .errors
                    .set(LoaderError::from_cause(LoaderKind::Subgenres, &e));
            }
        }
        true
    }

    /// Reload the subgenre options for `genre`
    pub async fn load_subgenres(&self, api: &dyn DjApi, genre: Option<&str>) -> bool {
        let Some(request) = self.begin_subgenres(genre) else {
            return true;
        };
        let result = api.fetch_subgenres(&request.genre).await;
        self.finish_subgenres(&request, result)
    }

    pub fn genres(&self) -> Vec<GenreRef> {
        self.state.read().genres.clone()
    }

    pub fn venues(&self) -> Vec<VenueRef> {
        self.state.read().venues.clone()
    }

    pub fn subgenres(&self) -> Vec<SubgenreRef> {
        self.state.read().subgenres.clone()
    }

    pub fn subgenres_for(&self) -> Option<String> {
        self.state.read().subgenres_for.clone()
    }

    pub fn error(&self, kind: LoaderKind) -> Option<LoaderError> {
        self.state.read().errors.get(kind)
    }

    pub fn errors(&self) -> Vec<LoaderError> {
        self.state.read().errors.all()
    }
}
