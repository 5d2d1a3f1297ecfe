//! DJ browsing view
//!
//! Ties the catalog, reference loaders, filter state and favourites together
//! the way the list page uses them. Each method corresponds to one user event;
//! locks are released before any request is awaited, so concurrent events
//! interleave like discrete UI callbacks.

use parking_lot::RwLock;
use std::sync::Arc;

use super::FilterCriteria;
use crate::api::DjApi;
use crate::models::{DjId, DjRecord, GenreRef, SubgenreRef, VenueRef};
use crate::stores::{
    CatalogStore, FavouritesStore, LoaderError, ReferenceStore, ToggleOutcome,
};

pub const NO_DJS_FOUND: &str = "No DJs found";
pub const NO_FAVOURITES_FOUND: &str = "No favourites found";

/// A visible DJ with its favourite decoration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DjRow {
    pub dj: DjRecord,
    pub favourite: bool,
}

/// What the list area shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingStatus {
    /// The fetch failed and nothing can be shown
    Error(String),
    /// Nothing matches
    Empty,
    Rows(Vec<DjRow>),
}

impl ListingStatus {
    pub fn rows(&self) -> &[DjRow] {
        match self {
            ListingStatus::Rows(rows) => rows,
            _ => &[],
        }
    }
}

pub struct DjBrowser {
    api: Arc<dyn DjApi>,
    catalog: CatalogStore,
    reference: ReferenceStore,
    favourites: FavouritesStore,
    criteria: RwLock<FilterCriteria>,
}

impl DjBrowser {
    pub fn new(api: Arc<dyn DjApi>) -> Self {
        Self {
            api,
            catalog: CatalogStore::new(),
            reference: ReferenceStore::new(),
            favourites: FavouritesStore::new(),
            criteria: RwLock::new(FilterCriteria::default()),
        }
    }

    /// Initial population: catalog, genres and venues in parallel.
    /// Subgenres wait for a genre selection.
    pub async fn mount(&self) {
        let api = self.api.as_ref();
        futures::join!(
            self.catalog.load(api),
            self.reference.load_genres(api),
            self.reference.load_venues(api),
        );
        tracing::debug!(
            "Browser mounted: {} DJs, {} genres, {} venues",
            self.catalog.count(),
            self.reference.genres().len(),
            self.reference.venues().len()
        );
    }

    /// Re-fetch the catalog, e.g. after a DJ was added
    pub async fn reload_catalog(&self) -> bool {
        self.catalog.load(self.api.as_ref()).await
    }

    /// Fetch the signed-in user's favourites
    pub async fn load_favourites(&self) -> bool {
        self.favourites.load(self.api.as_ref()).await
    }

    pub fn set_search(&self, text: &str) {
        self.criteria.write().name_substring = text.to_string();
    }

    /// Select a genre (or none). The subgenre selection and options reset at
    /// once; the new options arrive when the fetch resolves, unless a later
    /// selection has superseded it by then.
    pub async fn select_genre(&self, genre: Option<String>) -> bool {
        let request = {
            let mut criteria = self.criteria.write();
            criteria.set_genre(genre);
            self.reference.begin_subgenres(criteria.genre.as_deref())
        };

        let Some(request) = request else {
            return true;
        };

        let result = self.api.fetch_subgenres(&request.genre).await;
        self.reference.finish_subgenres(&request, result)
    }

    pub fn select_subgenre(&self, subgenre: Option<String>) {
        self.criteria.write().set_subgenre(subgenre);
    }

    pub fn select_venue(&self, venue: Option<String>) {
        self.criteria.write().set_venue(venue);
    }

    pub fn select_produces(&self, produces: Option<bool>) {
        self.criteria.write().produces = produces;
    }

    /// Reset every filter and drop subgenre options, including in-flight ones
    pub fn clear(&self) {
        self.criteria.write().clear();
        self.reference.begin_subgenres(None);
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria.read().clone()
    }

    /// Catalog rows passing the current criteria, in server order
    pub fn visible(&self) -> Vec<DjRow> {
        let snapshot = self.catalog.snapshot();
        let criteria = self.criteria();
        let favourites = self.favourites.ids();

        criteria
            .apply(&snapshot)
            .into_iter()
            .map(|dj| DjRow {
                favourite: favourites.contains(&dj.id),
                dj: dj.clone(),
            })
            .collect()
    }

    /// The DJ list area: rows, the empty message, or the fetch error
    pub fn listing(&self) -> ListingStatus {
        let rows = self.visible();
        if !rows.is_empty() {
            return ListingStatus::Rows(rows);
        }
        match self.catalog.error() {
            Some(err) => ListingStatus::Error(err.message),
            None => ListingStatus::Empty,
        }
    }

    /// The favourites list area, filtered by the same criteria
    pub fn favourites_listing(&self) -> ListingStatus {
        let rows: Vec<DjRow> = self
            .favourites
            .filtered(&self.criteria())
            .into_iter()
            .map(|dj| DjRow {
                dj,
                favourite: true,
            })
            .collect();

        if !rows.is_empty() {
            return ListingStatus::Rows(rows);
        }
        match self.favourites.error() {
            Some(err) if !self.favourites.is_loaded() => ListingStatus::Error(err.message),
            _ => ListingStatus::Empty,
        }
    }

    /// Toggle a DJ shown in either list. `None` if the id is unknown.
    pub async fn toggle_favourite(&self, id: DjId) -> Option<ToggleOutcome> {
        let dj = self
            .catalog
            .get_by_id(id)
            .or_else(|| self.favourites.records().into_iter().find(|dj| dj.id == id))?;
        Some(self.favourites.toggle(self.api.as_ref(), &dj).await)
    }

    pub fn is_favourite(&self, id: DjId) -> bool {
        self.favourites.is_favourite(id)
    }

    /// Every loader error currently set, ordered by loader
    pub fn errors(&self) -> Vec<LoaderError> {
        let mut errors: Vec<LoaderError> = self.catalog.error().into_iter().collect();
        errors.extend(self.reference.errors());
        errors.extend(self.favourites.error());
        errors.sort_by_key(|e| e.kind);
        errors
    }

    pub fn genres(&self) -> Vec<GenreRef> {
        self.reference.genres()
    }

    pub fn subgenres(&self) -> Vec<SubgenreRef> {
        self.reference.subgenres()
    }

    pub fn venues(&self) -> Vec<VenueRef> {
        self.reference.venues()
    }

    /// The subgenre control is only usable once a genre is picked
    pub fn subgenre_enabled(&self) -> bool {
        self.criteria.read().genre.is_some()
    }

    pub fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub fn favourites(&self) -> &FavouritesStore {
        &self.favourites
    }
}
