//! In-memory backend for tests
//!
//! Responses are configured up front. Subgenre fetches and favourite writes
//! can be gated on oneshot channels so a test decides when, and in which
//! order, they resolve.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::{HashMap, VecDeque};
use tokio::sync::oneshot;

use super::{ApiError, ApiResult, DjApi};
use crate::models::{DjId, DjRecord, GenreRef, SubgenreRef, VenueRef};

type Canned<T> = Mutex<Result<Vec<T>, String>>;

pub(crate) struct FakeApi {
    djs: Canned<DjRecord>,
    genres: Canned<GenreRef>,
    venues: Canned<VenueRef>,
    subgenres: Mutex<HashMap<String, Vec<SubgenreRef>>>,
    subgenre_gates: Mutex<HashMap<String, oneshot::Receiver<()>>>,
    favourites: Mutex<Vec<DjRecord>>,
    favourites_error: Mutex<Option<String>>,
    write_gates: Mutex<VecDeque<oneshot::Receiver<Result<(), String>>>>,
    write_failure: Mutex<Option<String>>,
    calls: Mutex<Vec<String>>,
}

impl FakeApi {
    pub fn new() -> Self {
        Self {
            djs: Mutex::new(Ok(Vec::new())),
            genres: Mutex::new(Ok(Vec::new())),
            venues: Mutex::new(Ok(Vec::new())),
            subgenres: Mutex::new(HashMap::new()),
            subgenre_gates: Mutex::new(HashMap::new()),
            favourites: Mutex::new(Vec::new()),
            favourites_error: Mutex::new(None),
            write_gates: Mutex::new(VecDeque::new()),
            write_failure: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_djs(self, djs: Vec<DjRecord>) -> Self {
        self.set_djs(djs);
        self
    }

    pub fn failing_djs(self, message: &str) -> Self {
        self.set_djs_error(message);
        self
    }

    pub fn with_genres(self, genres: Vec<GenreRef>) -> Self {
        *self.genres.lock() = Ok(genres);
        self
    }

    pub fn failing_genres(self, message: &str) -> Self {
        *self.genres.lock() = Err(message.to_string());
        self
    }

    pub fn with_venues(self, venues: Vec<VenueRef>) -> Self {
        self.set_venues(venues);
        self
    }

    pub fn failing_venues(self, message: &str) -> Self {
        *self.venues.lock() = Err(message.to_string());
        self
    }

    pub fn with_subgenres(self, genre: &str, subgenres: Vec<SubgenreRef>) -> Self {
        self.subgenres.lock().insert(genre.to_string(), subgenres);
        self
    }

    pub fn with_favourites(self, favourites: Vec<DjRecord>) -> Self {
        *self.favourites.lock() = favourites;
        self
    }

    pub fn failing_favourites(self, message: &str) -> Self {
        *self.favourites_error.lock() = Some(message.to_string());
        self
    }

    pub fn set_djs(&self, djs: Vec<DjRecord>) {
        *self.djs.lock() = Ok(djs);
    }

    pub fn set_djs_error(&self, message: &str) {
        *self.djs.lock() = Err(message.to_string());
    }

    pub fn set_venues(&self, venues: Vec<VenueRef>) {
        *self.venues.lock() = Ok(venues);
    }

    /// Hold the next subgenre fetch for `genre` until the sender fires
    pub fn gate_subgenres(&self, genre: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.subgenre_gates.lock().insert(genre.to_string(), rx);
        tx
    }

    /// Hold the next favourite write until the sender supplies its result.
    /// Gates are consumed in call order.
    pub fn gate_next_write(&self) -> oneshot::Sender<Result<(), String>> {
        let (tx, rx) = oneshot::channel();
        self.write_gates.lock().push_back(rx);
        tx
    }

    /// Make every ungated favourite write fail
    pub fn fail_favourite_writes(&self, message: &str) {
        *self.write_failure.lock() = Some(message.to_string());
    }

    pub fn server_favourites(&self) -> Vec<DjId> {
        self.favourites.lock().iter().map(|dj| dj.id).collect()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().push(call);
    }

    async fn write_result(&self) -> ApiResult<()> {
        let gate = self.write_gates.lock().pop_front();
        let outcome = match gate {
            Some(rx) => rx.await.unwrap_or_else(|_| Err("gate dropped".to_string())),
            None => match self.write_failure.lock().clone() {
                Some(message) => Err(message),
                None => Ok(()),
            },
        };
        outcome.map_err(|message| ApiError::status(500, message))
    }
}

fn canned<T: Clone>(slot: &Canned<T>) -> ApiResult<Vec<T>> {
    slot.lock()
        .clone()
        .map_err(|message| ApiError::status(500, message))
}

#[async_trait]
impl DjApi for FakeApi {
    async fn fetch_djs(&self) -> ApiResult<Vec<DjRecord>> {
        self.record("GET /api/djs".to_string());
        canned(&self.djs)
    }

    async fn fetch_genres(&self) -> ApiResult<Vec<GenreRef>> {
        self.record("GET /api/genres".to_string());
        canned(&self.genres)
    }

    async fn fetch_subgenres(&self, genre: &str) -> ApiResult<Vec<SubgenreRef>> {
        self.record(format!("GET /api/genres/{genre}/subgenres"));

        let gate = self.subgenre_gates.lock().remove(genre);
        if let Some(rx) = gate {
            let _ = rx.await;
        }

        self.subgenres
            .lock()
            .get(genre)
            .cloned()
            .ok_or_else(|| ApiError::status(404, "Genre not found"))
    }

    async fn fetch_venues(&self) -> ApiResult<Vec<VenueRef>> {
        self.record("GET /api/venues".to_string());
        canned(&self.venues)
    }

    async fn fetch_favourites(&self) -> ApiResult<Vec<DjRecord>> {
        self.record("GET /api/me/favourites".to_string());
        if let Some(message) = self.favourites_error.lock().clone() {
            return Err(ApiError::status(500, message));
        }
        Ok(self.favourites.lock().clone())
    }

    async fn add_favourite(&self, dj_id: DjId) -> ApiResult<()> {
        self.record(format!("POST /api/me/favourites {dj_id}"));
        self.write_result().await?;

        let mut favourites = self.favourites.lock();
        if !favourites.iter().any(|dj| dj.id == dj_id) {
            favourites.push(DjRecord::new(dj_id, format!("DJ {dj_id}")));
        }
        Ok(())
    }

    async fn remove_favourite(&self, dj_id: DjId) -> ApiResult<()> {
        self.record(format!("DELETE /api/me/favourites {dj_id}"));
        self.write_result().await?;

        self.favourites.lock().retain(|dj| dj.id != dj_id);
        Ok(())
    }
}
