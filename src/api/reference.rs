//! Reference data endpoints

use super::{ApiClient, ApiResult};
use crate::models::{GenreRef, SubgenreRef, VenueRef};
use crate::utils::url::encode_segment;

impl ApiClient {
    /// GET /api/genres
    pub async fn get_genres(&self) -> ApiResult<Vec<GenreRef>> {
        self.send_json(self.client.get(self.url("/api/genres"))).await
    }

    /// GET /api/genres/{genre}/subgenres
    pub async fn get_subgenres(&self, genre: &str) -> ApiResult<Vec<SubgenreRef>> {
        let path = format!("/api/genres/{}/subgenres", encode_segment(genre));
        self.send_json(self.client.get(self.url(&path))).await
    }

    /// GET /api/venues
    pub async fn get_venues(&self) -> ApiResult<Vec<VenueRef>> {
        self.send_json(self.client.get(self.url("/api/venues"))).await
    }
}
