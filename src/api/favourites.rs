//! Favourites endpoints (credentialed)

use super::{ApiClient, ApiResult};
use crate::models::{DjId, DjRecord, FavouriteBody, FavouritesResponse};

const FAVOURITES_PATH: &str = "/api/me/favourites";

impl ApiClient {
    /// GET /api/me/favourites
    pub async fn get_favourites(&self) -> ApiResult<Vec<DjRecord>> {
        let request = self.credentialed(self.client.get(self.url(FAVOURITES_PATH)))?;
        let response: FavouritesResponse = self.send_json(request).await?;
        Ok(response.favourites)
    }

    /// POST /api/me/favourites
    pub async fn post_favourite(&self, dj_id: DjId) -> ApiResult<()> {
        let request = self.credentialed(
            self.client
                .post(self.url(FAVOURITES_PATH))
                .json(&FavouriteBody { dj_id }),
        )?;
        self.send(request).await?;
        tracing::debug!("Added DJ {} to favourites", dj_id);
        Ok(())
    }

    /// DELETE /api/me/favourites
    pub async fn delete_favourite(&self, dj_id: DjId) -> ApiResult<()> {
        let request = self.credentialed(
            self.client
                .delete(self.url(FAVOURITES_PATH))
                .json(&FavouriteBody { dj_id }),
        )?;
        self.send(request).await?;
        tracing::debug!("Removed DJ {} from favourites", dj_id);
        Ok(())
    }
}
