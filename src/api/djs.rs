//! DJ catalog and CRUD endpoints

use std::path::Path;

use super::upload::ImageUpload;
use super::{ApiClient, ApiResult};
use crate::core::DjDraft;
use crate::models::{DjId, DjRecord};

impl ApiClient {
    /// GET /api/djs
    pub async fn get_djs(&self) -> ApiResult<Vec<DjRecord>> {
        let djs: Vec<DjRecord> = self.send_json(self.client.get(self.url("/api/djs"))).await?;
        tracing::debug!("Fetched {} DJs", djs.len());
        Ok(djs)
    }

    /// GET /api/djs/search?search=
    pub async fn search_djs(&self, term: &str) -> ApiResult<Vec<DjRecord>> {
        let request = self
            .client
            .get(self.url("/api/djs/search"))
            .query(&[("search", term)]);
        self.send_json(request).await
    }

    /// GET /api/dj/{id}
    pub async fn get_dj(&self, id: DjId) -> ApiResult<DjRecord> {
        self.send_json(self.client.get(self.url(&format!("/api/dj/{id}"))))
            .await
    }

    /// POST /api/dj/add
    ///
    /// The backend accepts submissions from anonymous visitors, so credentials
    /// are attached when present but not required.
    pub async fn add_dj(&self, draft: &DjDraft) -> ApiResult<Option<String>> {
        let request = self
            .with_credentials(self.client.post(self.url("/api/dj/add")))
            .json(draft);
        let message = self.send_for_message(request).await?;
        tracing::info!("Added DJ {}", draft.name);
        Ok(message)
    }

    /// PUT /api/dj/{id}
    pub async fn update_dj(&self, id: DjId, draft: &DjDraft) -> ApiResult<Option<String>> {
        let request = self
            .credentialed(self.client.put(self.url(&format!("/api/dj/{id}"))))?
            .json(draft);
        self.send_for_message(request).await
    }

    /// DELETE /api/dj/{id}
    pub async fn delete_dj(&self, id: DjId) -> ApiResult<Option<String>> {
        let request = self.credentialed(self.client.delete(self.url(&format!("/api/dj/{id}"))))?;
        let message = self.send_for_message(request).await?;
        tracing::info!("Deleted DJ {}", id);
        Ok(message)
    }

    /// POST /api/dj/{id}/dj-profiles
    pub async fn upload_dj_picture(&self, id: DjId, file: &Path) -> ApiResult<Option<String>> {
        let request =
            self.credentialed(self.client.post(self.url(&format!("/api/dj/{id}/dj-profiles"))))?;
        let form = ImageUpload::read(file).await?.into_form()?;
        self.send_for_message(request.multipart(form)).await
    }

    /// DELETE /api/dj/{id}/delete-profile-image
    pub async fn delete_dj_picture(&self, id: DjId) -> ApiResult<Option<String>> {
        let request = self.credentialed(
            self.client
                .delete(self.url(&format!("/api/dj/{id}/delete-profile-image"))),
        )?;
        self.send_for_message(request).await
    }
}
