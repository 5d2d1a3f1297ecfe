//! Multipart image uploads for DJ and user profile pictures

use reqwest::multipart::{Form, Part};
use std::path::Path;

use super::{ApiError, ApiResult};

/// Multipart field the backend reads the picture from
pub(crate) const PROFILE_IMAGE_FIELD: &str = "profileImage";

/// A picture read from disk, ready to be sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ImageUpload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub async fn read(file: &Path) -> ApiResult<Self> {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::InvalidFile(format!("no file name in {:?}", file)))?
            .to_string();
        let mime = mime_guess::from_path(file)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        let bytes = tokio::fs::read(file).await?;

        Ok(Self {
            file_name,
            mime,
            bytes,
        })
    }

    pub fn into_form(self) -> ApiResult<Form> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(&self.mime)?;
        Ok(Form::new().part(PROFILE_IMAGE_FIELD, part))
    }
}
