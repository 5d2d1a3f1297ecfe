//! Authentication and profile endpoints

use reqwest::header::{HeaderMap, SET_COOKIE};
use serde_json::Value;
use std::path::Path;

use super::upload::ImageUpload;
use super::{ApiClient, ApiResult};
use crate::models::{Credentials, PasswordChange, User, UsernameUpdate};

impl ApiClient {
    /// POST /api/login
    ///
    /// On success the auth context is signed in with whatever the backend
    /// hands back: a bearer token, a session cookie, or both.
    pub async fn login(&self, username: &str, password: &str) -> ApiResult<Option<User>> {
        self.authenticate("/api/login", username, password).await
    }

    /// POST /api/signup
    pub async fn signup(&self, username: &str, password: &str) -> ApiResult<Option<User>> {
        self.authenticate("/api/signup", username, password).await
    }

    async fn authenticate(
        &self,
        path: &str,
        username: &str,
        password: &str,
    ) -> ApiResult<Option<User>> {
        let body = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        let response = self
            .send(self.client.post(self.url(path)).json(&body))
            .await?;
        let cookie = session_cookie(response.headers());
        let bytes = response.bytes().await?;
        let (token, user) = parse_auth_body(&bytes);

        self.auth.sign_in(user.clone(), token, cookie)?;
        tracing::info!("Signed in as {}", username);

        if user.is_some() {
            return Ok(user);
        }

        // login answers with a plain greeting; ask who we are
        match self.me().await {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                tracing::debug!("Could not fetch profile after sign-in: {}", e);
                Ok(None)
            }
        }
    }

    /// DELETE /api/logout
    ///
    /// The local session is cleared even if the backend call fails.
    pub async fn logout(&self) -> ApiResult<()> {
        let result = self
            .send(self.with_credentials(self.client.delete(self.url("/api/logout"))))
            .await;
        self.auth.sign_out()?;

        if let Err(e) = &result {
            tracing::warn!("Backend logout failed: {}", e);
        }
        result.map(|_| ())
    }

    /// GET /api/me
    pub async fn me(&self) -> ApiResult<User> {
        let request = self.credentialed(self.client.get(self.url("/api/me")))?;
        let user: User = self.send_json(request).await?;
        self.auth.update_user(user.clone())?;
        Ok(user)
    }

    /// PUT /api/me
    pub async fn update_username(&self, update: &UsernameUpdate) -> ApiResult<Option<String>> {
        let request = self.credentialed(self.client.put(self.url("/api/me")).json(update))?;
        self.send_for_message(request).await
    }

    /// PATCH /api/me
    pub async fn change_password(&self, change: &PasswordChange) -> ApiResult<Option<String>> {
        let request = self.credentialed(self.client.patch(self.url("/api/me")).json(change))?;
        self.send_for_message(request).await
    }

    /// POST /api/me/upload
    pub async fn upload_profile_picture(&self, file: &Path) -> ApiResult<Option<String>> {
        let request = self.credentialed(self.client.post(self.url("/api/me/upload")))?;
        let form = ImageUpload::read(file).await?.into_form()?;
        let message = self.send_for_message(request.multipart(form)).await?;
        tracing::info!("Uploaded profile picture {:?}", file);
        Ok(message)
    }

    /// DELETE /api/me/delete-profile-image
    pub async fn delete_profile_picture(&self) -> ApiResult<Option<String>> {
        let request =
            self.credentialed(self.client.delete(self.url("/api/me/delete-profile-image")))?;
        self.send_for_message(request).await
    }
}

/// Collect `name=value` pairs from every `Set-Cookie` header
fn session_cookie(headers: &HeaderMap) -> Option<String> {
    let pairs: Vec<&str> = headers
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|v| v.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('='))
        .collect();

    if pairs.is_empty() {
        None
    } else {
        Some(pairs.join("; "))
    }
}

/// Pull a token and a user out of a login or signup body.
///
/// Login may answer with `{"token": ..}`, a user object, or a bare string.
fn parse_auth_body(bytes: &[u8]) -> (Option<String>, Option<User>) {
    let Ok(value) = serde_json::from_slice::<Value>(bytes) else {
        return (None, None);
    };

    let token = value
        .get("token")
        .and_then(Value::as_str)
        .map(str::to_string);

    let user_value = value.get("user").cloned().unwrap_or_else(|| value.clone());
    let user = serde_json::from_value::<User>(user_value).ok();

    (token, user)
}
