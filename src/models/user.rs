//! User model

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A signed-in user as returned by `GET /api/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Database ID
    pub id: i64,
    /// Username
    pub username: String,
    /// Admins may edit and delete any DJ
    #[serde(default)]
    pub is_admin: bool,
    /// Profile image path
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
}

impl User {
    pub fn new(id: i64, username: impl Into<String>) -> Self {
        Self {
            id,
            username: username.into(),
            is_admin: false,
            profile_picture: None,
        }
    }
}

/// Body of `POST /api/login` and `POST /api/signup`
#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Body of `PUT /api/me`
#[derive(Debug, Clone, Serialize)]
pub struct UsernameUpdate {
    pub username: String,
}

/// Errors caught before a profile change is sent
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Please fill out all password fields.")]
    MissingPasswordFields,

    #[error("New passwords do not match.")]
    PasswordMismatch,

    #[error("Please enter a username.")]
    BlankUsername,
}

/// Body of `PATCH /api/me`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub old_password: String,
    pub new_password: String,
}

impl PasswordChange {
    /// Validate the three password fields of the change form
    pub fn new(old: &str, new: &str, confirm: &str) -> Result<Self, ProfileError> {
        if old.trim().is_empty() || new.trim().is_empty() || confirm.trim().is_empty() {
            return Err(ProfileError::MissingPasswordFields);
        }
        if new != confirm {
            return Err(ProfileError::PasswordMismatch);
        }
        Ok(Self {
            old_password: old.to_string(),
            new_password: new.to_string(),
        })
    }
}

impl UsernameUpdate {
    pub fn new(username: &str) -> Result<Self, ProfileError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ProfileError::BlankUsername);
        }
        Ok(Self {
            username: username.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_ignores_server_only_fields() {
        let json = r#"{"id": 3, "username": "neo", "is_admin": true, "_hashed_password": "x"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.username, "neo");
        assert!(user.is_admin);
    }

    #[test]
    fn test_password_change_validation() {
        assert_eq!(
            PasswordChange::new("old", "", "").unwrap_err(),
            ProfileError::MissingPasswordFields
        );
        assert_eq!(
            PasswordChange::new("old", "new1", "new2").unwrap_err(),
            ProfileError::PasswordMismatch
        );

        let change = PasswordChange::new("old", "new", "new").unwrap();
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"oldPassword": "old", "newPassword": "new"})
        );
    }

    #[test]
    fn test_username_update_trims() {
        assert_eq!(UsernameUpdate::new("  trinity ").unwrap().username, "trinity");
        assert_eq!(
            UsernameUpdate::new("   ").unwrap_err(),
            ProfileError::BlankUsername
        );
    }
}
