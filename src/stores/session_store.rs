//! Authentication context
//!
//! Single owner of the signed-in state. The API client reads credentials from
//! here and the auth endpoints write to it; nothing else touches the session
//! file.

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::models::User;

/// Persisted session data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub user: Option<User>,
    /// Bearer token, when the backend issues one
    #[serde(default)]
    pub token: Option<String>,
    /// `name=value` cookie pairs captured from the login response
    #[serde(default)]
    pub cookie: Option<String>,
    /// Unix timestamp of the last sign-in
    #[serde(default)]
    pub signed_in_at: Option<i64>,
}

/// Auth context injected into the API client
#[derive(Debug)]
pub struct AuthContext {
    session: RwLock<Session>,
    /// Where the session is persisted; `None` keeps it in memory only
    path: Option<PathBuf>,
}

impl AuthContext {
    /// Context that never touches disk
    pub fn in_memory() -> Self {
        Self {
            session: RwLock::new(Session::default()),
            path: None,
        }
    }

    /// Load the session from `path`, starting signed out if the file is missing
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let session = if path.exists() {
            let content =
                std::fs::read_to_string(&path).context("Failed to read session file")?;
            serde_json::from_str(&content).context("Failed to parse session file")?
        } else {
            Session::default()
        };

        Ok(Self {
            session: RwLock::new(session),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.read().authenticated
    }

    pub fn user(&self) -> Option<User> {
        self.session.read().user.clone()
    }

    pub fn token(&self) -> Option<String> {
        self.session.read().token.clone()
    }

    pub fn cookie(&self) -> Option<String> {
        self.session.read().cookie.clone()
    }

    pub fn is_admin(&self) -> bool {
        self.session
            .read()
            .user
            .as_ref()
            .map(|u| u.is_admin)
            .unwrap_or(false)
    }

    /// Snapshot of the whole session
    pub fn session(&self) -> Session {
        self.session.read().clone()
    }

    /// Mark the context signed in and persist it
    pub fn sign_in(
        &self,
        user: Option<User>,
        token: Option<String>,
        cookie: Option<String>,
    ) -> Result<()> {
        {
            let mut session = self.session.write();
            *session = Session {
                authenticated: true,
                user,
                token,
                cookie,
                signed_in_at: Some(chrono::Utc::now().timestamp()),
            };
        }
        self.persist()
    }

    /// Replace the cached user after a profile fetch or update
    pub fn update_user(&self, user: User) -> Result<()> {
        self.session.write().user = Some(user);
        self.persist()
    }

    /// Forget all credentials and persist the signed-out state
    pub fn sign_out(&self) -> Result<()> {
        *self.session.write() = Session::default();
        self.persist()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let content = {
            let session = self.session.read();
            serde_json::to_string_pretty(&*session).context("Failed to serialize session")?
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create session directory")?;
        }
        std::fs::write(path, content).context("Failed to write session file")?;
        tracing::debug!("Session saved to {:?}", path);

        Ok(())
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::in_memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_sign_in_persists_across_loads() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let auth = AuthContext::load(&path).unwrap();
        assert!(!auth.is_authenticated());

        auth.sign_in(
            Some(User::new(1, "neo")),
            Some("tok".into()),
            Some("session=abc".into()),
        )
        .unwrap();

        let reloaded = AuthContext::load(&path).unwrap();
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.user().unwrap().username, "neo");
        assert_eq!(reloaded.token().as_deref(), Some("tok"));
        assert_eq!(reloaded.cookie().as_deref(), Some("session=abc"));
        assert!(reloaded.session().signed_in_at.is_some());
    }

    #[test]
    fn test_sign_out_clears_everything() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("session.json");

        let auth = AuthContext::load(&path).unwrap();
        auth.sign_in(Some(User::new(1, "neo")), Some("tok".into()), None)
            .unwrap();
        auth.sign_out().unwrap();

        let reloaded = AuthContext::load(&path).unwrap();
        assert_eq!(reloaded.session(), Session::default());
    }

    #[test]
    fn test_in_memory_is_admin() {
        let auth = AuthContext::in_memory();
        assert!(!auth.is_admin());

        let mut admin = User::new(2, "root");
        admin.is_admin = true;
        auth.sign_in(Some(admin), None, None).unwrap();
        assert!(auth.is_admin());
        assert!(auth.path().is_none());
    }
}
