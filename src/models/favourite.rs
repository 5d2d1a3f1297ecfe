//! Favourite payloads

use serde::{Deserialize, Serialize};

use super::{DjId, DjRecord};

/// Body of `POST` and `DELETE /api/me/favourites`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavouriteBody {
    pub dj_id: DjId,
}

/// Response of `GET /api/me/favourites`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FavouritesResponse {
    #[serde(default)]
    pub favourites: Vec<DjRecord>,
}

/// Generic `{"message": ..}` / `{"error": ..}` body the backend answers with
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl MessageBody {
    /// The error text if present, otherwise the message
    pub fn text(&self) -> Option<&str> {
        self.error.as_deref().or(self.message.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_favourites_key_is_empty() {
        let resp: FavouritesResponse = serde_json::from_str("{}").unwrap();
        assert!(resp.favourites.is_empty());
    }

    #[test]
    fn test_message_body_prefers_error() {
        let body: MessageBody =
            serde_json::from_str(r#"{"message": "ok", "error": "DJ not found"}"#).unwrap();
        assert_eq!(body.text(), Some("DJ not found"));
    }
}
