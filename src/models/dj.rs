//! DJ model

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Backend identifier of a DJ
pub type DjId = i64;

/// A DJ as served by `GET /api/djs`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DjRecord {
    /// Database ID
    pub id: DjId,
    /// Display name
    pub name: String,
    /// Whether the DJ also produces music
    #[serde(default)]
    pub produces: bool,
    /// Genres in the order they were added
    #[serde(default)]
    pub genres: Vec<String>,
    /// Subgenres keyed by genre title
    #[serde(default)]
    pub subgenres: BTreeMap<String, Vec<String>>,
    /// Venues the DJ plays at
    #[serde(default)]
    pub venues: Vec<String>,
    /// Home city
    #[serde(default)]
    pub city: Option<String>,
    /// Profile picture path on the backend
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dj_profile_picture: Option<String>,
}

impl DjRecord {
    /// Create a record with no genre or venue metadata
    pub fn new(id: DjId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            produces: false,
            genres: Vec::new(),
            subgenres: BTreeMap::new(),
            venues: Vec::new(),
            city: None,
            dj_profile_picture: None,
        }
    }

    /// Add a genre with its subgenres, keeping genres free of duplicates
    pub fn with_genre<I, S>(mut self, genre: &str, subgenres: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if !self.has_genre(genre) {
            self.genres.push(genre.to_string());
        }
        let entry = self.subgenres.entry(genre.to_string()).or_default();
        for sub in subgenres {
            let sub = sub.into();
            if !entry.contains(&sub) {
                entry.push(sub);
            }
        }
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        let venue = venue.into();
        if !self.has_venue(&venue) {
            self.venues.push(venue);
        }
        self
    }

    pub fn with_produces(mut self, produces: bool) -> Self {
        self.produces = produces;
        self
    }

    pub fn with_city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    /// Exact, case-sensitive genre membership
    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Exact, case-sensitive venue membership
    pub fn has_venue(&self, venue: &str) -> bool {
        self.venues.iter().any(|v| v == venue)
    }

    /// Subgenres listed under one genre
    pub fn subgenres_of(&self, genre: &str) -> &[String] {
        self.subgenres
            .get(genre)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Subgenres across every genre
    pub fn all_subgenres(&self) -> impl Iterator<Item = &String> {
        self.subgenres.values().flatten()
    }

    /// A record is complete when every genre carries at least one subgenre
    pub fn is_complete(&self) -> bool {
        !self.genres.is_empty()
            && self
                .genres
                .iter()
                .all(|g| !self.subgenres_of(g).is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_backend_payload() {
        let json = r#"{
            "id": 7,
            "name": "Alice",
            "produces": true,
            "dj_profile_picture": null,
            "city": "Berlin",
            "genres": ["Techno"],
            "subgenres": {"Techno": ["Acid", "Minimal"]},
            "venues": ["Warehouse"]
        }"#;

        let dj: DjRecord = serde_json::from_str(json).unwrap();
        assert_eq!(dj.id, 7);
        assert!(dj.produces);
        assert_eq!(dj.city.as_deref(), Some("Berlin"));
        assert_eq!(dj.subgenres_of("Techno"), ["Acid", "Minimal"]);
        assert!(dj.subgenres_of("House").is_empty());
        assert!(dj.is_complete());
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let dj: DjRecord = serde_json::from_str(r#"{"id": 1, "name": "Bob"}"#).unwrap();
        assert!(dj.genres.is_empty());
        assert!(dj.venues.is_empty());
        assert!(!dj.produces);
        assert!(!dj.is_complete());
    }

    #[test]
    fn test_with_genre_rejects_duplicates() {
        let dj = DjRecord::new(1, "Alice")
            .with_genre("Techno", ["Acid"])
            .with_genre("Techno", ["Acid", "Dub"]);

        assert_eq!(dj.genres, ["Techno"]);
        assert_eq!(dj.subgenres_of("Techno"), ["Acid", "Dub"]);
    }

    #[test]
    fn test_genre_without_subgenres_is_incomplete() {
        let dj = DjRecord::new(1, "Alice")
            .with_genre("Techno", ["Acid"])
            .with_genre("House", Vec::<String>::new());
        assert!(!dj.is_complete());
    }
}
