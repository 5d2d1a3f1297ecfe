//! DJ add/update form state and validation

use serde::Serialize;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::models::DjRecord;
use crate::utils::text::{eq_ignore_case, non_blank};

/// Problems found before a draft is submitted
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("Please enter a DJ name.")]
    BlankName,

    #[error("Please fill out all required fields.")]
    MissingFields,

    #[error("Each genre must have at least one subgenre. Please add subgenres for the genre \"{0}\".")]
    MissingSubgenres(String),

    #[error("{0} already exists")]
    NameTaken(String),
}

/// Body of `POST /api/dj/add` and `PUT /api/dj/{id}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DjDraft {
    pub name: String,
    pub produces: bool,
    pub genres: Vec<String>,
    pub subgenres: BTreeMap<String, Vec<String>>,
    pub venues: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl DjDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Prefill the update form from an existing record
    pub fn from_record(record: &DjRecord) -> Self {
        Self {
            name: record.name.clone(),
            produces: record.produces,
            genres: record.genres.clone(),
            subgenres: record.subgenres.clone(),
            venues: record.venues.clone(),
            city: record.city.clone(),
        }
    }

    /// Add a genre with an empty subgenre list. Blank and duplicate input is ignored.
    pub fn add_genre(&mut self, genre: &str) -> bool {
        let Some(genre) = non_blank(genre) else {
            return false;
        };
        if self.genres.contains(&genre) {
            return false;
        }
        self.subgenres.entry(genre.clone()).or_default();
        self.genres.push(genre);
        true
    }

    /// Remove a genre together with its subgenres
    pub fn remove_genre(&mut self, genre: &str) -> bool {
        let before = self.genres.len();
        self.genres.retain(|g| g != genre);
        self.subgenres.remove(genre);
        self.genres.len() != before
    }

    /// Add a subgenre under a genre already in the draft
    pub fn add_subgenre(&mut self, genre: &str, subgenre: &str) -> bool {
        let Some(subgenre) = non_blank(subgenre) else {
            return false;
        };
        if !self.genres.iter().any(|g| g == genre) {
            return false;
        }
        let subs = self.subgenres.entry(genre.to_string()).or_default();
        if subs.contains(&subgenre) {
            return false;
        }
        subs.push(subgenre);
        true
    }

    pub fn remove_subgenre(&mut self, genre: &str, subgenre: &str) -> bool {
        match self.subgenres.get_mut(genre) {
            Some(subs) => {
                let before = subs.len();
                subs.retain(|s| s != subgenre);
                subs.len() != before
            }
            None => false,
        }
    }

    pub fn add_venue(&mut self, venue: &str) -> bool {
        let Some(venue) = non_blank(venue) else {
            return false;
        };
        if self.venues.contains(&venue) {
            return false;
        }
        self.venues.push(venue);
        true
    }

    pub fn remove_venue(&mut self, venue: &str) -> bool {
        let before = self.venues.len();
        self.venues.retain(|v| v != venue);
        self.venues.len() != before
    }

    /// Check the draft is ready to submit
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() || self.genres.is_empty() || self.venues.is_empty() {
            return Err(DraftError::MissingFields);
        }

        for genre in &self.genres {
            let has_subgenres = self
                .subgenres
                .get(genre)
                .map(|subs| !subs.is_empty())
                .unwrap_or(false);
            if !has_subgenres {
                return Err(DraftError::MissingSubgenres(genre.clone()));
            }
        }

        Ok(())
    }
}

/// Check a name against the catalog, ignoring case
pub fn check_name_available(catalog: &[DjRecord], name: &str) -> Result<(), DraftError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(DraftError::BlankName);
    }

    match catalog.iter().find(|dj| eq_ignore_case(&dj.name, name)) {
        Some(existing) => Err(DraftError::NameTaken(existing.name.clone())),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_draft() -> DjDraft {
        let mut draft = DjDraft::new("Alice");
        draft.add_genre("Techno");
        draft.add_subgenre("Techno", "Acid");
        draft.add_venue("Warehouse");
        draft
    }

    #[test]
    fn test_complete_draft_validates() {
        assert_eq!(complete_draft().validate(), Ok(()));
    }

    #[test]
    fn test_missing_required_fields() {
        let mut draft = complete_draft();
        draft.name = "   ".into();
        assert_eq!(draft.validate(), Err(DraftError::MissingFields));

        let mut draft = complete_draft();
        draft.remove_venue("Warehouse");
        assert_eq!(draft.validate(), Err(DraftError::MissingFields));

        let mut draft = complete_draft();
        draft.remove_genre("Techno");
        assert!(draft.subgenres.is_empty());
        assert_eq!(draft.validate(), Err(DraftError::MissingFields));
    }

    #[test]
    fn test_genre_without_subgenre_is_named() {
        let mut draft = complete_draft();
        draft.add_genre("House");
        assert_eq!(
            draft.validate(),
            Err(DraftError::MissingSubgenres("House".into()))
        );
        assert!(draft
            .validate()
            .unwrap_err()
            .to_string()
            .contains("\"House\""));
    }

    #[test]
    fn test_duplicates_and_blanks_are_ignored() {
        let mut draft = complete_draft();
        assert!(!draft.add_genre("Techno"));
        assert!(!draft.add_genre("  "));
        assert!(!draft.add_subgenre("Techno", "Acid"));
        assert!(!draft.add_subgenre("House", "Deep"));
        assert!(!draft.add_venue("Warehouse"));
        assert_eq!(draft.genres, ["Techno"]);
        assert_eq!(draft.venues, ["Warehouse"]);
    }

    #[test]
    fn test_removing_last_subgenre_invalidates() {
        let mut draft = complete_draft();
        assert!(draft.remove_subgenre("Techno", "Acid"));
        assert_eq!(
            draft.validate(),
            Err(DraftError::MissingSubgenres("Techno".into()))
        );
    }

    #[test]
    fn test_name_availability_ignores_case() {
        let catalog = vec![DjRecord::new(1, "Alice")];
        assert_eq!(
            check_name_available(&catalog, " alice "),
            Err(DraftError::NameTaken("Alice".into()))
        );
        assert_eq!(check_name_available(&catalog, "Bob"), Ok(()));
        assert_eq!(check_name_available(&catalog, ""), Err(DraftError::BlankName));
    }

    #[test]
    fn test_from_record_round_trips_fields() {
        let record = DjRecord::new(9, "Bob")
            .with_genre("House", ["Deep"])
            .with_venue("Club")
            .with_produces(true)
            .with_city("Leeds");
        let draft = DjDraft::from_record(&record);
        assert_eq!(draft.validate(), Ok(()));
        assert_eq!(draft.city.as_deref(), Some("Leeds"));

        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json["subgenres"]["House"][0], "Deep");
        assert_eq!(json["produces"], true);
    }
}
