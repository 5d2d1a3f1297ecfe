//! Filter engine for the DJ list
//!
//! A pure function of (catalog, criteria). Every active criterion must hold;
//! an unset criterion matches every record. Catalog order is preserved.

use serde::{Deserialize, Serialize};

use crate::models::DjRecord;
use crate::utils::text::contains_ignore_case;

/// The user's current filter selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    /// Case-insensitive substring of the DJ name; empty matches all
    #[serde(default)]
    pub name_substring: String,
    #[serde(default)]
    pub genre: Option<String>,
    /// With no genre set this searches every genre's subgenres
    #[serde(default)]
    pub subgenre: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub produces: Option<bool>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, substring: impl Into<String>) -> Self {
        self.name_substring = substring.into();
        self
    }

    /// Select a genre; always clears the subgenre selection
    pub fn with_genre(mut self, genre: impl Into<String>) -> Self {
        self.set_genre(Some(genre.into()));
        self
    }

    pub fn with_subgenre(mut self, subgenre: impl Into<String>) -> Self {
        self.subgenre = Some(subgenre.into());
        self
    }

    pub fn with_venue(mut self, venue: impl Into<String>) -> Self {
        self.venue = Some(venue.into());
        self
    }

    pub fn with_produces(mut self, produces: bool) -> Self {
        self.produces = Some(produces);
        self
    }

    /// Replace the genre selection. The previous subgenre is dropped even when
    /// the genre is unchanged.
    pub fn set_genre(&mut self, genre: Option<String>) {
        self.genre = genre.filter(|g| !g.is_empty());
        self.subgenre = None;
    }

    pub fn set_subgenre(&mut self, subgenre: Option<String>) {
        self.subgenre = subgenre.filter(|s| !s.is_empty());
    }

    pub fn set_venue(&mut self, venue: Option<String>) {
        self.venue = venue.filter(|v| !v.is_empty());
    }

    /// Reset every criterion
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when no criterion is active
    pub fn is_empty(&self) -> bool {
        self.name_substring.is_empty()
            && self.genre.is_none()
            && self.subgenre.is_none()
            && self.venue.is_none()
            && self.produces.is_none()
    }

    /// Whether a single record passes every active criterion
    pub fn matches(&self, dj: &DjRecord) -> bool {
        self.name_matches(dj)
            && self.genre_matches(dj)
            && self.subgenre_matches(dj)
            && self.venue_matches(dj)
            && self.produces_matches(dj)
    }

    fn name_matches(&self, dj: &DjRecord) -> bool {
        let needle = self.name_substring.as_str();
        needle.is_empty() || contains_ignore_case(&dj.name, needle)
    }

    fn genre_matches(&self, dj: &DjRecord) -> bool {
        match &self.genre {
            Some(genre) => dj.has_genre(genre),
            None => true,
        }
    }

    fn subgenre_matches(&self, dj: &DjRecord) -> bool {
        let Some(subgenre) = &self.subgenre else {
            return true;
        };
        match &self.genre {
            Some(genre) => dj.subgenres_of(genre).iter().any(|s| s == subgenre),
            None => dj.all_subgenres().any(|s| s == subgenre),
        }
    }

    fn venue_matches(&self, dj: &DjRecord) -> bool {
        match &self.venue {
            Some(venue) => dj.has_venue(venue),
            None => true,
        }
    }

    fn produces_matches(&self, dj: &DjRecord) -> bool {
        match self.produces {
            Some(produces) => dj.produces == produces,
            None => true,
        }
    }

    /// Borrowing form of [`filter_djs`]
    pub fn apply<'a>(&self, catalog: &'a [DjRecord]) -> Vec<&'a DjRecord> {
        catalog.iter().filter(|dj| self.matches(dj)).collect()
    }
}

/// Ordered subsequence of `catalog` matching `criteria`
pub fn filter_djs(catalog: &[DjRecord], criteria: &FilterCriteria) -> Vec<DjRecord> {
    catalog
        .iter()
        .filter(|dj| criteria.matches(dj))
        .cloned()
        .collect()
}

/// Parse the produces selector: "Yes", "No", or blank for no filter
pub fn parse_produces(value: &str) -> Result<Option<bool>, String> {
    match value.trim().to_lowercase().as_str() {
        "" => Ok(None),
        "yes" | "y" | "true" => Ok(Some(true)),
        "no" | "n" | "false" => Ok(Some(false)),
        other => Err(format!("expected Yes or No, got '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> DjRecord {
        DjRecord::new(1, "Alice")
            .with_genre("Techno", ["Acid"])
            .with_venue("Warehouse")
            .with_produces(true)
    }

    fn catalog() -> Vec<DjRecord> {
        vec![
            alice(),
            DjRecord::new(2, "Bob")
                .with_genre("House", ["Deep", "Acid"])
                .with_venue("Club"),
            DjRecord::new(3, "Malika")
                .with_genre("Techno", ["Minimal"])
                .with_genre("House", ["Deep"])
                .with_venue("Warehouse")
                .with_venue("Club")
                .with_produces(true),
            DjRecord::new(4, "Zed")
                .with_genre("Drum & Bass", ["Liquid"])
                .with_venue("Basement"),
        ]
    }

    fn ids(records: &[DjRecord]) -> Vec<i64> {
        records.iter().map(|d| d.id).collect()
    }

    /// Every record of `sub` appears in `full` in the same relative order
    fn is_subsequence(sub: &[DjRecord], full: &[DjRecord]) -> bool {
        let mut it = full.iter();
        sub.iter().all(|s| it.any(|f| f == s))
    }

    fn all_criteria() -> Vec<FilterCriteria> {
        vec![
            FilterCriteria::new(),
            FilterCriteria::new().with_name("a"),
            FilterCriteria::new().with_genre("Techno"),
            FilterCriteria::new().with_genre("House").with_subgenre("Deep"),
            FilterCriteria::new().with_subgenre("Acid"),
            FilterCriteria::new().with_venue("Club"),
            FilterCriteria::new().with_produces(true),
            FilterCriteria::new().with_produces(false).with_venue("Basement"),
        ]
    }

    #[test]
    fn test_genre_scenario() {
        let catalog = vec![alice()];
        let techno = FilterCriteria::new().with_genre("Techno");
        let house = FilterCriteria::new().with_genre("House");

        assert_eq!(filter_djs(&catalog, &techno), catalog);
        assert!(filter_djs(&catalog, &house).is_empty());
    }

    #[test]
    fn test_name_is_case_insensitive() {
        let catalog = vec![alice()];
        assert_eq!(
            ids(&filter_djs(&catalog, &FilterCriteria::new().with_name("ali"))),
            [1]
        );
        assert_eq!(
            ids(&filter_djs(&catalog, &FilterCriteria::new().with_name("ALI"))),
            [1]
        );
    }

    #[test]
    fn test_name_whitespace_is_literal() {
        let catalog = vec![DjRecord::new(7, "DJane"), alice()];

        // the substring is matched as typed, spaces included
        assert!(filter_djs(&catalog, &FilterCriteria::new().with_name("DJ ")).is_empty());
        assert!(filter_djs(&catalog, &FilterCriteria::new().with_name("   ")).is_empty());
        assert!(!FilterCriteria::new().with_name(" ").is_empty());
        assert_eq!(
            ids(&filter_djs(&catalog, &FilterCriteria::new().with_name("dja"))),
            [7]
        );
    }

    #[test]
    fn test_genre_is_case_sensitive() {
        let catalog = vec![alice()];
        assert!(filter_djs(&catalog, &FilterCriteria::new().with_genre("techno")).is_empty());
    }

    #[test]
    fn test_empty_criteria_is_identity() {
        let catalog = catalog();
        assert!(FilterCriteria::new().is_empty());
        assert_eq!(filter_djs(&catalog, &FilterCriteria::new()), catalog);
    }

    #[test]
    fn test_result_is_ordered_subsequence() {
        let catalog = catalog();
        for criteria in all_criteria() {
            let result = filter_djs(&catalog, &criteria);
            assert!(is_subsequence(&result, &catalog), "{:?}", criteria);
        }
    }

    #[test]
    fn test_filter_is_idempotent() {
        let catalog = catalog();
        for criteria in all_criteria() {
            assert_eq!(
                filter_djs(&catalog, &criteria),
                filter_djs(&catalog, &criteria)
            );
        }
    }

    #[test]
    fn test_filters_compose() {
        let catalog = catalog();
        let by_name = FilterCriteria::new().with_name("a");
        let by_venue = FilterCriteria::new().with_venue("Warehouse");
        let by_genre = FilterCriteria::new().with_genre("House");
        let both = FilterCriteria::new()
            .with_name("a")
            .with_venue("Warehouse")
            .with_genre("House");

        let staged = filter_djs(
            &filter_djs(&filter_djs(&catalog, &by_name), &by_venue),
            &by_genre,
        );
        assert_eq!(staged, filter_djs(&catalog, &both));
        assert_eq!(ids(&staged), [3]);
    }

    #[test]
    fn test_subgenre_scoped_to_selected_genre() {
        let catalog = catalog();
        // Bob lists Acid under House, Alice under Techno
        let criteria = FilterCriteria::new().with_genre("Techno").with_subgenre("Acid");
        assert_eq!(ids(&filter_djs(&catalog, &criteria)), [1]);

        let criteria = FilterCriteria::new().with_genre("House").with_subgenre("Minimal");
        assert!(filter_djs(&catalog, &criteria).is_empty());
    }

    #[test]
    fn test_subgenre_without_genre_searches_all_genres() {
        let catalog = catalog();
        let criteria = FilterCriteria::new().with_subgenre("Acid");
        assert_eq!(ids(&filter_djs(&catalog, &criteria)), [1, 2]);
    }

    #[test]
    fn test_selecting_genre_clears_subgenre() {
        let mut criteria = FilterCriteria::new().with_genre("Techno").with_subgenre("Acid");
        criteria.set_genre(Some("House".into()));
        assert_eq!(criteria.genre.as_deref(), Some("House"));
        assert!(criteria.subgenre.is_none());

        let criteria = FilterCriteria::new().with_subgenre("Acid").with_genre("Techno");
        assert!(criteria.subgenre.is_none());
    }

    #[test]
    fn test_blank_selection_unsets() {
        let mut criteria = FilterCriteria::new();
        criteria.set_genre(Some(String::new()));
        criteria.set_venue(Some(String::new()));
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_produces_filter() {
        let catalog = catalog();
        assert_eq!(
            ids(&filter_djs(&catalog, &FilterCriteria::new().with_produces(true))),
            [1, 3]
        );
        assert_eq!(
            ids(&filter_djs(&catalog, &FilterCriteria::new().with_produces(false))),
            [2, 4]
        );
    }

    #[test]
    fn test_clear_resets() {
        let mut criteria = FilterCriteria::new()
            .with_name("x")
            .with_venue("Club")
            .with_produces(false);
        criteria.clear();
        assert_eq!(criteria, FilterCriteria::default());
    }

    #[test]
    fn test_apply_borrows_in_order() {
        let catalog = catalog();
        let matched = FilterCriteria::new().with_venue("Club").apply(&catalog);
        let matched: Vec<i64> = matched.iter().map(|d| d.id).collect();
        assert_eq!(matched, [2, 3]);
    }

    #[test]
    fn test_parse_produces() {
        assert_eq!(parse_produces("Yes"), Ok(Some(true)));
        assert_eq!(parse_produces("no"), Ok(Some(false)));
        assert_eq!(parse_produces(""), Ok(None));
        assert!(parse_produces("maybe").is_err());
    }
}
