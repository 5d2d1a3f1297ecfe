//! Reference lookup entities used to populate filter options

use serde::{Deserialize, Serialize};

/// Entry of `GET /api/genres`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreRef {
    pub id: i64,
    pub title: String,
}

/// Entry of `GET /api/genres/{genre}/subgenres`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubgenreRef {
    pub id: i64,
    pub subtitle: String,
}

/// Entry of `GET /api/venues`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueRef {
    pub id: i64,
    pub venuename: String,
}

/// Text shown for a selectable option
pub trait OptionLabel {
    fn label(&self) -> &str;
}

impl OptionLabel for GenreRef {
    fn label(&self) -> &str {
        &self.title
    }
}

impl OptionLabel for SubgenreRef {
    fn label(&self) -> &str {
        &self.subtitle
    }
}

impl OptionLabel for VenueRef {
    fn label(&self) -> &str {
        &self.venuename
    }
}

impl GenreRef {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
        }
    }
}

impl SubgenreRef {
    pub fn new(id: i64, subtitle: impl Into<String>) -> Self {
        Self {
            id,
            subtitle: subtitle.into(),
        }
    }
}

impl VenueRef {
    pub fn new(id: i64, venuename: impl Into<String>) -> Self {
        Self {
            id,
            venuename: venuename.into(),
        }
    }
}
