//! Per-loader error slots

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Which loader produced an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LoaderKind {
    Catalog,
    Genres,
    Subgenres,
    Venues,
    Favourites,
}

impl LoaderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoaderKind::Catalog => "catalog",
            LoaderKind::Genres => "genres",
            LoaderKind::Subgenres => "subgenres",
            LoaderKind::Venues => "venues",
            LoaderKind::Favourites => "favourites",
        }
    }

    /// Prefix shown in front of the underlying cause
    pub fn failure_text(&self) -> &'static str {
        match self {
            LoaderKind::Catalog => "Error fetching DJs",
            LoaderKind::Genres => "Error fetching genres",
            LoaderKind::Subgenres => "Error fetching subgenres",
            LoaderKind::Venues => "Error fetching venues",
            LoaderKind::Favourites => "Error fetching favourites",
        }
    }
}

impl fmt::Display for LoaderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error surfaced by one loader
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoaderError {
    pub kind: LoaderKind,
    pub message: String,
}

impl LoaderError {
    pub fn new(kind: LoaderKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Build the error from a failed call, prefixing the loader's failure text
    pub fn from_cause(kind: LoaderKind, cause: &impl fmt::Display) -> Self {
        Self::with_context(kind, kind.failure_text(), cause)
    }

    /// Same as `from_cause` with a caller-chosen prefix, for failures that
    /// are not fetches
    pub fn with_context(kind: LoaderKind, context: &str, cause: &impl fmt::Display) -> Self {
        Self::new(kind, format!("{}: {}", context, cause))
    }
}

impl fmt::Display for LoaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// One slot per loader. Writing a slot never touches another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSlots {
    slots: BTreeMap<LoaderKind, String>,
}

impl ErrorSlots {
    pub fn set(&mut self, error: LoaderError) {
        self.slots.insert(error.kind, error.message);
    }

    pub fn clear(&mut self, kind: LoaderKind) {
        self.slots.remove(&kind);
    }

    pub fn get(&self, kind: LoaderKind) -> Option<LoaderError> {
        self.slots
            .get(&kind)
            .map(|message| LoaderError::new(kind, message.clone()))
    }

    /// All current errors, ordered by loader kind
    pub fn all(&self) -> Vec<LoaderError> {
        self.slots
            .iter()
            .map(|(kind, message)| LoaderError::new(*kind, message.clone()))
            .collect()
    }
}
