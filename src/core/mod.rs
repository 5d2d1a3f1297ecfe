//! Browsing logic: filtering, the DJ form and the list view

pub mod browser;
pub mod dj_form;
pub mod filter;

pub use browser::{DjBrowser, DjRow, ListingStatus, NO_DJS_FOUND, NO_FAVOURITES_FOUND};
pub use dj_form::{check_name_available, DjDraft, DraftError};
pub use filter::{filter_djs, parse_produces, FilterCriteria};
