//! In-memory stores backing the browsing view

mod catalog_store;
mod favourites_store;
mod loader_error;
mod reference_store;
mod session_store;

pub use catalog_store::CatalogStore;
pub use favourites_store::{FavouritesStore, ToggleOutcome};
pub use loader_error::{ErrorSlots, LoaderError, LoaderKind};
pub use reference_store::{ReferenceStore, SubgenreRequest};
pub use session_store::{AuthContext, Session};
