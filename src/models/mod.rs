//! Data models for DJ Databass
//!
//! Wire types exchanged with the backend. Field names follow the JSON the
//! backend produces.

mod dj;
mod favourite;
mod reference;
mod user;

pub use dj::{DjId, DjRecord};
pub use favourite::{FavouriteBody, FavouritesResponse, MessageBody};
pub use reference::{GenreRef, OptionLabel, SubgenreRef, VenueRef};
pub use user::{Credentials, PasswordChange, ProfileError, User, UsernameUpdate};
