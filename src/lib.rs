//! DJ Databass client
//!
//! Typed access to the DJ Databass REST API plus the state behind the DJ
//! browsing view: catalog, reference loaders, filters and favourites.

pub mod api;
pub mod config;
pub mod core;
pub mod models;
pub mod stores;
pub mod utils;

pub use api::{ApiClient, ApiError, ApiResult, DjApi};
pub use config::{ClientConfig, Paths};
pub use core::{DjBrowser, FilterCriteria};
pub use stores::AuthContext;
