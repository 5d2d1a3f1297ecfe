//! Configuration module for the DJ Databass client
//!
//! Path resolution and the client settings file.

mod client_config;
mod paths;

pub use client_config::{ClientConfig, DEFAULT_API_BASE_URL, ENV_PREFIX};
pub use paths::Paths;
