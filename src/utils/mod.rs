//! Utility modules for DJ Databass

pub mod text;
pub mod url;
