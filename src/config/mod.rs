//! Configuration module for atlaspack
//!
//! Provides types and parsing for the optional `atlaspack.toml` file.

pub mod loader;
pub mod schema;

pub use schema::*;
