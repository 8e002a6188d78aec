//! Atlaspack - library for packing sprite folders into grid spritesheets
//!
//! This library provides functionality to:
//! - Discover sprite folders and sprite files under an assets root
//! - Size a uniform grid cell from the largest sprite
//! - Composite sprites into per-folder or batch atlas images
//! - Write a JSON manifest describing the atlas geometry

pub mod atlas;
pub mod cell;
pub mod cli;
pub mod config;
pub mod error;
pub mod manifest;
pub mod output;
pub mod pack;
pub mod scan;
pub mod sprite;
