//! Decoded sprite records

use image::RgbaImage;
use std::path::{Path, PathBuf};

use crate::error::PackError;

/// A sprite file decoded once and reused for sizing and compositing.
#[derive(Debug, Clone)]
pub struct Sprite {
    pub path: PathBuf,
    pub image: RgbaImage,
}

impl Sprite {
    /// Decode the sprite at `path` into RGBA pixels.
    pub fn load(path: &Path) -> Result<Self, PackError> {
        let image = image::open(path)
            .map_err(|source| PackError::Decode { path: path.to_path_buf(), source })?
            .to_rgba8();
        Ok(Self { path: path.to_path_buf(), image })
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

/// Decode every sprite in `paths`, stopping at the first unreadable one.
pub fn load_sprites(paths: &[PathBuf]) -> Result<Vec<Sprite>, PackError> {
    paths.iter().map(|p| Sprite::load(p)).collect()
}
