//! Manifest records written alongside generated atlases (`data.json`)
//!
//! Per-folder mode writes `{folder: FolderEntry}`; batch mode writes
//! `{max_width, max_height, metadata: {folder: FolderEntry}}`.

use serde::{Deserialize, Serialize};
use indexmap::IndexMap;

use crate::cell::CellGeometry;

/// Geometry recorded for one sprite folder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FolderEntry {
    pub max_width: u32,
    pub max_height: u32,
    pub total_sprites: usize,
    /// `max_width / max_height`; `null` when the height is zero
    pub aspect_ratio: Option<f64>,
}

impl FolderEntry {
    pub fn new(cell: CellGeometry, total_sprites: usize) -> Self {
        Self {
            max_width: cell.width,
            max_height: cell.height,
            total_sprites,
            aspect_ratio: cell.aspect_ratio(),
        }
    }

    /// Same entry with the aspect ratio rounded to `places` decimal places.
    pub fn rounded(mut self, places: i32) -> Self {
        self.aspect_ratio = self.aspect_ratio.map(|r| round_to(r, places));
        self
    }

    pub fn cell(&self) -> CellGeometry {
        CellGeometry::new(self.max_width, self.max_height)
    }
}

fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

/// Manifest for per-folder mode, keyed by folder name in processing order
pub type FolderManifest = IndexMap<String, FolderEntry>;

/// Manifest for batch mode: one global cell plus per-folder entries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchManifest {
    pub max_width: u32,
    pub max_height: u32,
    /// Per-folder entries; key order is atlas row order
    pub metadata: IndexMap<String, FolderEntry>,
}

impl BatchManifest {
    pub fn new(cell: CellGeometry) -> Self {
        Self { max_width: cell.width, max_height: cell.height, metadata: IndexMap::new() }
    }

    pub fn cell(&self) -> CellGeometry {
        CellGeometry::new(self.max_width, self.max_height)
    }
}
