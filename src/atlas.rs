//! Atlas compositing - lays sprites onto a uniform grid canvas
//!
//! Every cell has the same size. A sprite is pasted with its top-left corner
//! at the cell origin, without scaling, centering or clipping to the cell.

use image::{Rgba, RgbaImage};

use crate::cell::CellGeometry;
use crate::error::PackError;
use crate::sprite::Sprite;

/// Transparent color for atlas background
const TRANSPARENT: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A slot in the atlas grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridPos {
    pub column: u32,
    pub row: u32,
}

impl GridPos {
    pub fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }
}

/// A transparent canvas divided into `columns x rows` cells.
#[derive(Debug)]
pub struct Atlas {
    cell: CellGeometry,
    columns: u32,
    rows: u32,
    image: RgbaImage,
}

impl Atlas {
    /// Allocate a fully transparent canvas of `(cell.width * columns, cell.height * rows)`.
    pub fn new(cell: CellGeometry, columns: u32, rows: u32) -> Result<Self, PackError> {
        let too_large = || PackError::AtlasTooLarge {
            cell_width: cell.width,
            cell_height: cell.height,
            columns,
            rows,
        };
        let width = cell.width.checked_mul(columns).ok_or_else(too_large)?;
        let height = cell.height.checked_mul(rows).ok_or_else(too_large)?;

        Ok(Self { cell, columns, rows, image: RgbaImage::from_pixel(width, height, TRANSPARENT) })
    }

    /// Grid shape as (columns, rows)
    pub fn grid(&self) -> (u32, u32) {
        (self.columns, self.rows)
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// True when the canvas has no pixels and cannot be encoded.
    pub fn is_empty(&self) -> bool {
        self.image.width() == 0 || self.image.height() == 0
    }

    /// Pixel origin of a grid slot
    pub fn origin(&self, pos: GridPos) -> (u32, u32) {
        (pos.column.saturating_mul(self.cell.width), pos.row.saturating_mul(self.cell.height))
    }

    /// Paste `sprite` with its top-left corner at the origin of `pos`.
    ///
    /// Sprite pixels replace canvas pixels. A sprite larger than the cell
    /// spills into neighbouring cells; only pixels past the canvas edge are dropped.
    pub fn place(&mut self, pos: GridPos, sprite: &RgbaImage) {
        let (x, y) = self.origin(pos);
        copy_sprite_to_atlas(&mut self.image, sprite, x, y);
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }
}

/// Copy a sprite image to the atlas at the given position
fn copy_sprite_to_atlas(atlas: &mut RgbaImage, sprite: &RgbaImage, x: u32, y: u32) {
    for sy in 0..sprite.height() {
        for sx in 0..sprite.width() {
            let (ax, ay) = (x as u64 + sx as u64, y as u64 + sy as u64);
            if ax < atlas.width() as u64 && ay < atlas.height() as u64 {
                atlas.put_pixel(ax as u32, ay as u32, *sprite.get_pixel(sx, sy));
            }
        }
    }
}

/// Lay one folder's sprites out in a single row (1 x N grid).
pub fn compose_row(cell: CellGeometry, sprites: &[Sprite]) -> Result<Atlas, PackError> {
    let mut atlas = Atlas::new(cell, sprites.len() as u32, 1)?;
    for (column, sprite) in sprites.iter().enumerate() {
        atlas.place(GridPos::new(column as u32, 0), &sprite.image);
    }
    Ok(atlas)
}

/// Lay several folders out as rows of a shared grid.
///
/// Row `y` holds `rows[y]`, one sprite per column. The grid is as wide as
/// `columns`; shorter rows leave their trailing cells transparent.
pub fn compose_grid(
    cell: CellGeometry,
    columns: u32,
    rows: &[&[Sprite]],
) -> Result<Atlas, PackError> {
    let mut atlas = Atlas::new(cell, columns, rows.len() as u32)?;
    for (row, sprites) in rows.iter().enumerate() {
        for (column, sprite) in sprites.iter().enumerate() {
            atlas.place(GridPos::new(column as u32, row as u32), &sprite.image);
        }
    }
    Ok(atlas)
}
