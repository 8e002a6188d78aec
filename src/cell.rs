//! Cell geometry - the uniform slot size shared by every sprite in an atlas

use crate::sprite::Sprite;

/// Width and height of one grid cell.
///
/// Every cell of an atlas has this size, so sprites smaller than the
/// maximum on either axis leave transparent padding to the right/bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CellGeometry {
    pub width: u32,
    pub height: u32,
}

impl CellGeometry {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Maximum width and maximum height over `sizes`; (0, 0) when empty.
    pub fn from_sizes<I>(sizes: I) -> Self
    where
        I: IntoIterator<Item = (u32, u32)>,
    {
        sizes.into_iter().fold(Self::default(), |cell, (w, h)| Self {
            width: cell.width.max(w),
            height: cell.height.max(h),
        })
    }

    /// Cell for a single folder's sprites.
    pub fn of_sprites(sprites: &[Sprite]) -> Self {
        Self::from_sizes(sprites.iter().map(Sprite::dimensions))
    }

    /// Smallest cell that fits every cell in `cells`.
    pub fn union<I>(cells: I) -> Self
    where
        I: IntoIterator<Item = CellGeometry>,
    {
        Self::from_sizes(cells.into_iter().map(|c| (c.width, c.height)))
    }

    /// `width / height`, or `None` when the height is zero.
    pub fn aspect_ratio(&self) -> Option<f64> {
        if self.height == 0 {
            None
        } else {
            Some(self.width as f64 / self.height as f64)
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}
