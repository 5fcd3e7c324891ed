//! Texture handles and atlas region math.
//!
//! A texture may be pre-divided into a `regions.x * regions.y` grid of equal
//! cells. One texture then backs many visual states (a button's normal,
//! hover and pressed looks) addressed by region index, row-major.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Opaque texture handle handed out by the asset loader.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
pub struct TextureId(pub u32);

/// Atlas subdivision of a texture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AtlasGrid {
    /// Cells along X.
    pub columns: u32,
    /// Cells along Y.
    pub rows: u32,
}

impl AtlasGrid {
    /// A texture that is not subdivided.
    pub const SINGLE: Self = Self { columns: 1, rows: 1 };

    /// Creates a grid. Zero dimensions are clamped to one cell.
    #[must_use]
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns: columns.max(1),
            rows: rows.max(1),
        }
    }

    /// Number of addressable regions.
    #[must_use]
    pub const fn region_count(&self) -> u32 {
        self.columns * self.rows
    }

    /// Size of one cell in UV space.
    #[must_use]
    pub fn cell_uv_size(&self) -> Vec2 {
        Vec2::new(1.0 / self.columns as f32, 1.0 / self.rows as f32)
    }

    /// UV origin and size of region `index`.
    ///
    /// Indices past the end wrap around the grid.
    #[must_use]
    pub fn region_uv(&self, index: u32) -> (Vec2, Vec2) {
        let index = index % self.region_count();
        let size = self.cell_uv_size();
        let column = index % self.columns;
        let row = index / self.columns;
        (Vec2::new(column as f32 * size.x, row as f32 * size.y), size)
    }
}

impl Default for AtlasGrid {
    fn default() -> Self {
        Self::SINGLE
    }
}
