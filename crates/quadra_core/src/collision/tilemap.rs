//! # Tilemap Collision
//!
//! Each tile type maps to a [`TileData`] byte: four quadrants, two bits
//! each (bit 0 blocks ground movers, bit 1 blocks air movers).
//!
//! ```text
//! quadrant = (frac.x >= 0.5) + 2 * (frac.y >= 0.5)
//!
//! +----+----+
//! | 0  | 1  |
//! +----+----+
//! | 2  | 3  |
//! +----+----+
//! ```
//!
//! Positions outside the map are blocked.

use quadra_shared::Vec2;
use tracing::warn;

use super::flags::TileCollision;
use super::sat::enabled_vertices;
use crate::geometry::DisplayComponent;

/// One quarter of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Quadrant {
    /// Upper left.
    TopLeft = 0,
    /// Upper right.
    TopRight = 1,
    /// Lower left.
    BottomLeft = 2,
    /// Lower right.
    BottomRight = 3,
}

impl Quadrant {
    /// All four, in bit order.
    pub const ALL: [Self; 4] = [Self::TopLeft, Self::TopRight, Self::BottomLeft, Self::BottomRight];

    /// Quadrant containing a fractional in-tile position.
    #[inline]
    #[must_use]
    pub fn from_fraction(frac: Vec2) -> Self {
        match (frac.x >= 0.5, frac.y >= 0.5) {
            (false, false) => Self::TopLeft,
            (true, false) => Self::TopRight,
            (false, true) => Self::BottomLeft,
            (true, true) => Self::BottomRight,
        }
    }

    #[inline]
    const fn shift(self) -> u8 {
        (self as u8) * 2
    }
}

/// Per-quadrant blocking masks of one tile type.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct TileData(u8);

impl TileData {
    /// Blocks nothing.
    pub const EMPTY: Self = Self(0);
    /// Blocks everything everywhere.
    pub const SOLID: Self = Self(0xFF);

    /// Wraps a raw byte.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits)
    }

    /// The raw byte.
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// The same mask in all four quadrants.
    #[must_use]
    pub const fn uniform(kind: TileCollision) -> Self {
        let m = kind.bits();
        Self(m | (m << 2) | (m << 4) | (m << 6))
    }

    /// Returns a copy with one quadrant's mask replaced.
    #[must_use]
    pub const fn with_quadrant(self, quadrant: Quadrant, kind: TileCollision) -> Self {
        let shift = quadrant.shift();
        Self((self.0 & !(0b11 << shift)) | (kind.bits() << shift))
    }

    /// Two-bit mask of one quadrant.
    #[inline]
    #[must_use]
    pub const fn quadrant(self, quadrant: Quadrant) -> u8 {
        (self.0 >> quadrant.shift()) & 0b11
    }

    /// Whether a quadrant blocks movers of type `kind`.
    #[inline]
    #[must_use]
    pub const fn blocks(self, quadrant: Quadrant, kind: TileCollision) -> bool {
        self.quadrant(quadrant) & kind.bits() != 0
    }
}

/// Tile type to [`TileData`] lookup. Unknown tile types block nothing.
#[derive(Clone, Debug, Default)]
pub struct TileTable {
    entries: Vec<TileData>,
}

impl TileTable {
    /// Creates a table indexed by tile type.
    #[must_use]
    pub fn new(entries: Vec<TileData>) -> Self {
        Self { entries }
    }

    /// Data for a tile type.
    #[inline]
    #[must_use]
    pub fn get(&self, tile_type: u8) -> TileData {
        self.entries.get(usize::from(tile_type)).copied().unwrap_or(TileData::EMPTY)
    }

    /// Sets the data of a tile type, growing the table as needed.
    pub fn set(&mut self, tile_type: u8, data: TileData) {
        let index = usize::from(tile_type);
        if index >= self.entries.len() {
            self.entries.resize(index + 1, TileData::EMPTY);
        }
        self.entries[index] = data;
    }
}

/// A grid of tile types, one world unit per tile.
#[derive(Clone, Debug)]
pub struct Tilemap {
    width: usize,
    height: usize,
    tiles: Vec<u8>,
    table: TileTable,
}

impl Tilemap {
    /// Creates a map filled with tile type 0.
    #[must_use]
    pub fn new(width: usize, height: usize, table: TileTable) -> Self {
        Self {
            width,
            height,
            tiles: vec![0; width * height],
            table,
        }
    }

    /// Creates a map from row-major tile types. Returns `None` when the
    /// length does not match the dimensions.
    #[must_use]
    pub fn from_tiles(width: usize, height: usize, tiles: Vec<u8>, table: TileTable) -> Option<Self> {
        if tiles.len() != width * height {
            warn!(width, height, len = tiles.len(), "tilemap size mismatch");
            return None;
        }
        Some(Self {
            width,
            height,
            tiles,
            table,
        })
    }

    /// Width in tiles.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Height in tiles.
    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    /// The tile type lookup.
    #[must_use]
    pub fn table(&self) -> &TileTable {
        &self.table
    }

    /// Tile type at a cell, if in bounds.
    #[must_use]
    pub fn tile(&self, x: usize, y: usize) -> Option<u8> {
        (x < self.width && y < self.height).then(|| self.tiles[y * self.width + x])
    }

    /// Overwrites a cell. Out-of-bounds writes are ignored.
    pub fn set_tile(&mut self, x: usize, y: usize, tile_type: u8) {
        if x < self.width && y < self.height {
            self.tiles[y * self.width + x] = tile_type;
        }
    }

    /// Whether a world position is blocked for movers of type `kind`.
    #[must_use]
    pub fn collides_at(&self, pos: Vec2, kind: TileCollision) -> bool {
        if kind == TileCollision::None {
            return false;
        }
        if !(pos.x >= 0.0 && pos.y >= 0.0) {
            return true;
        }
        let (cell_x, cell_y) = (pos.x.floor(), pos.y.floor());
        let Some(tile_type) = self.tile(cell_x as usize, cell_y as usize) else {
            return true;
        };
        let frac = Vec2::new(pos.x - cell_x, pos.y - cell_y);
        self.table.get(tile_type).blocks(Quadrant::from_fraction(frac), kind)
    }

    /// Whether any enabled vertex of a sprite lies in a blocked quadrant.
    #[must_use]
    pub fn sprite_hits_map(&self, display: &DisplayComponent, disabled: &[usize], kind: TileCollision) -> bool {
        kind != TileCollision::None
            && enabled_vertices(display, disabled).any(|vertex| self.collides_at(vertex.pos, kind))
    }
}
