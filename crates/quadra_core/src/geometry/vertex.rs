//! Vertex and subsprite records.

use bytemuck::{Pod, Zeroable};
use quadra_shared::{TextureId, Vec2};

pub use quadra_shared::constants::VERTICES_PER_QUAD;

/// One sprite vertex: position plus texture coordinate.
///
/// 16 bytes of plain data, uploadable as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// World-space position.
    pub pos: Vec2,
    /// Texture coordinate in `[0, 1]`.
    pub uv: Vec2,
}

impl Vertex {
    /// Creates a vertex.
    #[inline]
    #[must_use]
    pub const fn new(pos: Vec2, uv: Vec2) -> Self {
        Self { pos, uv }
    }
}

/// Render layer of a subsprite, in back-to-front order.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum RenderLayer {
    /// Not drawn.
    #[default]
    Null = 0,
    /// Backdrop behind the map.
    Background = 1,
    /// Map and gameplay sprites.
    World = 2,
    /// Effects drawn over gameplay sprites.
    Foreground = 3,
    /// Interface elements.
    Ui = 4,
}

impl RenderLayer {
    /// Whether subsprites on this layer are drawn at all.
    #[inline]
    #[must_use]
    pub const fn is_drawn(self) -> bool {
        !matches!(self, Self::Null)
    }
}

/// A contiguous run of `4 * quad_count` vertices in a display component.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Subsprite {
    /// Offset of the first vertex.
    pub start: usize,
    /// Number of vertices; always a multiple of four.
    pub len: usize,
    /// Texture to sample, if any.
    pub texture: Option<TextureId>,
    /// Z-order hint within a layer.
    pub z: i16,
    /// Render layer.
    pub layer: RenderLayer,
}

impl Subsprite {
    /// Number of quads.
    #[inline]
    #[must_use]
    pub const fn quad_count(&self) -> usize {
        self.len / VERTICES_PER_QUAD
    }

    /// Vertex index range.
    #[inline]
    #[must_use]
    pub const fn range(&self) -> std::ops::Range<usize> {
        self.start..self.start + self.len
    }

    /// Vertex index range of one quad.
    #[inline]
    #[must_use]
    pub const fn quad_range(&self, quad: usize) -> std::ops::Range<usize> {
        let first = self.start + quad * VERTICES_PER_QUAD;
        first..first + VERTICES_PER_QUAD
    }
}
