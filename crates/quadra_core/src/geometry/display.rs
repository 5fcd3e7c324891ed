//! # Display Component
//!
//! The visual component: a vertex buffer plus the subsprites that slice it.
//! Subsprites are append-only; an index returned by
//! [`DisplayComponent::add_subsprite`] stays valid for the component's life.
//!
//! Subsprite and quad indices are not validated beyond slice bounds
//! checks. Passing a bad index is a programmer error and panics.

use quadra_shared::{AtlasGrid, Bounds, TextureId, Vec2};

use super::vertex::{RenderLayer, Subsprite, Vertex, VERTICES_PER_QUAD};
use crate::ecs::{Component, Entity};

/// Raw selector meaning "every subsprite" in [`DisplayComponent::get_dimensions_raw`].
pub const ALL_SUBSPRITES: usize = 255;

/// Visual component: quads grouped into subsprites.
#[derive(Clone, Debug, Default)]
pub struct DisplayComponent {
    owner: Entity,
    vertices: Vec<Vertex>,
    subsprites: Vec<Subsprite>,
}

impl DisplayComponent {
    /// Creates an empty component.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a component with one single-quad subsprite covering
    /// `pos..pos + size` and sampling the whole texture.
    #[must_use]
    pub fn quad(pos: Vec2, size: Vec2, layer: RenderLayer, texture: Option<TextureId>) -> Self {
        let mut display = Self::new();
        let sub = display.add_subsprite(1, layer);
        display.set_texture(sub, texture);
        display.set_pos(pos, size, sub, 0);
        display.set_uv(Vec2::ZERO, Vec2::ONE, sub, 0);
        display
    }

    /// Appends a subsprite of `quad_count` fresh quads and returns its index.
    pub fn add_subsprite(&mut self, quad_count: usize, layer: RenderLayer) -> usize {
        let start = self.vertices.len();
        let len = quad_count * VERTICES_PER_QUAD;
        self.vertices.resize(start + len, Vertex::default());
        self.subsprites.push(Subsprite {
            start,
            len,
            texture: None,
            z: 0,
            layer,
        });
        self.subsprites.len() - 1
    }

    /// All subsprites in insertion order.
    #[inline]
    #[must_use]
    pub fn subsprites(&self) -> &[Subsprite] {
        &self.subsprites
    }

    /// One subsprite.
    #[inline]
    #[must_use]
    pub fn subsprite(&self, subsprite: usize) -> &Subsprite {
        &self.subsprites[subsprite]
    }

    /// The whole vertex buffer.
    #[inline]
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertices of one subsprite.
    #[inline]
    #[must_use]
    pub fn subsprite_vertices(&self, subsprite: usize) -> &[Vertex] {
        &self.vertices[self.subsprites[subsprite].range()]
    }

    /// Total number of quads across all subsprites.
    #[inline]
    #[must_use]
    pub fn quad_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_QUAD
    }

    /// Sets the texture sampled by a subsprite.
    pub fn set_texture(&mut self, subsprite: usize, texture: Option<TextureId>) {
        self.subsprites[subsprite].texture = texture;
    }

    /// Moves a subsprite to another render layer.
    pub fn set_layer(&mut self, subsprite: usize, layer: RenderLayer) {
        self.subsprites[subsprite].layer = layer;
    }

    /// Sets the z-order hint of a subsprite.
    pub fn set_z(&mut self, subsprite: usize, z: i16) {
        self.subsprites[subsprite].z = z;
    }

    /// Writes the four corner positions of one quad.
    pub fn set_pos(&mut self, pos: Vec2, size: Vec2, subsprite: usize, quad: usize) {
        let range = self.subsprites[subsprite].quad_range(quad);
        for (vertex, corner) in self.vertices[range].iter_mut().zip(corners(pos, size)) {
            vertex.pos = corner;
        }
    }

    /// Writes the four corner texture coordinates of one quad.
    pub fn set_uv(&mut self, uv_pos: Vec2, uv_size: Vec2, subsprite: usize, quad: usize) {
        let range = self.subsprites[subsprite].quad_range(quad);
        for (vertex, corner) in self.vertices[range].iter_mut().zip(corners(uv_pos, uv_size)) {
            vertex.uv = corner;
        }
    }

    /// Points one quad at atlas cell `region` of a texture divided by `grid`.
    pub fn set_tex_region(&mut self, grid: &AtlasGrid, region: u32, subsprite: usize, quad: usize) {
        let (uv_pos, uv_size) = grid.region_uv(region);
        self.set_uv(uv_pos, uv_size, subsprite, quad);
    }

    /// Rotates every vertex by `theta` radians about the center of the
    /// whole component's bounding box.
    ///
    /// All subsprites turn together; there is no per-subsprite rotation.
    pub fn rotate(&mut self, theta: f32) {
        let bounds = self.get_dimensions(None);
        if !bounds.is_valid() {
            return;
        }
        let center = bounds.center();
        for vertex in &mut self.vertices {
            vertex.pos = vertex.pos.rotate_about(center, theta);
        }
    }

    /// Axis-aligned bounds of one subsprite, or of the whole buffer for `None`.
    ///
    /// An empty range yields the inverted [`Bounds::EMPTY`].
    #[must_use]
    pub fn get_dimensions(&self, subsprite: Option<usize>) -> Bounds {
        let vertices = match subsprite {
            Some(index) => self.subsprite_vertices(index),
            None => &self.vertices,
        };
        vertices.iter().fold(Bounds::EMPTY, |mut bounds, vertex| {
            bounds.include(vertex.pos);
            bounds
        })
    }

    /// [`DisplayComponent::get_dimensions`] taking the raw selector, where
    /// [`ALL_SUBSPRITES`] means the whole buffer.
    #[must_use]
    pub fn get_dimensions_raw(&self, subsprite: usize) -> Bounds {
        if subsprite == ALL_SUBSPRITES {
            self.get_dimensions(None)
        } else {
            self.get_dimensions(Some(subsprite))
        }
    }

    /// Center of the whole bounding box, if there is any geometry.
    #[must_use]
    pub fn center(&self) -> Option<Vec2> {
        let bounds = self.get_dimensions(None);
        bounds.is_valid().then(|| bounds.center())
    }

    /// Translates every vertex by `delta`.
    pub fn move_by(&mut self, delta: Vec2) {
        for vertex in &mut self.vertices {
            vertex.pos += delta;
        }
    }

    /// Translates every vertex so the bounding box origin lands on `pos`.
    pub fn move_to(&mut self, pos: Vec2) {
        let bounds = self.get_dimensions(None);
        if bounds.is_valid() {
            self.move_by(pos - bounds.origin());
        }
    }
}

impl Component for DisplayComponent {
    const NAME: &'static str = "display";

    fn owner(&self) -> Entity {
        self.owner
    }

    fn set_owner(&mut self, owner: Entity) {
        self.owner = owner;
    }
}

/// Quad corners in storage order: top-left, top-right, bottom-right, bottom-left.
#[inline]
fn corners(origin: Vec2, size: Vec2) -> [Vec2; VERTICES_PER_QUAD] {
    [
        origin,
        Vec2::new(origin.x + size.x, origin.y),
        origin + size,
        Vec2::new(origin.x, origin.y + size.y),
    ]
}
