//! Draw backend abstraction.
//!
//! The batch renderer decides *what* goes into each draw call; a backend
//! decides how a draw call reaches pixels. The software backend in
//! [`crate::software`] is the reference implementation.

use quadra_core::{RenderLayer, Vertex};
use quadra_shared::Vec2;

use crate::error::RenderResult;
use crate::texture::Texture;

/// 2D camera: world position at the top-left of the screen plus zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World-space point shown at screen pixel (0, 0).
    pub position: Vec2,
    /// Screen pixels per world unit.
    pub zoom: f32,
}

impl Camera {
    /// Creates a camera.
    #[must_use]
    pub const fn new(position: Vec2, zoom: f32) -> Self {
        Self { position, zoom }
    }

    /// Maps a world position to screen pixels.
    #[inline]
    #[must_use]
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        (world - self.position) * self.zoom
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec2::ZERO, 1.0)
    }
}

/// A draw target.
pub trait DrawBackend {
    /// Resizes the output surface.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidViewport`](crate::RenderError::InvalidViewport)
    /// for a zero dimension.
    fn set_viewport(&mut self, width: u32, height: u32) -> RenderResult<()>;

    /// Sets the world-to-screen transform for subsequent draws.
    fn set_camera(&mut self, camera: Camera);

    /// Fills the whole surface with an RGBA color.
    fn clear_screen(&mut self, rgba: [u8; 4]);

    /// Draws `vertices` (whole quads) sampling `texture`, all on `layer`.
    fn draw_batch(&mut self, texture: &Texture, layer: RenderLayer, vertices: &[Vertex]);
}
