//! Rendering statistics.

/// Statistics from one [`render_layer`](crate::BatchRenderer::render_layer) call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Number of backend draw calls.
    pub draw_calls: u32,
    /// Number of quads streamed.
    pub quads: u32,
    /// Subsprites skipped because their texture was not loaded.
    pub skipped_subsprites: u32,
    /// Whether the pending pool was re-sorted first.
    pub resorted: bool,
}

impl RenderStats {
    /// Average quads per draw call.
    #[must_use]
    pub fn quads_per_call(&self) -> f32 {
        if self.draw_calls > 0 {
            self.quads as f32 / self.draw_calls as f32
        } else {
            0.0
        }
    }
}
