//! # Batch Renderer
//!
//! Sort-and-stream batching:
//!
//! ```text
//! add_sprite ──▶ pending pool ──sort (texture, layer)──▶ staging (N quads) ──▶ draw_batch
//!                                                          ▲        │
//!                                                          └─flush──┘ on full or key change
//! ```
//!
//! Any number of sprites goes through one fixed-size staging buffer, and
//! every run of the same texture and layer costs `ceil(quads / N)` draws.

use quadra_core::{ComponentPool, DisplayComponent, RenderLayer, Vertex};
use quadra_shared::constants::VERTICES_PER_QUAD;
use quadra_shared::{RenderConfig, TextureId};
use tracing::{debug, trace, warn};

use crate::backend::{Camera, DrawBackend};
use crate::error::RenderResult;
use crate::stats::RenderStats;
use crate::texture::{Texture, TextureSource};

/// One queued subsprite: a run of vertices copied out of its display.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct BatchEntry {
    texture: TextureId,
    layer: RenderLayer,
    start: usize,
    len: usize,
}

impl BatchEntry {
    #[inline]
    fn key(&self) -> (TextureId, RenderLayer) {
        (self.texture, self.layer)
    }
}

/// The staged run currently waiting for a draw call.
struct Run<'t> {
    texture: Option<&'t Texture>,
    layer: RenderLayer,
}

/// Texture-batching sprite renderer over a [`DrawBackend`].
pub struct BatchRenderer<B: DrawBackend> {
    backend: B,
    /// Vertex arena for every queued subsprite.
    vertices: Vec<Vertex>,
    entries: Vec<BatchEntry>,
    staging: Vec<Vertex>,
    staging_quads: usize,
    dirty: bool,
    camera: Camera,
    last_stats: RenderStats,
}

impl<B: DrawBackend> BatchRenderer<B> {
    /// Creates a renderer with a staging buffer of `staging_quads` quads.
    ///
    /// # Panics
    ///
    /// Panics if `staging_quads` is zero.
    #[must_use]
    pub fn new(backend: B, staging_quads: usize) -> Self {
        assert!(staging_quads > 0, "staging buffer must hold at least one quad");
        Self {
            backend,
            vertices: Vec::new(),
            entries: Vec::new(),
            staging: Vec::with_capacity(staging_quads * VERTICES_PER_QUAD),
            staging_quads,
            dirty: false,
            camera: Camera::default(),
            last_stats: RenderStats::default(),
        }
    }

    /// Creates a renderer sized by a validated configuration.
    #[must_use]
    pub fn from_config(backend: B, config: &RenderConfig) -> Self {
        Self::new(backend, config.staging_quads)
    }

    /// Staging buffer capacity in quads.
    #[must_use]
    pub fn staging_quads(&self) -> usize {
        self.staging_quads
    }

    /// Number of queued subsprites.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    /// Whether the next [`BatchRenderer::render_layer`] will re-sort.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Statistics of the last render.
    #[must_use]
    pub fn last_stats(&self) -> RenderStats {
        self.last_stats
    }

    /// The current camera.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.camera
    }

    /// The backend.
    #[must_use]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutable backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Consumes the renderer and returns its backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Queues every drawable subsprite of `display`.
    ///
    /// Subsprites on [`RenderLayer::Null`], without a texture, or without
    /// vertices are ignored. The geometry is copied; later edits to
    /// `display` do not show until it is queued again. Adding does not
    /// mark the pool dirty.
    pub fn add_sprite(&mut self, display: &DisplayComponent) {
        for (index, sub) in display.subsprites().iter().enumerate() {
            let Some(texture) = sub.texture else {
                continue;
            };
            if !sub.layer.is_drawn() || sub.len == 0 {
                continue;
            }
            let start = self.vertices.len();
            self.vertices.extend_from_slice(display.subsprite_vertices(index));
            self.entries.push(BatchEntry {
                texture,
                layer: sub.layer,
                start,
                len: sub.len,
            });
        }
    }

    /// Empties the pending pool.
    pub fn clear_sprites(&mut self) {
        self.vertices.clear();
        self.entries.clear();
    }

    /// Forces a re-sort before the next render.
    pub fn mark_sprites_dirty(&mut self) {
        self.dirty = true;
    }

    /// Replaces the pending pool with every display in `displays` and marks
    /// it dirty. This is the per-tick geometry submission step.
    pub fn submit_displays(&mut self, displays: &ComponentPool<DisplayComponent>) {
        self.clear_sprites();
        for (_, display) in displays {
            self.add_sprite(display);
        }
        self.mark_sprites_dirty();
        trace!(entries = self.entries.len(), "displays submitted");
    }

    /// Forwards a viewport change to the backend.
    ///
    /// # Errors
    ///
    /// Propagates the backend's viewport error.
    pub fn set_viewport(&mut self, width: u32, height: u32) -> RenderResult<()> {
        self.backend.set_viewport(width, height)
    }

    /// Sets the camera on the backend.
    pub fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
        self.backend.set_camera(camera);
    }

    /// Clears the backend surface.
    pub fn clear_screen(&mut self, rgba: [u8; 4]) {
        self.backend.clear_screen(rgba);
    }

    /// Streams the pending pool to the backend.
    ///
    /// Re-sorts first if dirty (stable, by texture then layer). The pool
    /// itself is kept; call [`BatchRenderer::clear_sprites`] to drop it.
    pub fn render_layer<S: TextureSource + ?Sized>(&mut self, textures: &S) -> RenderStats {
        let mut stats = RenderStats::default();
        if self.dirty {
            self.entries.sort_by_key(BatchEntry::key);
            self.dirty = false;
            stats.resorted = true;
        }

        let capacity = self.staging_quads * VERTICES_PER_QUAD;
        let Self {
            backend,
            vertices,
            entries,
            staging,
            ..
        } = self;
        staging.clear();

        let mut current: Option<(TextureId, RenderLayer)> = None;
        let mut run = Run {
            texture: None,
            layer: RenderLayer::Null,
        };

        for entry in entries.iter() {
            if current != Some(entry.key()) {
                flush(backend, staging, &run, &mut stats);
                current = Some(entry.key());
                run = Run {
                    texture: textures.texture(entry.texture),
                    layer: entry.layer,
                };
                if run.texture.is_none() {
                    warn!(texture = entry.texture.0, "texture not loaded, skipping sprites");
                }
            }
            if run.texture.is_none() {
                stats.skipped_subsprites += 1;
                continue;
            }

            let mut remaining = &vertices[entry.start..entry.start + entry.len];
            while !remaining.is_empty() {
                let take = (capacity - staging.len()).min(remaining.len());
                staging.extend_from_slice(&remaining[..take]);
                remaining = &remaining[take..];
                if staging.len() == capacity {
                    flush(backend, staging, &run, &mut stats);
                }
            }
        }
        flush(backend, staging, &run, &mut stats);

        debug!(
            draw_calls = stats.draw_calls,
            quads = stats.quads,
            skipped = stats.skipped_subsprites,
            "render pass complete"
        );
        self.last_stats = stats;
        stats
    }
}

/// Issues one draw for whatever is staged, then empties the buffer.
fn flush<B: DrawBackend>(backend: &mut B, staging: &mut Vec<Vertex>, run: &Run<'_>, stats: &mut RenderStats) {
    if staging.is_empty() {
        return;
    }
    if let Some(texture) = run.texture {
        backend.draw_batch(texture, run.layer, staging);
        stats.draw_calls += 1;
        stats.quads += (staging.len() / VERTICES_PER_QUAD) as u32;
    }
    staging.clear();
}
