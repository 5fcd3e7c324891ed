//! # Software Backend
//!
//! CPU rasterizer for axis-aligned sprites. Each quad becomes one clipped
//! rectangle copy:
//!
//! 1. Screen rect = camera transform of the quad's position bounds
//! 2. Source rect = the quad's UV bounds in texture pixels
//! 3. Scale = screen size / source size, matched against the 1x/2x/4x caches
//! 4. Clip to the framebuffer, then copy row by row. Scales without a cached
//!    copy are sampled per visible pixel.
//!
//! Rotation is not rasterized: a rotated quad draws as its bounding box.
//! Flipped UVs draw unflipped. Pixels are copied, not blended.

mod blit;
mod framebuffer;
mod upscale;

use std::collections::HashMap;

use quadra_core::{Bounds, RenderLayer, Vertex};
use quadra_shared::constants::VERTICES_PER_QUAD;
use quadra_shared::{PixelFormat, RenderConfig, TextureId};
use tracing::{debug, trace};

pub use blit::{blit, blit_scaled, Rect};
pub use framebuffer::{decode, encode, Framebuffer, Pixel};
pub use upscale::{choose_scale, Image, ScaleChoice, UpscaleCache};

use crate::backend::{Camera, DrawBackend};
use crate::error::{RenderError, RenderResult};
use crate::texture::Texture;

/// Counters for how quads reached the framebuffer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BlitStats {
    /// Quads copied from the 1x copy.
    pub native: u32,
    /// Quads copied from a cached 2x or 4x copy.
    pub cached_upscale: u32,
    /// Quads resampled on the fly.
    pub resampled: u32,
    /// Quads with no visible pixels.
    pub culled: u32,
}

/// CPU backend drawing into a [`Framebuffer`].
pub struct SoftwareBackend {
    framebuffer: Framebuffer,
    camera: Camera,
    epsilon: f32,
    caches: HashMap<TextureId, UpscaleCache>,
    stats: BlitStats,
}

impl SoftwareBackend {
    /// Creates a backend with a `width` x `height` framebuffer.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidViewport`] for a zero dimension.
    pub fn new(width: u32, height: u32, format: PixelFormat, epsilon: f32) -> RenderResult<Self> {
        check_viewport(width, height)?;
        Ok(Self {
            framebuffer: Framebuffer::new(width, height, format),
            camera: Camera::default(),
            epsilon,
            caches: HashMap::new(),
            stats: BlitStats::default(),
        })
    }

    /// Creates a backend using the configured byte order and scale tolerance.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::InvalidViewport`] for a zero dimension.
    pub fn from_config(width: u32, height: u32, config: &RenderConfig) -> RenderResult<Self> {
        Self::new(width, height, config.pixel_format, config.upscale_epsilon)
    }

    /// The framebuffer.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Blit counters since the last [`SoftwareBackend::reset_stats`].
    #[must_use]
    pub fn stats(&self) -> BlitStats {
        self.stats
    }

    /// Zeroes the blit counters.
    pub fn reset_stats(&mut self) {
        self.stats = BlitStats::default();
    }

    /// Cached copies held for a texture, if it has been drawn.
    #[must_use]
    pub fn cache(&self, id: TextureId) -> Option<&UpscaleCache> {
        self.caches.get(&id)
    }

    /// Drops the cached copies of a texture, e.g. after its pixels change.
    pub fn invalidate_texture(&mut self, id: TextureId) {
        self.caches.remove(&id);
    }

    /// Draws one quad.
    fn draw_quad(&mut self, texture: &Texture, quad: &[Vertex]) {
        let (pos, uv) = quad.iter().fold((Bounds::EMPTY, Bounds::EMPTY), |(mut pos, mut uv), v| {
            pos.include(v.pos);
            uv.include(v.uv);
            (pos, uv)
        });

        let top_left = self.camera.world_to_screen(pos.min);
        let bottom_right = self.camera.world_to_screen(pos.max);
        let dest = Rect {
            x: top_left.x.round() as i32,
            y: top_left.y.round() as i32,
            width: (bottom_right.x - top_left.x).round().max(0.0) as u32,
            height: (bottom_right.y - top_left.y).round().max(0.0) as u32,
        };

        let tex_w = texture.width() as f32;
        let tex_h = texture.height() as f32;
        let src_x = (uv.min.x * tex_w).round().clamp(0.0, tex_w) as u32;
        let src_y = (uv.min.y * tex_h).round().clamp(0.0, tex_h) as u32;
        let src_w = ((uv.max.x * tex_w).round().clamp(0.0, tex_w) as u32).saturating_sub(src_x);
        let src_h = ((uv.max.y * tex_h).round().clamp(0.0, tex_h) as u32).saturating_sub(src_y);

        if dest.width == 0 || dest.height == 0 || src_w == 0 || src_h == 0 {
            self.stats.culled += 1;
            return;
        }

        let format = self.framebuffer.format();
        let cache = self
            .caches
            .entry(texture.id())
            .or_insert_with(|| UpscaleCache::new(texture, format));
        if !cache.matches(texture) {
            debug!(texture = texture.id().0, "texture size changed, rebuilding upscale cache");
            *cache = UpscaleCache::new(texture, format);
        }

        let scale_x = dest.width as f32 / src_w as f32;
        let scale_y = dest.height as f32 / src_h as f32;
        let written = match choose_scale(scale_x, scale_y, self.epsilon) {
            ScaleChoice::Cached(factor) => {
                if factor == 1 {
                    self.stats.native += 1;
                } else {
                    self.stats.cached_upscale += 1;
                }
                // A scale within epsilon can round one pixel past the region
                let region = Rect {
                    width: dest.width.min(src_w * factor),
                    height: dest.height.min(src_h * factor),
                    ..dest
                };
                let image = cache.get(factor);
                blit(&mut self.framebuffer, image, src_x * factor, src_y * factor, region)
            }
            ScaleChoice::Resample => {
                self.stats.resampled += 1;
                blit_scaled(&mut self.framebuffer, cache.base(), src_x, src_y, src_w, src_h, dest)
            }
        };
        if written == 0 {
            self.stats.culled += 1;
        }
    }
}

impl DrawBackend for SoftwareBackend {
    fn set_viewport(&mut self, width: u32, height: u32) -> RenderResult<()> {
        check_viewport(width, height)?;
        self.framebuffer.resize(width, height);
        Ok(())
    }

    fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    fn clear_screen(&mut self, rgba: [u8; 4]) {
        self.framebuffer.clear(rgba);
    }

    fn draw_batch(&mut self, texture: &Texture, layer: RenderLayer, vertices: &[Vertex]) {
        trace!(texture = texture.id().0, ?layer, quads = vertices.len() / VERTICES_PER_QUAD, "draw batch");
        for quad in vertices.chunks_exact(VERTICES_PER_QUAD) {
            self.draw_quad(texture, quad);
        }
    }
}

fn check_viewport(width: u32, height: u32) -> RenderResult<()> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidViewport { width, height });
    }
    Ok(())
}
