//! # Upscale Cache
//!
//! Integer pixel scaling is the common case for sprite art. Each texture
//! keeps nearest-neighbor copies at 1x, 2x and 4x, already converted to the
//! framebuffer byte order, so a blit at those scales is a plain row copy.
//! Copies are built the first time a scale is needed. Any other scale is
//! resampled per draw.

use quadra_shared::PixelFormat;

use super::framebuffer::{encode, Pixel};
use crate::texture::Texture;

/// An image in framebuffer byte order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Row-major pixels.
    pub pixels: Vec<Pixel>,
}

impl Image {
    /// Converts a texture's RGBA data to `format`.
    #[must_use]
    pub fn from_texture(texture: &Texture, format: PixelFormat) -> Self {
        let rgba: &[Pixel] = bytemuck::cast_slice(texture.pixels());
        Self {
            width: texture.width(),
            height: texture.height(),
            pixels: rgba.iter().map(|&p| encode(p, format)).collect(),
        }
    }

    /// Pixels of row `y` from column `x`, `len` wide.
    #[inline]
    #[must_use]
    pub fn span(&self, x: u32, y: u32, len: usize) -> &[Pixel] {
        let start = y as usize * self.width as usize + x as usize;
        &self.pixels[start..start + len]
    }

    /// Nearest-neighbor resample of the `src_w` x `src_h` region at
    /// (`src_x`, `src_y`) to `dst_w` x `dst_h`.
    #[must_use]
    pub fn resample(&self, src_x: u32, src_y: u32, src_w: u32, src_h: u32, dst_w: u32, dst_h: u32) -> Self {
        let mut pixels = Vec::with_capacity(dst_w as usize * dst_h as usize);
        for y in 0..dst_h {
            let sy = src_y + (u64::from(y) * u64::from(src_h) / u64::from(dst_h)) as u32;
            for x in 0..dst_w {
                let sx = src_x + (u64::from(x) * u64::from(src_w) / u64::from(dst_w)) as u32;
                pixels.push(self.pixels[sy as usize * self.width as usize + sx as usize]);
            }
        }
        Self {
            width: dst_w,
            height: dst_h,
            pixels,
        }
    }

    /// Whole-image integer upscale.
    #[must_use]
    pub fn upscaled(&self, factor: u32) -> Self {
        self.resample(0, 0, self.width, self.height, self.width * factor, self.height * factor)
    }
}

/// Which source a blit reads from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScaleChoice {
    /// A cached copy at this integer factor (1, 2 or 4).
    Cached(u32),
    /// Resample on the fly.
    Resample,
}

/// Picks a cached scale when both axes are within `epsilon` of 1, 2 or 4.
#[must_use]
pub fn choose_scale(scale_x: f32, scale_y: f32, epsilon: f32) -> ScaleChoice {
    [1u32, 2, 4]
        .into_iter()
        .find(|&factor| {
            let f = factor as f32;
            (scale_x - f).abs() <= epsilon && (scale_y - f).abs() <= epsilon
        })
        .map_or(ScaleChoice::Resample, ScaleChoice::Cached)
}

/// Per-texture converted copies.
#[derive(Clone, Debug)]
pub struct UpscaleCache {
    base: Image,
    double: Option<Image>,
    quad: Option<Image>,
}

impl UpscaleCache {
    /// Converts `texture` to `format`. Upscaled copies are built on demand.
    #[must_use]
    pub fn new(texture: &Texture, format: PixelFormat) -> Self {
        Self {
            base: Image::from_texture(texture, format),
            double: None,
            quad: None,
        }
    }

    /// Whether this cache was built from a texture of this size.
    #[must_use]
    pub fn matches(&self, texture: &Texture) -> bool {
        self.base.width == texture.width() && self.base.height == texture.height()
    }

    /// The 1x copy.
    #[must_use]
    pub fn base(&self) -> &Image {
        &self.base
    }

    /// The copy at `factor` (1, 2 or 4), building it if needed.
    /// Other factors return the 1x copy.
    pub fn get(&mut self, factor: u32) -> &Image {
        let Self { base, double, quad } = self;
        match factor {
            2 => double.get_or_insert_with(|| base.upscaled(2)),
            4 => quad.get_or_insert_with(|| base.upscaled(4)),
            _ => base,
        }
    }

    /// Number of upscaled copies built so far.
    #[must_use]
    pub fn built(&self) -> usize {
        usize::from(self.double.is_some()) + usize::from(self.quad.is_some())
    }
}
