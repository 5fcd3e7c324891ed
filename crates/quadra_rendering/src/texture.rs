//! # Textures
//!
//! CPU-side texture data as handed over by the asset loader: size, atlas
//! grid and tightly packed RGBA8 pixels. Loading and decoding happen
//! elsewhere; the renderer only looks textures up by id.

use std::collections::HashMap;

use quadra_shared::{AtlasGrid, TextureId};

use crate::error::{RenderError, RenderResult};

/// Bytes per RGBA8 pixel.
pub const BYTES_PER_PIXEL: usize = 4;

/// A loaded texture.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Texture {
    id: TextureId,
    width: u32,
    height: u32,
    grid: AtlasGrid,
    pixels: Vec<u8>,
}

impl Texture {
    /// Wraps RGBA8 pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::PixelSize`] if `pixels` is not exactly
    /// `width * height * 4` bytes.
    pub fn new(id: TextureId, width: u32, height: u32, grid: AtlasGrid, pixels: Vec<u8>) -> RenderResult<Self> {
        let expected = width as usize * height as usize * BYTES_PER_PIXEL;
        if pixels.len() != expected {
            return Err(RenderError::PixelSize {
                id,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            id,
            width,
            height,
            grid,
            pixels,
        })
    }

    /// A texture filled with one color.
    #[must_use]
    pub fn solid(id: TextureId, width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba.repeat(width as usize * height as usize);
        Self {
            id,
            width,
            height,
            grid: AtlasGrid::SINGLE,
            pixels,
        }
    }

    /// Handle of this texture.
    #[inline]
    #[must_use]
    pub fn id(&self) -> TextureId {
        self.id
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Atlas subdivision.
    #[inline]
    #[must_use]
    pub fn grid(&self) -> AtlasGrid {
        self.grid
    }

    /// Replaces the atlas subdivision.
    #[must_use]
    pub fn with_grid(mut self, grid: AtlasGrid) -> Self {
        self.grid = grid;
        self
    }

    /// Raw RGBA8 rows, top to bottom.
    #[inline]
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Native pixel size of one atlas cell.
    #[must_use]
    pub fn region_size(&self) -> (u32, u32) {
        (self.width / self.grid.columns, self.height / self.grid.rows)
    }

    /// One pixel, or `None` outside the texture.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut out = [0; 4];
        out.copy_from_slice(&self.pixels[offset..offset + BYTES_PER_PIXEL]);
        Some(out)
    }
}

/// Anything that can resolve a texture id.
pub trait TextureSource {
    /// The texture for `id`, if loaded.
    fn texture(&self, id: TextureId) -> Option<&Texture>;
}

/// Simple id-keyed texture store.
#[derive(Debug, Default)]
pub struct TextureAtlas {
    textures: HashMap<TextureId, Texture>,
}

impl TextureAtlas {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces a texture, returning the previous one.
    pub fn insert(&mut self, texture: Texture) -> Option<Texture> {
        self.textures.insert(texture.id(), texture)
    }

    /// Removes a texture.
    pub fn remove(&mut self, id: TextureId) -> Option<Texture> {
        self.textures.remove(&id)
    }

    /// Whether `id` is loaded.
    #[must_use]
    pub fn contains(&self, id: TextureId) -> bool {
        self.textures.contains_key(&id)
    }

    /// Number of loaded textures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.textures.len()
    }

    /// True if nothing is loaded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.textures.is_empty()
    }
}

impl TextureSource for TextureAtlas {
    fn texture(&self, id: TextureId) -> Option<&Texture> {
        self.textures.get(&id)
    }
}
