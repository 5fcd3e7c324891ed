//! 32-bit framebuffer in the backend's byte order.

use quadra_shared::PixelFormat;

/// One pixel, four bytes in the framebuffer's [`PixelFormat`] order.
pub type Pixel = [u8; 4];

/// Converts an RGBA pixel to `format` order.
#[inline]
#[must_use]
pub fn encode(rgba: Pixel, format: PixelFormat) -> Pixel {
    match format {
        PixelFormat::Rgba => rgba,
        PixelFormat::Bgra => [rgba[2], rgba[1], rgba[0], rgba[3]],
    }
}

/// Converts a `format`-order pixel back to RGBA. The swap is its own inverse.
#[inline]
#[must_use]
pub fn decode(pixel: Pixel, format: PixelFormat) -> Pixel {
    encode(pixel, format)
}

/// A width x height grid of pixels, row-major, top row first.
#[derive(Clone, Debug)]
pub struct Framebuffer {
    width: u32,
    height: u32,
    format: PixelFormat,
    pixels: Vec<Pixel>,
}

impl Framebuffer {
    /// Creates a black, fully transparent framebuffer.
    #[must_use]
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
            pixels: vec![[0; 4]; width as usize * height as usize],
        }
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

    /// Byte order.
    #[inline]
    #[must_use]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Reallocates for a new size if it changed. Contents are cleared.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.width != width || self.height != height {
            self.width = width;
            self.height = height;
            self.pixels = vec![[0; 4]; width as usize * height as usize];
        }
    }

    /// Fills every pixel with an RGBA color.
    pub fn clear(&mut self, rgba: Pixel) {
        self.pixels.fill(encode(rgba, self.format));
    }

    /// One pixel converted back to RGBA, or `None` outside the buffer.
    #[must_use]
    pub fn pixel_rgba(&self, x: u32, y: u32) -> Option<Pixel> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(decode(self.pixels[self.index(x, y)], self.format))
    }

    /// Pixels of one row.
    #[must_use]
    pub fn row(&self, y: u32) -> &[Pixel] {
        let start = self.index(0, y);
        &self.pixels[start..start + self.width as usize]
    }

    /// Mutable pixels of one row.
    pub fn row_mut(&mut self, y: u32) -> &mut [Pixel] {
        let start = self.index(0, y);
        let width = self.width as usize;
        &mut self.pixels[start..start + width]
    }

    /// The raw bytes, ready to present.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }
}
