//! Rendering error types.

use quadra_shared::TextureId;
use thiserror::Error;

/// Errors that can occur while setting up or feeding the renderer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// Pixel data does not match the declared texture size.
    #[error("texture {id:?}: expected {expected} bytes of RGBA8, got {actual}")]
    PixelSize {
        /// Texture being created.
        id: TextureId,
        /// `width * height * 4`.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// A viewport or framebuffer with a zero dimension.
    #[error("invalid viewport size {width}x{height}")]
    InvalidViewport {
        /// Requested width in pixels.
        width: u32,
        /// Requested height in pixels.
        height: u32,
    },
}

/// Result type for rendering operations.
pub type RenderResult<T> = Result<T, RenderError>;
