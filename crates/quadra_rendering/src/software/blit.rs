//! Clipped row-copy blit.

use super::framebuffer::Framebuffer;
use super::upscale::Image;

/// Destination rectangle in screen pixels. May extend past the framebuffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

/// Visible part of a destination rectangle, in framebuffer pixels.
struct Clip {
    left: i64,
    top: i64,
    right: i64,
    bottom: i64,
}

/// Clips `dest` to the framebuffer. `None` if nothing is visible.
fn clip(fb: &Framebuffer, dest: Rect) -> Option<Clip> {
    let clip = Clip {
        left: i64::from(dest.x).max(0),
        top: i64::from(dest.y).max(0),
        right: (i64::from(dest.x) + i64::from(dest.width)).min(i64::from(fb.width())),
        bottom: (i64::from(dest.y) + i64::from(dest.height)).min(i64::from(fb.height())),
    };
    (clip.left < clip.right && clip.top < clip.bottom).then_some(clip)
}

/// Copies a `dest.width` x `dest.height` block of `src`, starting at
/// (`src_x`, `src_y`), to `dest`.
///
/// The destination is clipped to the framebuffer and the source offset
/// shifted to match. The copy is further clipped to what `src` holds.
/// Returns the number of pixels written.
pub fn blit(fb: &mut Framebuffer, src: &Image, src_x: u32, src_y: u32, dest: Rect) -> usize {
    let Some(Clip { left, top, right, bottom }) = clip(fb, dest) else {
        return 0;
    };

    // Source offset of the clipped corner
    let sx = i64::from(src_x) + (left - i64::from(dest.x));
    let sy = i64::from(src_y) + (top - i64::from(dest.y));

    let width = (right - left).min(i64::from(src.width) - sx);
    let height = (bottom - top).min(i64::from(src.height) - sy);
    if width <= 0 || height <= 0 {
        return 0;
    }

    let (left, width) = (left as usize, width as usize);
    for row in 0..height {
        let src_row = src.span(sx as u32, (sy + row) as u32, width);
        let dst_row = fb.row_mut((top + row) as u32);
        dst_row[left..left + width].copy_from_slice(src_row);
    }
    width * height as usize
}

/// Nearest-neighbor copy of the `src_w` x `src_h` region of `src` at
/// (`src_x`, `src_y`), stretched over `dest`.
///
/// Only the part of `dest` inside the framebuffer is sampled, so the work
/// is bounded by the framebuffer size however large `dest` is. The region
/// must lie inside `src`. Returns the number of pixels written.
pub fn blit_scaled(
    fb: &mut Framebuffer,
    src: &Image,
    src_x: u32,
    src_y: u32,
    src_w: u32,
    src_h: u32,
    dest: Rect,
) -> usize {
    if src_w == 0 || src_h == 0 {
        return 0;
    }
    let Some(Clip { left, top, right, bottom }) = clip(fb, dest) else {
        return 0;
    };

    let dest_w = u64::from(dest.width);
    let dest_h = u64::from(dest.height);
    for y in top..bottom {
        let dy = (y - i64::from(dest.y)) as u64;
        let sy = src_y + (dy * u64::from(src_h) / dest_h) as u32;
        let src_row = src.span(src_x, sy, src_w as usize);
        let dst_row = fb.row_mut(y as u32);
        for x in left..right {
            let dx = (x - i64::from(dest.x)) as u64;
            dst_row[x as usize] = src_row[(dx * u64::from(src_w) / dest_w) as usize];
        }
    }
    ((right - left) * (bottom - top)) as usize
}

#[cfg(test)]
mod tests {
    use super::*;
    use quadra_shared::PixelFormat;

    fn gradient(width: u32, height: u32) -> Image {
        let pixels = (0..width * height).map(|i| [i as u8, 0, 0, 255]).collect();
        Image { width, height, pixels }
    }

    #[test]
    fn test_blit_inside() {
        let mut fb = Framebuffer::new(4, 4, PixelFormat::Rgba);
        let written = blit(&mut fb, &gradient(2, 2), 0, 0, Rect { x: 1, y: 1, width: 2, height: 2 });

        assert_eq!(written, 4);
        assert_eq!(fb.pixel_rgba(1, 1), Some([0, 0, 0, 255]));
        assert_eq!(fb.pixel_rgba(2, 2), Some([3, 0, 0, 255]));
        assert_eq!(fb.pixel_rgba(0, 0), Some([0, 0, 0, 0]));
    }

    #[test]
    fn test_blit_clipped_top_left_shifts_source() {
        let mut fb = Framebuffer::new(4, 4, PixelFormat::Rgba);
        let written = blit(&mut fb, &gradient(3, 3), 0, 0, Rect { x: -1, y: -2, width: 3, height: 3 });

        assert_eq!(written, 2);
        // Source (1, 2) lands on (0, 0)
        assert_eq!(fb.pixel_rgba(0, 0), Some([7, 0, 0, 255]));
        assert_eq!(fb.pixel_rgba(1, 0), Some([8, 0, 0, 255]));
    }

    #[test]
    fn test_blit_clipped_bottom_right() {
        let mut fb = Framebuffer::new(4, 4, PixelFormat::Rgba);
        let written = blit(&mut fb, &gradient(4, 4), 0, 0, Rect { x: 3, y: 3, width: 4, height: 4 });
        assert_eq!(written, 1);
        assert_eq!(fb.pixel_rgba(3, 3), Some([0, 0, 0, 255]));
    }

    #[test]
    fn test_blit_offscreen_is_noop() {
        let mut fb = Framebuffer::new(4, 4, PixelFormat::Rgba);
        assert_eq!(blit(&mut fb, &gradient(2, 2), 0, 0, Rect { x: 10, y: 0, width: 2, height: 2 }), 0);
        assert_eq!(blit(&mut fb, &gradient(2, 2), 0, 0, Rect { x: -5, y: 0, width: 2, height: 2 }), 0);
    }

    #[test]
    fn test_blit_source_region_offset() {
        let mut fb = Framebuffer::new(2, 1, PixelFormat::Rgba);
        blit(&mut fb, &gradient(4, 1), 2, 0, Rect { x: 0, y: 0, width: 2, height: 1 });
        assert_eq!(fb.pixel_rgba(0, 0), Some([2, 0, 0, 255]));
        assert_eq!(fb.pixel_rgba(1, 0), Some([3, 0, 0, 255]));
    }

    #[test]
    fn test_blit_scaled_samples_visible_part_only() {
        let mut fb = Framebuffer::new(4, 4, PixelFormat::Rgba);
        // 2x2 source stretched over 8x8, half of it off the top-left edge
        let written = blit_scaled(&mut fb, &gradient(2, 2), 0, 0, 2, 2, Rect { x: -4, y: -4, width: 8, height: 8 });

        assert_eq!(written, 16);
        assert_eq!(fb.pixel_rgba(0, 0), Some([3, 0, 0, 255]));
        assert_eq!(fb.pixel_rgba(3, 3), Some([3, 0, 0, 255]));
    }

    #[test]
    fn test_blit_scaled_region_offset() {
        let mut fb = Framebuffer::new(3, 1, PixelFormat::Rgba);
        blit_scaled(&mut fb, &gradient(4, 1), 2, 0, 1, 1, Rect { x: 0, y: 0, width: 3, height: 1 });
        assert_eq!(fb.pixel_rgba(0, 0), Some([2, 0, 0, 255]));
        assert_eq!(fb.pixel_rgba(2, 0), Some([2, 0, 0, 255]));
    }

    #[test]
    fn test_blit_scaled_offscreen_is_noop() {
        let mut fb = Framebuffer::new(4, 4, PixelFormat::Rgba);
        let dest = Rect { x: 4, y: 0, width: u32::MAX, height: u32::MAX };
        assert_eq!(blit_scaled(&mut fb, &gradient(2, 2), 0, 0, 2, 2, dest), 0);
    }
}
