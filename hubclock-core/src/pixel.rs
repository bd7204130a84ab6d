//! Pixel write interface
//!
//! The only path that mutates the draw plane. Called thousands of times per
//! frame, so it performs no clipping: coordinates must already be inside
//! the panel.

use crate::color::Color;
use crate::framebuffer::FrameBuffer;

/// Write access to the draw plane with the panel's coordinate transform
pub struct PixelWriter<'a, const W: usize, const H: usize> {
    buffer: &'a mut FrameBuffer<W, H>,
    flip_y: bool,
}

impl<'a, const W: usize, const H: usize> PixelWriter<'a, W, H> {
    pub(crate) fn new(buffer: &'a mut FrameBuffer<W, H>, flip_y: bool) -> Self {
        Self { buffer, flip_y }
    }

    /// Panel width in pixels
    pub const fn width(&self) -> usize {
        W
    }

    /// Panel height in pixels
    pub const fn height(&self) -> usize {
        H
    }

    /// Store a color at logical coordinates `(x, y)`
    ///
    /// Requires `x < W` and `y < H`; out-of-range writes panic.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        debug_assert!(x < W && y < H, "pixel write outside the panel");
        let y = if self.flip_y { H - y - 1 } else { y };
        self.buffer.store(x, y, color.code());
    }

    /// Fill the whole draw plane
    pub fn fill(&mut self, color: Color) {
        self.buffer.fill(color);
    }

    /// Read back a logical pixel from the draw plane
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Color {
        let y = if self.flip_y { H - y - 1 } else { y };
        self.buffer.get(x, y)
    }
}
