//! Frame planes and double-buffer arbitration
//!
//! Two equally sized planes live for the lifetime of the engine. One is the
//! draw plane (written by application code), the other the display plane
//! (read by the scan driver). Roles are exchanged by flipping an index,
//! never by copying pixels, and only at the start of a scan cycle.

use crate::color::{Color, COLOR_MASK};

/// One plane of color codes, one byte per pixel
#[derive(Clone, PartialEq, Eq)]
pub struct FrameBuffer<const W: usize, const H: usize> {
    rows: [[u8; W]; H],
}

impl<const W: usize, const H: usize> Default for FrameBuffer<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> core::fmt::Debug for FrameBuffer<W, H> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FrameBuffer")
            .field("width", &W)
            .field("height", &H)
            .finish()
    }
}

impl<const W: usize, const H: usize> FrameBuffer<W, H> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = H;

    /// Create a black plane
    pub const fn new() -> Self {
        Self { rows: [[0; W]; H] }
    }

    /// Color at a buffer position
    ///
    /// Panics if the position is outside the plane.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Color {
        Color::new(self.rows[y][x])
    }

    /// Raw codes of one buffer row
    #[inline]
    pub fn row(&self, y: usize) -> &[u8; W] {
        &self.rows[y]
    }

    /// Set every pixel to `color`
    pub fn fill(&mut self, color: Color) {
        for row in self.rows.iter_mut() {
            row.fill(color.code());
        }
    }

    /// Set every pixel to black
    pub fn clear(&mut self) {
        self.fill(Color::BLACK);
    }

    #[inline]
    pub(crate) fn store(&mut self, x: usize, y: usize, code: u8) {
        self.rows[y][x] = code & COLOR_MASK;
    }
}

/// Draw/display plane pair with a single pending-swap flag
///
/// The application side only ever sees the draw plane; the scan side only
/// ever reads the display plane. `apply_pending_swap` is the single point
/// where the roles change.
#[derive(Debug, Clone)]
pub struct FramePair<const W: usize, const H: usize> {
    planes: [FrameBuffer<W, H>; 2],
    /// Index of the plane currently owned by the application
    draw: usize,
    swap_pending: bool,
}

impl<const W: usize, const H: usize> Default for FramePair<W, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const W: usize, const H: usize> FramePair<W, H> {
    /// Create a pair of black planes with no swap pending
    pub const fn new() -> Self {
        Self {
            planes: [FrameBuffer::new(), FrameBuffer::new()],
            draw: 0,
            swap_pending: false,
        }
    }

    /// Mark the draw plane as a complete frame
    ///
    /// Calling this again before the swap boundary has no further effect.
    #[inline]
    pub fn request_swap(&mut self) {
        self.swap_pending = true;
    }

    /// Whether a completed frame is waiting for the swap boundary
    #[inline]
    pub fn is_swap_pending(&self) -> bool {
        self.swap_pending
    }

    /// The plane application code draws into
    #[inline]
    pub fn current_draw_buffer(&self) -> &FrameBuffer<W, H> {
        &self.planes[self.draw]
    }

    /// The plane being scanned out
    #[inline]
    pub fn display_buffer(&self) -> &FrameBuffer<W, H> {
        &self.planes[self.draw ^ 1]
    }

    #[inline]
    pub(crate) fn draw_buffer_mut(&mut self) -> &mut FrameBuffer<W, H> {
        &mut self.planes[self.draw]
    }

    /// Exchange plane roles if a swap was requested
    ///
    /// Only the scan driver calls this, at scan index 0.
    pub(crate) fn apply_pending_swap(&mut self) -> bool {
        if !self.swap_pending {
            return false;
        }
        self.draw ^= 1;
        self.swap_pending = false;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_planes_are_black() {
        let pair: FramePair<8, 4> = FramePair::new();
        assert!(!pair.is_swap_pending());
        assert_eq!(pair.current_draw_buffer().get(3, 2), Color::BLACK);
        assert_eq!(pair.display_buffer().get(7, 3), Color::BLACK);
    }

    #[test]
    fn test_store_masks_color() {
        let mut fb: FrameBuffer<4, 4> = FrameBuffer::new();
        fb.store(1, 2, 0xFD);
        assert_eq!(fb.row(2)[1], 5);
        assert_eq!(fb.get(1, 2), Color::MAGENTA);
    }

    #[test]
    fn test_fill_and_clear() {
        let mut fb: FrameBuffer<4, 2> = FrameBuffer::new();
        fb.fill(Color::CYAN);
        assert!(fb.row(0).iter().chain(fb.row(1).iter()).all(|&c| c == 3));
        fb.clear();
        assert!(fb.row(1).iter().all(|&c| c == 0));
    }

    #[test]
    fn test_swap_exchanges_roles() {
        let mut pair: FramePair<4, 4> = FramePair::new();
        pair.draw_buffer_mut().store(0, 0, 6);

        // Nothing happens without a request
        assert!(!pair.apply_pending_swap());
        assert_eq!(pair.display_buffer().get(0, 0), Color::BLACK);

        pair.request_swap();
        assert!(pair.apply_pending_swap());
        assert!(!pair.is_swap_pending());
        assert_eq!(pair.display_buffer().get(0, 0), Color::YELLOW);
        // The old display plane is now the draw plane
        assert_eq!(pair.current_draw_buffer().get(0, 0), Color::BLACK);
    }

    #[test]
    fn test_repeated_requests_coalesce() {
        let mut pair: FramePair<4, 4> = FramePair::new();
        pair.request_swap();
        pair.request_swap();
        pair.request_swap();

        assert!(pair.apply_pending_swap());
        assert!(!pair.apply_pending_swap());
    }
}
