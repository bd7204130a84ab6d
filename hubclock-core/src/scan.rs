//! Row scan driver
//!
//! Drives one scan step per invocation. A step lights two rows per module:
//! one on the upper data chain and one on the lower. With persistence of
//! vision, cycling through every step fast enough reads as a steady image.
//!
//! Each step runs a fixed number of bus operations (no allocation, no
//! waiting), so it is safe to call from an interrupt-priority context.

use crate::color::Color;
use crate::framebuffer::FramePair;
use crate::topology::PanelTopology;
use crate::traits::PanelBus;

/// Outcome of one scan step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanStep {
    /// Row address that was driven
    pub index: usize,
    /// Whether the draw and display planes were exchanged on this step
    pub swapped: bool,
}

/// Row-select state machine and shift protocol
#[derive(Debug, Clone)]
pub struct RowScanDriver {
    topology: PanelTopology,
    height: usize,
    width: usize,
    rows_per_scan: usize,
    /// Row address driven on the last step
    index: usize,
}

impl RowScanDriver {
    /// Create a driver for a `width` x `height` buffer
    ///
    /// The first step addresses row 1; the swap boundary is reached after
    /// `rows_per_scan - 1` steps. The topology must already be validated
    /// for these dimensions, which `DisplayEngine::new` does.
    pub(crate) const fn new(topology: PanelTopology, width: usize, height: usize) -> Self {
        Self {
            topology,
            height,
            width,
            rows_per_scan: topology.rows_per_scan(height),
            index: 0,
        }
    }

    /// Scan steps in one full refresh
    pub const fn rows_per_scan(&self) -> usize {
        self.rows_per_scan
    }

    /// Row address driven on the last step
    pub const fn index(&self) -> usize {
        self.index
    }

    pub const fn topology(&self) -> &PanelTopology {
        &self.topology
    }

    /// Drive the next scan step
    ///
    /// A pending swap is applied only when the index wraps to 0, so every
    /// refresh cycle reads from a single plane.
    pub fn step<B, const W: usize, const H: usize>(
        &mut self,
        frames: &mut FramePair<W, H>,
        bus: &mut B,
    ) -> ScanStep
    where
        B: PanelBus,
    {
        debug_assert!(W == self.width && H == self.height);

        bus.blank();

        self.index = (self.index + 1) % self.rows_per_scan;
        let swapped = self.index == 0 && frames.apply_pending_swap();

        // Address range is checked against the bus before scanning starts
        bus.select_row(self.index as u8);

        bus.begin_shift();
        let display = frames.display_buffer();
        for module in 0..self.topology.module_count() {
            let seg = self.topology.segment(H, module, self.index);
            let upper = display.row(seg.upper_row);
            let lower = display.row(seg.lower_row);
            for n in 0..W {
                let col = seg.order.column(n, W);
                bus.shift(Color::new(upper[col]), Color::new(lower[col]));
            }
        }
        bus.latch();

        bus.unblank();

        ScanStep {
            index: self.index,
            swapped,
        }
    }
}
