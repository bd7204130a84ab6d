//! Configuration type definitions

use crate::color::Color;
use crate::topology::{PanelTopology, ScanMode};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default tick source frequency (Hz)
pub const DEFAULT_TICK_HZ: u32 = 4000;

/// Fastest tick source the refresh path is specified for
pub const MAX_TICK_HZ: u32 = 20_000;

/// Panel and refresh configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PanelConfig {
    /// Scan mode of the attached panel
    pub scan: ScanMode,
    /// Override of the y-axis inversion (None = topology default)
    pub flip_y: Option<bool>,
    /// Tick source frequency in Hz
    pub tick_hz: u32,
    /// Ticks between scan steps (0 = refresh disabled)
    pub refresh_interval_ticks: u32,
    /// Initial foreground color of the demo
    pub color: Color,
    /// Start with the 24-hour clock face
    pub clock_24h: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            scan: ScanMode::Dual,
            flip_y: None,
            tick_hz: DEFAULT_TICK_HZ,
            refresh_interval_ticks: 1,
            color: Color::CYAN,
            clock_24h: false,
        }
    }
}

impl PanelConfig {
    /// Topology described by this configuration
    pub fn topology(&self) -> PanelTopology {
        let topology = PanelTopology::for_mode(self.scan);
        match self.flip_y {
            Some(flip) => topology.with_flip_y(flip),
            None => topology,
        }
    }

    /// Full-panel refresh rate in Hz for a panel `height` rows tall
    ///
    /// Returns 0 when refresh is disabled.
    pub fn refresh_hz(&self, height: usize) -> u32 {
        let steps = self.topology().rows_per_scan(height) as u32;
        if self.refresh_interval_ticks == 0 || steps == 0 {
            return 0;
        }
        self.tick_hz / self.refresh_interval_ticks.saturating_mul(steps)
    }
}
