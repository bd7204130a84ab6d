//! Board-agnostic core of the LED matrix display engine
//!
//! This crate contains all panel logic that does not depend on a specific
//! microcontroller:
//!
//! - 3-bit color codes
//! - Double-buffered frame planes with tear-free swap arbitration
//! - Pixel write interface (coordinate transform + quantization)
//! - Panel topology (single/dual scan, module orientation)
//! - Row scan driver (bit-serial shift protocol)
//! - Tick scheduler for the periodic refresh callback
//! - Panel configuration types and parser

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod color;
pub mod config;
pub mod engine;
pub mod framebuffer;
pub mod pixel;
pub mod scan;
pub mod tick;
pub mod topology;
pub mod traits;

#[cfg(test)]
pub(crate) mod mock;

pub use color::Color;
pub use config::{parse_config, PanelConfig, ParseError};
pub use engine::DisplayEngine;
pub use framebuffer::{FrameBuffer, FramePair};
pub use pixel::PixelWriter;
pub use scan::{RowScanDriver, ScanStep};
pub use tick::{TickHook, TickScheduler};
pub use topology::{ChainOrder, ModuleOrientation, PanelTopology, ScanMode, TopologyError};
pub use traits::PanelBus;
