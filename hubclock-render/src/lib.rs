//! Drawing on top of the display engine
//!
//! Everything here writes through [`hubclock_core::PixelWriter`], so the
//! panel's coordinate transform and color quantization always apply:
//!
//! - `embedded-graphics` draw target with clipping and mirroring
//! - Time-of-day breakdown of the millisecond clock
//! - Analog clock faces (12 and 24 hour)
//! - Test patterns and boot splash
//! - Console command set and demo state machine

#![no_std]
#![deny(unsafe_code)]

pub mod canvas;
pub mod clock;
pub mod demo;
pub mod pattern;
pub mod time;

pub use canvas::{Canvas, PixelSink};
pub use clock::{draw_clock, ClockFace};
pub use demo::{Command, CommandParser, DemoState, Reply, Screen, HELP};
pub use time::TimeOfDay;
