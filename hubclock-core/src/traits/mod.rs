//! Hardware abstraction traits
//!
//! These traits define the interface between the display engine and
//! board-specific implementations.

pub mod panel;

pub use panel::PanelBus;
