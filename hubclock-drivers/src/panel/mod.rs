//! Panel bus drivers

pub mod gpio;

pub use gpio::{AddressPins, ChainPins, GpioPanelBus};
