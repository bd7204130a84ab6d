//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in hubclock-core:
//!
//! - Bit-banged HUB75-style panel bus over `embedded-hal` output pins

#![no_std]
#![deny(unsafe_code)]

pub mod panel;

pub use panel::{AddressPins, ChainPins, GpioPanelBus};
