//! GPIO panel bus
//!
//! Bit-bangs the panel connector from plain push-pull outputs:
//!
//! - Two RGB data chains (R1/G1/B1 upper, R2/G2/B2 lower)
//! - Shared shift clock, latched on the rising edge
//! - Latch (LAT), transparent while high
//! - Output enable (OE), active low
//! - Up to five row-address lines (A-E)
//!
//! Pin errors are ignored: a glitched row is redrawn on the next scan.

use embedded_hal::digital::OutputPin;
use heapless::Vec;

use hubclock_core::topology::MAX_ADDRESS_BITS;
use hubclock_core::{Color, PanelBus};

/// Row-address pins, line A first
pub type AddressPins<P> = Vec<P, { MAX_ADDRESS_BITS as usize }>;

/// Data lines of one chain
pub struct ChainPins<P> {
    pub r: P,
    pub g: P,
    pub b: P,
}

impl<P: OutputPin> ChainPins<P> {
    pub fn new(r: P, g: P, b: P) -> Self {
        Self { r, g, b }
    }

    #[inline]
    fn present(&mut self, color: Color) {
        set_level(&mut self.r, color.red());
        set_level(&mut self.g, color.green());
        set_level(&mut self.b, color.blue());
    }
}

/// Panel bus driven from GPIO outputs
pub struct GpioPanelBus<P> {
    upper: ChainPins<P>,
    lower: ChainPins<P>,
    clk: P,
    lat: P,
    /// High = LEDs off
    oe: P,
    address: AddressPins<P>,
}

impl<P: OutputPin> GpioPanelBus<P> {
    /// Create a bus, leaving the panel blanked with clock and latch low
    pub fn new(
        upper: ChainPins<P>,
        lower: ChainPins<P>,
        clk: P,
        lat: P,
        oe: P,
        address: AddressPins<P>,
    ) -> Self {
        let mut bus = Self {
            upper,
            lower,
            clk,
            lat,
            oe,
            address,
        };
        bus.oe.set_high().ok();
        bus.clk.set_low().ok();
        bus.lat.set_low().ok();
        bus
    }

    /// Give the pins back
    pub fn release(self) -> (ChainPins<P>, ChainPins<P>, P, P, P, AddressPins<P>) {
        (self.upper, self.lower, self.clk, self.lat, self.oe, self.address)
    }
}

#[inline]
fn set_level<P: OutputPin>(pin: &mut P, high: bool) {
    if high {
        pin.set_high().ok();
    } else {
        pin.set_low().ok();
    }
}

impl<P: OutputPin> PanelBus for GpioPanelBus<P> {
    fn blank(&mut self) {
        self.oe.set_high().ok();
    }

    fn unblank(&mut self) {
        self.oe.set_low().ok();
    }

    fn select_row(&mut self, address: u8) {
        for (bit, pin) in self.address.iter_mut().enumerate() {
            set_level(pin, address & (1 << bit) != 0);
        }
    }

    fn begin_shift(&mut self) {
        self.lat.set_low().ok();
    }

    #[inline]
    fn shift(&mut self, upper: Color, lower: Color) {
        self.upper.present(upper);
        self.lower.present(lower);
        self.clk.set_high().ok();
        self.clk.set_low().ok();
    }

    fn latch(&mut self) {
        self.lat.set_high().ok();
        self.lat.set_low().ok();
    }

    fn address_lines(&self) -> u8 {
        self.address.len() as u8
    }
}
