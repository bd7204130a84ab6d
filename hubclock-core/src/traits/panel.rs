//! Panel electrical interface

use crate::color::Color;

/// Digital outputs of a row-multiplexed panel connector
///
/// Implementations drive the row-address bus, the two RGB data chains,
/// the shared shift clock, the latch and the output-disable line. All
/// operations are infallible: a refresh that glitches is corrected by the
/// next tick, so there is nothing useful to report.
pub trait PanelBus {
    /// Assert output-disable so no LEDs are lit
    fn blank(&mut self);

    /// De-assert output-disable, lighting the latched row
    fn unblank(&mut self);

    /// Drive the row-address lines with `address` (LSB on line A)
    fn select_row(&mut self, address: u8);

    /// Hold the latch closed while new data is shifted in
    fn begin_shift(&mut self);

    /// Present one pixel per chain and pulse the shift clock once
    fn shift(&mut self, upper: Color, lower: Color);

    /// Pulse the latch, copying the shift registers to the LED drivers
    fn latch(&mut self);

    /// Number of row-address lines wired to the panel
    fn address_lines(&self) -> u8;
}
