//! Test doubles for the panel bus
//!
//! `PanelSimulator` models the shift-register chains of a real panel so
//! tests can compare what would light up against what was drawn.

use std::vec;
use std::vec::Vec;

use crate::color::Color;
use crate::topology::{ModuleOrientation, PanelTopology};
use crate::traits::PanelBus;

/// One recorded bus operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusEvent {
    Blank,
    Unblank,
    SelectRow(u8),
    BeginShift,
    Shift(Color, Color),
    Latch,
}

/// Simulated panel: two shift chains feeding latched LED rows
///
/// The chain position nearest the far end maps to driver column 0 of the
/// first module. Inverted modules mirror both rows and columns.
pub struct PanelSimulator {
    topology: PanelTopology,
    width: usize,
    height: usize,
    address_lines: u8,
    /// Shift register contents, index 0 = most recently shifted
    upper_chain: Vec<Color>,
    lower_chain: Vec<Color>,
    address: u8,
    blanked: bool,
    /// Physical LED state in panel coordinates (row-major)
    pub leds: Vec<Color>,
    pub events: Vec<BusEvent>,
}

impl PanelSimulator {
    pub fn new(topology: PanelTopology, width: usize, height: usize) -> Self {
        let chain_len = width * topology.module_count();
        Self {
            topology,
            width,
            height,
            address_lines: topology.address_bits(height),
            upper_chain: vec![Color::BLACK; chain_len],
            lower_chain: vec![Color::BLACK; chain_len],
            address: 0,
            blanked: false,
            leds: vec![Color::BLACK; width * height],
            events: Vec::new(),
        }
    }

    pub fn with_address_lines(mut self, lines: u8) -> Self {
        self.address_lines = lines;
        self
    }

    /// LED color at physical panel position (column, row from top)
    pub fn led(&self, x: usize, y: usize) -> Color {
        self.leds[y * self.width + x]
    }

    pub fn is_blanked(&self) -> bool {
        self.blanked
    }

    pub fn shift_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, BusEvent::Shift(..)))
            .count()
    }

    pub fn selected_rows(&self) -> Vec<u8> {
        self.events
            .iter()
            .filter_map(|e| match e {
                BusEvent::SelectRow(r) => Some(*r),
                _ => None,
            })
            .collect()
    }

    fn latch_rows(&mut self) {
        let modules = self.topology.module_count();
        let module_height = self.height / modules;
        let half = module_height / 2;
        let chain_len = self.width * modules;
        let a = self.address as usize;

        for pos in 0..chain_len {
            // Distance from the far end of the chain
            let far = chain_len - 1 - pos;
            let module = far / self.width;
            let driver_col = far % self.width;
            let base = module * module_height;

            let (col, upper_row, lower_row) = match self.topology.orientation(module) {
                ModuleOrientation::Upright => (driver_col, base + a, base + half + a),
                ModuleOrientation::Inverted => (
                    self.width - 1 - driver_col,
                    base + module_height - 1 - a,
                    base + half - 1 - a,
                ),
            };

            self.leds[upper_row * self.width + col] = self.upper_chain[pos];
            self.leds[lower_row * self.width + col] = self.lower_chain[pos];
        }
    }
}

impl PanelBus for PanelSimulator {
    fn blank(&mut self) {
        self.blanked = true;
        self.events.push(BusEvent::Blank);
    }

    fn unblank(&mut self) {
        self.blanked = false;
        self.events.push(BusEvent::Unblank);
    }

    fn select_row(&mut self, address: u8) {
        self.address = address;
        self.events.push(BusEvent::SelectRow(address));
    }

    fn begin_shift(&mut self) {
        self.events.push(BusEvent::BeginShift);
    }

    fn shift(&mut self, upper: Color, lower: Color) {
        assert!(self.blanked, "shifting while the panel is lit");
        self.upper_chain.rotate_right(1);
        self.upper_chain[0] = upper;
        self.lower_chain.rotate_right(1);
        self.lower_chain[0] = lower;
        self.events.push(BusEvent::Shift(upper, lower));
    }

    fn latch(&mut self) {
        self.latch_rows();
        self.events.push(BusEvent::Latch);
    }

    fn address_lines(&self) -> u8 {
        self.address_lines
    }
}
