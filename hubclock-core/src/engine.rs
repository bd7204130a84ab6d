//! Display engine
//!
//! Owns everything the refresh path and the drawing path share: the frame
//! pair, the scan state and the topology. The refresh side calls
//! [`DisplayEngine::scan_step`]; the drawing side uses [`DisplayEngine::pixels`]
//! and [`DisplayEngine::request_swap`]. Both take the engine by exclusive
//! reference, so whoever holds it (a critical-section mutex on hardware, a
//! plain local in tests) decides who runs.

use crate::color::Color;
use crate::framebuffer::{FrameBuffer, FramePair};
use crate::pixel::PixelWriter;
use crate::scan::{RowScanDriver, ScanStep};
use crate::topology::{PanelTopology, TopologyError};
use crate::traits::PanelBus;

/// A row-multiplexed panel with double-buffered frames
#[derive(Debug, Clone)]
pub struct DisplayEngine<const W: usize, const H: usize> {
    frames: FramePair<W, H>,
    scan: RowScanDriver,
    topology: PanelTopology,
}

impl<const W: usize, const H: usize> DisplayEngine<W, H> {
    pub const WIDTH: usize = W;
    pub const HEIGHT: usize = H;

    /// Create an engine with two black planes
    pub fn new(topology: PanelTopology) -> Result<Self, TopologyError> {
        topology.validate::<W, H>()?;
        Ok(Self {
            frames: FramePair::new(),
            scan: RowScanDriver::new(topology, W, H),
            topology,
        })
    }

    /// Check that `bus` can address every scan step
    pub fn check_bus<B: PanelBus>(&self, bus: &B) -> Result<(), TopologyError> {
        if bus.address_lines() < self.topology.address_bits(H) {
            return Err(TopologyError::NotEnoughAddressLines);
        }
        Ok(())
    }

    pub fn topology(&self) -> &PanelTopology {
        &self.topology
    }

    /// Scan steps in one full refresh
    pub fn rows_per_scan(&self) -> usize {
        self.scan.rows_per_scan()
    }

    /// Row address driven on the last scan step
    pub fn scan_index(&self) -> usize {
        self.scan.index()
    }

    /// Drive one scan step onto `bus`
    pub fn scan_step<B: PanelBus>(&mut self, bus: &mut B) -> ScanStep {
        self.scan.step(&mut self.frames, bus)
    }

    /// Write access to the draw plane
    pub fn pixels(&mut self) -> PixelWriter<'_, W, H> {
        PixelWriter::new(self.frames.draw_buffer_mut(), self.topology.flip_y())
    }

    /// Store one pixel in the draw plane
    ///
    /// Coordinates must be inside the panel.
    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        self.pixels().set_pixel(x, y, color);
    }

    /// Fill the draw plane
    pub fn clear(&mut self, color: Color) {
        self.frames.draw_buffer_mut().fill(color);
    }

    /// Mark the draw plane as a complete frame
    pub fn request_swap(&mut self) {
        self.frames.request_swap();
    }

    pub fn is_swap_pending(&self) -> bool {
        self.frames.is_swap_pending()
    }

    pub fn current_draw_buffer(&self) -> &FrameBuffer<W, H> {
        self.frames.current_draw_buffer()
    }

    pub fn display_buffer(&self) -> &FrameBuffer<W, H> {
        self.frames.display_buffer()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mock::{BusEvent, PanelSimulator};
    use crate::tick::TickScheduler;
    use proptest::prelude::*;
    use std::vec::Vec;

    type Panel64 = DisplayEngine<64, 64>;

    /// Run until the swap boundary has been crossed and one full cycle shown
    fn scan_full_cycle<const W: usize, const H: usize>(
        engine: &mut DisplayEngine<W, H>,
        bus: &mut PanelSimulator,
    ) {
        let rows = engine.rows_per_scan();
        while engine.is_swap_pending() {
            engine.scan_step(bus);
        }
        for _ in 0..rows {
            engine.scan_step(bus);
        }
    }

    fn checker(x: usize, y: usize) -> Color {
        if (x + y) % 2 == 0 {
            Color::WHITE
        } else {
            Color::RED
        }
    }

    #[test]
    fn test_rejects_panels_too_short_to_scan() {
        // Would leave the scan driver with zero steps per refresh
        assert_eq!(
            DisplayEngine::<4, 2>::new(PanelTopology::dual_scan()).err(),
            Some(TopologyError::UnevenHeight)
        );
        assert_eq!(
            DisplayEngine::<4, 0>::new(PanelTopology::single_scan()).err(),
            Some(TopologyError::UnevenHeight)
        );

        // Smallest dual-scan panel: one step per refresh, always at index 0
        let topo = PanelTopology::dual_scan();
        let mut engine: DisplayEngine<4, 4> = DisplayEngine::new(topo).unwrap();
        let mut bus = PanelSimulator::new(topo, 4, 4);
        assert_eq!(engine.rows_per_scan(), 1);
        engine.request_swap();
        let step = engine.scan_step(&mut bus);
        assert_eq!(step.index, 0);
        assert!(step.swapped);
    }

    #[test]
    fn test_new_validates_topology() {
        assert!(Panel64::new(PanelTopology::dual_scan()).is_ok());
        assert_eq!(
            DisplayEngine::<64, 30>::new(PanelTopology::dual_scan()).err(),
            Some(TopologyError::UnevenHeight)
        );
    }

    #[test]
    fn test_check_bus_address_lines() {
        let engine: DisplayEngine<64, 64> =
            DisplayEngine::new(PanelTopology::single_scan()).unwrap();

        let four = PanelSimulator::new(PanelTopology::single_scan(), 64, 64).with_address_lines(4);
        assert_eq!(
            engine.check_bus(&four),
            Err(TopologyError::NotEnoughAddressLines)
        );

        let five = PanelSimulator::new(PanelTopology::single_scan(), 64, 64);
        assert!(engine.check_bus(&five).is_ok());
    }

    #[test]
    fn test_checkerboard_dual_scan() {
        let topo = PanelTopology::dual_scan();
        let mut engine = Panel64::new(topo).unwrap();
        let mut bus = PanelSimulator::new(topo, 64, 64);

        // Top-left marker: a reversed or mirrored chain moves it
        let marked = |x: usize, y: usize| {
            if x < 8 && y < 4 {
                Color::YELLOW
            } else {
                checker(x, y)
            }
        };

        for y in 0..64 {
            for x in 0..64 {
                engine.set_pixel(x, y, marked(x, y));
            }
        }
        engine.request_swap();
        scan_full_cycle(&mut engine, &mut bus);

        for y in 0..64 {
            for x in 0..64 {
                assert_eq!(bus.led(x, y), marked(x, y), "led ({}, {})", x, y);
            }
        }
        assert_eq!(bus.led(63, 63), checker(63, 63));
        assert_eq!(bus.led(63, 0), checker(63, 0));
    }

    #[test]
    fn test_checkerboard_single_scan_is_flipped() {
        let topo = PanelTopology::single_scan();
        let mut engine = Panel64::new(topo).unwrap();
        let mut bus = PanelSimulator::new(topo, 64, 64);

        for y in 0..64 {
            for x in 0..64 {
                // Asymmetric pattern so the flip is observable
                let c = if y < 8 { Color::GREEN } else { checker(x, y) };
                engine.set_pixel(x, y, c);
            }
        }
        engine.request_swap();
        scan_full_cycle(&mut engine, &mut bus);

        for y in 0..64 {
            for x in 0..64 {
                let c = if y < 8 { Color::GREEN } else { checker(x, y) };
                assert_eq!(bus.led(x, 63 - y), c, "logical ({}, {})", x, y);
            }
        }
    }

    #[test]
    fn test_origin_dual_scan_is_top_left() {
        let topo = PanelTopology::dual_scan();
        let mut engine = Panel64::new(topo).unwrap();
        let mut bus = PanelSimulator::new(topo, 64, 64);

        engine.set_pixel(0, 0, Color::CYAN);
        engine.request_swap();
        scan_full_cycle(&mut engine, &mut bus);

        assert_eq!(bus.led(0, 0), Color::CYAN);
        let lit = bus.leds.iter().filter(|&&c| c != Color::BLACK).count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn test_origin_single_scan_is_bottom_left() {
        let topo = PanelTopology::single_scan();
        let mut engine = Panel64::new(topo).unwrap();
        let mut bus = PanelSimulator::new(topo, 64, 64);

        engine.set_pixel(0, 0, Color::CYAN);
        engine.request_swap();
        scan_full_cycle(&mut engine, &mut bus);

        assert_eq!(bus.led(0, 63), Color::CYAN);
        let lit = bus.leds.iter().filter(|&&c| c != Color::BLACK).count();
        assert_eq!(lit, 1);
    }

    #[test]
    fn test_dual_scan_solid_fill_cycle() {
        let topo = PanelTopology::dual_scan();
        let mut engine = Panel64::new(topo).unwrap();
        let mut bus = PanelSimulator::new(topo, 64, 64);

        engine.clear(Color::MAGENTA);
        engine.request_swap();
        while engine.is_swap_pending() {
            engine.scan_step(&mut bus);
        }
        bus.events.clear();

        assert_eq!(engine.rows_per_scan(), 16);
        for _ in 0..16 {
            let before = bus.events.len();
            engine.scan_step(&mut bus);

            let step = &bus.events[before..];
            let shifts: Vec<_> = step
                .iter()
                .filter_map(|e| match e {
                    BusEvent::Shift(u, l) => Some((*u, *l)),
                    _ => None,
                })
                .collect();
            // Two chains per shift pulse, two modules of 64 columns
            assert_eq!(shifts.len() * 2, 256);
            assert!(shifts
                .iter()
                .all(|&(u, l)| u.code() == 5 && l.code() == 5));
        }
        assert_eq!(bus.shift_count(), 16 * 128);
    }

    #[test]
    fn test_disabled_refresh_freezes_panel() {
        let topo = PanelTopology::dual_scan();
        let mut engine = Panel64::new(topo).unwrap();
        let mut bus = PanelSimulator::new(topo, 64, 64);

        let mut sched = TickScheduler::new();
        sched.register_periodic(
            || {
                engine.scan_step(&mut bus);
            },
            0,
        );
        let fired = (0..500).filter(|_| sched.on_tick()).count();
        drop(sched);

        assert_eq!(fired, 0);
        assert!(bus.events.is_empty());
        assert_eq!(engine.scan_index(), 0);
    }

    #[test]
    fn test_stopping_refresh_leaves_last_rows_lit() {
        let topo = PanelTopology::dual_scan();
        let mut engine = Panel64::new(topo).unwrap();
        let mut bus = PanelSimulator::new(topo, 64, 64);
        engine.clear(Color::GREEN);
        engine.request_swap();

        let mut sched = TickScheduler::new();
        sched.register_periodic(
            || {
                engine.scan_step(&mut bus);
            },
            1,
        );
        for _ in 0..20 {
            sched.on_tick();
        }
        sched.set_interval(0);
        for _ in 0..100 {
            assert!(!sched.on_tick());
        }
        drop(sched);

        // 20 steps, nothing after the interval dropped to 0
        assert_eq!(bus.selected_rows().len(), 20);
        assert_eq!(bus.events.last(), Some(&BusEvent::Unblank));
        assert!(!bus.is_blanked());
        assert_eq!(engine.scan_index(), 20 % 16);
    }

    #[test]
    fn test_scheduled_refresh_cadence() {
        let topo = PanelTopology::dual_scan();
        let mut engine = Panel64::new(topo).unwrap();
        let mut bus = PanelSimulator::new(topo, 64, 64);

        let mut sched = TickScheduler::new();
        sched.register_periodic(
            || {
                engine.scan_step(&mut bus);
            },
            4,
        );
        for _ in 0..64 {
            sched.on_tick();
        }
        drop(sched);

        assert_eq!(bus.selected_rows().len(), 16);
        assert_eq!(engine.scan_index(), 0);
    }

    proptest! {
        #[test]
        fn prop_scan_index_periodic(single in any::<bool>(), cycles in 1usize..4) {
            let topo = if single {
                PanelTopology::single_scan()
            } else {
                PanelTopology::dual_scan()
            };
            let mut engine = Panel64::new(topo).unwrap();
            let mut bus = PanelSimulator::new(topo, 64, 64);
            let rows = engine.rows_per_scan();
            prop_assert_eq!(rows, if single { 32 } else { 16 });

            for _ in 0..(cycles * rows) {
                engine.scan_step(&mut bus);
            }
            let seen = bus.selected_rows();
            for period in seen.chunks(rows) {
                let mut sorted: Vec<u8> = period.to_vec();
                sorted.sort_unstable();
                let expected: Vec<u8> = (0..rows as u8).collect();
                prop_assert_eq!(sorted, expected);
            }
            // Each period is the same sequence
            prop_assert!(seen.chunks(rows).all(|p| p == &seen[..rows]));
        }

        #[test]
        fn prop_repeated_swap_requests_coalesce(requests in 1usize..10) {
            let topo = PanelTopology::dual_scan();
            let mut engine: DisplayEngine<8, 16> = DisplayEngine::new(topo).unwrap();
            let mut bus = PanelSimulator::new(topo, 8, 16);

            for _ in 0..requests {
                engine.request_swap();
            }
            let mut swaps = 0;
            for _ in 0..(3 * engine.rows_per_scan()) {
                if engine.scan_step(&mut bus).swapped {
                    swaps += 1;
                }
            }
            prop_assert_eq!(swaps, 1);
        }

        #[test]
        fn prop_scanned_frame_is_last_requested(
            frames in proptest::collection::vec(
                proptest::collection::vec((0usize..8, 0usize..16, 0u8..8), 0..24),
                1..5,
            ),
            gaps in proptest::collection::vec(0usize..6, 5),
        ) {
            let topo = PanelTopology::dual_scan();
            let mut engine: DisplayEngine<8, 16> = DisplayEngine::new(topo).unwrap();
            let mut bus = PanelSimulator::new(topo, 8, 16);
            // Snapshot of the draw plane at each request_swap
            let mut requested: Option<FrameBuffer<8, 16>> = None;

            for (writes, gap) in frames.iter().zip(gaps.iter()) {
                // Only draw into a plane that is off-scan
                while engine.is_swap_pending() {
                    let step = engine.scan_step(&mut bus);
                    if step.swapped {
                        prop_assert_eq!(Some(engine.display_buffer()), requested.as_ref());
                    }
                }
                for &(x, y, c) in writes {
                    engine.set_pixel(x, y, Color::new(c));
                }
                engine.request_swap();
                requested = Some(engine.current_draw_buffer().clone());

                for _ in 0..*gap {
                    let step = engine.scan_step(&mut bus);
                    if step.swapped {
                        prop_assert_eq!(Some(engine.display_buffer()), requested.as_ref());
                    }
                }
            }

            scan_full_cycle(&mut engine, &mut bus);
            let expected = requested.unwrap();
            prop_assert_eq!(engine.display_buffer(), &expected);
            for y in 0..16 {
                for x in 0..8 {
                    prop_assert_eq!(bus.led(x, y), expected.get(x, y));
                }
            }
        }
    }
}
