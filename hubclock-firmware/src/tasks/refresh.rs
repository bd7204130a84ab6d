//! Panel refresh task
//!
//! Runs on the high-priority interrupt executor. A ticker at the configured
//! tick rate drives the tick scheduler, which fires one scan step every
//! `interval` ticks.

use defmt::*;
use embassy_time::{Duration, Ticker};
use portable_atomic::Ordering;

use hubclock_core::{TickHook, TickScheduler};

use crate::board::{PanelBusImpl, PanelPin};
use crate::channels::{FRAME_SWAPPED, REFRESH_INTERVAL};
use crate::engine::SharedEngine;

/// Tick hook that drives one scan step
pub struct RefreshHook {
    engine: SharedEngine,
    bus: PanelBusImpl,
    /// High while a step runs
    probe: PanelPin,
}

impl RefreshHook {
    pub fn new(engine: SharedEngine, bus: PanelBusImpl, probe: PanelPin) -> Self {
        Self { engine, bus, probe }
    }
}

impl TickHook for RefreshHook {
    fn fire(&mut self) {
        self.probe.set_high();
        let bus = &mut self.bus;
        let step = self.engine.with(|engine| engine.scan_step(bus));
        self.probe.set_low();

        if step.swapped {
            FRAME_SWAPPED.signal(());
        }
    }
}

/// Refresh task - one scheduler tick per ticker period
#[embassy_executor::task]
pub async fn refresh_task(hook: RefreshHook, tick_hz: u32, interval: u32) {
    info!("Refresh task started: {} Hz tick, step every {} ticks", tick_hz, interval);

    let mut scheduler = TickScheduler::new();
    scheduler.register_periodic(hook, interval);
    REFRESH_INTERVAL.store(interval, Ordering::Relaxed);

    let mut ticker = Ticker::every(Duration::from_hz(tick_hz as u64));

    loop {
        ticker.next().await;

        let wanted = REFRESH_INTERVAL.load(Ordering::Relaxed);
        if wanted != scheduler.interval() {
            debug!("Refresh interval {} -> {}", scheduler.interval(), wanted);
            // 0 freezes the panel on the last scanned rows
            scheduler.set_interval(wanted);
        }

        scheduler.on_tick();
    }
}
