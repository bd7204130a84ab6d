//! hubclock - RGB LED matrix clock firmware
//!
//! Drives a 64x64 row-multiplexed RGB panel from a 1Bitsy (STM32F415)
//! board and runs a small clock and test-pattern demo on it.
//!
//! Refresh runs on a high-priority interrupt executor; drawing and the
//! serial console run on the thread executor and never block it for more
//! than one drawing primitive.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::{InterruptExecutor, Spawner};
use embassy_stm32::interrupt;
use embassy_stm32::interrupt::{InterruptExt, Priority};
use embassy_sync::blocking_mutex::Mutex;
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

mod board;
mod channels;
mod config;
mod engine;
mod tasks;

use crate::board::{Board, PANEL_HEIGHT};
use crate::engine::{Engine, EngineMutex, SharedEngine};
use crate::tasks::RefreshHook;

/// Executor for the refresh task, preempts everything else
static EXECUTOR_HIGH: InterruptExecutor = InterruptExecutor::new();

/// Display engine (must live forever, shared with the refresh interrupt)
static ENGINE: StaticCell<EngineMutex> = StaticCell::new();

// UART4 is unused on this board; its vector runs the refresh executor
#[interrupt]
unsafe fn UART4() {
    EXECUTOR_HIGH.on_interrupt()
}

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("hubclock firmware starting...");

    let p = embassy_stm32::init(board::clock_config());
    info!("Peripherals initialized");

    let config = config::load();
    let board = unwrap!(Board::new(p));
    info!("Panel bus and console initialized");

    let engine = unwrap!(Engine::new(config.topology()));
    unwrap!(engine.check_bus(&board.bus));
    let engine = SharedEngine::new(ENGINE.init(Mutex::new(RefCell::new(engine))));
    info!(
        "Display engine ready: {} scan steps, {} Hz refresh",
        engine.with(|e| e.rows_per_scan()),
        config.refresh_hz(PANEL_HEIGHT)
    );

    let Board {
        bus,
        probe,
        console,
    } = board;
    let (tx, rx) = console.split();

    // Refresh preempts drawing and the console
    interrupt::UART4.set_priority(Priority::P6);
    let high_spawner = EXECUTOR_HIGH.start(interrupt::UART4);
    high_spawner.spawn(unwrap!(tasks::refresh_task(
        RefreshHook::new(engine, bus, probe),
        config.tick_hz,
        config.refresh_interval_ticks,
    )));

    spawner.spawn(unwrap!(tasks::console_rx_task(rx)));
    spawner.spawn(unwrap!(tasks::console_tx_task(tx)));
    spawner.spawn(unwrap!(tasks::app_task(engine, config)));

    info!("All tasks spawned, firmware running");
}
