//! Application task
//!
//! Owns the demo state. Each pass waits for the previous frame to reach
//! the display plane, applies console commands, then draws the next frame
//! if anything changed.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_time::{Duration, Instant, Ticker};

use hubclock_core::PanelConfig;
use hubclock_render::{DemoState, Reply};

use crate::channels::{COMMAND_CHANNEL, FRAME_SWAPPED, REPLY_CHANNEL};
use crate::engine::SharedEngine;

/// How often the clock checks for a new time to show
const FRAME_POLL_MS: u64 = 20;

/// Application task - console commands in, frames out
#[embassy_executor::task]
pub async fn app_task(engine: SharedEngine, config: PanelConfig) {
    info!("App task started");

    let mut demo = DemoState::new(config.color, config.clock_24h);
    let mut ticker = Ticker::every(Duration::from_millis(FRAME_POLL_MS));

    loop {
        // Drawing now would overwrite the frame still waiting to be shown
        while engine.is_swap_pending() {
            FRAME_SWAPPED.wait().await;
        }

        match select(COMMAND_CHANNEL.receive(), ticker.next()).await {
            Either::First(command) => {
                let reply = demo.apply(command, Instant::now().as_millis());
                if reply != Reply::None && REPLY_CHANNEL.try_send(reply).is_err() {
                    warn!("Reply channel full, dropping reply");
                }
            }
            Either::Second(()) => {}
        }

        let now = demo.now(Instant::now().as_millis());
        if demo.render(engine, &now) {
            trace!("Frame drawn: {:?}", demo.screen());
            engine.request_swap();
        }
    }
}
