//! Inter-task communication channels
//!
//! Static channels and signals shared by the Embassy tasks. The refresh
//! task runs on the interrupt executor, so everything here uses
//! critical-section based primitives.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_sync::signal::Signal;
use portable_atomic::AtomicU32;

use hubclock_render::{Command, Reply};

/// Channel capacity for console commands
const COMMAND_CHANNEL_SIZE: usize = 8;

/// Channel capacity for console replies
const REPLY_CHANNEL_SIZE: usize = 8;

/// Parsed console commands for the application task
pub static COMMAND_CHANNEL: Channel<CriticalSectionRawMutex, Command, COMMAND_CHANNEL_SIZE> =
    Channel::new();

/// Replies to print on the console
pub static REPLY_CHANNEL: Channel<CriticalSectionRawMutex, Reply, REPLY_CHANNEL_SIZE> =
    Channel::new();

/// Signal that the refresh path exchanged the frame planes
pub static FRAME_SWAPPED: Signal<CriticalSectionRawMutex, ()> = Signal::new();

/// Requested refresh interval in ticks (0 = refresh off)
///
/// Written by the console, picked up by the refresh task on its next tick.
pub static REFRESH_INTERVAL: AtomicU32 = AtomicU32::new(1);
