//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels/signals.

pub mod app;
pub mod console;
pub mod refresh;

pub use app::app_task;
pub use console::{console_rx_task, console_tx_task};
pub use refresh::{refresh_task, RefreshHook};
