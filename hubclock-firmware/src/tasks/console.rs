//! Serial console tasks
//!
//! RX turns console bytes into demo commands, TX prints the replies.
//! Refresh interval changes are applied here rather than in the
//! application task, which may be parked waiting for a swap that a
//! stopped refresh will never complete.

use core::fmt::Write as _;

use defmt::*;
use embassy_stm32::mode::Async;
use embassy_stm32::usart::{UartRx, UartTx};
use embassy_time::{Duration, Timer};
use embedded_io_async::Write;
use heapless::String;
use portable_atomic::Ordering;

use hubclock_render::{Command, CommandParser, Reply, HELP};

use crate::channels::{COMMAND_CHANNEL, REFRESH_INTERVAL, REPLY_CHANNEL};

/// Console RX task - parses commands from the serial console
#[embassy_executor::task]
pub async fn console_rx_task(mut rx: UartRx<'static, Async>) {
    info!("Console RX task started");

    let mut parser = CommandParser::new();
    let mut buf = [0u8; 1];

    loop {
        match rx.read(&mut buf).await {
            Ok(()) => {
                if let Some(command) = parser.feed(buf[0]) {
                    handle_command(command).await;
                }
            }
            Err(e) => {
                warn!("Console read error: {:?}", e);
                Timer::after(Duration::from_millis(10)).await;
            }
        }
    }
}

async fn handle_command(command: Command) {
    debug!("Command: {:?}", command);
    match command {
        Command::SetRefresh(interval) => {
            REFRESH_INTERVAL.store(interval, Ordering::Relaxed);
            REPLY_CHANNEL.send(Reply::Refresh(interval)).await;
        }
        other => {
            if COMMAND_CHANNEL.try_send(other).is_err() {
                warn!("Command channel full, dropping command");
            }
        }
    }
}

/// Console TX task - prints replies
#[embassy_executor::task]
pub async fn console_tx_task(mut tx: UartTx<'static, Async>) {
    info!("Console TX task started");

    write_lines(&mut tx, "hubclock ready, press ? for help").await;

    loop {
        let reply = REPLY_CHANNEL.receive().await;
        let mut line: String<48> = String::new();

        let _ = match reply {
            Reply::None => continue,
            Reply::Help => {
                write_lines(&mut tx, HELP).await;
                continue;
            }
            Reply::Color(color) => write!(line, "color {}", color.code()),
            Reply::FastMode(on) => write!(line, "fast mode {}", on_off(on)),
            Reply::Clock24h(on) => write!(line, "24 hour face {}", on_off(on)),
            Reply::Mirrored(on) => write!(line, "mirror {}", on_off(on)),
            Reply::Refresh(0) => write!(line, "refresh off"),
            Reply::Refresh(interval) => write!(line, "refresh every {} ticks", interval),
            Reply::Time(now) => write!(line, "{}", now.stamp(false)),
        };
        write_lines(&mut tx, &line).await;
    }
}

fn on_off(on: bool) -> &'static str {
    if on {
        "on"
    } else {
        "off"
    }
}

/// Write `text` with CRLF line endings
async fn write_lines<W: Write>(tx: &mut W, text: &str) {
    for line in text.lines() {
        if tx.write_all(line.as_bytes()).await.is_err() || tx.write_all(b"\r\n").await.is_err() {
            warn!("Console write failed");
            return;
        }
    }
}
