//! Console-driven demo
//!
//! Single-byte commands arrive from the serial console. [`CommandParser`]
//! turns the byte stream into [`Command`]s, [`DemoState`] applies them and
//! renders frames on request.

use hubclock_core::Color;

use crate::canvas::{Canvas, PixelSink};
use crate::clock::{draw_clock, ClockFace};
use crate::pattern;
use crate::time::TimeOfDay;

/// Command summary printed for `?`
pub const HELP: &str = "\
Commands:
  <space>  fill with current color
  g / G    small / large grid
  c        next color
  C        analog clock
  2        toggle 24 hour face
  f        toggle fast (1/10 s) mode
  i        toggle mirror image
  t        print time
  T<hhmm[ss]>  set time of day
  r<n>     refresh every n ticks (0 = off)
  ?        this help
";

/// Demo command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Command {
    Solid,
    SmallGrid,
    LargeGrid,
    NextColor,
    Clock,
    Toggle24h,
    ToggleFast,
    ToggleMirror,
    ShowTime,
    SetRefresh(u32),
    /// Set the time of day, in seconds since midnight
    SetTime(u32),
    Help,
}

impl Command {
    /// Map a single console byte; `r` needs the parser
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b' ' => Some(Command::Solid),
            b'g' => Some(Command::SmallGrid),
            b'G' => Some(Command::LargeGrid),
            b'c' => Some(Command::NextColor),
            b'C' => Some(Command::Clock),
            b'2' => Some(Command::Toggle24h),
            b'f' => Some(Command::ToggleFast),
            b'i' => Some(Command::ToggleMirror),
            b't' => Some(Command::ShowTime),
            b'?' => Some(Command::Help),
            _ => None,
        }
    }
}

/// Byte stream to command parser
///
/// `r` and `T` start a decimal number terminated by CR or LF. Any other
/// byte while reading the number abandons it.
#[derive(Debug, Default)]
pub struct CommandParser {
    number: Option<Number>,
}

#[derive(Debug, Clone, Copy)]
enum NumberKind {
    Refresh,
    TimeOfDay,
}

#[derive(Debug, Clone, Copy)]
struct Number {
    kind: NumberKind,
    value: u32,
    digits: u8,
}

impl CommandParser {
    pub const fn new() -> Self {
        Self { number: None }
    }

    /// Whether digits for `r` or `T` are expected
    pub fn awaiting_number(&self) -> bool {
        self.number.is_some()
    }

    pub fn feed(&mut self, byte: u8) -> Option<Command> {
        if let Some(mut number) = self.number {
            return match byte {
                b'0'..=b'9' => {
                    let digit = (byte - b'0') as u32;
                    number.value = number.value.saturating_mul(10).saturating_add(digit);
                    number.digits = number.digits.saturating_add(1);
                    self.number = Some(number);
                    None
                }
                b'\r' | b'\n' => {
                    self.number = None;
                    match number.kind {
                        NumberKind::Refresh => Some(Command::SetRefresh(number.value)),
                        NumberKind::TimeOfDay => {
                            time_of_day(number.value, number.digits).map(Command::SetTime)
                        }
                    }
                }
                _ => {
                    self.number = None;
                    None
                }
            };
        }

        let kind = match byte {
            b'r' => NumberKind::Refresh,
            b'T' => NumberKind::TimeOfDay,
            _ => return Command::from_byte(byte),
        };
        self.number = Some(Number {
            kind,
            value: 0,
            digits: 0,
        });
        None
    }
}

/// Seconds since midnight from `hhmm` or `hhmmss` digits
fn time_of_day(value: u32, digits: u8) -> Option<u32> {
    let (hours, minutes, seconds) = match digits {
        4 => (value / 100, value % 100, 0),
        6 => (value / 10_000, (value / 100) % 100, value % 100),
        _ => return None,
    };
    if hours >= 24 || minutes >= 60 || seconds >= 60 {
        return None;
    }
    Some(hours * 3600 + minutes * 60 + seconds)
}

/// What the panel is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    Splash,
    Solid,
    SmallGrid,
    LargeGrid,
    Clock,
}

/// Feedback for the console after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Reply {
    None,
    Color(Color),
    FastMode(bool),
    Clock24h(bool),
    Mirrored(bool),
    /// Current wall-clock time
    Time(TimeOfDay),
    /// Change the refresh interval
    Refresh(u32),
    Help,
}

/// Demo state machine
#[derive(Debug)]
pub struct DemoState {
    screen: Screen,
    color: Color,
    clock_24h: bool,
    fast_mode: bool,
    mirrored: bool,
    /// A static screen is waiting to be drawn
    redraw: bool,
    /// Clock time shown in the last frame, in tenths of a second
    last_stamp: Option<u32>,
    /// Time of day, in seconds, when the uptime counter read zero
    epoch_s: u32,
}

impl DemoState {
    /// Start on the splash screen
    pub fn new(color: Color, clock_24h: bool) -> Self {
        Self {
            screen: Screen::Splash,
            color,
            clock_24h,
            fast_mode: false,
            mirrored: false,
            redraw: true,
            last_stamp: None,
            epoch_s: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn fast_mode(&self) -> bool {
        self.fast_mode
    }

    pub fn mirrored(&self) -> bool {
        self.mirrored
    }

    /// Wall-clock time at `uptime_ms`
    pub fn now(&self, uptime_ms: u64) -> TimeOfDay {
        TimeOfDay::wall_clock(uptime_ms, self.epoch_s)
    }

    fn show(&mut self, screen: Screen) {
        self.screen = screen;
        self.redraw = true;
        self.last_stamp = None;
    }

    /// Apply a console command received at `uptime_ms`
    pub fn apply(&mut self, command: Command, uptime_ms: u64) -> Reply {
        match command {
            Command::Solid => self.show(Screen::Solid),
            Command::SmallGrid => self.show(Screen::SmallGrid),
            Command::LargeGrid => self.show(Screen::LargeGrid),
            Command::Clock => self.show(Screen::Clock),
            Command::NextColor => {
                self.color = self.color.next_foreground();
                return Reply::Color(self.color);
            }
            Command::Toggle24h => {
                self.clock_24h = !self.clock_24h;
                self.last_stamp = None;
                return Reply::Clock24h(self.clock_24h);
            }
            Command::ToggleFast => {
                self.fast_mode = !self.fast_mode;
                self.last_stamp = None;
                return Reply::FastMode(self.fast_mode);
            }
            Command::ToggleMirror => {
                self.mirrored = !self.mirrored;
                self.show(self.screen);
                return Reply::Mirrored(self.mirrored);
            }
            Command::SetTime(seconds) => {
                self.epoch_s = TimeOfDay::epoch_for(seconds, uptime_ms);
                self.last_stamp = None;
                return Reply::Time(self.now(uptime_ms));
            }
            Command::ShowTime => return Reply::Time(self.now(uptime_ms)),
            Command::SetRefresh(interval) => return Reply::Refresh(interval),
            Command::Help => return Reply::Help,
        }
        Reply::None
    }

    /// Draw the next frame if the screen changed
    ///
    /// Returns true when a frame was drawn; the caller then requests a
    /// swap. The clock redraws when its shown time changes: every second,
    /// or every tenth of a second in fast mode.
    pub fn render<S, const W: usize, const H: usize>(&mut self, sink: S, now: &TimeOfDay) -> bool
    where
        S: PixelSink<W, H>,
    {
        let mut canvas = Canvas::new(sink).with_mirrored(self.mirrored);

        if self.screen == Screen::Clock {
            let mut stamp = now.seconds_of_day() * 10;
            if self.fast_mode {
                stamp += now.millis as u32 / 100;
            }
            if self.last_stamp == Some(stamp) {
                return false;
            }
            self.last_stamp = Some(stamp);
            self.redraw = false;

            let face = ClockFace {
                hour_24: self.clock_24h,
                show_millis: self.fast_mode,
            };
            let _ = draw_clock(&mut canvas, now, face);
            return true;
        }

        if !self.redraw {
            return false;
        }
        self.redraw = false;

        let _ = match self.screen {
            Screen::Splash => pattern::splash(&mut canvas),
            Screen::Solid => pattern::solid(&mut canvas, self.color),
            Screen::SmallGrid => pattern::grid(&mut canvas, 4, self.color),
            Screen::LargeGrid => pattern::grid(&mut canvas, 8, self.color),
            Screen::Clock => Ok(()),
        };
        true
    }
}
