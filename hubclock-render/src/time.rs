//! Time-of-day breakdown of a millisecond counter

use core::fmt;

use heapless::String;

const MS_PER_SECOND: u64 = 1000;
const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

/// Hours, minutes, seconds and milliseconds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeOfDay {
    /// Hours; wall-clock times stay below 24, uptimes keep counting
    pub hours: u32,
    pub minutes: u8,
    pub seconds: u8,
    pub millis: u16,
}

impl TimeOfDay {
    /// Elapsed time since boot, hours not wrapped
    pub fn from_uptime(uptime_ms: u64) -> Self {
        let total_s = uptime_ms / MS_PER_SECOND;
        Self {
            hours: (total_s / 3600) as u32,
            minutes: ((total_s / 60) % 60) as u8,
            seconds: (total_s % 60) as u8,
            millis: (uptime_ms % MS_PER_SECOND) as u16,
        }
    }

    /// Wall-clock time given the time of day at boot
    ///
    /// `epoch_s` is the number of seconds past midnight when the uptime
    /// counter read zero.
    pub fn wall_clock(uptime_ms: u64, epoch_s: u32) -> Self {
        let now_s = (epoch_s as u64 + uptime_ms / MS_PER_SECOND) % SECONDS_PER_DAY;
        Self {
            hours: (now_s / 3600) as u32,
            minutes: ((now_s / 60) % 60) as u8,
            seconds: (now_s % 60) as u8,
            millis: (uptime_ms % MS_PER_SECOND) as u16,
        }
    }

    /// Epoch offset for `wall_clock` that makes `uptime_ms` read as
    /// `seconds_of_day`
    pub fn epoch_for(seconds_of_day: u32, uptime_ms: u64) -> u32 {
        let now_s = (uptime_ms / MS_PER_SECOND) % SECONDS_PER_DAY;
        let target = seconds_of_day as u64 % SECONDS_PER_DAY;
        ((target + SECONDS_PER_DAY - now_s) % SECONDS_PER_DAY) as u32
    }

    /// Seconds since midnight (wraps for uptimes past one day)
    pub fn seconds_of_day(&self) -> u32 {
        let total = self.hours * 3600 + self.minutes as u32 * 60 + self.seconds as u32;
        total % SECONDS_PER_DAY as u32
    }

    /// Hours on a 12-hour dial
    pub fn hours_12(&self) -> u32 {
        self.hours % 12
    }

    /// Formatted stamp: `HH:MM:SS`, or `HHH:MM:SS.mmm` with `hires`
    pub fn stamp(&self, hires: bool) -> String<16> {
        let mut s = String::new();
        let _ = if hires {
            fmt::write(&mut s, format_args!("{}", self))
        } else {
            fmt::write(
                &mut s,
                format_args!("{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds),
            )
        };
        s
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:03}:{:02}:{:02}.{:03}",
            self.hours, self.minutes, self.seconds, self.millis
        )
    }
}
