//! Analog clock face for a 64x64 panel
//!
//! Drawn back to front: ring, numerals, minute marks, hands, hub. Angles
//! are measured clockwise from 12 o'clock.

use core::f32::consts::PI;

use embedded_graphics::mono_font::ascii::FONT_4X6;
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Circle, Line, PrimitiveStyle};
use embedded_graphics::text::{Baseline, Text};
use libm::{cosf, sinf};

use hubclock_core::Color;

use crate::time::TimeOfDay;

const CENTER: Point = Point::new(32, 32);

/// Outer ring radius and segment step in degrees
const RING_RADIUS: f32 = 31.0;
const RING_STEP_DEG: usize = 5;

/// Minute marks sit on this radius; five-minute ticks start further in
const MARK_RADIUS: f32 = 30.0;
const TICK_INNER_RADIUS: f32 = 25.0;

const RING_COLOR: Color = Color::GREEN;
const NUMERAL_COLOR: Color = Color::RED;
const MARK_COLOR: Color = Color::BLUE;
const HUB_COLOR: Color = Color::YELLOW;

/// A hand: length in pixels and color
struct Hand {
    length: f32,
    color: Color,
}

const SECOND_HAND: Hand = Hand {
    length: 25.0,
    color: Color::MAGENTA,
};
const MINUTE_HAND: Hand = Hand {
    length: 20.0,
    color: Color::GREEN,
};
const HOUR_HAND: Hand = Hand {
    length: 15.0,
    color: Color::CYAN,
};
const MILLIS_HAND: Hand = Hand {
    length: 10.0,
    color: Color::BLUE,
};

/// Clock face options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ClockFace {
    /// One hour-hand revolution per day instead of per half day
    pub hour_24: bool,
    /// Draw the sub-second hand
    pub show_millis: bool,
}

impl ClockFace {
    /// Numerals and their baseline positions, 12 o'clock first
    fn numerals(&self) -> [(&'static str, Point); 4] {
        if self.hour_24 {
            [
                ("24", Point::new(26, 11)),
                ("6", Point::new(54, 36)),
                ("12", Point::new(26, 60)),
                ("18", Point::new(4, 36)),
            ]
        } else {
            [
                ("12", Point::new(26, 11)),
                ("3", Point::new(54, 36)),
                ("6", Point::new(30, 60)),
                ("9", Point::new(4, 36)),
            ]
        }
    }

    /// Hour hand angle in radians
    fn hour_angle(&self, time: &TimeOfDay) -> f32 {
        let hours = (time.hours % 24) as f32 + time.minutes as f32 / 60.0;
        if self.hour_24 {
            hours / 12.0 * PI
        } else {
            hours / 6.0 * PI
        }
    }
}

/// Point on the dial for the ring and marks
///
/// These use the pixel-center origin (32.5, 32.5) and run counter-clockwise
/// from 6 o'clock; the set of points is symmetric so only hands care about
/// direction.
fn dial_point(radius: f32, angle: f32) -> Point {
    Point::new(
        (32.5 + radius * sinf(angle)) as i32,
        (32.5 + radius * cosf(angle)) as i32,
    )
}

/// Tip of a hand at `angle` (clockwise from 12)
fn hand_tip(length: f32, angle: f32) -> Point {
    Point::new(
        (CENTER.x as f32 + length * sinf(angle)) as i32,
        (CENTER.y as f32 - length * cosf(angle)) as i32,
    )
}

fn draw_hand<D>(target: &mut D, hand: &Hand, angle: f32) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Color>,
{
    Line::new(CENTER, hand_tip(hand.length, angle))
        .into_styled(PrimitiveStyle::with_stroke(hand.color, 1))
        .draw(target)
}

fn draw_dial<D>(target: &mut D, face: &ClockFace) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Color>,
{
    let ring = PrimitiveStyle::with_stroke(RING_COLOR, 1);
    for deg in (0..360).step_by(RING_STEP_DEG) {
        let a0 = deg as f32 / 180.0 * PI;
        let a1 = (deg + RING_STEP_DEG) as f32 / 180.0 * PI;
        Line::new(dial_point(RING_RADIUS, a0), dial_point(RING_RADIUS, a1))
            .into_styled(ring)
            .draw(target)?;
    }

    let text = MonoTextStyle::new(&FONT_4X6, NUMERAL_COLOR);
    for (label, at) in face.numerals() {
        Text::with_baseline(label, at, text, Baseline::Alphabetic).draw(target)?;
    }

    let marks = PrimitiveStyle::with_stroke(MARK_COLOR, 1);
    for minute in 1..60 {
        // Quarter positions carry numerals
        if minute % 15 == 0 {
            continue;
        }
        let angle = minute as f32 / 30.0 * PI;
        let outer = dial_point(MARK_RADIUS, angle);
        if minute % 5 == 0 {
            Line::new(dial_point(TICK_INNER_RADIUS, angle), outer)
                .into_styled(marks)
                .draw(target)?;
        } else {
            Pixel(outer, MARK_COLOR).draw(target)?;
        }
    }

    Ok(())
}

/// Draw a complete clock face showing `time`
///
/// Clears the target first.
pub fn draw_clock<D>(target: &mut D, time: &TimeOfDay, face: ClockFace) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Color>,
{
    target.clear(Color::BLACK)?;
    draw_dial(target, &face)?;

    let seconds = time.seconds as f32;
    let minutes = time.minutes as f32 + seconds / 60.0;

    draw_hand(target, &SECOND_HAND, seconds / 30.0 * PI)?;
    draw_hand(target, &MINUTE_HAND, minutes / 30.0 * PI)?;
    draw_hand(target, &HOUR_HAND, face.hour_angle(time))?;
    if face.show_millis {
        draw_hand(target, &MILLIS_HAND, time.millis as f32 / 500.0 * PI)?;
    }

    Circle::with_center(CENTER, 7)
        .into_styled(PrimitiveStyle::with_fill(HUB_COLOR))
        .draw(target)
}
