//! Test patterns and boot splash

use embedded_graphics::mono_font::ascii::{FONT_4X6, FONT_6X10};
use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle, RoundedRectangle};
use embedded_graphics::text::{Baseline, Text};

use hubclock_core::Color;

/// Fill the whole panel with one color
pub fn solid<D>(target: &mut D, color: Color) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Color>,
{
    target.clear(color)
}

/// Grid lines every `spacing` pixels, plus the last row and column
///
/// Useful for spotting swapped row groups and reversed chains: every line
/// must come out straight and unbroken.
pub fn grid<D>(target: &mut D, spacing: u32, color: Color) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Color> + OriginDimensions,
{
    target.clear(Color::BLACK)?;

    let size = target.size();
    let last_x = size.width as i32 - 1;
    let last_y = size.height as i32 - 1;
    let style = PrimitiveStyle::with_stroke(color, 1);
    let spacing = spacing.max(1) as i32;

    for x in 0..=last_x {
        if x % spacing == 0 || x == last_x {
            Line::new(Point::new(x, 0), Point::new(x, last_y))
                .into_styled(style)
                .draw(target)?;
        }
    }
    for y in 0..=last_y {
        if y % spacing == 0 || y == last_y {
            Line::new(Point::new(0, y), Point::new(last_x, y))
                .into_styled(style)
                .draw(target)?;
        }
    }
    Ok(())
}

/// Boot screen: name, board and a rounded border
pub fn splash<D>(target: &mut D) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Color> + OriginDimensions,
{
    target.clear(Color::BLACK)?;

    let large = |color: Color| MonoTextStyle::new(&FONT_6X10, color);
    let small = MonoTextStyle::new(&FONT_4X6, Color::YELLOW);

    Text::with_baseline("hub", Point::new(4, 12), large(Color::GREEN), Baseline::Alphabetic)
        .draw(target)?;
    Text::with_baseline("clock", Point::new(4, 24), large(Color::RED), Baseline::Alphabetic)
        .draw(target)?;
    Text::with_baseline("64x64 RGB", Point::new(4, 48), small, Baseline::Alphabetic)
        .draw(target)?;
    Text::with_baseline("press ?", Point::new(4, 58), small, Baseline::Alphabetic)
        .draw(target)?;

    RoundedRectangle::with_equal_corners(
        Rectangle::new(Point::zero(), target.size()),
        Size::new(5, 5),
    )
    .into_styled(PrimitiveStyle::with_stroke(Color::BLUE, 1))
    .draw(target)
}
