//! `embedded-graphics` draw target over the pixel write interface
//!
//! The pixel write path does no bounds checking, so the canvas clips every
//! pixel before handing it on.

use core::convert::Infallible;

use embedded_graphics::prelude::*;
use hubclock_core::{Color, DisplayEngine, PixelWriter};

/// Something that can lend out the draw plane
///
/// The firmware implements this for its shared engine handle, taking the
/// lock only for the duration of `f`.
pub trait PixelSink<const W: usize, const H: usize> {
    fn with_pixels<R>(&mut self, f: impl FnOnce(&mut PixelWriter<'_, W, H>) -> R) -> R;
}

impl<const W: usize, const H: usize> PixelSink<W, H> for DisplayEngine<W, H> {
    fn with_pixels<R>(&mut self, f: impl FnOnce(&mut PixelWriter<'_, W, H>) -> R) -> R {
        f(&mut self.pixels())
    }
}

impl<S, const W: usize, const H: usize> PixelSink<W, H> for &mut S
where
    S: PixelSink<W, H>,
{
    fn with_pixels<R>(&mut self, f: impl FnOnce(&mut PixelWriter<'_, W, H>) -> R) -> R {
        (**self).with_pixels(f)
    }
}

/// Clipping draw target
pub struct Canvas<S, const W: usize, const H: usize> {
    sink: S,
    /// Mirror horizontally (`x' = W - 1 - x`)
    mirrored: bool,
}

impl<S, const W: usize, const H: usize> Canvas<S, W, H>
where
    S: PixelSink<W, H>,
{
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            mirrored: false,
        }
    }

    pub fn with_mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirrored
    }

    pub fn into_inner(self) -> S {
        self.sink
    }
}

impl<S, const W: usize, const H: usize> OriginDimensions for Canvas<S, W, H> {
    fn size(&self) -> Size {
        Size::new(W as u32, H as u32)
    }
}

impl<S, const W: usize, const H: usize> DrawTarget for Canvas<S, W, H>
where
    S: PixelSink<W, H>,
{
    type Color = Color;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let mirrored = self.mirrored;
        self.sink.with_pixels(|px| {
            for Pixel(Point { x, y }, color) in pixels {
                if x < 0 || y < 0 || x >= W as i32 || y >= H as i32 {
                    continue;
                }
                let x = if mirrored {
                    W - 1 - x as usize
                } else {
                    x as usize
                };
                px.set_pixel(x, y as usize, color);
            }
        });
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.sink.with_pixels(|px| px.fill(color));
        Ok(())
    }
}
