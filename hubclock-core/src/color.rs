//! 3-bit panel colors
//!
//! The panel has no intensity control: each LED is either on or off per
//! channel, which gives an 8-entry palette.

/// Mask selecting the meaningful bits of a color code
pub const COLOR_MASK: u8 = 0x07;

/// A palette index with one bit per color channel
///
/// Bit 2 drives the red data line, bit 1 green and bit 0 blue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Color(u8);

impl Color {
    pub const BLACK: Self = Self(0);
    pub const BLUE: Self = Self(1);
    pub const GREEN: Self = Self(2);
    pub const CYAN: Self = Self(3);
    pub const RED: Self = Self(4);
    pub const MAGENTA: Self = Self(5);
    pub const YELLOW: Self = Self(6);
    pub const WHITE: Self = Self(7);

    /// Create a color from a raw code, keeping only the low 3 bits
    pub const fn new(code: u8) -> Self {
        Self(code & COLOR_MASK)
    }

    /// Raw palette index (0-7)
    pub const fn code(self) -> u8 {
        self.0
    }

    /// Red channel bit
    pub const fn red(self) -> bool {
        self.0 & 0x4 != 0
    }

    /// Green channel bit
    pub const fn green(self) -> bool {
        self.0 & 0x2 != 0
    }

    /// Blue channel bit
    pub const fn blue(self) -> bool {
        self.0 & 0x1 != 0
    }

    /// Next non-black color, wrapping from white back to blue
    pub const fn next_foreground(self) -> Self {
        let next = (self.0 + 1) & COLOR_MASK;
        if next == 0 {
            Self::BLUE
        } else {
            Self(next)
        }
    }
}

impl From<u8> for Color {
    fn from(code: u8) -> Self {
        Self::new(code)
    }
}

impl From<Color> for u8 {
    fn from(color: Color) -> Self {
        color.0
    }
}

#[cfg(feature = "graphics")]
impl embedded_graphics_core::pixelcolor::PixelColor for Color {
    type Raw = ();
}
