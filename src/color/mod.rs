//! Color types shared by the pixel store, the effects and the host API.

mod utils;

use smart_leds::RGB8;
pub use utils::{blend, color_hsv};

pub type Rgb = RGB8;

/// Packed `0xWWRRGGBB` color, independent of the strip's storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color(pub u32);

impl Color {
    /// All channels off
    pub const BLACK: Self = Self(0);

    /// Pack red, green and blue with the white channel off
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgbw(r, g, b, 0)
    }

    /// Pack all four channels
    pub const fn rgbw(r: u8, g: u8, b: u8, w: u8) -> Self {
        Self(((w as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32)
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn white(self) -> u8 {
        (self.0 >> 24) as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    #[allow(clippy::cast_possible_truncation)]
    pub const fn blue(self) -> u8 {
        self.0 as u8
    }

    /// Drop the white channel
    pub const fn to_rgb(self) -> Rgb {
        Rgb {
            r: self.red(),
            g: self.green(),
            b: self.blue(),
        }
    }
}

impl From<u32> for Color {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Color> for u32 {
    fn from(color: Color) -> Self {
        color.0
    }
}

impl From<Rgb> for Color {
    fn from(rgb: Rgb) -> Self {
        Self::rgb(rgb.r, rgb.g, rgb.b)
    }
}

impl From<Color> for Rgb {
    fn from(color: Color) -> Self {
        color.to_rgb()
    }
}
