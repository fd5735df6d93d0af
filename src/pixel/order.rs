use crate::color::Color;

/// Byte layout of a pixel in the store.
///
/// The order only affects storage; the wire order is always G, R, B, W.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorOrder {
    /// WS2812B default
    #[default]
    Grb,
    Rgb,
    Brg,
    Bgr,
    /// SK6812 RGBW
    Grbw,
    Rgbw,
}

impl ColorOrder {
    /// Whether pixels carry a fourth (white) channel
    pub const fn has_white(self) -> bool {
        matches!(self, Self::Grbw | Self::Rgbw)
    }

    pub const fn bytes_per_pixel(self) -> usize {
        if self.has_white() { 4 } else { 3 }
    }

    pub const fn bits_per_pixel(self) -> usize {
        self.bytes_per_pixel() * 8
    }

    /// Write `color` into `pixel` using this layout.
    ///
    /// `pixel` must be exactly `bytes_per_pixel()` long. White is dropped for
    /// three-channel layouts.
    pub(crate) fn pack(self, color: Color, pixel: &mut [u8]) {
        let (r, g, b, w) = (color.red(), color.green(), color.blue(), color.white());
        match self {
            Self::Grb => pixel.copy_from_slice(&[g, r, b]),
            Self::Rgb => pixel.copy_from_slice(&[r, g, b]),
            Self::Brg => pixel.copy_from_slice(&[b, r, g]),
            Self::Bgr => pixel.copy_from_slice(&[b, g, r]),
            Self::Grbw => pixel.copy_from_slice(&[g, r, b, w]),
            Self::Rgbw => pixel.copy_from_slice(&[r, g, b, w]),
        }
    }

    /// Read a stored pixel back into a packed color
    pub(crate) fn unpack(self, pixel: &[u8]) -> Color {
        match *pixel {
            [p0, p1, p2] => match self {
                Self::Rgb => Color::rgb(p0, p1, p2),
                Self::Brg => Color::rgb(p1, p2, p0),
                Self::Bgr => Color::rgb(p2, p1, p0),
                _ => Color::rgb(p1, p0, p2),
            },
            [p0, p1, p2, w] => match self {
                Self::Rgbw => Color::rgbw(p0, p1, p2, w),
                _ => Color::rgbw(p1, p0, p2, w),
            },
            _ => Color::BLACK,
        }
    }
}
