use super::Color;
use crate::math8::lerp8;

/// Convert an HSV triple (all channels 0-255) to a packed color.
///
/// The hue circle is split into six regions of 43 steps; the last region also
/// covers the remainder up to 255. The white channel is always 0.
#[allow(clippy::cast_possible_truncation)]
pub const fn color_hsv(hue: u8, sat: u8, val: u8) -> Color {
    if sat == 0 {
        return Color::rgb(val, val, val);
    }

    let region = hue / 43;
    let remainder = (hue - region * 43) as u16 * 6;

    let s = sat as u16;
    let v = val as u16;
    let p = ((v * (255 - s)) >> 8) as u8;
    let q = ((v * (255 - ((s * remainder) >> 8))) >> 8) as u8;
    let t = ((v * (255 - ((s * (255 - remainder)) >> 8))) >> 8) as u8;

    match region {
        0 => Color::rgb(val, t, p),
        1 => Color::rgb(q, val, p),
        2 => Color::rgb(p, val, t),
        3 => Color::rgb(p, q, val),
        4 => Color::rgb(t, p, val),
        _ => Color::rgb(val, p, q),
    }
}

/// Blend two colors channel by channel, white included.
///
/// `amount = 0` returns `a` exactly. `amount = 255` only approximates `b`:
/// a rising channel stops one step short because of the `>> 8` truncation.
#[inline]
pub const fn blend(a: Color, b: Color, amount: u8) -> Color {
    Color::rgbw(
        lerp8(a.red(), b.red(), amount),
        lerp8(a.green(), b.green(), amount),
        lerp8(a.blue(), b.blue(), amount),
        lerp8(a.white(), b.white(), amount),
    )
}
