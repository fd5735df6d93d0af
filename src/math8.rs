use embassy_time::Duration;

/// Scale a channel by the global brightness (`floor(value * brightness / 255)`).
///
/// Full brightness is an identity and skips the multiply.
#[inline]
#[allow(clippy::cast_possible_truncation)]
pub const fn scale_brightness(value: u8, brightness: u8) -> u8 {
    if brightness == 255 {
        return value;
    }
    ((value as u16 * brightness as u16) / 255) as u8
}

/// Linear interpolation `a + ((b - a) * amount) >> 8` with signed delta
#[inline]
#[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
pub const fn lerp8(a: u8, b: u8, amount: u8) -> u8 {
    let delta = b as i32 - a as i32;
    (a as i32 + ((delta * amount as i32) >> 8)) as u8
}

/// Calculate progress (0-255) based on elapsed time and duration
#[allow(clippy::cast_possible_truncation)]
#[inline]
pub const fn progress8(elapsed: Duration, duration: Duration) -> u8 {
    if duration.as_millis() == 0 {
        return 0;
    }
    if elapsed.as_millis() >= duration.as_millis() {
        return 255;
    }

    ((elapsed.as_millis() * 255) / duration.as_millis()) as u8
}
