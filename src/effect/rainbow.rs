//! Rainbow effects

use embassy_time::{Duration, Instant};

use crate::{color::color_hsv, math8::progress8, pixel::PixelStore};

const DEFAULT_CYCLE_MS: u64 = 12_000;

/// Spread the full hue circle over the strip, starting at `start_hue`
#[allow(clippy::cast_possible_truncation)]
pub fn rainbow<const CAP: usize>(pixels: &mut PixelStore<CAP>, start_hue: u8) {
    let len = pixels.len();
    for index in 0..len {
        let offset = (index * 256 / len) as u8;
        pixels.set_pixel_color(index, color_hsv(start_hue.wrapping_add(offset), 255, 255));
    }
}

/// Rainbow that travels along the strip over time
#[derive(Debug, Clone)]
pub struct RainbowEffect {
    /// Duration of one complete hue cycle
    cycle_duration: Duration,
    /// Run toward lower indexes instead
    reverse: bool,
}

impl Default for RainbowEffect {
    fn default() -> Self {
        Self {
            cycle_duration: Duration::from_millis(DEFAULT_CYCLE_MS),
            reverse: false,
        }
    }
}

impl RainbowEffect {
    /// Set the cycle duration
    #[must_use]
    pub fn with_cycle_duration(mut self, duration: Duration) -> Self {
        self.cycle_duration = duration;
        self
    }

    #[must_use]
    pub fn with_reverse(mut self) -> Self {
        self.reverse = true;
        self
    }

    /// Hue of the first pixel at `now`
    pub fn start_hue(&self, now: Instant) -> u8 {
        let cycle_ms = self.cycle_duration.as_millis().max(1);
        let elapsed = Duration::from_millis(now.as_millis() % cycle_ms);
        let hue = progress8(elapsed, Duration::from_millis(cycle_ms));
        if self.reverse { hue } else { 255 - hue }
    }

    /// Render the frame for `now`
    pub fn render<const CAP: usize>(&self, now: Instant, pixels: &mut PixelStore<CAP>) {
        rainbow(pixels, self.start_hue(now));
    }
}
