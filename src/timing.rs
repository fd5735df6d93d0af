//! Protocol timing
//!
//! WS2812B @ 800 kHz:
//! - bit period: 1.25 us
//! - T1H: 0.8 us (0.70-1.00 us)
//! - T0H: 0.4 us (0.35-0.50 us)
//! - reset: > 50 us low

use embassy_time::Duration;

const BIT_PERIOD_NS: u64 = 1_250;
const ONE_HIGH_NS: u64 = 800;
const ZERO_HIGH_NS: u64 = 400;
/// Low time covered by the zero-duty tail of every frame
const RESET_LOW_NS: u64 = 62_500;
const NS_PER_SECOND: u64 = 1_000_000_000;

/// Pulse widths expressed in timer ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    /// Timer input clock
    pub tick_hz: u32,
    /// Ticks per bit (auto-reload + 1)
    pub period: u16,
    /// Compare value for a logical 1
    pub one_high: u16,
    /// Compare value for a logical 0
    pub zero_high: u16,
    /// Zero-duty periods appended after the last pixel
    pub reset_cycles: u16,
}

impl PulseTiming {
    /// STM32F103 timer running from the 72 MHz bus without prescaler
    pub const WS2812_72MHZ: Self = Self {
        tick_hz: 72_000_000,
        period: 90,
        one_high: 58,
        zero_high: 29,
        reset_cycles: 50,
    };

    /// Derive pulse widths for a timer clocked at `tick_hz`
    ///
    /// Widths are rounded to the nearest tick; the reset tail always covers at
    /// least 62.5 us.
    #[allow(clippy::cast_possible_truncation)]
    pub const fn from_timer_clock(tick_hz: u32) -> Self {
        Self {
            tick_hz,
            period: ns_to_ticks(BIT_PERIOD_NS, tick_hz) as u16,
            one_high: ns_to_ticks(ONE_HIGH_NS, tick_hz) as u16,
            zero_high: ns_to_ticks(ZERO_HIGH_NS, tick_hz) as u16,
            reset_cycles: RESET_LOW_NS.div_ceil(BIT_PERIOD_NS) as u16,
        }
    }

    /// Compare value for one data bit
    #[inline]
    pub const fn bit_duty(&self, bit: bool) -> u16 {
        if bit { self.one_high } else { self.zero_high }
    }

    /// Convert timer ticks to nanoseconds
    #[allow(clippy::cast_possible_truncation)]
    pub const fn ticks_to_ns(&self, ticks: u16) -> u32 {
        if self.tick_hz == 0 {
            return 0;
        }
        (ticks as u64 * NS_PER_SECOND / self.tick_hz as u64) as u32
    }

    /// Nominal time to clock out `slots` duty values, rounded up
    pub const fn frame_duration(&self, slots: usize) -> Duration {
        if self.tick_hz == 0 {
            return Duration::from_micros(0);
        }
        let ticks = slots as u64 * self.period as u64;
        Duration::from_micros((ticks * 1_000_000).div_ceil(self.tick_hz as u64))
    }
}

impl Default for PulseTiming {
    fn default() -> Self {
        Self::WS2812_72MHZ
    }
}

const fn ns_to_ticks(ns: u64, tick_hz: u32) -> u64 {
    (ns * tick_hz as u64 + NS_PER_SECOND / 2) / NS_PER_SECOND
}

/// Timing configuration of a controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingConfig {
    /// Pulse widths used by the encoder
    pub pulse: PulseTiming,
    /// Minimum quiet time between two frames
    pub reset_time: Duration,
    /// Upper bound on the inter-frame wait inside `show()`
    pub reset_timeout: Duration,
    /// Upper bound on the completion wait
    ///
    /// `None` derives the bound from the frame length.
    pub transfer_timeout: Option<Duration>,
}

/// Default quiet time, well above the 50 us the LEDs need to latch
pub const DEFAULT_RESET_TIME: Duration = Duration::from_micros(300);
pub const DEFAULT_RESET_TIMEOUT: Duration = Duration::from_millis(10);
/// Slack added to the derived transfer bound
const TRANSFER_TIMEOUT_SLACK: Duration = Duration::from_millis(1);

impl TimingConfig {
    pub const fn new(pulse: PulseTiming) -> Self {
        Self {
            pulse,
            reset_time: DEFAULT_RESET_TIME,
            reset_timeout: DEFAULT_RESET_TIMEOUT,
            transfer_timeout: None,
        }
    }

    /// Completion bound for a frame of `slots` duty values
    pub fn transfer_timeout_for(&self, slots: usize) -> Duration {
        self.transfer_timeout.unwrap_or_else(|| {
            self.pulse.frame_duration(slots) * 2 + TRANSFER_TIMEOUT_SLACK
        })
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new(PulseTiming::WS2812_72MHZ)
    }
}
