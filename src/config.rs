use crate::{
    binding::HardwareBinding,
    pixel::ColorOrder,
    timing::{PulseTiming, TimingConfig},
};

/// Construction-time configuration of one LED chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LedConfig {
    pub led_count: usize,
    pub color_order: ColorOrder,
    pub binding: HardwareBinding,
    pub timing: TimingConfig,
}

impl LedConfig {
    /// GRB strip with the default 72 MHz timing
    pub const fn new(led_count: usize, binding: HardwareBinding) -> Self {
        Self {
            led_count,
            color_order: ColorOrder::Grb,
            binding,
            timing: TimingConfig::new(PulseTiming::WS2812_72MHZ),
        }
    }

    #[must_use]
    pub const fn with_color_order(mut self, color_order: ColorOrder) -> Self {
        self.color_order = color_order;
        self
    }

    #[must_use]
    pub const fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }
}

impl Default for LedConfig {
    fn default() -> Self {
        Self::new(1, HardwareBinding::default())
    }
}
