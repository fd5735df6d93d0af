#![no_std]

pub mod binding;
pub mod clock;
pub mod color;
pub mod config;
pub mod controller;
pub mod effect;
pub mod encoder;
pub mod error;
pub mod math8;
pub mod pixel;
pub mod strategy;
pub mod timing;
pub mod upload;

pub use binding::{HardwareBinding, Pin, Port, Timer, TimerChannel, TransferChannelId};
pub use clock::{Clock, SystemClock};
pub use color::{Color, Rgb, blend, color_hsv};
pub use config::LedConfig;
pub use controller::{LedController, TransmissionState};
pub use effect::{RainbowEffect, rainbow, rotate, shift};
pub use encoder::{duty_slots, encode, encode_into};
pub use error::Error;
pub use pixel::{ColorOrder, PixelStore, pixel_bytes};
pub use strategy::{
    BitBangStrategy, PwmTimer, TimerDmaStrategy, TransferChannel, TransferHandle,
    TransmissionStrategy,
};
pub use timing::{PulseTiming, TimingConfig};
pub use upload::write_rgb_frame;

pub use embassy_time::{Duration, Instant};

/// Minimal strip interface used by host-facing code
///
/// Implement this trait to drive a different kind of strip from the same
/// frame sources.
pub trait LedStrip {
    /// Prepare the strip for output
    fn begin(&mut self) -> Result<(), Error>;

    /// Send the current pixels to the LEDs
    fn show(&mut self) -> Result<(), Error>;

    fn set_pixel_rgb(&mut self, index: usize, r: u8, g: u8, b: u8);

    /// Number of LEDs
    fn count(&self) -> usize;
}
