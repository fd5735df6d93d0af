//! Transmission controller
//!
//! Owns the pixel store, the encoded bitstream and a transmission strategy,
//! and runs the frame cycle:
//!
//! `Idle -> Encoding -> Transmitting -> Idle`
//!
//! A frame only starts once the line has been quiet for the configured reset
//! time since the previous one finished. Both waits are bounded and report
//! [`Error::ResetTimeout`] or [`Error::TransferTimeout`] instead of hanging.

use core::mem::ManuallyDrop;

use embassy_time::{Duration, Instant};
use heapless::Vec;

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    Error, LedStrip,
    clock::Clock,
    color::{Color, Rgb},
    config::LedConfig,
    effect,
    encoder::duty_slots,
    pixel::PixelStore,
    strategy::{TransferHandle, TransmissionStrategy},
};

/// Frame cycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmissionState {
    Idle,
    Encoding,
    Transmitting,
}

/// Controller of one LED chain
///
/// `BYTES` bounds the pixel storage and `SLOTS` the encoded frame; size them
/// with [`pixel_bytes`](crate::pixel::pixel_bytes) and
/// [`duty_slots`](crate::encoder::duty_slots).
///
/// Dropping the controller stops a frame in flight and releases the hardware.
pub struct LedController<S, C, const BYTES: usize, const SLOTS: usize>
where
    S: TransmissionStrategy,
    C: Clock,
{
    // External dependencies and configuration
    config: LedConfig,
    strategy: ManuallyDrop<S>,
    clock: C,

    // Buffers
    pixels: PixelStore<BYTES>,
    bitstream: Vec<u16, SLOTS>,

    // Frame cycle
    state: TransmissionState,
    in_flight: Option<TransferHandle>,
    last_idle: Option<Instant>,
    begun: bool,
    /// Strategy moved out by `release()`
    released: bool,
}

impl<S, C, const BYTES: usize, const SLOTS: usize> LedController<S, C, BYTES, SLOTS>
where
    S: TransmissionStrategy,
    C: Clock,
{
    /// Create a controller. No memory is reserved and no hardware touched
    /// until [`LedController::begin`].
    pub fn new(config: LedConfig, strategy: S, clock: C) -> Self {
        Self {
            pixels: PixelStore::new(config.color_order),
            bitstream: Vec::new(),
            config,
            strategy: ManuallyDrop::new(strategy),
            clock,
            state: TransmissionState::Idle,
            in_flight: None,
            last_idle: None,
            begun: false,
            released: false,
        }
    }

    /// Reserve the buffers, configure the hardware and send one all-off frame
    ///
    /// If a buffer does not fit, nothing is configured and any buffer already
    /// reserved is released. Calling it again after success is a no-op.
    pub fn begin(&mut self) -> Result<(), Error> {
        if self.begun {
            return Ok(());
        }

        if let Err(err) = self.allocate() {
            #[cfg(feature = "esp32-log")]
            println!("[LedController.begin] allocation failed: {:?}", err);
            return Err(err);
        }

        if let Err(err) = self.strategy.initialize(&self.config) {
            #[cfg(feature = "esp32-log")]
            println!("[LedController.begin] hardware init failed: {:?}", err);
            self.free_buffers();
            return Err(err);
        }
        self.begun = true;

        #[cfg(feature = "esp32-log")]
        println!(
            "[LedController.begin] {} leds, {} duty values",
            self.pixels.len(),
            self.bitstream.len()
        );

        self.pixels.clear();
        self.show()
    }

    fn allocate(&mut self) -> Result<(), Error> {
        let led_count = self.config.led_count;
        self.pixels.allocate(led_count)?;

        let requested = duty_slots(
            led_count,
            self.config.color_order,
            self.config.timing.pulse.reset_cycles,
        );
        self.bitstream.clear();
        if self.bitstream.resize(requested, 0).is_err() {
            self.free_buffers();
            return Err(Error::AllocationFailure {
                requested,
                capacity: SLOTS,
            });
        }
        Ok(())
    }

    fn free_buffers(&mut self) {
        self.pixels.release();
        self.bitstream.clear();
    }

    /// Encode the pixels and send them, blocking until the frame is out
    pub fn show(&mut self) -> Result<(), Error> {
        self.start_show()?;
        self.wait()
    }

    /// Encode the pixels and start sending them without waiting for the end
    /// of the frame
    ///
    /// A frame still in flight is completed first.
    ///
    /// The transfer reads the bitstream stored inside the controller, so the
    /// controller must stay in place until [`LedController::wait`] returns or
    /// [`LedController::is_busy`] reports `false`.
    pub fn start_show(&mut self) -> Result<(), Error> {
        if !self.begun {
            return Err(Error::NotInitialized);
        }
        if self.state == TransmissionState::Transmitting {
            self.wait()?;
        }
        self.wait_for_reset()?;

        self.state = TransmissionState::Encoding;
        if let Err(err) =
            self.strategy
                .encode(&self.pixels, &self.config.timing.pulse, &mut self.bitstream)
        {
            self.state = TransmissionState::Idle;
            return Err(err);
        }

        self.state = TransmissionState::Transmitting;
        match self.strategy.transmit(&self.bitstream) {
            Ok(handle) => {
                self.in_flight = Some(handle);
                Ok(())
            }
            Err(err) => {
                self.enter_idle();
                Err(err)
            }
        }
    }

    /// Whether a frame is still being sent
    ///
    /// Completes the frame cycle as soon as the hardware reports the end of
    /// the transfer.
    pub fn is_busy(&mut self) -> bool {
        let Some(handle) = self.in_flight else {
            return false;
        };
        if !self.strategy.is_complete(&handle) {
            return true;
        }
        self.complete(handle);
        false
    }

    /// Block until the frame in flight is out
    ///
    /// On timeout the hardware is stopped and the line forced low before
    /// [`Error::TransferTimeout`] is returned.
    pub fn wait(&mut self) -> Result<(), Error> {
        let Some(handle) = self.in_flight else {
            return Ok(());
        };
        let limit = self.config.timing.transfer_timeout_for(handle.len());
        let started = self.clock.now();

        while !self.strategy.is_complete(&handle) {
            if self.clock.now().saturating_duration_since(started) > limit {
                #[cfg(feature = "esp32-log")]
                println!("[LedController.wait] transfer timed out after {:?}", limit);
                self.complete(handle);
                return Err(Error::TransferTimeout);
            }
        }
        self.complete(handle);
        Ok(())
    }

    /// Whether the line has been quiet long enough to start a new frame
    pub fn can_show(&self) -> bool {
        if self.state != TransmissionState::Idle {
            return false;
        }
        self.last_idle.is_none_or(|last| {
            self.clock.now().saturating_duration_since(last) >= self.config.timing.reset_time
        })
    }

    fn wait_for_reset(&self) -> Result<(), Error> {
        let started = self.clock.now();
        let limit = self.config.timing.reset_timeout;
        while !self.can_show() {
            if self.clock.now().saturating_duration_since(started) > limit {
                #[cfg(feature = "esp32-log")]
                println!("[LedController.wait_for_reset] reset wait timed out");
                return Err(Error::ResetTimeout);
            }
        }
        Ok(())
    }

    fn complete(&mut self, handle: TransferHandle) {
        self.strategy.finish(handle);
        self.in_flight = None;
        self.enter_idle();
    }

    fn enter_idle(&mut self) {
        self.state = TransmissionState::Idle;
        self.last_idle = Some(self.clock.now());
    }

    /// Stop the hardware and give the strategy back
    pub fn release(mut self) -> S {
        self.shutdown();
        self.released = true;
        // SAFETY: `released` is set, so `drop` no longer touches the strategy
        // and it is taken exactly once.
        unsafe { ManuallyDrop::take(&mut self.strategy) }
    }

    /// Stop a frame in flight and release the hardware
    fn shutdown(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            self.strategy.finish(handle);
            self.state = TransmissionState::Idle;
        }
        if self.begun {
            self.strategy.release();
            self.begun = false;
            #[cfg(feature = "esp32-log")]
            println!("[LedController.shutdown] hardware released");
        }
    }

    pub const fn state(&self) -> TransmissionState {
        self.state
    }

    pub const fn config(&self) -> &LedConfig {
        &self.config
    }

    pub const fn is_initialized(&self) -> bool {
        self.begun
    }

    /// Time the last frame cycle returned to idle
    pub const fn last_idle(&self) -> Option<Instant> {
        self.last_idle
    }

    /// Quiet time still required before the next frame may start
    pub fn remaining_reset_time(&self) -> Duration {
        let Some(last) = self.last_idle else {
            return Duration::from_ticks(0);
        };
        let elapsed = self.clock.now().saturating_duration_since(last);
        if elapsed >= self.config.timing.reset_time {
            Duration::from_ticks(0)
        } else {
            self.config.timing.reset_time - elapsed
        }
    }

    /// Encoded frame of the last `show()`
    pub fn bitstream(&self) -> &[u16] {
        &self.bitstream
    }

    pub fn strategy(&self) -> &S {
        &self.strategy
    }

    pub fn pixels(&self) -> &PixelStore<BYTES> {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut PixelStore<BYTES> {
        &mut self.pixels
    }

    /// Number of LEDs. Zero until `begin()` succeeds.
    pub fn count(&self) -> usize {
        self.pixels.len()
    }

    pub fn brightness(&self) -> u8 {
        self.pixels.brightness()
    }

    pub fn set_brightness(&mut self, brightness: u8) {
        self.pixels.set_brightness(brightness);
    }

    pub fn set_pixel_rgb(&mut self, index: usize, r: u8, g: u8, b: u8) {
        self.pixels.set_pixel_rgb(index, r, g, b);
    }

    pub fn set_pixel_rgbw(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) {
        self.pixels.set_pixel_rgbw(index, r, g, b, w);
    }

    pub fn set_pixel_color(&mut self, index: usize, color: Color) {
        self.pixels.set_pixel_color(index, color);
    }

    pub fn pixel_color(&self, index: usize) -> Color {
        self.pixels.pixel_color(index)
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    pub fn fill_rgb(&mut self, r: u8, g: u8, b: u8) {
        self.pixels.fill(Color::rgb(r, g, b));
    }

    pub fn fill_range(&mut self, start: usize, count: usize, color: Color) {
        self.pixels.fill_range(start, count, color);
    }

    pub fn clear(&mut self) {
        self.pixels.clear();
    }

    pub fn rotate(&mut self, positions: isize) {
        effect::rotate(&mut self.pixels, positions);
    }

    pub fn shift(&mut self, positions: isize) {
        effect::shift(&mut self.pixels, positions);
    }

    pub fn rainbow(&mut self, start_hue: u8) {
        effect::rainbow(&mut self.pixels, start_hue);
    }

    /// Load `colors` from the first pixel on and show them
    ///
    /// Colors past the end of the strip are ignored; pixels without a color
    /// keep their value.
    pub fn write_colors<I>(&mut self, colors: I) -> Result<(), Error>
    where
        I: IntoIterator<Item = Rgb>,
    {
        for (index, color) in colors.into_iter().take(self.pixels.len()).enumerate() {
            self.pixels.set_pixel_color(index, color.into());
        }
        self.show()
    }
}

impl<S, C, const BYTES: usize, const SLOTS: usize> Drop for LedController<S, C, BYTES, SLOTS>
where
    S: TransmissionStrategy,
    C: Clock,
{
    fn drop(&mut self) {
        if self.released {
            return;
        }
        self.shutdown();
        // SAFETY: the strategy was not taken by `release()` and is not used
        // after this point.
        unsafe { ManuallyDrop::drop(&mut self.strategy) }
    }
}

impl<S, C, const BYTES: usize, const SLOTS: usize> LedStrip for LedController<S, C, BYTES, SLOTS>
where
    S: TransmissionStrategy,
    C: Clock,
{
    fn begin(&mut self) -> Result<(), Error> {
        LedController::begin(self)
    }

    fn show(&mut self) -> Result<(), Error> {
        LedController::show(self)
    }

    fn set_pixel_rgb(&mut self, index: usize, r: u8, g: u8, b: u8) {
        LedController::set_pixel_rgb(self, index, r, g, b);
    }

    fn count(&self) -> usize {
        LedController::count(self)
    }
}
