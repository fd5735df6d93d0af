//! Software bit-timed strategy
//!
//! Replays the encoded duty values on a plain output pin. The frame is emitted
//! inside a critical section so no interrupt can stretch a pulse; the CPU is
//! busy for the whole frame.

use embedded_hal::{delay::DelayNs, digital::OutputPin};
#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{TransferHandle, TransmissionStrategy};
use crate::{Error, config::LedConfig, timing::PulseTiming};

/// Strategy that drives the data line directly from the CPU
pub struct BitBangStrategy<P: OutputPin, D: DelayNs> {
    pin: P,
    delay: D,
    timing: PulseTiming,
    next_id: u32,
}

impl<P: OutputPin, D: DelayNs> BitBangStrategy<P, D> {
    pub fn new(pin: P, delay: D) -> Self {
        Self {
            pin,
            delay,
            timing: PulseTiming::WS2812_72MHZ,
            next_id: 0,
        }
    }

    pub fn free(self) -> (P, D) {
        (self.pin, self.delay)
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    fn send(&mut self, bitstream: &[u16]) -> Result<(), P::Error> {
        let period_ns = self.timing.ticks_to_ns(self.timing.period);
        for &duty in bitstream {
            if duty == 0 {
                self.pin.set_low()?;
                self.delay.delay_ns(period_ns);
                continue;
            }
            let high_ns = self.timing.ticks_to_ns(duty);
            self.pin.set_high()?;
            self.delay.delay_ns(high_ns);
            self.pin.set_low()?;
            self.delay.delay_ns(period_ns.saturating_sub(high_ns));
        }
        Ok(())
    }
}

impl<P: OutputPin, D: DelayNs> TransmissionStrategy for BitBangStrategy<P, D> {
    fn initialize(&mut self, config: &LedConfig) -> Result<(), Error> {
        self.timing = config.timing.pulse;
        self.pin.set_low().map_err(|_| Error::Output)
    }

    fn transmit(&mut self, bitstream: &[u16]) -> Result<TransferHandle, Error> {
        critical_section::with(|_| self.send(bitstream)).map_err(|_| Error::Output)?;

        let handle = TransferHandle::new(self.next_id, bitstream.len());
        self.next_id = self.next_id.wrapping_add(1);
        Ok(handle)
    }

    fn is_complete(&self, _handle: &TransferHandle) -> bool {
        true
    }

    fn finish(&mut self, _handle: TransferHandle) {
        if let Err(err) = self.pin.set_low() {
            report_idle_error("finish", &err);
        }
    }

    fn release(&mut self) {
        if let Err(err) = self.pin.set_low() {
            report_idle_error("release", &err);
        }
    }
}

/// The line could not be parked low after a frame
#[allow(unused_variables)]
fn report_idle_error<E: core::fmt::Debug>(method: &str, err: &E) {
    #[cfg(feature = "esp32-log")]
    println!(
        "[BitBangStrategy.{}] failed to drive the line low: {:?}",
        method, err
    );
}
