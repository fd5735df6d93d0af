//! PWM timer + DMA strategy
//!
//! The timer runs at the bit period and raises a DMA request on every update
//! event; the DMA channel copies the next duty value into the compare register.
//! Once armed, the frame goes out without any CPU involvement.

#[cfg(feature = "esp32-log")]
use esp_println::println;

use super::{TransferHandle, TransmissionStrategy};
use crate::{
    Error,
    binding::{Pin, TimerChannel},
    config::LedConfig,
};

/// Register-level access to the timing generator
pub trait PwmTimer {
    /// Route `channel` to `pin` as alternate-function push-pull output,
    /// applying a pin remap when `remap` is set
    fn attach_pin(&mut self, pin: Pin, channel: TimerChannel, remap: bool);

    /// Pause and reset the timer, then set PWM mode 1 with preload on
    /// `channel`, `period` ticks per cycle, compare 0
    fn configure_pwm(&mut self, channel: TimerChannel, period: u16);

    /// Main output enable of advanced timers
    fn enable_main_output(&mut self) {}

    fn set_compare(&mut self, channel: TimerChannel, duty: u16);

    /// Bus address of the compare register of `channel`
    fn compare_address(&self, channel: TimerChannel) -> u32;

    /// Enable or disable the DMA request on update events
    fn set_update_dma_request(&mut self, enabled: bool);

    fn reset_counter(&mut self);

    fn start(&mut self);

    fn stop(&mut self);
}

/// Register-level access to the transfer engine channel
pub trait TransferChannel {
    /// Enable the controller clock
    fn init(&mut self);

    /// Program a memory to peripheral transfer of 16-bit values with memory
    /// increment, high priority and transfer-complete flag
    ///
    /// `source` stays valid until [`TransferChannel::disarm`].
    fn arm(&mut self, source: &[u16], destination: u32);

    fn enable(&mut self);

    /// Transfer-complete flag
    fn is_complete(&self) -> bool;

    /// Disable the channel and clear its flags
    fn disarm(&mut self);
}

/// Strategy that streams duty values into a PWM timer with DMA
pub struct TimerDmaStrategy<T: PwmTimer, D: TransferChannel> {
    timer: T,
    dma: D,
    channel: TimerChannel,
    next_id: u32,
}

impl<T: PwmTimer, D: TransferChannel> TimerDmaStrategy<T, D> {
    pub fn new(timer: T, dma: D) -> Self {
        Self {
            timer,
            dma,
            channel: TimerChannel::Ch1,
            next_id: 0,
        }
    }

    /// Give the peripherals back
    pub fn free(self) -> (T, D) {
        (self.timer, self.dma)
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn dma(&self) -> &D {
        &self.dma
    }
}

impl<T: PwmTimer, D: TransferChannel> TransmissionStrategy for TimerDmaStrategy<T, D> {
    fn initialize(&mut self, config: &LedConfig) -> Result<(), Error> {
        let binding = config.binding;
        self.channel = binding.timer_channel();

        self.timer
            .attach_pin(binding.pin(), self.channel, binding.requires_remap());
        self.timer
            .configure_pwm(self.channel, config.timing.pulse.period);
        if binding.timer().is_advanced() {
            self.timer.enable_main_output();
        }
        self.dma.init();

        #[cfg(feature = "esp32-log")]
        println!(
            "[TimerDmaStrategy.initialize] {:?} {:?} via DMA {:?}",
            binding.timer(),
            self.channel,
            binding.transfer_channel()
        );
        Ok(())
    }

    fn transmit(&mut self, bitstream: &[u16]) -> Result<TransferHandle, Error> {
        self.dma.disarm();
        self.dma
            .arm(bitstream, self.timer.compare_address(self.channel));
        self.timer.set_update_dma_request(true);
        self.dma.enable();
        self.timer.reset_counter();
        self.timer.start();

        let handle = TransferHandle::new(self.next_id, bitstream.len());
        self.next_id = self.next_id.wrapping_add(1);
        Ok(handle)
    }

    fn is_complete(&self, _handle: &TransferHandle) -> bool {
        self.dma.is_complete()
    }

    fn finish(&mut self, _handle: TransferHandle) {
        self.timer.stop();
        self.timer.set_update_dma_request(false);
        self.dma.disarm();
        // compare 0 keeps the output low
        self.timer.set_compare(self.channel, 0);
    }

    fn release(&mut self) {
        self.dma.disarm();
        self.timer.stop();
    }
}
