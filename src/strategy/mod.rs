//! Transmission strategies
//!
//! A strategy turns an encoded bitstream into the electrical pulse train.
//! All strategies share the same encoder and wire contract; they differ in how
//! much CPU time the transmission takes.

mod bit_bang;
mod timer_dma;

pub use bit_bang::BitBangStrategy;
pub use timer_dma::{PwmTimer, TimerDmaStrategy, TransferChannel};

use crate::{Error, config::LedConfig, encoder, pixel::PixelStore, timing::PulseTiming};

/// Token for one in-flight frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferHandle {
    id: u32,
    len: usize,
}

impl TransferHandle {
    pub const fn new(id: u32, len: usize) -> Self {
        Self { id, len }
    }

    /// Sequence number assigned by the strategy
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Number of duty values in the frame
    pub const fn len(&self) -> usize {
        self.len
    }

    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Hardware side of an LED controller
pub trait TransmissionStrategy {
    /// Configure the hardware for `config`. Called once, after the buffers
    /// are allocated.
    fn initialize(&mut self, config: &LedConfig) -> Result<(), Error>;

    /// Encode `pixels` into `out`
    fn encode<const CAP: usize>(
        &self,
        pixels: &PixelStore<CAP>,
        timing: &PulseTiming,
        out: &mut [u16],
    ) -> Result<usize, Error> {
        encoder::encode_into(pixels, timing, out)
    }

    /// Start sending `bitstream`
    ///
    /// The controller keeps `bitstream` alive and unmodified until
    /// [`TransmissionStrategy::finish`] returns for the handle.
    fn transmit(&mut self, bitstream: &[u16]) -> Result<TransferHandle, Error>;

    /// Whether the hardware has sent the whole frame
    fn is_complete(&self, handle: &TransferHandle) -> bool;

    /// Stop the hardware after a frame and leave the data line low
    fn finish(&mut self, handle: TransferHandle);

    /// Shut the hardware down on teardown
    fn release(&mut self) {}
}
