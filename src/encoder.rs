//! Pixel to pulse-duty encoder
//!
//! Every channel byte becomes eight compare values, MSB first, in the fixed
//! wire order green, red, blue, white. A run of zero-duty values closes the
//! frame so the line stays low long enough for the LEDs to latch.

use heapless::Vec;

use crate::{
    Error, math8::scale_brightness, pixel::ColorOrder, pixel::PixelStore, timing::PulseTiming,
};

/// Number of duty values in a frame of `led_count` pixels
pub const fn duty_slots(led_count: usize, order: ColorOrder, reset_cycles: u16) -> usize {
    led_count * order.bits_per_pixel() + reset_cycles as usize
}

/// Encoded frame with room for `SLOTS` duty values
pub type Bitstream<const SLOTS: usize> = Vec<u16, SLOTS>;

/// Encode `pixels` into `out`, returning the number of duty values written
///
/// `out` must hold at least [`duty_slots`] values; entries past the frame are
/// left untouched.
pub fn encode_into<const CAP: usize>(
    pixels: &PixelStore<CAP>,
    timing: &PulseTiming,
    out: &mut [u16],
) -> Result<usize, Error> {
    let order = pixels.order();
    let requested = duty_slots(pixels.len(), order, timing.reset_cycles);
    if out.len() < requested {
        return Err(Error::AllocationFailure {
            requested,
            capacity: out.len(),
        });
    }

    let brightness = pixels.brightness();
    let channels_per_pixel = order.bytes_per_pixel();
    let mut slots = out.iter_mut();

    for color in pixels.colors() {
        let wire = [color.green(), color.red(), color.blue(), color.white()];
        for &channel in &wire[..channels_per_pixel] {
            let value = scale_brightness(channel, brightness);
            for (bit, slot) in (0..8).rev().zip(slots.by_ref()) {
                *slot = timing.bit_duty(value & (1 << bit) != 0);
            }
        }
    }

    for slot in slots.take(usize::from(timing.reset_cycles)) {
        *slot = 0;
    }

    Ok(requested)
}

/// Encode `pixels` into a freshly sized bitstream
pub fn encode<const CAP: usize, const SLOTS: usize>(
    pixels: &PixelStore<CAP>,
    timing: &PulseTiming,
) -> Result<Bitstream<SLOTS>, Error> {
    let requested = duty_slots(pixels.len(), pixels.order(), timing.reset_cycles);
    let mut bitstream = Bitstream::new();
    bitstream
        .resize(requested, 0)
        .map_err(|()| Error::AllocationFailure {
            requested,
            capacity: SLOTS,
        })?;
    encode_into(pixels, timing, &mut bitstream)?;
    Ok(bitstream)
}
