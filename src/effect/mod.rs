//! Pixel effects
//!
//! Plain algorithms over a [`PixelStore`]. They only move or rewrite stored
//! bytes, so they work for every color order.

mod rainbow;

pub use rainbow::{RainbowEffect, rainbow};

use crate::pixel::PixelStore;

/// Rotate pixels cyclically by `positions`; positive moves toward higher
/// indexes
///
/// `positions` is taken modulo the strip length. Strips shorter than two
/// pixels are left alone.
#[allow(clippy::cast_possible_wrap, clippy::cast_sign_loss)]
pub fn rotate<const CAP: usize>(pixels: &mut PixelStore<CAP>, positions: isize) {
    let len = pixels.len();
    if len < 2 {
        return;
    }
    let steps = positions.rem_euclid(len as isize) as usize;
    if steps == 0 {
        return;
    }
    let size = pixels.order().bytes_per_pixel();
    pixels.as_bytes_mut().rotate_right(steps * size);
}

/// Shift pixels by `positions` without wrapping
///
/// Pixels pushed past either end are dropped and the vacated ones turned off.
/// Shifting by the strip length or more clears the strip.
pub fn shift<const CAP: usize>(pixels: &mut PixelStore<CAP>, positions: isize) {
    if positions == 0 {
        return;
    }
    let len = pixels.len();
    let steps = positions.unsigned_abs();
    if steps >= len {
        pixels.clear();
        return;
    }

    let offset = steps * pixels.order().bytes_per_pixel();
    let bytes = pixels.as_bytes_mut();
    let end = bytes.len();
    if positions > 0 {
        bytes.copy_within(..end - offset, offset);
        bytes[..offset].fill(0);
    } else {
        bytes.copy_within(offset.., 0);
        bytes[end - offset..].fill(0);
    }
}
