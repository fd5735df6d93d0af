//! Host frame upload
//!
//! Hosts such as SimHub stream a flat run of `R, G, B` bytes, one triple per
//! LED. Framing of the host protocol is handled elsewhere; this module only
//! applies an already received payload.

use crate::{Error, LedStrip};

/// Apply `data` to consecutive pixels from index 0 and show the result
///
/// Triples past the end of the strip and a trailing partial triple are
/// ignored. Returns the number of pixels updated.
pub fn write_rgb_frame<S: LedStrip + ?Sized>(strip: &mut S, data: &[u8]) -> Result<usize, Error> {
    let mut updated = 0;
    for (index, rgb) in data.chunks_exact(3).take(strip.count()).enumerate() {
        strip.set_pixel_rgb(index, rgb[0], rgb[1], rgb[2]);
        updated += 1;
    }
    strip.show()?;
    Ok(updated)
}
