//! Pixel storage
//!
//! [`PixelStore`] keeps the color of every LED in the strip's configured byte
//! order, together with the global brightness. Brightness is never baked into
//! the stored bytes; the encoder applies it on every frame.

mod order;

use heapless::Vec;
pub use order::ColorOrder;

use crate::{Error, color::Color};

/// Number of storage bytes needed for `led_count` pixels in `order`
pub const fn pixel_bytes(led_count: usize, order: ColorOrder) -> usize {
    led_count * order.bytes_per_pixel()
}

/// Per-LED color buffer with a fixed capacity of `CAP` bytes
#[derive(Debug, Clone)]
pub struct PixelStore<const CAP: usize> {
    bytes: Vec<u8, CAP>,
    order: ColorOrder,
    brightness: u8,
}

impl<const CAP: usize> PixelStore<CAP> {
    /// Create an empty store. Call [`PixelStore::allocate`] before use.
    pub const fn new(order: ColorOrder) -> Self {
        Self {
            bytes: Vec::new(),
            order,
            brightness: 255,
        }
    }

    /// Reserve zeroed storage for `led_count` pixels
    ///
    /// Fails without touching the previous contents when the pixels do not fit
    /// into `CAP` bytes.
    pub fn allocate(&mut self, led_count: usize) -> Result<(), Error> {
        let requested = pixel_bytes(led_count, self.order);
        if requested > CAP {
            return Err(Error::AllocationFailure {
                requested,
                capacity: CAP,
            });
        }
        self.bytes.clear();
        self.bytes
            .resize(requested, 0)
            .map_err(|()| Error::AllocationFailure {
                requested,
                capacity: CAP,
            })
    }

    /// Drop all pixels, returning the store to its unallocated state
    pub fn release(&mut self) {
        self.bytes.clear();
    }

    /// Number of pixels
    pub fn len(&self) -> usize {
        self.bytes.len() / self.order.bytes_per_pixel()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub const fn order(&self) -> ColorOrder {
        self.order
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Set the global brightness applied at the next encode
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Set a pixel from separate channels. White is reset to 0.
    pub fn set_pixel_rgb(&mut self, index: usize, r: u8, g: u8, b: u8) {
        self.set_pixel_color(index, Color::rgb(r, g, b));
    }

    pub fn set_pixel_rgbw(&mut self, index: usize, r: u8, g: u8, b: u8, w: u8) {
        self.set_pixel_color(index, Color::rgbw(r, g, b, w));
    }

    /// Set a pixel from a packed color. Out-of-range indexes are ignored.
    pub fn set_pixel_color(&mut self, index: usize, color: Color) {
        let order = self.order;
        if let Some(pixel) = self.pixel_mut(index) {
            order.pack(color, pixel);
        }
    }

    /// Read a pixel back as a packed color
    ///
    /// Returns [`Color::BLACK`] for out-of-range indexes.
    pub fn pixel_color(&self, index: usize) -> Color {
        let size = self.order.bytes_per_pixel();
        let start = index.saturating_mul(size);
        self.bytes
            .get(start..start.saturating_add(size))
            .map_or(Color::BLACK, |pixel| self.order.unpack(pixel))
    }

    /// Iterate over all pixels as packed colors
    pub fn colors(&self) -> impl Iterator<Item = Color> + '_ {
        self.bytes
            .chunks_exact(self.order.bytes_per_pixel())
            .map(|pixel| self.order.unpack(pixel))
    }

    pub fn fill(&mut self, color: Color) {
        let order = self.order;
        for pixel in self.bytes.chunks_exact_mut(order.bytes_per_pixel()) {
            order.pack(color, pixel);
        }
    }

    /// Fill `count` pixels starting at `start`, clipped to the strip length
    pub fn fill_range(&mut self, start: usize, count: usize, color: Color) {
        let end = start.saturating_add(count).min(self.len());
        for index in start..end {
            self.set_pixel_color(index, color);
        }
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Raw stored bytes in the configured order
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub(crate) fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    fn pixel_mut(&mut self, index: usize) -> Option<&mut [u8]> {
        let size = self.order.bytes_per_pixel();
        let start = index.checked_mul(size)?;
        self.bytes.get_mut(start..start.checked_add(size)?)
    }
}
