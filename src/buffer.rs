//! Shared framebuffer and per-segment views into it.

use crate::{
    PixelSink,
    bounds::{SegmentBounds, bounded},
    color::{BLACK, Rgb, scale_color},
    error::Error,
    math8::scale8,
};

/// Color array of the physical strip
///
/// Holds up to `MAX_LEDS` pixels, of which the first `len` are live. Writes
/// are scaled by the global brightness at write time, so the stored colors
/// are exactly what gets pushed to the sink.
#[derive(Debug, Clone)]
pub struct PixelBuffer<const MAX_LEDS: usize> {
    pixels: [Rgb; MAX_LEDS],
    len: u16,
    brightness: u8,
}

impl<const MAX_LEDS: usize> PixelBuffer<MAX_LEDS> {
    /// Create a dark buffer of `len` pixels at full brightness
    pub fn new(len: u16) -> Result<Self, Error> {
        if len == 0 || usize::from(len) > MAX_LEDS {
            return Err(Error::InvalidLedCount(len));
        }
        Ok(Self {
            pixels: [BLACK; MAX_LEDS],
            len,
            brightness: u8::MAX,
        })
    }

    /// Number of live pixels
    pub const fn len(&self) -> u16 {
        self.len
    }

    /// Always false, a buffer holds at least one pixel
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Global brightness applied to subsequent writes
    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Change the global brightness, already written pixels keep their value
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    /// Set one pixel, indices outside the strip are ignored
    pub fn set(&mut self, index: u16, color: Rgb) {
        if index >= self.len {
            return;
        }
        self.pixels[usize::from(index)] = scale_color(color, self.brightness);
    }

    /// Get one pixel as stored
    pub fn get(&self, index: u16) -> Option<Rgb> {
        self.live().get(usize::from(index)).copied()
    }

    /// Turn every pixel off
    pub fn clear(&mut self) {
        let len = usize::from(self.len);
        self.pixels[..len].fill(BLACK);
    }

    /// Turn the pixels of a range off
    pub fn clear_range(&mut self, bounds: SegmentBounds) {
        let len = usize::from(self.len);
        bounded(&mut self.pixels[..len], bounds).fill(BLACK);
    }

    /// Live pixels in strip order
    pub fn live(&self) -> &[Rgb] {
        &self.pixels[..usize::from(self.len)]
    }

    /// Mutable view over one segment's range with its write-time brightness
    pub fn frame(&mut self, bounds: SegmentBounds, brightness: u8) -> Frame<'_> {
        let scale = scale8(brightness, self.brightness);
        let len = usize::from(self.len);
        Frame {
            pixels: bounded(&mut self.pixels[..len], bounds),
            scale,
        }
    }

    /// Push the live pixels to the output
    pub fn flush<S: PixelSink>(&self, sink: &mut S) {
        sink.show(self.live());
    }
}

/// Pixels of one segment, addressed from 0
///
/// Colors written through a frame are scaled by the segment brightness
/// combined with the global brightness. Offsets past the end are ignored.
pub struct Frame<'a> {
    pixels: &'a mut [Rgb],
    scale: u8,
}

impl<'a> Frame<'a> {
    /// Wrap a raw slice, colors are stored unscaled
    pub fn new(pixels: &'a mut [Rgb]) -> Self {
        Self {
            pixels,
            scale: u8::MAX,
        }
    }

    /// Number of pixels in the frame
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Set the pixel at `offset`
    pub fn set(&mut self, offset: usize, color: Rgb) {
        if let Some(pixel) = self.pixels.get_mut(offset) {
            *pixel = scale_color(color, self.scale);
        }
    }

    /// Set the pixel at `offset` to `color` dimmed by `level`
    pub fn set_dimmed(&mut self, offset: usize, color: Rgb, level: u8) {
        self.set(offset, scale_color(color, level));
    }

    /// Stored color at `offset`
    pub fn get(&self, offset: usize) -> Option<Rgb> {
        self.pixels.get(offset).copied()
    }

    /// Paint the whole frame
    pub fn fill(&mut self, color: Rgb) {
        let scaled = scale_color(color, self.scale);
        self.pixels.fill(scaled);
    }

    /// Turn the whole frame off
    pub fn clear(&mut self) {
        self.pixels.fill(BLACK);
    }
}
