//! Strip controller - owns the framebuffer and the segment table.

use core::fmt::Write as _;

use embassy_time::Instant;
use heapless::{String, Vec};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    PixelSink,
    bounds::SegmentBounds,
    buffer::PixelBuffer,
    effect::{EffectId, EffectParams},
    error::Error,
    segment::{MAX_NAME_LEN, Segment, SegmentId},
    sensor::{Accel, SensorInputs},
};

const ALL_SEGMENT_NAME: &str = "all";
const SEED_STRIDE: u32 = 0x9E37_79B9;

/// Strip construction parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripConfig {
    /// Number of physical LEDs
    pub led_count: u16,
    /// Initial global brightness
    pub brightness: u8,
    /// Even subdivisions created next to the whole-strip segment
    pub subdivisions: u8,
    /// Base seed of the per-segment random generators
    pub seed: u32,
}

impl StripConfig {
    pub const fn new(led_count: u16) -> Self {
        Self {
            led_count,
            brightness: u8::MAX,
            subdivisions: 0,
            seed: 1,
        }
    }

    #[must_use]
    pub const fn with_brightness(mut self, brightness: u8) -> Self {
        self.brightness = brightness;
        self
    }

    #[must_use]
    pub const fn with_subdivisions(mut self, subdivisions: u8) -> Self {
        self.subdivisions = subdivisions;
        self
    }

    #[must_use]
    pub const fn with_seed(mut self, seed: u32) -> Self {
        self.seed = seed;
        self
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self::new(60)
    }
}

/// Segmented strip with up to `MAX_LEDS` pixels and `MAX_SEGMENTS` segments
///
/// Segment 0 always covers the whole strip. Segments are updated in
/// creation order, so where ranges overlap the later segment wins.
pub struct StripController<const MAX_LEDS: usize, const MAX_SEGMENTS: usize> {
    buffer: PixelBuffer<MAX_LEDS>,
    segments: Vec<Segment<MAX_LEDS>, MAX_SEGMENTS>,
    selected: SegmentId,
    seed: u32,
}

impl<const MAX_LEDS: usize, const MAX_SEGMENTS: usize> StripController<MAX_LEDS, MAX_SEGMENTS> {
    /// Create the strip with its whole-strip segment and optional subdivisions
    pub fn new(config: StripConfig) -> Result<Self, Error> {
        let mut buffer = PixelBuffer::new(config.led_count)?;
        buffer.set_brightness(config.brightness);

        if usize::from(config.subdivisions) + 1 > MAX_SEGMENTS {
            return Err(Error::TooManySegments);
        }
        if u16::from(config.subdivisions) > config.led_count {
            return Err(Error::InvalidLedCount(config.led_count));
        }

        let mut controller = Self {
            buffer,
            segments: Vec::new(),
            selected: SegmentId::ALL,
            seed: config.seed,
        };
        controller.push_segment(ALL_SEGMENT_NAME, SegmentBounds::whole(config.led_count))?;

        for index in 0..config.subdivisions {
            let Some(bounds) =
                SegmentBounds::subdivision(config.led_count, config.subdivisions, index)
            else {
                return Err(Error::InvalidLedCount(config.led_count));
            };
            let mut name: String<MAX_NAME_LEN> = String::new();
            write!(name, "seg{}", u16::from(index) + 1).map_err(|_| Error::NameTooLong)?;
            controller.push_segment(&name, bounds)?;
        }

        Ok(controller)
    }

    /// Append a segment over the inclusive range `[start, end]`
    pub fn add_segment(&mut self, start: u16, end: u16, name: &str) -> Result<SegmentId, Error> {
        let bounds = SegmentBounds::new(start, end, self.buffer.len())?;
        self.push_segment(name, bounds)
    }

    /// Drop every segment except the whole strip and select it
    ///
    /// Pixels of the removed segments keep their last colors until
    /// something else writes them.
    pub fn clear_user_segments(&mut self) {
        self.segments.truncate(1);
        self.selected = SegmentId::ALL;

        #[cfg(feature = "esp32-log")]
        println!("[strip] user segments cleared");
    }

    fn push_segment(&mut self, name: &str, bounds: SegmentBounds) -> Result<SegmentId, Error> {
        if self.segments.is_full() {
            return Err(Error::TooManySegments);
        }
        let raw = u8::try_from(self.segments.len()).map_err(|_| Error::TooManySegments)?;
        let id = SegmentId::new(raw);
        let seed = self.seed.wrapping_add(u32::from(raw).wrapping_mul(SEED_STRIDE));
        let segment = Segment::new(id, name, bounds, seed)?;
        self.segments
            .push(segment)
            .map_err(|_| Error::TooManySegments)?;

        #[cfg(feature = "esp32-log")]
        println!(
            "[strip] segment {} '{}' created: {}..={}",
            raw,
            name,
            bounds.start(),
            bounds.end()
        );

        Ok(id)
    }

    pub fn segment(&self, id: SegmentId) -> Option<&Segment<MAX_LEDS>> {
        self.segments.get(usize::from(id.raw()))
    }

    pub fn segment_mut(&mut self, id: SegmentId) -> Option<&mut Segment<MAX_LEDS>> {
        self.segments.get_mut(usize::from(id.raw()))
    }

    pub fn segment_by_name(&self, name: &str) -> Option<&Segment<MAX_LEDS>> {
        self.segments.iter().find(|segment| segment.name() == name)
    }

    /// All segments in creation order
    pub fn segments(&self) -> &[Segment<MAX_LEDS>] {
        &self.segments
    }

    pub const fn selected(&self) -> SegmentId {
        self.selected
    }

    /// Select the segment that `start_selected` and commands act on
    pub fn select(&mut self, id: SegmentId) -> Result<(), Error> {
        if self.segment(id).is_none() {
            return Err(Error::UnknownSegment(id));
        }
        self.selected = id;
        Ok(())
    }

    pub const fn buffer(&self) -> &PixelBuffer<MAX_LEDS> {
        &self.buffer
    }

    pub const fn len(&self) -> u16 {
        self.buffer.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Start an effect on one segment
    pub fn start_effect(
        &mut self,
        id: SegmentId,
        effect: EffectId,
        params: &EffectParams,
        now: Instant,
    ) -> Result<(), Error> {
        let segment = self
            .segments
            .get_mut(usize::from(id.raw()))
            .ok_or(Error::UnknownSegment(id))?;
        segment.start_effect(effect, params, now, &mut self.buffer);

        #[cfg(feature = "esp32-log")]
        println!("[strip] segment {} started {}", id.raw(), effect.as_str());

        Ok(())
    }

    /// Start an effect on the selected segment
    pub fn start_selected(
        &mut self,
        effect: EffectId,
        params: &EffectParams,
        now: Instant,
    ) -> Result<(), Error> {
        self.start_effect(self.selected, effect, params, now)
    }

    /// Stop a segment and turn its range off
    pub fn stop(&mut self, id: SegmentId) -> Result<(), Error> {
        let segment = self
            .segments
            .get_mut(usize::from(id.raw()))
            .ok_or(Error::UnknownSegment(id))?;
        segment.stop(&mut self.buffer);

        #[cfg(feature = "esp32-log")]
        println!("[strip] segment {} stopped", id.raw());

        Ok(())
    }

    /// Broadcast the trigger state to every segment
    pub fn propagate_trigger_state(&mut self, active: bool, brightness: u8) {
        for segment in &mut self.segments {
            segment.feed_trigger(active, brightness);
        }
    }

    /// Broadcast a sound intensity to every segment
    pub fn feed_sound(&mut self, intensity: u8) {
        for segment in &mut self.segments {
            segment.feed_sound(intensity);
        }
    }

    /// Broadcast an accelerometer reading to every segment
    pub fn feed_accel(&mut self, accel: Accel) {
        for segment in &mut self.segments {
            segment.feed_accel(accel);
        }
    }

    /// Broadcast a full sensor snapshot to every segment
    pub fn feed(&mut self, inputs: &SensorInputs) {
        for segment in &mut self.segments {
            segment.feed(inputs);
        }
    }

    /// Global brightness, applied to pixels written from now on
    pub fn set_brightness(&mut self, brightness: u8) {
        self.buffer.set_brightness(brightness);
    }

    pub const fn brightness(&self) -> u8 {
        self.buffer.brightness()
    }

    /// Run one gated tick on every segment in creation order
    pub fn update(&mut self, now: Instant) {
        for segment in &mut self.segments {
            segment.update(now, &mut self.buffer);
        }
    }

    /// Push the framebuffer to the output
    pub fn flush<S: PixelSink>(&self, sink: &mut S) {
        self.buffer.flush(sink);
    }

    /// Update every segment, then flush once
    pub fn tick<S: PixelSink>(&mut self, now: Instant, sink: &mut S) {
        self.update(now);
        self.flush(sink);
    }
}
