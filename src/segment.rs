//! Independently animated LED ranges.

use embassy_time::{Duration, Instant};
use heapless::String;

use crate::{
    bounds::SegmentBounds,
    buffer::PixelBuffer,
    effect::{EffectId, EffectParams, EffectSlot, EffectStatus},
    error::Error,
    sensor::{Accel, SensorInputs, TriggerInput},
};

/// Capacity of a segment name in bytes
pub const MAX_NAME_LEN: usize = 16;

/// Segment identifier, `0` is the segment covering the whole strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SegmentId(u8);

impl SegmentId {
    /// The whole-strip segment
    pub const ALL: Self = Self(0);

    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }
}

/// A contiguous sub-range of the strip with its own effect
///
/// `N` is the strip capacity; it bounds the fire heat buffer.
#[derive(Debug, Clone)]
pub struct Segment<const N: usize> {
    id: SegmentId,
    name: String<MAX_NAME_LEN>,
    bounds: SegmentBounds,
    brightness: u8,
    effect: EffectSlot<N>,
    last_update: Instant,
    inputs: SensorInputs,
    seed: u32,
}

impl<const N: usize> Segment<N> {
    /// Create an idle segment at full brightness
    pub fn new(
        id: SegmentId,
        name: &str,
        bounds: SegmentBounds,
        seed: u32,
    ) -> Result<Self, Error> {
        let name = String::try_from(name).map_err(|()| Error::NameTooLong)?;
        Ok(Self {
            id,
            name,
            bounds,
            brightness: u8::MAX,
            effect: EffectSlot::Idle,
            last_update: Instant::from_ticks(0),
            inputs: SensorInputs::default(),
            seed,
        })
    }

    pub const fn id(&self) -> SegmentId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn bounds(&self) -> SegmentBounds {
        self.bounds
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    /// Segment brightness, applied to pixels written from now on
    pub fn set_brightness(&mut self, brightness: u8) {
        self.brightness = brightness;
    }

    pub const fn is_idle(&self) -> bool {
        self.effect.is_idle()
    }

    /// Currently running effect, `None` when idle
    pub const fn effect_id(&self) -> Option<EffectId> {
        self.effect.id()
    }

    pub const fn effect(&self) -> &EffectSlot<N> {
        &self.effect
    }

    pub const fn last_update(&self) -> Instant {
        self.last_update
    }

    pub const fn inputs(&self) -> &SensorInputs {
        &self.inputs
    }

    /// Replace the active effect with a fresh instance
    ///
    /// Clears the segment range and restarts the timing gate at `now`.
    /// Stochastic effects are seeded from the segment seed, so repeated
    /// starts with the same parameters replay the same animation.
    pub fn start_effect<const MAX_LEDS: usize>(
        &mut self,
        id: EffectId,
        params: &EffectParams,
        now: Instant,
        buffer: &mut PixelBuffer<MAX_LEDS>,
    ) {
        buffer.clear_range(self.bounds);
        self.last_update = now;
        self.effect = id.to_slot(params, self.bounds.len(), self.seed);
    }

    /// Go idle and turn the range off
    pub fn stop<const MAX_LEDS: usize>(&mut self, buffer: &mut PixelBuffer<MAX_LEDS>) {
        self.effect = EffectSlot::Idle;
        buffer.clear_range(self.bounds);
    }

    /// Run one gated tick of the active effect
    ///
    /// Does nothing when idle or when less than the effect's current
    /// interval has passed since the previous tick.
    pub fn update<const MAX_LEDS: usize>(
        &mut self,
        now: Instant,
        buffer: &mut PixelBuffer<MAX_LEDS>,
    ) {
        let Some(interval) = self.effect.interval(&self.inputs) else {
            return;
        };
        let elapsed =
            Duration::from_ticks(now.as_ticks().wrapping_sub(self.last_update.as_ticks()));
        if elapsed < interval {
            return;
        }
        self.last_update = now;

        let mut frame = buffer.frame(self.bounds, self.brightness);
        if self.effect.step(&mut frame, &self.inputs) == EffectStatus::Done {
            self.effect = EffectSlot::Idle;
        }
    }

    pub fn feed_sound(&mut self, intensity: u8) {
        self.inputs.sound = intensity;
    }

    pub fn feed_trigger(&mut self, active: bool, brightness: u8) {
        self.inputs.trigger = TriggerInput { active, brightness };
    }

    /// Store an accelerometer reading, non-finite and extreme values are clamped
    pub fn feed_accel(&mut self, accel: Accel) {
        self.inputs.accel = accel.sanitized();
    }

    /// Replace all sensor inputs at once
    pub fn feed(&mut self, inputs: &SensorInputs) {
        self.inputs = SensorInputs {
            accel: inputs.accel.sanitized(),
            ..*inputs
        };
    }
}
