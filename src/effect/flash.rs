//! Flash effects: timed strobe and trigger-driven flash

use embassy_time::Duration;

use super::{Effect, EffectStatus};
use crate::{
    buffer::Frame,
    color::{Rgb, wheel},
    sensor::SensorInputs,
};

/// Alternates the segment between the color and off on every tick
///
/// An on/off pair counts as one cycle. Non-looping flashes end dark after
/// `cycles` pairs.
#[derive(Debug, Clone)]
pub struct FlashEffect {
    color: Rgb,
    interval: Duration,
    cycles: u8,
    looping: bool,
    lit: bool,
    pairs: u8,
}

impl FlashEffect {
    /// Zero cycles are treated as one
    pub fn new(color: Rgb, interval: Duration, cycles: u8, looping: bool) -> Self {
        Self {
            color,
            interval,
            cycles: cycles.max(1),
            looping,
            lit: false,
            pairs: 0,
        }
    }
}

impl Effect for FlashEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        self.interval
    }

    fn step(&mut self, frame: &mut Frame<'_>, _inputs: &SensorInputs) -> EffectStatus {
        if !self.lit {
            frame.fill(self.color);
            self.lit = true;
            return EffectStatus::Running;
        }

        frame.clear();
        self.lit = false;
        self.pairs = self.pairs.saturating_add(1);
        if !self.looping && self.pairs >= self.cycles {
            return EffectStatus::Done;
        }
        EffectStatus::Running
    }
}

/// Lights the segment while the trigger input is active
///
/// The trigger brightness scales the color, so louder beats flash brighter.
#[derive(Debug, Clone)]
pub struct TriggerFlashEffect {
    color: Rgb,
    rainbow: bool,
    interval: Duration,
}

impl TriggerFlashEffect {
    pub const fn new(color: Rgb, rainbow: bool, interval: Duration) -> Self {
        Self {
            color,
            rainbow,
            interval,
        }
    }
}

impl Effect for TriggerFlashEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        self.interval
    }

    fn step(&mut self, frame: &mut Frame<'_>, inputs: &SensorInputs) -> EffectStatus {
        if !inputs.trigger.active {
            frame.clear();
            return EffectStatus::Running;
        }

        let len = frame.len();
        for position in 0..len {
            let color = if self.rainbow {
                wheel(position, len)
            } else {
                self.color
            };
            frame.set_dimmed(position, color, inputs.trigger.brightness);
        }
        EffectStatus::Running
    }
}
