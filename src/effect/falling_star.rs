//! Falling star (comet with a fading trail)

use embassy_time::Duration;

use super::{Effect, EffectStatus};
use crate::{buffer::Frame, color::Rgb, sensor::SensorInputs};

/// Head moving one pixel per tick, followed by a linearly fading tail
#[derive(Debug, Clone)]
pub struct FallingStarEffect {
    color: Rgb,
    interval: Duration,
    /// Star length including the head, clamped to `[1, len]`
    length: usize,
    looping: bool,
    head: usize,
}

impl FallingStarEffect {
    pub fn new(color: Rgb, interval: Duration, length: u8, len: usize, looping: bool) -> Self {
        Self {
            color,
            interval,
            length: usize::from(length).clamp(1, len.max(1)),
            looping,
            head: 0,
        }
    }

    /// Brightness of the trail pixel `distance` behind the head
    #[allow(clippy::cast_possible_truncation)]
    const fn trail_level(&self, distance: usize) -> u8 {
        ((self.length - distance) * 255 / self.length) as u8
    }
}

impl Effect for FallingStarEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        self.interval
    }

    fn step(&mut self, frame: &mut Frame<'_>, _inputs: &SensorInputs) -> EffectStatus {
        frame.clear();
        for distance in 0..self.length.min(self.head + 1) {
            let level = self.trail_level(distance);
            frame.set_dimmed(self.head - distance, self.color, level);
        }

        self.head += 1;
        if self.head >= frame.len() {
            if !self.looping {
                return EffectStatus::Done;
            }
            self.head = 0;
        }
        EffectStatus::Running
    }
}
