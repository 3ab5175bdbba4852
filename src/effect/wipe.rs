//! Color wipe
//!
//! Lights one more pixel per tick from the start of the segment.

use embassy_time::Duration;

use super::{Effect, EffectStatus};
use crate::{buffer::Frame, color::Rgb, sensor::SensorInputs};

/// Color wipe effect
#[derive(Debug, Clone)]
pub struct WipeEffect {
    color: Rgb,
    interval: Duration,
    looping: bool,
    /// Next pixel to paint, relative to the segment start
    position: usize,
}

impl WipeEffect {
    pub const fn new(color: Rgb, interval: Duration, looping: bool) -> Self {
        Self {
            color,
            interval,
            looping,
            position: 0,
        }
    }

    /// Pixel that the next tick will paint
    pub const fn position(&self) -> usize {
        self.position
    }
}

impl Effect for WipeEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        self.interval
    }

    fn step(&mut self, frame: &mut Frame<'_>, _inputs: &SensorInputs) -> EffectStatus {
        // A new pass starts from a dark segment
        if self.position == 0 {
            frame.clear();
        }

        frame.set(self.position, self.color);
        self.position += 1;

        if self.position >= frame.len() {
            if !self.looping {
                return EffectStatus::Done;
            }
            self.position = 0;
        }
        EffectStatus::Running
    }
}
