//! Solid color fill
//!
//! Paints the whole segment once and goes idle.

use embassy_time::Duration;

use super::{Effect, EffectStatus};
use crate::{buffer::Frame, color::Rgb, sensor::SensorInputs};

/// Single-frame solid fill
#[derive(Debug, Clone)]
pub struct SolidEffect {
    color: Rgb,
}

impl SolidEffect {
    pub const fn new(color: Rgb) -> Self {
        Self { color }
    }
}

impl Effect for SolidEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        Duration::from_millis(0)
    }

    fn step(&mut self, frame: &mut Frame<'_>, _inputs: &SensorInputs) -> EffectStatus {
        frame.fill(self.color);
        EffectStatus::Done
    }
}
