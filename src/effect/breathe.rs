//! Breathing brightness envelope

use embassy_time::Duration;

use super::{Effect, EffectStatus};
use crate::{buffer::Frame, color::Rgb, sensor::SensorInputs};

/// Lowest envelope level
pub const MIN_LEVEL: u8 = 10;
/// Highest envelope level
pub const MAX_LEVEL: u8 = 255;
/// Level change per tick
pub const LEVEL_STEP: u8 = 5;

/// Base color scaled by a level ramping between [`MIN_LEVEL`] and
/// [`MAX_LEVEL`]
///
/// One breath is a full rise and fall; after `cycles` breaths the effect
/// stops unless looping.
#[derive(Debug, Clone)]
pub struct BreatheEffect {
    color: Rgb,
    interval: Duration,
    cycles: u8,
    looping: bool,
    level: u8,
    rising: bool,
    completed: u8,
}

impl BreatheEffect {
    /// Zero cycles are treated as one
    pub fn new(color: Rgb, interval: Duration, cycles: u8, looping: bool) -> Self {
        Self {
            color,
            interval,
            cycles: cycles.max(1),
            looping,
            level: MIN_LEVEL,
            rising: true,
            completed: 0,
        }
    }

    /// Current envelope level
    pub const fn level(&self) -> u8 {
        self.level
    }
}

impl Effect for BreatheEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        self.interval
    }

    fn step(&mut self, frame: &mut Frame<'_>, _inputs: &SensorInputs) -> EffectStatus {
        let mut finished = false;
        if self.rising {
            self.level = self.level.saturating_add(LEVEL_STEP).min(MAX_LEVEL);
            if self.level >= MAX_LEVEL {
                self.rising = false;
            }
        } else {
            self.level = self.level.saturating_sub(LEVEL_STEP).max(MIN_LEVEL);
            if self.level <= MIN_LEVEL {
                self.rising = true;
                self.completed = self.completed.saturating_add(1);
                finished = !self.looping && self.completed >= self.cycles;
            }
        }

        let level = self.level;
        let color = self.color;
        let len = frame.len();
        for position in 0..len {
            frame.set_dimmed(position, color, level);
        }

        if finished {
            EffectStatus::Done
        } else {
            EffectStatus::Running
        }
    }
}
