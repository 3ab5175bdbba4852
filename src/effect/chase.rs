//! Moving block effects: theater chase and jump

use embassy_time::Duration;

use super::{Effect, EffectStatus};
use crate::{buffer::Frame, color::Rgb, sensor::SensorInputs};

/// Every `spacing`-th pixel lit, the pattern shifts by one each tick
#[derive(Debug, Clone)]
pub struct TheaterChaseEffect {
    color: Rgb,
    interval: Duration,
    spacing: usize,
    looping: bool,
    step: usize,
}

impl TheaterChaseEffect {
    /// Spacing below 1 is raised to 1
    pub fn new(color: Rgb, interval: Duration, spacing: u8, looping: bool) -> Self {
        Self {
            color,
            interval,
            spacing: usize::from(spacing.max(1)),
            looping,
            step: 0,
        }
    }
}

impl Effect for TheaterChaseEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        self.interval
    }

    fn step(&mut self, frame: &mut Frame<'_>, _inputs: &SensorInputs) -> EffectStatus {
        frame.clear();
        let offset = self.step % self.spacing;
        for position in (offset..frame.len()).step_by(self.spacing) {
            frame.set(position, self.color);
        }

        self.step += 1;
        if !self.looping && self.step >= self.spacing {
            return EffectStatus::Done;
        }
        EffectStatus::Running
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Forward,
    Backward,
}

/// Block of pixels jumping by its own size
///
/// Without looping the effect ends once the block reaches the segment end;
/// with looping the block bounces between both ends.
#[derive(Debug, Clone)]
pub struct JumpEffect {
    color: Rgb,
    interval: Duration,
    block: usize,
    looping: bool,
    /// Block index, the block starts at `index * block`
    index: usize,
    direction: Direction,
}

impl JumpEffect {
    /// Block size is clamped to `[1, len]`
    pub fn new(color: Rgb, interval: Duration, block: u8, len: usize, looping: bool) -> Self {
        Self {
            color,
            interval,
            block: usize::from(block).clamp(1, len.max(1)),
            looping,
            index: 0,
            direction: Direction::Forward,
        }
    }
}

impl Effect for JumpEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        self.interval
    }

    fn step(&mut self, frame: &mut Frame<'_>, _inputs: &SensorInputs) -> EffectStatus {
        let len = frame.len();
        let blocks = len.div_ceil(self.block).max(1);
        self.index = self.index.min(blocks - 1);

        frame.clear();
        let start = self.index * self.block;
        for position in start..(start + self.block).min(len) {
            frame.set(position, self.color);
        }

        match self.direction {
            Direction::Forward => {
                if self.index + 1 < blocks {
                    self.index += 1;
                } else if !self.looping {
                    return EffectStatus::Done;
                } else if blocks > 1 {
                    self.direction = Direction::Backward;
                    self.index -= 1;
                }
            }
            Direction::Backward => {
                if self.index > 0 {
                    self.index -= 1;
                } else {
                    self.direction = Direction::Forward;
                    if blocks > 1 {
                        self.index = 1;
                    }
                }
            }
        }
        EffectStatus::Running
    }
}
