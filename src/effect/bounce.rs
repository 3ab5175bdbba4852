//! Accelerometer-driven bouncing pixel
//!
//! The dominant axis (largest absolute acceleration) picks the color and
//! drives both the jump distance and the tick rate, so the pixel moves
//! faster and further the harder the device is shaken.

use embassy_time::Duration;

use super::{Effect, EffectStatus};
use crate::{
    buffer::Frame,
    color::Rgb,
    sensor::{Axis, SensorInputs},
};

/// Accelerations below this keep the configured interval
const ACTIVE_THRESHOLD: f32 = 0.2;
/// Shortest interval reachable through acceleration
const MIN_INTERVAL_MS: u64 = 10;

/// Single pixel bouncing between the segment ends
#[derive(Debug, Clone)]
pub struct BounceAccelEffect {
    colors: [Rgb; 3],
    interval: Duration,
    looping: bool,
    position: usize,
    forward: bool,
}

impl BounceAccelEffect {
    /// `colors` are the X, Y and Z axis colors
    pub const fn new(colors: [Rgb; 3], interval: Duration, looping: bool) -> Self {
        Self {
            colors,
            interval,
            looping,
            position: 0,
            forward: true,
        }
    }

    /// Pixel painted by the next tick
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Pixels moved per tick, never more than half the segment
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn jump(magnitude: f32, len: usize) -> usize {
        let jump = 1 + (magnitude * 4.0) as usize;
        jump.min((len / 2).max(1))
    }

    const fn axis_color(&self, axis: Axis) -> Rgb {
        match axis {
            Axis::X => self.colors[0],
            Axis::Y => self.colors[1],
            Axis::Z => self.colors[2],
        }
    }
}

impl Effect for BounceAccelEffect {
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn interval(&self, inputs: &SensorInputs) -> Duration {
        let (_, magnitude) = inputs.accel.dominant();
        if magnitude <= ACTIVE_THRESHOLD {
            return self.interval;
        }
        let base = self.interval.as_millis();
        let scaled = (base as f32 / (1.0 + magnitude * 5.0)) as u64;
        Duration::from_millis(scaled.max(MIN_INTERVAL_MS).min(base))
    }

    fn step(&mut self, frame: &mut Frame<'_>, inputs: &SensorInputs) -> EffectStatus {
        let len = frame.len();
        if len == 0 {
            return EffectStatus::Done;
        }
        let last = len - 1;
        let (axis, magnitude) = inputs.accel.dominant();
        let jump = Self::jump(magnitude, len);

        self.position = self.position.min(last);
        frame.clear();
        frame.set(self.position, self.axis_color(axis));

        if self.forward {
            let next = self.position + jump;
            if next > last {
                self.position = last;
                self.forward = false;
            } else {
                self.position = next;
            }
        } else if jump > self.position {
            self.position = 0;
            self.forward = true;
            if !self.looping {
                return EffectStatus::Done;
            }
        } else {
            self.position -= jump;
        }
        EffectStatus::Running
    }
}
