//! Rainbow effects
//!
//! Provides three variants sharing the color wheel helper:
//! - `RainbowEffect`: the gradient rotates one position per tick
//! - `SolidRainbowEffect`: one static frame of the gradient
//! - `TiltRainbowEffect`: static gradient shifted by the X-axis tilt

use embassy_time::Duration;

use super::{Effect, EffectStatus};
use crate::{buffer::Frame, color::wheel, sensor::SensorInputs};

/// Paint one full wheel traversal over the frame, shifted by `offset`
fn paint_wheel(frame: &mut Frame<'_>, offset: usize) {
    let len = frame.len();
    for position in 0..len {
        frame.set(position, wheel(position + offset, len));
    }
}

/// Animated rainbow
///
/// Each tick paints hue `(phase + position) mod len` and advances the phase
/// by one position. One cycle is `len` ticks.
#[derive(Debug, Clone)]
pub struct RainbowEffect {
    interval: Duration,
    looping: bool,
    phase: usize,
}

impl RainbowEffect {
    pub const fn new(interval: Duration, looping: bool) -> Self {
        Self {
            interval,
            looping,
            phase: 0,
        }
    }

    /// Current phase offset
    pub const fn phase(&self) -> usize {
        self.phase
    }
}

impl Effect for RainbowEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        self.interval
    }

    fn step(&mut self, frame: &mut Frame<'_>, _inputs: &SensorInputs) -> EffectStatus {
        paint_wheel(frame, self.phase);

        self.phase += 1;
        if self.phase >= frame.len() {
            self.phase = 0;
            if !self.looping {
                return EffectStatus::Done;
            }
        }
        EffectStatus::Running
    }
}

/// Static rainbow, painted on the first update
#[derive(Debug, Clone, Default)]
pub struct SolidRainbowEffect;

impl Effect for SolidRainbowEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        Duration::from_millis(0)
    }

    fn step(&mut self, frame: &mut Frame<'_>, _inputs: &SensorInputs) -> EffectStatus {
        paint_wheel(frame, 0);
        EffectStatus::Done
    }
}

/// Rainbow whose phase follows the X-axis tilt
///
/// The tilt is clamped to `[-1, 1]` and mapped onto `[0, len - 1]`.
#[derive(Debug, Clone)]
pub struct TiltRainbowEffect {
    interval: Duration,
    looping: bool,
}

impl TiltRainbowEffect {
    pub const fn new(interval: Duration, looping: bool) -> Self {
        Self { interval, looping }
    }

    /// Wheel offset for a tilt value over `len` pixels
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn offset(tilt: f32, len: usize) -> usize {
        let tilt = if tilt.is_finite() {
            tilt.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        let span = len.saturating_sub(1) as f32;
        ((tilt + 1.0) * span / 2.0) as usize
    }
}

impl Effect for TiltRainbowEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        self.interval
    }

    fn step(&mut self, frame: &mut Frame<'_>, inputs: &SensorInputs) -> EffectStatus {
        let offset = Self::offset(inputs.accel.x, frame.len());
        paint_wheel(frame, offset);

        if self.looping {
            EffectStatus::Running
        } else {
            EffectStatus::Done
        }
    }
}
