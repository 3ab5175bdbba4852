//! Sound intensity bar meter

use embassy_time::Duration;

use super::{Effect, EffectStatus};
use crate::{
    buffer::Frame,
    color::{BLACK, Palette},
    sensor::SensorInputs,
};

/// Bar graph of the last sound intensity
///
/// The segment is split into one bar per palette color. Intensity 255
/// lights every bar; an empty palette lights nothing. The bar is fully
/// redrawn on every tick and the effect never ends on its own.
#[derive(Debug, Clone)]
pub struct IntensityMeterEffect {
    palette: Palette,
    interval: Duration,
}

impl IntensityMeterEffect {
    pub const fn new(palette: Palette, interval: Duration) -> Self {
        Self { palette, interval }
    }

    /// Number of bars lit for an intensity
    pub fn lit_bars(&self, intensity: u8) -> usize {
        usize::from(intensity) * self.palette.len() / 255
    }
}

impl Effect for IntensityMeterEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        self.interval
    }

    fn step(&mut self, frame: &mut Frame<'_>, inputs: &SensorInputs) -> EffectStatus {
        let len = frame.len();
        let bars = self.palette.len();
        let lit = self.lit_bars(inputs.sound);

        for position in 0..len {
            let bar = position * bars / len;
            let color = if bar < lit {
                self.palette.get(bar).unwrap_or(BLACK)
            } else {
                BLACK
            };
            frame.set(position, color);
        }
        EffectStatus::Running
    }
}
