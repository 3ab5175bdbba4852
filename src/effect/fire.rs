//! Fire simulation
//!
//! A one-dimensional heat automaton: every tick each cell cools by a random
//! amount, heat drifts away from the segment start while diffusing, and new
//! sparks ignite near the start. The heat of every cell is then mapped to a
//! color through a [`HeatGradient`].

use embassy_time::Duration;
use heapless::Vec;

use super::{Effect, EffectStatus};
use crate::{
    buffer::Frame,
    color::HeatGradient,
    math8::{qadd8, qsub8},
    random::Xorshift32,
    sensor::SensorInputs,
};

/// Frames rendered by a non-looping fire before it goes idle
pub const ONE_SHOT_FRAMES: u16 = 30;

/// Sparks ignite within this many cells from the start
const SPARK_ZONE: usize = 7;

/// Fire effect with a heat buffer sized to its segment
///
/// `N` bounds the segment length, cells past it stay dark.
#[derive(Debug, Clone)]
pub struct FireEffect<const N: usize> {
    interval: Duration,
    cooling: u8,
    sparking: u8,
    gradient: HeatGradient,
    looping: bool,
    heat: Vec<u8, N>,
    rng: Xorshift32,
    frames: u16,
}

impl<const N: usize> FireEffect<N> {
    /// Create a cold fire for a segment of `len` pixels
    pub fn new(
        len: usize,
        interval: Duration,
        cooling: u8,
        sparking: u8,
        gradient: HeatGradient,
        looping: bool,
        seed: u32,
    ) -> Self {
        let mut heat = Vec::new();
        // Capacity bounds the length, the resize cannot fail
        let _ = heat.resize(len.min(N), 0);
        Self {
            interval,
            cooling,
            sparking,
            gradient,
            looping,
            heat,
            rng: Xorshift32::new(seed),
            frames: 0,
        }
    }

    /// Current heat of every cell
    pub fn heat(&self) -> &[u8] {
        &self.heat
    }

    /// Advance the heat automaton by one generation
    #[allow(clippy::cast_possible_truncation)]
    fn simulate(&mut self) {
        let len = self.heat.len();
        if len == 0 {
            return;
        }

        // Cool down every cell, shorter segments cool faster
        let cool_max = u32::from(self.cooling) * 10 / len as u32 + 2;
        for cell in &mut self.heat {
            let cooldown = self.rng.range(0, cool_max).min(255) as u8;
            *cell = qsub8(*cell, cooldown);
        }

        // Drift away from the start and diffuse
        for k in (2..len).rev() {
            let sum = u16::from(self.heat[k - 1]) + 2 * u16::from(self.heat[k - 2]);
            self.heat[k] = (sum / 3) as u8;
        }

        // Ignite new sparks near the start
        if self.rng.next_u8() < self.sparking {
            let zone = SPARK_ZONE.min(len) as u32;
            let cell = self.rng.range(0, zone) as usize;
            let spark = self.rng.range8(160, 255);
            self.heat[cell] = qadd8(self.heat[cell], spark);
        }
    }
}

impl<const N: usize> Effect for FireEffect<N> {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        self.interval
    }

    fn step(&mut self, frame: &mut Frame<'_>, _inputs: &SensorInputs) -> EffectStatus {
        self.simulate();

        for (position, heat) in self.heat.iter().enumerate() {
            frame.set(position, self.gradient.color_at(*heat));
        }

        if !self.looping {
            self.frames = self.frames.saturating_add(1);
            if self.frames >= ONE_SHOT_FRAMES {
                return EffectStatus::Done;
            }
        }
        EffectStatus::Running
    }
}
