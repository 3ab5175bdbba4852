//! Lightning effects
//!
//! `LightningStrikeEffect` runs a fixed sweep, flash, cooldown sequence.
//! `SoundLightningEffect` waits for the sound intensity to cross a
//! threshold and scales the strike with how loud the sound was.

use embassy_time::Duration;

use super::{Effect, EffectStatus};
use crate::{
    buffer::Frame,
    color::{BLACK, Rgb, wheel},
    math8::{map_u8_to_u64, map8},
    random::Xorshift32,
    sensor::SensorInputs,
};

/// Shortest flash of a sound-triggered strike
pub const MIN_SOUND_FLASH_MS: u64 = 50;
/// Random flicker frames between the bolt growth and the flash
///
/// The flash gets its own tick after the last flicker frame.
pub const FLICKER_TICKS: u8 = 4;
/// Chance for a pixel to be lit during a flicker tick
const FLICKER_CHANCE: u8 = 70;

/// Shared strike appearance
#[derive(Debug, Clone, Copy)]
pub struct StrikeStyle {
    pub color: Rgb,
    /// Paint the bolt with a rainbow instead of the color
    pub rainbow: bool,
    /// Brightness outside the flash
    pub base_brightness: u8,
    /// Brightness of the flash
    pub flash_brightness: u8,
}

impl StrikeStyle {
    fn bolt_color(self, position: usize, len: usize) -> Rgb {
        if self.rainbow {
            wheel(position, len)
        } else {
            self.color
        }
    }

    fn paint_all(self, frame: &mut Frame<'_>, level: u8) {
        let len = frame.len();
        for position in 0..len {
            frame.set_dimmed(position, self.bolt_color(position, len), level);
        }
    }
}

/// Phase of a lightning strike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrikePhase {
    /// Head travelling towards the segment end
    Sweep,
    /// Whole segment held at flash brightness
    Flash,
    /// Segment at base brightness, waiting before completion
    Cooldown,
}

/// Timed lightning strike
#[derive(Debug, Clone)]
pub struct LightningStrikeEffect {
    style: StrikeStyle,
    speed: Duration,
    flash: Duration,
    cooldown: Duration,
    looping: bool,
    phase: StrikePhase,
    head: usize,
}

impl LightningStrikeEffect {
    pub const fn new(
        style: StrikeStyle,
        speed: Duration,
        flash: Duration,
        cooldown: Duration,
        looping: bool,
    ) -> Self {
        Self {
            style,
            speed,
            flash,
            cooldown,
            looping,
            phase: StrikePhase::Sweep,
            head: 0,
        }
    }

    pub const fn phase(&self) -> StrikePhase {
        self.phase
    }
}

impl Effect for LightningStrikeEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        match self.phase {
            StrikePhase::Sweep => self.speed,
            StrikePhase::Flash => self.flash,
            StrikePhase::Cooldown => self.cooldown,
        }
    }

    fn step(&mut self, frame: &mut Frame<'_>, _inputs: &SensorInputs) -> EffectStatus {
        let len = frame.len();
        match self.phase {
            StrikePhase::Sweep => {
                if self.head < len {
                    frame.clear();
                    let color = self.style.bolt_color(self.head, len);
                    frame.set_dimmed(self.head, color, self.style.flash_brightness);
                    self.head += 1;
                } else {
                    self.style.paint_all(frame, self.style.flash_brightness);
                    self.phase = StrikePhase::Flash;
                }
            }
            StrikePhase::Flash => {
                self.style.paint_all(frame, self.style.base_brightness);
                self.phase = StrikePhase::Cooldown;
            }
            StrikePhase::Cooldown => {
                self.phase = StrikePhase::Sweep;
                self.head = 0;
                if !self.looping {
                    return EffectStatus::Done;
                }
            }
        }
        EffectStatus::Running
    }
}

/// Phase of a sound-triggered strike
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundPhase {
    /// Waiting for the sound intensity to cross the threshold
    Armed,
    /// Bolt growing from the segment start
    Grow,
    /// Random pixels flickering
    Flicker,
    /// Whole segment at the strike brightness
    Flash,
    /// Segment at base brightness, cleared at the end
    Cooldown,
}

/// Lightning strike fired by loud sounds
///
/// The strike brightness maps `[threshold, 255]` onto
/// `[base_brightness, flash_brightness]` and the flash duration onto
/// `[MIN_SOUND_FLASH_MS, flash]`.
#[derive(Debug, Clone)]
pub struct SoundLightningEffect {
    style: StrikeStyle,
    speed: Duration,
    flash: Duration,
    cooldown: Duration,
    threshold: u8,
    looping: bool,
    phase: SoundPhase,
    head: usize,
    flickers: u8,
    strike_brightness: u8,
    strike_flash: Duration,
    rng: Xorshift32,
}

impl SoundLightningEffect {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        style: StrikeStyle,
        speed: Duration,
        flash: Duration,
        cooldown: Duration,
        threshold: u8,
        looping: bool,
        seed: u32,
    ) -> Self {
        Self {
            style,
            speed,
            flash,
            cooldown,
            threshold,
            looping,
            phase: SoundPhase::Armed,
            head: 0,
            flickers: 0,
            strike_brightness: style.flash_brightness,
            strike_flash: flash,
            rng: Xorshift32::new(seed),
        }
    }

    pub const fn phase(&self) -> SoundPhase {
        self.phase
    }

    /// Brightness of the current or last strike
    pub const fn strike_brightness(&self) -> u8 {
        self.strike_brightness
    }

    /// Flash duration of the current or last strike
    pub const fn strike_flash(&self) -> Duration {
        self.strike_flash
    }

    fn arm(&mut self, intensity: u8) {
        self.strike_brightness = map8(
            intensity,
            self.threshold,
            u8::MAX,
            self.style.base_brightness,
            self.style.flash_brightness,
        );
        let flash_ms = map_u8_to_u64(
            intensity,
            self.threshold,
            u8::MAX,
            MIN_SOUND_FLASH_MS,
            self.flash.as_millis(),
        );
        self.strike_flash = Duration::from_millis(flash_ms);
        self.head = 0;
        self.flickers = 0;
        self.phase = SoundPhase::Grow;
    }
}

impl Effect for SoundLightningEffect {
    fn interval(&self, _inputs: &SensorInputs) -> Duration {
        match self.phase {
            SoundPhase::Armed => Duration::from_millis(0),
            SoundPhase::Grow => self.speed,
            SoundPhase::Flicker => Duration::from_millis(self.speed.as_millis() / 2),
            SoundPhase::Flash => self.strike_flash,
            SoundPhase::Cooldown => self.cooldown,
        }
    }

    fn step(&mut self, frame: &mut Frame<'_>, inputs: &SensorInputs) -> EffectStatus {
        let len = frame.len();
        match self.phase {
            SoundPhase::Armed => {
                if inputs.sound > self.threshold {
                    self.arm(inputs.sound);
                }
            }
            SoundPhase::Grow => {
                for position in 0..len {
                    if position <= self.head {
                        let color = self.style.bolt_color(position, len);
                        frame.set_dimmed(position, color, self.strike_brightness);
                    } else {
                        frame.set(position, BLACK);
                    }
                }
                self.head += 1;
                if self.head >= len {
                    self.phase = SoundPhase::Flicker;
                    self.flickers = 0;
                }
            }
            SoundPhase::Flicker if self.flickers >= FLICKER_TICKS => {
                self.style.paint_all(frame, self.strike_brightness);
                self.phase = SoundPhase::Flash;
            }
            SoundPhase::Flicker => {
                for position in 0..len {
                    if self.rng.chance(FLICKER_CHANCE) {
                        let color = self.style.bolt_color(position, len);
                        frame.set_dimmed(position, color, self.strike_brightness);
                    } else {
                        frame.set(position, BLACK);
                    }
                }
                self.flickers += 1;
            }
            SoundPhase::Flash => {
                self.style.paint_all(frame, self.style.base_brightness);
                self.phase = SoundPhase::Cooldown;
            }
            SoundPhase::Cooldown => {
                frame.clear();
                self.phase = SoundPhase::Armed;
                if !self.looping {
                    return EffectStatus::Done;
                }
            }
        }
        EffectStatus::Running
    }
}
