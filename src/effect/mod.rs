//! Effect catalog with compile-time known effect variants
//!
//! All effects are stored in an enum to avoid heap allocations. Each effect
//! owns only its own parameters and counters and implements the `Effect`
//! trait. `EffectId` is the enum key used to start effects and
//! `EffectParams` carries the optional overrides of their defaults.

mod bounce;
mod breathe;
mod chase;
mod falling_star;
mod fire;
mod flash;
mod lightning;
mod meter;
mod rainbow;
mod solid;
mod wipe;

use embassy_time::Duration;

pub use bounce::BounceAccelEffect;
pub use breathe::{BreatheEffect, LEVEL_STEP, MAX_LEVEL, MIN_LEVEL};
pub use chase::{JumpEffect, TheaterChaseEffect};
pub use falling_star::FallingStarEffect;
pub use fire::{FireEffect, ONE_SHOT_FRAMES};
pub use flash::{FlashEffect, TriggerFlashEffect};
pub use lightning::{
    FLICKER_TICKS, LightningStrikeEffect, MIN_SOUND_FLASH_MS, SoundLightningEffect, SoundPhase,
    StrikePhase, StrikeStyle,
};
pub use meter::IntensityMeterEffect;
pub use rainbow::{RainbowEffect, SolidRainbowEffect, TiltRainbowEffect};
pub use solid::SolidEffect;
pub use wipe::WipeEffect;

use crate::{
    buffer::Frame,
    color::{HeatGradient, Palette, Rgb, rgb_from_u32},
    sensor::SensorInputs,
};

const EFFECT_NAME_WIPE: &str = "wipe";
const EFFECT_NAME_RAINBOW: &str = "rainbow";
const EFFECT_NAME_SOLID_RAINBOW: &str = "solid_rainbow";
const EFFECT_NAME_THEATER_CHASE: &str = "theater_chase";
const EFFECT_NAME_JUMP: &str = "jump";
const EFFECT_NAME_FIRE: &str = "fire";
const EFFECT_NAME_COLORED_FIRE: &str = "colored_fire";
const EFFECT_NAME_BREATHE: &str = "breathe";
const EFFECT_NAME_FLASH: &str = "flash";
const EFFECT_NAME_FALLING_STAR: &str = "falling_star";
const EFFECT_NAME_INTENSITY_METER: &str = "intensity_meter";
const EFFECT_NAME_BOUNCE_ACCEL: &str = "bounce_accel";
const EFFECT_NAME_TILT_RAINBOW: &str = "tilt_rainbow";
const EFFECT_NAME_LIGHTNING: &str = "lightning";
const EFFECT_NAME_SOUND_LIGHTNING: &str = "sound_lightning";
const EFFECT_NAME_TRIGGER_FLASH: &str = "trigger_flash";
const EFFECT_NAME_SOLID: &str = "solid";

const EFFECT_ID_WIPE: u8 = 0;
const EFFECT_ID_RAINBOW: u8 = 1;
const EFFECT_ID_SOLID_RAINBOW: u8 = 2;
const EFFECT_ID_THEATER_CHASE: u8 = 3;
const EFFECT_ID_JUMP: u8 = 4;
const EFFECT_ID_FIRE: u8 = 5;
const EFFECT_ID_COLORED_FIRE: u8 = 6;
const EFFECT_ID_BREATHE: u8 = 7;
const EFFECT_ID_FLASH: u8 = 8;
const EFFECT_ID_FALLING_STAR: u8 = 9;
const EFFECT_ID_INTENSITY_METER: u8 = 10;
const EFFECT_ID_BOUNCE_ACCEL: u8 = 11;
const EFFECT_ID_TILT_RAINBOW: u8 = 12;
const EFFECT_ID_LIGHTNING: u8 = 13;
const EFFECT_ID_SOUND_LIGHTNING: u8 = 14;
const EFFECT_ID_TRIGGER_FLASH: u8 = 15;
const EFFECT_ID_SOLID: u8 = 16;

/// Interval used when an effect has no default of its own
pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(50);
/// Color used when none is given
pub const DEFAULT_COLOR: Rgb = rgb_from_u32(0xFF_FFFF);

const DEFAULT_FIRE_INTERVAL: Duration = Duration::from_millis(15);
const DEFAULT_COOLING: u8 = 55;
const DEFAULT_SPARKING: u8 = 120;
const DEFAULT_FIRE_COLORS: [Rgb; 3] = [
    rgb_from_u32(0xFF_0000),
    rgb_from_u32(0xFF_8000),
    rgb_from_u32(0xFF_FF00),
];
const DEFAULT_SPACING: u8 = 3;
const DEFAULT_BLOCK_SIZE: u8 = 3;
const DEFAULT_STAR_LENGTH: u8 = 5;
const DEFAULT_BREATHS: u8 = 1;
const DEFAULT_FLASHES: u8 = 3;
const DEFAULT_METER_INTERVAL: Duration = Duration::from_millis(20);
const DEFAULT_TRIGGER_INTERVAL: Duration = Duration::from_millis(10);
const DEFAULT_AXIS_COLORS: [Rgb; 3] = [
    rgb_from_u32(0xFF_0000),
    rgb_from_u32(0x00_FF00),
    rgb_from_u32(0x00_00FF),
];
const DEFAULT_FLASH_DURATION: Duration = Duration::from_millis(100);
const DEFAULT_COOLDOWN: Duration = Duration::from_millis(500);
const DEFAULT_BASE_BRIGHTNESS: u8 = 50;
const DEFAULT_FLASH_BRIGHTNESS: u8 = 255;
const DEFAULT_SOUND_THRESHOLD: u8 = 20;

/// Outcome of one gated tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectStatus {
    /// Keep ticking
    Running,
    /// Effect finished, the segment goes idle
    Done,
}

pub trait Effect {
    /// Time that must pass since the previous tick before the next one
    ///
    /// Multi-phase effects return the wait of their current phase.
    fn interval(&self, inputs: &SensorInputs) -> Duration;

    /// Paint one frame and advance the state
    fn step(&mut self, frame: &mut Frame<'_>, inputs: &SensorInputs) -> EffectStatus;
}

/// Effect slot - enum containing all possible effects
///
/// `N` bounds the heat buffer of the fire variants.
#[derive(Debug, Clone, Default)]
pub enum EffectSlot<const N: usize> {
    /// No effect running
    #[default]
    Idle,
    Wipe(WipeEffect),
    Rainbow(RainbowEffect),
    SolidRainbow(SolidRainbowEffect),
    TheaterChase(TheaterChaseEffect),
    Jump(JumpEffect),
    Fire(FireEffect<N>),
    ColoredFire(FireEffect<N>),
    Breathe(BreatheEffect),
    Flash(FlashEffect),
    FallingStar(FallingStarEffect),
    IntensityMeter(IntensityMeterEffect),
    BounceAccel(BounceAccelEffect),
    TiltRainbow(TiltRainbowEffect),
    LightningStrike(LightningStrikeEffect),
    SoundLightning(SoundLightningEffect),
    TriggerFlash(TriggerFlashEffect),
    Solid(SolidEffect),
}

/// Dispatch a method call to the effect stored in a non-idle slot
macro_rules! with_effect {
    ($slot:expr, $effect:ident => $body:expr, idle => $idle:expr) => {
        match $slot {
            EffectSlot::Idle => $idle,
            EffectSlot::Wipe($effect) => $body,
            EffectSlot::Rainbow($effect) => $body,
            EffectSlot::SolidRainbow($effect) => $body,
            EffectSlot::TheaterChase($effect) => $body,
            EffectSlot::Jump($effect) => $body,
            EffectSlot::Fire($effect) => $body,
            EffectSlot::ColoredFire($effect) => $body,
            EffectSlot::Breathe($effect) => $body,
            EffectSlot::Flash($effect) => $body,
            EffectSlot::FallingStar($effect) => $body,
            EffectSlot::IntensityMeter($effect) => $body,
            EffectSlot::BounceAccel($effect) => $body,
            EffectSlot::TiltRainbow($effect) => $body,
            EffectSlot::LightningStrike($effect) => $body,
            EffectSlot::SoundLightning($effect) => $body,
            EffectSlot::TriggerFlash($effect) => $body,
            EffectSlot::Solid($effect) => $body,
        }
    };
}

impl<const N: usize> EffectSlot<N> {
    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// Get the effect ID for external observation
    pub const fn id(&self) -> Option<EffectId> {
        Some(match self {
            Self::Idle => return None,
            Self::Wipe(_) => EffectId::Wipe,
            Self::Rainbow(_) => EffectId::Rainbow,
            Self::SolidRainbow(_) => EffectId::SolidRainbow,
            Self::TheaterChase(_) => EffectId::TheaterChase,
            Self::Jump(_) => EffectId::Jump,
            Self::Fire(_) => EffectId::Fire,
            Self::ColoredFire(_) => EffectId::ColoredFire,
            Self::Breathe(_) => EffectId::Breathe,
            Self::Flash(_) => EffectId::Flash,
            Self::FallingStar(_) => EffectId::FallingStar,
            Self::IntensityMeter(_) => EffectId::IntensityMeter,
            Self::BounceAccel(_) => EffectId::BounceAccel,
            Self::TiltRainbow(_) => EffectId::TiltRainbow,
            Self::LightningStrike(_) => EffectId::LightningStrike,
            Self::SoundLightning(_) => EffectId::SoundLightning,
            Self::TriggerFlash(_) => EffectId::TriggerFlash,
            Self::Solid(_) => EffectId::Solid,
        })
    }

    /// Wait of the current phase, `None` when idle
    pub fn interval(&self, inputs: &SensorInputs) -> Option<Duration> {
        with_effect!(self, effect => Some(effect.interval(inputs)), idle => None)
    }

    /// Run one tick of the active effect, idle slots report `Done`
    pub fn step(&mut self, frame: &mut Frame<'_>, inputs: &SensorInputs) -> EffectStatus {
        with_effect!(self, effect => effect.step(frame, inputs), idle => EffectStatus::Done)
    }
}

/// Known effect ids that can be requested.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum EffectId {
    Wipe = EFFECT_ID_WIPE,
    Rainbow = EFFECT_ID_RAINBOW,
    SolidRainbow = EFFECT_ID_SOLID_RAINBOW,
    TheaterChase = EFFECT_ID_THEATER_CHASE,
    Jump = EFFECT_ID_JUMP,
    Fire = EFFECT_ID_FIRE,
    ColoredFire = EFFECT_ID_COLORED_FIRE,
    Breathe = EFFECT_ID_BREATHE,
    Flash = EFFECT_ID_FLASH,
    FallingStar = EFFECT_ID_FALLING_STAR,
    IntensityMeter = EFFECT_ID_INTENSITY_METER,
    BounceAccel = EFFECT_ID_BOUNCE_ACCEL,
    TiltRainbow = EFFECT_ID_TILT_RAINBOW,
    LightningStrike = EFFECT_ID_LIGHTNING,
    SoundLightning = EFFECT_ID_SOUND_LIGHTNING,
    TriggerFlash = EFFECT_ID_TRIGGER_FLASH,
    Solid = EFFECT_ID_SOLID,
}

impl EffectId {
    /// Every effect in catalog order
    pub const ALL: [Self; 17] = [
        Self::Wipe,
        Self::Rainbow,
        Self::SolidRainbow,
        Self::TheaterChase,
        Self::Jump,
        Self::Fire,
        Self::ColoredFire,
        Self::Breathe,
        Self::Flash,
        Self::FallingStar,
        Self::IntensityMeter,
        Self::BounceAccel,
        Self::TiltRainbow,
        Self::LightningStrike,
        Self::SoundLightning,
        Self::TriggerFlash,
        Self::Solid,
    ];

    pub fn from_raw(value: u8) -> Option<Self> {
        Self::ALL.get(usize::from(value)).copied()
    }

    pub const fn raw(self) -> u8 {
        self as u8
    }

    /// Next effect in catalog order, wrapping around
    pub fn next(self) -> Self {
        let next = (usize::from(self.raw()) + 1) % Self::ALL.len();
        Self::ALL[next]
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Wipe => EFFECT_NAME_WIPE,
            Self::Rainbow => EFFECT_NAME_RAINBOW,
            Self::SolidRainbow => EFFECT_NAME_SOLID_RAINBOW,
            Self::TheaterChase => EFFECT_NAME_THEATER_CHASE,
            Self::Jump => EFFECT_NAME_JUMP,
            Self::Fire => EFFECT_NAME_FIRE,
            Self::ColoredFire => EFFECT_NAME_COLORED_FIRE,
            Self::Breathe => EFFECT_NAME_BREATHE,
            Self::Flash => EFFECT_NAME_FLASH,
            Self::FallingStar => EFFECT_NAME_FALLING_STAR,
            Self::IntensityMeter => EFFECT_NAME_INTENSITY_METER,
            Self::BounceAccel => EFFECT_NAME_BOUNCE_ACCEL,
            Self::TiltRainbow => EFFECT_NAME_TILT_RAINBOW,
            Self::LightningStrike => EFFECT_NAME_LIGHTNING,
            Self::SoundLightning => EFFECT_NAME_SOUND_LIGHTNING,
            Self::TriggerFlash => EFFECT_NAME_TRIGGER_FLASH,
            Self::Solid => EFFECT_NAME_SOLID,
        }
    }

    pub fn parse_from_str(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|id| id.as_str() == s)
    }

    /// Build a fresh effect for a segment of `len` pixels
    ///
    /// Every counter starts at its initial value; unset parameters fall
    /// back to the effect defaults. `seed` feeds the stochastic effects.
    pub fn to_slot<const N: usize>(
        self,
        params: &EffectParams,
        len: usize,
        seed: u32,
    ) -> EffectSlot<N> {
        let color = params.color.unwrap_or(DEFAULT_COLOR);
        let interval = params.interval.unwrap_or(DEFAULT_INTERVAL);
        let looping = params.looping;

        match self {
            Self::Wipe => EffectSlot::Wipe(WipeEffect::new(color, interval, looping)),
            Self::Rainbow => EffectSlot::Rainbow(RainbowEffect::new(interval, looping)),
            Self::SolidRainbow => EffectSlot::SolidRainbow(SolidRainbowEffect),
            Self::TheaterChase => EffectSlot::TheaterChase(TheaterChaseEffect::new(
                color,
                interval,
                params.size.unwrap_or(DEFAULT_SPACING),
                looping,
            )),
            Self::Jump => EffectSlot::Jump(JumpEffect::new(
                color,
                interval,
                params.size.unwrap_or(DEFAULT_BLOCK_SIZE),
                len,
                looping,
            )),
            Self::Fire | Self::ColoredFire => {
                let gradient = if self == Self::Fire {
                    HeatGradient::Classic
                } else {
                    params.heat_gradient()
                };
                let fire = FireEffect::new(
                    len,
                    params.interval.unwrap_or(DEFAULT_FIRE_INTERVAL),
                    params.cooling.unwrap_or(DEFAULT_COOLING),
                    params.sparking.unwrap_or(DEFAULT_SPARKING),
                    gradient,
                    looping,
                    seed,
                );
                if self == Self::Fire {
                    EffectSlot::Fire(fire)
                } else {
                    EffectSlot::ColoredFire(fire)
                }
            }
            Self::Breathe => EffectSlot::Breathe(BreatheEffect::new(
                color,
                interval,
                params.cycles.unwrap_or(DEFAULT_BREATHS),
                looping,
            )),
            Self::Flash => EffectSlot::Flash(FlashEffect::new(
                color,
                interval,
                params.cycles.unwrap_or(DEFAULT_FLASHES),
                looping,
            )),
            Self::FallingStar => EffectSlot::FallingStar(FallingStarEffect::new(
                color,
                interval,
                params.size.unwrap_or(DEFAULT_STAR_LENGTH),
                len,
                looping,
            )),
            Self::IntensityMeter => EffectSlot::IntensityMeter(IntensityMeterEffect::new(
                params.palette.clone(),
                params.interval.unwrap_or(DEFAULT_METER_INTERVAL),
            )),
            Self::BounceAccel => EffectSlot::BounceAccel(BounceAccelEffect::new(
                [
                    params.color.unwrap_or(DEFAULT_AXIS_COLORS[0]),
                    params.secondary.unwrap_or(DEFAULT_AXIS_COLORS[1]),
                    params.tertiary.unwrap_or(DEFAULT_AXIS_COLORS[2]),
                ],
                interval,
                looping,
            )),
            Self::TiltRainbow => EffectSlot::TiltRainbow(TiltRainbowEffect::new(interval, looping)),
            Self::LightningStrike => EffectSlot::LightningStrike(LightningStrikeEffect::new(
                params.strike_style(color),
                interval,
                params.flash.unwrap_or(DEFAULT_FLASH_DURATION),
                params.cooldown.unwrap_or(DEFAULT_COOLDOWN),
                looping,
            )),
            Self::SoundLightning => EffectSlot::SoundLightning(SoundLightningEffect::new(
                params.strike_style(color),
                interval,
                params.flash.unwrap_or(DEFAULT_FLASH_DURATION),
                params.cooldown.unwrap_or(DEFAULT_COOLDOWN),
                params.threshold.unwrap_or(DEFAULT_SOUND_THRESHOLD),
                looping,
                seed,
            )),
            Self::TriggerFlash => EffectSlot::TriggerFlash(TriggerFlashEffect::new(
                color,
                params.rainbow,
                params.interval.unwrap_or(DEFAULT_TRIGGER_INTERVAL),
            )),
            Self::Solid => EffectSlot::Solid(SolidEffect::new(color)),
        }
    }
}

/// Optional effect parameters
///
/// Unset fields use the defaults of the started effect. Fields an effect
/// does not use are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EffectParams {
    /// Primary color; X-axis color for the bounce
    pub color: Option<Rgb>,
    /// Second fire stop; Y-axis color for the bounce
    pub secondary: Option<Rgb>,
    /// Third fire stop; Z-axis color for the bounce
    pub tertiary: Option<Rgb>,
    /// Tick interval; bolt speed for lightning
    pub interval: Option<Duration>,
    /// Restart instead of going idle when finished
    pub looping: bool,
    /// Chase spacing, jump block size or star length
    pub size: Option<u8>,
    /// Breaths or flash pairs before stopping
    pub cycles: Option<u8>,
    /// Fire cooling rate
    pub cooling: Option<u8>,
    /// Fire spark chance out of 255
    pub sparking: Option<u8>,
    /// Lightning flash duration
    pub flash: Option<Duration>,
    /// Lightning cooldown after the flash
    pub cooldown: Option<Duration>,
    /// Lightning base brightness
    pub base_brightness: Option<u8>,
    /// Lightning flash brightness
    pub flash_brightness: Option<u8>,
    /// Sound lightning trigger threshold
    pub threshold: Option<u8>,
    /// Use rainbow colors where supported
    pub rainbow: bool,
    /// Intensity meter bar colors
    pub palette: Palette,
}

impl EffectParams {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = Some(color);
        self
    }

    #[must_use]
    pub fn with_secondary(mut self, color: Rgb) -> Self {
        self.secondary = Some(color);
        self
    }

    #[must_use]
    pub fn with_tertiary(mut self, color: Rgb) -> Self {
        self.tertiary = Some(color);
        self
    }

    #[must_use]
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = Some(interval);
        self
    }

    #[must_use]
    pub fn with_looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    #[must_use]
    pub fn with_size(mut self, size: u8) -> Self {
        self.size = Some(size);
        self
    }

    #[must_use]
    pub fn with_cycles(mut self, cycles: u8) -> Self {
        self.cycles = Some(cycles);
        self
    }

    #[must_use]
    pub fn with_fire(mut self, cooling: u8, sparking: u8) -> Self {
        self.cooling = Some(cooling);
        self.sparking = Some(sparking);
        self
    }

    #[must_use]
    pub fn with_flash(mut self, flash: Duration, cooldown: Duration) -> Self {
        self.flash = Some(flash);
        self.cooldown = Some(cooldown);
        self
    }

    #[must_use]
    pub fn with_brightness_range(mut self, base: u8, flash: u8) -> Self {
        self.base_brightness = Some(base);
        self.flash_brightness = Some(flash);
        self
    }

    #[must_use]
    pub fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = Some(threshold);
        self
    }

    #[must_use]
    pub fn with_rainbow(mut self, rainbow: bool) -> Self {
        self.rainbow = rainbow;
        self
    }

    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Heat gradient for colored fire, a warm three-stop ramp when no
    /// color is set
    fn heat_gradient(&self) -> HeatGradient {
        match self.color {
            Some(primary) => HeatGradient::from_stops(primary, self.secondary, self.tertiary),
            None if self.secondary.is_none() && self.tertiary.is_none() => {
                let [cool, mid, hot] = DEFAULT_FIRE_COLORS;
                HeatGradient::Triple(cool, mid, hot)
            }
            None => {
                HeatGradient::from_stops(DEFAULT_FIRE_COLORS[0], self.secondary, self.tertiary)
            }
        }
    }

    fn strike_style(&self, color: Rgb) -> StrikeStyle {
        StrikeStyle {
            color,
            rainbow: self.rainbow,
            base_brightness: self.base_brightness.unwrap_or(DEFAULT_BASE_BRIGHTNESS),
            flash_brightness: self.flash_brightness.unwrap_or(DEFAULT_FLASH_BRIGHTNESS),
        }
    }
}
