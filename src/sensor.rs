//! Sensor inputs consumed by reactive effects.
//!
//! Readings are already reduced to scalars by the acquisition side: a sound
//! intensity, a trigger flag with its brightness, and three accelerometer
//! axes in g. Every segment keeps its own copy in [`SensorInputs`]; producers
//! running in interrupt context publish through a [`SensorCell`], which the
//! frame loop reads once per frame. Last write wins, nothing is queued.

use core::cell::Cell;

use critical_section::Mutex;

/// Largest acceleration magnitude accepted, in g
pub const MAX_ACCEL: f32 = 16.0;

/// Accelerometer axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Acceleration on three axes, in g
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Accel {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Accel {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Replace non-finite readings with zero and clamp to `±MAX_ACCEL`
    pub fn sanitized(self) -> Self {
        Self {
            x: sanitize_axis(self.x),
            y: sanitize_axis(self.y),
            z: sanitize_axis(self.z),
        }
    }

    /// Axis with the largest absolute value and that value
    ///
    /// Ties resolve in X, Y, Z order.
    pub fn dominant(self) -> (Axis, f32) {
        let sane = self.sanitized();
        let mut axis = Axis::X;
        let mut magnitude = libm::fabsf(sane.x);
        let abs_y = libm::fabsf(sane.y);
        if abs_y > magnitude {
            axis = Axis::Y;
            magnitude = abs_y;
        }
        let abs_z = libm::fabsf(sane.z);
        if abs_z > magnitude {
            axis = Axis::Z;
            magnitude = abs_z;
        }
        (axis, magnitude)
    }
}

fn sanitize_axis(value: f32) -> f32 {
    if value.is_finite() {
        value.clamp(-MAX_ACCEL, MAX_ACCEL)
    } else {
        0.0
    }
}

/// External trigger signal (audio beat or motion event)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerInput {
    pub active: bool,
    pub brightness: u8,
}

/// Latest sensor readings as seen by one segment
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SensorInputs {
    /// Last sound intensity (0-255)
    pub sound: u8,
    /// Last trigger state
    pub trigger: TriggerInput,
    /// Last accelerometer reading
    pub accel: Accel,
}

/// Shared single-value cell for sensor producers
///
/// Producers overwrite fields at any time, including from interrupt
/// handlers; the frame loop takes a [`SensorInputs`] snapshot once per
/// frame. Access goes through critical sections.
pub struct SensorCell {
    inner: Mutex<Cell<SensorInputs>>,
}

impl SensorCell {
    /// Create a cell holding zeroed readings
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(SensorInputs {
                sound: 0,
                trigger: TriggerInput {
                    active: false,
                    brightness: 0,
                },
                accel: Accel::new(0.0, 0.0, 0.0),
            })),
        }
    }

    /// Publish a sound intensity
    pub fn store_sound(&self, intensity: u8) {
        self.modify(|inputs| inputs.sound = intensity);
    }

    /// Publish a trigger state
    pub fn store_trigger(&self, active: bool, brightness: u8) {
        self.modify(|inputs| inputs.trigger = TriggerInput { active, brightness });
    }

    /// Publish an accelerometer reading
    pub fn store_accel(&self, accel: Accel) {
        self.modify(|inputs| inputs.accel = accel.sanitized());
    }

    /// Read the latest values
    pub fn snapshot(&self) -> SensorInputs {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    fn modify(&self, f: impl FnOnce(&mut SensorInputs)) {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut inputs = cell.get();
            f(&mut inputs);
            cell.set(inputs);
        });
    }
}

impl Default for SensorCell {
    fn default() -> Self {
        Self::new()
    }
}
