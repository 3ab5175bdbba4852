#![no_std]

pub mod bounds;
pub mod buffer;
pub mod color;
pub mod command;
pub mod controller;
pub mod effect;
pub mod error;
pub mod frame_scheduler;
pub mod math8;
pub mod random;
pub mod segment;
pub mod sensor;

pub use bounds::SegmentBounds;
pub use buffer::{Frame, PixelBuffer};
pub use command::{
    CommandChannel, CommandProcessor, CommandReceiver, CommandSender, QueueFull, StripCommand,
};
pub use controller::{StripConfig, StripController};
pub use effect::{Effect, EffectId, EffectParams, EffectSlot, EffectStatus};
pub use error::Error;
pub use frame_scheduler::{FrameResult, FrameScheduler};
pub use segment::{Segment, SegmentId};
pub use sensor::{Accel, SensorCell, SensorInputs, TriggerInput};

pub use color::{Hsv, Palette, Rgb};
pub use embassy_time::{Duration, Instant};

/// LED output
///
/// Implement this trait to push frames to a concrete LED driver.
/// The controller calls it once per frame with every live pixel.
pub trait PixelSink {
    /// Display the colors, index 0 first
    fn show(&mut self, pixels: &[Rgb]);
}

impl<S: PixelSink + ?Sized> PixelSink for &mut S {
    fn show(&mut self, pixels: &[Rgb]) {
        (**self).show(pixels);
    }
}
