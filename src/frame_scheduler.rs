//! Frame pacing around the strip controller.
//!
//! No async and no platform timers: the caller supplies the current time
//! and sleeps for the returned duration between frames.

use embassy_time::{Duration, Instant};

use crate::{PixelSink, controller::StripController, sensor::SensorCell};

/// Default target frame rate
pub const DEFAULT_FPS: u32 = 100;

/// Default frame duration based on target FPS
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Timing of the next frame
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// When the next frame is due
    pub next_deadline: Instant,
    /// How long to wait until then, zero when behind schedule
    pub sleep_duration: Duration,
}

/// Drives the controller at a fixed frame rate
///
/// Effects gate themselves on their own intervals, so the frame rate only
/// bounds how often those gates are checked.
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(controller, sink).with_sensors(&SENSORS);
///
/// loop {
///     let result = scheduler.tick(Instant::now());
///     Timer::after(result.sleep_duration).await;
/// }
/// ```
pub struct FrameScheduler<'a, S: PixelSink, const MAX_LEDS: usize, const MAX_SEGMENTS: usize> {
    sink: S,
    controller: StripController<MAX_LEDS, MAX_SEGMENTS>,
    sensors: Option<&'a SensorCell>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, S: PixelSink, const MAX_LEDS: usize, const MAX_SEGMENTS: usize>
    FrameScheduler<'a, S, MAX_LEDS, MAX_SEGMENTS>
{
    /// Create a scheduler running at `DEFAULT_FPS`
    pub fn new(controller: StripController<MAX_LEDS, MAX_SEGMENTS>, sink: S) -> Self {
        Self::with_frame_duration(controller, sink, DEFAULT_FRAME_DURATION)
    }

    pub fn with_frame_duration(
        controller: StripController<MAX_LEDS, MAX_SEGMENTS>,
        sink: S,
        frame_duration: Duration,
    ) -> Self {
        Self {
            sink,
            controller,
            sensors: None,
            next_frame: Instant::from_ticks(0),
            frame_duration,
        }
    }

    /// Read sensor values from `sensors` at the start of every frame
    #[must_use]
    pub fn with_sensors(mut self, sensors: &'a SensorCell) -> Self {
        self.sensors = Some(sensors);
        self
    }

    /// Process one frame and return the timing of the next one
    ///
    /// Falling more than two frames behind resets the schedule to `now`
    /// instead of rendering the backlog.
    pub fn tick(&mut self, now: Instant) -> FrameResult {
        let max_drift = self.frame_duration * 2;
        if now > self.next_frame + max_drift {
            self.next_frame = now;
        }

        if let Some(sensors) = self.sensors {
            self.controller.feed(&sensors.snapshot());
        }
        self.controller.tick(now, &mut self.sink);

        self.next_frame += self.frame_duration;
        let sleep_duration = if self.next_frame > now {
            self.next_frame - now
        } else {
            Duration::from_ticks(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    pub const fn controller(&self) -> &StripController<MAX_LEDS, MAX_SEGMENTS> {
        &self.controller
    }

    pub const fn controller_mut(&mut self) -> &mut StripController<MAX_LEDS, MAX_SEGMENTS> {
        &mut self.controller
    }

    pub const fn sink(&self) -> &S {
        &self.sink
    }

    pub const fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }
}
