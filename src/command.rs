//! Strip commands and the queue that carries them to the frame loop.
//!
//! The queue is a bounded `heapless::Deque` behind a `critical-section`
//! mutex, so commands can be pushed from interrupt handlers or other
//! executors while the frame loop drains them without blocking.

use core::cell::RefCell;

use critical_section::Mutex;
use embassy_time::Instant;
use heapless::{Deque, String};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::{
    controller::StripController,
    effect::{EffectId, EffectParams},
    error::Error,
    segment::{MAX_NAME_LEN, SegmentId},
};

/// Request to change the strip state
#[derive(Debug, Clone, PartialEq)]
pub enum StripCommand {
    /// Make a segment the target of later commands
    Select(SegmentId),
    /// Start an effect on the selected segment
    Start {
        effect: EffectId,
        params: EffectParams,
    },
    /// Start an effect on a given segment
    StartOn {
        segment: SegmentId,
        effect: EffectId,
        params: EffectParams,
    },
    /// Stop the selected segment
    Stop,
    /// Start the next catalog effect on the selected segment
    Next,
    /// Global brightness
    SetBrightness(u8),
    /// Brightness of the selected segment
    SetSegmentBrightness(u8),
    /// Append a segment over `[start, end]`
    AddSegment {
        start: u16,
        end: u16,
        name: String<MAX_NAME_LEN>,
    },
    /// Remove every segment but the whole strip
    ClearUserSegments,
}

/// Returned when the queue is full, carries the rejected command
#[derive(Debug, Clone, PartialEq)]
pub struct QueueFull(pub StripCommand);

/// Bounded command queue holding up to `SIZE` commands
pub struct CommandChannel<const SIZE: usize> {
    queue: Mutex<RefCell<Deque<StripCommand, SIZE>>>,
}

impl<const SIZE: usize> CommandChannel<SIZE> {
    pub const fn new() -> Self {
        Self {
            queue: Mutex::new(RefCell::new(Deque::new())),
        }
    }

    /// Handle for producers, any number may coexist
    pub const fn sender(&self) -> CommandSender<'_, SIZE> {
        CommandSender { channel: self }
    }

    /// Handle for the frame loop
    pub const fn receiver(&self) -> CommandReceiver<'_, SIZE> {
        CommandReceiver { channel: self }
    }

    /// Queue a command, handing it back when the queue is full
    pub fn try_send(&self, command: StripCommand) -> Result<(), QueueFull> {
        critical_section::with(|cs| {
            self.queue
                .borrow_ref_mut(cs)
                .push_back(command)
                .map_err(QueueFull)
        })
    }

    /// Take the oldest command, if any
    pub fn try_receive(&self) -> Option<StripCommand> {
        critical_section::with(|cs| self.queue.borrow_ref_mut(cs).pop_front())
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        critical_section::with(|cs| self.queue.borrow_ref(cs).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<const SIZE: usize> Default for CommandChannel<SIZE> {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Copy)]
pub struct CommandSender<'a, const SIZE: usize> {
    channel: &'a CommandChannel<SIZE>,
}

impl<const SIZE: usize> CommandSender<'_, SIZE> {
    pub fn try_send(&self, command: StripCommand) -> Result<(), QueueFull> {
        self.channel.try_send(command)
    }
}

#[derive(Clone, Copy)]
pub struct CommandReceiver<'a, const SIZE: usize> {
    channel: &'a CommandChannel<SIZE>,
}

impl<const SIZE: usize> CommandReceiver<'_, SIZE> {
    pub fn try_receive(&self) -> Option<StripCommand> {
        self.channel.try_receive()
    }
}

/// Applies queued commands to a strip controller
pub struct CommandProcessor<'a, const SIZE: usize> {
    commands: CommandReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> CommandProcessor<'a, SIZE> {
    pub const fn new(commands: CommandReceiver<'a, SIZE>) -> Self {
        Self { commands }
    }

    /// Drain every pending command (non-blocking)
    ///
    /// Rejected commands are dropped without touching the controller.
    /// Returns the number of commands that were applied.
    pub fn process_pending<const MAX_LEDS: usize, const MAX_SEGMENTS: usize>(
        &mut self,
        controller: &mut StripController<MAX_LEDS, MAX_SEGMENTS>,
        now: Instant,
    ) -> usize {
        let mut applied = 0;
        while let Some(command) = self.commands.try_receive() {
            match Self::apply(controller, command, now) {
                Ok(()) => applied += 1,
                Err(error) => {
                    #[cfg(feature = "esp32-log")]
                    println!("[command] rejected: {}", error);
                    #[cfg(not(feature = "esp32-log"))]
                    let _ = error;
                }
            }
        }
        applied
    }

    /// Apply a single command
    pub fn apply<const MAX_LEDS: usize, const MAX_SEGMENTS: usize>(
        controller: &mut StripController<MAX_LEDS, MAX_SEGMENTS>,
        command: StripCommand,
        now: Instant,
    ) -> Result<(), Error> {
        match command {
            StripCommand::Select(id) => controller.select(id),
            StripCommand::Start { effect, params } => {
                controller.start_selected(effect, &params, now)
            }
            StripCommand::StartOn {
                segment,
                effect,
                params,
            } => controller.start_effect(segment, effect, &params, now),
            StripCommand::Stop => controller.stop(controller.selected()),
            StripCommand::Next => {
                let selected = controller.selected();
                let next = controller
                    .segment(selected)
                    .and_then(|segment| segment.effect_id())
                    .map_or(EffectId::Wipe, EffectId::next);
                controller.start_effect(selected, next, &EffectParams::default(), now)
            }
            StripCommand::SetBrightness(brightness) => {
                controller.set_brightness(brightness);
                Ok(())
            }
            StripCommand::SetSegmentBrightness(brightness) => {
                let selected = controller.selected();
                let segment = controller
                    .segment_mut(selected)
                    .ok_or(Error::UnknownSegment(selected))?;
                segment.set_brightness(brightness);
                Ok(())
            }
            StripCommand::AddSegment { start, end, name } => {
                controller.add_segment(start, end, &name).map(|_| ())
            }
            StripCommand::ClearUserSegments => {
                controller.clear_user_segments();
                Ok(())
            }
        }
    }
}
