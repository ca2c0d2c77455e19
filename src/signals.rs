//! Game signals raised by the engine and forwarded to Bevy as events.

use bevy::prelude::*;

use crate::tags::TagId;

#[derive(Event, Debug, Clone, PartialEq)]
pub enum GameSignal {
    /// 1-based catalog index
    LevelStarted { level_index: usize },
    LevelCompleted { level_index: usize, elapsed_secs: f32 },
    TagPickedUp { tag: TagId },
    TagPlaced { tag: TagId },
    /// Success feedback at the snap position (particles, sound)
    PlacementEffect { position: Vec3 },
    PlayerTeleported { from: Vec3, to: Vec3 },
}

/// FIFO of signals raised since the last drain
#[derive(Debug, Default)]
pub struct SignalBus {
    queue: Vec<GameSignal>,
}

impl SignalBus {
    pub fn emit(&mut self, signal: GameSignal) {
        self.queue.push(signal);
    }

    pub fn drain(&mut self) -> Vec<GameSignal> {
        std::mem::take(&mut self.queue)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
