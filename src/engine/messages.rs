use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::LevelError;
use crate::tags::TagId;

// =====================================================
// Commands into the engine
// =====================================================

#[derive(Event, Debug, Clone, PartialEq)]
pub enum PuzzleCommand {
    /// 1-based catalog index
    GenerateLevel(usize),
    RestartCurrentLevel,
    AttemptPlaceTag { tag: TagId, position: Vec3 },
    DetachTag(TagId),
    /// Teleporter activation edge
    Activate,
    /// Carry key edge: pick up nearest or drop held
    ToggleCarry,
}

// =====================================================
// Replies
// =====================================================

#[derive(Event, Debug, Clone, PartialEq)]
pub enum PuzzleReply {
    LevelGenerated(LevelSummary),
    LevelRejected(LevelError),
    Placement { tag: TagId, placed: bool },
    Detached { tag: TagId, detached: bool },
    Carry(CarryAction),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarryAction {
    PickedUp(TagId),
    Dropped { tag: TagId, placed: bool },
    Nothing,
}

/// Compact description of a built level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSummary {
    pub level_index: usize,
    pub name: String,
    pub seed: u64,
    pub floors: usize,
    pub teleporters: usize,
    pub spots: usize,
    pub prefilled: usize,
}
