//! Tag instances: the draggable blocks carrying one piece of HTML text.

pub mod held;

use std::collections::BTreeMap;
use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub use held::HeldSlot;

/// Handle to a tag instance. Ids are never reused, so a handle kept across a
/// level teardown simply stops resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TagId(pub u32);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tag#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TagInstance {
    id: TagId,
    text: String,
    prefilled: bool,
    pub floor: u32,
    pub position: Vec3,
    pub rotation: Quat,
    held: bool,
    placed: bool,
    /// Physics lock: kinematic while held, placed or prefilled
    locked: bool,
}

impl TagInstance {
    pub fn loose(id: TagId, text: impl Into<String>, floor: u32, position: Vec3) -> Self {
        Self {
            id,
            text: text.into(),
            prefilled: false,
            floor,
            position,
            rotation: Quat::IDENTITY,
            held: false,
            placed: false,
            locked: false,
        }
    }

    /// Prefilled tags start in place and never move
    pub fn prefilled(id: TagId, text: impl Into<String>, floor: u32, position: Vec3) -> Self {
        Self {
            prefilled: true,
            placed: true,
            locked: true,
            ..Self::loose(id, text, floor, position)
        }
    }

    pub fn id(&self) -> TagId {
        self.id
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_prefilled(&self) -> bool {
        self.prefilled
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn is_placed(&self) -> bool {
        self.placed
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn set_held(&mut self, held: bool) {
        self.held = held;
        self.locked = held || self.placed || self.prefilled;
    }

    pub(crate) fn snap_to(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.rotation = rotation;
        self.placed = true;
        self.locked = true;
    }

    pub(crate) fn unplace(&mut self) {
        if self.prefilled {
            return;
        }
        self.placed = false;
        self.locked = self.held;
    }
}

/// All tag instances of the running level, in spawn order
#[derive(Debug, Default)]
pub struct TagStore {
    tags: BTreeMap<TagId, TagInstance>,
    next_id: u32,
}

impl TagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn_loose(&mut self, text: impl Into<String>, floor: u32, position: Vec3) -> TagId {
        let id = self.allocate();
        self.tags.insert(id, TagInstance::loose(id, text, floor, position));
        id
    }

    pub fn spawn_prefilled(&mut self, text: impl Into<String>, floor: u32, position: Vec3) -> TagId {
        let id = self.allocate();
        self.tags
            .insert(id, TagInstance::prefilled(id, text, floor, position));
        id
    }

    fn allocate(&mut self) -> TagId {
        let id = TagId(self.next_id);
        self.next_id += 1;
        id
    }

    pub fn get(&self, id: TagId) -> Option<&TagInstance> {
        self.tags.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: TagId) -> Option<&mut TagInstance> {
        self.tags.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TagInstance> {
        self.tags.values()
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Nearest tag that may be picked up from `from`, within `range`
    pub fn nearest_pickable(&self, from: Vec3, range: f32) -> Option<TagId> {
        let mut best: Option<(TagId, f32)> = None;
        for tag in self.tags.values() {
            if tag.prefilled || tag.held {
                continue;
            }
            let d = tag.position.distance(from);
            if d <= range && best.map_or(true, |(_, bd)| d < bd) {
                best = Some((tag.id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Drop every instance; ids keep counting up
    pub fn clear(&mut self) {
        self.tags.clear();
    }
}
