//! Placement spots and the registry that owns them.
//!
//! A spot expects one tag text. Prefilled spots are occupied from the moment
//! they are registered and stay occupied; every other spot changes occupancy
//! only through [`matching`].

pub mod completion;
pub mod matching;

use std::fmt;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tags::TagId;

pub use completion::{is_level_complete, CompletionLatch};
pub use matching::{attempt_place, detach_if_present, PlacementOutcome, PlacementRejection};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SpotId(pub u32);

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "spot#{}", self.0)
    }
}

/// The tag sitting in a spot, with the text it had when it was placed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpotOccupant {
    pub tag: TagId,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlacementSpot {
    id: SpotId,
    pub name: String,
    pub floor: u32,
    expected_tag: String,
    prefilled: bool,
    occupied: bool,
    occupant: Option<SpotOccupant>,
    pub position: Vec3,
    pub rotation: Quat,
}

impl PlacementSpot {
    pub fn new(
        id: SpotId,
        name: impl Into<String>,
        floor: u32,
        expected_tag: impl Into<String>,
        prefilled: bool,
        position: Vec3,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            floor,
            expected_tag: expected_tag.into(),
            prefilled,
            occupied: prefilled,
            occupant: None,
            position,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn id(&self) -> SpotId {
        self.id
    }

    pub fn expected_tag(&self) -> &str {
        &self.expected_tag
    }

    pub fn is_prefilled(&self) -> bool {
        self.prefilled
    }

    pub fn is_occupied(&self) -> bool {
        self.occupied
    }

    pub fn occupant(&self) -> Option<&SpotOccupant> {
        self.occupant.as_ref()
    }

    pub fn current_tag(&self) -> Option<TagId> {
        self.occupant.as_ref().map(|o| o.tag)
    }

    pub fn is_correctly_placed(&self) -> bool {
        self.occupied
            && self
                .occupant
                .as_ref()
                .is_some_and(|o| o.text == self.expected_tag)
    }

    /// Free, or already holding `tag`
    pub fn accepts(&self, tag: TagId) -> bool {
        if self.prefilled {
            return false;
        }
        match &self.occupant {
            Some(o) => o.tag == tag,
            None => !self.occupied,
        }
    }

    pub(crate) fn occupy(&mut self, tag: TagId, text: &str) {
        self.occupied = true;
        self.occupant = Some(SpotOccupant {
            tag,
            text: text.to_string(),
        });
    }

    /// Free the spot; prefilled spots stay occupied
    pub(crate) fn vacate(&mut self) -> Option<SpotOccupant> {
        let previous = self.occupant.take();
        self.occupied = self.prefilled;
        previous
    }

    fn reset(&mut self) {
        self.occupant = None;
        self.occupied = false;
    }
}

/// Registered spots, kept in registration order
#[derive(Debug, Default)]
pub struct SpotRegistry {
    spots: Vec<PlacementSpot>,
    next_id: u32,
}

impl SpotRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh id for a spot about to be registered
    pub fn allocate_id(&mut self) -> SpotId {
        let id = SpotId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Add a spot. Registering an id that is already present is a no-op and
    /// returns false.
    pub fn register(&mut self, spot: PlacementSpot) -> bool {
        if self.spots.iter().any(|s| s.id == spot.id) {
            return false;
        }
        self.next_id = self.next_id.max(spot.id.0 + 1);
        self.spots.push(spot);
        true
    }

    pub fn unregister(&mut self, id: SpotId) -> Option<PlacementSpot> {
        let index = self.spots.iter().position(|s| s.id == id)?;
        Some(self.spots.remove(index))
    }

    /// Reset every spot, then forget them all. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        for spot in &mut self.spots {
            spot.reset();
        }
        let removed = self.spots.len();
        self.spots.clear();
        if removed > 0 {
            debug!(removed, "spot registry cleared");
        }
        removed
    }

    pub fn all_spots(&self) -> &[PlacementSpot] {
        &self.spots
    }

    pub fn get(&self, id: SpotId) -> Option<&PlacementSpot> {
        self.spots.iter().find(|s| s.id == id)
    }

    pub(crate) fn get_mut(&mut self, id: SpotId) -> Option<&mut PlacementSpot> {
        self.spots.iter_mut().find(|s| s.id == id)
    }

    /// Spot currently holding `tag`
    pub fn spot_holding(&self, tag: TagId) -> Option<SpotId> {
        self.spots
            .iter()
            .find(|s| s.current_tag() == Some(tag))
            .map(|s| s.id)
    }

    pub fn occupied_count(&self) -> usize {
        self.spots.iter().filter(|s| s.occupied).count()
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spot(registry: &mut SpotRegistry, expected: &str, prefilled: bool) -> PlacementSpot {
        let id = registry.allocate_id();
        PlacementSpot::new(id, format!("TagSpot_0_{}", id.0), 0, expected, prefilled, Vec3::ZERO)
    }

    #[test]
    fn test_prefilled_spot_starts_occupied() {
        let mut reg = SpotRegistry::new();
        let s = spot(&mut reg, "<h1>", true);
        assert!(s.is_occupied());
        assert!(!s.is_correctly_placed());
        assert!(!s.accepts(TagId(0)));
    }

    #[test]
    fn test_register_is_idempotent() {
        let mut reg = SpotRegistry::new();
        let s = spot(&mut reg, "a", false);
        assert!(reg.register(s.clone()));
        assert!(!reg.register(s));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_register_keeps_ids_unique() {
        let mut reg = SpotRegistry::new();
        reg.register(PlacementSpot::new(SpotId(7), "x", 0, "a", false, Vec3::ZERO));
        assert_eq!(reg.allocate_id(), SpotId(8));
    }

    #[test]
    fn test_unregister() {
        let mut reg = SpotRegistry::new();
        let s = spot(&mut reg, "a", false);
        let id = s.id();
        reg.register(s);
        assert!(reg.unregister(id).is_some());
        assert!(reg.unregister(id).is_none());
        assert!(reg.is_empty());
    }

    #[test]
    fn test_correctly_placed_compares_text() {
        let mut reg = SpotRegistry::new();
        let mut s = spot(&mut reg, "a", false);
        s.occupy(TagId(3), "b");
        assert!(!s.is_correctly_placed());
        s.occupy(TagId(3), "a");
        assert!(s.is_correctly_placed());
        assert!(s.accepts(TagId(3)));
        assert!(!s.accepts(TagId(4)));
        assert_eq!(s.vacate().map(|o| o.tag), Some(TagId(3)));
        assert!(!s.is_occupied());
    }

    #[test]
    fn test_clear_empties_registry() {
        let mut reg = SpotRegistry::new();
        for i in 0..3 {
            let s = spot(&mut reg, "a", i == 0);
            reg.register(s);
        }
        assert_eq!(reg.occupied_count(), 1);
        assert_eq!(reg.clear(), 3);
        assert!(reg.all_spots().is_empty());
        assert_eq!(reg.clear(), 0);
    }
}
