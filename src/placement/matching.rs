//! Snapping a dropped tag into the nearest eligible spot.

use std::fmt;

use bevy::prelude::*;
use tracing::debug;

use super::{SpotId, SpotRegistry};
use crate::config::PlacementConfig;
use crate::tags::{TagId, TagStore};

#[derive(Debug, Clone, PartialEq)]
pub enum PlacementOutcome {
    Placed {
        spot: SpotId,
        snap_position: Vec3,
        rotation: Quat,
    },
    Rejected(PlacementRejection),
}

impl PlacementOutcome {
    pub fn is_placed(&self) -> bool {
        matches!(self, PlacementOutcome::Placed { .. })
    }
}

/// Why a drop did not snap. All of these leave every spot untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlacementRejection {
    UnknownTag,
    PrefilledTag,
    NoEligibleSpot,
    Mismatch {
        spot: SpotId,
        expected: String,
        actual: String,
    },
}

impl fmt::Display for PlacementRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacementRejection::UnknownTag => write!(f, "unknown tag"),
            PlacementRejection::PrefilledTag => write!(f, "prefilled tags cannot be placed"),
            PlacementRejection::NoEligibleSpot => write!(f, "no free spot within snap distance"),
            PlacementRejection::Mismatch {
                spot,
                expected,
                actual,
            } => write!(f, "{spot} expects {expected:?}, got {actual:?}"),
        }
    }
}

/// Nearest spot within `snap_distance` of `drop_position` that is free or
/// already holds `tag`. Equal distances keep the earlier-registered spot.
pub fn nearest_eligible(
    registry: &SpotRegistry,
    tag: TagId,
    drop_position: Vec3,
    snap_distance: f32,
) -> Option<SpotId> {
    let mut best: Option<(SpotId, f32)> = None;
    for spot in registry.all_spots() {
        if !spot.accepts(tag) {
            continue;
        }
        let d = spot.position.distance(drop_position);
        if d <= snap_distance && best.map_or(true, |(_, bd)| d < bd) {
            best = Some((spot.id(), d));
        }
    }
    best.map(|(id, _)| id)
}

/// Try to snap `tag` into a spot near `drop_position`.
///
/// On success the spot holds the tag and the tag sits on the spot, raised by
/// the configured lift, with the spot's rotation, placed and locked. A tag
/// already sitting in another spot moves out of it.
pub fn attempt_place(
    registry: &mut SpotRegistry,
    tags: &mut TagStore,
    tag: TagId,
    drop_position: Vec3,
    config: &PlacementConfig,
) -> PlacementOutcome {
    let Some(instance) = tags.get(tag) else {
        return PlacementOutcome::Rejected(PlacementRejection::UnknownTag);
    };
    if instance.is_prefilled() {
        return PlacementOutcome::Rejected(PlacementRejection::PrefilledTag);
    }
    let text = instance.text().to_string();

    let Some(spot_id) = nearest_eligible(registry, tag, drop_position, config.snap_distance) else {
        debug!(%tag, ?drop_position, "no eligible spot");
        return PlacementOutcome::Rejected(PlacementRejection::NoEligibleSpot);
    };

    let (snap_position, rotation) = match registry.get(spot_id) {
        Some(spot) if spot.expected_tag() != text => {
            let rejection = PlacementRejection::Mismatch {
                spot: spot_id,
                expected: spot.expected_tag().to_string(),
                actual: text,
            };
            debug!(%tag, %rejection, "placement rejected");
            return PlacementOutcome::Rejected(rejection);
        }
        Some(spot) => (spot.position + Vec3::Y * config.placed_tag_lift, spot.rotation),
        None => return PlacementOutcome::Rejected(PlacementRejection::NoEligibleSpot),
    };

    if let Some(previous) = registry.spot_holding(tag).filter(|id| *id != spot_id) {
        if let Some(spot) = registry.get_mut(previous) {
            spot.vacate();
        }
    }
    if let Some(spot) = registry.get_mut(spot_id) {
        spot.occupy(tag, &text);
    }
    if let Some(instance) = tags.get_mut(tag) {
        instance.snap_to(snap_position, rotation);
    }
    debug!(%tag, spot = %spot_id, text = %text, "tag placed");

    PlacementOutcome::Placed {
        spot: spot_id,
        snap_position,
        rotation,
    }
}

/// Free whichever spot holds `tag` and mark the tag unplaced
pub fn detach_if_present(registry: &mut SpotRegistry, tags: &mut TagStore, tag: TagId) -> Option<SpotId> {
    let spot_id = registry.spot_holding(tag)?;
    if let Some(spot) = registry.get_mut(spot_id) {
        spot.vacate();
    }
    if let Some(instance) = tags.get_mut(tag) {
        instance.unplace();
    }
    debug!(%tag, spot = %spot_id, "tag detached");
    Some(spot_id)
}
