//! Centralized game constants for the HTML tower core.
//!
//! These are the defaults behind [`crate::config::GameConfig`]. Code reads the
//! config, not these constants, so a loaded config file can override them.

// =====================================================
// Floors & Walls
// =====================================================

/// Vertical distance between consecutive floors
pub const FLOOR_HEIGHT: f32 = 10.0;

/// Default floor footprint (width along X, depth along Z)
pub const FLOOR_WIDTH: f32 = 40.0;
pub const FLOOR_DEPTH: f32 = 40.0;

/// Thickness of the floor slab
pub const FLOOR_THICKNESS: f32 = 0.5;

/// Height of the four bounding walls
pub const WALL_HEIGHT: f32 = 5.0;

/// Thickness of a wall slab
pub const WALL_THICKNESS: f32 = 1.0;

// =====================================================
// Teleporters
// =====================================================

/// Inset of the teleporter row from its wall
pub const TELEPORTER_WALL_OFFSET: f32 = 2.0;

/// Horizontal gap between an up and a down pad on the same floor
pub const TELEPORTER_SPACING: f32 = 8.0;

/// Pad lift above the floor surface
pub const TELEPORTER_PAD_LIFT: f32 = 0.34;

/// Player lands this far above the target floor
pub const TELEPORT_HEIGHT: f32 = 1.0;

/// Radius of the trigger sphere around a pad
pub const TELEPORTER_TRIGGER_RADIUS: f32 = 1.5;

/// Seconds a pad ignores activation after use
pub const TELEPORTER_COOLDOWN_SECS: f32 = 1.0;

/// Indicator lift above an upward pad
pub const UP_INDICATOR_LIFT: f32 = 0.5;

/// Indicator lift above a downward pad
pub const DOWN_INDICATOR_LIFT: f32 = 3.0;

/// Indicator spin in degrees per second
pub const INDICATOR_SPIN_DEG_PER_SEC: f32 = 30.0;

/// Indicator bob frequency (radians per second) and amplitude
pub const INDICATOR_BOB_SPEED: f32 = 2.0;
pub const INDICATOR_BOB_HEIGHT: f32 = 0.2;

// =====================================================
// Tag Spots & Spawning
// =====================================================

/// Gap between neighbouring spots in a tag group
pub const TAG_SPACING: f32 = 4.0;

/// Inset of the spot row from its wall
pub const SPOT_WALL_INSET: f32 = 2.0;

/// Spot lift above the floor surface
pub const SPOT_HEIGHT: f32 = 0.3;

/// Prefilled tags rest this far above their spot
pub const PREFILLED_TAG_LIFT: f32 = 0.31;

/// Loose tags spawn this far above the floor surface
pub const LOOSE_TAG_LIFT: f32 = 0.5;

/// Margin kept between random tag spawns and the side walls
pub const TAG_SPAWN_SAFE_ZONE: f32 = 3.0;

/// Minimum horizontal distance between a random tag and any pad on its floor
pub const TELEPORTER_CLEARANCE: f32 = 4.0;

/// Random draws before the spawn sampler falls back to a grid sweep
pub const MAX_SPAWN_ATTEMPTS: u32 = 64;

/// Grid resolution of the fallback sweep along each axis
pub const SPAWN_SWEEP_STEPS: u32 = 16;

// =====================================================
// Placement & Carrying
// =====================================================

/// Maximum 3D distance between a drop point and a spot for snapping
pub const SNAP_DISTANCE: f32 = 2.0;

/// A placed tag sits this far above its spot
pub const PLACED_TAG_LIFT: f32 = 0.2;

/// Maximum distance between the player and a tag it can pick up
pub const PICKUP_RANGE: f32 = 2.0;

/// Held tags close this fraction of the gap per second
pub const FOLLOW_SPEED: f32 = 12.0;

/// Hold offset in the player's local frame (x right, y up, z forward)
pub const HOLD_OFFSET: [f32; 3] = [0.0, 1.0, 0.5];

// =====================================================
// Player
// =====================================================

/// Where the player is placed when a level starts
pub const PLAYER_SPAWN: [f32; 3] = [0.0, 1.0, 0.0];

/// Base seed for tag spawn randomness
pub const DEFAULT_SEED: u64 = 42;
