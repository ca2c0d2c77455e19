//! HTML Tower - Puzzle Core Library
//!
//! Game kernel for a 3D puzzle where the player rebuilds HTML snippets by
//! carrying tag blocks into placement spots on a tower of floors:
//! - Level catalog (ten built-in lessons, JSON/RON loading)
//! - Layout generation (floors, walls, teleporters, spots, safe tag spawns)
//! - Placement spot registry, tag matching and completion
//! - Teleporter state machine between floors
//! - Carry (pickup/drop/follow), level timer, signals
//! - Bevy plugins for the engine, input and rendering

pub mod catalog;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod layout;
pub mod logging;
pub mod placement;
pub mod player;
pub mod signals;
pub mod tags;
pub mod teleporter;
pub mod timer;
pub mod visualization;
