//! Puzzle engine: the single context that owns a running level.
//!
//! Architecture:
//!   PuzzleEngine (plain struct, fully testable without Bevy)
//!     ├── SpotRegistry + TagStore + HeldSlot
//!     ├── Teleporters + PlayerBody
//!     └── SignalBus + LevelTimer
//!   PuzzlePlugin  → holds the engine as a resource, maps events to calls
//!   PuzzleInputPlugin → keyboard edges to commands (binary only)

pub mod input;
pub mod messages;
pub mod plugin;
pub mod puzzle;

pub use input::PuzzleInputPlugin;
pub use messages::{CarryAction, LevelSummary, PuzzleCommand, PuzzleReply};
pub use plugin::{EngineResource, PlayerAvatar, PuzzlePlugin};
pub use puzzle::{LevelInstance, PuzzleEngine};

// =====================================================
// Tests
// =====================================================
