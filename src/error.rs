//! Error types for the tower core.
//!
//! Placement failures are not errors: `attempt_place` answers `false` and the
//! reason travels as a [`crate::placement::PlacementRejection`].

use thiserror::Error;

/// Errors raised by level generation commands
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LevelError {
    #[error("level {index} does not exist (catalog holds {available} levels)")]
    InvalidLevelIndex { index: usize, available: usize },

    #[error("no level is loaded")]
    NoLevelLoaded,
}

/// Errors raised while validating or loading a level catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("catalog contains no levels")]
    Empty,

    #[error("level {level}: floor count must be at least 1")]
    NoFloors { level: usize },

    #[error("level {level}: floor dimensions must be positive, got {width}x{depth}")]
    BadDimensions { level: usize, width: f32, depth: f32 },

    #[error("level {level}: floor height must be positive, got {height}")]
    BadFloorHeight { level: usize, height: f32 },

    #[error("level {level}: tag group {group} sits on floor {floor} but the level has {floor_count} floors")]
    FloorOutOfRange {
        level: usize,
        group: usize,
        floor: u32,
        floor_count: u32,
    },

    #[error("level {level}: tag group {group} prefills index {index} but holds {len} tags")]
    PrefillOutOfRange {
        level: usize,
        group: usize,
        index: usize,
        len: usize,
    },

    #[error("failed to read catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid catalog RON: {0}")]
    Ron(#[from] ron::error::SpannedError),

    #[error("unsupported catalog format: {0}")]
    UnsupportedFormat(String),
}

/// Errors raised while loading or validating the game config
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config field `{field}` {reason}")]
    Invalid { field: &'static str, reason: String },
}
