use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Top-level runtime configuration.
///
/// Loaded from JSON (`config/game.json` by convention); every field has a
/// default from [`crate::constants`], so a partial file is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub seed: u64,
    pub catalog_path: Option<PathBuf>,
    pub layout: LayoutConfig,
    pub placement: PlacementConfig,
    pub teleporter: TeleporterConfig,
    pub carry: CarryConfig,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: DEFAULT_SEED,
            catalog_path: None,
            layout: LayoutConfig::default(),
            placement: PlacementConfig::default(),
            teleporter: TeleporterConfig::default(),
            carry: CarryConfig::default(),
        }
    }
}

/// Geometry constants used by the layout generator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    pub floor_thickness: f32,
    pub wall_height: f32,
    pub wall_thickness: f32,
    pub tag_spacing: f32,
    pub spot_wall_inset: f32,
    pub spot_height: f32,
    pub prefilled_tag_lift: f32,
    pub loose_tag_lift: f32,
    pub spawn_safe_zone: f32,
    pub teleporter_wall_offset: f32,
    pub teleporter_spacing: f32,
    pub teleporter_pad_lift: f32,
    pub teleporter_clearance: f32,
    pub max_spawn_attempts: u32,
    pub spawn_sweep_steps: u32,
    pub player_spawn: [f32; 3],
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            floor_thickness: FLOOR_THICKNESS,
            wall_height: WALL_HEIGHT,
            wall_thickness: WALL_THICKNESS,
            tag_spacing: TAG_SPACING,
            spot_wall_inset: SPOT_WALL_INSET,
            spot_height: SPOT_HEIGHT,
            prefilled_tag_lift: PREFILLED_TAG_LIFT,
            loose_tag_lift: LOOSE_TAG_LIFT,
            spawn_safe_zone: TAG_SPAWN_SAFE_ZONE,
            teleporter_wall_offset: TELEPORTER_WALL_OFFSET,
            teleporter_spacing: TELEPORTER_SPACING,
            teleporter_pad_lift: TELEPORTER_PAD_LIFT,
            teleporter_clearance: TELEPORTER_CLEARANCE,
            max_spawn_attempts: MAX_SPAWN_ATTEMPTS,
            spawn_sweep_steps: SPAWN_SWEEP_STEPS,
            player_spawn: PLAYER_SPAWN,
        }
    }
}

impl LayoutConfig {
    pub fn player_spawn(&self) -> Vec3 {
        Vec3::from_array(self.player_spawn)
    }
}

/// Snapping rules for the matching engine
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementConfig {
    pub snap_distance: f32,
    pub placed_tag_lift: f32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            snap_distance: SNAP_DISTANCE,
            placed_tag_lift: PLACED_TAG_LIFT,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TeleporterConfig {
    pub trigger_radius: f32,
    pub cooldown_secs: f32,
    pub teleport_height: f32,
}

impl Default for TeleporterConfig {
    fn default() -> Self {
        Self {
            trigger_radius: TELEPORTER_TRIGGER_RADIUS,
            cooldown_secs: TELEPORTER_COOLDOWN_SECS,
            teleport_height: TELEPORT_HEIGHT,
        }
    }
}

/// Pickup and hold tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CarryConfig {
    pub pickup_range: f32,
    pub follow_speed: f32,
    pub hold_offset: [f32; 3],
}

impl Default for CarryConfig {
    fn default() -> Self {
        Self {
            pickup_range: PICKUP_RANGE,
            follow_speed: FOLLOW_SPEED,
            hold_offset: HOLD_OFFSET,
        }
    }
}

impl CarryConfig {
    pub fn hold_offset(&self) -> Vec3 {
        Vec3::from_array(self.hold_offset)
    }
}

fn require_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must be positive, got {value}"),
        })
    }
}

fn require_non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("must not be negative, got {value}"),
        })
    }
}

impl GameConfig {
    /// Reject values that would make generation or matching meaningless
    pub fn validate(&self) -> Result<(), ConfigError> {
        let layout = &self.layout;
        require_positive("layout.tag_spacing", layout.tag_spacing)?;
        require_positive("layout.wall_height", layout.wall_height)?;
        require_positive("layout.floor_thickness", layout.floor_thickness)?;
        require_non_negative("layout.spawn_safe_zone", layout.spawn_safe_zone)?;
        require_non_negative("layout.teleporter_spacing", layout.teleporter_spacing)?;
        require_non_negative("layout.teleporter_clearance", layout.teleporter_clearance)?;
        if layout.max_spawn_attempts == 0 {
            return Err(ConfigError::Invalid {
                field: "layout.max_spawn_attempts",
                reason: "must be at least 1".into(),
            });
        }
        if layout.spawn_sweep_steps < 2 {
            return Err(ConfigError::Invalid {
                field: "layout.spawn_sweep_steps",
                reason: "must be at least 2".into(),
            });
        }

        require_positive("placement.snap_distance", self.placement.snap_distance)?;
        require_non_negative("placement.placed_tag_lift", self.placement.placed_tag_lift)?;

        require_positive("teleporter.trigger_radius", self.teleporter.trigger_radius)?;
        require_positive("teleporter.cooldown_secs", self.teleporter.cooldown_secs)?;
        require_non_negative("teleporter.teleport_height", self.teleporter.teleport_height)?;

        require_positive("carry.pickup_range", self.carry.pickup_range)?;
        require_positive("carry.follow_speed", self.carry.follow_speed)?;
        Ok(())
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.placement.snap_distance - 2.0).abs() < f32::EPSILON);
        assert!((config.layout.tag_spacing - 4.0).abs() < f32::EPSILON);
        assert_eq!(config.layout.player_spawn(), Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = GameConfig::from_json(r#"{ "seed": 7, "placement": { "snap_distance": 3.5 } }"#)
            .unwrap();
        assert_eq!(config.seed, 7);
        assert!((config.placement.snap_distance - 3.5).abs() < f32::EPSILON);
        assert!((config.placement.placed_tag_lift - PLACED_TAG_LIFT).abs() < f32::EPSILON);
        assert!((config.teleporter.cooldown_secs - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_rejects_non_positive_snap() {
        let err = GameConfig::from_json(r#"{ "placement": { "snap_distance": 0.0 } }"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "placement.snap_distance"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_zero_spawn_attempts() {
        let mut config = GameConfig::default();
        config.layout.max_spawn_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let config = GameConfig::default();
        let restored = GameConfig::from_json(&config.to_json()).unwrap();
        assert_eq!(restored.seed, config.seed);
        assert_eq!(restored.layout.player_spawn, config.layout.player_spawn);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(&path, r#"{ "teleporter": { "cooldown_secs": 2.5 } }"#).unwrap();
        let config = GameConfig::load(&path).unwrap();
        assert!((config.teleporter.cooldown_secs - 2.5).abs() < f32::EPSILON);
    }

    #[test]
    fn test_load_missing_file() {
        let err = GameConfig::load("does/not/exist.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
