//! Teleporter pads moving the player between floors.
//!
//! Each pad runs a small state machine:
//!
//! ```text
//!   Idle --enter(player)--> PlayerInRange --activate--> (pending)
//!    ^                         |   ^                       |
//!    |<--------exit------------+   |                  fixed step
//!    |                             |                       v
//!    +<----cooldown expiry---- Cooldown <---teleport-------+
//!      (to PlayerInRange instead if the player is still on the pad)
//! ```
//!
//! Activation is recorded in the frame phase; the position write happens in
//! the physics phase, and only once per activation edge.

pub mod indicator;

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::config::TeleporterConfig;
use crate::player::PlayerBody;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TeleportDirection {
    Up,
    Down,
}

impl TeleportDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeleportDirection::Up => "Up",
            TeleportDirection::Down => "Down",
        }
    }

    pub fn target_floor(&self, floor: u32) -> Option<u32> {
        match self {
            TeleportDirection::Up => floor.checked_add(1),
            TeleportDirection::Down => floor.checked_sub(1),
        }
    }
}

/// Which floor a pad serves and where it sends the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TeleporterLink {
    pub source_floor: u32,
    pub target_height: f32,
    pub direction: TeleportDirection,
}

/// Who overlapped a trigger volume
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerActor {
    Player,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TeleporterState {
    Idle,
    /// `pending` is set by an activation edge and consumed by the next
    /// physics step
    PlayerInRange { pending: bool },
    Cooldown { remaining: f32 },
}

#[derive(Debug, Clone)]
pub struct Teleporter {
    pub name: String,
    pub link: TeleporterLink,
    pub position: Vec3,
    pub trigger_radius: f32,
    pub cooldown_secs: f32,
    pub teleport_height: f32,
    state: TeleporterState,
    player_inside: bool,
}

impl Teleporter {
    pub fn new(name: String, link: TeleporterLink, position: Vec3, config: &TeleporterConfig) -> Self {
        Self {
            name,
            link,
            position,
            trigger_radius: config.trigger_radius,
            cooldown_secs: config.cooldown_secs,
            teleport_height: config.teleport_height,
            state: TeleporterState::Idle,
            player_inside: false,
        }
    }

    pub fn state(&self) -> TeleporterState {
        self.state
    }

    pub fn cooldown_remaining(&self) -> f32 {
        match self.state {
            TeleporterState::Cooldown { remaining } => remaining,
            _ => 0.0,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, TeleporterState::PlayerInRange { pending: true })
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.distance(self.position) <= self.trigger_radius
    }

    /// Landing point for a player standing at `from`
    pub fn destination(&self, from: Vec3) -> Vec3 {
        Vec3::new(from.x, self.link.target_height + self.teleport_height, from.z)
    }

    pub fn on_trigger_enter(&mut self, actor: TriggerActor) {
        if actor != TriggerActor::Player {
            return;
        }
        self.player_inside = true;
        if self.state == TeleporterState::Idle {
            self.state = TeleporterState::PlayerInRange { pending: false };
            debug!(pad = %self.name, "player in range");
        }
    }

    pub fn on_trigger_exit(&mut self, actor: TriggerActor) {
        if actor != TriggerActor::Player {
            return;
        }
        self.player_inside = false;
        if self.state == (TeleporterState::PlayerInRange { pending: false }) {
            self.state = TeleporterState::Idle;
        }
    }

    /// Translate the player's current position into enter/exit edges
    pub fn track_overlap(&mut self, player_position: Vec3) {
        let inside = self.contains(player_position);
        if inside && !self.player_inside {
            self.on_trigger_enter(TriggerActor::Player);
        } else if !inside && self.player_inside {
            self.on_trigger_exit(TriggerActor::Player);
        }
    }

    /// Record an activation edge; true if a teleport is now queued
    pub fn activate(&mut self) -> bool {
        match self.state {
            TeleporterState::PlayerInRange { pending: false } => {
                self.state = TeleporterState::PlayerInRange { pending: true };
                true
            }
            _ => false,
        }
    }

    /// Physics step: run a queued teleport and advance the cooldown.
    /// Returns the new player position when a teleport happened.
    pub fn fixed_step(&mut self, dt: f32, player: &mut PlayerBody) -> Option<Vec3> {
        match self.state {
            TeleporterState::PlayerInRange { pending: true } => {
                let target = self.destination(player.position);
                player.relocate(target);
                self.state = TeleporterState::Cooldown {
                    remaining: self.cooldown_secs,
                };
                self.player_inside = false;
                info!(
                    pad = %self.name,
                    direction = self.link.direction.as_str(),
                    height = target.y,
                    relocations = player.relocations(),
                    "player teleported"
                );
                Some(target)
            }
            TeleporterState::Cooldown { remaining } => {
                let remaining = remaining - dt;
                self.state = if remaining > 0.0 {
                    TeleporterState::Cooldown { remaining }
                } else if self.player_inside {
                    TeleporterState::PlayerInRange { pending: false }
                } else {
                    TeleporterState::Idle
                };
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pad() -> Teleporter {
        Teleporter::new(
            "Teleporter_Up_0".into(),
            TeleporterLink {
                source_floor: 0,
                target_height: 10.0,
                direction: TeleportDirection::Up,
            },
            Vec3::new(-4.0, 0.34, -18.0),
            &TeleporterConfig::default(),
        )
    }

    #[test]
    fn test_direction_target_floor() {
        assert_eq!(TeleportDirection::Up.target_floor(2), Some(3));
        assert_eq!(TeleportDirection::Down.target_floor(2), Some(1));
        assert_eq!(TeleportDirection::Down.target_floor(0), None);
    }

    #[test]
    fn test_enter_and_exit() {
        let mut tp = pad();
        tp.on_trigger_enter(TriggerActor::Player);
        assert_eq!(tp.state(), TeleporterState::PlayerInRange { pending: false });
        tp.on_trigger_exit(TriggerActor::Player);
        assert_eq!(tp.state(), TeleporterState::Idle);
    }

    #[test]
    fn test_only_player_triggers() {
        let mut tp = pad();
        tp.on_trigger_enter(TriggerActor::Other);
        assert_eq!(tp.state(), TeleporterState::Idle);
        assert!(!tp.activate());
    }

    #[test]
    fn test_activation_outside_range_is_ignored() {
        let mut tp = pad();
        assert!(!tp.activate());
        let mut body = PlayerBody::new(Vec3::ZERO);
        assert!(tp.fixed_step(0.02, &mut body).is_none());
        assert_eq!(body.relocations(), 0);
    }

    #[test]
    fn test_teleport_preserves_horizontal_position() {
        let mut tp = pad();
        let mut body = PlayerBody::new(Vec3::new(-4.2, 1.0, -17.5));
        tp.track_overlap(body.position);
        assert!(tp.activate());
        let landed = tp.fixed_step(0.02, &mut body).unwrap();
        assert_eq!(landed, Vec3::new(-4.2, 11.0, -17.5));
        assert_eq!(body.position, landed);
        assert!(!body.locomotion_enabled());
        assert!((tp.cooldown_remaining() - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_one_teleport_per_edge() {
        let mut tp = pad();
        let mut body = PlayerBody::new(Vec3::new(-4.0, 1.0, -18.0));
        tp.track_overlap(body.position);
        assert!(tp.activate());
        assert!(!tp.activate(), "second edge before the step is absorbed");
        assert!(tp.fixed_step(0.02, &mut body).is_some());
        assert!(tp.fixed_step(0.02, &mut body).is_none());
        assert_eq!(body.relocations(), 1);
    }

    #[test]
    fn test_cooldown_blocks_and_expires() {
        let mut tp = pad();
        let mut body = PlayerBody::new(Vec3::new(-4.0, 1.0, -18.0));
        tp.track_overlap(body.position);
        tp.activate();
        tp.fixed_step(0.02, &mut body);

        // Walk back into the pad while cooling down, then off again
        tp.on_trigger_enter(TriggerActor::Player);
        assert!(!tp.activate());
        assert!(matches!(tp.state(), TeleporterState::Cooldown { .. }));
        tp.on_trigger_exit(TriggerActor::Player);

        for _ in 0..60 {
            tp.fixed_step(1.0 / 50.0, &mut body);
        }
        assert_eq!(tp.state(), TeleporterState::Idle);
    }

    #[test]
    fn test_cooldown_expiry_with_player_on_pad() {
        let mut tp = pad();
        let mut body = PlayerBody::new(Vec3::new(-4.0, 1.0, -18.0));
        tp.track_overlap(body.position);
        tp.activate();
        tp.fixed_step(0.02, &mut body);

        // Land back on the pad while it cools
        let on_pad = Vec3::new(-4.0, 1.0, -18.0);
        tp.track_overlap(on_pad);
        assert!(matches!(tp.state(), TeleporterState::Cooldown { .. }));

        for _ in 0..60 {
            tp.fixed_step(1.0 / 50.0, &mut body);
            tp.track_overlap(on_pad);
        }
        assert_eq!(tp.state(), TeleporterState::PlayerInRange { pending: false });
        assert!(tp.activate());
        assert!(tp.fixed_step(0.02, &mut body).is_some());
        assert_eq!(body.relocations(), 2);
    }

    #[test]
    fn test_exit_while_pending_keeps_teleport() {
        let mut tp = pad();
        let mut body = PlayerBody::new(Vec3::new(-4.0, 1.0, -18.0));
        tp.track_overlap(body.position);
        tp.activate();
        tp.on_trigger_exit(TriggerActor::Player);
        assert!(tp.is_pending());
        assert!(tp.fixed_step(0.02, &mut body).is_some());
    }

    #[test]
    fn test_track_overlap_edges() {
        let mut tp = pad();
        tp.track_overlap(Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(tp.state(), TeleporterState::Idle);
        tp.track_overlap(Vec3::new(-4.0, 1.0, -18.0));
        assert_eq!(tp.state(), TeleporterState::PlayerInRange { pending: false });
        tp.track_overlap(Vec3::new(-4.0, 1.0, -10.0));
        assert_eq!(tp.state(), TeleporterState::Idle);
    }
}
