use bevy::prelude::*;

use super::TeleportDirection;
use crate::constants::*;

/// Floating arrow above a pad: spins and bobs around its rest position
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct IndicatorMotion {
    pub rest: Vec3,
    pub spin_deg_per_sec: f32,
    pub bob_speed: f32,
    pub bob_height: f32,
}

impl IndicatorMotion {
    pub fn above_pad(pad: Vec3, direction: TeleportDirection) -> Self {
        let lift = match direction {
            TeleportDirection::Up => UP_INDICATOR_LIFT,
            TeleportDirection::Down => DOWN_INDICATOR_LIFT,
        };
        Self {
            rest: pad + Vec3::Y * lift,
            spin_deg_per_sec: INDICATOR_SPIN_DEG_PER_SEC,
            bob_speed: INDICATOR_BOB_SPEED,
            bob_height: INDICATOR_BOB_HEIGHT,
        }
    }

    pub fn position_at(&self, elapsed_secs: f32) -> Vec3 {
        self.rest + Vec3::Y * ((elapsed_secs * self.bob_speed).sin() * self.bob_height)
    }

    pub fn rotation_at(&self, elapsed_secs: f32) -> Quat {
        Quat::from_rotation_y((self.spin_deg_per_sec * elapsed_secs).to_radians())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lift_by_direction() {
        let up = IndicatorMotion::above_pad(Vec3::ZERO, TeleportDirection::Up);
        let down = IndicatorMotion::above_pad(Vec3::ZERO, TeleportDirection::Down);
        assert!((up.rest.y - 0.5).abs() < f32::EPSILON);
        assert!((down.rest.y - 3.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_bob_stays_within_amplitude() {
        let motion = IndicatorMotion::above_pad(Vec3::new(1.0, 2.0, 3.0), TeleportDirection::Up);
        for step in 0..200 {
            let p = motion.position_at(step as f32 * 0.05);
            assert!((p.y - motion.rest.y).abs() <= motion.bob_height + 1e-5);
            assert_eq!(p.x, 1.0);
            assert_eq!(p.z, 3.0);
        }
    }
}
